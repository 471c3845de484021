//! API key validation and on-disk storage.

use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// Anthropic API keys start with this prefix.
pub const KEY_PREFIX: &str = "sk-ant-";

/// File name under the store directory.
const KEY_FILE: &str = "api_key";

/// Why an entered key was rejected. `Display` is the message shown next to
/// the input field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Please enter your Claude API key")]
    Empty,

    #[error("Claude API keys should start with \"sk-ant-\"")]
    BadPrefix,
}

/// Validate an entered key, returning it trimmed.
pub fn validate_key(input: &str) -> Result<String, CredentialError> {
    let key = input.trim();
    if key.is_empty() {
        return Err(CredentialError::Empty);
    }
    if !key.starts_with(KEY_PREFIX) {
        return Err(CredentialError::BadPrefix);
    }
    Ok(key.to_string())
}

/// Errors from the on-disk key store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No configuration directory on this system")]
    NoConfigDir,
}

/// Stores the API key as a plain text file under a config directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    /// A store rooted at a specific directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The default store under the user's config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("bedtime")))
    }

    fn key_path(&self) -> PathBuf {
        self.dir.join(KEY_FILE)
    }

    /// Load the stored key, if any.
    pub async fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path()).await {
            Ok(contents) => {
                let key = contents.trim().to_string();
                Ok((!key.is_empty()).then_some(key))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Save a key, replacing any previous one.
    pub async fn save(&self, key: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.key_path(), key).await?;
        Ok(())
    }

    /// Remove the stored key. A missing file is not an error.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.key_path()).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_input() {
        assert_eq!(validate_key(""), Err(CredentialError::Empty));
        assert_eq!(validate_key("   "), Err(CredentialError::Empty));
        assert_eq!(
            CredentialError::Empty.to_string(),
            "Please enter your Claude API key"
        );
    }

    #[test]
    fn test_validate_rejects_wrong_prefix() {
        assert_eq!(validate_key("my-secret-key"), Err(CredentialError::BadPrefix));
        assert_eq!(
            CredentialError::BadPrefix.to_string(),
            "Claude API keys should start with \"sk-ant-\""
        );
    }

    #[test]
    fn test_validate_trims_and_accepts() {
        assert_eq!(
            validate_key("  sk-ant-abc123  "),
            Ok("sk-ant-abc123".to_string())
        );
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = CredentialStore::new(dir.path().join("bedtime"));

        assert_eq!(store.load().await.expect("Should load"), None);

        store.save("sk-ant-abc123").await.expect("Should save");
        assert_eq!(
            store.load().await.expect("Should load"),
            Some("sk-ant-abc123".to_string())
        );
    }

    #[tokio::test]
    async fn test_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().expect("Should create temp dir");
        let store = CredentialStore::new(dir.path().join("bedtime"));

        store.clear().await.expect("Should clear missing file");
        store.save("sk-ant-abc123").await.expect("Should save");
        store.clear().await.expect("Should clear");
        store.clear().await.expect("Should clear again");
        assert_eq!(store.load().await.expect("Should load"), None);
    }
}
