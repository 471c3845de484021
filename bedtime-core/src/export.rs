//! Saving finished stories to plain text files.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::profile::Story;

/// Errors from exporting a story.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// File name derived from a story title: non-alphanumerics become
/// underscores, lowercased, with a `.txt` extension.
pub fn file_name(title: &str) -> String {
    let slug = title
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase();
    format!("{slug}.txt")
}

/// The text written to the export file.
pub fn file_contents(story: &Story) -> String {
    format!("{}\n\n{}", story.title, story.body)
}

/// Write the story into `dir`, returning the path written.
pub async fn save_to_dir(story: &Story, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).await?;
    let path = dir.join(file_name(&story.title));
    fs::write(&path, file_contents(story)).await?;
    Ok(path)
}
