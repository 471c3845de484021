//! Headless mode: one-shot story generation for scripts and automation.

use bedtime_core::assembler::assemble;
use bedtime_core::credential::CredentialStore;
use bedtime_core::profile::{
    parse_gender, parse_interest, parse_style, Gender, Interest, Profile, StoryStyle, DEFAULT_AGE,
};
use bedtime_core::storyteller::{GenerationError, Storyteller, StorytellerConfig};
use bedtime_core::wizard::{first_unmet_step, Step};

#[derive(Debug, Clone, Default)]
pub struct HeadlessConfig {
    pub age: Option<u8>,
    pub gender: Option<Gender>,
    pub interests: Vec<Interest>,
    pub style: Option<StoryStyle>,
    pub lesson: String,
    pub offline: bool,
    pub model: Option<String>,
}

pub fn parse_config_from_args(args: &[String]) -> HeadlessConfig {
    let mut config = HeadlessConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--age" => {
                if let Some(value) = args.get(i + 1) {
                    config.age = value.parse().ok();
                    i += 1;
                }
            }
            "--gender" => {
                if let Some(value) = args.get(i + 1) {
                    config.gender = parse_gender(value);
                    i += 1;
                }
            }
            "--interests" => {
                if let Some(value) = args.get(i + 1) {
                    config.interests = value
                        .split(',')
                        .filter_map(|s| parse_interest(s.trim()))
                        .collect();
                    i += 1;
                }
            }
            "--style" => {
                if let Some(value) = args.get(i + 1) {
                    config.style = parse_style(value);
                    i += 1;
                }
            }
            "--lesson" => {
                if let Some(value) = args.get(i + 1) {
                    config.lesson = value.clone();
                    i += 1;
                }
            }
            "--offline" => config.offline = true,
            "--model" => {
                if let Some(value) = args.get(i + 1) {
                    config.model = Some(value.clone());
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    config
}

pub async fn run_headless(config: HeadlessConfig) -> Result<(), GenerationError> {
    let profile = Profile {
        age: config.age.unwrap_or(DEFAULT_AGE),
        gender: config.gender,
        interests: config.interests,
        style: config.style,
        lesson: config.lesson,
    };

    if let Some(step) = first_unmet_step(&profile) {
        return Err(GenerationError::Config(flag_hint(step).to_string()));
    }

    let story = if config.offline {
        log::info!("assembling a story offline");
        assemble(&profile)
    } else {
        let storyteller = build_storyteller(config.model).await?;
        storyteller.generate(&profile).await?
    };

    println!("{}", story.title);
    println!();
    println!("{}", story.body);
    Ok(())
}

fn flag_hint(step: Step) -> &'static str {
    match step {
        Step::Age => "--age must be between 2 and 12",
        Step::Gender => "--gender is required (boy, girl, other, prefer-not-to-say)",
        Step::Interests => "--interests needs at least one known interest",
        Step::Style => {
            "--style is required (funny, adventurous, magical, gentle, educational, mysterious)"
        }
        Step::Lesson => "--lesson must not be empty",
    }
}

async fn build_storyteller(model: Option<String>) -> Result<Storyteller, GenerationError> {
    let key = load_api_key().await.ok_or_else(|| {
        GenerationError::Config(
            "No API key found; run the TUI once to store one, set ANTHROPIC_API_KEY, or pass --offline"
                .to_string(),
        )
    })?;

    let mut config = StorytellerConfig::default();
    if let Some(model) = model.or_else(|| std::env::var("BEDTIME_MODEL").ok()) {
        config = config.with_model(model);
    }
    Ok(Storyteller::new(key).with_config(config))
}

async fn load_api_key() -> Option<String> {
    if let Ok(store) = CredentialStore::open_default() {
        match store.load().await {
            Ok(Some(key)) => return Some(key),
            Ok(None) => {}
            Err(err) => log::warn!("could not read the stored API key: {err}"),
        }
    }
    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_config_from_args() {
        let config = parse_config_from_args(&args(&[
            "bedtime",
            "--headless",
            "--age",
            "7",
            "--gender",
            "girl",
            "--interests",
            "space, dinosaurs",
            "--style",
            "magical",
            "--lesson",
            "sharing is caring",
            "--offline",
        ]));

        assert_eq!(config.age, Some(7));
        assert_eq!(config.gender, Some(Gender::Girl));
        assert_eq!(config.interests, vec![Interest::Space, Interest::Dinosaurs]);
        assert_eq!(config.style, Some(StoryStyle::Magical));
        assert_eq!(config.lesson, "sharing is caring");
        assert!(config.offline);
        assert_eq!(config.model, None);
    }

    #[test]
    fn test_unknown_interests_are_skipped() {
        let config = parse_config_from_args(&args(&["--interests", "space,zebras,music"]));
        assert_eq!(config.interests, vec![Interest::Space, Interest::Music]);
    }

    #[tokio::test]
    async fn test_missing_flags_are_reported_by_name() {
        let config = parse_config_from_args(&args(&["--offline", "--age", "7"]));
        let err = run_headless(config).await.expect_err("profile is incomplete");
        assert!(err.to_string().contains("--gender"));
    }

    #[tokio::test]
    async fn test_offline_run_succeeds_without_a_key() {
        let config = parse_config_from_args(&args(&[
            "--offline",
            "--age",
            "4",
            "--gender",
            "boy",
            "--interests",
            "pirates",
            "--style",
            "funny",
            "--lesson",
            "telling the truth",
        ]));
        run_headless(config).await.expect("offline run should succeed");
    }
}
