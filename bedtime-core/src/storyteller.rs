//! AI storyteller: remote story generation through the Claude API.
//!
//! One prompt, one completion, no retries. The reply is split into a title
//! line and body lines by a deliberately simple heuristic.

use claude::{Claude, Message, Request};
use thiserror::Error;

use crate::profile::{Profile, Story};

/// Errors from remote generation. Every variant's `Display` is safe to show
/// to the user as-is.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The server rejected the request; the message is the server's own
    /// `error.message` when it sent one.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not read the storyteller's reply: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Config(String),
}

impl From<claude::Error> for GenerationError {
    fn from(err: claude::Error) -> Self {
        match err {
            claude::Error::Api { status, message } => GenerationError::Api { status, message },
            claude::Error::Network(message) => GenerationError::Network(message),
            claude::Error::Parse(message) => GenerationError::MalformedResponse(message),
            claude::Error::NoApiKey => GenerationError::Config("API key is required".to_string()),
            claude::Error::Config(message) => GenerationError::Config(message),
        }
    }
}

/// Configuration for the storyteller.
#[derive(Debug, Clone)]
pub struct StorytellerConfig {
    /// Model override; `None` uses the client default.
    pub model: Option<String>,

    /// Maximum tokens for the story.
    pub max_tokens: usize,
}

impl Default for StorytellerConfig {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: 2000,
        }
    }
}

impl StorytellerConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// The remote storyteller.
pub struct Storyteller {
    client: Claude,
    config: StorytellerConfig,
}

impl Storyteller {
    /// Create a storyteller with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Claude::new(api_key),
            config: StorytellerConfig::default(),
        }
    }

    /// Create a storyteller from the ANTHROPIC_API_KEY environment variable.
    pub fn from_env() -> Result<Self, GenerationError> {
        let client = Claude::from_env()?;
        Ok(Self {
            client,
            config: StorytellerConfig::default(),
        })
    }

    /// Configure the storyteller.
    pub fn with_config(mut self, config: StorytellerConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a story for the profile.
    pub async fn generate(&self, profile: &Profile) -> Result<Story, GenerationError> {
        let prompt = build_prompt(profile);
        log::debug!("requesting story for a {}-year-old", profile.age);

        let mut request =
            Request::new(vec![Message::user(prompt)]).with_max_tokens(self.config.max_tokens);
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }

        let response = self.client.complete(request).await?;
        let story = parse_story(&response.text())?;
        log::debug!("storyteller delivered {:?}", story.title);
        Ok(story)
    }
}

/// Word-count guidance for the prompt, shorter for younger listeners.
fn length_guidance(age: u8) -> &'static str {
    match age {
        0..=4 => "about 300-400 words",
        5..=7 => "about 400-500 words",
        _ => "up to 800 words",
    }
}

/// Build the generation prompt from the profile.
fn build_prompt(profile: &Profile) -> String {
    let age = profile.age;
    let gender = profile.gender.map(|g| g.name()).unwrap_or("not specified");
    let interests = profile.interests_joined();
    let style = profile.style.map(|s| s.name()).unwrap_or("gentle");
    let lesson = &profile.lesson;

    let mut prompt = String::new();
    prompt.push_str("Create a personalized bedtime story with the following specifications:\n\n");
    prompt.push_str("**Child Details:**\n");
    prompt.push_str(&format!("- Age: {age} years old\n"));
    prompt.push_str(&format!("- Gender: {gender}\n"));
    prompt.push_str(&format!("- Interests: {interests}\n"));
    prompt.push_str(&format!("- Story Style: {style}\n"));
    prompt.push_str(&format!("- Lesson to Teach: {lesson}\n\n"));
    prompt.push_str("**Requirements:**\n");
    prompt.push_str("1. Create an engaging title that captures the magic of the story\n");
    prompt.push_str(&format!(
        "2. Write a story that is age-appropriate for a {age}-year-old\n"
    ));
    prompt.push_str(&format!(
        "3. Incorporate their interests ({interests}) naturally into the plot\n"
    ));
    prompt.push_str(&format!("4. Use a {style} tone throughout the story\n"));
    prompt.push_str(&format!(
        "5. Weave in the lesson about \"{lesson}\" in a natural, non-preachy way\n"
    ));
    prompt.push_str(
        "6. Make it perfect for bedtime - calming, positive, and ending on a peaceful note\n",
    );
    prompt.push_str(&format!(
        "7. Keep the length right for the age: {}\n\n",
        length_guidance(age)
    ));
    prompt.push_str("**Format:**\n");
    prompt.push_str(
        "Reply with the story title on the first line, then the story body on the \
         following lines, written in paragraphs with proper spacing.\n\n",
    );
    prompt.push_str(
        "Make the story magical, engaging, and memorable while being gentle enough for \
         bedtime. Focus on creating vivid imagery that sparks imagination without being \
         overstimulating before sleep.",
    );
    prompt
}

/// Split a raw reply into title and body.
///
/// First non-empty line is the title, minus a leading "Title:" label or "#"
/// heading marker. Remaining lines lose a leading "Story:"/"Content:" label
/// and empty leftovers. Known limitation: a story whose text legitimately
/// opens with "Story:" loses that label too.
fn parse_story(text: &str) -> Result<Story, GenerationError> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    let first = lines.next().ok_or_else(|| {
        GenerationError::MalformedResponse("the reply contained no text".to_string())
    })?;
    let title = strip_title_label(first);

    let body = lines
        .filter_map(strip_story_label)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Story { title, body })
}

fn strip_title_label(line: &str) -> String {
    if let Some(rest) = line.strip_prefix("Title:") {
        rest.trim().to_string()
    } else {
        line.trim_start_matches('#').trim().to_string()
    }
}

fn strip_story_label(line: &str) -> Option<&str> {
    let rest = strip_label_ci(line, "Story:")
        .or_else(|| strip_label_ci(line, "Content:"))
        .unwrap_or(line)
        .trim();
    (!rest.is_empty()).then_some(rest)
}

fn strip_label_ci<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    match line.get(..label.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(label) => Some(&line[label.len()..]),
        _ => None,
    }
}
