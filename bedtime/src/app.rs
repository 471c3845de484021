//! Application state for the bedtime TUI.

use std::sync::Arc;
use std::time::Instant;

use ratatui::widgets::ListState;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use bedtime_core::assembler::assemble;
use bedtime_core::credential::{validate_key, CredentialStore};
use bedtime_core::export;
use bedtime_core::profile::{Gender, Profile, Story, StoryStyle};
use bedtime_core::storyteller::{GenerationError, Storyteller, StorytellerConfig};
use bedtime_core::wizard::{first_unmet_step, Step, Wizard};

use crate::ui::theme::StoryTheme;

/// Which screen the app is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// First-run API key entry.
    KeyEntry,
    /// The five-step profile form.
    Form,
    /// A finished story, ready to read.
    Reading,
}

/// Top-level application state.
pub struct App {
    pub screen: Screen,
    pub theme: StoryTheme,

    // Credentials
    pub store: Option<CredentialStore>,
    pub storyteller: Option<Arc<Storyteller>>,
    model_override: Option<String>,
    pub key_input: String,
    key_cursor: usize,
    pub key_error: Option<String>,

    // Profile form
    pub wizard: Wizard,
    pub list_state: ListState,
    lesson_cursor: usize,

    // In-flight generation
    pending_story: Option<oneshot::Receiver<Result<Story, GenerationError>>>,
    pub spinner_frame: u8,

    // Finished story
    pub story: Option<Story>,
    pub story_profile: Option<Profile>,
    pub story_scroll: u16,

    // Work queued for the async side of the event loop
    pub pending_key_save: Option<String>,
    pub pending_copy: Option<String>,
    pub pending_export: Option<Story>,
    pub pending_sign_out: bool,

    status_message: Option<String>,
}

impl App {
    pub fn new(
        store: Option<CredentialStore>,
        initial_key: Option<String>,
        model_override: Option<String>,
    ) -> Self {
        let storyteller = initial_key
            .map(|key| Arc::new(build_storyteller(&key, model_override.as_deref())));
        let screen = if storyteller.is_some() {
            Screen::Form
        } else {
            Screen::KeyEntry
        };

        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            screen,
            theme: StoryTheme::default(),
            store,
            storyteller,
            model_override,
            key_input: String::new(),
            key_cursor: 0,
            key_error: None,
            wizard: Wizard::new(),
            list_state,
            lesson_cursor: 0,
            pending_story: None,
            spinner_frame: 0,
            story: None,
            story_profile: None,
            story_scroll: 0,
            pending_key_save: None,
            pending_copy: None,
            pending_export: None,
            pending_sign_out: false,
            status_message: None,
        }
    }

    // ==== Status line ====

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // ==== API key screen ====

    pub fn key_char(&mut self, c: char) {
        let byte_pos = self
            .key_input
            .char_indices()
            .nth(self.key_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.key_input.len());
        self.key_input.insert(byte_pos, c);
        self.key_cursor += 1;
    }

    pub fn key_backspace(&mut self) {
        if self.key_cursor == 0 {
            return;
        }
        self.key_cursor -= 1;
        if let Some((byte_pos, ch)) = self.key_input.char_indices().nth(self.key_cursor) {
            self.key_input
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn key_delete(&mut self) {
        if let Some((byte_pos, ch)) = self.key_input.char_indices().nth(self.key_cursor) {
            self.key_input
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    pub fn key_cursor_left(&mut self) {
        self.key_cursor = self.key_cursor.saturating_sub(1);
    }

    pub fn key_cursor_right(&mut self) {
        let len = self.key_input.chars().count();
        self.key_cursor = (self.key_cursor + 1).min(len);
    }

    pub fn key_cursor_home(&mut self) {
        self.key_cursor = 0;
    }

    pub fn key_cursor_end(&mut self) {
        self.key_cursor = self.key_input.chars().count();
    }

    /// Validate the typed key. On success the key is queued for saving,
    /// the storyteller is built, and the form comes up.
    pub fn submit_key(&mut self) {
        match validate_key(&self.key_input) {
            Ok(key) => {
                self.storyteller = Some(Arc::new(build_storyteller(
                    &key,
                    self.model_override.as_deref(),
                )));
                self.pending_key_save = Some(key);
                self.key_input.clear();
                self.key_cursor = 0;
                self.key_error = None;
                self.screen = Screen::Form;
            }
            Err(err) => self.key_error = Some(err.to_string()),
        }
    }

    /// Skip the key entirely and use the built-in story templates.
    pub fn continue_offline(&mut self) {
        self.storyteller = None;
        self.key_error = None;
        self.screen = Screen::Form;
        self.set_status("Using the built-in storyteller; stories are assembled offline");
    }

    /// Forget the stored key and start over at the key screen. The
    /// event loop removes the file itself via `pending_sign_out`.
    pub fn sign_out(&mut self) {
        self.storyteller = None;
        self.key_input.clear();
        self.key_cursor = 0;
        self.key_error = None;
        self.restart_wizard();
        self.screen = Screen::KeyEntry;
    }

    // ==== Lesson input ====

    pub fn lesson_cursor(&self) -> usize {
        self.lesson_cursor
    }

    pub fn lesson_char(&mut self, c: char, now: Instant) {
        let mut lesson = self.wizard.profile().lesson.clone();
        let byte_pos = lesson
            .char_indices()
            .nth(self.lesson_cursor)
            .map(|(i, _)| i)
            .unwrap_or(lesson.len());
        lesson.insert(byte_pos, c);
        self.wizard.set_lesson(lesson, now);
        self.lesson_cursor += 1;
    }

    pub fn lesson_backspace(&mut self, now: Instant) {
        if self.lesson_cursor == 0 {
            return;
        }
        let mut lesson = self.wizard.profile().lesson.clone();
        self.lesson_cursor -= 1;
        if let Some((byte_pos, ch)) = lesson.char_indices().nth(self.lesson_cursor) {
            lesson.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            self.wizard.set_lesson(lesson, now);
        }
    }

    pub fn lesson_delete(&mut self, now: Instant) {
        let mut lesson = self.wizard.profile().lesson.clone();
        if let Some((byte_pos, ch)) = lesson.char_indices().nth(self.lesson_cursor) {
            lesson.replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            self.wizard.set_lesson(lesson, now);
        }
    }

    pub fn lesson_cursor_left(&mut self) {
        self.lesson_cursor = self.lesson_cursor.saturating_sub(1);
    }

    pub fn lesson_cursor_right(&mut self) {
        let len = self.wizard.profile().lesson.chars().count();
        self.lesson_cursor = (self.lesson_cursor + 1).min(len);
    }

    pub fn lesson_cursor_home(&mut self) {
        self.lesson_cursor = 0;
    }

    pub fn lesson_cursor_end(&mut self) {
        self.lesson_cursor = self.wizard.profile().lesson.chars().count();
    }

    // ==== List highlight ====

    /// Point the list highlight at the profile's current value for the
    /// step we just landed on.
    pub fn sync_list_state(&mut self) {
        let profile = self.wizard.profile();
        let index = match self.wizard.step() {
            Step::Gender => profile
                .gender
                .and_then(|g| Gender::all().iter().position(|x| *x == g)),
            Step::Style => profile
                .style
                .and_then(|s| StoryStyle::all().iter().position(|x| *x == s)),
            _ => None,
        };
        self.list_state.select(Some(index.unwrap_or(0)));
    }

    // ==== Generation ====

    /// Submit the form. With a storyteller the request runs on a spawned
    /// task and the result arrives through `poll`; offline the story is
    /// assembled on the spot.
    pub fn start_generation(&mut self) {
        let Some(profile) = self.wizard.submit() else {
            if let Some(step) = first_unmet_step(self.wizard.profile()) {
                let hint = validation_hint(step);
                self.set_status(hint);
            }
            return;
        };
        self.story_profile = Some(profile.clone());

        match &self.storyteller {
            Some(storyteller) => {
                log::info!("requesting a story for a {}-year-old", profile.age);
                let storyteller = Arc::clone(storyteller);
                let (tx, rx) = oneshot::channel();
                tokio::spawn(async move {
                    let result = storyteller.generate(&profile).await;
                    let _ = tx.send(result);
                });
                self.pending_story = Some(rx);
            }
            None => {
                log::info!("assembling a story offline");
                let story = assemble(&profile);
                self.finish_generation(Ok(story));
            }
        }
    }

    pub fn finish_generation(&mut self, result: Result<Story, GenerationError>) {
        self.wizard.generation_finished();
        match result {
            Ok(story) => {
                log::debug!("story ready: {:?}", story.title);
                self.story = Some(story);
                self.story_scroll = 0;
                self.screen = Screen::Reading;
                self.clear_status();
            }
            Err(err) => {
                log::warn!("story generation failed: {err}");
                self.set_status(err.to_string());
            }
        }
    }

    /// Advance time-driven state: the auto-advance timer and any
    /// in-flight generation task.
    pub fn poll(&mut self, now: Instant) {
        if self.wizard.poll_auto_advance(now) {
            self.sync_list_state();
        }

        if let Some(rx) = &mut self.pending_story {
            match rx.try_recv() {
                Ok(result) => {
                    self.pending_story = None;
                    self.finish_generation(result);
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Closed) => {
                    self.pending_story = None;
                    self.finish_generation(Err(GenerationError::Network(
                        "the story task stopped unexpectedly".to_string(),
                    )));
                }
            }
        }
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    // ==== Reading screen ====

    pub fn restart_wizard(&mut self) {
        self.wizard = Wizard::new();
        self.lesson_cursor = 0;
        self.story = None;
        self.story_profile = None;
        self.story_scroll = 0;
        self.list_state.select(Some(0));
        self.screen = Screen::Form;
    }

    pub fn request_copy(&mut self) {
        if let Some(story) = &self.story {
            self.pending_copy = Some(export::file_contents(story));
        }
    }

    pub fn request_save(&mut self) {
        self.pending_export = self.story.clone();
    }

    pub fn request_sign_out(&mut self) {
        self.pending_sign_out = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.story_scroll = self.story_scroll.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.estimate_max_scroll();
        self.story_scroll = self.story_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_to_top(&mut self) {
        self.story_scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.story_scroll = self.estimate_max_scroll();
    }

    /// Rough upper bound on scrolling so the view cannot run far past
    /// the end of the story.
    fn estimate_max_scroll(&self) -> u16 {
        const ESTIMATED_WIDTH: usize = 70;
        const ESTIMATED_VISIBLE_HEIGHT: usize = 15;

        let Some(story) = &self.story else { return 0 };
        let lines: usize = story
            .paragraphs()
            .map(|p| p.len().div_ceil(ESTIMATED_WIDTH) + 1)
            .sum();
        lines.saturating_sub(ESTIMATED_VISIBLE_HEIGHT) as u16
    }
}

fn build_storyteller(key: &str, model: Option<&str>) -> Storyteller {
    let mut config = StorytellerConfig::default();
    if let Some(model) = model {
        config = config.with_model(model);
    }
    Storyteller::new(key).with_config(config)
}

/// Inline message shown when the current step refuses to advance.
pub(crate) fn validation_hint(step: Step) -> &'static str {
    match step {
        Step::Age => "Age must be between 2 and 12",
        Step::Gender => "Pick a gender to continue",
        Step::Interests => "Pick at least one interest",
        Step::Style => "Pick a story style to continue",
        Step::Lesson => "Write the lesson the story should teach",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bedtime_core::profile::{Gender, Interest, StoryStyle};
    use std::time::Instant;

    fn fill_wizard(app: &mut App, now: Instant) {
        app.wizard.set_age(6, now);
        app.wizard.advance();
        app.wizard.set_gender(Gender::Girl, now);
        app.wizard.advance();
        app.wizard.toggle_interest(Interest::Space, now);
        app.wizard.advance();
        app.wizard.set_style(StoryStyle::Magical, now);
        app.wizard.advance();
        app.wizard.set_lesson("sharing", now);
    }

    #[test]
    fn test_offline_submission_reads_immediately() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        assert_eq!(app.screen, Screen::Form);

        fill_wizard(&mut app, Instant::now());
        app.start_generation();

        assert_eq!(app.screen, Screen::Reading);
        assert!(!app.wizard.generating());
        let story = app.story.as_ref().expect("story should be ready");
        assert!(story.body.contains("sharing"));
    }

    #[test]
    fn test_incomplete_submission_shows_a_hint() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        app.start_generation();

        assert_eq!(app.screen, Screen::Form);
        assert!(app.story.is_none());
        assert_eq!(app.status_message(), Some("Pick a gender to continue"));
    }

    #[test]
    fn test_generation_failure_keeps_the_form() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        fill_wizard(&mut app, Instant::now());
        let profile = app.wizard.submit().expect("form should submit");
        app.story_profile = Some(profile);

        app.finish_generation(Err(GenerationError::Api {
            status: 401,
            message: "bad key".to_string(),
        }));

        assert_eq!(app.screen, Screen::Form);
        assert_eq!(app.status_message(), Some("bad key"));
        assert!(!app.wizard.generating());
        assert_eq!(app.wizard.profile().lesson, "sharing");
    }

    #[test]
    fn test_key_submission_validates_inline() {
        let mut app = App::new(None, None, None);
        assert_eq!(app.screen, Screen::KeyEntry);

        app.submit_key();
        assert_eq!(
            app.key_error.as_deref(),
            Some("Please enter your Claude API key")
        );

        for c in "not-a-key".chars() {
            app.key_char(c);
        }
        app.submit_key();
        assert_eq!(
            app.key_error.as_deref(),
            Some("Claude API keys should start with \"sk-ant-\"")
        );
        assert_eq!(app.screen, Screen::KeyEntry);

        app.key_input = "sk-ant-test123".to_string();
        app.submit_key();
        assert_eq!(app.screen, Screen::Form);
        assert!(app.storyteller.is_some());
        assert_eq!(app.pending_key_save.as_deref(), Some("sk-ant-test123"));
        assert!(app.key_input.is_empty());
    }

    #[test]
    fn test_sign_out_returns_to_key_entry() {
        let mut app = App::new(None, Some("sk-ant-abc".to_string()), None);
        assert_eq!(app.screen, Screen::Form);

        app.sign_out();

        assert_eq!(app.screen, Screen::KeyEntry);
        assert!(app.storyteller.is_none());
        assert!(app.story.is_none());
    }

    #[test]
    fn test_restart_clears_the_previous_story() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        fill_wizard(&mut app, Instant::now());
        app.start_generation();
        assert_eq!(app.screen, Screen::Reading);

        app.restart_wizard();

        assert_eq!(app.screen, Screen::Form);
        assert!(app.story.is_none());
        assert!(app.story_profile.is_none());
        assert_eq!(app.wizard.step(), Step::Age);
        assert!(app.wizard.profile().interests.is_empty());
    }
}
