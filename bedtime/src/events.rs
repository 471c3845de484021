//! Input handling for the bedtime TUI.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use bedtime_core::profile::{Gender, Interest, StoryStyle, AGE_MAX, AGE_MIN};
use bedtime_core::wizard::Step;

use crate::app::{validation_hint, App, Screen};

/// What the event loop should do after an event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

pub fn handle_event(app: &mut App, event: Event, now: Instant) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key, now),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    // Status messages are transient; any keypress dismisses them.
    app.clear_status();

    // While the storyteller is writing, the form is locked.
    if app.wizard.generating() {
        return EventResult::Continue;
    }

    match app.screen {
        Screen::KeyEntry => handle_key_entry(app, key),
        Screen::Form => handle_form(app, key, now),
        Screen::Reading => handle_reading(app, key),
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    if app.screen != Screen::Reading {
        return EventResult::Continue;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(3),
        MouseEventKind::ScrollDown => app.scroll_down(3),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

// ==== API key screen ====

fn handle_key_entry(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => app.submit_key(),
        KeyCode::Tab => app.continue_offline(),
        KeyCode::Esc => return EventResult::Quit,
        KeyCode::Char(c) => app.key_char(c),
        KeyCode::Backspace => app.key_backspace(),
        KeyCode::Delete => app.key_delete(),
        KeyCode::Left => app.key_cursor_left(),
        KeyCode::Right => app.key_cursor_right(),
        KeyCode::Home => app.key_cursor_home(),
        KeyCode::End => app.key_cursor_end(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

// ==== Profile form ====

fn handle_form(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    // Esc walks back through the steps and quits from the first.
    if key.code == KeyCode::Esc {
        if app.wizard.step() == Step::Age {
            return EventResult::Quit;
        }
        app.wizard.retreat();
        app.sync_list_state();
        return EventResult::NeedsRedraw;
    }

    match app.wizard.step() {
        Step::Age => handle_age_step(app, key, now),
        Step::Gender | Step::Style => handle_selection_step(app, key, now),
        Step::Interests => handle_interests_step(app, key, now),
        Step::Lesson => handle_lesson_step(app, key, now),
    }
}

fn handle_age_step(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('+') => {
            let age = (app.wizard.profile().age + 1).min(AGE_MAX);
            app.wizard.set_age(age, now);
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('-') => {
            let age = app.wizard.profile().age.saturating_sub(1).max(AGE_MIN);
            app.wizard.set_age(age, now);
        }
        KeyCode::Char(c @ '2'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.wizard.set_age(digit as u8, now);
            }
        }
        KeyCode::Enter => advance_or_hint(app),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Gender and story style: moving the highlight selects, Enter confirms
/// right away, and a short pause auto-advances.
fn handle_selection_step(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    let max_items = match app.wizard.step() {
        Step::Gender => Gender::all().len(),
        Step::Style => StoryStyle::all().len(),
        _ => return EventResult::Continue,
    };
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let i = app.list_state.selected().unwrap_or(0);
            let i = if i == 0 { max_items - 1 } else { i - 1 };
            app.list_state.select(Some(i));
            apply_selection(app, i, now);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let i = (app.list_state.selected().unwrap_or(0) + 1) % max_items;
            app.list_state.select(Some(i));
            apply_selection(app, i, now);
        }
        KeyCode::Enter => {
            let i = app.list_state.selected().unwrap_or(0);
            apply_selection(app, i, now);
            advance_or_hint(app);
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn apply_selection(app: &mut App, index: usize, now: Instant) {
    match app.wizard.step() {
        Step::Gender => app.wizard.set_gender(Gender::all()[index], now),
        Step::Style => app.wizard.set_style(StoryStyle::all()[index], now),
        _ => {}
    }
}

fn handle_interests_step(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    let options = Interest::all();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let i = app.list_state.selected().unwrap_or(0);
            let i = if i == 0 { options.len() - 1 } else { i - 1 };
            app.list_state.select(Some(i));
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let i = (app.list_state.selected().unwrap_or(0) + 1) % options.len();
            app.list_state.select(Some(i));
        }
        KeyCode::Char(' ') => {
            if let Some(i) = app.list_state.selected() {
                app.wizard.toggle_interest(options[i], now);
            }
        }
        KeyCode::Enter => advance_or_hint(app),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_lesson_step(app: &mut App, key: KeyEvent, now: Instant) -> EventResult {
    match key.code {
        KeyCode::Enter => app.start_generation(),
        KeyCode::Char(c) => app.lesson_char(c, now),
        KeyCode::Backspace => app.lesson_backspace(now),
        KeyCode::Delete => app.lesson_delete(now),
        KeyCode::Left => app.lesson_cursor_left(),
        KeyCode::Right => app.lesson_cursor_right(),
        KeyCode::Home => app.lesson_cursor_home(),
        KeyCode::End => app.lesson_cursor_end(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn advance_or_hint(app: &mut App) {
    let before = app.wizard.step();
    app.wizard.advance();
    if app.wizard.step() == before {
        app.set_status(validation_hint(before));
    } else {
        app.sync_list_state();
    }
}

// ==== Reading screen ====

fn handle_reading(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return EventResult::Quit,
        KeyCode::Char('n') | KeyCode::Char('b') => app.restart_wizard(),
        KeyCode::Char('c') => app.request_copy(),
        KeyCode::Char('s') => app.request_save(),
        KeyCode::Char('o') => app.request_sign_out(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(1),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_to_bottom(),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_from_any_screen() {
        let mut app = App::new(None, None, None);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_event(&mut app, Event::Key(ctrl_c), Instant::now()),
            EventResult::Quit
        );
    }

    #[test]
    fn test_typing_a_digit_sets_the_age() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        let now = Instant::now();

        handle_event(&mut app, Event::Key(key(KeyCode::Char('7'))), now);
        assert_eq!(app.wizard.profile().age, 7);

        handle_event(&mut app, Event::Key(key(KeyCode::Up)), now);
        assert_eq!(app.wizard.profile().age, 8);
    }

    #[test]
    fn test_moving_the_gender_highlight_selects() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        let now = Instant::now();

        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        assert_eq!(app.wizard.step(), Step::Gender);

        handle_event(&mut app, Event::Key(key(KeyCode::Down)), now);
        assert_eq!(app.wizard.profile().gender, Some(Gender::all()[1]));
    }

    #[test]
    fn test_enter_on_an_empty_interest_list_hints() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        let now = Instant::now();

        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        assert_eq!(app.wizard.step(), Step::Interests);

        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        assert_eq!(app.wizard.step(), Step::Interests);
        assert_eq!(app.status_message(), Some("Pick at least one interest"));

        handle_event(&mut app, Event::Key(key(KeyCode::Char(' '))), now);
        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        assert_eq!(app.wizard.step(), Step::Style);
    }

    #[test]
    fn test_esc_walks_back_and_quits_from_the_first_step() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        let now = Instant::now();

        handle_event(&mut app, Event::Key(key(KeyCode::Enter)), now);
        assert_eq!(app.wizard.step(), Step::Gender);

        handle_event(&mut app, Event::Key(key(KeyCode::Esc)), now);
        assert_eq!(app.wizard.step(), Step::Age);

        assert_eq!(
            handle_event(&mut app, Event::Key(key(KeyCode::Esc)), now),
            EventResult::Quit
        );
    }

    #[test]
    fn test_j_and_k_are_text_on_the_lesson_step() {
        let mut app = App::new(None, None, None);
        app.continue_offline();
        let now = Instant::now();

        app.wizard.set_age(6, now);
        app.wizard.advance();
        app.wizard.set_gender(Gender::Girl, now);
        app.wizard.advance();
        app.wizard.toggle_interest(Interest::Space, now);
        app.wizard.advance();
        app.wizard.set_style(StoryStyle::Gentle, now);
        app.wizard.advance();
        assert_eq!(app.wizard.step(), Step::Lesson);

        handle_event(&mut app, Event::Key(key(KeyCode::Char('j'))), now);
        handle_event(&mut app, Event::Key(key(KeyCode::Char('o'))), now);
        handle_event(&mut app, Event::Key(key(KeyCode::Char('y'))), now);
        assert_eq!(app.wizard.profile().lesson, "joy");
    }
}
