//! Color theme for the bedtime TUI.

use ratatui::style::{Color, Modifier, Style};

/// A cozy night-time palette shared by every screen.
#[derive(Debug, Clone)]
pub struct StoryTheme {
    pub heading: Color,
    pub prompt: Color,
    pub label: Color,
    pub value: Color,
    pub selected: Color,
    pub hint: Color,
    pub error: Color,
    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Default for StoryTheme {
    fn default() -> Self {
        Self {
            heading: Color::Magenta,
            prompt: Color::Yellow,
            label: Color::DarkGray,
            value: Color::White,
            selected: Color::Green,
            hint: Color::DarkGray,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
        }
    }
}

#[allow(dead_code)]
impl StoryTheme {
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn prompt_style(&self) -> Style {
        Style::default().fg(self.prompt)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.label)
    }

    pub fn value_style(&self) -> Style {
        Style::default().fg(self.value)
    }

    pub fn selected_style(&self) -> Style {
        Style::default().fg(self.selected)
    }

    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.border_focused)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn highlight_style(&self) -> Style {
        Style::default().bg(self.highlight_bg).fg(self.highlight_fg)
    }
}
