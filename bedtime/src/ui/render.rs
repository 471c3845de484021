//! Screen rendering for the bedtime TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use bedtime_core::profile::{Gender, Interest, Profile, StoryStyle, AGE_MAX, AGE_MIN};
use bedtime_core::wizard::Step;

use crate::app::{App, Screen};
use crate::ui::theme::StoryTheme;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const LESSON_PLACEHOLDER: &str =
    "e.g., Being kind to others, the importance of sharing, overcoming fears, believing in yourself...";

const READING_HINTS: &str =
    "↑/↓ scroll • n new story • b back • c copy • s save • o sign out • q quit";

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.screen {
        Screen::KeyEntry => render_key_entry(frame, app, area),
        Screen::Form => render_form(frame, app, area),
        Screen::Reading => render_reading(frame, app, area),
    }
    if app.wizard.generating() {
        render_generating_overlay(frame, app, area);
    }
}

// ==== API key screen ====

fn render_key_entry(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_fixed(62, 12, area);
    let block = Block::default()
        .title(" Bedtime Story Creator ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let prompt =
        Paragraph::new("Stories are written by Claude. Paste your Anthropic API key to begin.")
            .style(app.theme.prompt_style())
            .wrap(Wrap { trim: true });
    frame.render_widget(prompt, chunks[0]);

    // Never echo the key itself.
    let masked: String = "•".repeat(app.key_input.chars().count());
    let input = Paragraph::new(format!("{masked}█"))
        .block(Block::default().borders(Borders::ALL).title(" API Key "));
    frame.render_widget(input, chunks[1]);

    if let Some(error) = &app.key_error {
        let error = Paragraph::new(error.as_str()).style(app.theme.error_style());
        frame.render_widget(error, chunks[2]);
    }

    let help = Paragraph::new("Enter continue • Tab use built-in stories • Esc quit")
        .style(app.theme.hint_style());
    frame.render_widget(help, chunks[3]);
}

// ==== Profile form ====

fn render_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_form_header(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    let step = app.wizard.step();
    let block = Block::default()
        .title(format!(" {} ", step.title()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    match step {
        Step::Age => render_age_step(frame, app, inner),
        Step::Gender => render_gender_step(frame, app, inner),
        Step::Interests => render_interests_step(frame, app, inner),
        Step::Style => render_style_step(frame, app, inner),
        Step::Lesson => render_lesson_step(frame, app, inner),
    }

    render_profile_preview(frame, app, columns[1]);
    render_status(frame, app, chunks[2]);
    render_hints(frame, app, step_hints(step), chunks[3]);
}

fn render_form_header(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.wizard.step().number();
    let dots = Step::all()
        .iter()
        .map(|s| if s.number() <= current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ");

    let lines = vec![
        Line::from(Span::styled(
            "Bedtime Story Creator",
            app.theme.heading_style(),
        )),
        Line::from(vec![
            Span::styled(dots, app.theme.selected_style()),
            Span::styled(
                format!("  Step {current} of {}", Step::all().len()),
                app.theme.label_style(),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_age_step(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let subtitle = Paragraph::new(Step::Age.subtitle())
        .style(app.theme.prompt_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(subtitle, chunks[0]);

    let age = app.wizard.profile().age;
    let age_line = Line::from(vec![
        Span::styled(format!(" {age} "), app.theme.heading_style()),
        Span::styled("years old", app.theme.value_style()),
    ]);
    let age_box =
        Paragraph::new(age_line).block(Block::default().borders(Borders::ALL).title(" Age "));
    frame.render_widget(age_box, chunks[1]);

    let range = Paragraph::new(format!("between {AGE_MIN} and {AGE_MAX}"))
        .style(app.theme.hint_style());
    frame.render_widget(range, chunks[2]);
}

fn render_gender_step(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let subtitle = Paragraph::new(Step::Gender.subtitle())
        .style(app.theme.prompt_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(subtitle, chunks[0]);

    let picked = app.wizard.profile().gender;
    let items: Vec<ListItem> = Gender::all()
        .iter()
        .map(|g| {
            let marker = if picked == Some(*g) { "(•)" } else { "( )" };
            let style = if picked == Some(*g) {
                app.theme.selected_style()
            } else {
                app.theme.value_style()
            };
            ListItem::new(format!("{marker} {}", g.label())).style(style)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(app.theme.highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], &mut app.list_state);
}

fn render_interests_step(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let chosen = app.wizard.profile().interests.clone();
    let header = vec![
        Line::from(Span::styled(
            Step::Interests.subtitle(),
            app.theme.prompt_style(),
        )),
        Line::from(Span::styled(
            format!("{} selected", chosen.len()),
            app.theme.label_style(),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let items: Vec<ListItem> = Interest::all()
        .iter()
        .map(|interest| {
            let picked = chosen.contains(interest);
            let marker = if picked { "[X]" } else { "[ ]" };
            let style = if picked {
                app.theme.selected_style()
            } else {
                app.theme.value_style()
            };
            ListItem::new(format!("{marker} {}", interest.name())).style(style)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(app.theme.highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], &mut app.list_state);
}

fn render_style_step(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let subtitle = Paragraph::new(Step::Style.subtitle())
        .style(app.theme.prompt_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(subtitle, chunks[0]);

    let picked = app.wizard.profile().style;
    let items: Vec<ListItem> = StoryStyle::all()
        .iter()
        .map(|s| {
            let marker = if picked == Some(*s) { "(•)" } else { "( )" };
            let style = if picked == Some(*s) {
                app.theme.selected_style()
            } else {
                app.theme.value_style()
            };
            ListItem::new(format!("{marker} {}", s.label())).style(style)
        })
        .collect();

    let list = List::new(items)
        .highlight_style(app.theme.highlight_style())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, chunks[1], &mut app.list_state);
}

fn render_lesson_step(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let subtitle = Paragraph::new(Step::Lesson.subtitle())
        .style(app.theme.prompt_style())
        .wrap(Wrap { trim: true });
    frame.render_widget(subtitle, chunks[0]);

    let lesson = &app.wizard.profile().lesson;
    let input = if lesson.is_empty() {
        Paragraph::new(LESSON_PLACEHOLDER).style(app.theme.hint_style())
    } else {
        Paragraph::new(format!("{lesson}█"))
    };
    let input = input
        .block(Block::default().borders(Borders::ALL).title(" Lesson "))
        .wrap(Wrap { trim: true });
    frame.render_widget(input, chunks[1]);
}

fn render_profile_preview(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Story Profile ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = profile_lines(&app.theme, app.wizard.profile());
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// ==== Reading screen ====

fn render_reading(frame: &mut Frame, app: &App, area: Rect) {
    let Some(story) = &app.story else { return };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!("✨ {} ✨", story.title),
        app.theme.heading_style(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    let mut lines = Vec::new();
    for paragraph in story.paragraphs() {
        lines.push(Line::from(paragraph));
        lines.push(Line::from(""));
    }
    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Story ")
                .borders(Borders::ALL)
                .border_style(app.theme.border_style(true)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.story_scroll, 0));
    frame.render_widget(body, columns[0]);

    render_story_sidebar(frame, app, columns[1]);
    render_status(frame, app, chunks[2]);
    render_hints(frame, app, READING_HINTS, chunks[3]);
}

fn render_story_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" About this story ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(profile) = &app.story_profile else {
        return;
    };
    let lines = profile_lines(&app.theme, profile);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// ==== Shared pieces ====

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = app.status_message() {
        let status = Paragraph::new(message).style(app.theme.prompt_style());
        frame.render_widget(status, area);
    }
}

fn render_hints(frame: &mut Frame, app: &App, text: &str, area: Rect) {
    frame.render_widget(Paragraph::new(text).style(app.theme.hint_style()), area);
}

fn render_generating_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect_fixed(36, 5, area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let spinner = SPINNER_FRAMES[app.spinner_frame as usize % SPINNER_FRAMES.len()];
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{spinner} "), app.theme.selected_style()),
            Span::styled("Writing your story…", app.theme.value_style()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn profile_lines(theme: &StoryTheme, profile: &Profile) -> Vec<Line<'static>> {
    vec![
        profile_line(theme, "Age", format!("{} years old", profile.age)),
        profile_line(
            theme,
            "Gender",
            profile
                .gender
                .map(|g| g.label().to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
        ),
        profile_line(
            theme,
            "Interests",
            if profile.interests.is_empty() {
                "(not set)".to_string()
            } else {
                profile.interests_joined()
            },
        ),
        profile_line(
            theme,
            "Style",
            profile
                .style
                .map(|s| s.label().to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
        ),
        profile_line(
            theme,
            "Lesson",
            if profile.lesson.trim().is_empty() {
                "(not set)".to_string()
            } else {
                profile.lesson.clone()
            },
        ),
    ]
}

fn profile_line(theme: &StoryTheme, label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), theme.label_style()),
        Span::styled(value, theme.value_style()),
    ])
}

/// A fixed-size rectangle centered in `area`, clamped to fit.
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn step_hints(step: Step) -> &'static str {
    match step {
        Step::Age => "↑/↓ adjust • 2-9 type an age • Enter continue • Esc quit",
        Step::Gender => "↑/↓ choose • Enter continue • Esc back",
        Step::Interests => "↑/↓ move • Space toggle • Enter continue • Esc back",
        Step::Style => "↑/↓ choose • Enter continue • Esc back",
        Step::Lesson => "Type the lesson • Enter create the story • Esc back",
    }
}
