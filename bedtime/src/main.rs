//! Bedtime Story Creator: a cozy terminal app that builds a child's
//! story profile step by step and turns it into a personalized bedtime
//! story, written by Claude or assembled from built-in templates.

mod app;
mod events;
mod headless;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use bedtime_core::credential::CredentialStore;
use bedtime_core::export;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--headless") {
        env_logger::init();
        let config = headless::parse_config_from_args(&args);
        headless::run_headless(config).await?;
        return Ok(());
    }

    init_tui_logging();

    // Stored key first, environment as a non-persisted fallback.
    let store = CredentialStore::open_default().ok();
    let stored_key = match &store {
        Some(store) => match store.load().await {
            Ok(key) => key,
            Err(err) => {
                log::warn!("could not read the stored API key: {err}");
                None
            }
        },
        None => None,
    };
    let initial_key = stored_key.or_else(|| {
        std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
    });
    let model_override = std::env::var("BEDTIME_MODEL").ok();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(store, initial_key, model_override);
    let result = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &mut app))?;

        // Finish any work the event handlers queued up.
        if let Some(key) = app.pending_key_save.take() {
            if let Some(store) = &app.store {
                match store.save(&key).await {
                    Ok(()) => log::info!("API key saved"),
                    Err(err) => app.set_status(format!("Could not save the API key: {err}")),
                }
            }
        }

        if let Some(text) = app.pending_copy.take() {
            match execute!(io::stdout(), Print(ui::osc52_sequence(&text))) {
                Ok(()) => app.set_status("Story copied to the clipboard"),
                Err(err) => app.set_status(format!("Copy failed: {err}")),
            }
        }

        if let Some(story) = app.pending_export.take() {
            match export::save_to_dir(&story, ".").await {
                Ok(path) => app.set_status(format!("Saved to {}", path.display())),
                Err(err) => app.set_status(format!("Save failed: {err}")),
            }
        }

        if std::mem::take(&mut app.pending_sign_out) {
            if let Some(store) = &app.store {
                if let Err(err) = store.clear().await {
                    log::warn!("could not remove the stored API key: {err}");
                }
            }
            app.sign_out();
        }

        app.poll(Instant::now());

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if handle_event(&mut app, ev, Instant::now()) == EventResult::Quit {
                return Ok(());
            }
        } else {
            app.tick();
        }
    }
}

/// Route logs to a file; stdout and stderr belong to the alternate screen.
fn init_tui_logging() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("bedtime").join("logs")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("bedtime.log")) else {
        return;
    };
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn print_help() {
    println!("Bedtime Story Creator - personalized bedtime stories in your terminal");
    println!();
    println!("USAGE:");
    println!("  bedtime [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help       Show this help message");
    println!("  --headless       Generate one story without the TUI and print it");
    println!();
    println!("HEADLESS OPTIONS:");
    println!("  --age <2-12>          Child's age (default: 5)");
    println!("  --gender <GENDER>     boy, girl, other, prefer-not-to-say");
    println!("  --interests <LIST>    Comma-separated interests (e.g. space,dinosaurs)");
    println!("  --style <STYLE>       funny, adventurous, magical, gentle, educational, mysterious");
    println!("  --lesson <TEXT>       The lesson the story should teach");
    println!("  --offline             Assemble the story locally instead of calling the API");
    println!("  --model <ID>          Override the model id (also: BEDTIME_MODEL)");
    println!();
    println!("INTERESTS:");
    println!("  animals, space, dinosaurs, princess, pirates, superheroes, nature,");
    println!("  sports, music, art, science, adventure, fantasy, friendship");
    println!();
    println!("ENVIRONMENT:");
    println!("  ANTHROPIC_API_KEY    API key used when none is stored");
    println!("  BEDTIME_MODEL        Model id override");
    println!("  RUST_LOG             Log filter; TUI logs go to a file under the data dir");
    println!();
    println!("EXAMPLES:");
    println!("  bedtime");
    println!("  bedtime --headless --age 7 --gender girl --interests space,dinosaurs \\");
    println!("      --style magical --lesson \"sharing is caring\"");
    println!("  bedtime --headless --offline --age 4 --gender boy --interests pirates \\");
    println!("      --style funny --lesson \"telling the truth\"");
}
