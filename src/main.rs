mod app;
mod domain;
mod export;
mod input;
mod notifications;
mod persistence;
mod reminders;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    backup_file, config_file, ensure_data_dir, get_data_dir, init_local_dir, load_or_recover,
    log_file, store_file, Recovery,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "focal")]
#[command(about = "A keyboard-driven terminal planner with tasks, notes, and a work/rest interval timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focal directory in the current directory
    Init,
    /// Rewrite a legacy store file into the current schema
    Migrate {
        /// Legacy input file. Defaults to tasks_old.json in the data directory.
        #[arg(short, long)]
        input: Option<String>,
        /// Output file. Defaults to the active store file.
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Export tasks and notes to CSV
    Export {
        /// Output file path. Defaults to planner_export.csv in the data directory.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_logging(false)?;
            let data_dir = init_local_dir()?;
            println!("Initialized focal directory: {}", data_dir.display());
            println!();
            println!("Focal will now use this local directory for storage.");
            println!("Run 'focal' to start planning.");
            Ok(())
        }
        Some(Commands::Migrate { input, output }) => {
            init_logging(false)?;
            let input = match input {
                Some(path) => PathBuf::from(path),
                None => ensure_data_dir()?.join("tasks_old.json"),
            };
            let output = match output {
                Some(path) => PathBuf::from(path),
                None => store_file()?,
            };
            let summary = persistence::migrate_legacy(&input, &output)?;
            println!(
                "Migrated {} tasks and {} notes into {}",
                summary.tasks,
                summary.notes,
                output.display()
            );
            Ok(())
        }
        Some(Commands::Export { output }) => {
            init_logging(false)?;
            let output = match output {
                Some(path) => PathBuf::from(path),
                None => ensure_data_dir()?.join("planner_export.csv"),
            };
            let (store, _) = load_or_recover(&store_file()?, &backup_file()?);
            let rows = export::export_csv(&store, &output)?;
            println!("Exported {} rows to {}", rows, output.display());
            Ok(())
        }
        None => run_tui(),
    }
}

/// Subcommands log to stderr; the TUI appends to focal.log so the alternate
/// screen stays clean
fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file()?)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_tui() -> Result<()> {
    ensure_data_dir()?;
    init_logging(true)?;

    let data_dir = get_data_dir()?;
    eprintln!("Using focal directory: {}", data_dir.display());

    let store_path = store_file()?;
    let backup_path = backup_file()?;
    let config_path = config_file()?;

    // Recovery ladder: primary, then backup, then a fresh snapshot
    let (store, recovery) = load_or_recover(&store_path, &backup_path);
    let config = persistence::load_config(&config_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        persistence::AppConfig::default()
    });

    let mut app = AppState::new(store, config, store_path, backup_path, config_path);
    match recovery {
        Recovery::Primary => {}
        Recovery::Backup => app.set_status("Primary store was corrupt, loaded the backup"),
        Recovery::Fresh => app.set_status("Store unreadable, starting with an empty planner"),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Save on exit
    if app.needs_save {
        app.save();
    }

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_timeout = ticker::poll_duration();
    let mut seconds = ticker::Ticker::seconds();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with a short timeout so ticks stay on schedule
        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Drive the engine and the reminder scanner, one second at a time.
        // A slow frame yields several steps; none are dropped.
        for _ in 0..seconds.due_steps() {
            app.on_tick();
        }

        // Autosave if needed
        if app.needs_save {
            app.save();
        }
    }
}
