use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use checkers::config::{AppConfig, LogConfig};
use checkers::game::Player;
use checkers::ui::App;

/// Play checkers against a friend in the terminal.
#[derive(Parser)]
#[command(name = "checkers", about = "Two-player checkers in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "checkers.toml")]
    config: PathBuf,

    /// Write logs to this file (overrides log.file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" (overrides log.level)
    #[arg(long)]
    log_level: Option<String>,

    /// Player who moves first: green or orange
    #[arg(long)]
    first_player: Option<Player>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(path) = cli.log_file {
        app_config.log.file = Some(path);
    }
    if let Some(level) = cli.log_level {
        app_config.log.level = level;
    }
    if let Some(player) = cli.first_player {
        app_config.rules.first_player = player;
    }
    app_config.validate().context("invalid configuration")?;

    init_logging(&app_config.log)?;
    tracing::info!(first_player = app_config.rules.first_player.name(), "starting checkers");

    run(App::new(app_config)).context("terminal UI failed")
}

/// Install a file-backed subscriber; without a file the UI owns the terminal
/// and logging stays off.
fn init_logging(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("parsing log level '{}'", config.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
