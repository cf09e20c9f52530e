use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_n::config::AppConfig;
use connect_n::game::GameSession;
use connect_n::ui::App;

/// Play Connect N in the terminal.
#[derive(Parser)]
#[command(name = "connect_n", about = "Connect N: line up markers before anyone else")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_n.toml")]
    config: PathBuf,

    /// Override grid width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Override grid height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Override how many markers in a row win
    #[arg(long)]
    run_length: Option<usize>,

    /// Override the players: one marker character per player, in turn order
    #[arg(long)]
    players: Option<String>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        app_config.game.width = width;
    }
    if let Some(height) = cli.height {
        app_config.game.height = height;
    }
    if let Some(run_length) = cli.run_length {
        app_config.game.run_length = run_length;
    }
    if let Some(markers) = &cli.players {
        app_config.game.set_markers(markers);
    }
    app_config
        .validate()
        .context("invalid settings after command line overrides")?;

    let session = GameSession::from_config(&app_config.game).context("creating game")?;
    info!(
        width = app_config.game.width,
        height = app_config.game.height,
        run_length = app_config.game.run_length,
        players = app_config.game.players.len(),
        "starting game"
    );

    run(App::new(session))?;
    println!("Thanks for playing!");
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
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
