use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use env_logger::{Env, Target};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use connect_four_client::config::{AppConfig, OracleBackend};
use connect_four_client::oracle;
use connect_four_client::session::GameSession;
use connect_four_client::ui::App;

/// Play Connect Four in the terminal, optionally against a move oracle.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the oracle endpoint (implies the http backend)
    #[arg(long)]
    oracle_url: Option<String>,

    /// Override the search depth sent to the oracle
    #[arg(long)]
    depth: Option<u32>,

    /// Let the oracle play the automated color
    #[arg(long, conflicts_with = "no_engine")]
    engine: bool,

    /// Two humans at one keyboard
    #[arg(long)]
    no_engine: bool,

    /// Start from an encoded move history, e.g. "3344"
    #[arg(long)]
    moves: Option<String>,

    /// Where log output goes; the terminal belongs to the UI
    #[arg(long, default_value = "connect_four.log")]
    log_file: PathBuf,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(url) = cli.oracle_url {
        config.oracle.backend = OracleBackend::Http;
        config.oracle.url = url;
    }
    if let Some(depth) = cli.depth {
        config.oracle.depth = depth;
    }
    if cli.engine {
        config.players.automated = true;
    }
    if cli.no_engine {
        config.players.automated = false;
    }
    config.validate().context("invalid configuration")?;

    let oracle = oracle::from_config(&config.oracle).context("building move oracle")?;
    info!(
        "starting: oracle={} depth={} automated={} as {}",
        oracle.name(),
        config.oracle.depth,
        config.players.automated,
        config.players.automated_color.name()
    );

    let mut session = GameSession::from_config(&config, oracle);
    if let Some(moves) = &cli.moves {
        session
            .load_history(moves)
            .with_context(|| format!("loading moves {moves:?}"))?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, Duration::from_millis(config.ui.frame_ms));
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    info!("exiting");
    res.context("terminal UI failed")
}
