mod api;
mod app;
mod cli;
mod command;
mod config;
mod logging;
mod runtime;
mod ui;
mod week;

use anyhow::{Context, Result};
use api::OmwClient;
use app::{App, UiOutputState};
use clap::Parser;
use cli::{Cli, Commands};
use config::OmwConfig;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

fn main() -> Result<()> {
    // Before the runtime spawns its workers.
    week::capture_local_offset();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?
        .block_on(run(Cli::parse()))
}

async fn run(cli: Cli) -> Result<()> {
    let (api_url, command) = cli.command_or_default();

    match command {
        Commands::ConfigPath => {
            let path = OmwConfig::config_path()?;
            if !path.exists() {
                OmwConfig::default().save()?;
                println!("Created default config at: {}", path.display());
            } else {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Exec { line } => {
            let (_, client) = setup(api_url)?;
            let state =
                runtime::interpret_once(&line.join(" "), week::local_today(), &client).await;
            print_outcome(&state);
            if state.is_error() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Run => {
            let (cfg, client) = setup(api_url)?;
            run_tui(&cfg, &client).await
        }
    }
}

fn setup(api_url: Option<String>) -> Result<(OmwConfig, OmwClient)> {
    let mut cfg = OmwConfig::load()?;
    if let Some(url) = api_url {
        cfg.api_url = url;
    }

    match logging::init(&cfg.log_level) {
        Ok(path) => {
            tracing::info!(log = %path.display(), api_url = %cfg.api_url, "omw-tui starting")
        }
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    let client = OmwClient::new(&cfg.api_url, cfg.request_timeout())?;
    Ok((cfg, client))
}

fn print_outcome(state: &UiOutputState) {
    if state.is_error() {
        eprintln!("{}", state.status_text);
        return;
    }
    if state.help_visible {
        for line in ui::help_text() {
            println!("{}", line);
        }
    }
    if state.report_visible {
        for line in ui::report_text(&state.report_payload).lines() {
            println!("{}", line);
        }
    }
}

async fn run_tui(cfg: &OmwConfig, client: &OmwClient) -> Result<()> {
    let mut app = App::new(cfg);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "event loop failed");
    }
    res
}
