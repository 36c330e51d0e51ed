use crate::api::OmwClient;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &OmwClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, client, &action_tx);
        }

        if !app.running {
            break;
        }
    }

    if app.is_busy() {
        tracing::info!(in_flight = app.in_flight, "exiting with unsettled requests");
    }

    Ok(())
}
