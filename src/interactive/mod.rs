//! Interactive terminal dashboard
//!
//! Shows the 7-day activity card next to the event timeline and a skills
//! overview, with keyboard navigation and event deletion.

pub mod activity_panel;
pub mod app;
pub mod events;
pub mod messages;
pub mod timeline_view;
pub mod ui;
pub mod utils;

pub use app::App;
pub use events::EventHandler;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::activity::DayLabeler;
use crate::api::ApiClient;
use crate::config::Config;

/// Run the dashboard against an already configured backend client
pub async fn run_dashboard(client: ApiClient, config: &Config) -> Result<()> {
    let labeler = DayLabeler::from_config(config.locale.as_deref());
    tracing::info!(api_url = %client.base_url(), locale = ?labeler.locale(), "starting dashboard");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, labeler, config.chart).await;
    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = %err, "dashboard exited with an error");
    }
    res
}

/// Main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let event_handler = EventHandler::new();

    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app))?;

        if let Some(event) = event_handler.next()? {
            if !app.handle_event(event).await? {
                break;
            }
        }
    }

    Ok(())
}
