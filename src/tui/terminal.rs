//! Terminal setup and teardown
//!
//! Handles initializing and restoring the terminal state, including a panic
//! hook that restores the terminal on crash, plus the main event loop.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::Settings;
use crate::gateway::{ExternalGateway, InternalGateway};

use super::app::App;
use super::event::{Event, EventHandler};
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic info
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the wizard
pub fn run_tui(
    settings: Settings,
    internal: Box<dyn InternalGateway>,
    external: Box<dyn ExternalGateway>,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    // Startup authentication is queued as the first pending action so the
    // loading screen is on the terminal while the tokens are fetched
    let mut app = App::new(settings, internal, external);

    let events = EventHandler::default();

    loop {
        terminal.draw(|frame| {
            super::views::render(frame, &app);
        })?;

        // Chains block between frames; the frame above already shows the
        // working indicator because `pending` is still set while drawing
        if let Some(action) = app.pending.take() {
            app.run_pending(action);
            continue;
        }

        match events.next()? {
            Event::Key(key_event) => {
                handle_event(&mut app, Event::Key(key_event))?;
            }
            Event::Resize(_, _) => {
                // Terminal will redraw automatically
            }
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    restore_terminal()?;

    Ok(())
}
