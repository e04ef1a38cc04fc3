//! Terminal user interface
//!
//! A ratatui wizard: one screen per step, driven by a crossterm event loop.
//! All wizard state lives in the [`WizardStore`](crate::store::WizardStore)
//! owned by [`App`]; the views only read it and the handler only mutates it
//! through the store's action methods and the flow functions.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
