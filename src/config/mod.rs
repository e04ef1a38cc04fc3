//! Configuration for vateller
//!
//! Settings come from an optional JSON file overlaid with `VATELLER_*`
//! environment variables.

pub mod settings;

pub use settings::Settings;
