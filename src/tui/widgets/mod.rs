//! Reusable widgets

pub mod alert;
pub mod input;
