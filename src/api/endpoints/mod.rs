//! API endpoint handlers.

pub mod clean_text;
pub mod health;
