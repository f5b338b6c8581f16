pub mod api_client;
pub mod commands;
pub mod config;
pub mod error;
pub mod location;
pub mod logging;
pub mod services;
pub mod state;
pub mod tui;

#[cfg(test)]
mod testing;

pub use error::{Result, ScoutError};
