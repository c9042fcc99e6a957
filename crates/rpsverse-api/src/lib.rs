//! rpsverse API: HTTP surface over the game context's turn lifecycle.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
