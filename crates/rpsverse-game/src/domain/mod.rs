//! Domain model for the game context.

pub mod commands;
pub mod outcome;
pub mod placeholders;
pub mod play;
pub mod rewriter;
pub mod scoreboard;
pub mod state;
