//! Application services: the play detector and the turn command/query handlers.

pub mod command_handlers;
pub mod detector;
pub mod query_handlers;
