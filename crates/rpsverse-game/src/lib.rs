//! The rock-paper-scissors game context.
//!
//! Responsible for detecting a play in a user's chat message, drawing the
//! opposing play, keeping the running record, steering the narrative with
//! stage directions, and stripping leaked internal notes from generated
//! replies.

pub mod application;
pub mod domain;
