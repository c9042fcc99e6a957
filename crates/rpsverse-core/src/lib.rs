//! rpsverse core: shared abstractions.
//!
//! This crate defines the ports the game context depends on: randomness,
//! time, the text-classification oracle, the display-name directory, and
//! snapshot persistence. It contains no infrastructure code.

pub mod classifier;
pub mod clock;
pub mod command;
pub mod directory;
pub mod error;
pub mod repository;
pub mod rng;
