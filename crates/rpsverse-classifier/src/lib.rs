//! Zero-shot classifier adapters.
//!
//! `HttpPlayClassifier` talks to a hosted classification endpoint;
//! `DisconnectedClassifier` stands in when no endpoint is configured or
//! the client could not be built, so detection degrades instead of failing.

pub mod disconnected;
pub mod http_classifier;
pub mod wire;

pub use disconnected::DisconnectedClassifier;
pub use http_classifier::HttpPlayClassifier;
