//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rpsverse_core::classifier::PlayClassifier;
use rpsverse_core::clock::Clock;
use rpsverse_core::repository::SnapshotRepository;
use rpsverse_core::rng::DeterministicRng;
use rpsverse_snapshot_store::InMemorySnapshotRepository;
use rpsverse_test_support::{FixedClock, ScriptedClassifier, SequenceRng};
use tower::ServiceExt;

use rpsverse_api::routes;
use rpsverse_api::state::AppState;

/// Shared collaborators for one test; each request gets a fresh router over
/// the same store, classifier and RNG.
pub struct TestApp {
    pub repository: Arc<InMemorySnapshotRepository>,
    state: AppState,
}

impl TestApp {
    /// An app whose classifier always ranks `labels` and whose opposing
    /// party draws `draws` in order.
    pub fn new(labels: &[&str], draws: Vec<u32>) -> Self {
        Self::with_classifier(Arc::new(ScriptedClassifier::ranking(labels)), draws)
    }

    pub fn with_classifier(classifier: Arc<dyn PlayClassifier>, draws: Vec<u32>) -> Self {
        let clock: Arc<dyn Clock + Send + Sync> = Arc::new(FixedClock::standard());
        let rng: Arc<Mutex<dyn DeterministicRng + Send>> =
            Arc::new(Mutex::new(SequenceRng::new(draws)));
        let repository = Arc::new(InMemorySnapshotRepository::new());
        let snapshot_repository: Arc<dyn SnapshotRepository> = repository.clone();
        let state = AppState::new(clock, rng, snapshot_repository, classifier);
        Self { repository, state }
    }

    /// The full app router, as `main.rs` builds it minus the HTTP layers.
    pub fn router(&self) -> Router {
        routes::app(self.state.clone())
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        send(self.router(), "POST", uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        send(self.router(), "PUT", uri, Some(body)).await
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        send(self.router(), "GET", uri, None).await
    }
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
