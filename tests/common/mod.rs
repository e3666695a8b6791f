#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use linkshortener::application::services::ShortenOptions;
use linkshortener::domain::entities::{Link, NewLink};
use linkshortener::domain::repositories::LinkRepository;
use linkshortener::domain::{LinkObserver, NoopObserver};
use linkshortener::error::AppError;
use linkshortener::infrastructure::persistence::InMemoryLinkRepository;
use linkshortener::state::AppState;
use linkshortener::utils::code_generator::{CodeGenerator, HexCodeGenerator};

pub const TEST_BASE_URL: &str = "https://s.example.com";

/// Hands out a fixed list of codes, then fails.
pub struct SequenceGenerator {
    codes: Mutex<VecDeque<String>>,
}

impl SequenceGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
        }
    }
}

impl CodeGenerator for SequenceGenerator {
    fn generate(&self, _length: usize) -> Result<String, AppError> {
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| AppError::internal("Sequence exhausted", json!({})))
    }
}

/// Counts observer notifications.
#[derive(Default)]
pub struct CountingObserver {
    pub shortened: AtomicUsize,
    pub resolved: AtomicUsize,
}

impl CountingObserver {
    pub fn shortened(&self) -> usize {
        self.shortened.load(Ordering::SeqCst)
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

impl LinkObserver for CountingObserver {
    fn on_shortened(&self, _code: &str) {
        self.shortened.fetch_add(1, Ordering::SeqCst);
    }

    fn on_resolved(&self, _code: &str) {
        self.resolved.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store whose backend is never reachable.
pub struct UnavailableRepository;

fn unavailable() -> AppError {
    AppError::store_unavailable("Database error", json!({}))
}

#[async_trait]
impl LinkRepository for UnavailableRepository {
    async fn exists(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn insert_if_absent(&self, _new_link: NewLink) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) {
    assert!(
        repo.insert_if_absent(NewLink::new(code, url))
            .await
            .unwrap()
    );
}

/// State over a fresh in-memory store with the production generator.
pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let state = AppState::new(
        repo.clone(),
        Arc::new(HexCodeGenerator),
        Arc::new(NoopObserver),
        ShortenOptions::default(),
        TEST_BASE_URL,
    );

    (state, repo)
}

pub fn create_state_with(
    repo: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    observer: Arc<dyn LinkObserver>,
) -> AppState {
    AppState::new(
        repo,
        generator,
        observer,
        ShortenOptions::default(),
        TEST_BASE_URL,
    )
}
