//! Test data factories for bulk-indexer types
//!
//! These are test utilities - not all may be used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use bulk_indexer::error::Error;
use bulk_indexer::submit::{Phase, ProgressCallback};
use bulk_indexer::types::{RunState, SubmissionItem, SubmitOutcome, TerminalState};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// `n` URL_UPDATED items, numbered from 1
pub fn make_items(n: usize) -> Vec<SubmissionItem> {
    (1..=n).map(make_item).collect()
}

/// Item for page `i`
pub fn make_item(i: usize) -> SubmissionItem {
    SubmissionItem::updated(format!("https://example.org/page-{i}"))
}

/// Write a slug CSV with the given slugs under `dir`
pub fn write_slug_csv(dir: &Path, slugs: &[&str]) -> PathBuf {
    let path = dir.join("data.csv");
    let mut contents = String::from("industry,pain_point,slug\n");
    for (i, slug) in slugs.iter().enumerate() {
        contents.push_str(&format!("Industry {i},Pain {i},{slug}\n"));
    }
    std::fs::write(&path, contents).unwrap();
    path
}

/// The test service account key with `token_uri` pointed at `token_uri`
pub fn write_service_account(dir: &Path, token_uri: &str) -> PathBuf {
    let template = include_str!("../fixtures/service_account.json");
    let path = dir.join("service_account.json");
    std::fs::write(&path, template.replace("TOKEN_URI_PLACEHOLDER", token_uri)).unwrap();
    path
}

/// Progress event, recorded in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Phase(Phase),
    Started(usize, String),
    Finished(usize, bool),
    Stopped(TerminalState, RunState),
    Error(String),
    Message(String),
}

/// Progress callback that records every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push(Event::Phase(phase));
    }

    async fn on_item_started(&self, index: usize, item: &SubmissionItem) {
        self.push(Event::Started(index, item.url.clone()));
    }

    async fn on_item_finished(
        &self,
        index: usize,
        _item: &SubmissionItem,
        outcome: &SubmitOutcome,
    ) {
        self.push(Event::Finished(index, outcome.is_success()));
    }

    async fn on_stopped(&self, terminal: TerminalState, state: &RunState) {
        self.push(Event::Stopped(terminal, *state));
    }

    async fn on_error(&self, error: &Error) {
        self.push(Event::Error(error.to_string()));
    }

    async fn on_message(&self, message: &str) {
        self.push(Event::Message(message.to_string()));
    }
}
