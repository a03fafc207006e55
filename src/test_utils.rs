//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::collections::VecDeque;
use std::future::Future;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::sources::{PageFetcher, PageRequest, Result};
use crate::state::{Cursor, Identified, Page};

/// Minimal identified item for collection tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Identifier.
    pub id: String,
}

impl Tag {
    /// Tag with the given id.
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Identified for Tag {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Shared state behind a [`ScriptedFetcher`] and its clones.
struct Script<T, F> {
    /// Outcomes handed out in order.
    outcomes: VecDeque<std::result::Result<Page<T>, String>>,
    /// Every request received.
    requests: Vec<PageRequest<F>>,
}

/// What: Page fetcher that replays a fixed list of outcomes.
///
/// Details:
/// - Clones share the script and the request log.
/// - An empty script answers with an error.
/// - `with_delay` makes each fetch sleep first, to keep a load in flight.
pub struct ScriptedFetcher<T, F = ()> {
    /// Shared script and request log.
    script: Arc<Mutex<Script<T, F>>>,
    /// Sleep before each answer.
    delay: Option<Duration>,
    /// Filters type marker.
    _filters: PhantomData<fn() -> F>,
}

impl<T, F> Clone for ScriptedFetcher<T, F> {
    fn clone(&self) -> Self {
        Self {
            script: Arc::clone(&self.script),
            delay: self.delay,
            _filters: PhantomData,
        }
    }
}

impl<T, F: Clone> ScriptedFetcher<T, F> {
    /// What: Fetcher answering with `outcomes` in order.
    ///
    /// Inputs:
    /// - `outcomes`: `Ok(page)` or `Err(message)` per fetch
    pub fn new(outcomes: Vec<std::result::Result<Page<T>, String>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(Script {
                outcomes: outcomes.into(),
                requests: Vec::new(),
            })),
            delay: None,
            _filters: PhantomData,
        }
    }

    /// Sleep for `delay` before answering each fetch.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Cursors of every request received, in order.
    pub fn requested_cursors(&self) -> Vec<Option<Cursor>> {
        self.lock().requests.iter().map(|r| r.cursor.clone()).collect()
    }

    /// Limits of every request received, in order.
    pub fn requested_limits(&self) -> Vec<Option<u32>> {
        self.lock().requests.iter().map(|r| r.limit).collect()
    }

    /// Filters of every request received, in order.
    pub fn requested_filters(&self) -> Vec<F> {
        self.lock()
            .requests
            .iter()
            .map(|r| r.filters.clone())
            .collect()
    }

    /// Lock the shared script, ignoring poisoning from a failed test thread.
    fn lock(&self) -> std::sync::MutexGuard<'_, Script<T, F>> {
        self.script
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<T, F> PageFetcher for ScriptedFetcher<T, F>
where
    T: Send + 'static,
    F: Clone + std::fmt::Debug + Default + Send + Sync + 'static,
{
    type Item = T;
    type Filters = F;

    fn fetch_page(&self, request: PageRequest<F>) -> impl Future<Output = Result<Page<T>>> + Send {
        let outcome = {
            let mut script = self.lock();
            script.requests.push(request);
            script.outcomes.pop_front()
        };
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match outcome {
                Some(Ok(page)) => Ok(page),
                Some(Err(message)) => Err(message.into()),
                None => Err("script exhausted".into()),
            }
        }
    }
}
