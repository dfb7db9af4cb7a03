//! Test doubles shared by unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use crate::data_source::{MessagePage, MessageSource, PageCursor, RawMessage};
use crate::error::{CoreError, Result};

/// Message source that replays a script of page results.
///
/// When gated, every fetch waits for a permit from [`ScriptedSource::release`]
/// before returning, so tests can observe the feed while a fetch is pending.
#[derive(Debug)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<MessagePage>>>,
    cursors: Mutex<Vec<Option<PageCursor>>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Result<MessagePage>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            cursors: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    pub fn gated(script: Vec<Result<MessagePage>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(script)
        }
    }

    /// Let `n` pending or future fetches complete
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Cursors passed to each fetch, in call order
    pub fn cursors(&self) -> Vec<Option<PageCursor>> {
        self.cursors.lock().clone()
    }

    /// Yield until `n` fetches have started
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls() < n {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn fetch_page(&self, cursor: Option<&PageCursor>, _limit: usize) -> Result<MessagePage> {
        self.cursors.lock().push(cursor.cloned());
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(MessagePage::empty()))
    }
}

/// Page of messages with the given ids
pub fn page(ids: &[&str], next_cursor: Option<&str>, has_next_page: bool) -> MessagePage {
    MessagePage {
        messages: ids.iter().map(|id| RawMessage::new(*id)).collect(),
        next_cursor: next_cursor.map(PageCursor::new),
        has_next_page,
    }
}

/// A failure as a node would report it
pub fn rpc_failure(message: &str) -> CoreError {
    CoreError::Rpc {
        method: "suix_getDynamicFields".to_string(),
        code: -32000,
        message: message.to_string(),
    }
}
