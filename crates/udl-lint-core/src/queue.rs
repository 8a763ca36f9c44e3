//! The lint request queue shared by the document owner and the worker.

use crate::request::LintRequest;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// An entry in the lint queue.
#[derive(Debug)]
pub enum QueueItem {
    /// Work for the worker.
    Request(LintRequest),
    /// Tells the worker to exit.
    Shutdown,
}

impl QueueItem {
    /// The request uid, if this is a request.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        match self {
            Self::Request(r) => Some(&r.uid),
            Self::Shutdown => None,
        }
    }
}

/// FIFO queue with front insertion and removal by uid.
///
/// One mutex guards the list; `get` waits on a condition variable that is
/// signalled when an insert makes the queue non-empty. Removal by uid scans
/// and filters under the same lock as `put` and `get`.
#[derive(Debug, Default)]
pub struct LintRequestQueue {
    items: Mutex<VecDeque<QueueItem>>,
    available: Condvar,
}

impl LintRequestQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item.
    pub fn put(&self, item: QueueItem) {
        let mut items = self.items.lock();
        let was_empty = items.is_empty();
        items.push_back(item);
        if was_empty {
            self.available.notify_one();
        }
    }

    /// Inserts an item ahead of everything queued.
    pub fn prepend(&self, item: QueueItem) {
        let mut items = self.items.lock();
        let was_empty = items.is_empty();
        items.push_front(item);
        if was_empty {
            self.available.notify_one();
        }
    }

    /// Removes and returns the head, blocking while the queue is empty.
    pub fn get(&self) -> QueueItem {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            self.available.wait(&mut items);
        }
    }

    /// Drops every queued request with `uid`, returning how many were removed.
    ///
    /// A request already taken by [`get`](Self::get) is unaffected.
    pub fn remove_uid(&self, uid: &str) -> usize {
        let mut items = self.items.lock();
        let before = items.len();
        items.retain(|item| item.uid() != Some(uid));
        before - items.len()
    }

    /// Number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// True if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}
