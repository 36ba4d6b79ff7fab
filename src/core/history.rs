//! Last-in-first-out storage of state labels.
//!
//! A machine keeps two of these: one for undo and one for redo. Popping an
//! empty stack yields a typed [`EmptyHistoryError`] so that "nothing to pop"
//! can never be mistaken for a real state label.

use std::collections::VecDeque;
use thiserror::Error;
use tracing::trace;

/// Returned by [`HistoryStack::pop`] when the stack holds no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("History is empty")]
pub struct EmptyHistoryError;

/// Ordered stack of previously active state labels.
///
/// Entries are kept oldest-first; the top of the stack is the most recently
/// pushed label. A stack may optionally be bounded, in which case pushing
/// onto a full stack evicts the oldest entry.
///
/// # Example
///
/// ```rust
/// use undoable_fsm::core::HistoryStack;
///
/// let mut stack = HistoryStack::new();
/// stack.push("normal");
/// stack.push("busy");
///
/// assert_eq!(stack.peek(), Some("busy"));
/// assert_eq!(stack.pop(), Ok("busy".to_string()));
/// assert_eq!(stack.pop(), Ok("normal".to_string()));
/// assert!(stack.pop().is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryStack {
    entries: VecDeque<String>,
    limit: Option<usize>,
}

impl HistoryStack {
    /// Create an empty, unbounded stack.
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
            limit: None,
        }
    }

    /// Create an empty stack holding at most `limit` entries.
    ///
    /// A limit of zero produces a stack that discards every push.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undoable_fsm::core::HistoryStack;
    ///
    /// let mut stack = HistoryStack::with_limit(2);
    /// stack.push("a");
    /// stack.push("b");
    /// stack.push("c");
    ///
    /// assert_eq!(stack.len(), 2);
    /// assert_eq!(stack.entries().collect::<Vec<_>>(), vec!["b", "c"]);
    /// ```
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: Some(limit),
        }
    }

    /// Push a label as the new top of the stack.
    pub fn push(&mut self, label: impl Into<String>) {
        self.entries.push_back(label.into());

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                if let Some(evicted) = self.entries.pop_front() {
                    trace!(label = %evicted, limit, "evicted oldest history entry");
                }
            }
        }
    }

    /// Remove and return the top label.
    pub fn pop(&mut self) -> Result<String, EmptyHistoryError> {
        self.entries.pop_back().ok_or(EmptyHistoryError)
    }

    /// Top label without removing it.
    pub fn peek(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Capacity bound, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Remove every entry. Does nothing on an empty stack.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries from the bottom (oldest) to the top (newest).
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.entries.iter().map(String::as_str)
    }
}
