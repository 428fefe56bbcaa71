//! Append-only, in-memory event log.
//!
//! Nothing here is persisted; the log lives as long as its owner (an editor
//! session) and exists so the console can show what happened to a draft.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// An event together with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recorded<E> {
    /// 1-based, strictly increasing position.
    pub sequence_number: u64,
    pub payload: E,
}

/// Append-only sequence of recorded events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog<E> {
    entries: Vec<Recorded<E>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: Event> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events in order, returning the sequence number of the last one.
    pub fn append<I>(&mut self, events: I) -> u64
    where
        I: IntoIterator<Item = E>,
    {
        for payload in events {
            let sequence_number = self.last_sequence() + 1;
            self.entries.push(Recorded {
                sequence_number,
                payload,
            });
        }
        self.last_sequence()
    }

    pub fn last_sequence(&self) -> u64 {
        self.entries.last().map(|r| r.sequence_number).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recorded<E>> {
        self.entries.iter()
    }

    /// The most recent `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> &[Recorded<E>] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
