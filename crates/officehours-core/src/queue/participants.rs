use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use super::entry::QueueEntry;

/// Suffix appended to a name that is already queued.
pub const DUPLICATE_SUFFIX: &str = " II";

/// Ordered queue of participants. The front entry is the one in session.
///
/// Only structural operations live here; timer side effects of rotating or
/// removing are applied by [`MeetingTimer`](crate::MeetingTimer).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantQueue {
    entries: VecDeque<QueueEntry>,
}

impl ParticipantQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a queue from stored names, keeping them exactly as stored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: names.into_iter().map(QueueEntry::from_name).collect(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name() == name)
    }

    /// The entry currently in session.
    pub fn front(&self) -> Option<&QueueEntry> {
        self.entries.front()
    }

    /// Everyone behind the front entry.
    pub fn waiting(&self) -> impl Iterator<Item = &QueueEntry> {
        self.entries.iter().skip(1)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name().to_string()).collect()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Append `name`, suffixing it once with `" II"` if it is already queued.
    /// Returns the name as stored.
    pub fn push(&mut self, name: &str) -> &QueueEntry {
        let stored = if self.contains(name) {
            format!("{name}{DUPLICATE_SUFFIX}")
        } else {
            name.to_string()
        };
        self.entries.push_back(QueueEntry::from_name(stored));
        &self.entries[self.entries.len() - 1]
    }

    /// Move the front entry to the back. Needs at least two entries.
    pub fn rotate_forward(&mut self) -> bool {
        if self.entries.len() < 2 {
            return false;
        }
        self.entries.rotate_left(1);
        true
    }

    /// Move the back entry to the front. Needs at least two entries.
    pub fn rotate_backward(&mut self) -> bool {
        if self.entries.len() < 2 {
            return false;
        }
        self.entries.rotate_right(1);
        true
    }

    pub fn pop_back(&mut self) -> Option<QueueEntry> {
        self.entries.pop_back()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.make_contiguous().shuffle(rng);
    }
}
