//! Queue entries.
//!
//! Operators schedule a break by adding a pseudo-participant named like
//! `"10-minute break"`. The name stays the source of truth (it is what gets
//! displayed and persisted), but the break length is parsed once on insert so
//! the projection code works with a typed value instead of re-parsing text.

/// Name suffix that marks an entry as a scheduled break.
pub const BREAK_SUFFIX: &str = "-minute break";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueEntry {
    Participant(String),
    ScheduledBreak {
        /// Break length parsed from the label.
        minutes: u64,
        /// Label as entered, e.g. `"10-minute break"`.
        label: String,
    },
}

impl QueueEntry {
    /// Classify a name. Only names of the form `"<whole number>-minute break"`
    /// become breaks; anything else (including `"lunch-minute break"`) is an
    /// ordinary participant.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let minutes = name
            .strip_suffix(BREAK_SUFFIX)
            .and_then(|prefix| prefix.trim().parse::<u64>().ok());
        match minutes {
            Some(minutes) => QueueEntry::ScheduledBreak {
                minutes,
                label: name,
            },
            None => QueueEntry::Participant(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QueueEntry::Participant(name) => name,
            QueueEntry::ScheduledBreak { label, .. } => label,
        }
    }

    /// Break length in seconds, `None` for participants.
    pub fn break_seconds(&self) -> Option<u64> {
        match self {
            QueueEntry::ScheduledBreak { minutes, .. } => Some(minutes.saturating_mul(60)),
            QueueEntry::Participant(_) => None,
        }
    }
}

impl std::fmt::Display for QueueEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
