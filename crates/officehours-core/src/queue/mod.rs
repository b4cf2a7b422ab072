mod entry;
mod participants;

pub use entry::{QueueEntry, BREAK_SUFFIX};
pub use participants::{ParticipantQueue, DUPLICATE_SUFFIX};
