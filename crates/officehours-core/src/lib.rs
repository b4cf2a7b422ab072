//! # officehours core library
//!
//! Business logic for running office hours from a terminal: a rotating queue
//! of people waiting for timed one-on-one meetings, a group-meeting
//! stopwatch, and the persisted queue.
//!
//! ## Architecture
//!
//! - **Meeting Timer**: a tick-driven state machine owning the queue, both
//!   clocks, the mode and the pause flag. The caller invokes `on_tick()` once
//!   per second and forwards returned cues.
//! - **Display**: a pure composer from timer state to a toned message
//! - **Storage**: SQLite queue store and TOML configuration
//!
//! ## Key Components
//!
//! - [`MeetingTimer`]: Core timer state machine
//! - [`QueueStore`]: Queue persistence
//! - [`Config`]: Application configuration management
//! - [`CueEmitter`]: Trait for whatever makes cues audible

pub mod display;
pub mod error;
pub mod events;
pub mod queue;
pub mod storage;
pub mod timer;

pub use display::{compose, DisplayText, MessageLine, Segment, TimerMessage, Tone};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Cue, CueEmitter, RecordedCues};
pub use queue::{ParticipantQueue, QueueEntry};
pub use storage::{Config, QueueStore, StoredQueue};
pub use timer::{format_time, MeetingTimer, Mode, QueueSnapshot, TimerSettings};
