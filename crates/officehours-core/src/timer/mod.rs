mod engine;
mod format;
mod mode;
mod settings;

pub use engine::{MeetingTimer, QueueSnapshot};
pub use format::format_time;
pub use mode::{Mode, ModeLabels};
pub use settings::{parse_minutes, TimerSettings};
