use serde::{Deserialize, Serialize};

/// Meeting modes.
///
/// `Start` and `End` are informational: they swap the timer display for a
/// static "hours start/end soon" message and leave the clocks alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Group,
    Individual,
    Start,
    End,
}

/// Per-mode display labels. The individual label embeds the meeting length
/// and is rebuilt whenever that changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeLabels {
    pub group: String,
    pub individual: String,
    pub start: String,
    pub end: String,
}

impl ModeLabels {
    pub fn new(meeting_minutes: u32) -> Self {
        Self {
            group: "group meeting".into(),
            individual: individual_label(meeting_minutes),
            start: "start".into(),
            end: "end".into(),
        }
    }

    pub fn set_meeting_minutes(&mut self, meeting_minutes: u32) {
        self.individual = individual_label(meeting_minutes);
    }

    pub fn label(&self, mode: Mode) -> &str {
        match mode {
            Mode::Group => &self.group,
            Mode::Individual => &self.individual,
            Mode::Start => &self.start,
            Mode::End => &self.end,
        }
    }
}

fn individual_label(meeting_minutes: u32) -> String {
    format!("{meeting_minutes}-minute individual meetings")
}
