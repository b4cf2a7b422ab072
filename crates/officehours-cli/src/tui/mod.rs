pub(crate) mod app;
mod cues;
mod help;
mod input;
mod pump;
mod terminal;
mod text_input;
mod ui;

pub use app::{App, SaveJob};
pub use cues::TerminalBell;
pub use input::{handle_event, Request};
pub use pump::{InputMsg, InputPump};
pub use terminal::TerminalSession;
pub use ui::draw;
