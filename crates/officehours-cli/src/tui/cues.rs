use std::io::{self, Write};

use officehours_core::CueEmitter;

const BELL: &[u8] = b"\x07";

/// Rings the terminal bell: once for the wrap-up warning, three times when
/// time is up.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self::with_writer(io::stdout(), enabled)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    fn ring(&mut self, times: usize) {
        if !self.enabled {
            return;
        }
        let result = (0..times)
            .try_for_each(|_| self.out.write_all(BELL))
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to ring terminal bell");
        }
    }
}

impl<W: Write> CueEmitter for TerminalBell<W> {
    fn warning(&mut self) {
        self.ring(1);
    }

    fn urgent(&mut self) {
        self.ring(3);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use officehours_core::Cue;

    #[test]
    fn urgent_rings_three_times() {
        let mut bell = TerminalBell::with_writer(Vec::new(), true);
        bell.emit(Cue::Warning);
        bell.emit(Cue::Urgent);
        assert_eq!(bell.out, b"\x07\x07\x07\x07");
    }

    #[test]
    fn disabled_bell_is_silent() {
        let mut bell = TerminalBell::with_writer(Vec::new(), false);
        bell.emit(Cue::Urgent);
        assert!(bell.out.is_empty());
    }
}
