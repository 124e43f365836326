use std::io::Write;

use crate::notify::{Message, Notifier, NotifyError};

/// Writes rendered messages instead of sending them
pub struct PreviewNotifier<W: Write> {
    out: W,
}

impl<W: Write> PreviewNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for PreviewNotifier<W> {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        writeln!(self.out, "{}", "-".repeat(60))?;
        write!(self.out, "{}", message.render())?;
        Ok(())
    }
}
