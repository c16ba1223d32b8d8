use std::io::BufRead;

use crate::error::Fault;

/// Newline-framed cursor over the `READ` channel.
///
/// Framing follows the source language: a text with *k* newline characters
/// holds *k*+1 lines, so input ending in a newline still yields one final
/// empty line, and empty input yields exactly one empty line. The cursor is
/// monotonic for the whole execution and never resets; past the last line
/// every read reports end-of-stream.
pub struct LineInput<R> {
    reader: R,
    owed: bool,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> LineInput<R> {
        LineInput { reader, owed: true }
    }

    /// The next line without its trailing newline, or `None` past the end.
    pub fn next_line(&mut self) -> Result<Option<String>, Fault> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(Fault::Input)?;

        if read == 0 {
            if self.owed {
                self.owed = false;
                return Ok(Some(String::new()));
            }
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            self.owed = true;
        } else {
            self.owed = false;
        }
        Ok(Some(line))
    }
}
