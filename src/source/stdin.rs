//! Piped stdin as a log source.
//!
//! When the console's stdin is a pipe (`tail -f app.log | logcon`), each
//! line read becomes a log entry. Keyboard input keeps working because the
//! terminal backend reads keys from the controlling tty.

use crate::view::ConsoleHandle;
use std::io::{self, BufRead, BufReader, IsTerminal, Stdin};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Line reader over piped input.
pub struct StdinSource<R: BufRead> {
    reader: R,
    complete: bool,
}

impl StdinSource<BufReader<Stdin>> {
    /// Stdin as a source, or `None` when stdin is an interactive terminal.
    pub fn piped() -> Option<Self> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            None
        } else {
            Some(Self::from_reader(BufReader::new(stdin)))
        }
    }
}

impl<R: BufRead> StdinSource<R> {
    /// Wrap any buffered reader (a pipe, a file, or a byte slice in tests).
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            complete: false,
        }
    }

    /// Read the next line without its terminator. Blocks until a full line
    /// or EOF; `Ok(None)` at EOF.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.complete {
            return Ok(None);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            self.complete = true;
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Check if EOF has been reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Log every remaining line through `handle`. Returns the number of
    /// lines forwarded.
    pub fn forward_to(&mut self, handle: &ConsoleHandle) -> io::Result<usize> {
        let mut forwarded = 0;
        while let Some(line) = self.next_line()? {
            handle.log(line, None);
            forwarded += 1;
        }
        Ok(forwarded)
    }
}

impl<R: BufRead + Send + 'static> StdinSource<R> {
    /// Forward lines on a background thread until EOF or a read error.
    pub fn spawn_forwarder(mut self, handle: ConsoleHandle) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("logcon-stdin".to_string())
            .spawn(move || match self.forward_to(&handle) {
                Ok(lines) => debug!(lines, "Stdin reached EOF"),
                Err(e) => warn!(error = %e, "Stopped reading stdin"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_line_strips_terminators() {
        let data = b"first\r\nsecond\nthird";
        let mut source = StdinSource::from_reader(&data[..]);

        assert_eq!(source.next_line().unwrap(), Some("first".to_string()));
        assert_eq!(source.next_line().unwrap(), Some("second".to_string()));
        assert_eq!(source.next_line().unwrap(), Some("third".to_string()));
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn is_complete_true_after_eof() {
        let data = b"only\n";
        let mut source = StdinSource::from_reader(&data[..]);

        assert!(!source.is_complete(), "Should not be complete initially");
        source.next_line().unwrap();
        source.next_line().unwrap();
        assert!(source.is_complete(), "Should be complete after EOF");
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn empty_lines_are_kept() {
        let data = b"a\n\nb\n";
        let mut source = StdinSource::from_reader(&data[..]);

        source.next_line().unwrap();
        assert_eq!(source.next_line().unwrap(), Some(String::new()));
    }
}
