use std::fmt::Display;
use std::io::{BufRead, Write};

use growring_common::{dev_debug, dev_info};
use growring_core::RingBuffer;

use crate::command::{Command, HELP, parse_line};
use crate::error::ReplError;

const ABSENT: &str = "(absent)";

fn show<T: Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => ABSENT.to_string(),
    }
}

/// A ring buffer of integers driven by parsed [`Command`]s.
pub struct Session {
    rb: RingBuffer<i64>,
}

impl Session {
    /// Values below one, negative ones included, are raised to one.
    pub fn new(capacity: i64) -> Self {
        let capacity = usize::try_from(capacity).unwrap_or(0);
        let rb = RingBuffer::new(capacity);
        dev_info!("Created ring buffer with capacity {}", rb.capacity());
        Self { rb }
    }

    pub fn buffer(&self) -> &RingBuffer<i64> {
        &self.rb
    }

    /// Applies `command` and returns the text to print, if any.
    /// `Quit` is left to the caller and is a no-op here.
    pub fn execute(&mut self, command: Command) -> Option<String> {
        dev_debug!("Executing {:?}", command);

        match command {
            Command::Push(v) => {
                self.rb.push(v);
                None
            }
            Command::Unshift(v) => {
                self.rb.unshift(v);
                None
            }
            Command::Pop => Some(show(self.rb.pop())),
            Command::Shift => Some(show(self.rb.shift())),
            Command::Get(pos) => {
                let value = usize::try_from(pos).ok().and_then(|p| self.rb.get(p));
                Some(show(value))
            }
            Command::Set(pos, v) => {
                if let Ok(p) = usize::try_from(pos) {
                    self.rb.set(p, v);
                }
                None
            }
            Command::Grow => {
                self.rb.grow();
                None
            }
            Command::PeekFirst => Some(show(self.rb.peek_first())),
            Command::PeekLast => Some(show(self.rb.peek_last())),
            Command::DropFirst(n) => Some(self.rb.drop_first(n).to_string()),
            Command::DropLast(n) => Some(self.rb.drop_last(n).to_string()),
            Command::Clear => {
                self.rb.clear();
                None
            }
            Command::Len => Some(self.rb.len().to_string()),
            Command::Cap => Some(self.rb.capacity().to_string()),
            Command::Dump => Some(format!("{:?} (len {}, cap {})", self.rb, self.rb.len(), self.rb.capacity())),
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        }
    }
}

/// Runs every command read from `input`, writing replies to `out`.
///
/// Stops at the end of input or at `quit`. The first line that fails to
/// parse aborts the run with its 1-based line number.
pub fn run_script<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<(), ReplError> {
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(source) => return Err(ReplError::Script { line: idx + 1, source }),
        };

        if command == Command::Quit {
            dev_debug!("Script quit at line {}", idx + 1);
            break;
        }

        if let Some(reply) = session.execute(command) {
            writeln!(out, "{}", reply)?;
        }
    }

    out.flush()?;
    Ok(())
}
