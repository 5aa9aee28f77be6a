use std::{fmt, io};

use rustyline::error::ReadlineError;

use crate::command::CommandError;

#[derive(Debug)]
pub enum ReplError {
    Io(io::Error),
    Readline(ReadlineError),
    Script { line: usize, source: CommandError },
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplError::Io(e) => write!(f, "I/O error: {}", e),
            ReplError::Readline(e) => write!(f, "line editor error: {}", e),
            ReplError::Script { line, source } => write!(f, "line {}: {}", line, source),
        }
    }
}

impl std::error::Error for ReplError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReplError::Io(e) => Some(e),
            ReplError::Readline(e) => Some(e),
            ReplError::Script { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for ReplError {
    fn from(e: io::Error) -> Self {
        ReplError::Io(e)
    }
}

impl From<ReadlineError> for ReplError {
    fn from(e: ReadlineError) -> Self {
        ReplError::Readline(e)
    }
}
