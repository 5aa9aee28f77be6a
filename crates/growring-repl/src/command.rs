use std::fmt;
use std::str::{FromStr, SplitWhitespace};

/// One line of the ring buffer command language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Push(i64),
    Unshift(i64),
    Pop,
    Shift,
    // Positions are signed so that negative input can be reported as
    // absent instead of being rejected by the parser.
    Get(i64),
    Set(i64, i64),
    Grow,
    PeekFirst,
    PeekLast,
    DropFirst(usize),
    DropLast(usize),
    Clear,
    Len,
    Cap,
    Dump,
    Help,
    Quit,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Push(_) => "push",
            Command::Unshift(_) => "unshift",
            Command::Pop => "pop",
            Command::Shift => "shift",
            Command::Get(_) => "get",
            Command::Set(_, _) => "set",
            Command::Grow => "grow",
            Command::PeekFirst => "peek-first",
            Command::PeekLast => "peek-last",
            Command::DropFirst(_) => "drop-first",
            Command::DropLast(_) => "drop-last",
            Command::Clear => "clear",
            Command::Len => "len",
            Command::Cap => "cap",
            Command::Dump => "dump",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

pub const HELP: &str = "\
commands:
  push <v>         append v to the back
  unshift <v>      prepend v to the front
  pop              remove and print the last element
  shift            remove and print the first element
  get <pos>        print the element at pos
  set <pos> <v>    overwrite the element at pos (ignored when out of range)
  grow             double the capacity
  peek-first       print the first element
  peek-last        print the last element
  drop-first <n>   discard up to n elements from the front
  drop-last <n>    discard up to n elements from the back
  clear            discard every element
  len              print the number of elements
  cap              print the capacity
  dump             print every element with len and capacity
  help             show this message
  quit, exit       leave";

#[derive(Debug, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument { command: &'static str, name: &'static str },
    InvalidInteger { name: &'static str, value: String },
    TrailingArguments { command: &'static str },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(name) => write!(f, "unknown command `{}` (try `help`)", name),
            CommandError::MissingArgument { command, name } => write!(f, "`{}` expects a <{}> argument", command, name),
            CommandError::InvalidInteger { name, value } => write!(f, "<{}> must be an integer, got `{}`", name, value),
            CommandError::TrailingArguments { command } => write!(f, "too many arguments for `{}`", command),
        }
    }
}

impl std::error::Error for CommandError {}

struct ArgReader<'a> {
    tokens: SplitWhitespace<'a>,
}

impl ArgReader<'_> {
    fn int<T: FromStr>(&mut self, command: &'static str, name: &'static str) -> Result<T, CommandError> {
        let Some(token) = self.tokens.next() else {
            return Err(CommandError::MissingArgument { command, name });
        };

        token.parse().map_err(|_| CommandError::InvalidInteger { name, value: token.to_string() })
    }
}

/// Parses a single input line. Blank lines and lines holding only a
/// `#` comment yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let code = line.split_once('#').map_or(line, |(code, _)| code);
    let mut tokens = code.split_whitespace();
    let Some(name) = tokens.next() else {
        return Ok(None);
    };

    let mut args = ArgReader { tokens };
    let command = match name.to_ascii_lowercase().as_str() {
        "push" => Command::Push(args.int("push", "value")?),
        "unshift" => Command::Unshift(args.int("unshift", "value")?),
        "pop" => Command::Pop,
        "shift" => Command::Shift,
        "get" => Command::Get(args.int("get", "position")?),
        "set" => Command::Set(args.int("set", "position")?, args.int("set", "value")?),
        "grow" => Command::Grow,
        "peek-first" => Command::PeekFirst,
        "peek-last" => Command::PeekLast,
        "drop-first" => Command::DropFirst(args.int("drop-first", "count")?),
        "drop-last" => Command::DropLast(args.int("drop-last", "count")?),
        "clear" => Command::Clear,
        "len" => Command::Len,
        "cap" => Command::Cap,
        "dump" => Command::Dump,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    if args.tokens.next().is_some() {
        return Err(CommandError::TrailingArguments { command: command.name() });
    }

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
        assert_eq!(parse_line("# push 1"), Ok(None));
    }

    #[test]
    fn test_commands_without_arguments() {
        assert_eq!(parse_line("pop"), Ok(Some(Command::Pop)));
        assert_eq!(parse_line("  shift  "), Ok(Some(Command::Shift)));
        assert_eq!(parse_line("peek-first"), Ok(Some(Command::PeekFirst)));
        assert_eq!(parse_line("exit"), Ok(Some(Command::Quit)));
        assert_eq!(parse_line("?"), Ok(Some(Command::Help)));
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse_line("push 5"), Ok(Some(Command::Push(5))));
        assert_eq!(parse_line("unshift -7"), Ok(Some(Command::Unshift(-7))));
        assert_eq!(parse_line("get -1"), Ok(Some(Command::Get(-1))));
        assert_eq!(parse_line("set 2 40"), Ok(Some(Command::Set(2, 40))));
        assert_eq!(parse_line("drop-last 3"), Ok(Some(Command::DropLast(3))));
    }

    #[test]
    fn test_case_and_trailing_comment() {
        assert_eq!(parse_line("PUSH 1 # first"), Ok(Some(Command::Push(1))));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_line("insert 1"), Err(CommandError::Unknown("insert".to_string())));
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            parse_line("set 1"),
            Err(CommandError::MissingArgument { command: "set", name: "value" })
        );
    }

    #[test]
    fn test_invalid_integer() {
        assert_eq!(
            parse_line("push x"),
            Err(CommandError::InvalidInteger { name: "value", value: "x".to_string() })
        );
        assert_eq!(
            parse_line("drop-first -2"),
            Err(CommandError::InvalidInteger { name: "count", value: "-2".to_string() })
        );
    }

    #[test]
    fn test_trailing_arguments() {
        assert_eq!(parse_line("pop 1"), Err(CommandError::TrailingArguments { command: "pop" }));
        assert_eq!(parse_line("push 1 2"), Err(CommandError::TrailingArguments { command: "push" }));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_line("get").unwrap_err();
        assert_eq!(err.to_string(), "`get` expects a <position> argument");
    }
}
