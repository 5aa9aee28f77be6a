use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use growring_common::__log::LevelFilter;
use growring_common::{dev_error, dev_info, dev_warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use command::{Command, parse_line};
use error::ReplError;
use session::{Session, run_script};

mod command;
mod error;
mod session;

/// Drive a growable ring buffer of integers with text commands.
#[derive(Parser, Debug)]
struct Args {
    /// Initial capacity. Values below 1 are raised to 1.
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    capacity: i64,

    /// Read commands from this file instead of the terminal.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn run_interactive(session: &mut Session) -> Result<(), ReplError> {
    let mut editor = DefaultEditor::new()?;
    println!("Type `help` for the list of commands.");

    loop {
        let line = match editor.readline("ring> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                if let Some(reply) = session.execute(command) {
                    println!("{}", reply);
                }
            }
            Err(e) => {
                dev_warn!("Rejected input {:?}", line);
                eprintln!("error: {}", e);
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    let mut session = Session::new(args.capacity);

    let result = match &args.script {
        Some(path) => {
            dev_info!("Running script {}", path.display());
            File::open(path)
                .map_err(ReplError::from)
                .and_then(|file| run_script(&mut session, BufReader::new(file), &mut io::stdout().lock()))
        }
        None => run_interactive(&mut session),
    };

    dev_info!(
        "Session ended with {} elements, capacity {}",
        session.buffer().len(),
        session.buffer().capacity()
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            dev_error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
