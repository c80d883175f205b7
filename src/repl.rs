use std::path::PathBuf;

use crate::commands;
use crate::error::AppError;
use crate::roster::Roster;
use crate::session::LectureSession;
use crate::store::DataDir;

/// A session opened for marking. Lines entered while this is set are
/// index/status pairs, not commands; `done` saves and clears it.
pub struct ActiveMarking {
    pub session: LectureSession,
    pub path: PathBuf,
}

pub struct AppState {
    pub dirs: DataDir,
    pub roster: Roster,
    pub marking: Option<ActiveMarking>,
}

pub enum Outcome {
    Reply(String),
    Quit,
}

pub const HELP: &str = "Commands:\n\
  register <index> [name]              Register a new student\n\
  students                             List registered students\n\
  find <index>                         Look up a student by index\n\
  create <course> <date> <time> <hrs>  Create a lecture session ('today' for the date)\n\
  sessions                             List stored session files\n\
  mark <file>                          Mark or update attendance for a session\n\
  show <file>                          Attendance list for a session\n\
  summary <file>                       Attendance summary for a session\n\
  help                                 Show this help\n\
  exit                                 Save the roster and quit";

/// Dispatch one input line. Marking mode captures every line until the
/// user finishes; otherwise the first token selects a handler family and
/// the remainder of the line is its argument text.
pub fn handle_line(state: &mut AppState, line: &str) -> Outcome {
    if state.marking.is_some() {
        return reply(commands::sessions::marking_line(state, line));
    }

    let mut args = line;
    let Some(verb) = next_token(&mut args) else {
        return Outcome::Reply(String::new());
    };

    match verb {
        "help" => return Outcome::Reply(HELP.to_string()),
        "exit" | "quit" => return Outcome::Quit,
        _ => {}
    }

    let handled = commands::students::try_handle(state, verb, args)
        .or_else(|| commands::sessions::try_handle(state, verb, args));

    match handled {
        Some(result) => reply(result),
        None => Outcome::Reply(format!("Unknown command: {} (type 'help')", verb)),
    }
}

pub fn prompt(state: &AppState) -> &'static str {
    if state.marking.is_some() {
        "mark> "
    } else {
        "> "
    }
}

fn reply(result: Result<String, AppError>) -> Outcome {
    match result {
        Ok(msg) => Outcome::Reply(msg),
        Err(e) => Outcome::Reply(format!("error: {}", e)),
    }
}

/// Pop the next whitespace-delimited token, advancing `args` past it.
pub fn next_token<'a>(args: &mut &'a str) -> Option<&'a str> {
    let trimmed = args.trim_start();
    if trimmed.is_empty() {
        *args = trimmed;
        return None;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((tok, rest)) => {
            *args = rest;
            Some(tok)
        }
        None => {
            *args = "";
            Some(trimmed)
        }
    }
}

pub fn required_token(args: &mut &str, what: &str) -> Result<String, AppError> {
    next_token(args)
        .map(str::to_string)
        .ok_or_else(|| AppError::bad_command(format!("missing {}", what)))
}
