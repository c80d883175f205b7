mod commands;
mod error;
mod render;
mod repl;
mod roster;
mod session;
mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use crate::repl::{AppState, Outcome};
use crate::roster::Roster;
use crate::store::DataDir;

#[derive(Parser)]
#[command(name = "rollbook", version, about = "Class attendance recorder")]
struct Cli {
    /// Directory holding the roster and session files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("rollbook=warn".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let dirs = DataDir::new(cli.data_dir);
    dirs.ensure()?;
    tracing::debug!("data dir: {}", dirs.root().display());

    let roster = Roster::load(&dirs.students_file());
    tracing::debug!("loaded {} student(s)", roster.len());

    let mut state = AppState {
        dirs,
        roster,
        marking: None,
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Digital Attendance System (type 'help' for commands)");
    print!("{}", repl::prompt(&state));
    let _ = stdout.flush();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            match repl::handle_line(&mut state, trimmed) {
                Outcome::Reply(msg) => {
                    if !msg.is_empty() {
                        println!("{}", msg);
                    }
                }
                Outcome::Quit => break,
            }
        }
        print!("{}", repl::prompt(&state));
        let _ = stdout.flush();
    }

    // The roster persists on every mutation already; this covers the exit
    // path so a freshly loaded file is rewritten even without changes.
    if let Err(e) = state.roster.save(&state.dirs.students_file()) {
        eprintln!("warning: {}", e);
    }
    println!("Goodbye.");
    Ok(())
}
