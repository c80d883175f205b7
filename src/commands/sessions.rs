use crate::error::AppError;
use crate::render;
use crate::repl::{next_token, required_token, ActiveMarking, AppState};
use crate::session::{LectureSession, LoadReport, MarkOutcome};

pub fn try_handle(
    state: &mut AppState,
    verb: &str,
    args: &str,
) -> Option<Result<String, AppError>> {
    match verb {
        "create" => Some(create(state, args)),
        "sessions" => Some(list(state)),
        "mark" => Some(open_marking(state, args)),
        "show" => Some(show(state, args)),
        "summary" => Some(summary(state, args)),
        _ => None,
    }
}

fn create(state: &mut AppState, mut args: &str) -> Result<String, AppError> {
    let course = required_token(&mut args, "course code")?;
    let mut date = required_token(&mut args, "date")?;
    let start_time = required_token(&mut args, "start time")?;
    let hours = required_token(&mut args, "duration")?;
    let duration_hours = hours
        .parse::<u32>()
        .map_err(|_| AppError::bad_command(format!("duration must be a whole number of hours, got '{}'", hours)))?;

    if date == "today" {
        date = chrono::Local::now().format("%Y-%m-%d").to_string();
    }

    let session = LectureSession::new(&course, &date, &start_time, duration_hours);
    let file_name = session.file_name();
    session.save(&state.dirs.session_path(&file_name))?;
    Ok(format!("Session created (empty attendance): {}", file_name))
}

fn list(state: &AppState) -> Result<String, AppError> {
    let names = state
        .dirs
        .list_sessions()
        .map_err(|source| AppError::FileReadFailure {
            path: state.dirs.sessions_dir().display().to_string(),
            source,
        })?;
    if names.is_empty() {
        return Ok("No sessions found.".to_string());
    }
    Ok(names.join("\n"))
}

fn open_marking(state: &mut AppState, mut args: &str) -> Result<String, AppError> {
    let file_name = required_token(&mut args, "session filename")?;
    let path = state.dirs.session_path(&file_name);
    let LoadReport {
        session,
        skipped_lines,
    } = LectureSession::load(&path)?;

    let mut msg = format!(
        "Marking attendance for {} {} {}\nEnter '<index> <P/A/L>' per line, 'done' to finish.",
        session.course_code, session.date, session.start_time
    );
    if skipped_lines > 0 {
        msg = format!(
            "warning: skipped {} malformed mark line(s)\n{}",
            skipped_lines, msg
        );
    }
    state.marking = Some(ActiveMarking { session, path });
    Ok(msg)
}

/// One line of marking mode: `<index> <status>`, or `done`/`exit` to save
/// and leave. Unknown students are refused here so the session never
/// accumulates marks outside the roster.
pub fn marking_line(state: &mut AppState, line: &str) -> Result<String, AppError> {
    let mut args = line;
    let Some(first) = next_token(&mut args) else {
        return Ok(String::new());
    };

    if first == "done" || first == "exit" {
        let active = state.marking.take().expect("marking mode active");
        active.session.save(&active.path)?;
        return Ok("Session saved.".to_string());
    }

    if !state.roster.exists(first) {
        return Ok("Student not registered.".to_string());
    }

    let status_tok = required_token(&mut args, "status (P/A/L)")?;
    let status_char = status_tok.chars().next().expect("non-empty token");

    let active = state.marking.as_mut().expect("marking mode active");
    let outcome = active.session.mark(first, status_char)?;
    let code = status_char.to_ascii_uppercase();
    Ok(match outcome {
        MarkOutcome::Created => format!("Marked {} as {}", first, code),
        MarkOutcome::Updated => format!("Updated attendance for {} -> {}", first, code),
    })
}

fn show(state: &AppState, mut args: &str) -> Result<String, AppError> {
    let file_name = required_token(&mut args, "session filename")?;
    let report = LectureSession::load(&state.dirs.session_path(&file_name))?;

    let mut out = format!(
        "{}\n{}",
        render::session_heading(&report.session),
        render::attendance_table(&report.session, &state.roster)
    );
    if report.skipped_lines > 0 {
        out.push_str(&format!(
            "\nwarning: skipped {} malformed mark line(s)",
            report.skipped_lines
        ));
    }
    Ok(out)
}

fn summary(state: &AppState, mut args: &str) -> Result<String, AppError> {
    let file_name = required_token(&mut args, "session filename")?;
    let report = LectureSession::load(&state.dirs.session_path(&file_name))?;

    let mut out = render::summary_block(&report.session.summary());
    if report.skipped_lines > 0 {
        out.push_str(&format!(
            "\nwarning: skipped {} malformed mark line(s)",
            report.skipped_lines
        ));
    }
    Ok(out)
}
