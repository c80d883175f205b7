use crate::error::AppError;
use crate::render;
use crate::repl::{next_token, required_token, AppState};

pub fn try_handle(
    state: &mut AppState,
    verb: &str,
    args: &str,
) -> Option<Result<String, AppError>> {
    match verb {
        "register" => Some(register(state, args)),
        "students" => Some(Ok(list(state))),
        "find" => Some(find(state, args)),
        _ => None,
    }
}

fn register(state: &mut AppState, mut args: &str) -> Result<String, AppError> {
    let Some(index) = next_token(&mut args) else {
        return Err(AppError::EmptyIndex);
    };
    let index = index.to_string();
    // Everything after the index is the name; blank collapses to Unknown.
    let name = args.trim();
    state.roster.register(&index, name)?;

    let path = state.dirs.students_file();
    match state.roster.save(&path) {
        Ok(()) => Ok(format!("Student {} registered.", index)),
        Err(e) => {
            tracing::warn!("roster save failed: {}", e);
            Ok(format!("Student {} registered.\nwarning: {}", index, e))
        }
    }
}

fn list(state: &AppState) -> String {
    if state.roster.is_empty() {
        return "No students registered yet.".to_string();
    }
    render::students_table(&state.roster)
}

fn find(state: &AppState, mut args: &str) -> Result<String, AppError> {
    let index = required_token(&mut args, "index")?;
    Ok(match state.roster.find(&index) {
        Some(name) => format!("Found: {} - {}", index, name),
        None => format!("Student {} not found.", index),
    })
}
