use comfy_table::{Cell, Table};

use crate::roster::Roster;
use crate::session::{LectureSession, Summary};

pub fn students_table(roster: &Roster) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Index", "Name"]);
    for s in roster.list() {
        table.add_row(vec![Cell::new(&s.index), Cell::new(&s.name)]);
    }
    table.to_string()
}

/// Attendance sheet cross-referenced against the full roster: one row per
/// registered student, `-` where no mark exists. Marks for indices outside
/// the roster still count in the summary but have no row here.
pub fn attendance_table(session: &LectureSession, roster: &Roster) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Index", "Name", "Status"]);
    for s in roster.list() {
        let status = session
            .status_of(&s.index)
            .map(|st| st.code().to_string())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&s.index),
            Cell::new(&s.name),
            Cell::new(status),
        ]);
    }
    table.to_string()
}

pub fn session_heading(session: &LectureSession) -> String {
    format!(
        "Attendance for {} on {} {} ({} hrs)",
        session.course_code, session.date, session.start_time, session.duration_hours
    )
}

pub fn summary_block(s: &Summary) -> String {
    format!(
        "Summary:\n\
         Present : {}\n\
         Absent  : {}\n\
         Late    : {}\n\
         Total marked : {}",
        s.present, s.absent, s.late, s.total
    )
}
