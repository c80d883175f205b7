use std::path::Path;

use crate::error::AppError;

/// Attendance status, serialized as its single-character code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Present,
    Absent,
    Late,
}

impl Status {
    /// Parse a status letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Status> {
        match c.to_ascii_uppercase() {
            'P' => Some(Status::Present),
            'A' => Some(Status::Absent),
            'L' => Some(Status::Late),
            _ => None,
        }
    }

    pub fn code(&self) -> char {
        match self {
            Status::Present => 'P',
            Status::Absent => 'A',
            Status::Late => 'L',
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub index: String,
    pub status: Status,
}

/// Whether `mark` touched an existing record or appended a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub total: usize,
}

/// One lecture's attendance sheet. Marks are unique per index and keep
/// their first-insertion order for serialization; re-marking overwrites in
/// place.
#[derive(Debug)]
pub struct LectureSession {
    pub course_code: String,
    pub date: String,       // YYYY-MM-DD, stored as typed
    pub start_time: String, // HH:MM, stored as typed
    pub duration_hours: u32,
    marks: Vec<AttendanceMark>,
}

/// A loaded session plus the number of mark lines the parser had to drop.
#[derive(Debug)]
pub struct LoadReport {
    pub session: LectureSession,
    pub skipped_lines: usize,
}

impl LectureSession {
    pub fn new(course_code: &str, date: &str, start_time: &str, duration_hours: u32) -> Self {
        LectureSession {
            course_code: course_code.to_string(),
            date: date.to_string(),
            start_time: start_time.to_string(),
            duration_hours,
            marks: Vec::new(),
        }
    }

    /// Derived file name: `<course>_<date>_<time>.txt` with every `:`
    /// replaced by `-`. The replacement runs over the whole composed name,
    /// so a colon inside the course code or date is rewritten too.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.txt",
            self.course_code, self.date, self.start_time
        )
        .replace(':', "-")
    }

    /// Write the header line and one `index,code` line per mark, in mark
    /// order. Whole-file overwrite; there is no partial or atomic write.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let mut out = String::new();
        out.push_str(&format!(
            "{},{},{},{}\n",
            self.course_code, self.date, self.start_time, self.duration_hours
        ));
        for m in &self.marks {
            out.push_str(&m.index);
            out.push(',');
            out.push(m.status.code());
            out.push('\n');
        }
        std::fs::write(path, out).map_err(|source| AppError::FileWriteFailure {
            path: path.display().to_string(),
            source,
        })
    }

    /// Read a session file back. Any open failure is `SessionNotFound`.
    /// The header must carry course, date, time and an integer duration;
    /// a header that does not parse rejects the whole file rather than
    /// inventing a duration. Mark lines are tolerated individually: lines
    /// missing a comma, an index, or a usable status letter are skipped
    /// and counted. Duplicate indices collapse last-write-wins, keeping
    /// the first occurrence's position.
    pub fn load(path: &Path) -> Result<LoadReport, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|_| AppError::SessionNotFound(path.display().to_string()))?;
        let text = String::from_utf8_lossy(&bytes);
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| malformed(path, "empty file"))?
            .trim_end_matches('\r');
        let parts: Vec<&str> = header.split(',').collect();
        if parts.len() < 4 {
            return Err(malformed(path, format!("header has {} field(s), expected 4", parts.len())));
        }
        let duration_hours = parts[3]
            .trim()
            .parse::<u32>()
            .map_err(|_| malformed(path, format!("bad duration: {}", parts[3])))?;

        let mut session = LectureSession::new(parts[0], parts[1], parts[2], duration_hours);

        let mut skipped = 0usize;
        for raw in lines {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let Some((index, status_field)) = line.split_once(',') else {
                skipped += 1;
                continue;
            };
            if index.is_empty() {
                skipped += 1;
                continue;
            }
            let Some(status) = status_field.chars().next().and_then(Status::from_char) else {
                skipped += 1;
                continue;
            };
            session.upsert(index, status);
        }
        if skipped > 0 {
            tracing::warn!(
                "skipped {} malformed mark line(s) in {}",
                skipped,
                path.display()
            );
        }

        Ok(LoadReport {
            session,
            skipped_lines: skipped,
        })
    }

    /// Record a status for a student. The letter is normalized to
    /// uppercase; anything outside P/A/L is rejected without mutation.
    pub fn mark(&mut self, index: &str, status_char: char) -> Result<MarkOutcome, AppError> {
        let c = status_char.to_ascii_uppercase();
        let status = Status::from_char(c).ok_or(AppError::InvalidStatus(status_char))?;
        Ok(self.upsert(index, status))
    }

    fn upsert(&mut self, index: &str, status: Status) -> MarkOutcome {
        if let Some(existing) = self.marks.iter_mut().find(|m| m.index == index) {
            existing.status = status;
            MarkOutcome::Updated
        } else {
            self.marks.push(AttendanceMark {
                index: index.to_string(),
                status,
            });
            MarkOutcome::Created
        }
    }

    pub fn status_of(&self, index: &str) -> Option<Status> {
        self.marks
            .iter()
            .find(|m| m.index == index)
            .map(|m| m.status)
    }

    pub fn marks(&self) -> &[AttendanceMark] {
        &self.marks
    }

    /// Counts by status. `total` is the number of marks, not the roster
    /// size; with invalid statuses rejected at parse time the three
    /// buckets always sum to it.
    pub fn summary(&self) -> Summary {
        let mut s = Summary {
            present: 0,
            absent: 0,
            late: 0,
            total: self.marks().len(),
        };
        for m in self.marks() {
            match m.status {
                Status::Present => s.present += 1,
                Status::Absent => s.absent += 1,
                Status::Late => s.late += 1,
            }
        }
        s
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> AppError {
    AppError::MalformedRecord {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
