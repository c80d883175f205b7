use std::path::Path;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub index: String,
    pub name: String,
}

/// The student roster: unique index numbers with display names, kept in
/// ascending index order. One flat file backs it, one `index,name` line per
/// record. Names are stored verbatim, so a comma inside a name corrupts
/// that row on reload.
#[derive(Debug, Default)]
pub struct Roster {
    students: Vec<StudentRecord>,
}

impl Roster {
    /// Read the roster file. An absent file is a normal first run and
    /// yields an empty roster; any other read error is logged and treated
    /// the same. A line with no comma is a student with no recorded name.
    /// Lines with an empty index field carry no usable key and are skipped.
    pub fn load(path: &Path) -> Roster {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("cannot read {}: {}", path.display(), e);
                }
                return Roster::default();
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        let mut roster = Roster::default();
        let mut skipped = 0usize;
        for raw in text.lines() {
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (index, name) = match line.split_once(',') {
                Some((i, n)) => (i, n),
                None => (line, ""),
            };
            if index.is_empty() {
                skipped += 1;
                continue;
            }
            roster.students.push(StudentRecord {
                index: index.to_string(),
                name: normalize_name(name),
            });
        }
        if skipped > 0 {
            tracing::warn!(
                "skipped {} malformed line(s) in {}",
                skipped,
                path.display()
            );
        }
        roster.sort();
        roster
    }

    /// Overwrite the roster file with the current records in sorted order.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let mut out = String::new();
        for s in &self.students {
            out.push_str(&s.index);
            out.push(',');
            out.push_str(&s.name);
            out.push('\n');
        }
        std::fs::write(path, out).map_err(|source| AppError::FileWriteFailure {
            path: path.display().to_string(),
            source,
        })
    }

    /// Add a student. The roster is untouched when the index is empty or
    /// already present.
    pub fn register(&mut self, index: &str, name: &str) -> Result<(), AppError> {
        if index.is_empty() {
            return Err(AppError::EmptyIndex);
        }
        if self.exists(index) {
            return Err(AppError::DuplicateIndex(index.to_string()));
        }
        self.students.push(StudentRecord {
            index: index.to_string(),
            name: normalize_name(name),
        });
        self.sort();
        Ok(())
    }

    pub fn exists(&self, index: &str) -> bool {
        self.students.iter().any(|s| s.index == index)
    }

    pub fn find(&self, index: &str) -> Option<&str> {
        self.students
            .iter()
            .find(|s| s.index == index)
            .map(|s| s.name.as_str())
    }

    pub fn list(&self) -> &[StudentRecord] {
        &self.students
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    fn sort(&mut self) {
        self.students.sort_by(|a, b| a.index.cmp(&b.index));
    }
}

fn normalize_name(name: &str) -> String {
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}
