use std::path::{Path, PathBuf};

/// On-disk layout: `<root>/students.txt` plus `<root>/sessions/*.txt`.
/// All paths are derived here so the rest of the code never concatenates
/// directory names by hand.
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: PathBuf) -> Self {
        DataDir { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the data directories if absent. Runs once at startup.
    pub fn ensure(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.sessions_dir())?;
        Ok(())
    }

    pub fn students_file(&self) -> PathBuf {
        self.root.join("students.txt")
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    /// Full path for a session file name as the user types it (no path
    /// components of its own).
    pub fn session_path(&self, file_name: &str) -> PathBuf {
        self.sessions_dir().join(file_name)
    }

    /// Names of stored session files, sorted. Non-`.txt` entries are ignored.
    pub fn list_sessions(&self) -> std::io::Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for ent in std::fs::read_dir(self.sessions_dir())? {
            let ent = ent?;
            let p = ent.path();
            if !p.is_file() {
                continue;
            }
            let name = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
            if !name.to_ascii_lowercase().ends_with(".txt") {
                continue;
            }
            names.push(name.to_string());
        }
        names.sort();
        Ok(names)
    }
}
