pub mod sessions;
pub mod students;
