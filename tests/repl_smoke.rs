use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn run_script(data_dir: &Path, script: &str) -> String {
    let exe = env!("CARGO_BIN_EXE_rollbook");
    let mut child = Command::new(exe)
        .arg("--data-dir")
        .arg(data_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rollbook");
    child
        .stdin
        .take()
        .expect("child stdin")
        .write_all(script.as_bytes())
        .expect("write script");
    let out = child.wait_with_output().expect("wait for rollbook");
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn full_command_sweep() {
    let data = temp_dir("rollbook-smoke");
    let script = "\
register EE20045 Carol Danvers
register EE20001 Alice
register EE20001 Shadow
register EE20010
students
find EE20001
find EE99999
create EEE227 2025-10-15 09:00 2
sessions
mark EEE227_2025-10-15_09-00.txt
EE20001 p
EE20045 A
EE20010 L
EE20001 P
EE99999 P
done
show EEE227_2025-10-15_09-00.txt
summary EEE227_2025-10-15_09-00.txt
exit
";
    let out = run_script(&data, script);

    assert!(out.contains("Student EE20045 registered."), "{}", out);
    assert!(out.contains("student EE20001 already registered"), "{}", out);
    assert!(out.contains("Found: EE20001 - Alice"), "{}", out);
    assert!(out.contains("Student EE99999 not found."), "{}", out);
    assert!(
        out.contains("Session created (empty attendance): EEE227_2025-10-15_09-00.txt"),
        "{}",
        out
    );
    assert!(out.contains("Marking attendance for EEE227 2025-10-15 09:00"), "{}", out);
    assert!(out.contains("Marked EE20001 as P"), "{}", out);
    assert!(out.contains("Updated attendance for EE20001 -> P"), "{}", out);
    assert!(out.contains("Student not registered."), "{}", out);
    assert!(out.contains("Session saved."), "{}", out);
    assert!(
        out.contains("Attendance for EEE227 on 2025-10-15 09:00 (2 hrs)"),
        "{}",
        out
    );
    assert!(out.contains("Total marked : 3"), "{}", out);
    assert!(out.contains("Present : 1"), "{}", out);
    assert!(out.contains("Goodbye."), "{}", out);

    // Roster file: sorted ascending, blank name defaulted.
    let roster = std::fs::read_to_string(data.join("students.txt")).expect("roster file");
    assert_eq!(
        roster,
        "EE20001,Alice\nEE20010,Unknown\nEE20045,Carol Danvers\n"
    );

    // Session file: header plus marks in first-marked order, updates in place.
    let session =
        std::fs::read_to_string(data.join("sessions").join("EEE227_2025-10-15_09-00.txt"))
            .expect("session file");
    assert_eq!(
        session,
        "EEE227,2025-10-15,09:00,2\nEE20001,P\nEE20045,A\nEE20010,L\n"
    );

    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn roster_survives_restart() {
    let data = temp_dir("rollbook-restart");
    let _ = run_script(&data, "register EE20002 Bob\nregister EE20001 Alice\nexit\n");
    let out = run_script(&data, "students\nexit\n");
    assert!(out.contains("Alice"), "{}", out);
    assert!(out.contains("Bob"), "{}", out);
    // Sorted by index: Alice's row renders before Bob's.
    let alice = out.find("EE20001").expect("EE20001 listed");
    let bob = out.find("EE20002").expect("EE20002 listed");
    assert!(alice < bob, "{}", out);
    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn unmarked_students_render_placeholder() {
    let data = temp_dir("rollbook-placeholder");
    let script = "\
register EE20001 Alice
register EE20002 Bob
register EE20003 Carol
create EEE227 2025-10-15 09:00 2
mark EEE227_2025-10-15_09-00.txt
EE20001 P
EE20003 L
done
show EEE227_2025-10-15_09-00.txt
exit
";
    let out = run_script(&data, script);
    let row = |idx: &str| {
        out.lines()
            .find(|l| l.contains(idx) && l.contains('|'))
            .unwrap_or_else(|| panic!("no table row for {}: {}", idx, out))
            .to_string()
    };
    assert!(row("EE20001").contains('P'), "{}", out);
    assert!(row("EE20002").contains('-'), "{}", out);
    assert!(row("EE20003").contains('L'), "{}", out);
    let _ = std::fs::remove_dir_all(data);
}

#[test]
fn unknown_command_keeps_loop_alive() {
    let data = temp_dir("rollbook-unknown");
    let out = run_script(&data, "frobnicate\nstudents\nexit\n");
    assert!(out.contains("Unknown command: frobnicate"), "{}", out);
    assert!(out.contains("No students registered yet."), "{}", out);
    assert!(out.contains("Goodbye."), "{}", out);
    let _ = std::fs::remove_dir_all(data);
}
