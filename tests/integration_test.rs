use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helper to get the compiled binary path
fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_theta"))
}

/// Helper to create a temporary directory for tests
fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Helper to write a program file into a directory
fn create_program(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run the binary inside `dir` with an isolated workspace.
fn theta(dir: &Path, args: &[&str]) -> Output {
    Command::new(get_binary_path())
        .args(args)
        .current_dir(dir)
        .env("THETA_WORKSPACE", dir.join("ws"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_version_flag() {
    let temp_dir = create_temp_dir();
    let output = theta(temp_dir.path(), &["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("theta 0.1.0"));
}

#[test]
fn test_run_program_file() {
    let temp_dir = create_temp_dir();
    create_program(
        temp_dir.path(),
        "bots.tc",
        r#"
create bot "Helper" platform "telegram"

on Helper receives "hi" respond with "hello"
print "ready"
"#,
    );

    let output = theta(temp_dir.path(), &["bots.tc"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Created telegram bot: Helper\nHelper will respond to \"hi\"\nready\n"
    );
}

#[test]
fn test_blank_program_prints_nothing() {
    let temp_dir = create_temp_dir();
    create_program(temp_dir.path(), "empty.tc", "\n   \n\t\n");

    let output = theta(temp_dir.path(), &["empty.tc"]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_unrecognized_lines_are_ignored() {
    let temp_dir = create_temp_dir();
    create_program(
        temp_dir.path(),
        "loose.tc",
        "bogus statement here\n// a comment\nprint \"still runs\"\n",
    );

    let output = theta(temp_dir.path(), &["loose.tc"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "still runs\n");
}

#[test]
fn test_malformed_statement_stops_run() {
    let temp_dir = create_temp_dir();
    create_program(
        temp_dir.path(),
        "broken.tc",
        "print \"before\"\ncreate bot \"X\"\nprint \"after\"\n",
    );

    let output = theta(temp_dir.path(), &["broken.tc"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("before"));
    assert!(!stdout.contains("after"));
    assert!(stderr.contains("Malformed statement at line 2"));
    assert!(stderr.contains("2 | create bot \"X\""));
}

#[test]
fn test_strict_flag_rejects_undeclared_bot() {
    let temp_dir = create_temp_dir();
    create_program(
        temp_dir.path(),
        "ghost.tc",
        "on ghost receives \"hi\" respond with \"boo\"\n",
    );

    let lenient = theta(temp_dir.path(), &["ghost.tc"]);
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stdout).contains("ghost will respond to \"hi\""));

    let strict = theta(temp_dir.path(), &["--strict", "ghost.tc"]);
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("Unknown bot 'ghost'"));
}

#[test]
fn test_strict_flag_rejects_unrecognized_line() {
    let temp_dir = create_temp_dir();
    create_program(temp_dir.path(), "typo.tc", "// header\npirnt \"oops\"\n");

    let output = theta(temp_dir.path(), &["--strict", "typo.tc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unrecognized statement at line 2"));
}

#[test]
fn test_timestamps_flag() {
    let temp_dir = create_temp_dir();
    create_program(temp_dir.path(), "hello.tc", "print \"hello\"\n");

    let output = theta(temp_dir.path(), &["--timestamps", "hello.tc"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().unwrap();
    assert!(line.ends_with(": hello"));
    assert_eq!(line.len(), "00:00:00: hello".len());
}

#[test]
fn test_missing_file() {
    let temp_dir = create_temp_dir();
    let output = theta(temp_dir.path(), &["nonexistent.tc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("File 'nonexistent.tc' not found"));
}

#[test]
fn test_missing_absolute_and_parent_paths() {
    let temp_dir = create_temp_dir();
    let absolute = temp_dir.path().join("nope.tc");
    let absolute = absolute.to_string_lossy();

    let output = theta(temp_dir.path(), &[&*absolute]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("File '{}' not found", absolute)));

    let output = theta(temp_dir.path(), &["../nope.tc"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File '../nope.tc' not found"));
}

#[test]
fn test_empty_print_keeps_its_line() {
    let temp_dir = create_temp_dir();
    create_program(temp_dir.path(), "gap.tc", "print \"a\"\nprint \"\"\n");

    let output = theta(temp_dir.path(), &["gap.tc"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a\n\n");
}

#[test]
fn test_new_keeps_existing_buffer() {
    let temp_dir = create_temp_dir();
    fs::create_dir_all(temp_dir.path().join("ws")).unwrap();
    fs::write(temp_dir.path().join("ws/main.tc"), "print \"precious\"\n").unwrap();

    let output = theta(temp_dir.path(), &["--new", "main.tc"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File 'main.tc' already exists"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Created"));
    let content = fs::read_to_string(temp_dir.path().join("ws/main.tc")).unwrap();
    assert_eq!(content, "print \"precious\"\n");
}

#[test]
fn test_workspace_new_list_and_run() {
    let temp_dir = create_temp_dir();

    let created = theta(temp_dir.path(), &["--new", "src/main.tc"]);
    assert!(created.status.success());
    assert!(String::from_utf8_lossy(&created.stdout).contains("Created src/main.tc"));

    let listed = theta(temp_dir.path(), &["--list"]);
    assert!(listed.status.success());
    let stdout = String::from_utf8_lossy(&listed.stdout);
    assert!(stdout.contains("workspace"));
    assert!(stdout.contains("src"));
    assert!(stdout.contains("main.tc"));

    fs::write(
        temp_dir.path().join("ws/src/main.tc"),
        "print \"from the workspace\"\n",
    )
    .unwrap();
    let run = theta(temp_dir.path(), &["src/main.tc"]);
    assert!(run.status.success());
    assert!(String::from_utf8_lossy(&run.stdout).contains("from the workspace"));
}

#[test]
fn test_disk_file_takes_precedence_over_workspace() {
    let temp_dir = create_temp_dir();
    fs::create_dir_all(temp_dir.path().join("ws")).unwrap();
    fs::write(temp_dir.path().join("ws/bots.tc"), "print \"From workspace\"\n").unwrap();
    create_program(temp_dir.path(), "bots.tc", "print \"From disk\"\n");

    let output = theta(temp_dir.path(), &["bots.tc"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("From disk"));
    assert!(!stdout.contains("From workspace"));
}

#[test]
fn test_delete_all() {
    let temp_dir = create_temp_dir();
    assert!(theta(temp_dir.path(), &["--new", "a.tc"]).status.success());

    let output = theta(temp_dir.path(), &["--delete-all"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("All files deleted successfully"));
    assert!(!temp_dir.path().join("ws/a.tc").exists());
}

#[test]
fn test_new_rejects_parent_paths() {
    let temp_dir = create_temp_dir();
    let output = theta(temp_dir.path(), &["--new", "../escape.tc"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid path"));
}

#[test]
fn test_repl_buffer_run() {
    use std::io::Write;
    use std::process::Stdio;

    let temp_dir = create_temp_dir();
    let mut child = Command::new(get_binary_path())
        .current_dir(temp_dir.path())
        .env("THETA_WORKSPACE", temp_dir.path().join("ws"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn shell");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(
            b"create bot \"Echo\" platform \"slack\"\nprint \"hi\"\n.run\n.save saved.tc\nexit\n",
        )
        .unwrap();

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created slack bot: Echo"));
    assert!(stdout.contains("hi"));
    assert!(stdout.contains("Goodbye!"));

    let saved = fs::read_to_string(temp_dir.path().join("ws/saved.tc")).unwrap();
    assert_eq!(saved, "create bot \"Echo\" platform \"slack\"\nprint \"hi\"\n");
}
