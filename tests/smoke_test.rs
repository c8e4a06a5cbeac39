/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

fn termbonsai(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_termbonsai"))
        .args(args)
        .output()
        .expect("Failed to execute termbonsai")
}

#[test]
fn binary_shows_help() {
    let output = termbonsai(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("termbonsai"),
        "Help output should mention termbonsai"
    );
}

#[test]
fn binary_shows_version() {
    let output = termbonsai(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = termbonsai(&["nonexistent-command"]);

    // Should fail with error, not panic
    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn print_mode_emits_requested_grid() {
    let output = termbonsai(&["grow", "--print", "--no-color", "-W", "60", "-H", "25", "--seed", "7"]);

    assert!(
        output.status.success(),
        "grow --print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 25);
    assert!(rows.iter().all(|r| r.chars().count() == 60));
}

#[test]
fn print_mode_is_reproducible() {
    let args = ["grow", "--print", "--no-color", "-W", "80", "-H", "30", "--seed", "42"];
    let first = termbonsai(&args);
    let second = termbonsai(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn too_small_canvas_is_rejected() {
    let output = termbonsai(&["grow", "--print", "-W", "5", "-H", "5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("InvalidDimensions"));
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn palette_lists_colours() {
    let output = termbonsai(&["palette", "--no-color"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().all(|l| l.contains('#')));
}
