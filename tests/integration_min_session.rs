// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::io::Write;
use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn minimal_session_plays_a_guess_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let catalog = dir.path().join("one.json");
    std::fs::File::create(&catalog)?
        .write_all(r#"{"name": "one", "entries": [["🐝", "bee"]]}"#.as_bytes())?;
    let log = dir.path().join("bees.log");

    let bin = assert_cmd::cargo::cargo_bin("spelling-bees");
    let cmd = format!(
        "{} --catalog {} --no-celebrate --log-file {}",
        bin.display(),
        catalog.display(),
        log.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    p.send("bee\r")?;
    std::thread::sleep(Duration::from_millis(200));

    // Esc quits from any screen
    p.send("\x1b")?;
    p.expect(Eof)?;
    Ok(())
}
