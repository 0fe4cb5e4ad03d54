// Copyright (c) The itspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests
//!
//! These run the app in-process against the event streams in `fixtures/`, capturing stdout
//! through [`OutputWriter::Test`].

use crate::{CargoItspecApp, ExpectedError, OutputWriter};
use camino::Utf8PathBuf;
use camino_tempfile::Utf8TempDir;
use clap::Parser;
use indoc::indoc;
use itspec_metadata::ItspecExitCode;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

struct RunOutput {
    exit_code: i32,
    stdout: String,
}

fn try_run(args: &[&str]) -> Result<RunOutput, ExpectedError> {
    let app = CargoItspecApp::try_parse_from(
        ["cargo", "itspec", "run"]
            .into_iter()
            .chain(args.iter().copied()),
    )
    .expect("args are valid");
    let output = app.output_context();

    let mut writer = OutputWriter::new_test();
    let exit_code = app.exec(output, &mut writer)?;
    let stdout = writer.stdout().expect("test writer captures stdout").to_vec();

    Ok(RunOutput {
        exit_code,
        stdout: String::from_utf8(stdout).expect("stdout is valid UTF-8"),
    })
}

fn run(args: &[&str]) -> RunOutput {
    match try_run(args) {
        Ok(output) => output,
        Err(error) => panic!("itspec failed: {error:?}"),
    }
}

#[test]
fn spec_session() {
    let session = fixture("session.jsonl");
    let output = run(&["--it-no-color", session.as_str()]);

    assert_eq!(
        output.stdout.lines().collect::<Vec<_>>(),
        [
            "",
            "* tests/test_foo.py... ",
            "- Describe: A basic foo...",
            "",
            "  - Context: When called with no arguments...",
            "",
            "    - ...and also in another circumstance...",
            "      - ✓ It: Does something",
            "      - F It: Does something else",
            "",
            "  - s It: Skips quietly",
            "",
            "* tests/test_x.py... ",
            "- ✓ test_x[a] - [a]",
            "",
            "2 passed, 1 failed, 1 skipped, 1 error",
        ]
    );
    assert_eq!(output.exit_code, ItspecExitCode::TESTS_FAILED);
}

#[test]
fn spec_collect_only() {
    let collect = fixture("collect.jsonl");
    let output = run(&["--it-no-color", collect.as_str()]);

    assert_eq!(
        output.stdout,
        indoc! {"

            - Describe: A basic foo...

              - Context: When called with no arguments...

                - ...and also in another circumstance...
                  - It: Does something
                  - It: Does something else

              - It: Skips quietly

            - test_x[a] - [a]

            4 tests collected
        "}
    );
    assert_eq!(output.exit_code, ItspecExitCode::OK);
}

#[test]
fn collect_only_flag_overrides_stream() {
    let session = fixture("session.jsonl");
    let output = run(&["--it-no-color", "--collect-only", session.as_str()]);

    assert!(!output.stdout.contains("* tests/"), "{}", output.stdout);
    assert!(output.stdout.contains("  - It: Skips quietly\n"), "{}", output.stdout);
    assert!(!output.stdout.contains('✓'), "{}", output.stdout);
}

#[test]
fn line_session() {
    let session = fixture("session.jsonl");
    let output = run(&["--color", "never", session.as_str()]);

    assert_eq!(
        output.stdout,
        indoc! {"
                    PASS tests/test_foo.py::test_foo
                    FAIL tests/test_foo.py::test_bar
                    SKIP tests/test_foo.py::test_it_skips_quietly
                    PASS tests/test_x.py::test_x[a]

            2 passed, 1 failed, 1 skipped, 1 error
        "}
    );
    assert_eq!(output.exit_code, ItspecExitCode::TESTS_FAILED);
}

#[test]
fn colorized_spec_matches_uncolorized() {
    let session = fixture("session.jsonl");
    let colored = run(&["--it", "--color", "always", session.as_str()]);
    let plain = run(&["--it-no-color", "--color", "always", session.as_str()]);

    assert_ne!(colored.stdout, plain.stdout);
    assert_eq!(strip_ansi_escapes::strip_str(&colored.stdout), plain.stdout);
    assert_eq!(colored.exit_code, plain.exit_code);
}

#[test]
fn verbose_prefixes_paths() {
    let session = fixture("session.jsonl");
    let output = run(&["--it-no-color", "-v", session.as_str()]);

    assert!(
        output
            .stdout
            .contains("      - ✓ It: tests/test_foo.py::test_foo - Does something\n"),
        "{}",
        output.stdout
    );
}

#[test]
fn quiet_omits_file_headers() {
    let session = fixture("session.jsonl");
    let output = run(&["--it-no-color", "-q", session.as_str()]);

    assert!(
        output.stdout.lines().all(|line| !line.starts_with("* ")),
        "{}",
        output.stdout
    );
    assert!(output.stdout.contains("- Describe: A basic foo..."));
    assert!(
        output
            .stdout
            .ends_with("\n2 passed, 1 failed, 1 skipped, 1 error\n"),
        "{}",
        output.stdout
    );
}

#[test]
fn config_file_disables_headers_and_summary() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let config_file = dir.path().join("itspec.toml");
    std::fs::write(
        &config_file,
        indoc! {"
            [reporter]
            file-headers = false
            summary = false
        "},
    )
    .expect("wrote config");

    let session = fixture("session.jsonl");
    let output = run(&[
        "--it-no-color",
        "--config-file",
        config_file.as_str(),
        session.as_str(),
    ]);

    assert!(!output.stdout.contains("* tests/"), "{}", output.stdout);
    assert!(!output.stdout.contains("passed"), "{}", output.stdout);
    assert_eq!(output.exit_code, ItspecExitCode::TESTS_FAILED);
}

#[test]
fn malformed_items_do_not_stop_the_session() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let events = dir.path().join("events.jsonl");
    // The second item has no name, and the third line isn't a valid event at all.
    std::fs::write(
        &events,
        indoc! {r#"
            {"type": "test-report", "item": {"id": "m.py::test_a", "name": "test_a", "module": "m"}, "phase": "call", "outcome": "passed"}
            {"type": "test-report", "item": {"id": "m.py::TestB::test_b", "module": "m"}, "phase": "call", "outcome": "failed"}
            {"type": "test-report", "item": {"id": "m.py::test_x"
            {"type": "test-report", "item": {"id": "m.py::test_c", "name": "test_c", "module": "m"}, "phase": "call", "outcome": "passed"}
        "#},
    )
    .expect("wrote events");

    let output = run(&["--it-no-color", events.as_str()]);

    assert_eq!(
        output.stdout,
        indoc! {"

            - ✓ test_a
            - F test_b
            - ✓ test_c

            2 passed, 1 failed
        "}
    );
    assert_eq!(output.exit_code, ItspecExitCode::TESTS_FAILED);
}

#[test]
fn missing_events_file() {
    let error = match try_run(&["--it", "does-not-exist.jsonl"]) {
        Ok(_) => panic!("reading a missing file should fail"),
        Err(error) => error,
    };
    assert!(
        matches!(error, ExpectedError::EventsOpenError { .. }),
        "unexpected error: {error:?}"
    );
    assert_eq!(error.process_exit_code(), ItspecExitCode::USAGE_ERROR);
}

#[test]
fn invalid_config_file() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    let config_file = dir.path().join("itspec.toml");
    std::fs::write(
        &config_file,
        indoc! {r#"
            [reporter]
            implicit-it-prefixes = ["test_it_", ""]
        "#},
    )
    .expect("wrote config");

    let session = fixture("session.jsonl");
    let error = match try_run(&["--config-file", config_file.as_str(), session.as_str()]) {
        Ok(_) => panic!("an empty prefix should be rejected"),
        Err(error) => error,
    };
    assert_eq!(error.process_exit_code(), ItspecExitCode::USAGE_ERROR);
}
