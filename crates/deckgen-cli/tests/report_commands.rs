//! Report and inspect commands run against exports in a temporary folder

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

const PROJECTS: &str = "\
Title,Primary Owner,Status,Staging,Priority,Objective,Impacted Teams,Project Summary,Project Updates,Project Actions,Closure Comments
Fibre Trial,Ada Lovelace,Open,Triage,P2,Cost,\"[\"\"Training\"\"]\",Trial new fibre,<p>Survey booked.</p>,,
Pole Survey,Ada Lovelace,On Hold,Roll-out,P1,Safety,\"[\"\"Training\"\"]\",Paused for winter,,,
";

const TICKETS: &str = "\
Ticket ID,Title,AssignedTo,Status,Created
T-1,Login fails,Ada,Open,04/03/2024 08:00
T-2,VPN drops,Bob,Open,05/03/2024
T-3,Printer jam,Ada,Closed,01/03/2024
";

const DOCUMENTS: &str = "\
Doc Reference,Title,Status,Release Group,Release Text
SP-1,Cabinet install,Published,June,New cabinet guide
";

fn deckgen(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deckgen"));
    command
        .current_dir(dir)
        .env_remove("DECKGEN_CONFIG")
        .env_remove("RUST_LOG");
    command
}

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("raw")).unwrap();
    fs::write(dir.path().join("raw/PROJECT.csv"), PROJECTS).unwrap();
    fs::write(dir.path().join("raw/TICKETS.csv"), TICKETS).unwrap();
    fs::write(dir.path().join("raw/DOC.csv"), DOCUMENTS).unwrap();
    dir
}

fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == extension))
        .collect();
    files.sort();
    files
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn inspect_describes_export() {
    let dir = workspace();
    let output = deckgen(dir.path()).args(["inspect", "raw/PROJECT.csv"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Type: project export"));
    assert!(text.contains("Rows: 2"));
    assert!(text.contains("Reports: engineering, who, impact"));
}

#[test]
fn inspect_rejects_unknown_export() {
    let dir = workspace();
    fs::write(dir.path().join("people.csv"), "Name,Age\nAda,36\n").unwrap();

    let output = deckgen(dir.path()).args(["inspect", "people.csv"]).output().unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown file type"));
}

#[test]
fn projects_report_writes_pptx() {
    let dir = workspace();
    let output = deckgen(dir.path()).arg("onhold").output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Created:"));

    let decks = files_with_extension(&dir.path().join("output"), "pptx");
    assert_eq!(decks.len(), 1);
    let name = decks[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_Project_Report_OnHold.pptx"), "{}", name);

    let bytes = fs::read(&decks[0]).unwrap();
    assert_eq!(&bytes[0..2], b"PK");
}

#[test]
fn output_dir_flag_overrides_config() {
    let dir = workspace();
    let output = deckgen(dir.path())
        .args(["projects", "--output-dir", "decks"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(files_with_extension(&dir.path().join("decks"), "pptx").len(), 1);
    assert!(!dir.path().join("output").exists());
}

#[test]
fn dry_run_prints_outline() {
    let dir = workspace();
    let output = deckgen(dir.path()).args(["onhold", "--dry-run"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("# Deck outline"));
    assert!(text.contains("On-Hold Projects - 1"));
    assert!(text.contains("Pole Survey"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn deck_without_slides_is_skipped() {
    let dir = workspace();
    let output = deckgen(dir.path()).args(["docs", "--group", "December"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("no slides, skipped"));
    assert_eq!(files_with_extension(&dir.path().join("output"), "pptx"), Vec::<PathBuf>::new());

    let output = deckgen(dir.path())
        .args(["docs", "--group", "December", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("no slides, skipped"));
    assert_eq!(stdout(&output), "");
}

#[test]
fn config_file_moves_inputs() {
    let dir = workspace();
    fs::create_dir(dir.path().join("exports")).unwrap();
    fs::rename(dir.path().join("raw/PROJECT.csv"), dir.path().join("exports/projects.csv")).unwrap();
    fs::write(
        dir.path().join("deckgen.toml"),
        "[paths]\nproject_csv = \"exports/projects.csv\"\noutput_dir = \"out\"\n",
    )
    .unwrap();

    let output = deckgen(dir.path()).args(["who", "Ada"]).output().unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(files_with_extension(&dir.path().join("out"), "pptx").len(), 1);
}

#[test]
fn tickets_with_chart_and_workbook() {
    let dir = workspace();
    let output = deckgen(dir.path())
        .args(["tickets", "--chart", "--workbook"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let out = dir.path().join("output");
    assert_eq!(files_with_extension(&out, "pptx").len(), 1);
    assert_eq!(files_with_extension(&out, "xlsx").len(), 1);

    let charts = files_with_extension(&out, "svg");
    assert_eq!(charts.len(), 1);
    let svg = fs::read_to_string(&charts[0]).unwrap();
    assert!(svg.contains("Ada"));
    assert!(svg.contains("Bob"));
}

#[test]
fn wrong_export_kind_fails() {
    let dir = workspace();
    let output = deckgen(dir.path())
        .args(["tickets", "--input", "raw/PROJECT.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Expected a ticket export"), "{}", stderr(&output));
}

#[test]
fn missing_template_fails() {
    let dir = workspace();
    let output = deckgen(dir.path())
        .args(["all", "--template", "templates/corp.pptx"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(stderr(&output).contains("corp.pptx"));
}

#[test]
fn inspect_as_json() {
    let dir = workspace();
    let output = deckgen(dir.path())
        .args(["inspect", "raw/TICKETS.csv", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("\"type\": \"ticket\""));
    assert!(text.contains("\"rows\": 3"));
    assert!(text.contains("\"reports\": [\n    \"tickets\"\n  ]"));
}
