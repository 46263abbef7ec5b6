//! Loading exports from disk

use std::io::Write;

use deckgen_parser::{load_dataset, FileKind, ParseError};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

fn write_export(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_project_export_with_bom() {
    let file = write_export(
        b"\xef\xbb\xbfTitle,Primary Owner,Status,Impacted Teams,Project Updates,Unused Column\n\
          Fibre Trial,Ada Lovelace,Open,\"[\"\"Training\"\"]\",<p>Booked</p>,x\n",
    );
    let dataset = load_dataset(file.path()).unwrap();
    assert_eq!(dataset.kind(), FileKind::Projects);

    let projects = dataset.into_projects().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Fibre Trial");
    assert_eq!(projects[0].impacted_teams, vec!["Training"]);
    assert_eq!(projects[0].project_updates.as_deref(), Some("<p>Booked</p>"));
}

#[test]
fn loads_ticket_export() {
    let file = write_export(
        b"Ticket ID,Title,AssignedTo,Status,Created\n\
          T-1,Login fails,Ada,Open,04/03/2024 08:00\n\
          T-2,VPN drops,,Closed,05/03/2024\n",
    );
    let tickets = load_dataset(file.path()).unwrap().into_tickets().unwrap();
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].assigned_to.as_deref(), Some("Ada"));
    assert_eq!(tickets[1].assigned_to, None);
    assert!(!tickets[1].is_open());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = load_dataset(&path).unwrap_err();

    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn unknown_export_is_rejected() {
    let file = write_export(b"Name,Age\nAda,36\n");
    let err = load_dataset(file.path()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown file type: columns [Name, Age] do not match a project, document or ticket export"
    );
}
