//! # deckgen-parser
//!
//! Readers for the CSV exports deckgen consumes.
//!
//! This crate provides:
//! - Typed CSV loading for project, document and ticket exports
//! - Export kind detection from the header row
//! - HTML rich-text cleanup (`html_to_text`)
//! - Day-first timestamp parsing (`parse_timestamp`)
//!
//! ## Example
//!
//! ```rust
//! use deckgen_parser::{detect_kind, read_projects, FileKind};
//!
//! let input = "Title,Primary Owner,Status,Project Updates\nFibre Trial,Ada,Open,\n";
//!
//! let headers = deckgen_parser::read_headers(input.as_bytes()).unwrap();
//! assert_eq!(detect_kind(&headers).unwrap(), FileKind::Projects);
//!
//! let projects = read_projects(input.as_bytes()).unwrap();
//! assert_eq!(projects[0].title, "Fibre Trial");
//! ```

pub mod dates;
pub mod html;

pub use dates::parse_timestamp;
pub use html::html_to_text;

use std::io::Read;
use std::path::{Path, PathBuf};

use deckgen_core::{DocumentRecord, ProjectRecord, TicketRecord};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on line {line}: {message}")]
    Csv { line: u64, message: String },

    #[error("Unknown file type: columns [{}] do not match a project, document or ticket export", .0.join(", "))]
    UnknownKind(Vec<String>),

    #[error("Expected a {expected} export but found a {found} export")]
    WrongKind { expected: FileKind, found: FileKind },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        ParseError::Csv {
            line,
            message: err.to_string(),
        }
    }
}

/// Kinds of export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Project tracker export (has a `Project Updates` column)
    Projects,
    /// Document change log (has a `Doc Reference` column)
    Documents,
    /// Support tickets (has an `AssignedTo` column)
    Tickets,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Projects => "project",
            FileKind::Documents => "document",
            FileKind::Tickets => "ticket",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identify an export from its header row
pub fn detect_kind<S: AsRef<str>>(headers: &[S]) -> Result<FileKind, ParseError> {
    let has = |name: &str| headers.iter().any(|h| h.as_ref().trim() == name);
    if has("Project Updates") {
        Ok(FileKind::Projects)
    } else if has("Doc Reference") {
        Ok(FileKind::Documents)
    } else if has("AssignedTo") {
        Ok(FileKind::Tickets)
    } else {
        Err(ParseError::UnknownKind(
            headers.iter().map(|h| h.as_ref().to_string()).collect(),
        ))
    }
}

/// Read only the header row
pub fn read_headers<R: Read>(reader: R) -> Result<Vec<String>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = csv_reader.headers()?;
    Ok(headers
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect())
}

fn read_records<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Parse a project export
pub fn read_projects<R: Read>(reader: R) -> Result<Vec<ProjectRecord>, ParseError> {
    read_records(reader)
}

/// Parse a document change log
pub fn read_documents<R: Read>(reader: R) -> Result<Vec<DocumentRecord>, ParseError> {
    read_records(reader)
}

/// Parse a ticket export
pub fn read_tickets<R: Read>(reader: R) -> Result<Vec<TicketRecord>, ParseError> {
    read_records(reader)
}

/// Records of any supported export
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Projects(Vec<ProjectRecord>),
    Documents(Vec<DocumentRecord>),
    Tickets(Vec<TicketRecord>),
}

impl Dataset {
    pub fn kind(&self) -> FileKind {
        match self {
            Dataset::Projects(_) => FileKind::Projects,
            Dataset::Documents(_) => FileKind::Documents,
            Dataset::Tickets(_) => FileKind::Tickets,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Projects(rows) => rows.len(),
            Dataset::Documents(rows) => rows.len(),
            Dataset::Tickets(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_projects(self) -> Result<Vec<ProjectRecord>, ParseError> {
        match self {
            Dataset::Projects(rows) => Ok(rows),
            other => Err(ParseError::WrongKind {
                expected: FileKind::Projects,
                found: other.kind(),
            }),
        }
    }

    pub fn into_documents(self) -> Result<Vec<DocumentRecord>, ParseError> {
        match self {
            Dataset::Documents(rows) => Ok(rows),
            other => Err(ParseError::WrongKind {
                expected: FileKind::Documents,
                found: other.kind(),
            }),
        }
    }

    pub fn into_tickets(self) -> Result<Vec<TicketRecord>, ParseError> {
        match self {
            Dataset::Tickets(rows) => Ok(rows),
            other => Err(ParseError::WrongKind {
                expected: FileKind::Tickets,
                found: other.kind(),
            }),
        }
    }
}

/// Parse an in-memory export, detecting its kind
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset, ParseError> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let headers = read_headers(bytes)?;
    let kind = detect_kind(&headers)?;
    let dataset = match kind {
        FileKind::Projects => Dataset::Projects(read_projects(bytes)?),
        FileKind::Documents => Dataset::Documents(read_documents(bytes)?),
        FileKind::Tickets => Dataset::Tickets(read_tickets(bytes)?),
    };
    debug!(kind = %kind, rows = dataset.len(), "parsed export");
    Ok(dataset)
}

/// Load an export from disk, detecting its kind
pub fn load_dataset(path: &Path) -> Result<Dataset, ParseError> {
    let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(&bytes)
}
