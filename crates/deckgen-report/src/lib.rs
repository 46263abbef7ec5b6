//! # deckgen-report
//!
//! Turns loaded exports into slide decks.
//!
//! This crate provides:
//! - Row filters and grouping (`filter`, `group`)
//! - Grid placement and pagination (`layout`)
//! - Button contents for every card kind (`text`)
//! - Section builders (`sections`)
//! - The report catalogue and output naming (`catalogue`)
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use deckgen_core::{ProjectRecord, SlideSize};
//! use deckgen_parser::Dataset;
//! use deckgen_report::{Catalogue, Report, ReportSettings, SectionBuilder};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap().and_hms_opt(9, 30, 0).unwrap();
//! let catalogue = Catalogue::new(ReportSettings::default(), SectionBuilder::new(SlideSize::default(), now));
//!
//! let projects = vec![ProjectRecord::new("Fibre Trial").owner("Ada").status("On Hold")];
//! let outputs = catalogue.build(&Report::OnHold, Dataset::Projects(projects)).unwrap();
//!
//! assert_eq!(outputs[0].deck.titles(), vec!["On-Hold Projects - 1"]);
//! assert_eq!(outputs[0].file_name(now, "pptx"), "240308_0930_Project_Report_OnHold.pptx");
//! ```

pub mod catalogue;
pub mod filter;
pub mod group;
pub mod layout;
pub mod sections;
pub mod text;

pub use catalogue::{Catalogue, Report, ReportOutput, ReportSettings};
pub use layout::{Cell, Grid, StagingBoard};
pub use sections::{GroupFilter, SectionBuilder};
pub use text::{DocumentCard, ProjectCard};

use deckgen_parser::{FileKind, ParseError};
use thiserror::Error;

/// Report building error
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Input(#[from] ParseError),

    #[error("The {0} export has no rows")]
    Empty(FileKind),

    #[error("The {report} report is not built from a {kind} export")]
    Unsupported { report: &'static str, kind: FileKind },
}
