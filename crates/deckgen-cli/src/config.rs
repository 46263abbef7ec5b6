//! `deckgen.toml` loading
//!
//! Relative paths in a config file are taken relative to the file itself, so
//! a reporting folder can be run from anywhere.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use deckgen_parser::FileKind;
use deckgen_render::LayoutMap;
use deckgen_report::ReportSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const CONFIG_FILE: &str = "deckgen.toml";

/// Input and output locations
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub project_csv: PathBuf,
    pub document_csv: PathBuf,
    pub ticket_csv: PathBuf,
    /// Corporate `.pptx` template; the built-in template when unset
    pub template: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            project_csv: PathBuf::from("raw/PROJECT.csv"),
            document_csv: PathBuf::from("raw/DOC.csv"),
            ticket_csv: PathBuf::from("raw/TICKETS.csv"),
            template: None,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Paths {
    pub fn export(&self, kind: FileKind) -> &Path {
        match kind {
            FileKind::Projects => &self.project_csv,
            FileKind::Documents => &self.document_csv,
            FileKind::Tickets => &self.ticket_csv,
        }
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.project_csv,
            &mut self.document_csv,
            &mut self.ticket_csv,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        if let Some(template) = self.template.as_mut().filter(|t| t.is_relative()) {
            *template = base.join(&*template);
        }
    }
}

/// Whole configuration file
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub reports: ReportSettings,
    /// Template layout positions; defaults depend on the template in use
    pub layouts: Option<LayoutMap>,
}

impl Config {
    /// Parse a config file's contents
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid configuration")
    }

    /// Load from `explicit` (flag or `DECKGEN_CONFIG`), else `./deckgen.toml`
    /// when present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if !local.exists() {
                    debug!("no {} found, using defaults", CONFIG_FILE);
                    return Ok(Self::default());
                }
                local
            }
        };

        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let mut config =
            Self::parse(&content).with_context(|| format!("Failed to load config {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.paths.rebase(base);
        }
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Starter configuration written by `deckgen init`
pub const STARTER: &str = r#"# deckgen configuration
#
# Paths are relative to this file.

[paths]
project_csv = "raw/PROJECT.csv"
document_csv = "raw/DOC.csv"
ticket_csv = "raw/TICKETS.csv"
output_dir = "output"
# Corporate template; the built-in template is used when unset
# template = "templates/_template.pptx"

[reports]
# Each person gets their own deck from `deckgen engineering`
engineers = []
team_leads = []
project_report = "Project_Report"
document_report = "Document_Release"
review_report = "Project_Review_Report"
ticket_report = "Ticket_Report"

[reports.release_groups]
BDUK = ["BDUK - P1", "BDUK - P2", "BDUK - P3", "BDUK - P4"]

# Layout positions in the corporate template (zero-based)
# [layouts]
# master = 1
# section = 3
# title_only = 5
# three_column = 6
# document_board = 7
# project_detail = 7
"#;
