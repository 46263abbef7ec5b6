//! Report catalogue
//!
//! Every report the tool offers, what input it reads and how its sections
//! are composed. A report produces one or more [`ReportOutput`]s, each
//! saved as its own file.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use deckgen_core::{AssigneeAges, Deck, DocumentRecord, ProjectRecord, TicketRecord};
use deckgen_parser::{Dataset, FileKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::filter::unique_impacted_teams;
use crate::sections::{GroupFilter, SectionBuilder};
use crate::ReportError;

/// Names and people the catalogue needs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// People who each get an `engineering` deck
    pub engineers: Vec<String>,
    /// Team leads, also included in `engineering`
    pub team_leads: Vec<String>,
    /// Report type of project decks
    pub project_report: String,
    /// Report type of release boards
    pub document_report: String,
    /// Report type of the review board
    pub review_report: String,
    /// Report type of the ticket deck
    pub ticket_report: String,
    /// Alias → release groups shown together on one board
    pub release_groups: BTreeMap<String, Vec<String>>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        let mut release_groups = BTreeMap::new();
        release_groups.insert(
            "BDUK".to_string(),
            (1..=4).map(|p| format!("BDUK - P{}", p)).collect(),
        );
        Self {
            engineers: Vec::new(),
            team_leads: Vec::new(),
            project_report: "Project_Report".to_string(),
            document_report: "Document_Release".to_string(),
            review_report: "Project_Review_Report".to_string(),
            ticket_report: "Ticket_Report".to_string(),
            release_groups,
        }
    }
}

/// A report request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// One deck per configured engineer and team lead
    Engineering,
    /// Owner and objective slides for one person
    Who { name: String },
    /// One staging board deck per team (every team when none are named)
    Impact { teams: Vec<String> },
    /// Every team's staging board in one deck
    AllImpacted,
    OnHold,
    Objective,
    /// Detail slide per project
    Projects,
    /// Overview, owners, objectives, teams and on-hold projects
    All,
    /// New projects awaiting review
    Review,
    /// Release board grouped by release group
    Docs { group: Option<String> },
    /// Changes grouped by document
    Changes,
    /// Release board with commercial impacts and per-team reviews
    Release { group: Option<String>, internal: bool },
    /// Open tickets by assignee
    Tickets,
}

const PROJECT_REPORTS: [&str; 9] = [
    "engineering",
    "who",
    "impact",
    "allimpacted",
    "onhold",
    "objective",
    "projects",
    "all",
    "review",
];
const DOCUMENT_REPORTS: [&str; 3] = ["docs", "changes", "release"];
const TICKET_REPORTS: [&str; 1] = ["tickets"];

impl Report {
    pub fn name(&self) -> &'static str {
        match self {
            Report::Engineering => "engineering",
            Report::Who { .. } => "who",
            Report::Impact { .. } => "impact",
            Report::AllImpacted => "allimpacted",
            Report::OnHold => "onhold",
            Report::Objective => "objective",
            Report::Projects => "projects",
            Report::All => "all",
            Report::Review => "review",
            Report::Docs { .. } => "docs",
            Report::Changes => "changes",
            Report::Release { .. } => "release",
            Report::Tickets => "tickets",
        }
    }

    /// Export the report reads
    pub fn input(&self) -> FileKind {
        match self {
            Report::Docs { .. } | Report::Changes | Report::Release { .. } => FileKind::Documents,
            Report::Tickets => FileKind::Tickets,
            _ => FileKind::Projects,
        }
    }

    /// Names of the reports that can be built from an export
    pub fn available(kind: FileKind) -> &'static [&'static str] {
        match kind {
            FileKind::Projects => &PROJECT_REPORTS,
            FileKind::Documents => &DOCUMENT_REPORTS,
            FileKind::Tickets => &TICKET_REPORTS,
        }
    }
}

/// One deck ready to be written
#[derive(Clone, Debug, PartialEq)]
pub struct ReportOutput {
    pub report_type: String,
    /// Suffix after the report type, usually `_<filter>`
    pub modifier: String,
    pub deck: Deck,
    /// Ticket totals for the chart and workbook (ticket reports only)
    pub assignees: Vec<AssigneeAges>,
}

impl ReportOutput {
    pub fn new(report_type: impl Into<String>, modifier: impl Into<String>, deck: Deck) -> Self {
        Self {
            report_type: report_type.into(),
            modifier: modifier.into(),
            deck,
            assignees: Vec::new(),
        }
    }

    /// `{yymmdd}_{HHMM}_{report_type}{modifier}` with path separators in the
    /// modifier replaced by `-`
    pub fn file_stem(&self, at: NaiveDateTime) -> String {
        format!(
            "{}_{}{}",
            at.format("%y%m%d_%H%M"),
            self.report_type,
            self.modifier.replace(['/', '\\'], "-")
        )
    }

    pub fn file_name(&self, at: NaiveDateTime, extension: &str) -> String {
        format!("{}.{}", self.file_stem(at), extension)
    }
}

/// Builds reports from loaded exports
#[derive(Clone, Debug)]
pub struct Catalogue {
    settings: ReportSettings,
    sections: SectionBuilder,
}

impl Catalogue {
    pub fn new(settings: ReportSettings, sections: SectionBuilder) -> Self {
        Self { settings, sections }
    }

    pub fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// Build `report` from `dataset`, which must be the export it reads
    pub fn build(&self, report: &Report, dataset: Dataset) -> Result<Vec<ReportOutput>, ReportError> {
        if dataset.is_empty() {
            return Err(ReportError::Empty(dataset.kind()));
        }
        debug!(report = report.name(), rows = dataset.len(), "building report");

        match report.input() {
            FileKind::Documents => {
                let documents = dataset.into_documents()?;
                let rows: Vec<&DocumentRecord> = documents.iter().collect();
                self.document_report(report, &rows)
            }
            FileKind::Tickets => {
                let tickets = dataset.into_tickets()?;
                let rows: Vec<&TicketRecord> = tickets.iter().collect();
                self.ticket_report(report, &rows).map(|output| vec![output])
            }
            FileKind::Projects => {
                let projects = dataset.into_projects()?;
                let rows: Vec<&ProjectRecord> = projects.iter().collect();
                self.project_report(report, &rows)
            }
        }
    }

    fn project_output(&self, modifier: impl Into<String>, deck: Deck) -> ReportOutput {
        ReportOutput::new(self.settings.project_report.as_str(), modifier, deck)
    }

    fn person(&self, projects: &[&ProjectRecord], name: &str) -> ReportOutput {
        let mut deck = Deck::new();
        self.sections.owner_slides(&mut deck, projects, Some(name));
        self.sections.objective_slides(&mut deck, projects, Some(name));
        self.project_output(format!("_{}", name), deck)
    }

    fn project_report(&self, report: &Report, projects: &[&ProjectRecord]) -> Result<Vec<ReportOutput>, ReportError> {
        let sections = &self.sections;
        let teams = || unique_impacted_teams(projects.iter().copied());

        let outputs = match report {
            Report::Engineering => {
                let people = self.settings.engineers.iter().chain(&self.settings.team_leads);
                let outputs: Vec<ReportOutput> = people.map(|name| self.person(projects, name)).collect();
                if outputs.is_empty() {
                    warn!("no engineers or team leads configured");
                }
                outputs
            }
            Report::Who { name } => vec![self.person(projects, name)],
            Report::Impact { teams: named } => {
                let selected = if named.is_empty() { teams() } else { named.clone() };
                selected
                    .iter()
                    .map(|team| {
                        let mut deck = Deck::new();
                        sections.impacted_section(&mut deck, projects, team, false);
                        self.project_output(format!("_{}", team), deck)
                    })
                    .collect()
            }
            Report::AllImpacted => {
                let mut deck = Deck::new();
                for team in teams() {
                    sections.impacted_section(&mut deck, projects, &team, false);
                }
                vec![self.project_output("_AllImpacts", deck)]
            }
            Report::OnHold => {
                let mut deck = Deck::new();
                sections.on_hold_slides(&mut deck, projects, false);
                vec![self.project_output("_OnHold", deck)]
            }
            Report::Objective => {
                let mut deck = Deck::new();
                sections.objective_slides(&mut deck, projects, None);
                vec![self.project_output("_Objective", deck)]
            }
            Report::Projects => {
                let mut deck = Deck::new();
                sections.project_detail_section(&mut deck, projects, true);
                vec![self.project_output("_Projects", deck)]
            }
            Report::Review => {
                let mut deck = Deck::new();
                sections.new_projects_slides(&mut deck, projects);
                vec![ReportOutput::new(self.settings.review_report.as_str(), "", deck)]
            }
            Report::All => {
                let mut deck = Deck::new();
                sections.all_projects_slide(&mut deck, projects);
                sections.owner_slides(&mut deck, projects, None);
                sections.objective_slides(&mut deck, projects, None);
                sections.title_slide(&mut deck, "Impacted Teams");
                for team in teams() {
                    sections.impacted_section(&mut deck, projects, &team, false);
                }
                sections.on_hold_slides(&mut deck, projects, true);
                vec![self.project_output("", deck)]
            }
            Report::Docs { .. } | Report::Changes | Report::Release { .. } | Report::Tickets => {
                return Err(ReportError::Unsupported { report: report.name(), kind: FileKind::Projects });
            }
        };
        Ok(outputs)
    }

    fn document_report(&self, report: &Report, documents: &[&DocumentRecord]) -> Result<Vec<ReportOutput>, ReportError> {
        let sections = &self.sections;
        let mut deck = Deck::new();

        let outputs = match report {
            Report::Docs { group } => {
                let filter = group.as_deref().map_or(GroupFilter::All, GroupFilter::single);
                sections.document_release_section(&mut deck, documents, &filter, false);
                vec![self.project_output("_DocumentBoard", deck)]
            }
            Report::Release { group, internal } => {
                let internal = *internal;
                let alias = group.as_ref().and_then(|g| self.settings.release_groups.get(g));

                let (filter, mut modifier, commercial) = match (group, alias) {
                    (_, Some(groups)) => {
                        (GroupFilter::Exactly(groups.clone()), format!("_{}", groups.join("And")), false)
                    }
                    (Some(group), None) => (GroupFilter::single(group.as_str()), format!("_{}", group), true),
                    (None, None) => (GroupFilter::All, "_FullReleaseBoard".to_string(), true),
                };
                if internal {
                    modifier.push_str("_internal");
                }

                let selected = filter.apply(documents);
                let label = filter.label();
                sections.document_release_section(&mut deck, &selected, &GroupFilter::All, internal);
                if commercial {
                    sections.commercial_impacts_section(&mut deck, &selected, label.as_deref().unwrap_or(""));
                }
                if !internal {
                    for team in unique_impacted_teams(selected.iter().copied()) {
                        sections.document_impacted_section(&mut deck, &selected, &team, label.as_deref(), internal);
                    }
                }
                vec![ReportOutput::new(self.settings.document_report.as_str(), modifier, deck)]
            }
            Report::Changes => {
                sections.document_changes_section(&mut deck, documents);
                vec![self.project_output("_DocumentChanges", deck)]
            }
            _ => return Err(ReportError::Unsupported { report: report.name(), kind: FileKind::Documents }),
        };
        Ok(outputs)
    }

    fn ticket_report(&self, report: &Report, tickets: &[&TicketRecord]) -> Result<ReportOutput, ReportError> {
        if *report != Report::Tickets {
            return Err(ReportError::Unsupported { report: report.name(), kind: FileKind::Tickets });
        }
        let mut deck = Deck::new();
        let assignees = self.sections.ticket_section(&mut deck, tickets);
        let mut output = ReportOutput::new(self.settings.ticket_report.as_str(), "", deck);
        output.assignees = assignees;
        Ok(output)
    }
}
