//! Input records
//!
//! One struct per CSV export. Column names match the export headers exactly;
//! empty cells become `None` and columns missing from a particular export
//! fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// List cells
// ============================================================================

/// Split a list-valued cell into its items.
///
/// Exports write multi-select columns as `["Training", "Support"]`; hand-edited
/// sheets use `Training, Support`. Both forms (and the bracketed form without
/// quotes) produce the same trimmed items.
pub fn parse_list_cell(cell: &str) -> Vec<String> {
    let inner = cell.trim().trim_start_matches('[').trim_end_matches(']');
    inner
        .split(',')
        .map(|item| item.replace(['"', '\''], "").trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn list_cell<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?;
    Ok(cell.as_deref().map(parse_list_cell).unwrap_or_default())
}

// ============================================================================
// Project records
// ============================================================================

/// One row of the project export
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Primary Owner")]
    pub primary_owner: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Staging")]
    pub staging: Option<String>,
    #[serde(rename = "Priority")]
    pub priority: Option<String>,
    #[serde(rename = "Objective")]
    pub objective: Option<String>,
    #[serde(rename = "Impacted Teams", deserialize_with = "list_cell")]
    pub impacted_teams: Vec<String>,
    #[serde(rename = "Project Summary")]
    pub project_summary: Option<String>,
    /// HTML rich text
    #[serde(rename = "Project Updates")]
    pub project_updates: Option<String>,
    /// HTML rich text
    #[serde(rename = "Project Actions")]
    pub project_actions: Option<String>,
    #[serde(rename = "Closure Comments")]
    pub closure_comments: Option<String>,
}

impl ProjectRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.primary_owner = Some(owner.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn staging(mut self, staging: impl Into<String>) -> Self {
        self.staging = Some(staging.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn impacts(mut self, team: impl Into<String>) -> Self {
        self.impacted_teams.push(team.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.project_summary = Some(summary.into());
        self
    }

    pub fn closure_comments(mut self, comments: impl Into<String>) -> Self {
        self.closure_comments = Some(comments.into());
        self
    }

    pub fn is_blocked(&self) -> bool {
        self.status.as_deref() == Some("Blocked")
    }
}

// ============================================================================
// Document records
// ============================================================================

/// One row of the document change log
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecord {
    #[serde(rename = "Doc Reference")]
    pub doc_reference: Option<String>,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Primary Owner")]
    pub primary_owner: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Release Group")]
    pub release_group: Option<String>,
    /// HTML rich text
    #[serde(rename = "Release Text")]
    pub release_text: Option<String>,
    #[serde(rename = "Release Forecast")]
    pub release_forecast: Option<String>,
    #[serde(rename = "Impact", deserialize_with = "list_cell")]
    pub impact: Vec<String>,
    #[serde(rename = "Impacted Teams", deserialize_with = "list_cell")]
    pub impacted_teams: Vec<String>,
}

impl DocumentRecord {
    pub fn new(doc_reference: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            doc_reference: Some(doc_reference.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.primary_owner = Some(owner.into());
        self
    }

    pub fn release_group(mut self, group: impl Into<String>) -> Self {
        self.release_group = Some(group.into());
        self
    }

    pub fn release_text(mut self, text: impl Into<String>) -> Self {
        self.release_text = Some(text.into());
        self
    }

    pub fn release_forecast(mut self, forecast: impl Into<String>) -> Self {
        self.release_forecast = Some(forecast.into());
        self
    }

    pub fn impact(mut self, impact: impl Into<String>) -> Self {
        self.impact.push(impact.into());
        self
    }

    pub fn impacts(mut self, team: impl Into<String>) -> Self {
        self.impacted_teams.push(team.into());
        self
    }

    /// New documents carry a `NEW` suffix instead of an issue number
    pub fn is_new(&self) -> bool {
        self.doc_reference
            .as_deref()
            .is_some_and(|reference| reference.ends_with("NEW"))
    }
}

// ============================================================================
// Ticket records
// ============================================================================

/// One row of the support ticket export
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketRecord {
    #[serde(rename = "Ticket ID")]
    pub ticket_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "AssignedTo")]
    pub assigned_to: Option<String>,
    #[serde(rename = "Status")]
    pub status: Option<String>,
    #[serde(rename = "Created")]
    pub created: Option<String>,
}

impl TicketRecord {
    pub fn new(ticket_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn assigned_to(mut self, person: impl Into<String>) -> Self {
        self.assigned_to = Some(person.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Closed and resolved tickets no longer age
    pub fn is_open(&self) -> bool {
        !matches!(self.status.as_deref(), Some("Closed" | "Resolved"))
    }
}

// ============================================================================
// Enumerated text representations
// ============================================================================

/// Progress bar glyphs for a project staging value
pub fn staging_text(staging: Option<&str>) -> &'static str {
    match staging {
        Some("Triage") => "▰▱▱▱▱",
        Some("Analysis") => "▰▰▱▱▱",
        Some("Alpha Test") => "▰▰▰▱▱",
        Some("Beta Test") => "▰▰▰▰▱",
        Some("Roll-out") => "▰▰▰▰▰",
        _ => "-----",
    }
}

/// Priority label with its marker glyph
pub fn priority_text(priority: Option<&str>) -> &'static str {
    match priority {
        Some("P1" | "P1 🔥") => "P1 🔥",
        Some("P2") => "P2 🚨",
        Some("P3") => "P3 ⭐",
        Some("P4") => "P4 🐢",
        Some("P5") => "P5 🐌",
        _ => "unknown",
    }
}

/// Single-letter code for a commercial impact category
pub fn impact_symbol(impact: &str) -> &'static str {
    match impact {
        "BDUK" => "A",
        "New Product" => "B",
        "Change of Method" => "C",
        "Change to Time Taken" => "D",
        "Change to Materials" => "E",
        _ => "UNKNOWN",
    }
}

/// `Name: Code` pairs for every listed impact, joined with commas
pub fn impact_symbols(impacts: &[String]) -> String {
    impacts
        .iter()
        .map(|impact| format!("{}: {}", impact, impact_symbol(impact)))
        .collect::<Vec<_>>()
        .join(", ")
}
