//! Button contents
//!
//! Each card kind turns one record into a [`Cell`]: the status that colours
//! the button and its text, one item per line. Missing cells print as empty
//! strings.

use deckgen_core::{
    impact_symbols, priority_text, staging_text, AssigneeAges, DocumentRecord, ProjectRecord, TicketRecord,
};
use deckgen_parser::html_to_text;

use crate::layout::Cell;

fn cell(value: Option<&String>) -> &str {
    value.map_or("", String::as_str)
}

fn status(project: &ProjectRecord) -> String {
    project.status.clone().unwrap_or_default()
}

// ============================================================================
// Project cards
// ============================================================================

/// Project card kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectCard {
    /// Owner grids: objective, staging, priority, blocking comments
    Owner,
    /// Objective grids and the review board: owner, staging, priority
    Objective,
    /// Staging board: staging only
    Impact,
    /// On-hold grid: owner, staging, summary
    OnHold,
    /// All-projects overview: title only
    TitleOnly,
}

impl ProjectCard {
    pub fn cell(self, project: &ProjectRecord) -> Cell {
        let title = &project.title;
        let staging = staging_text(project.staging.as_deref());
        let owner = cell(project.primary_owner.as_ref());

        let text = match self {
            ProjectCard::Owner => {
                let mut text = format!(
                    "{}\nObjective: {}\nStaging: {}\nPriority: {}",
                    title,
                    cell(project.objective.as_ref()),
                    staging,
                    priority_text(project.priority.as_deref()),
                );
                if project.is_blocked() {
                    text.push_str(&format!("\nBlocked: {}", cell(project.closure_comments.as_ref())));
                }
                text
            }
            ProjectCard::Objective => format!(
                "{}\nOwner: {}\nStaging: {}\n{}",
                title,
                owner,
                staging,
                priority_text(project.priority.as_deref()),
            ),
            ProjectCard::Impact => format!("{}\nStaging: {}", title, staging),
            ProjectCard::OnHold => format!(
                "{}\nOwner: {}\nStaging: {}\nProject Summary: {}",
                title,
                owner,
                staging,
                cell(project.project_summary.as_ref()),
            ),
            ProjectCard::TitleOnly => title.clone(),
        };

        Cell::new(status(project), text)
    }
}

// ============================================================================
// Document cards
// ============================================================================

/// Release board card kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentCard {
    New,
    Update,
    ReleaseImpact,
    Changes,
}

impl DocumentCard {
    /// Key of the board heading for this kind
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentCard::New => "new",
            DocumentCard::Update => "update",
            DocumentCard::ReleaseImpact => "release_impact",
            DocumentCard::Changes => "changes",
        }
    }

    /// Build the card. Internal boards show each document's status and owner
    /// and colour the card by status; public boards use the plain style fill.
    /// Change cards are always coloured by status.
    pub fn cell(self, document: &DocumentRecord, internal: bool) -> Cell {
        let reference = cell(document.doc_reference.as_ref());
        let title = &document.title;
        let detail = document
            .release_text
            .as_deref()
            .map(html_to_text)
            .unwrap_or_default();
        let doc_status = document.status.clone().unwrap_or_default();

        let text = match self {
            DocumentCard::New | DocumentCard::Update => {
                let mut text = format!("Document: {}", reference);
                if internal {
                    text.push_str(&format!("   ||   Status: {}", doc_status));
                    text.push_str(&format!("\nOwner: {}", cell(document.primary_owner.as_ref())));
                }
                let label = if self == DocumentCard::New { "Summary" } else { "Changes" };
                text.push_str(&format!("\nTitle: {}\n{}: {}", title, label, detail));
                text
            }
            DocumentCard::ReleaseImpact => format!(
                "Document(s): {}\nChange Title: {}\nSummary of Changes: {}",
                reference, title, detail
            ),
            DocumentCard::Changes => format!(
                "Document: {}   ||   Impact: {}\nTitle: {}\nDetail: {}",
                reference,
                impact_symbols(&document.impact),
                title,
                detail
            ),
        };

        let fill_status = if internal || self == DocumentCard::Changes {
            document.status.clone().unwrap_or_else(|| MISSING_STATUS.to_string())
        } else {
            String::new()
        };
        Cell::new(fill_status, text)
    }
}

/// Fill status of a document without one; not in any colour table, so it
/// takes the unknown-status fill
const MISSING_STATUS: &str = "Unknown";

// ============================================================================
// Ticket cards
// ============================================================================

/// One ticket with its ages
pub fn ticket_cell(ticket: &TicketRecord, business_days: i64, total_days: i64) -> Cell {
    Cell::new(
        "",
        format!(
            "{}: {}\nAge: {} business days ({} days)",
            ticket.ticket_id, ticket.title, business_days, total_days
        ),
    )
}

/// Summary card of one assignee's open tickets
pub fn assignee_cell(ages: &AssigneeAges) -> Cell {
    Cell::new(
        "",
        format!(
            "{}\nOpen tickets: {}\nTotal age: {} business days\nOldest: {} business days",
            ages.assignee, ages.tickets, ages.business_days, ages.oldest_business_days
        ),
    )
}
