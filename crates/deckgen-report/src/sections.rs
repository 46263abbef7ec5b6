//! Slide sections
//!
//! Each method appends one section of a report to a deck: an optional
//! divider slide followed by paginated grids. Reports in
//! [`catalogue`](crate::catalogue) are compositions of these sections.

use chrono::NaiveDateTime;
use deckgen_core::calendar::{business_days_age, total_age};
use deckgen_core::style::{document_board_heading, DOCUMENT_BOARD_TITLE};
use deckgen_core::{
    AssigneeAges, ButtonStyle, Deck, DocumentRecord, ProjectRecord, Slide, SlideLayout, SlideSize, StagingColumns,
    TicketRecord,
};
use deckgen_parser::{html_to_text, parse_timestamp};
use tracing::{debug, warn};

use crate::filter::{
    at_staging, impacting, in_release_groups, owned_by, with_status,
};
use crate::group::{group_by, group_by_or, missing_last, sort_by_key};
use crate::layout::{paginate, Cell, Grid, StagingBoard};
use crate::text::{assignee_cell, ticket_cell, DocumentCard, ProjectCard};

/// Which release groups a document section covers
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GroupFilter {
    /// Every document
    #[default]
    All,
    /// Release groups equal to one of the names
    Exactly(Vec<String>),
}

impl GroupFilter {
    pub fn single(group: impl Into<String>) -> Self {
        GroupFilter::Exactly(vec![group.into()])
    }

    pub fn apply<'a>(&self, documents: &[&'a DocumentRecord]) -> Vec<&'a DocumentRecord> {
        match self {
            GroupFilter::All => documents.to_vec(),
            GroupFilter::Exactly(groups) => in_release_groups(documents.iter().copied(), groups.as_slice()),
        }
    }

    /// Subtitle naming the selected groups
    pub fn label(&self) -> Option<String> {
        match self {
            GroupFilter::All => None,
            GroupFilter::Exactly(groups) if groups.is_empty() => None,
            GroupFilter::Exactly(groups) => Some(groups.join(" and ")),
        }
    }
}

/// Builds report sections for one slide size
#[derive(Clone, Debug)]
pub struct SectionBuilder {
    slide_size: SlideSize,
    /// "Now" for ticket ages
    reference_time: NaiveDateTime,
}

impl SectionBuilder {
    pub fn new(slide_size: SlideSize, reference_time: NaiveDateTime) -> Self {
        Self {
            slide_size,
            reference_time,
        }
    }

    pub fn slide_size(&self) -> SlideSize {
        self.slide_size
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
    }

    fn grid_slides(&self, deck: &mut Deck, template: Slide, cells: &[Cell], grid: &Grid) {
        deck.extend(paginate(&template, cells, grid, self.slide_size.height));
    }

    fn project_grid(
        &self,
        deck: &mut Deck,
        title: String,
        rows: &[&ProjectRecord],
        card: ProjectCard,
        style: ButtonStyle,
    ) {
        let cells: Vec<Cell> = rows.iter().map(|p| card.cell(p)).collect();
        let template = Slide::new(SlideLayout::TitleOnly, title);
        self.grid_slides(deck, template, &cells, &Grid::four_column(style));
    }

    fn document_board(
        &self,
        deck: &mut Deck,
        title: &str,
        subtitle: &str,
        rows: &[&DocumentRecord],
        card: DocumentCard,
        internal: bool,
    ) {
        let cells: Vec<Cell> = rows.iter().map(|d| card.cell(d, internal)).collect();
        let template = Slide::new(SlideLayout::DocumentBoard, title)
            .placeholder(27, document_board_heading(card.as_str()))
            .placeholder(28, subtitle);
        self.grid_slides(deck, template, &cells, &Grid::document_board());
    }

    /// Section divider
    pub fn title_slide(&self, deck: &mut Deck, title: &str) {
        deck.push(Slide::section(title));
    }

    // ------------------------------------------------------------------------
    // Project sections
    // ------------------------------------------------------------------------

    /// One grid per owner, optionally only owners containing `filter`
    /// (case-insensitive). Cards run by priority, then objective.
    pub fn owner_slides(&self, deck: &mut Deck, projects: &[&ProjectRecord], filter: Option<&str>) {
        let filter = filter.map(str::to_lowercase);
        for (owner, mut rows) in group_by(projects.iter().copied(), |p| p.primary_owner.as_deref()) {
            if let Some(filter) = &filter {
                if !owner.to_lowercase().contains(filter.as_str()) {
                    continue;
                }
            }
            rows.sort_by(|a, b| {
                missing_last(a.priority.as_deref(), b.priority.as_deref())
                    .then_with(|| missing_last(a.objective.as_deref(), b.objective.as_deref()))
            });
            let title = format!("{} - {}", owner, rows.len());
            self.project_grid(deck, title, &rows, ProjectCard::Owner, ButtonStyle::project_card());
        }
    }

    /// "By Objective" divider, then one grid per objective
    pub fn objective_slides(&self, deck: &mut Deck, projects: &[&ProjectRecord], filter: Option<&str>) {
        self.title_slide(deck, "By Objective");
        let selected = match filter {
            Some(filter) => owned_by(projects.iter().copied(), filter),
            None => projects.to_vec(),
        };
        for (objective, mut rows) in group_by(selected, |p| p.objective.as_deref()) {
            sort_by_key(&mut rows, |p| p.priority.as_deref());
            let title = format!("{} - {}", objective, rows.len());
            self.project_grid(deck, title, &rows, ProjectCard::Objective, ButtonStyle::project_card());
        }
    }

    /// Staging board of the projects impacting `team`
    pub fn impacted_section(&self, deck: &mut Deck, projects: &[&ProjectRecord], team: &str, with_section: bool) {
        if with_section {
            self.title_slide(deck, &format!("Projects Impacting {}", team));
        }

        let rows = impacting(projects.iter().copied(), team);
        let stage = |staging: &str| {
            let mut selected = at_staging(rows.iter().copied(), staging);
            sort_by_key(&mut selected, |p| p.priority.as_deref());
            selected.into_iter().map(|p| ProjectCard::Impact.cell(p)).collect::<Vec<_>>()
        };
        let first = [stage("Triage"), stage("Analysis")].concat();
        let second = [stage("Alpha Test"), stage("Beta Test")].concat();
        let third = stage("Roll-out");
        debug!(team, projects = rows.len(), "staging board");

        let mut template = Slide::new(SlideLayout::ThreeColumn, format!("{} - {}", team, rows.len()));
        for (idx, heading) in StagingColumns::HEADINGS {
            template = template.placeholder(idx, heading);
        }
        let board = StagingBoard::default();
        deck.extend(board.paginate(&template, [&first, &second, &third], self.slide_size.height));
    }

    /// On-hold projects by owner
    pub fn on_hold_slides(&self, deck: &mut Deck, projects: &[&ProjectRecord], with_section: bool) {
        if with_section {
            self.title_slide(deck, "On Hold Projects");
        }
        let mut rows = with_status(projects.iter().copied(), "On Hold");
        sort_by_key(&mut rows, |p| p.primary_owner.as_deref());
        let title = format!("On-Hold Projects - {}", rows.len());
        self.project_grid(deck, title, &rows, ProjectCard::OnHold, ButtonStyle::on_hold());
    }

    /// Every project as a one-line button
    pub fn all_projects_slide(&self, deck: &mut Deck, projects: &[&ProjectRecord]) {
        self.project_grid(
            deck,
            "All Projects".to_string(),
            projects,
            ProjectCard::TitleOnly,
            ButtonStyle::all_projects(),
        );
    }

    /// Projects awaiting review (status `New`), by owner then priority
    pub fn new_projects_slides(&self, deck: &mut Deck, projects: &[&ProjectRecord]) {
        self.title_slide(deck, "New Projects");
        let mut rows: Vec<&ProjectRecord> = projects
            .iter()
            .copied()
            .filter(|p| p.status.as_deref() == Some("New"))
            .collect();
        rows.sort_by(|a, b| {
            missing_last(a.primary_owner.as_deref(), b.primary_owner.as_deref())
                .then_with(|| missing_last(a.priority.as_deref(), b.priority.as_deref()))
        });
        let title = format!("New Projects - {}", rows.len());
        self.project_grid(deck, title, &rows, ProjectCard::Objective, ButtonStyle::project_card());
    }

    /// One detail slide per project: summary, updates and actions
    pub fn project_detail_section(&self, deck: &mut Deck, projects: &[&ProjectRecord], with_section: bool) {
        if with_section {
            self.title_slide(deck, "Project Details");
        }
        let rich_text = |html: Option<&str>| {
            html.map(html_to_text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| " ".to_string())
        };

        for project in projects {
            let summary = project.project_summary.as_deref().unwrap_or(" ");
            deck.push(
                Slide::new(SlideLayout::ProjectDetail, project.title.as_str())
                    .placeholder(10, format!("Project Summary: {}", summary))
                    .placeholder(26, "Project Updates")
                    .placeholder(28, "Project Actions")
                    .placeholder(24, rich_text(project.project_updates.as_deref()))
                    .placeholder(27, rich_text(project.project_actions.as_deref())),
            );
        }
    }

    // ------------------------------------------------------------------------
    // Document sections
    // ------------------------------------------------------------------------

    /// New and updated documents per release group (missing group: `None`)
    pub fn document_release_section(
        &self,
        deck: &mut Deck,
        documents: &[&DocumentRecord],
        groups: &GroupFilter,
        internal: bool,
    ) {
        let selected = groups.apply(documents);
        for (group, rows) in group_by_or(selected, |d| d.release_group.as_deref(), "None") {
            let (mut new, mut updated): (Vec<&DocumentRecord>, Vec<&DocumentRecord>) =
                rows.into_iter().partition(|d| d.is_new());
            sort_by_key(&mut new, |d| d.doc_reference.as_deref());
            sort_by_key(&mut updated, |d| d.doc_reference.as_deref());
            debug!(group = %group, new = new.len(), updated = updated.len(), "release group");

            self.document_board(deck, DOCUMENT_BOARD_TITLE, &group, &new, DocumentCard::New, internal);
            self.document_board(deck, DOCUMENT_BOARD_TITLE, &group, &updated, DocumentCard::Update, internal);
        }
    }

    /// Documents with a commercial impact; nothing when there are none
    pub fn commercial_impacts_section(&self, deck: &mut Deck, documents: &[&DocumentRecord], subtitle: &str) {
        let mut rows: Vec<&DocumentRecord> = documents.iter().copied().filter(|d| !d.impact.is_empty()).collect();
        if rows.is_empty() {
            return;
        }
        sort_by_key(&mut rows, |d| d.doc_reference.as_deref());
        self.document_board(deck, "Commercial Impacts", subtitle, &rows, DocumentCard::Changes, false);
    }

    /// Changes to review for one impacted team
    pub fn document_impacted_section(
        &self,
        deck: &mut Deck,
        documents: &[&DocumentRecord],
        team: &str,
        subtitle: Option<&str>,
        internal: bool,
    ) {
        self.title_slide(deck, &format!("Documents Impacting {}", team));
        let mut rows = impacting(documents.iter().copied(), team);
        sort_by_key(&mut rows, |d| d.doc_reference.as_deref());
        let title = format!("{} - {}", team, rows.len());
        self.document_board(
            deck,
            &title,
            subtitle.unwrap_or(team),
            &rows,
            DocumentCard::ReleaseImpact,
            internal,
        );
    }

    /// One board per document reference listing its changes by forecast
    pub fn document_changes_section(&self, deck: &mut Deck, documents: &[&DocumentRecord]) {
        for (reference, mut rows) in group_by_or(documents.iter().copied(), |d| d.doc_reference.as_deref(), "None") {
            sort_by_key(&mut rows, |d| d.release_forecast.as_deref());
            self.document_board(deck, &reference, "", &rows, DocumentCard::Changes, false);
        }
    }

    // ------------------------------------------------------------------------
    // Ticket sections
    // ------------------------------------------------------------------------

    /// Ages of every open ticket, paired with the ticket
    fn aged_tickets<'a>(&self, tickets: &[&'a TicketRecord]) -> Vec<AgedTicket<'a>> {
        tickets
            .iter()
            .copied()
            .filter(|t| t.is_open())
            .filter_map(|ticket| {
                let created = ticket.created.as_deref().unwrap_or_default();
                match parse_timestamp(created) {
                    Ok(created) => Some((
                        ticket,
                        business_days_age(created, self.reference_time),
                        total_age(created, self.reference_time),
                    )),
                    Err(err) => {
                        warn!(ticket = %ticket.ticket_id, "skipping ticket: {}", err);
                        None
                    }
                }
            })
            .collect()
    }

    /// Per-assignee totals of open tickets, largest business-day total first
    pub fn ticket_ages(&self, tickets: &[&TicketRecord]) -> Vec<AssigneeAges> {
        summarise(&self.aged_tickets(tickets))
    }

    /// Summary grid of assignees, then one grid of tickets per assignee,
    /// oldest first. Returns the per-assignee totals.
    pub fn ticket_section(&self, deck: &mut Deck, tickets: &[&TicketRecord]) -> Vec<AssigneeAges> {
        let aged = self.aged_tickets(tickets);
        let summary = summarise(&aged);
        let open: usize = summary.iter().map(|a| a.tickets).sum();

        let cells: Vec<Cell> = summary.iter().map(assignee_cell).collect();
        let template = Slide::new(SlideLayout::TitleOnly, format!("Open Tickets - {}", open));
        self.grid_slides(deck, template, &cells, &Grid::four_column(ButtonStyle::project_card()));

        for ages in &summary {
            let mut rows: Vec<&AgedTicket> = aged
                .iter()
                .filter(|(t, _, _)| t.assigned_to.as_deref().unwrap_or("Unassigned") == ages.assignee)
                .collect();
            rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.2.cmp(&a.2)));
            let cells: Vec<Cell> = rows
                .iter()
                .map(|(ticket, business, total)| ticket_cell(ticket, *business, *total))
                .collect();
            let template = Slide::new(SlideLayout::TitleOnly, format!("{} - {}", ages.assignee, rows.len()));
            self.grid_slides(deck, template, &cells, &Grid::four_column(ButtonStyle::project_card()));
        }
        summary
    }
}

/// An open ticket with its business-day and calendar-day ages
type AgedTicket<'a> = (&'a TicketRecord, i64, i64);

fn summarise(aged: &[AgedTicket]) -> Vec<AssigneeAges> {
    let mut summary: Vec<AssigneeAges> = group_by_or(aged.iter(), |(t, _, _)| t.assigned_to.as_deref(), "Unassigned")
        .into_iter()
        .map(|(assignee, rows)| {
            let mut ages = AssigneeAges::new(assignee);
            for (_, business, total) in rows {
                ages.add(*business, *total);
            }
            ages
        })
        .collect();
    summary.sort_by(|a, b| b.business_days.cmp(&a.business_days).then_with(|| a.assignee.cmp(&b.assignee)));
    summary
}
