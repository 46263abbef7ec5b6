//! End-to-end report composition
//!
//! Exports are parsed from CSV text, then built into decks through the
//! catalogue exactly as the command line does.

use chrono::{NaiveDate, NaiveDateTime};
use deckgen_core::{SlideLayout, SlideSize};
use deckgen_parser::parse_dataset;
use deckgen_report::{Catalogue, Report, ReportSettings, SectionBuilder};
use pretty_assertions::assert_eq;

const PROJECTS: &str = "\
Title,Primary Owner,Status,Staging,Priority,Objective,Impacted Teams,Project Summary,Project Updates,Project Actions,Closure Comments
Fibre Trial,Ada Lovelace,Open,Triage,P2,Cost,\"[\"\"Training\"\", \"\"Support\"\"]\",Trial new fibre,<p>Survey booked.</p>,,
Pole Survey,Ada Lovelace,On Hold,Roll-out,P1,Safety,\"[\"\"Training\"\"]\",Paused for winter,,,
Duct Mapping,Charles Babbage,New,Beta Test,P3,Cost,,Map ducts,,,
Cable Audit,Charles Babbage,Blocked,Analysis,P2,Safety,\"[\"\"Support\"\"]\",,,,Waiting on supplier
";

const DOCUMENTS: &str = "\
Doc Reference,Title,Primary Owner,Status,Release Group,Release Text,Release Forecast,Impact,Impacted Teams
SP-0001-NEW,Cabinet Build,Grace Hopper,New,BDUK - P1,<p>New cabinet.</p>,2024-04,\"[\"\"BDUK\"\"]\",\"[\"\"Planning\"\"]\"
SP-0002-03,Pole Test,Grace Hopper,In Progress,BDUK - P2,<p>Load test.</p>,2024-05,,\"[\"\"Planning\"\", \"\"Build\"\"]\"
SP-0003-01,Duct Rods,Alan Turing,Ready to Release,June,<p>Longer rods.</p>,2024-06,\"[\"\"Change to Materials\"\"]\",
";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn catalogue(settings: ReportSettings) -> Catalogue {
    Catalogue::new(settings, SectionBuilder::new(SlideSize::WIDESCREEN, now()))
}

fn build(report: Report, csv: &str) -> Vec<deckgen_report::ReportOutput> {
    let dataset = parse_dataset(csv.as_bytes()).unwrap();
    catalogue(ReportSettings::default()).build(&report, dataset).unwrap()
}

#[test]
fn engineering_deck_per_person() {
    let settings = ReportSettings {
        engineers: vec!["Ada".into()],
        team_leads: vec!["Charles".into()],
        ..ReportSettings::default()
    };
    let dataset = parse_dataset(PROJECTS.as_bytes()).unwrap();
    let outputs = catalogue(settings).build(&Report::Engineering, dataset).unwrap();

    let modifiers: Vec<&str> = outputs.iter().map(|o| o.modifier.as_str()).collect();
    assert_eq!(modifiers, vec!["_Ada", "_Charles"]);
    assert_eq!(
        outputs[0].deck.titles(),
        vec!["Ada Lovelace - 2", "By Objective", "Cost - 1", "Safety - 1"]
    );
}

#[test]
fn impact_deck_per_team() {
    let outputs = build(Report::Impact { teams: Vec::new() }, PROJECTS);

    let modifiers: Vec<&str> = outputs.iter().map(|o| o.modifier.as_str()).collect();
    assert_eq!(modifiers, vec!["_Support", "_Training"]);
    assert_eq!(outputs[1].deck.titles(), vec!["Training - 2"]);
    assert_eq!(outputs[1].deck.slides[0].layout, SlideLayout::ThreeColumn);
}

#[test]
fn all_report_composition() {
    let outputs = build(Report::All, PROJECTS);
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].modifier, "");
    assert_eq!(
        outputs[0].deck.titles(),
        vec![
            "All Projects",
            "Ada Lovelace - 2",
            "Charles Babbage - 2",
            "By Objective",
            "Cost - 2",
            "Safety - 2",
            "Impacted Teams",
            "Support - 2",
            "Training - 2",
            "On Hold Projects",
            "On-Hold Projects - 1",
        ]
    );
}

#[test]
fn blocked_project_shows_comments() {
    let outputs = build(Report::Who { name: "babbage".into() }, PROJECTS);
    let owner_slide = &outputs[0].deck.slides[0];
    let audit = owner_slide
        .buttons
        .iter()
        .find(|b| b.text.starts_with("Cable Audit"))
        .unwrap();
    assert!(audit.text.ends_with("Blocked: Waiting on supplier"));
}

#[test]
fn project_details() {
    let outputs = build(Report::Projects, PROJECTS);
    let deck = &outputs[0].deck;
    assert_eq!(deck.len(), 5);
    assert_eq!(deck.slides[1].placeholder_text(24), Some("Survey booked."));
    assert_eq!(deck.slides[3].placeholder_text(10), Some("Project Summary: Map ducts"));
}

#[test]
fn review_board() {
    let outputs = build(Report::Review, PROJECTS);
    assert_eq!(outputs[0].report_type, "Project_Review_Report");
    assert_eq!(outputs[0].deck.titles(), vec!["New Projects", "New Projects - 1"]);
}

#[test]
fn release_board_for_alias() {
    let outputs = build(
        Report::Release {
            group: Some("BDUK".into()),
            internal: false,
        },
        DOCUMENTS,
    );
    let output = &outputs[0];
    assert_eq!(output.report_type, "Document_Release");
    assert_eq!(output.modifier, "_BDUK - P1AndBDUK - P2AndBDUK - P3AndBDUK - P4");
    assert_eq!(
        output.deck.titles(),
        vec![
            "Technical Releases",
            "Technical Releases",
            "Technical Releases",
            "Technical Releases",
            "Documents Impacting Build",
            "Build - 1",
            "Documents Impacting Planning",
            "Planning - 2",
        ]
    );
    let planning = &output.deck.slides[7];
    assert_eq!(
        planning.placeholder_text(28),
        Some("BDUK - P1 and BDUK - P2 and BDUK - P3 and BDUK - P4")
    );
}

#[test]
fn single_group_release_board_has_commercial_impacts() {
    let outputs = build(
        Report::Release {
            group: Some("June".into()),
            internal: true,
        },
        DOCUMENTS,
    );
    let output = &outputs[0];
    assert_eq!(output.modifier, "_June_internal");
    assert_eq!(
        output.deck.titles(),
        vec!["Technical Releases", "Technical Releases", "Commercial Impacts"]
    );

    let update = &output.deck.slides[1].buttons[0];
    assert!(update.text.starts_with("Document: SP-0003-01   ||   Status: Ready to Release\nOwner: Alan Turing"));
}

#[test]
fn full_release_board() {
    let outputs = build(
        Report::Release {
            group: None,
            internal: false,
        },
        DOCUMENTS,
    );
    assert_eq!(outputs[0].modifier, "_FullReleaseBoard");
    assert!(outputs[0].deck.titles().contains(&"Commercial Impacts"));
}

#[test]
fn document_board_and_changes() {
    let outputs = build(Report::Docs { group: Some("BDUK - P1".into()) }, DOCUMENTS);
    assert_eq!(outputs[0].modifier, "_DocumentBoard");
    assert_eq!(outputs[0].deck.len(), 2);
    assert_eq!(outputs[0].deck.slides[0].buttons.len(), 1);
    assert!(outputs[0].deck.slides[0].buttons[0].text.contains("SP-0001-NEW"));

    let outputs = build(Report::Changes, DOCUMENTS);
    assert_eq!(outputs[0].modifier, "_DocumentChanges");
    assert_eq!(outputs[0].deck.titles(), vec!["SP-0001-NEW", "SP-0002-03", "SP-0003-01"]);
    assert!(outputs[0].deck.slides[2].buttons[0]
        .text
        .contains("Impact: Change to Materials: E"));
}

#[test]
fn ticket_report_carries_assignee_totals() {
    let csv = "\
Ticket ID,Title,AssignedTo,Status,Created
T-1,Login fails,Ada,Open,04/03/2024 08:00
T-2,VPN drops,Bob,Open,07/03/2024 08:00
T-3,Old issue,Bob,Resolved,01/02/2024 08:00
";
    let outputs = build(Report::Tickets, csv);
    let output = &outputs[0];
    assert_eq!(output.report_type, "Ticket_Report");
    assert_eq!(output.assignees.len(), 2);
    assert_eq!(output.assignees[0].assignee, "Ada");
    assert_eq!(output.assignees[0].business_days, 5);
    assert_eq!(output.deck.titles(), vec!["Open Tickets - 2", "Ada - 1", "Bob - 1"]);
}

#[test]
fn document_board_group_must_match_exactly() {
    let csv = "\
Doc Reference,Title,Status,Release Group,Release Text
SP-1,A,In Progress,June,<p>a</p>
SP-2,B,In Progress,June 2024,<p>b</p>
";
    let outputs = build(Report::Docs { group: Some("June".into()) }, csv);
    let buttons: Vec<&str> = outputs[0]
        .deck
        .slides
        .iter()
        .flat_map(|slide| slide.buttons.iter().map(|b| b.text.as_str()))
        .collect();
    assert_eq!(buttons.len(), 1);
    assert!(buttons[0].starts_with("Document: SP-1"));

    let outputs = build(Report::Docs { group: Some("BDUK".into()) }, DOCUMENTS);
    assert!(outputs[0].deck.slides.iter().all(|slide| slide.buttons.is_empty()));
}
