//! Row selection
//!
//! Filters borrow from the loaded records and return the matching rows in
//! their original order. A row with no value in the filtered column never
//! matches.

use std::collections::BTreeSet;

use deckgen_core::{DocumentRecord, ProjectRecord, TicketRecord};

/// Records that carry an `Impacted Teams` list
pub trait Impacted {
    fn impacted_teams(&self) -> &[String];
}

impl Impacted for ProjectRecord {
    fn impacted_teams(&self) -> &[String] {
        &self.impacted_teams
    }
}

impl Impacted for DocumentRecord {
    fn impacted_teams(&self) -> &[String] {
        &self.impacted_teams
    }
}

/// Rows whose `key` contains `needle`
pub fn containing<'a, T, F>(rows: impl IntoIterator<Item = &'a T>, key: F, needle: &str) -> Vec<&'a T>
where
    T: 'a,
    F: Fn(&T) -> Option<&str>,
{
    rows.into_iter()
        .filter(|row| key(row).is_some_and(|value| value.contains(needle)))
        .collect()
}

/// Rows that list `team` among their impacted teams
pub fn impacting<'a, T: Impacted + 'a>(rows: impl IntoIterator<Item = &'a T>, team: &str) -> Vec<&'a T> {
    rows.into_iter()
        .filter(|row| row.impacted_teams().iter().any(|t| t == team))
        .collect()
}

pub fn with_status<'a>(
    rows: impl IntoIterator<Item = &'a ProjectRecord>,
    status: &str,
) -> Vec<&'a ProjectRecord> {
    containing(rows, |p| p.status.as_deref(), status)
}

pub fn at_staging<'a>(
    rows: impl IntoIterator<Item = &'a ProjectRecord>,
    staging: &str,
) -> Vec<&'a ProjectRecord> {
    containing(rows, |p| p.staging.as_deref(), staging)
}

/// Projects whose owner contains `needle`, ignoring case
pub fn owned_by<'a>(rows: impl IntoIterator<Item = &'a ProjectRecord>, needle: &str) -> Vec<&'a ProjectRecord> {
    let needle = needle.to_lowercase();
    rows.into_iter()
        .filter(|p| {
            p.primary_owner
                .as_deref()
                .is_some_and(|owner| owner.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Documents whose release group is one of `groups` exactly
pub fn in_release_groups<'a, S: AsRef<str>>(
    rows: impl IntoIterator<Item = &'a DocumentRecord>,
    groups: &[S],
) -> Vec<&'a DocumentRecord> {
    rows.into_iter()
        .filter(|d| {
            d.release_group
                .as_deref()
                .is_some_and(|group| groups.iter().any(|g| g.as_ref() == group))
        })
        .collect()
}

pub fn assigned_to<'a>(rows: impl IntoIterator<Item = &'a TicketRecord>, person: &str) -> Vec<&'a TicketRecord> {
    containing(rows, |t| t.assigned_to.as_deref(), person)
}

/// Every team named in any row, sorted and de-duplicated
pub fn unique_impacted_teams<'a, T: Impacted + 'a>(rows: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    rows.into_iter()
        .flat_map(|row| row.impacted_teams().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
