//! Grouping and ordering
//!
//! Groups come back ordered by key. Sorting is stable and places rows with a
//! missing value after every row that has one.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Partition rows by `key`, dropping rows without a key
pub fn group_by<'a, T, F>(rows: impl IntoIterator<Item = &'a T>, key: F) -> Vec<(String, Vec<&'a T>)>
where
    T: 'a,
    F: Fn(&T) -> Option<&str>,
{
    let mut groups: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for row in rows {
        if let Some(value) = key(row) {
            groups.entry(value.to_string()).or_default().push(row);
        }
    }
    groups.into_iter().collect()
}

/// Partition rows by `key`, collecting rows without a key under `fill`
pub fn group_by_or<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    key: F,
    fill: &str,
) -> Vec<(String, Vec<&'a T>)>
where
    T: 'a,
    F: Fn(&T) -> Option<&str>,
{
    let mut groups: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for row in rows {
        let value = key(row).unwrap_or(fill);
        groups.entry(value.to_string()).or_default().push(row);
    }
    groups.into_iter().collect()
}

/// Compare two optional values, missing last
pub fn missing_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort on a single optional key
pub fn sort_by_key<T, F>(rows: &mut [&T], key: F)
where
    F: Fn(&T) -> Option<&str>,
{
    rows.sort_by(|a, b| missing_last(key(a), key(b)));
}
