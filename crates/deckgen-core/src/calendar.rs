//! Ticket age arithmetic
//!
//! Ages are measured between a creation timestamp and a reference timestamp
//! (normally "now"). The business-day age counts working days the way the
//! support desk does: a ticket raised at the weekend starts on Monday, and
//! partial days at either end do not count.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

/// Start of the working day, seconds from midnight
pub const WORKDAY_START_SECS: u32 = 9 * 3600;

/// End of the working day, seconds from midnight
pub const WORKDAY_END_SECS: u32 = 17 * 3600;

/// Check if a weekday is Monday to Friday
pub fn is_business_day(day: Weekday) -> bool {
    !matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Whole days elapsed between `created` and `reference`, rounded down
pub fn total_age(created: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    (reference - created).num_seconds().div_euclid(86_400)
}

/// Business days between `created` and `reference`.
///
/// - A weekend creation moves to the following Monday (same time of day).
/// - Every weekday `d` from the creation date up to the reference date counts
///   when `d` at the creation time of day is not after `reference`.
/// - One day is dropped if the ticket was raised after 09:00, another if the
///   reference falls before 17:00.
/// - The result never goes below zero.
pub fn business_days_age(created: NaiveDateTime, reference: NaiveDateTime) -> i64 {
    let mut start = created;
    let weekday = start.weekday().num_days_from_monday();
    if weekday >= 5 {
        start += Duration::days(i64::from(7 - weekday));
    }

    let mut count: i64 = 0;
    let mut day = start;
    while day <= reference {
        if is_business_day(day.weekday()) {
            count += 1;
        }
        day += Duration::days(1);
    }

    if start.num_seconds_from_midnight() > WORKDAY_START_SECS {
        count -= 1;
    }
    if reference.num_seconds_from_midnight() < WORKDAY_END_SECS {
        count -= 1;
    }

    count.max(0)
}

/// Aggregated ages of the open tickets held by one assignee
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AssigneeAges {
    pub assignee: String,
    pub tickets: usize,
    /// Sum of business-day ages
    pub business_days: i64,
    pub oldest_business_days: i64,
    /// Sum of calendar-day ages
    pub total_days: i64,
}

impl AssigneeAges {
    pub fn new(assignee: impl Into<String>) -> Self {
        Self {
            assignee: assignee.into(),
            ..Self::default()
        }
    }

    /// Fold one ticket into the totals
    pub fn add(&mut self, business_days: i64, total_days: i64) {
        self.tickets += 1;
        self.business_days += business_days;
        self.oldest_business_days = self.oldest_business_days.max(business_days);
        self.total_days += total_days;
    }
}
