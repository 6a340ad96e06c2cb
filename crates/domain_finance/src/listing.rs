//! Schedule listing
//!
//! Pairs schedules with their summaries for the schedule overview, with
//! search, an outstanding-only switch, and ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::projection::{compare_text, contains_text, SortDirection};
use crate::schedule::FinanceSchedule;
use crate::summary::{summarize_many, ScheduleSummary};

/// A schedule with its summary
#[derive(Debug, Clone)]
pub struct ScheduleListing<'a> {
    pub schedule: &'a FinanceSchedule,
    pub summary: ScheduleSummary,
}

impl<'a> ScheduleListing<'a> {
    /// Summarizes schedules and pairs each with its summary
    pub fn build(schedules: &'a [FinanceSchedule]) -> Vec<Self> {
        schedules
            .iter()
            .zip(summarize_many(schedules))
            .map(|(schedule, summary)| ScheduleListing { schedule, summary })
            .collect()
    }
}

/// Schedule field to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleSortField {
    #[default]
    NextDue,
    PolicyNumber,
    ClientName,
}

/// Filters and ordering for the schedule overview
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleListQuery {
    pub search: Option<String>,
    /// Keep only schedules with money still owed on any type
    pub outstanding_only: bool,
    pub sort: Option<(ScheduleSortField, SortDirection)>,
}

impl ScheduleListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn outstanding_only(mut self) -> Self {
        self.outstanding_only = true;
        self
    }

    pub fn sorted_by(mut self, field: ScheduleSortField, direction: SortDirection) -> Self {
        self.sort = Some((field, direction));
        self
    }

    /// Returns true if a listing passes every filter
    pub fn matches(&self, listing: &ScheduleListing<'_>) -> bool {
        if self.outstanding_only && !listing.summary.has_outstanding() {
            return false;
        }

        let reference = &listing.schedule.reference;
        self.search.as_deref().map_or(true, |search| {
            contains_text(
                [
                    reference.policy_number.as_deref(),
                    reference.transaction_number.as_deref(),
                    reference.client_name.as_deref(),
                    reference.insurer_name.as_deref(),
                ],
                search,
            )
        })
    }

    /// Filters listings, then sorts them stably
    pub fn apply<'a>(&self, listings: Vec<ScheduleListing<'a>>) -> Vec<ScheduleListing<'a>> {
        let mut selected: Vec<ScheduleListing<'a>> =
            listings.into_iter().filter(|l| self.matches(l)).collect();

        if let Some((field, direction)) = self.sort {
            selected.sort_by(|a, b| compare_listings(field, direction, a, b));
        }

        selected
    }
}

fn compare_listings(
    field: ScheduleSortField,
    direction: SortDirection,
    a: &ScheduleListing<'_>,
    b: &ScheduleListing<'_>,
) -> Ordering {
    match field {
        // Unset next due dates go last in either direction
        ScheduleSortField::NextDue => match (a.summary.next_due_date, b.summary.next_due_date) {
            (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        ScheduleSortField::PolicyNumber => direction.apply(compare_text(
            a.schedule.reference.policy_number.as_ref(),
            b.schedule.reference.policy_number.as_ref(),
        )),
        ScheduleSortField::ClientName => direction.apply(compare_text(
            a.schedule.reference.client_name.as_ref(),
            b.schedule.reference.client_name.as_ref(),
        )),
    }
}
