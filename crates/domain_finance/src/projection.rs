//! Flat entry rows for the payment-schedule report
//!
//! Each (schedule, installment, entry) triple becomes one [`EntryRow`]. Rows
//! carry a display-only effective status and the aging of the entry; neither
//! is written back to the schedule or fed to the summarizer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use core_kernel::{Currency, PolicyId, ScheduleId};

use crate::aging::{age_in_days, bucket_for, display_aging_days, AgingBucket};
use crate::classification::{EntryCategory, EntryStatus, EntryType};
use crate::config::{FinanceConfig, PartialPaidDisplay};
use crate::schedule::{Entry, FinanceSchedule, Installment};

/// One entry flattened with its schedule and installment context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    pub schedule_id: ScheduleId,
    pub policy_id: PolicyId,
    pub currency: Currency,
    pub policy_number: Option<String>,
    pub transaction_number: Option<String>,
    pub client_name: Option<String>,
    pub insurer_name: Option<String>,
    /// Installment number
    pub installment: u32,
    /// Position of the entry within its installment
    pub position: usize,
    pub description: String,
    pub entry_type: EntryType,
    /// Status as stored
    pub status: EntryStatus,
    /// Status to display
    pub effective_status: EntryStatus,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub amount: Decimal,
    /// Days overdue, never negative; absent without a due date
    pub aging_days: Option<i64>,
    /// Aging tier of unpaid dated entries
    pub aging_bucket: Option<AgingBucket>,
}

/// Derives the status shown for an entry
///
/// Stored status wins unless the entry is unpaid, has a due date in the
/// past, and is not already marked DUE; then it is shown as DUE. Partially
/// paid entries qualify only under [`PartialPaidDisplay::ShowAsDue`].
pub fn effective_status(entry: &Entry, today: NaiveDate, display: PartialPaidDisplay) -> EntryStatus {
    let eligible = match entry.status {
        EntryStatus::Paid | EntryStatus::Due => false,
        EntryStatus::PartialPaid => display == PartialPaidDisplay::ShowAsDue,
        EntryStatus::NotDue => true,
    };

    match entry.due_date {
        Some(due) if eligible && age_in_days(due, today) > 0 => EntryStatus::Due,
        _ => entry.status,
    }
}

/// Projects schedules into rows as of a given day
#[derive(Debug, Clone, Copy)]
pub struct RowProjector {
    today: NaiveDate,
    partial_paid_display: PartialPaidDisplay,
}

impl RowProjector {
    /// Creates a projector with the default partial-paid display
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            partial_paid_display: PartialPaidDisplay::default(),
        }
    }

    /// Creates a projector for today in the configured timezone
    pub fn from_config(config: &FinanceConfig) -> Self {
        Self::new(config.today()).with_partial_paid_display(config.partial_paid_display)
    }

    /// Sets how late partially paid entries are displayed
    pub fn with_partial_paid_display(mut self, display: PartialPaidDisplay) -> Self {
        self.partial_paid_display = display;
        self
    }

    /// The day rows are aged against
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Rows for every entry of one schedule
    pub fn project(&self, schedule: &FinanceSchedule) -> Vec<EntryRow> {
        schedule
            .installments()
            .iter()
            .flat_map(|inst| {
                inst.entries
                    .iter()
                    .enumerate()
                    .map(move |(position, entry)| self.row(schedule, inst, position, entry))
            })
            .collect()
    }

    /// Rows for every entry of many schedules, schedule by schedule
    pub fn project_all<'a, I>(&self, schedules: I) -> Vec<EntryRow>
    where
        I: IntoIterator<Item = &'a FinanceSchedule>,
    {
        schedules
            .into_iter()
            .flat_map(|schedule| self.project(schedule))
            .collect()
    }

    fn row(&self, schedule: &FinanceSchedule, inst: &Installment, position: usize, entry: &Entry) -> EntryRow {
        let reference = &schedule.reference;

        EntryRow {
            schedule_id: schedule.id,
            policy_id: schedule.policy_id,
            currency: schedule.currency,
            policy_number: reference.policy_number.clone(),
            transaction_number: reference.transaction_number.clone(),
            client_name: reference.client_name.clone(),
            insurer_name: reference.insurer_name.clone(),
            installment: inst.number,
            position,
            description: entry.description.clone(),
            entry_type: entry.entry_type(),
            status: entry.status,
            effective_status: effective_status(entry, self.today, self.partial_paid_display),
            due_date: entry.due_date,
            paid_date: entry.paid_date,
            amount: entry.amount,
            aging_days: display_aging_days(entry.due_date, self.today),
            aging_bucket: bucket_for(entry, self.today),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Orients an ascending comparison
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Row field to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSortField {
    DueDate,
    PaidDate,
    Amount,
    Installment,
    Description,
    EntryType,
    Status,
    EffectiveStatus,
    PolicyNumber,
    TransactionNumber,
    ClientName,
    InsurerName,
}

impl RowSortField {
    /// Ascending comparison of two rows on this field
    ///
    /// Missing dates compare as the empty string and sort first. Text fields
    /// compare case-insensitively.
    pub fn compare(&self, a: &EntryRow, b: &EntryRow) -> Ordering {
        match self {
            RowSortField::DueDate => a.due_date.cmp(&b.due_date),
            RowSortField::PaidDate => a.paid_date.cmp(&b.paid_date),
            RowSortField::Amount => a.amount.cmp(&b.amount),
            RowSortField::Installment => a.installment.cmp(&b.installment),
            RowSortField::Description => compare_text(Some(&a.description), Some(&b.description)),
            RowSortField::EntryType => a.entry_type.code().cmp(b.entry_type.code()),
            RowSortField::Status => a.status.code().cmp(b.status.code()),
            RowSortField::EffectiveStatus => a.effective_status.code().cmp(b.effective_status.code()),
            RowSortField::PolicyNumber => compare_text(a.policy_number.as_ref(), b.policy_number.as_ref()),
            RowSortField::TransactionNumber => {
                compare_text(a.transaction_number.as_ref(), b.transaction_number.as_ref())
            }
            RowSortField::ClientName => compare_text(a.client_name.as_ref(), b.client_name.as_ref()),
            RowSortField::InsurerName => compare_text(a.insurer_name.as_ref(), b.insurer_name.as_ref()),
        }
    }
}

/// Case-insensitive comparison with missing text treated as empty
pub(crate) fn compare_text(a: Option<&String>, b: Option<&String>) -> Ordering {
    let a = a.map(|s| s.to_lowercase()).unwrap_or_default();
    let b = b.map(|s| s.to_lowercase()).unwrap_or_default();
    a.cmp(&b)
}

/// Case-insensitive substring match; a blank needle matches everything
pub(crate) fn contains_text<'a, I>(haystacks: I, needle: &str) -> bool
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    haystacks
        .into_iter()
        .flatten()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Filters and ordering applied to projected rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowQuery {
    pub entry_type: Option<EntryType>,
    pub category: Option<EntryCategory>,
    /// Matched against the effective status
    pub status: Option<EntryStatus>,
    /// Exact description match
    pub description: Option<String>,
    /// Free text over identifiers, names, and description
    pub search: Option<String>,
    pub sort: Option<(RowSortField, SortDirection)>,
}

impl RowQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_category(mut self, category: EntryCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, field: RowSortField, direction: SortDirection) -> Self {
        self.sort = Some((field, direction));
        self
    }

    /// Returns true if a row passes every filter
    pub fn matches(&self, row: &EntryRow) -> bool {
        if self.entry_type.is_some_and(|t| t != row.entry_type) {
            return false;
        }
        if self.category.is_some_and(|c| c != row.entry_type.category()) {
            return false;
        }
        if self.status.is_some_and(|s| s != row.effective_status) {
            return false;
        }
        if self.description.as_ref().is_some_and(|d| *d != row.description) {
            return false;
        }

        match &self.search {
            Some(search) => {
                let schedule_id = row.schedule_id.to_string();
                contains_text(
                    [
                        Some(schedule_id.as_str()),
                        row.policy_number.as_deref(),
                        row.transaction_number.as_deref(),
                        row.client_name.as_deref(),
                        row.insurer_name.as_deref(),
                        Some(row.description.as_str()),
                    ],
                    search,
                )
            }
            None => true,
        }
    }

    /// Filters rows, then sorts them stably
    pub fn apply(&self, rows: Vec<EntryRow>) -> Vec<EntryRow> {
        let mut selected: Vec<EntryRow> = rows.into_iter().filter(|row| self.matches(row)).collect();

        if let Some((field, direction)) = self.sort {
            selected.sort_by(|a, b| direction.apply(field.compare(a, b)));
        }

        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_late_not_due_displays_as_due() {
        let entry = Entry::of_type(EntryType::CommissionIn, dec!(10))
            .with_due_date(today() - Duration::days(1));

        assert_eq!(
            effective_status(&entry, today(), PartialPaidDisplay::KeepPartialPaid),
            EntryStatus::Due
        );
    }

    #[test]
    fn test_due_today_is_not_overridden() {
        let entry = Entry::of_type(EntryType::CommissionIn, dec!(10)).with_due_date(today());

        assert_eq!(
            effective_status(&entry, today(), PartialPaidDisplay::ShowAsDue),
            EntryStatus::NotDue
        );
    }

    #[test]
    fn test_paid_is_never_overridden() {
        let entry = Entry::of_type(EntryType::CommissionIn, dec!(10))
            .with_due_date(today() - Duration::days(200))
            .with_status(EntryStatus::Paid);

        assert_eq!(
            effective_status(&entry, today(), PartialPaidDisplay::ShowAsDue),
            EntryStatus::Paid
        );
    }

    #[test]
    fn test_partial_paid_override_is_configurable() {
        let entry = Entry::of_type(EntryType::PremiumFromClient, dec!(10))
            .with_due_date(today() - Duration::days(5))
            .with_status(EntryStatus::PartialPaid);

        assert_eq!(
            effective_status(&entry, today(), PartialPaidDisplay::KeepPartialPaid),
            EntryStatus::PartialPaid
        );
        assert_eq!(
            effective_status(&entry, today(), PartialPaidDisplay::ShowAsDue),
            EntryStatus::Due
        );
    }

    #[test]
    fn test_contains_text_blank_needle() {
        assert!(contains_text([None], "  "));
        assert!(contains_text([Some("POL/2024/001")], "pol/2024"));
        assert!(!contains_text([None, Some("abc")], "xyz"));
    }

    #[test]
    fn test_compare_text_ignores_case_and_missing() {
        let upper = "Zeta".to_string();
        let lower = "alpha".to_string();
        assert_eq!(compare_text(Some(&lower), Some(&upper)), Ordering::Less);
        assert_eq!(compare_text(None, Some(&lower)), Ordering::Less);
    }
}
