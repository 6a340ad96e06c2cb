//! Schedule summaries
//!
//! Folds a schedule's entries into per-type totals and the earliest open due
//! dates. The fold is a pure function of the schedule: entries may be visited
//! in any order, and outstanding values are derived once at the end as
//! `total - received`, never accumulated.

use chrono::NaiveDate;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use core_kernel::{Currency, Money, ScheduleId};

use crate::classification::EntryType;
use crate::config::OverpaymentPolicy;
use crate::schedule::{Entry, FinanceSchedule};

/// Total, received, and outstanding amounts for one entry type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountTriple {
    /// Sum of every entry of this type
    pub total: Money,
    /// Sum of entries with status PAID
    pub received: Money,
    /// `total - received`; negative on overpayment
    pub outstanding: Money,
}

impl AmountTriple {
    fn from_sums(total: Decimal, received: Decimal, currency: Currency) -> Self {
        // Unrounded: each total equals the sum of its entry amounts
        Self {
            total: Money::exact(total, currency),
            received: Money::exact(received, currency),
            outstanding: Money::exact(total - received, currency),
        }
    }

    /// Returns true if more was received than is owed
    pub fn is_overpaid(&self) -> bool {
        self.outstanding.is_negative()
    }

    /// Returns true if money is still owed
    pub fn has_outstanding(&self) -> bool {
        self.outstanding.is_positive()
    }
}

/// Denormalized totals for one schedule
///
/// Every field is always present; a schedule without entries has zero
/// amounts and no due dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub schedule_id: ScheduleId,
    pub currency: Currency,
    pub premium_from_client: AmountTriple,
    pub premium_to_insurer: AmountTriple,
    pub commission_in: AmountTriple,
    pub commission_to_source: AmountTriple,
    /// Earliest due date among entries not yet PAID
    pub next_due_date: Option<NaiveDate>,
    /// Earliest due date among unpaid "Premium to Insurer" entries
    pub insurer_next_due_date: Option<NaiveDate>,
}

impl ScheduleSummary {
    /// Amounts for a canonical type; `None` for `Other`
    pub fn for_type(&self, entry_type: EntryType) -> Option<&AmountTriple> {
        match entry_type {
            EntryType::PremiumFromClient => Some(&self.premium_from_client),
            EntryType::PremiumToInsurer => Some(&self.premium_to_insurer),
            EntryType::CommissionIn => Some(&self.commission_in),
            EntryType::CommissionToSource => Some(&self.commission_to_source),
            EntryType::Other => None,
        }
    }

    /// Returns true if any of the four types still has money owed
    pub fn has_outstanding(&self) -> bool {
        self.triples().any(|(_, t)| t.has_outstanding())
    }

    /// Types whose outstanding balance is negative
    pub fn overpaid_types(&self) -> Vec<EntryType> {
        self.triples()
            .filter(|(_, t)| t.is_overpaid())
            .map(|(entry_type, _)| entry_type)
            .collect()
    }

    fn triples(&self) -> impl Iterator<Item = (EntryType, &AmountTriple)> {
        EntryType::CANONICAL
            .into_iter()
            .filter_map(move |t| self.for_type(t).map(|triple| (t, triple)))
    }
}

/// Running sums while folding entries
#[derive(Debug, Default)]
struct SummaryAccumulator {
    totals: [Decimal; 4],
    received: [Decimal; 4],
    next_due_date: Option<NaiveDate>,
    insurer_next_due_date: Option<NaiveDate>,
}

impl SummaryAccumulator {
    fn absorb(mut self, entry: &Entry) -> Self {
        debug_assert!(
            !entry.amount.is_sign_negative() || entry.amount.is_zero(),
            "negative amount reached the summarizer: {}",
            entry.amount
        );

        let entry_type = entry.entry_type();
        if let Some(slot) = canonical_slot(entry_type) {
            self.totals[slot] += entry.amount;
            if entry.status.is_settled() {
                self.received[slot] += entry.amount;
            }
        }

        if let Some(due) = entry.open_due_date() {
            self.next_due_date = Some(earliest(self.next_due_date, due));
            if entry_type == EntryType::PremiumToInsurer {
                self.insurer_next_due_date = Some(earliest(self.insurer_next_due_date, due));
            }
        }

        self
    }

    fn finish(self, schedule_id: ScheduleId, currency: Currency) -> ScheduleSummary {
        let triple = |slot: usize| AmountTriple::from_sums(self.totals[slot], self.received[slot], currency);

        ScheduleSummary {
            schedule_id,
            currency,
            premium_from_client: triple(0),
            premium_to_insurer: triple(1),
            commission_in: triple(2),
            commission_to_source: triple(3),
            next_due_date: self.next_due_date,
            insurer_next_due_date: self.insurer_next_due_date,
        }
    }
}

fn canonical_slot(entry_type: EntryType) -> Option<usize> {
    match entry_type {
        EntryType::PremiumFromClient => Some(0),
        EntryType::PremiumToInsurer => Some(1),
        EntryType::CommissionIn => Some(2),
        EntryType::CommissionToSource => Some(3),
        EntryType::Other => None,
    }
}

fn earliest(current: Option<NaiveDate>, candidate: NaiveDate) -> NaiveDate {
    current.map_or(candidate, |c| c.min(candidate))
}

/// Summarizes one schedule
///
/// # Example
///
/// ```rust,ignore
/// let summary = summarize(&schedule);
/// if summary.premium_from_client.has_outstanding() {
///     // chase the client
/// }
/// ```
#[instrument(level = "debug", skip(schedule), fields(schedule_id = %schedule.id))]
pub fn summarize(schedule: &FinanceSchedule) -> ScheduleSummary {
    let summary = schedule
        .entries()
        .fold(SummaryAccumulator::default(), |acc, (_, entry)| acc.absorb(entry))
        .finish(schedule.id, schedule.currency);

    debug!(next_due_date = ?summary.next_due_date, "Schedule summarized");
    summary
}

/// Summarizes one schedule and applies the overpayment policy
pub fn summarize_with_policy(schedule: &FinanceSchedule, policy: OverpaymentPolicy) -> ScheduleSummary {
    let summary = summarize(schedule);

    if policy == OverpaymentPolicy::FlagForReview {
        for entry_type in summary.overpaid_types() {
            if let Some(triple) = summary.for_type(entry_type) {
                warn!(
                    schedule_id = %schedule.id,
                    entry_type = entry_type.code(),
                    outstanding = %triple.outstanding,
                    "Overpaid balance flagged for review"
                );
            }
        }
    }

    summary
}

/// Summarizes independent schedules in parallel, preserving input order
pub fn summarize_many(schedules: &[FinanceSchedule]) -> Vec<ScheduleSummary> {
    schedules.par_iter().map(summarize).collect()
}
