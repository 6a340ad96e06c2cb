//! Aging of unpaid entries
//!
//! Age is the signed number of whole days between an entry's due date and
//! today. Entries that are fully paid, or that have no due date, never age.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use core_kernel::{days_between, days_between_at, Currency};

use crate::projection::EntryRow;
use crate::schedule::{Entry, FinanceSchedule};

/// Fixed aging tiers for unpaid amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgingBucket {
    /// Due today, in the future, or otherwise not yet late
    #[serde(rename = "not_due")]
    NotDue,
    /// 1 to 30 days late
    #[serde(rename = "0-30")]
    Days0To30,
    /// 31 to 60 days late
    #[serde(rename = "31-60")]
    Days31To60,
    /// 61 to 90 days late
    #[serde(rename = "61-90")]
    Days61To90,
    /// More than 90 days late
    #[serde(rename = "90_plus")]
    Over90,
}

impl AgingBucket {
    /// All buckets from youngest to oldest
    pub const ALL: [AgingBucket; 5] = [
        AgingBucket::NotDue,
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Assigns a bucket from an age in days
    pub fn from_age(days: i64) -> Self {
        match days {
            d if d <= 0 => AgingBucket::NotDue,
            1..=30 => AgingBucket::Days0To30,
            31..=60 => AgingBucket::Days31To60,
            61..=90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    /// Report key of the bucket
    pub fn key(&self) -> &'static str {
        match self {
            AgingBucket::NotDue => "not_due",
            AgingBucket::Days0To30 => "0-30",
            AgingBucket::Days31To60 => "31-60",
            AgingBucket::Days61To90 => "61-90",
            AgingBucket::Over90 => "90_plus",
        }
    }
}

/// Signed age in days: positive when `due` is in the past
pub fn age_in_days(due: NaiveDate, today: NaiveDate) -> i64 {
    days_between(due, today)
}

/// Signed age in days between two instants, both truncated to midnight
pub fn age_in_days_at(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    days_between_at(due, now)
}

/// Days overdue as shown to users: never negative, absent without a due date
pub fn display_aging_days(due: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    due.map(|due| age_in_days(due, today).max(0))
}

/// Bucket of an entry, or `None` when the entry does not age
pub fn bucket_for(entry: &Entry, today: NaiveDate) -> Option<AgingBucket> {
    entry
        .open_due_date()
        .map(|due| AgingBucket::from_age(age_in_days(due, today)))
}

/// Unpaid amounts summed per aging bucket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingBuckets {
    #[serde(rename = "not_due")]
    pub not_due: Decimal,
    #[serde(rename = "0-30")]
    pub days_0_30: Decimal,
    #[serde(rename = "31-60")]
    pub days_31_60: Decimal,
    #[serde(rename = "61-90")]
    pub days_61_90: Decimal,
    #[serde(rename = "90_plus")]
    pub over_90: Decimal,
}

impl AgingBuckets {
    /// Adds an amount to one bucket
    pub fn add(&mut self, bucket: AgingBucket, amount: Decimal) {
        *self.slot_mut(bucket) += amount;
    }

    /// Amount in one bucket
    pub fn get(&self, bucket: AgingBucket) -> Decimal {
        match bucket {
            AgingBucket::NotDue => self.not_due,
            AgingBucket::Days0To30 => self.days_0_30,
            AgingBucket::Days31To60 => self.days_31_60,
            AgingBucket::Days61To90 => self.days_61_90,
            AgingBucket::Over90 => self.over_90,
        }
    }

    /// Sum across all buckets
    pub fn total(&self) -> Decimal {
        AgingBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    /// Sum of the overdue buckets only
    pub fn overdue(&self) -> Decimal {
        self.total() - self.not_due
    }

    /// Buckets with their amounts, youngest first
    pub fn iter(&self) -> impl Iterator<Item = (AgingBucket, Decimal)> + '_ {
        AgingBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    /// Buckets a set of entries
    pub fn from_entries<'a, I>(entries: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        entries.into_iter().fold(Self::default(), |mut acc, entry| {
            if let Some(bucket) = bucket_for(entry, today) {
                acc.add(bucket, entry.amount);
            }
            acc
        })
    }

    /// Buckets every entry of a schedule
    pub fn for_schedule(schedule: &FinanceSchedule, today: NaiveDate) -> Self {
        Self::from_entries(schedule.entries().map(|(_, entry)| entry), today)
    }

    /// Buckets projected rows using the bucket already assigned to each row
    ///
    /// Callers mixing currencies should use [`aging_by_currency`] instead.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a EntryRow>,
    {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            if let Some(bucket) = row.aging_bucket {
                acc.add(bucket, row.amount);
            }
            acc
        })
    }

    fn slot_mut(&mut self, bucket: AgingBucket) -> &mut Decimal {
        match bucket {
            AgingBucket::NotDue => &mut self.not_due,
            AgingBucket::Days0To30 => &mut self.days_0_30,
            AgingBucket::Days31To60 => &mut self.days_31_60,
            AgingBucket::Days61To90 => &mut self.days_61_90,
            AgingBucket::Over90 => &mut self.over_90,
        }
    }
}

/// Buckets rows separately per currency
pub fn aging_by_currency<'a, I>(rows: I) -> BTreeMap<Currency, AgingBuckets>
where
    I: IntoIterator<Item = &'a EntryRow>,
{
    let mut grouped: BTreeMap<Currency, AgingBuckets> = BTreeMap::new();
    for row in rows {
        if let Some(bucket) = row.aging_bucket {
            grouped.entry(row.currency).or_default().add(bucket, row.amount);
        }
    }
    grouped
}
