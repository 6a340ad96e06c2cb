//! Finance schedule model
//!
//! A schedule owns its installments and each installment owns its entries.
//! There are no id-keyed side tables: an entry can only exist inside the
//! installment that holds it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use core_kernel::{Currency, PartyId, PolicyId, Rate, ScheduleId};

use crate::classification::{BusinessType, EntryCategory, EntryStatus, EntryType};
use crate::error::FinanceError;

/// One line item within an installment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Description as stored; classified on read
    pub description: String,
    /// Calendar due date
    pub due_date: Option<NaiveDate>,
    /// Amount in the schedule currency, never negative for valid data
    pub amount: Decimal,
    /// Stored payment status
    pub status: EntryStatus,
    /// Calendar date the entry was settled
    pub paid_date: Option<NaiveDate>,
}

impl Entry {
    /// Creates a not-yet-due entry without dates
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            due_date: None,
            amount,
            status: EntryStatus::NotDue,
            paid_date: None,
        }
    }

    /// Creates an entry carrying the canonical label of `entry_type`
    pub fn of_type(entry_type: EntryType, amount: Decimal) -> Self {
        Self::new(entry_type.label().unwrap_or("Other"), amount)
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the paid date
    pub fn with_paid_date(mut self, paid_date: NaiveDate) -> Self {
        self.paid_date = Some(paid_date);
        self
    }

    /// Canonical type derived from the description
    pub fn entry_type(&self) -> EntryType {
        EntryType::classify(&self.description)
    }

    /// Returns true unless the entry is fully paid
    pub fn is_open(&self) -> bool {
        !self.status.is_settled()
    }

    /// Due date of an entry that still needs chasing
    pub fn open_due_date(&self) -> Option<NaiveDate> {
        if self.is_open() {
            self.due_date
        } else {
            None
        }
    }
}

/// One numbered payment cycle within a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    /// 1-based installment number, unique within the schedule
    pub number: u32,
    /// Entries in display order
    pub entries: Vec<Entry>,
}

impl Installment {
    /// Creates an empty installment
    pub fn new(number: u32) -> Self {
        Self {
            number,
            entries: Vec::new(),
        }
    }

    /// Appends an entry
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// Display references copied from the policy for searching and sorting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyReference {
    pub policy_number: Option<String>,
    pub transaction_number: Option<String>,
    pub client_name: Option<String>,
    pub insurer_name: Option<String>,
}

/// The finance plan attached to one policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceSchedule {
    /// Unique identifier
    pub id: ScheduleId,
    /// Policy this schedule belongs to
    pub policy_id: PolicyId,
    /// Client paying the premium
    pub client_id: Option<PartyId>,
    /// Insurer carrying the risk
    pub insurer_id: Option<PartyId>,
    /// Source of business receiving commission
    pub source_id: Option<PartyId>,
    /// Currency of every amount on the schedule
    pub currency: Currency,
    /// Direct or non-direct business
    pub business_type: BusinessType,
    /// Gross commission rate on premium
    pub commission_gross: Option<Rate>,
    /// Share of premium passed on to the source of business
    pub commission_to_source: Option<Rate>,
    /// Display references for search
    pub reference: PolicyReference,
    /// Installments ordered by number
    installments: Vec<Installment>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl FinanceSchedule {
    /// Creates an empty schedule for a policy
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy the schedule belongs to
    /// * `currency` - Currency of the schedule
    /// * `business_type` - Direct or non-direct business
    pub fn new(policy_id: PolicyId, currency: Currency, business_type: BusinessType) -> Self {
        let now = Utc::now();

        Self {
            id: ScheduleId::new_v7(),
            policy_id,
            client_id: None,
            insurer_id: None,
            source_id: None,
            currency,
            business_type,
            commission_gross: None,
            commission_to_source: None,
            reference: PolicyReference::default(),
            installments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the schedule identifier
    pub fn with_id(mut self, id: ScheduleId) -> Self {
        self.id = id;
        self
    }

    /// Sets the client, insurer, and source-of-business parties
    pub fn with_parties(
        mut self,
        client_id: Option<PartyId>,
        insurer_id: Option<PartyId>,
        source_id: Option<PartyId>,
    ) -> Self {
        self.client_id = client_id;
        self.insurer_id = insurer_id;
        self.source_id = source_id;
        self
    }

    /// Sets the commission rates
    pub fn with_commission_rates(mut self, gross: Option<Rate>, to_source: Option<Rate>) -> Self {
        self.commission_gross = gross;
        self.commission_to_source = to_source;
        self
    }

    /// Sets the display references
    pub fn with_reference(mut self, reference: PolicyReference) -> Self {
        self.reference = reference;
        self
    }

    /// Attaches installments exactly as given, ordered by number
    ///
    /// Used on the read path: entries with unrecognized descriptions are
    /// kept and classified as `Other`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateInstallment` if two installments share a number
    pub fn with_installments(mut self, installments: Vec<Installment>) -> Result<Self, FinanceError> {
        self.installments = ordered_installments(installments)?;
        Ok(self)
    }

    /// Installments ordered by number
    pub fn installments(&self) -> &[Installment] {
        &self.installments
    }

    /// Every entry with the installment that owns it
    pub fn entries(&self) -> impl Iterator<Item = (&Installment, &Entry)> {
        self.installments
            .iter()
            .flat_map(|inst| inst.entries.iter().map(move |entry| (inst, entry)))
    }

    /// Replaces all installments in one step
    ///
    /// Only canonical descriptions are kept, and non-direct schedules drop
    /// premium entries because no premium passes through the brokerage. On
    /// error the current installments are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateInstallment` if two installments share a number
    pub fn replace_installments(&mut self, installments: Vec<Installment>) -> Result<(), FinanceError> {
        let carries_premium = self.business_type.carries_premium();
        let mut dropped = 0usize;

        let sanitized: Vec<Installment> = installments
            .into_iter()
            .map(|mut inst| {
                let before = inst.entries.len();
                inst.entries.retain(|entry| match entry.entry_type().category() {
                    EntryCategory::Premium => carries_premium,
                    EntryCategory::Commission => true,
                    EntryCategory::Other => false,
                });
                dropped += before - inst.entries.len();
                inst
            })
            .collect();

        let ordered = ordered_installments(sanitized)?;

        debug!(
            schedule_id = %self.id,
            installments = ordered.len(),
            dropped_entries = dropped,
            "Replacing schedule installments"
        );

        self.installments = ordered;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Records a status change on one entry
    ///
    /// When an entry becomes `Paid` without a paid date, `today` is stamped.
    ///
    /// # Arguments
    ///
    /// * `installment` - Installment number
    /// * `position` - Zero-based position of the entry within the installment
    /// * `status` - New status
    /// * `today` - Current calendar date
    pub fn set_entry_status(
        &mut self,
        installment: u32,
        position: usize,
        status: EntryStatus,
        today: NaiveDate,
    ) -> Result<&Entry, FinanceError> {
        let schedule_id = self.id;
        let entry = self.entry_mut(installment, position)?;

        entry.status = status;
        if status == EntryStatus::Paid && entry.paid_date.is_none() {
            entry.paid_date = Some(today);
        }

        debug!(%schedule_id, installment, position, status = %status, "Entry status updated");

        self.updated_at = Utc::now();
        self.entry(installment, position)
    }

    /// Sets or clears the paid date on one entry
    pub fn set_paid_date(
        &mut self,
        installment: u32,
        position: usize,
        paid_date: Option<NaiveDate>,
    ) -> Result<&Entry, FinanceError> {
        self.entry_mut(installment, position)?.paid_date = paid_date;
        self.updated_at = Utc::now();
        self.entry(installment, position)
    }

    /// Looks up one entry
    pub fn entry(&self, installment: u32, position: usize) -> Result<&Entry, FinanceError> {
        self.installments
            .iter()
            .find(|inst| inst.number == installment)
            .ok_or(FinanceError::InstallmentNotFound(installment))?
            .entries
            .get(position)
            .ok_or(FinanceError::EntryNotFound { installment, position })
    }

    fn entry_mut(&mut self, installment: u32, position: usize) -> Result<&mut Entry, FinanceError> {
        self.installments
            .iter_mut()
            .find(|inst| inst.number == installment)
            .ok_or(FinanceError::InstallmentNotFound(installment))?
            .entries
            .get_mut(position)
            .ok_or(FinanceError::EntryNotFound { installment, position })
    }
}

/// Sorts installments by number, rejecting duplicates
fn ordered_installments(mut installments: Vec<Installment>) -> Result<Vec<Installment>, FinanceError> {
    let mut seen = HashSet::with_capacity(installments.len());
    for inst in &installments {
        if !seen.insert(inst.number) {
            return Err(FinanceError::DuplicateInstallment(inst.number));
        }
    }

    installments.sort_by_key(|inst| inst.number);
    Ok(installments)
}
