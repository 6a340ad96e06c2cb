//! Stored schedule records and their normalization
//!
//! Records arrive in the shape the storage layer keeps them: loosely typed,
//! with amounts that may be numbers, numeric strings, or missing, and dates
//! that may be empty. All coercion happens here, once, so the summarizer and
//! projector only ever see a clean [`FinanceSchedule`].

use chrono::NaiveDate;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use tracing::{instrument, warn};

use core_kernel::{parse_calendar_date, Currency, PartyId, PolicyId, Rate, ScheduleId, TemporalError};

use crate::classification::{BusinessType, EntryStatus};
use crate::config::FinanceConfig;
use crate::error::FinanceError;
use crate::schedule::{Entry, FinanceSchedule, Installment, PolicyReference};

/// An entry as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRecord {
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub amount: Option<Value>,
    pub status: Option<String>,
    pub paid_date: Option<String>,
}

/// An installment as stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallmentRecord {
    /// Installment number; the 1-based position is used when missing
    pub installment: Option<Value>,
    pub entries: Vec<EntryRecord>,
}

/// A schedule as stored, with its installments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(default)]
    pub id: Option<ScheduleId>,
    pub policy_id: PolicyId,
    #[serde(default)]
    pub client_id: Option<PartyId>,
    #[serde(default)]
    pub insurance_id: Option<PartyId>,
    #[serde(default)]
    pub source_business_id: Option<PartyId>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub type_of_business: Option<String>,
    /// Gross commission, in percent
    #[serde(default)]
    pub commission_gross: Option<Value>,
    /// Commission to source, in percent
    #[serde(default)]
    pub commission_to_source: Option<Value>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub transaction_number: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub insurer_name: Option<String>,
    #[serde(default)]
    pub installments: Vec<InstallmentRecord>,
}

/// Converts stored records into schedules
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoader {
    default_currency: Currency,
}

impl RecordLoader {
    /// Creates a loader that falls back to `default_currency`
    pub fn new(default_currency: Currency) -> Self {
        Self { default_currency }
    }

    /// Creates a loader from configuration
    pub fn from_config(config: &FinanceConfig) -> Self {
        Self::new(config.default_currency)
    }

    /// Normalizes a stored schedule
    ///
    /// # Errors
    ///
    /// - `UnsupportedCurrency` if the currency code is not recognized
    /// - `DuplicateInstallment` if two installments share a number
    #[instrument(level = "debug", skip(self, record), fields(policy_id = %record.policy_id))]
    pub fn load(&self, record: ScheduleRecord) -> Result<FinanceSchedule, FinanceError> {
        let currency = self.currency(record.currency.as_deref())?;
        let business_type = BusinessType::normalize(record.type_of_business.as_deref());

        let installments = installment_numbers(&record.installments)
            .into_iter()
            .zip(&record.installments)
            .map(|(number, inst)| self.installment(number, inst))
            .collect();

        let schedule = FinanceSchedule::new(record.policy_id, currency, business_type)
            .with_id(record.id.unwrap_or_else(ScheduleId::new_v7))
            .with_parties(record.client_id, record.insurance_id, record.source_business_id)
            .with_commission_rates(
                rate(record.commission_gross.as_ref()),
                rate(record.commission_to_source.as_ref()),
            )
            .with_reference(PolicyReference {
                policy_number: record.policy_number,
                transaction_number: record.transaction_number,
                client_name: record.client_name,
                insurer_name: record.insurer_name,
            })
            .with_installments(installments)?;

        Ok(schedule)
    }

    /// Normalizes many stored schedules, stopping at the first error
    pub fn load_all<I>(&self, records: I) -> Result<Vec<FinanceSchedule>, FinanceError>
    where
        I: IntoIterator<Item = ScheduleRecord>,
    {
        records.into_iter().map(|r| self.load(r)).collect()
    }

    /// Normalizes a stored entry
    pub fn entry(&self, record: &EntryRecord) -> Entry {
        let amount = coerce_amount(record.amount.as_ref());
        if amount.is_sign_negative() && !amount.is_zero() {
            warn!(%amount, description = ?record.description, "Negative entry amount loaded");
        }

        Entry {
            description: record.description.as_deref().unwrap_or_default().trim().to_string(),
            due_date: coerce_date(record.due_date.as_deref()),
            amount,
            status: EntryStatus::normalize(record.status.as_deref()),
            paid_date: coerce_date(record.paid_date.as_deref()),
        }
    }

    fn installment(&self, number: u32, record: &InstallmentRecord) -> Installment {
        Installment {
            number,
            entries: record.entries.iter().map(|e| self.entry(e)).collect(),
        }
    }

    fn currency(&self, code: Option<&str>) -> Result<Currency, FinanceError> {
        match code.map(str::trim) {
            None | Some("") => Ok(self.default_currency),
            Some(code) => code
                .parse()
                .map_err(|_| FinanceError::UnsupportedCurrency(code.to_string())),
        }
    }
}

/// Coerces a stored amount to a number; missing or non-numeric becomes zero
pub fn coerce_amount(value: Option<&Value>) -> Decimal {
    value.and_then(coerce_number).unwrap_or(Decimal::ZERO)
}

/// Coerces a stored date; empty or malformed becomes absent
pub fn coerce_date(value: Option<&str>) -> Option<NaiveDate> {
    match parse_calendar_date(value?) {
        Ok(date) => Some(date),
        Err(TemporalError::EmptyDate) => None,
        Err(err) => {
            warn!(error = %err, "Ignoring malformed date");
            None
        }
    }
}

/// Resolves installment numbers in record order
///
/// Explicit numbers are kept as stored. An unnumbered installment takes its
/// 1-based position, or the next number above it that no other installment
/// uses.
fn installment_numbers(records: &[InstallmentRecord]) -> Vec<u32> {
    let explicit: Vec<Option<u32>> = records
        .iter()
        .map(|r| {
            r.installment
                .as_ref()
                .and_then(coerce_number)
                .and_then(|n| n.trunc().to_u32())
        })
        .collect();
    let mut taken: HashSet<u32> = explicit.iter().flatten().copied().collect();

    explicit
        .into_iter()
        .enumerate()
        .map(|(idx, number)| {
            number.unwrap_or_else(|| {
                let mut candidate = u32::try_from(idx + 1).unwrap_or(u32::MAX);
                while taken.contains(&candidate) && candidate < u32::MAX {
                    candidate += 1;
                }
                taken.insert(candidate);
                candidate
            })
        })
        .collect()
}

fn coerce_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| n.as_f64().and_then(Decimal::from_f64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Some(Decimal::ZERO);
            }
            s.parse::<Decimal>()
                .ok()
                .or_else(|| Decimal::from_scientific(s).ok())
        }
        _ => None,
    }
}

fn rate(value: Option<&Value>) -> Option<Rate> {
    value.and_then(coerce_number).map(Rate::from_percentage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_amount_coercion() {
        assert_eq!(coerce_amount(None), dec!(0));
        assert_eq!(coerce_amount(Some(&json!(null))), dec!(0));
        assert_eq!(coerce_amount(Some(&json!(1500000))), dec!(1500000));
        assert_eq!(coerce_amount(Some(&json!(1234.56))), dec!(1234.56));
        assert_eq!(coerce_amount(Some(&json!("250000.50"))), dec!(250000.50));
        assert_eq!(coerce_amount(Some(&json!(" 1e3 "))), dec!(1000));
        assert_eq!(coerce_amount(Some(&json!(""))), dec!(0));
        assert_eq!(coerce_amount(Some(&json!("abc"))), dec!(0));
        assert_eq!(coerce_amount(Some(&json!(true))), dec!(0));
    }

    #[test]
    fn test_date_coercion() {
        assert_eq!(coerce_date(None), None);
        assert_eq!(coerce_date(Some("")), None);
        assert_eq!(coerce_date(Some("not a date")), None);
        assert_eq!(coerce_date(Some("2024-05-01")), NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    fn numbered(number: Value) -> InstallmentRecord {
        InstallmentRecord {
            installment: Some(number),
            entries: vec![],
        }
    }

    #[test]
    fn test_installment_number_defaults_to_position() {
        let records = vec![
            InstallmentRecord::default(),
            numbered(json!("7")),
            InstallmentRecord::default(),
        ];
        assert_eq!(installment_numbers(&records), vec![1, 7, 3]);
    }

    #[test]
    fn test_unnumbered_installment_skips_taken_numbers() {
        let records = vec![numbered(json!(2)), InstallmentRecord::default()];
        assert_eq!(installment_numbers(&records), vec![2, 3]);

        let records = vec![
            InstallmentRecord::default(),
            InstallmentRecord::default(),
            numbered(json!(1)),
            numbered(json!(3)),
        ];
        assert_eq!(installment_numbers(&records), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_explicit_duplicates_are_kept_for_validation() {
        let records = vec![numbered(json!(1)), numbered(json!("1"))];
        assert_eq!(installment_numbers(&records), vec![1, 1]);
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let loader = RecordLoader::default();
        assert!(matches!(
            loader.currency(Some("XXX")),
            Err(FinanceError::UnsupportedCurrency(code)) if code == "XXX"
        ));
        assert_eq!(loader.currency(Some(" ")).unwrap(), Currency::IDR);
    }
}
