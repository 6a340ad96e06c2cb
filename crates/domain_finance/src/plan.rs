//! Installment plan generation
//!
//! Splits a policy premium into installments and derives the premium and
//! commission entries of each one. The generated installments are a starting
//! draft; users edit amounts and dates before the schedule is saved.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{CoreError, Rate};

use crate::classification::{BusinessType, EntryType};
use crate::error::FinanceError;
use crate::schedule::{Entry, Installment};

/// Decimal places used for every generated amount
const PLAN_DECIMAL_PLACES: u32 = 2;

/// How many installments a premium is paid in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentPlan {
    /// One payment
    Annual,
    /// Two payments
    Semester,
    /// Four payments
    Quarterly,
    /// Any number of payments; zero is treated as one
    Custom(u32),
}

impl PaymentPlan {
    /// Number of installments in the plan
    pub fn installment_count(&self) -> u32 {
        match self {
            PaymentPlan::Annual => 1,
            PaymentPlan::Semester => 2,
            PaymentPlan::Quarterly => 4,
            PaymentPlan::Custom(n) => (*n).max(1),
        }
    }
}

/// Policy terms an installment plan is generated from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTerms {
    /// Total premium of the policy
    pub premium: Decimal,
    /// Gross commission rate on premium
    pub commission_gross: Rate,
    /// Commission passed on to the source of business
    pub commission_to_source: Rate,
    /// Direct or non-direct business
    pub business_type: BusinessType,
    /// Policy effective date; every generated entry falls due on it
    pub effective_date: NaiveDate,
}

impl PlanTerms {
    /// Checks that the premium and both rates are usable
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.premium.is_sign_negative() && !self.premium.is_zero() {
            return Err(CoreError::validation(format!("premium must not be negative: {}", self.premium)));
        }
        for (name, rate) in [
            ("commission_gross", self.commission_gross),
            ("commission_to_source", self.commission_to_source),
        ] {
            let pct = rate.as_percentage();
            if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
                return Err(CoreError::validation(format!("{name} must be between 0 and 100: {pct}")));
            }
        }
        Ok(())
    }
}

/// Generates a draft installment list
///
/// Each installment gets `premium / n` rounded to cents; the last one absorbs
/// the rounding remainder so the installments add back to the premium.
/// Non-direct business only carries the two commission entries.
///
/// # Arguments
///
/// * `terms` - Premium, commission rates, business type, and effective date
/// * `plan` - Number of installments
///
/// # Errors
///
/// Returns a validation error for a negative premium or a rate outside 0-100%
pub fn generate_installments(terms: &PlanTerms, plan: PaymentPlan) -> Result<Vec<Installment>, FinanceError> {
    terms.validate()?;

    let count = plan.installment_count();
    let per_installment = terms.premium / Decimal::from(count);
    let mut allocated = Decimal::ZERO;

    let installments: Vec<Installment> = (1..=count)
        .map(|number| {
            let base = if number == count {
                round(terms.premium - allocated)
            } else {
                round(per_installment)
            };
            allocated += base;

            let commission_in = round(base * terms.commission_gross.as_decimal());
            let commission_out = round(base * terms.commission_to_source.as_decimal());

            let mut entries = Vec::with_capacity(4);
            if terms.business_type.carries_premium() {
                entries.push(planned(EntryType::PremiumFromClient, base, terms.effective_date));
                entries.push(planned(
                    EntryType::PremiumToInsurer,
                    round(base - commission_in),
                    terms.effective_date,
                ));
            }
            entries.push(planned(EntryType::CommissionIn, commission_in, terms.effective_date));
            entries.push(planned(EntryType::CommissionToSource, commission_out, terms.effective_date));

            Installment { number, entries }
        })
        .collect();

    debug!(
        installments = installments.len(),
        business_type = ?terms.business_type,
        "Generated installment plan"
    );

    Ok(installments)
}

fn planned(entry_type: EntryType, amount: Decimal, due_date: NaiveDate) -> Entry {
    Entry::of_type(entry_type, amount).with_due_date(due_date)
}

fn round(amount: Decimal) -> Decimal {
    amount.round_dp(PLAN_DECIMAL_PLACES)
}
