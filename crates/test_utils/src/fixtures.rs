//! Pre-built Test Fixtures
//!
//! Provides ready-to-use dates, amounts, and schedules for the finance
//! domain. Everything is anchored on a fixed "today" so aging results are
//! predictable.

use chrono::{Duration, NaiveDate};
use core_kernel::{Currency, Money, PolicyId, Rate};
use domain_finance::{
    BusinessType, Entry, EntryStatus, EntryType, FinanceSchedule, Installment, PolicyReference,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// The fixed reporting day used across tests (June 30, 2024)
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    /// A date `days` before today
    pub fn days_ago(days: i64) -> NaiveDate {
        Self::today() - Duration::days(days)
    }

    /// A date `days` after today
    pub fn days_ahead(days: i64) -> NaiveDate {
        Self::today() + Duration::days(days)
    }

    /// Standard policy effective date (Jan 15, 2024)
    pub fn policy_effective() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }
}

/// Fixture for amounts in rupiah
pub struct AmountFixtures;

impl AmountFixtures {
    /// Annual premium of a standard motor policy
    pub fn premium() -> Decimal {
        dec!(1000000)
    }

    /// Commission earned on the standard premium
    pub fn commission_in() -> Decimal {
        dec!(100000)
    }

    /// Standard premium as money
    pub fn premium_money() -> Money {
        Money::new(Self::premium(), Currency::IDR)
    }

    /// Gross commission of 15%
    pub fn gross_rate() -> Rate {
        Rate::from_percentage(dec!(15))
    }

    /// Commission to source of 5%
    pub fn source_rate() -> Rate {
        Rate::from_percentage(dec!(5))
    }
}

/// Fixture for complete schedules
pub struct ScheduleFixtures;

impl ScheduleFixtures {
    /// Premium collected in full, commission ten days overdue
    pub fn premium_paid_commission_due() -> FinanceSchedule {
        let installment = Installment::new(1)
            .with_entry(
                Entry::of_type(EntryType::PremiumFromClient, AmountFixtures::premium())
                    .with_status(EntryStatus::Paid)
                    .with_paid_date(DateFixtures::days_ago(20)),
            )
            .with_entry(
                Entry::of_type(EntryType::CommissionIn, AmountFixtures::commission_in())
                    .with_status(EntryStatus::Due)
                    .with_due_date(DateFixtures::days_ago(10)),
            );

        Self::direct(vec![installment])
    }

    /// Two late insurer remittances, 40 and 70 days past due
    pub fn late_insurer_remittances() -> FinanceSchedule {
        let installment = Installment::new(1)
            .with_entry(
                Entry::of_type(EntryType::PremiumToInsurer, dec!(500000))
                    .with_status(EntryStatus::Due)
                    .with_due_date(DateFixtures::days_ago(40)),
            )
            .with_entry(
                Entry::of_type(EntryType::PremiumToInsurer, dec!(300000))
                    .with_status(EntryStatus::Due)
                    .with_due_date(DateFixtures::days_ago(70)),
            );

        Self::direct(vec![installment])
    }

    /// A single entry with a description the engine does not recognize
    pub fn miscellaneous_fee() -> FinanceSchedule {
        let installment = Installment::new(1).with_entry(
            Entry::new("Miscellaneous Fee", dec!(50000)).with_due_date(DateFixtures::days_ago(5)),
        );

        Self::direct(vec![installment])
    }

    fn direct(installments: Vec<Installment>) -> FinanceSchedule {
        FinanceSchedule::new(PolicyId::new(), Currency::IDR, BusinessType::Direct)
            .with_reference(PolicyReference {
                policy_number: Some("POL-2024-0001".to_string()),
                transaction_number: Some("TRX-0001".to_string()),
                client_name: Some("PT Maju Jaya".to_string()),
                insurer_name: Some("Asuransi Sentosa".to_string()),
            })
            .with_installments(installments)
            .unwrap()
    }
}
