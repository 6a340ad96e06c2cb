//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating schedule entries that respect
//! the domain invariants: non-negative amounts and dates close to
//! the fixture reporting day.

use chrono::Duration;
use core_kernel::{Currency, PolicyId};
use domain_finance::{BusinessType, Entry, EntryStatus, EntryType, FinanceSchedule, Installment};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::DateFixtures;

/// Strategy for currencies the brokerage books in
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::IDR),
        Just(Currency::USD),
        Just(Currency::SGD),
        Just(Currency::EUR),
    ]
}

/// Strategy for non-negative amounts with up to six decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64, 0u32..=6u32).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy for entry statuses
pub fn status_strategy() -> impl Strategy<Value = EntryStatus> {
    prop_oneof![
        Just(EntryStatus::NotDue),
        Just(EntryStatus::Due),
        Just(EntryStatus::PartialPaid),
        Just(EntryStatus::Paid),
    ]
}

/// Strategy for entry types, `Other` included
pub fn entry_type_strategy() -> impl Strategy<Value = EntryType> {
    prop_oneof![
        Just(EntryType::PremiumFromClient),
        Just(EntryType::PremiumToInsurer),
        Just(EntryType::CommissionIn),
        Just(EntryType::CommissionToSource),
        Just(EntryType::Other),
    ]
}

/// Strategy for optional due dates within a year either side of today
pub fn due_date_strategy() -> impl Strategy<Value = Option<chrono::NaiveDate>> {
    proptest::option::weighted(0.85, -365i64..365i64)
        .prop_map(|offset| offset.map(|days| DateFixtures::today() + Duration::days(days)))
}

/// Strategy for a single entry
pub fn entry_strategy() -> impl Strategy<Value = Entry> {
    (entry_type_strategy(), amount_strategy(), due_date_strategy(), status_strategy()).prop_map(
        |(entry_type, amount, due_date, status)| {
            let mut entry = Entry::of_type(entry_type, amount).with_status(status);
            entry.due_date = due_date;
            entry
        },
    )
}

/// Strategy for a schedule with up to `max_installments` installments
pub fn schedule_strategy(max_installments: usize) -> impl Strategy<Value = FinanceSchedule> {
    proptest::collection::vec(proptest::collection::vec(entry_strategy(), 0..6), 0..=max_installments)
        .prop_map(|installments| {
            let installments = installments
                .into_iter()
                .zip(1u32..)
                .map(|(entries, number)| Installment { number, entries })
                .collect();

            FinanceSchedule::new(PolicyId::new(), Currency::IDR, BusinessType::Direct)
                .with_installments(installments)
                .expect("generated installment numbers are unique")
        })
}
