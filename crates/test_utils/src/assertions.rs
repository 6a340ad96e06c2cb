//! Custom Test Assertions
//!
//! Provides assertion helpers for summaries and aging buckets that give
//! more meaningful failure messages than plain `assert_eq!`.

use core_kernel::Money;
use domain_finance::{AgingBucket, AgingBuckets, EntryType, ScheduleSummary};
use rust_decimal::Decimal;

/// Asserts that a Money value has the given amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money mismatch: actual={} {}, expected={}",
        actual.currency().symbol(),
        actual.amount(),
        expected
    );
}

/// Asserts total, received, and outstanding for one entry type
///
/// # Panics
///
/// Panics if `entry_type` is `Other` or any amount differs
pub fn assert_triple(summary: &ScheduleSummary, entry_type: EntryType, total: Decimal, received: Decimal) {
    let triple = summary
        .for_type(entry_type)
        .unwrap_or_else(|| panic!("{entry_type} has no summary amounts"));

    assert_eq!(triple.total.amount(), total, "{entry_type} total");
    assert_eq!(triple.received.amount(), received, "{entry_type} received");
    assert_eq!(triple.outstanding.amount(), total - received, "{entry_type} outstanding");
}

/// Asserts that every triple satisfies `outstanding = total - received`
pub fn assert_summary_consistent(summary: &ScheduleSummary) {
    for entry_type in EntryType::CANONICAL {
        let Some(triple) = summary.for_type(entry_type) else {
            panic!("{entry_type} missing from summary");
        };
        assert_eq!(
            triple.outstanding.amount(),
            triple.total.amount() - triple.received.amount(),
            "Inconsistent {entry_type}: total={}, received={}, outstanding={}",
            triple.total.amount(),
            triple.received.amount(),
            triple.outstanding.amount()
        );
        assert_eq!(triple.total.currency(), summary.currency, "{entry_type} currency");
    }
}

/// Asserts the amount in each bucket; buckets not listed must be zero
pub fn assert_buckets(buckets: &AgingBuckets, expected: &[(AgingBucket, Decimal)]) {
    for (bucket, actual) in buckets.iter() {
        let want = expected
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, amount)| *amount)
            .unwrap_or(Decimal::ZERO);
        assert_eq!(actual, want, "Bucket {} holds {}, expected {}", bucket.key(), actual, want);
    }
}
