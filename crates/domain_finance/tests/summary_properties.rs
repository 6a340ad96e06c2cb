//! Property tests for summaries, aging, and projection

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_finance::{summarize, AgingBuckets, Entry, EntryType, FinanceSchedule, Installment, RowProjector};

use test_utils::{assert_summary_consistent, schedule_strategy, DateFixtures};

/// A schedule with its entries, tagged by installment number, in shuffled order
fn shuffled_entries() -> impl Strategy<Value = (FinanceSchedule, Vec<(u32, Entry)>)> {
    schedule_strategy(4).prop_flat_map(|schedule| {
        let tagged: Vec<(u32, Entry)> = schedule
            .entries()
            .map(|(inst, entry)| (inst.number, entry.clone()))
            .collect();
        (Just(schedule), Just(tagged).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn outstanding_is_total_minus_received(schedule in schedule_strategy(4)) {
        assert_summary_consistent(&summarize(&schedule));
    }

    #[test]
    fn summary_ignores_entry_order((schedule, shuffled) in shuffled_entries()) {
        let mut regrouped: Vec<Installment> = Vec::new();
        for (number, entry) in shuffled {
            match regrouped.iter_mut().find(|inst| inst.number == number) {
                Some(inst) => inst.entries.push(entry),
                None => regrouped.push(Installment { number, entries: vec![entry] }),
            }
        }
        let permuted = schedule.clone().with_installments(regrouped).unwrap();

        prop_assert_eq!(summarize(&schedule), summarize(&permuted));
    }

    #[test]
    fn row_totals_match_summary(schedule in schedule_strategy(4)) {
        let summary = summarize(&schedule);
        let rows = RowProjector::new(DateFixtures::today()).project(&schedule);

        for entry_type in EntryType::CANONICAL {
            let from_rows: Decimal = rows
                .iter()
                .filter(|r| r.entry_type == entry_type)
                .map(|r| r.amount)
                .sum();
            prop_assert_eq!(summary.for_type(entry_type).unwrap().total.amount(), from_rows);
        }
    }

    #[test]
    fn aging_covers_exactly_the_open_dated_entries(schedule in schedule_strategy(4)) {
        let today = DateFixtures::today();
        let buckets = AgingBuckets::for_schedule(&schedule, today);

        let open_dated: Decimal = schedule
            .entries()
            .filter(|(_, e)| e.open_due_date().is_some())
            .map(|(_, e)| e.amount)
            .sum();
        prop_assert_eq!(buckets.total(), open_dated);

        let rows = RowProjector::new(today).project(&schedule);
        prop_assert_eq!(AgingBuckets::from_rows(&rows), buckets);
    }
}
