use cadence::{
    expand_occurrences, DateWindow, Frequency, IntervalAggregator, NextOccurrenceResolver,
    Transaction,
};
use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

fn build_sample_transactions(count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let frequencies = Frequency::ALL;

    (0..count)
        .map(|idx| {
            let anchor = start
                .checked_add_days(Days::new((idx % 365) as u64))
                .unwrap();
            let amount = Decimal::new(1_000 + (idx % 500) as i64, 2);
            let frequency = frequencies[idx % frequencies.len()];
            let txn = if idx % 4 == 0 {
                Transaction::income(amount, anchor, frequency)
            } else {
                Transaction::expense(amount, anchor, frequency)
            }
            .unwrap();
            let skip = anchor.checked_add_days(Days::new(28)).unwrap();
            txn.with_skipped_dates([skip])
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let year = DateWindow::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
    )
    .unwrap();
    let aggregator = IntervalAggregator::default();

    c.bench_function("totals_by_kind_10k_year", |b| {
        b.iter(|| {
            let totals = aggregator
                .totals_by_kind(black_box(&transactions), year)
                .expect("totals");
            black_box(totals);
        })
    });

    c.bench_function("expand_occurrences_10k_year", |b| {
        b.iter(|| {
            let occurrences = expand_occurrences(black_box(&transactions), year, 5).expect("expand");
            black_box(occurrences.len());
        })
    });
}

fn bench_next_occurrence(c: &mut Criterion) {
    let transactions = build_sample_transactions(black_box(10_000));
    let resolver = NextOccurrenceResolver::default();
    let as_of = NaiveDate::from_ymd_opt(2027, 6, 15).unwrap();

    c.bench_function("next_occurrence_10k", |b| {
        b.iter(|| {
            for txn in &transactions {
                black_box(resolver.next_occurrence_of(txn, as_of).expect("next"));
            }
        })
    });
}

criterion_group!(benches, bench_aggregation, bench_next_occurrence);
criterion_main!(benches);
