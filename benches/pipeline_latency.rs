use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use serde_json::json;

use txgate::pipeline::{route, validate, ComplianceEvaluator};
use txgate::rules::RuleConfig;
use txgate::Transaction;

fn bench_validate(c: &mut Criterion) {
    let payload = json!({"sender": "Alice", "amount": 500, "currency": "USD"});

    c.bench_function("validate_flat_payload", |b| {
        b.iter(|| validate(black_box(&payload)))
    });
}

fn bench_evaluate_clean(c: &mut Criterion) {
    let evaluator = ComplianceEvaluator::new(RuleConfig::default());

    c.bench_function("evaluate_clean_transaction", |b| {
        b.iter(|| {
            let tx = Transaction::new("Alice", Decimal::from(500u32), "USD");
            evaluator.evaluate(black_box(tx))
        })
    });
}

fn bench_evaluate_watchlist_hit(c: &mut Criterion) {
    let evaluator = ComplianceEvaluator::new(RuleConfig::default());

    c.bench_function("evaluate_watchlisted_sender", |b| {
        b.iter(|| {
            let tx = Transaction::new("BadGuy1", Decimal::from(50u32), "USD");
            evaluator.evaluate(black_box(tx))
        })
    });
}

fn bench_in_process_path(c: &mut Criterion) {
    let evaluator = ComplianceEvaluator::new(RuleConfig::default());
    let payload = json!({"sender": "Carol", "amount": 15000, "currency": "EUR"});

    c.bench_function("validate_evaluate_route", |b| {
        b.iter(|| {
            let tx = validate(black_box(&payload)).unwrap();
            let result = evaluator.evaluate(tx);
            route(result.status)
        })
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_evaluate_clean,
    bench_evaluate_watchlist_hit,
    bench_in_process_path
);
criterion_main!(benches);
