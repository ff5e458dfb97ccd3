//! Performance benchmarks for the Commission Engine.
//!
//! This benchmark suite tracks the hot paths of the monthly batch:
//! - Bracket resolution for one compliance value
//! - The full two-channel commission computation
//! - Store-group rollup over a realistic batch
//! - A full batch of 100 stores over the HTTP endpoint
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use commission_engine::api::{AppState, create_router};
use commission_engine::calculation::{calculate_commission, resolve_bracket, roll_up_groups};
use commission_engine::config::{ConfigLoader, MetricKind};
use commission_engine::models::{Employee, PerformanceFigures, StoreGroup};
use commission_engine::processing::memory::InMemoryBackend;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/commissions").expect("Failed to load config")
}

fn figures(cost_center: &str, sale: &str, budget: &str) -> PerformanceFigures {
    PerformanceFigures {
        cost_center: cost_center.to_string(),
        sale: dec(sale),
        sale_budget: dec(budget),
        direct_profit: dec("9500"),
        direct_profit_budget: dec("10000"),
    }
}

/// Benchmark: resolving one bracket from the loaded rule table.
fn bench_resolve_bracket(c: &mut Criterion) {
    let config = load_config();
    let rules = config.rules();

    c.bench_function("resolve_bracket", |b| {
        b.iter(|| {
            black_box(resolve_bracket(
                rules,
                black_box("GRANDE"),
                black_box(dec("112.5")),
                MetricKind::Sale,
            ))
        })
    });
}

/// Benchmark: the full two-channel computation for one store.
fn bench_calculate_commission(c: &mut Criterion) {
    let config = load_config();
    let rules = config.rules();
    let row = figures("C101", "90000", "80000");

    c.bench_function("calculate_commission", |b| {
        b.iter(|| black_box(calculate_commission(black_box(&row), "GRANDE", rules)))
    });
}

/// Benchmark: rolling up a batch with varying group density.
fn bench_roll_up_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("roll_up_groups");

    for store_count in [10, 100, 500] {
        // Every tenth store is a principal with two secondaries.
        let rows: Vec<PerformanceFigures> = (0..store_count)
            .map(|i| figures(&format!("C{:03}", i), "90000", "80000"))
            .collect();
        let groups: HashMap<String, StoreGroup> = (0..store_count)
            .step_by(10)
            .map(|i| {
                let principal = format!("C{:03}", i);
                let group = StoreGroup {
                    principal: principal.clone(),
                    secondaries: vec![format!("C{:03}", i + 1), format!("C{:03}", i + 2)],
                };
                (principal, group)
            })
            .collect();

        group.throughput(Throughput::Elements(store_count as u64));
        group.bench_with_input(
            BenchmarkId::new("stores", store_count),
            &store_count,
            |b, _| b.iter(|| black_box(roll_up_groups(black_box(&rows), black_box(&groups)))),
        );
    }

    group.finish();
}

/// Benchmark: a full batch of 100 stores over the HTTP endpoint.
fn bench_batch_100_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let backend = InMemoryBackend::new();
    for i in 0..100 {
        let ceco = format!("C{:03}", i);
        backend.add_employee(
            &ceco,
            Employee {
                id: format!("emp_{:03}", i),
                full_name: format!("Manager {:03}", i),
                position: "JEFE DE TIENDA".to_string(),
                company: "RETAIL SA".to_string(),
                contract_start_date: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            },
        );
        backend.add_store_configuration(&ceco, "GRANDE");
    }
    let state = AppState::new(load_config(), backend);
    let router = create_router(state);

    let rows: Vec<serde_json::Value> = (0..100)
        .map(|i| {
            serde_json::json!({
                "costCenter": format!("C{:03}", i),
                "sale": 90000,
                "saleBudget": 80000,
                "directProfit": 9500,
                "directProfitBudget": 10000
            })
        })
        .collect();
    let body = serde_json::json!({
        "calculationMonth": "2025-06-01",
        "rows": rows
    })
    .to_string();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/commissions/store-manager")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_resolve_bracket,
    bench_calculate_commission,
    bench_roll_up_groups,
    bench_batch_100_http,
);
criterion_main!(benches);
