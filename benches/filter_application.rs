use std::hint::black_box;

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use legal_case_explorer::filters::{apply_filters, parse_filter, sort_results};
use legal_case_explorer::models::{CaseDetail, CaseStatus, Parties, SearchResult, SortOrder};

const JURISDICTIONS: [&str; 5] = ["California", "New York", "Texas", "Florida", "Illinois"];
const CATEGORIES: [&str; 4] = ["Employment", "Contract Dispute", "Personal Injury", "Environmental"];

/// Generate synthetic case records
fn generate_cases(num_cases: usize) -> Vec<CaseDetail> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (0..num_cases)
        .map(|i| CaseDetail {
            id: i.to_string(),
            title: format!("Plaintiff {} v. Defendant {}", i, i % 97),
            summary: format!("Dispute number {} concerning {}", i, CATEGORIES[i % 4].to_lowercase()),
            date: base + Days::new((i % 1500) as u64),
            court: format!("U.S. District Court, District {}", i % 12),
            jurisdiction: JURISDICTIONS[i % 5].to_string(),
            judges: vec![format!("Judge {}", i % 40)],
            parties: Parties { plaintiff: format!("Plaintiff {}", i), defendant: format!("Defendant {}", i % 97) },
            citations: Vec::new(),
            full_text: String::new(),
            categories: vec![CATEGORIES[i % 4].to_string()],
            status: if i % 3 == 0 { CaseStatus::Decided } else { CaseStatus::Pending },
            analysis: None,
        })
        .collect()
}

fn bench_filter_application(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_application");

    let scenarios = [
        ("query_only", "plaintiff 1", ""),
        ("jurisdiction_filter", "", "jurisdiction:Texas"),
        ("court_substring", "", "court:\"district 7\""),
        ("complex_filter", "dispute", "category:Employment status:decided from:2021-01-01 to:2022-12-31"),
    ];

    for (name, query, expr) in scenarios {
        let filters = parse_filter(expr).unwrap();
        for size in [1_000, 10_000, 50_000] {
            let cases = generate_cases(size);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| apply_filters(black_box(&cases), black_box(query), black_box(&filters)).len());
            });
        }
    }

    group.finish();
}

fn bench_sort_results(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_results");

    for size in [1_000, 10_000] {
        let results: Vec<SearchResult> = generate_cases(size).iter().map(SearchResult::from).collect();
        for order in [SortOrder::Date, SortOrder::Relevance] {
            group.bench_with_input(BenchmarkId::new(order.to_string(), size), &size, |b, _| {
                b.iter(|| {
                    let mut batch = results.clone();
                    sort_results(&mut batch, order, black_box("dispute"));
                    batch
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filter_application, bench_sort_results);
criterion_main!(benches);
