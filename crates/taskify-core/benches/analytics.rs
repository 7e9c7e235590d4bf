#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taskify_core::{Priority, Task, TaskFilter, TaskId, compute_metrics, filter_and_sort};
use time::{Date, Duration};
use time::macros::date;

const REFERENCE: Date = date!(2025 - 06 - 18);

fn build_tasks(count: i64) -> Vec<Task> {
    (0..count)
        .map(|idx| Task {
            id: TaskId::new(),
            title: format!("task-{idx}"),
            description: String::new(),
            priority: match idx % 3 {
                0 => Priority::High,
                1 => Priority::Medium,
                _ => Priority::Low,
            },
            date: REFERENCE - Duration::days(idx % 60 - 10),
            tag: if idx % 2 == 0 { "work" } else { "home" }.to_owned(),
            completed: idx % 3 == 0,
            starred: idx % 7 == 0,
        })
        .collect()
}

fn metrics_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_metrics");
    for &count in &[100i64, 1_000, 10_000] {
        let tasks = build_tasks(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tasks, |b, tasks| {
            b.iter(|| black_box(compute_metrics(tasks, REFERENCE)));
        });
    }
    group.finish();
}

fn filter_sort_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_sort");
    for &count in &[100i64, 1_000, 10_000] {
        let tasks = build_tasks(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tasks, |b, tasks| {
            b.iter(|| black_box(filter_and_sort(tasks, &TaskFilter::All, REFERENCE)));
        });
    }
    group.finish();
}

criterion_group!(benches, metrics_benchmark, filter_sort_benchmark);
criterion_main!(benches);
