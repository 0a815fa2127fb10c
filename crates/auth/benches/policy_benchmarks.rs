use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use intranet_auth::{AccessPolicy, Assigned, Role};

#[derive(Debug, Clone)]
struct Row {
    assignee: String,
}

impl Assigned for Row {
    fn assignee(&self) -> Option<&str> {
        Some(&self.assignee)
    }
}

const NAMES: [&str; 4] = ["Anna Petrova", "Mikhail Sidorov", "Dmitry Volkov", "Elena Kozlova"];

fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            assignee: NAMES[i % NAMES.len()].to_string(),
        })
        .collect()
}

fn bench_visible_resources(c: &mut Criterion) {
    let policy = AccessPolicy::standard();
    let mut group = c.benchmark_group("visible_resources");

    for size in [10usize, 1_000, 100_000] {
        let data = rows(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("employee", size), &data, |b, data| {
            b.iter(|| policy.visible_resources(Role::Employee, black_box("Anna Petrova"), data).len())
        });

        group.bench_with_input(BenchmarkId::new("manager", size), &data, |b, data| {
            b.iter(|| policy.visible_resources(Role::Manager, black_box("Elena Kozlova"), data).len())
        });
    }

    group.finish();
}

fn bench_menu(c: &mut Criterion) {
    let policy = AccessPolicy::standard();
    c.bench_function("can_view_menu_item", |b| {
        b.iter(|| {
            Role::ALL
                .iter()
                .filter(|r| policy.can_view_menu_item(**r, black_box("analytics")))
                .count()
        })
    });
}

criterion_group!(benches, bench_visible_resources, bench_menu);
criterion_main!(benches);
