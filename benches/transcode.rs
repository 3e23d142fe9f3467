use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Serialize;
use treetable::{flatten, merge, to_value, unflatten, ColumnMap, Table, Value};

#[derive(Serialize, Clone)]
struct Order {
    id: u32,
    customer: Customer,
    lines: Vec<Line>,
}

#[derive(Serialize, Clone)]
struct Customer {
    name: String,
    city: String,
}

#[derive(Serialize, Clone)]
struct Line {
    sku: String,
    qty: u32,
    price: f64,
}

fn order_tree(lines: usize) -> Value {
    let order = Order {
        id: 17,
        customer: Customer {
            name: "Alice".to_string(),
            city: "Oslo".to_string(),
        },
        lines: (0..lines)
            .map(|i| Line {
                sku: format!("SKU{}", i),
                qty: (i % 9 + 1) as u32,
                price: 9.99 + i as f64,
            })
            .collect(),
    };
    to_value(&order).unwrap()
}

fn benchmark_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for size in [10, 100, 1000].iter() {
        let tree = order_tree(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| flatten(black_box(&tree)))
        });
    }

    group.finish();
}

fn benchmark_unflatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("unflatten");

    for size in [10, 100, 1000].iter() {
        let table = flatten(&order_tree(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| unflatten(black_box(&table)))
        });
    }

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let tree = order_tree(100);

    c.bench_function("roundtrip_100_lines", |b| {
        b.iter(|| {
            let table = flatten(black_box(&tree)).unwrap();
            unflatten(&table)
        })
    });
}

fn benchmark_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [10, 100, 1000].iter() {
        let old = Table::new(
            vec!["id".to_string(), "name".to_string()],
            (0..*size)
                .map(|i| vec![Value::from(i as i64), Value::from(format!("row{}", i))])
                .collect(),
        )
        .unwrap();
        let new = Table::new(
            vec!["id".to_string(), "score".to_string()],
            (0..*size)
                .map(|i| vec![Value::from(i as i64), Value::from(i as i64 * 3)])
                .collect(),
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut old = old.clone();
                let mut col_map = ColumnMap::new();
                merge(&mut old, black_box(&new), &["id"], &mut col_map)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten,
    benchmark_unflatten,
    benchmark_roundtrip,
    benchmark_merge
);
criterion_main!(benches);
