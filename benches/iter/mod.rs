use std::hint::black_box;

use arbor::Tree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::{new_range_tree, Lfsr};

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_tree(&mut g, n_values);
        bench_interval_tree(&mut g, n_values);
    }
}

/// Measure a full in-order walk of an ordered tree of `n_values`.
fn bench_tree<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let mut t = Tree::new();

    for _i in 0..n_values {
        t.insert(rand.next());
    }

    let bench_name = BenchName {
        n_values,
        bench_name: "tree",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

/// As [`bench_tree()`], walking the `(range, value)` tuples of an interval
/// tree.
fn bench_interval_tree<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let mut t = new_range_tree();

    for _i in 0..n_values {
        t.insert(rand.next_range()).unwrap();
    }

    let bench_name = BenchName {
        n_values,
        bench_name: "interval_tree",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}
