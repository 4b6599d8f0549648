use arbor::Tree;
use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::{new_range_tree, Lfsr};

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_tree(&mut g, n_values);
        bench_interval_tree(&mut g, n_values);
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// values into an empty ordered tree.
fn bench_tree<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let bench_name = BenchName {
        bench: "tree",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Values inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (Tree::new(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.insert(rand.next());
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}

/// As [`bench_tree()`], but inserting randomly generated intervals into an
/// empty interval tree.
fn bench_interval_tree<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let bench_name = BenchName {
        bench: "interval_tree",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Values inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (new_range_tree(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.insert(rand.next_range()).unwrap();
                }
                t
            },
            criterion::BatchSize::PerIteration,
        );
    });
}
