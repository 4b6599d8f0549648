use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};

use crate::{new_range_tree, Lfsr, RangeTree};

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
    let mut g = c.benchmark_group("overlaps");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = new_range_tree();

    for _i in 0..n_values {
        t.insert(rand.next_range()).unwrap();
    }

    bench_overlaps(n_values, g, &t);
    bench_overlaps_inclusive(n_values, g, &t);
    bench_has_overlap(n_values, g, &t);
}

macro_rules! overlap_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<M>, t: &RangeTree)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let iter = t.$name(&(42..100)).unwrap();
                        for v in iter {
                            black_box(v);
                        }
                    })
                });
            }
        }
    };
}

overlap_bench!(overlaps);
overlap_bench!(overlaps_inclusive);

/// Measure the short-circuiting existence probe rather than a full yield.
fn bench_has_overlap<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &RangeTree)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "has_overlap",
    };

    g.throughput(Throughput::Elements(1));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| black_box(t.has_overlap(&(42..100)).unwrap()))
    });
}
