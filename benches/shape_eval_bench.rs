use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use isoshape::shape::{ShapeResult, evaluate_shape_into, initialize, tabulate};
use isoshape::topology::{ElementKind, lookup_topology};

/// Gauss-like sample points spread over the reference element.
fn sample_points(kind: ElementKind, count: usize) -> Vec<Vec<f64>> {
    let dim = lookup_topology(kind).geom_dim;
    (0..count)
        .map(|i| {
            let t = (i as f64 + 0.5) / count as f64;
            (0..dim)
                .map(|d| {
                    if kind.cell_type().is_simplex() {
                        t / (dim as f64 + 1.0) * (d as f64 + 1.0) / dim as f64
                    } else {
                        2.0 * ((t + 0.37 * d as f64) % 1.0) - 1.0
                    }
                })
                .collect()
        })
        .collect()
}

fn bench_shape_eval(c: &mut Criterion) {
    initialize();
    let mut group = c.benchmark_group("shape_eval");

    for kind in [
        ElementKind::Qua4,
        ElementKind::Qua9,
        ElementKind::Tri10,
        ElementKind::Tet10,
        ElementKind::Hex8,
        ElementKind::Hex20,
    ] {
        let points = sample_points(kind, 27);

        group.bench_with_input(BenchmarkId::new("values", kind), &kind, |b, &kind| {
            let mut out = ShapeResult::for_kind(kind);
            b.iter(|| {
                for r in &points {
                    evaluate_shape_into(kind, r, false, &mut out).unwrap();
                    black_box(out.values());
                }
            });
        });

        group.bench_with_input(
            BenchmarkId::new("values_and_derivs", kind),
            &kind,
            |b, &kind| {
                let mut out = ShapeResult::for_kind(kind);
                b.iter(|| {
                    for r in &points {
                        evaluate_shape_into(kind, r, true, &mut out).unwrap();
                        black_box(out.derivatives());
                    }
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("tabulate", kind), &kind, |b, &kind| {
            b.iter(|| {
                let tab = tabulate(kind, &points, true).unwrap();
                black_box(tab);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_shape_eval);
criterion_main!(benches);
