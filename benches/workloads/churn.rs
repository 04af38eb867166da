use criterion::{black_box, Criterion, Throughput};
use headvec::Vector;

const OPS: usize = 10_000;

pub fn run(c: &mut Criterion) {
    bench_grow_shrink(c);
    bench_boundary_oscillation(c);
}

/// Fill to a size, drain back to empty. Every doubling and halving relocates.
fn bench_grow_shrink(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn_grow_shrink");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(10);

    for size in [64usize, 4096, 65_536] {
        group.throughput(Throughput::Elements(2 * size as u64));
        group.bench_function(format!("grow_shrink_{size}"), |b| {
            b.iter(|| {
                let mut v = Vector::new();
                for i in 0..size {
                    v.push(black_box(i));
                }
                while !v.is_empty() {
                    black_box(v.pop());
                }
            });
        });
    }

    group.finish();
}

/// Push and pop across a capacity boundary, the worst case for a policy
/// that shrinks as eagerly as it grows.
fn bench_boundary_oscillation(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn_oscillation");
    group.throughput(Throughput::Elements(OPS as u64));

    group.bench_function("oscillate_at_1024", |b| {
        // Full at 1024: the first push doubles, the second pop halves.
        let mut v: Vector<u64> = (0..1024).collect();
        b.iter(|| {
            for i in 0..OPS / 4 {
                v.push(black_box(i as u64));
                black_box(v.pop());
                black_box(v.pop());
                v.push(black_box(i as u64));
            }
        });
    });

    group.finish();
}
