use criterion::{black_box, Criterion, Throughput};
use headvec::{Teardown, Vector, VectorOptions};

const ROWS: usize = 256;
const COLS: usize = 64;

fn destroy_rows(mut rows: Teardown<'_, Vector<u32>>) {
    while let Some(row) = rows.pop() {
        row.destroy();
    }
}

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_vectors");
    group.throughput(Throughput::Elements((ROWS * COLS) as u64));

    group.bench_function("build_and_destroy_grid", |b| {
        b.iter(|| {
            let mut grid = Vector::with_options(VectorOptions::new().with_free_fn(destroy_rows));
            for r in 0..ROWS {
                let mut row = Vector::new();
                for col in 0..COLS {
                    row.push(black_box((r * COLS + col) as u32));
                }
                grid.push(row);
            }
            grid.destroy();
        });
    });

    group.bench_function("deep_copy_grid", |b| {
        let grid: Vector<Vector<u32>> = (0..ROWS)
            .map(|r| (0..COLS).map(|col| (r * COLS + col) as u32).collect())
            .collect();
        b.iter(|| black_box(grid.copy()));
    });

    group.finish();
}
