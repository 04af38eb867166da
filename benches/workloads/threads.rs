use criterion::{black_box, Criterion, Throughput};
use headvec::Vector;
use std::sync::mpsc;
use std::thread;

const BATCHES: usize = 2_000;
const BATCH_LEN: usize = 32;

pub fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("threads_remote_free");

    for t in [2, 4, 8] {
        let pairs = t / 2;
        group.throughput(Throughput::Elements((BATCHES * pairs) as u64));

        group.bench_function(format!("vectors_{t}_threads"), |b| {
            b.iter(|| {
                let mut handles = Vec::with_capacity(t);

                for _ in 0..pairs {
                    let (tx, rx) = mpsc::channel::<Vector<usize>>();

                    handles.push(thread::spawn(move || {
                        for i in 0..BATCHES {
                            let batch: Vector<usize> = (i..i + BATCH_LEN).collect();
                            if tx.send(batch).is_err() {
                                break;
                            }
                        }
                    }));

                    // Blocks allocated on one thread are released on another.
                    handles.push(thread::spawn(move || {
                        while let Ok(batch) = rx.recv() {
                            black_box(batch.len());
                        }
                    }));
                }

                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}
