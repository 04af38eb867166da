use headvec::{Teardown, Vector, VectorOptions};
use std::sync::atomic::{AtomicUsize, Ordering};

static INNER_DESTROYED: AtomicUsize = AtomicUsize::new(0);

fn destroy_inner(mut rows: Teardown<'_, Vector<i32>>) {
    // Destroy the rows last to first, counting them.
    while let Some(row) = rows.pop() {
        row.destroy();
        INNER_DESTROYED.fetch_add(1, Ordering::SeqCst);
    }
}

fn grid(rows: usize, cols: usize) -> Vector<Vector<i32>> {
    let mut outer = Vector::with_options(VectorOptions::new().with_free_fn(destroy_inner));
    for r in 0..rows {
        let row: Vector<i32> = (0..cols).map(|c| (r * cols + c) as i32).collect();
        outer.push(row);
    }
    outer
}

#[test]
fn test_inner_vectors_survive_outer_relocation() {
    let mut outer = grid(3, 5);
    let first_row = outer[0].as_ptr();

    // Growing the outer vector moves the handles, not the inner blocks.
    for _ in 0..20 {
        outer.push(Vector::new());
    }
    assert_eq!(outer[0].as_ptr(), first_row);
    assert_eq!(outer[2], [10, 11, 12, 13, 14]);

    outer[1].push(99);
    assert_eq!(outer[1].len(), 6);
    assert_eq!(outer[1][5], 99);
}

#[test]
fn test_free_hook_destroys_every_inner_vector() {
    let outer = grid(4, 3);
    assert!(outer.has_free_fn());
    let before = INNER_DESTROYED.load(Ordering::SeqCst);
    outer.destroy();
    assert!(INNER_DESTROYED.load(Ordering::SeqCst) >= before + 4);
}

#[test]
fn test_copy_clones_inner_vectors() {
    let original = grid(2, 2);
    let mut copy = original.copy();
    assert!(copy.has_free_fn());
    assert_ne!(copy[0].as_ptr(), original[0].as_ptr());

    copy[0].push(7);
    assert_eq!(original[0], [0, 1]);
    assert_eq!(copy[0], [0, 1, 7]);
}

#[test]
fn test_inner_vectors_keep_own_configuration() {
    let mut outer: Vector<Vector<u8>> = Vector::new();
    outer.push(Vector::with_initial_capacity(16));
    outer.push(Vector::new());
    assert_eq!(outer[0].capacity(), 16);
    assert_eq!(outer[1].capacity(), 4);

    let removed = outer.remove_at(0);
    assert_eq!(removed.initial_capacity(), 16);
    assert_eq!(outer.len(), 1);
}
