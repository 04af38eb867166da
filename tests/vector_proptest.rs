use headvec::{default_capacity, Vector};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Push(i16),
    Pop,
    Insert(usize, i16),
    Remove(usize),
    RemoveValue(i16),
    InsertSorted(i16),
    Clear,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any::<i16>().prop_map(Operation::Push),
        2 => Just(Operation::Pop),
        2 => (any::<usize>(), any::<i16>()).prop_map(|(i, x)| Operation::Insert(i, x)),
        2 => any::<usize>().prop_map(Operation::Remove),
        1 => (0i16..8).prop_map(Operation::RemoveValue),
        1 => any::<i16>().prop_map(Operation::InsertSorted),
        1 => Just(Operation::Clear),
    ]
}

proptest! {
    #[test]
    fn test_vector_matches_std_vec(ops in proptest::collection::vec(operation(), 1..200)) {
        let mut model: Vec<i16> = Vec::new();
        let mut vector: Vector<i16> = Vector::new();

        for op in ops {
            match op {
                Operation::Push(x) => {
                    model.push(x);
                    vector.push(x);
                }
                Operation::Pop => {
                    prop_assert_eq!(vector.try_pop().ok(), model.pop());
                }
                Operation::Insert(i, x) => {
                    let at = i % (model.len() + 1);
                    model.insert(at, x);
                    vector.insert_at(at, x);
                }
                Operation::Remove(i) => {
                    if model.is_empty() {
                        prop_assert!(vector.try_remove_at(i).is_err());
                    } else {
                        let at = i % model.len();
                        prop_assert_eq!(vector.remove_at(at), model.remove(at));
                    }
                }
                Operation::RemoveValue(x) => {
                    let expected = model.iter().position(|y| *y == x);
                    if let Some(at) = expected {
                        model.remove(at);
                    }
                    prop_assert_eq!(vector.try_remove_value(&x, |a, b| a == b).ok(), expected);
                }
                Operation::InsertSorted(x) => {
                    // Only meaningful on sorted contents.
                    model.sort();
                    vector.sort(i16::cmp);
                    let at = model.partition_point(|y| *y < x);
                    model.insert(at, x);
                    prop_assert_eq!(vector.insert_sorted(x, i16::cmp), at);
                }
                Operation::Clear => {
                    model.clear();
                    vector.clear();
                }
            }

            prop_assert_eq!(vector.as_slice(), model.as_slice());
            // Growth is decided before the length changes, shrinking after.
            let len = vector.len();
            let capacity = vector.capacity();
            prop_assert!(
                capacity == default_capacity(len, 4)
                    || (len > 0 && capacity == default_capacity(len - 1, 4)),
                "len {} capacity {}", len, capacity
            );
        }
    }

    #[test]
    fn test_sort_is_stable_and_idempotent(items in proptest::collection::vec((0u8..6, any::<u32>()), 0..300)) {
        let mut expected = items.clone();
        expected.sort_by_key(|item| item.0);

        let mut vector = Vector::from(items);
        vector.sort(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(vector.as_slice(), expected.as_slice());

        vector.sort(|a, b| a.0.cmp(&b.0));
        prop_assert_eq!(vector.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_reverse_twice_is_identity(items in proptest::collection::vec(any::<i32>(), 0..100)) {
        let mut vector = Vector::from(items.clone());
        vector.reverse();
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(vector.as_slice(), reversed.as_slice());
        vector.reverse();
        prop_assert_eq!(vector.as_slice(), items.as_slice());
    }

    #[test]
    fn test_filter_and_map(items in proptest::collection::vec(any::<i32>(), 0..100), pivot in any::<i32>()) {
        let vector = Vector::from(items.clone());

        let kept = vector.filter(|x| *x > pivot);
        prop_assert!(kept.all(|x| *x > pivot));
        prop_assert_eq!(kept.len(), items.iter().filter(|x| **x > pivot).count());
        prop_assert_eq!(kept.len(), vector.len() - vector.filter(|x| *x <= pivot).len());

        let halves = vector.map(|x| x / 2);
        prop_assert_eq!(halves.len(), vector.len());
        for (half, x) in halves.iter().zip(&items) {
            prop_assert_eq!(*half, x / 2);
        }
    }

    #[test]
    fn test_slice_matches_step_by(
        items in proptest::collection::vec(any::<u16>(), 1..100),
        start in any::<usize>(),
        end in any::<usize>(),
        step in 1usize..7,
    ) {
        let start = start % items.len();
        let end = end % (items.len() + 1);
        let vector = Vector::from(items.clone());
        let sliced = vector.slice(start, end, step);
        let expected: Vec<u16> = (start..end).step_by(step).map(|i| items[i]).collect();
        prop_assert_eq!(sliced.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_copy_is_independent(items in proptest::collection::vec(".{0,8}", 0..40)) {
        let vector: Vector<String> = items.iter().cloned().collect();
        let mut copy = vector.copy();
        prop_assert_eq!(copy.capacity(), vector.capacity());
        copy.push(String::from("extra"));
        for item in &mut copy {
            item.push('!');
        }
        prop_assert_eq!(vector.as_slice(), items.as_slice());
    }
}
