//! Property-based tests for the priority queue
//!
//! Every operation is mirrored on a sorted `Vec` model. Debug builds also
//! re-verify the full heap internally after each mutation.

use std::cmp::Ordering;

use matching_engine::heap::SELF_CHECK;
use matching_engine::PriorityQueue;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    ReplaceTop(i32),
    PushAndPop(i32),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-50i32..50).prop_map(Op::Push),
        2 => Just(Op::Pop),
        1 => (-50i32..50).prop_map(Op::ReplaceTop),
        1 => (-50i32..50).prop_map(Op::PushAndPop),
    ]
}

fn compare_numbers(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

/// Sorted model of the queue contents
struct Model(Vec<i32>);

impl Model {
    fn insert(&mut self, value: i32) {
        let at = self.0.partition_point(|&v| v <= value);
        self.0.insert(at, value);
    }

    fn take_min(&mut self) -> Option<i32> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

proptest! {
    #[test]
    fn prop_heapify_then_drain_is_sorted(values in prop::collection::vec(any::<i32>(), 0..200)) {
        let heap = PriorityQueue::new(values.clone(), compare_numbers);
        prop_assert!(heap.is_heap_ordered());

        let mut expected = values;
        expected.sort();
        prop_assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    fn prop_operations_keep_heap_order(
        initial in prop::collection::vec(-50i32..50, 0..30),
        ops in prop::collection::vec(arb_op(), 0..100),
    ) {
        let mut heap = PriorityQueue::new(initial.clone(), compare_numbers);
        let mut model = Model(Vec::new());
        for value in initial {
            model.insert(value);
        }

        for op in ops {
            match op {
                Op::Push(value) => {
                    heap.push(value);
                    model.insert(value);
                }
                Op::Pop => {
                    prop_assert_eq!(heap.pop(), model.take_min());
                }
                Op::ReplaceTop(value) => {
                    let expected = model.take_min();
                    model.insert(value);
                    prop_assert_eq!(heap.replace_top(value), expected);
                }
                Op::PushAndPop(value) => {
                    model.insert(value);
                    let expected = model.take_min();
                    prop_assert_eq!(Some(heap.push_and_pop(value)), expected);
                }
            }

            prop_assert!(heap.is_heap_ordered());
            prop_assert_eq!(heap.len(), model.0.len());
            prop_assert_eq!(heap.peek_top(), model.0.first());
        }
    }

    #[test]
    fn prop_push_and_pop_returns_minimum(
        values in prop::collection::vec(-100i32..100, 0..50),
        value in -100i32..100,
    ) {
        let mut heap = PriorityQueue::new(values.clone(), compare_numbers);
        let expected_min = values.iter().copied().chain(std::iter::once(value)).min();

        prop_assert_eq!(Some(heap.push_and_pop(value)), expected_min);

        let mut rest: Vec<i32> = values.into_iter().chain(std::iter::once(value)).collect();
        rest.sort();
        rest.remove(0);
        prop_assert_eq!(heap.into_sorted_vec(), rest);
    }
}

#[test]
fn drains_reference_sequence_in_order() {
    let mut heap = PriorityQueue::new(
        vec![9, 3, 6, 4, 7, 8, 2, 24, 2, 6, 7, 8, 3, 80],
        compare_numbers,
    );

    for expected in [2, 2, 3, 3, 4, 6, 6, 7, 7, 8, 8, 9, 24, 80] {
        assert_eq!(heap.pop(), Some(expected));
    }
    assert_eq!(heap.pop(), None);
}

#[test]
fn self_check_only_in_debug_builds() {
    // Test and bench targets link the library without the heap-check feature
    assert_eq!(SELF_CHECK, cfg!(debug_assertions));
}
