//! Array-backed binary min-heap with a caller-supplied ordering
//!
//! The element that sorts first under the comparator sits at index 0. Children
//! of index `i` live at `2i + 1` and `2i + 2`.
//!
//! Debug builds, and any build with the `heap-check` feature, re-verify the
//! complete heap after every mutation and panic on the first violation.
//! Release builds skip the check entirely. [`SELF_CHECK`] reports which one
//! was compiled in.

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};

/// Whether every mutation re-verifies the whole heap in this build
pub const SELF_CHECK: bool = cfg!(any(debug_assertions, feature = "heap-check"));

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

fn left_child(index: usize) -> usize {
    index * 2 + 1
}

fn right_child(index: usize) -> usize {
    index * 2 + 2
}

/// Priority queue ordered by `compare`, smallest element first
pub struct PriorityQueue<T, C> {
    data: Vec<T>,
    compare: C,
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Build a queue from an arbitrary sequence in O(n)
    pub fn new(initial: Vec<T>, compare: C) -> Self {
        let mut queue = Self {
            data: initial,
            compare,
        };
        queue.heapify();
        queue
    }

    /// Create an empty queue
    pub fn with_comparator(compare: C) -> Self {
        Self {
            data: Vec::new(),
            compare,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over all elements in heap (not sorted) order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Smallest element, or `None` when empty
    pub fn peek_top(&self) -> Option<&T> {
        self.data.first()
    }

    /// Mutable access to the smallest element
    ///
    /// Heap order is restored when the returned guard is dropped, so the
    /// element may be changed in ways that affect its ordering.
    pub fn peek_top_mut(&mut self) -> Option<PeekMut<'_, T, C>> {
        if self.data.is_empty() {
            None
        } else {
            Some(PeekMut {
                queue: self,
                restore: true,
            })
        }
    }

    /// Add an element to the queue
    pub fn push(&mut self, element: T) {
        self.data.push(element);
        self.sift_up(self.data.len() - 1);

        self.check_heap_property();
    }

    /// Take the smallest element off the queue
    pub fn pop(&mut self) -> Option<T> {
        let last = self.data.pop()?;
        if self.data.is_empty() {
            return Some(last);
        }

        // Move the last element to the top and let it sift down
        let top = mem::replace(&mut self.data[0], last);
        self.sift_down(0);

        self.check_heap_property();
        Some(top)
    }

    /// Replace the smallest element with `element` and return the old one
    ///
    /// On an empty queue `element` is simply inserted and `None` returned.
    pub fn replace_top(&mut self, element: T) -> Option<T> {
        if self.data.is_empty() {
            self.data.push(element);
            return None;
        }

        let top = mem::replace(&mut self.data[0], element);
        self.sift_down(0);

        self.check_heap_property();
        Some(top)
    }

    /// Push `element`, then pop the smallest element
    ///
    /// The returned element may be `element` itself, in which case the queue
    /// is left untouched.
    pub fn push_and_pop(&mut self, element: T) -> T {
        let smaller_than_top = match self.data.first() {
            Some(top) => (self.compare)(&element, top) == Ordering::Less,
            None => true,
        };
        if smaller_than_top {
            return element;
        }

        let top = mem::replace(&mut self.data[0], element);
        self.sift_down(0);

        self.check_heap_property();
        top
    }

    /// Drain the queue into a vector, smallest first
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Some(element) = self.pop() {
            sorted.push(element);
        }
        sorted
    }

    /// Whether every element sorts at or after its parent
    pub fn is_heap_ordered(&self) -> bool {
        self.first_violation().is_none()
    }

    fn first_violation(&self) -> Option<usize> {
        (1..self.data.len()).find(|&index| {
            (self.compare)(&self.data[parent(index)], &self.data[index]) == Ordering::Greater
        })
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.compare)(&self.data[a], &self.data[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 && self.less(index, parent(index)) {
            self.data.swap(index, parent(index));
            index = parent(index);
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let mut smallest = index;
            if left_child(index) < len && self.less(left_child(index), smallest) {
                smallest = left_child(index);
            }
            if right_child(index) < len && self.less(right_child(index), smallest) {
                smallest = right_child(index);
            }
            if smallest == index {
                return;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }

    fn heapify(&mut self) {
        if self.data.len() < 2 {
            return;
        }

        // All parents, bottom up
        for index in (0..=parent(self.data.len() - 1)).rev() {
            self.sift_down(index);
        }

        self.check_heap_property();
    }

    #[cfg(any(debug_assertions, feature = "heap-check"))]
    fn check_heap_property(&self) {
        if let Some(index) = self.first_violation() {
            panic!(
                "heap property violated: element {} sorts before its parent {}",
                index,
                parent(index)
            );
        }
    }

    #[cfg(not(any(debug_assertions, feature = "heap-check")))]
    #[inline(always)]
    fn check_heap_property(&self) {}
}

impl<T: Clone, C: Clone> Clone for PriorityQueue<T, C> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            compare: self.compare.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for PriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue").field("data", &self.data).finish()
    }
}

/// Guard returned by [`PriorityQueue::peek_top_mut`]
pub struct PeekMut<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    queue: &'a mut PriorityQueue<T, C>,
    restore: bool,
}

impl<'a, T, C> PeekMut<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Remove the peeked element from the queue
    pub fn pop(mut this: PeekMut<'a, T, C>) -> T {
        this.restore = false;
        // The last element takes the root's place; a guard never outlives a non-empty queue
        let top = this.queue.data.swap_remove(0);
        this.queue.sift_down(0);
        this.queue.check_heap_property();
        top
    }
}

impl<T, C> Deref for PeekMut<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.queue.data[0]
    }
}

impl<T, C> DerefMut for PeekMut<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn deref_mut(&mut self) -> &mut T {
        &mut self.queue.data[0]
    }
}

impl<T, C> Drop for PeekMut<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn drop(&mut self) {
        if self.restore {
            self.queue.sift_down(0);
            self.queue.check_heap_property();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_numbers(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    const LARGER: [i32; 14] = [9, 3, 6, 4, 7, 8, 2, 24, 2, 6, 7, 8, 3, 80];

    fn larger_sorted() -> Vec<i32> {
        let mut sorted = LARGER.to_vec();
        sorted.sort();
        sorted
    }

    #[test]
    fn empty_queue_returns_none() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);

        assert_eq!(heap.peek_top(), None);
        assert_eq!(heap.pop(), None);
        assert!(heap.peek_top_mut().is_none());
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);
        heap.push(2);
        heap.push(3);
        heap.push(1);

        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(3));
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn keeps_duplicates() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);
        for v in [2, 1, 2, 1] {
            heap.push(v);
        }

        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(2));
    }

    #[test]
    fn pushes_larger_array() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);
        for v in LARGER {
            heap.push(v);
        }

        for expected in larger_sorted() {
            assert_eq!(heap.pop(), Some(expected));
        }
        assert_eq!(heap.pop(), None);
    }

    #[test]
    fn heapifies_initial_elements() {
        let mut heap = PriorityQueue::new(vec![2, 3, 1], compare_numbers);

        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.pop(), Some(3));
    }

    #[test]
    fn heapifies_larger_array() {
        let heap = PriorityQueue::new(LARGER.to_vec(), compare_numbers);
        assert_eq!(heap.len(), LARGER.len());
        assert!(heap.is_heap_ordered());

        assert_eq!(heap.into_sorted_vec(), larger_sorted());
    }

    #[test]
    fn peek_does_not_remove() {
        let heap = PriorityQueue::new(vec![2, 3, 1], compare_numbers);

        assert_eq!(heap.peek_top(), Some(&1));
        assert_eq!(heap.peek_top(), Some(&1));
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn replaces_top() {
        let mut heap = PriorityQueue::new(vec![3, 2, 4], compare_numbers);

        assert_eq!(heap.replace_top(1), Some(2));

        assert_eq!(heap.pop(), Some(1));
        assert_eq!(heap.pop(), Some(3));
    }

    #[test]
    fn replace_top_sifts_larger_element_down() {
        let mut heap = PriorityQueue::new(vec![3, 2, 4], compare_numbers);

        assert_eq!(heap.replace_top(10), Some(2));

        assert_eq!(heap.into_sorted_vec(), vec![3, 4, 10]);
    }

    #[test]
    fn replace_top_on_empty_inserts() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);

        assert_eq!(heap.replace_top(7), None);
        assert_eq!(heap.peek_top(), Some(&7));
    }

    #[test]
    fn push_and_pop_larger_element() {
        let mut heap = PriorityQueue::new(vec![4, 2, 5], compare_numbers);

        assert_eq!(heap.push_and_pop(3), 2);

        assert_eq!(heap.pop(), Some(3));
    }

    #[test]
    fn push_and_pop_smaller_element() {
        let mut heap = PriorityQueue::new(vec![3, 2, 4], compare_numbers);

        assert_eq!(heap.push_and_pop(1), 1);

        assert_eq!(heap.pop(), Some(2));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn push_and_pop_on_empty_returns_element() {
        let mut heap = PriorityQueue::with_comparator(compare_numbers);

        assert_eq!(heap.push_and_pop(5), 5);
        assert!(heap.is_empty());
    }

    #[test]
    fn peek_mut_restores_order() {
        let mut heap = PriorityQueue::new(vec![1, 5, 3], compare_numbers);

        *heap.peek_top_mut().unwrap() = 4;

        assert!(heap.is_heap_ordered());
        assert_eq!(heap.into_sorted_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn peek_mut_pop_removes_top() {
        let mut heap = PriorityQueue::new(vec![1, 5, 3], compare_numbers);

        let top = heap.peek_top_mut().unwrap();
        assert_eq!(PeekMut::pop(top), 1);

        assert_eq!(heap.len(), 2);
        assert_eq!(heap.peek_top(), Some(&3));

        let mut single = PriorityQueue::new(vec![9], compare_numbers);
        assert_eq!(PeekMut::pop(single.peek_top_mut().unwrap()), 9);
        assert!(single.is_empty());
    }

    #[test]
    fn peek_mut_pop_drains_in_order() {
        let mut heap = PriorityQueue::new(LARGER.to_vec(), compare_numbers);

        let mut drained = Vec::new();
        while let Some(top) = heap.peek_top_mut() {
            drained.push(PeekMut::pop(top));
        }

        assert_eq!(drained, larger_sorted());
        assert!(heap.is_empty());
    }

    #[test]
    fn self_check_is_on_in_debug_builds() {
        if cfg!(debug_assertions) {
            assert!(SELF_CHECK);
        }
    }

    #[test]
    fn comparator_defines_order() {
        let heap = PriorityQueue::new(LARGER.to_vec(), |a: &i32, b: &i32| b.cmp(a));

        let mut expected = larger_sorted();
        expected.reverse();
        assert_eq!(heap.into_sorted_vec(), expected);
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "heap-check"))]
    #[should_panic(expected = "heap property violated")]
    fn inconsistent_comparator_is_caught() {
        let mut heap = PriorityQueue::new(vec![1, 2, 3], compare_numbers);
        // Flip the stored order behind the comparator's back
        heap.data.swap(0, 2);
        heap.push(4);
    }
}
