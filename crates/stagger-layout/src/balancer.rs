#![forbid(unsafe_code)]

//! Greedy shortest-stack partitioning and placement.
//!
//! Items are taken in input order and each one goes to the stack whose
//! running U total is currently smallest, ties going to the lowest stack
//! index. Items are not sorted by size first, so the result depends only on
//! the input order and is fully reproducible.
//!
//! The final U totals of any two stacks differ by at most the largest single
//! item extent.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use stagger_core::geometry::{Rect, Size};

use crate::axis::{Orientation, UvPoint, UvSize};
use crate::config::StackConfig;
use crate::metrics::StackMetrics;

/// Stack counts above this use the heap selector.
pub const HEAP_THRESHOLD: usize = 16;

/// One stack of a single arrangement pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stack {
    items: Vec<usize>,
    total_u: f64,
}

impl Stack {
    /// Input indices of the items in this stack, in placement order.
    #[inline]
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Sum of the U extents of the items (spacing excluded).
    #[inline]
    pub fn total_u(&self) -> f64 {
        self.total_u
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn push(&mut self, index: usize, extent_u: f64) {
        self.items.push(index);
        self.total_u += extent_u;
    }
}

/// Strategy used to find the shortest stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector {
    /// Pick linear scan or heap from the stack count.
    #[default]
    Auto,
    /// O(stacks) scan per item.
    Linear,
    /// O(log stacks) per item.
    Heap,
}

impl Selector {
    fn resolve(self, stack_count: usize) -> Self {
        match self {
            Self::Auto if stack_count > HEAP_THRESHOLD => Self::Heap,
            Self::Auto => Self::Linear,
            other => other,
        }
    }
}

/// Partition `extents_u` into `stack_count` stacks.
///
/// A `stack_count` of zero is treated as one.
pub fn partition(extents_u: &[f64], stack_count: usize) -> Vec<Stack> {
    partition_with(extents_u, stack_count, Selector::Auto)
}

/// Partition with an explicit [`Selector`]. Every selector yields the same
/// stacks.
pub fn partition_with(extents_u: &[f64], stack_count: usize, selector: Selector) -> Vec<Stack> {
    let stack_count = stack_count.max(1);
    let mut stacks = vec![Stack::default(); stack_count];
    match selector.resolve(stack_count) {
        Selector::Heap => partition_heap(extents_u, &mut stacks),
        _ => partition_linear(extents_u, &mut stacks),
    }
    stacks
}

fn partition_linear(extents_u: &[f64], stacks: &mut [Stack]) {
    for (index, &extent) in extents_u.iter().enumerate() {
        let mut shortest = 0;
        for (candidate, stack) in stacks.iter().enumerate().skip(1) {
            if stack.total_u.total_cmp(&stacks[shortest].total_u) == Ordering::Less {
                shortest = candidate;
            }
        }
        stacks[shortest].push(index, extent);
    }
}

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    total_u: f64,
    stack: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_u
            .total_cmp(&other.total_u)
            .then(self.stack.cmp(&other.stack))
    }
}

fn partition_heap(extents_u: &[f64], stacks: &mut [Stack]) {
    let mut heap: BinaryHeap<Reverse<HeapEntry>> = (0..stacks.len())
        .map(|stack| {
            Reverse(HeapEntry {
                total_u: 0.0,
                stack,
            })
        })
        .collect();

    for (index, &extent) in extents_u.iter().enumerate() {
        let Some(Reverse(entry)) = heap.pop() else {
            return;
        };
        let stack = &mut stacks[entry.stack];
        stack.push(index, extent);
        heap.push(Reverse(HeapEntry {
            total_u: stack.total_u,
            stack: entry.stack,
        }));
    }
}

/// Result of one arrangement pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrangement {
    pub orientation: Orientation,
    pub metrics: StackMetrics,
    pub stacks: Vec<Stack>,
    /// One rectangle per input item, indexed like the input.
    pub rects: Vec<Rect>,
}

impl Arrangement {
    /// Arrange items with the given desired sizes inside `final_size`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::num::NonZeroUsize;
    /// use stagger_core::geometry::{Rect, Size};
    /// use stagger_layout::{Arrangement, StackConfig};
    ///
    /// let config = StackConfig::new().with_stack_count(NonZeroUsize::new(2)).unwrap();
    /// let desired = [Size::new(50.0, 10.0), Size::new(30.0, 10.0), Size::new(40.0, 10.0)];
    /// let arrangement = Arrangement::compute(&config, Size::new(500.0, 100.0), &desired);
    ///
    /// assert_eq!(arrangement.rects[2], Rect::new(38.0, 54.0, 40.0, 46.0));
    /// ```
    pub fn compute(config: &StackConfig, final_size: Size, desired: &[Size]) -> Self {
        let orientation = config.orientation();
        let bounds = UvSize::from_size(orientation, final_size);
        let metrics = StackMetrics::resolve(config, bounds.v);

        let extents_u: Vec<f64> = desired
            .iter()
            .map(|size| UvSize::from_size(orientation, *size).u)
            .collect();
        let stacks = partition(&extents_u, metrics.stack_count);
        let rects = place(orientation, &metrics, &stacks, &extents_u);

        Self {
            orientation,
            metrics,
            stacks,
            rects,
        }
    }

    /// Index of the stack holding input item `item`.
    pub fn stack_of(&self, item: usize) -> Option<usize> {
        self.stacks
            .iter()
            .position(|stack| stack.items.contains(&item))
    }

    /// Largest U total across stacks.
    pub fn extent_u(&self) -> f64 {
        self.stacks
            .iter()
            .map(Stack::total_u)
            .fold(0.0, f64::max)
    }
}

/// Compute one rectangle per item from a finished partition.
///
/// Returns one rectangle per entry of `extents_u`. Stack entries with no
/// matching extent are skipped.
pub fn place(
    orientation: Orientation,
    metrics: &StackMetrics,
    stacks: &[Stack],
    extents_u: &[f64],
) -> Vec<Rect> {
    let mut rects = vec![Rect::default(); extents_u.len()];
    let mut v = 0.0;
    for stack in stacks {
        let mut u = 0.0;
        for &item in &stack.items {
            let Some(&extent) = extents_u.get(item) else {
                continue;
            };
            let origin = UvPoint::from_uv(orientation, u, v).to_point();
            let size = UvSize::from_uv(orientation, extent, metrics.item_v).to_size();
            rects[item] = Rect::from_origin_size(origin, size);
            stagger_core::trace!(item, u, v, "placed item");
            u += metrics.spacing + extent;
        }
        v += metrics.item_v + metrics.spacing;
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::num::NonZeroUsize;

    fn items(stack: &Stack) -> Vec<usize> {
        stack.items().to_vec()
    }

    #[test]
    fn worked_example_partition() {
        let stacks = partition(&[50.0, 30.0, 40.0], 2);
        assert_eq!(items(&stacks[0]), vec![0]);
        assert_eq!(items(&stacks[1]), vec![1, 2]);
        assert_eq!(stacks[0].total_u(), 50.0);
        assert_eq!(stacks[1].total_u(), 70.0);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let stacks = partition(&[10.0, 10.0, 10.0, 10.0], 3);
        assert_eq!(items(&stacks[0]), vec![0, 3]);
        assert_eq!(items(&stacks[1]), vec![1]);
        assert_eq!(items(&stacks[2]), vec![2]);
    }

    #[test]
    fn empty_input_yields_empty_stacks() {
        let stacks = partition(&[], 4);
        assert_eq!(stacks.len(), 4);
        assert!(stacks.iter().all(Stack::is_empty));
    }

    #[test]
    fn zero_stack_count_is_one_stack() {
        let stacks = partition(&[1.0, 2.0], 0);
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].len(), 2);
    }

    #[test]
    fn place_skips_items_without_extent() {
        let stacks = partition(&[50.0, 30.0, 40.0], 2);
        let metrics = StackMetrics {
            stack_count: 2,
            item_v: 46.0,
            spacing: 8.0,
        };
        let rects = place(Orientation::Horizontal, &metrics, &stacks, &[50.0, 30.0]);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(0.0, 0.0, 50.0, 46.0));
        assert_eq!(rects[1], Rect::new(0.0, 54.0, 30.0, 46.0));
    }

    #[test]
    fn heap_selector_matches_linear_on_ties() {
        let extents = [5.0, 5.0, 0.0, 5.0, 0.0, 10.0, 5.0];
        assert_eq!(
            partition_with(&extents, 3, Selector::Linear),
            partition_with(&extents, 3, Selector::Heap)
        );
    }

    #[test]
    fn auto_selector_switches_on_stack_count() {
        assert_eq!(Selector::Auto.resolve(HEAP_THRESHOLD), Selector::Linear);
        assert_eq!(Selector::Auto.resolve(HEAP_THRESHOLD + 1), Selector::Heap);
        assert_eq!(Selector::Linear.resolve(1000), Selector::Linear);
    }

    #[test]
    fn vertical_is_transpose_of_horizontal() {
        let count = NonZeroUsize::new(3);
        let horizontal = StackConfig::new().with_stack_count(count).expect("count");
        let vertical = horizontal.with_orientation(Orientation::Vertical);
        let desired_h = [Size::new(20.0, 1.0), Size::new(35.0, 1.0), Size::new(5.0, 1.0)];
        let desired_v: Vec<Size> = desired_h
            .iter()
            .map(|s| Size::new(s.height, s.width))
            .collect();

        let h = Arrangement::compute(&horizontal, Size::new(400.0, 216.0), &desired_h);
        let v = Arrangement::compute(&vertical, Size::new(216.0, 400.0), &desired_v);
        for (a, b) in h.rects.iter().zip(&v.rects) {
            assert_eq!(*a, Rect::new(b.y, b.x, b.height, b.width));
        }
    }

    #[test]
    fn stack_of_and_extent() {
        let config = StackConfig::new()
            .with_stack_count(NonZeroUsize::new(2))
            .expect("count");
        let desired = [Size::new(50.0, 0.0), Size::new(30.0, 0.0), Size::new(40.0, 0.0)];
        let arrangement = Arrangement::compute(&config, Size::new(200.0, 100.0), &desired);
        assert_eq!(arrangement.stack_of(0), Some(0));
        assert_eq!(arrangement.stack_of(2), Some(1));
        assert_eq!(arrangement.stack_of(3), None);
        assert_eq!(arrangement.extent_u(), 70.0);
    }

    proptest! {
        #[test]
        fn partition_is_complete_and_ordered(
            extents in proptest::collection::vec(0.0f64..500.0, 0..80),
            stack_count in 1usize..12,
        ) {
            let stacks = partition(&extents, stack_count);
            let mut seen = vec![0usize; extents.len()];
            for stack in &stacks {
                prop_assert!(stack.items().windows(2).all(|w| w[0] < w[1]));
                for &item in stack.items() {
                    seen[item] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&n| n == 1));
        }

        #[test]
        fn greedy_bound_holds(
            extents in proptest::collection::vec(0.0f64..500.0, 0..80),
            stack_count in 1usize..12,
        ) {
            let stacks = partition(&extents, stack_count);
            let largest = extents.iter().copied().fold(0.0, f64::max);
            let max = stacks.iter().map(Stack::total_u).fold(f64::MIN, f64::max);
            let min = stacks.iter().map(Stack::total_u).fold(f64::MAX, f64::min);
            prop_assert!(max - min <= largest + 1e-9);
        }

        #[test]
        fn selectors_agree(
            extents in proptest::collection::vec(0.0f64..100.0, 0..120),
            stack_count in 1usize..40,
        ) {
            prop_assert_eq!(
                partition_with(&extents, stack_count, Selector::Linear),
                partition_with(&extents, stack_count, Selector::Heap)
            );
        }
    }
}
