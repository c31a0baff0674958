//! Partition ("quick") sort
//!
//! Iterative Lomuto partitioning driven by an explicit stack of inclusive
//! `(low, high)` ranges. The pivot is always the last element of the range.
//!
//! A partition records:
//! 1. a pivot highlight on `high` (single-element form)
//! 2. for each scanned element, a highlight/revert pair; the pair form
//!    `(store, j)` when an exchange follows, the single form otherwise
//! 3. the pivot revert, then the pivot placement exchange
//!
//! Self-exchanges (`store == j`, or the pivot already at `store`) change
//! nothing on screen and record no relocations.

use crate::step::{ColorTag, Step, StepLog};

/// Quick sort without recursion
pub fn sort(array: &mut [u32], log: &mut StepLog) {
    if array.len() < 2 {
        return;
    }

    let mut ranges: Vec<(usize, usize)> = vec![(0, array.len() - 1)];

    while let Some((low, high)) = ranges.pop() {
        let p = partition(array, low, high, log);

        if p > low + 1 {
            ranges.push((low, p - 1));
        }
        if p + 1 < high {
            ranges.push((p + 1, high));
        }
    }
}

/// Partition `array[low..=high]` around `array[high]`, returning the pivot's
/// final index
fn partition(array: &mut [u32], low: usize, high: usize, log: &mut StepLog) -> usize {
    let pivot = array[high];
    log.push(Step::single(high, ColorTag::Pivot));

    // Next slot for an element <= pivot
    let mut store = low;

    for j in low..high {
        if array[j] <= pivot {
            if store != j {
                log.flash(store, Some(j));
                array.swap(store, j);
                log.exchanged(array, store, j);
            } else {
                log.flash(j, None);
            }
            store += 1;
        } else {
            log.flash(j, None);
        }
    }

    log.push(Step::single(high, ColorTag::Base));

    if store != high {
        array.swap(store, high);
        log.exchanged(array, store, high);
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_marks_last_element_as_pivot() {
        let mut array = vec![3, 1, 2];
        let mut log = StepLog::new(3);
        sort(&mut array, &mut log);

        assert_eq!(array, vec![1, 2, 3]);
        assert_eq!(log.get(0), Some(&Step::single(2, ColorTag::Pivot)));
    }

    #[test]
    fn test_partition_places_pivot() {
        let mut array = vec![3, 1, 2];
        let mut log = StepLog::new(3);
        let p = partition(&mut array, 0, 2, &mut log);

        assert_eq!(p, 1);
        assert_eq!(array, vec![1, 2, 3]);
        assert_eq!(
            log.as_slice(),
            &[
                Step::single(2, ColorTag::Pivot),
                Step::single(0, ColorTag::Comparison),
                Step::single(0, ColorTag::Base),
                Step::compare(0, 1, ColorTag::Comparison),
                Step::compare(0, 1, ColorTag::Base),
                Step::relocate(0, 1),
                Step::relocate(1, 3),
                Step::single(2, ColorTag::Base),
                Step::relocate(1, 2),
                Step::relocate(2, 3),
            ]
        );
    }

    #[test]
    fn test_pivot_highlight_is_reverted() {
        let mut array = vec![9, 7, 5, 3, 1];
        let mut log = StepLog::new(5);
        sort(&mut array, &mut log);

        assert!(log.audit().is_balanced());
    }
}
