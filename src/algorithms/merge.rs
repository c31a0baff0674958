//! Top-down merge sort
//!
//! Halves are copied into scratch buffers without recording anything. While
//! both halves have values left, the two source positions the cursors started
//! from are highlighted and reverted before each write. Tail copies record
//! writes only.
//!
//! A write that leaves a slot's magnitude unchanged records no relocation,
//! since the slot already shows that value.

use crate::step::{Step, StepLog};

/// Merge sort
pub fn sort(array: &mut [u32], log: &mut StepLog) {
    if array.len() > 1 {
        split(array, 0, array.len() - 1, log);
    }
}

fn split(array: &mut [u32], left: usize, right: usize, log: &mut StepLog) {
    if left >= right {
        return;
    }

    let mid = left + (right - left) / 2;
    split(array, left, mid, log);
    split(array, mid + 1, right, log);
    merge(array, left, mid, right, log);
}

fn merge(array: &mut [u32], left: usize, mid: usize, right: usize, log: &mut StepLog) {
    let lower = array[left..=mid].to_vec();
    let upper = array[mid + 1..=right].to_vec();

    let (mut i, mut j) = (0, 0);
    let mut k = left;

    while i < lower.len() && j < upper.len() {
        log.flash(left + i, Some(mid + 1 + j));

        let value = if lower[i] <= upper[j] {
            i += 1;
            lower[i - 1]
        } else {
            j += 1;
            upper[j - 1]
        };
        write(array, k, value, log);
        k += 1;
    }

    for &value in lower[i..].iter().chain(&upper[j..]) {
        write(array, k, value, log);
        k += 1;
    }
}

fn write(array: &mut [u32], at: usize, value: u32, log: &mut StepLog) {
    if array[at] != value {
        array[at] = value;
        log.push(Step::relocate(at, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::ColorTag;

    #[test]
    fn test_merge_two_runs() {
        let mut array = vec![2, 5, 1, 3];
        let mut log = StepLog::new(4);
        merge(&mut array, 0, 1, 3, &mut log);

        assert_eq!(array, vec![1, 2, 3, 5]);
        assert_eq!(log.get(0), Some(&Step::compare(0, 2, ColorTag::Comparison)));
        // 1 wins, so the upper cursor advances to position 3
        assert_eq!(log.get(3), Some(&Step::compare(0, 3, ColorTag::Comparison)));
        let moves: Vec<_> = log.relocation_steps().collect();
        assert_eq!(moves, vec![(0, 1), (1, 2), (2, 3), (3, 5)]);
    }

    #[test]
    fn test_tail_copy_records_no_comparisons() {
        let mut array = vec![4, 1];
        let mut log = StepLog::new(2);
        sort(&mut array, &mut log);

        assert_eq!(array, vec![1, 4]);
        assert_eq!(log.comparisons(), 2);
        let moves: Vec<_> = log.relocation_steps().collect();
        assert_eq!(moves, vec![(0, 1), (1, 4)]);
    }
}
