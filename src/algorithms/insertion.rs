//! Insertion sort

use crate::step::{Step, StepLog};

/// Insertion sort
///
/// Each pass opens with one highlight of `(i - 1, i)`. Shifting an element
/// right records the shifted-in value at its new slot, and the key is
/// recorded once at the slot where it lands. A key that is already in place
/// records no relocation.
pub fn sort(array: &mut [u32], log: &mut StepLog) {
    for i in 1..array.len() {
        let key = array[i];
        let mut j = i;

        log.flash(i - 1, Some(i));

        while j > 0 && array[j - 1] > key {
            array[j] = array[j - 1];
            log.push(Step::relocate(j, array[j]));
            j -= 1;
        }

        if j != i {
            array[j] = key;
            log.push(Step::relocate(j, key));
        }
    }
}
