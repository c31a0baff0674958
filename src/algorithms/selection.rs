//! Selection sort

use crate::step::StepLog;

/// Selection sort
///
/// Moving the minimum tracker is bookkeeping and records nothing; only the
/// comparisons and the final exchange of each pass are observable.
pub fn sort(array: &mut [u32], log: &mut StepLog) {
    let len = array.len();

    for i in 0..len.saturating_sub(1) {
        let mut min = i;

        for j in i + 1..len {
            log.flash(j, Some(min));

            if array[j] < array[min] {
                min = j;
            }
        }

        if min != i {
            array.swap(i, min);
            log.exchanged(array, i, min);
        }
    }
}
