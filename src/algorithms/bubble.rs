//! Exchange ("bubble") sort

use crate::step::StepLog;

/// Bubble sort with early exit after a pass without exchanges
pub fn sort(array: &mut [u32], log: &mut StepLog) {
    let len = array.len();

    for i in 0..len {
        let mut swapped = false;

        for j in 0..len - i - 1 {
            log.flash(j, Some(j + 1));

            if array[j] > array[j + 1] {
                array.swap(j, j + 1);
                log.exchanged(array, j, j + 1);
                swapped = true;
            }
        }

        if !swapped {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{ColorTag, Step};

    #[test]
    fn test_single_pass_on_sorted_input() {
        let mut array = vec![1, 2, 3];
        let mut log = StepLog::new(3);
        sort(&mut array, &mut log);

        assert_eq!(
            log.as_slice(),
            &[
                Step::compare(0, 1, ColorTag::Comparison),
                Step::compare(0, 1, ColorTag::Base),
                Step::compare(1, 2, ColorTag::Comparison),
                Step::compare(1, 2, ColorTag::Base),
            ]
        );
    }

    #[test]
    fn test_swap_follows_its_comparison() {
        let mut array = vec![2, 1];
        let mut log = StepLog::new(2);
        sort(&mut array, &mut log);

        assert_eq!(array, vec![1, 2]);
        assert_eq!(log.get(2), Some(&Step::relocate(0, 1)));
        assert_eq!(log.get(3), Some(&Step::relocate(1, 2)));
    }
}
