//! Recorded algorithm behavior
//!
//! This module provides the atomic unit of replay:
//! - [`Step`]: one observation, either a highlight or a relocation
//! - [`ColorTag`]: which highlight color a [`Step::Compare`] applies
//! - [`StepLog`]: the ordered, append-only recording for one run
//!
//! # Slot alignment
//!
//! A relocation never moves a visual element between slots. It rewrites the
//! magnitude shown at a fixed slot, so slot `i` on screen always corresponds
//! to logical index `i` of the array the log was generated from.

use rustc_hash::FxHashMap;

/// Highlight color carried by a comparison step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    /// Resting color; used to revert a highlight
    Base,
    /// Two (or one) elements being compared
    Comparison,
    /// Partition pivot
    Pivot,
}

impl ColorTag {
    /// Whether this tag turns a highlight on (anything but [`ColorTag::Base`])
    pub fn is_highlight(self) -> bool {
        !matches!(self, ColorTag::Base)
    }
}

/// One recorded observation of algorithm behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Color the element at `first` (and `second`, when present) with `tag`
    Compare {
        first: usize,
        second: Option<usize>,
        tag: ColorTag,
    },
    /// Show magnitude `value` at slot `at`
    Relocate { at: usize, value: u32 },
}

impl Step {
    pub fn compare(first: usize, second: usize, tag: ColorTag) -> Self {
        Step::Compare {
            first,
            second: Some(second),
            tag,
        }
    }

    pub fn single(first: usize, tag: ColorTag) -> Self {
        Step::Compare {
            first,
            second: None,
            tag,
        }
    }

    pub fn relocate(at: usize, value: u32) -> Self {
        Step::Relocate { at, value }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Step::Relocate { .. })
    }

    /// Largest slot index this step touches
    pub fn max_index(&self) -> usize {
        match *self {
            Step::Compare { first, second, .. } => second.map_or(first, |s| s.max(first)),
            Step::Relocate { at, .. } => at,
        }
    }

    /// Flat `(first, second, is_move, tag)` form
    ///
    /// `second` is `-1` for a single-element highlight and the new magnitude
    /// for a relocation. Relocations report [`ColorTag::Base`].
    pub fn to_raw(&self) -> (i64, i64, bool, ColorTag) {
        match *self {
            Step::Compare { first, second, tag } => (
                first as i64,
                second.map_or(-1, |s| s as i64),
                false,
                tag,
            ),
            Step::Relocate { at, value } => (at as i64, i64::from(value), true, ColorTag::Base),
        }
    }
}

/// A comparison step at `position` that has no partner in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unpaired {
    pub position: usize,
    pub first: usize,
    pub second: Option<usize>,
}

/// Summary produced by [`StepLog::audit`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogAudit {
    pub comparisons: usize,
    pub relocations: usize,
    /// Highlights still on at the end of the log
    pub unreverted: Vec<Unpaired>,
    /// `Base` steps with no open highlight on the same pair
    pub orphan_reverts: Vec<Unpaired>,
}

impl LogAudit {
    /// Every highlight is followed by exactly one revert
    pub fn is_balanced(&self) -> bool {
        self.unreverted.is_empty() && self.orphan_reverts.is_empty()
    }
}

/// Ordered recording of every step taken during one sort
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepLog {
    steps: Vec<Step>,
    slots: usize,
}

impl StepLog {
    /// Create an empty log for an array of `slots` elements
    pub fn new(slots: usize) -> Self {
        StepLog {
            steps: Vec::new(),
            slots,
        }
    }

    /// Append a step
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Append a highlight followed immediately by its revert
    pub fn flash(&mut self, first: usize, second: Option<usize>) {
        self.push(Step::Compare {
            first,
            second,
            tag: ColorTag::Comparison,
        });
        self.push(Step::Compare {
            first,
            second,
            tag: ColorTag::Base,
        });
    }

    /// Record an exchange of `array[a]` and `array[b]` after it happened
    pub fn exchanged(&mut self, array: &[u32], a: usize, b: usize) {
        self.push(Step::relocate(a, array[a]));
        self.push(Step::relocate(b, array[b]));
    }

    pub fn get(&self, position: usize) -> Option<&Step> {
        self.steps.get(position)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of display slots this log was generated for
    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    pub fn comparisons(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_move()).count()
    }

    pub fn relocations(&self) -> usize {
        self.steps.iter().filter(|s| s.is_move()).count()
    }

    /// Relocation steps in log order
    pub fn relocation_steps(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.steps.iter().filter_map(|s| match *s {
            Step::Relocate { at, value } => Some((at, value)),
            Step::Compare { .. } => None,
        })
    }

    /// Count steps and pair every highlight with its revert
    pub fn audit(&self) -> LogAudit {
        let mut open: FxHashMap<(usize, Option<usize>), Vec<usize>> = FxHashMap::default();
        let mut audit = LogAudit::default();

        for (position, step) in self.steps.iter().enumerate() {
            match *step {
                Step::Relocate { .. } => audit.relocations += 1,
                Step::Compare { first, second, tag } => {
                    audit.comparisons += 1;
                    let pending = open.entry((first, second)).or_default();
                    if tag.is_highlight() {
                        pending.push(position);
                    } else if pending.pop().is_none() {
                        audit.orphan_reverts.push(Unpaired {
                            position,
                            first,
                            second,
                        });
                    }
                }
            }
        }

        for ((first, second), positions) in open {
            for position in positions {
                audit.unreverted.push(Unpaired {
                    position,
                    first,
                    second,
                });
            }
        }
        audit.unreverted.sort_by_key(|u| u.position);
        audit
    }
}

impl<'a> IntoIterator for &'a StepLog {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_form_uses_sentinel() {
        assert_eq!(
            Step::single(4, ColorTag::Pivot).to_raw(),
            (4, -1, false, ColorTag::Pivot)
        );
        assert_eq!(
            Step::compare(1, 2, ColorTag::Comparison).to_raw(),
            (1, 2, false, ColorTag::Comparison)
        );
        assert_eq!(Step::relocate(3, 120).to_raw(), (3, 120, true, ColorTag::Base));
    }

    #[test]
    fn test_flash_is_balanced() {
        let mut log = StepLog::new(3);
        log.flash(0, Some(1));
        log.flash(2, None);

        let audit = log.audit();
        assert!(audit.is_balanced());
        assert_eq!(audit.comparisons, 4);
        assert_eq!(audit.relocations, 0);
    }

    #[test]
    fn test_audit_reports_open_highlight() {
        let mut log = StepLog::new(3);
        log.push(Step::single(2, ColorTag::Pivot));
        log.flash(0, Some(1));

        let audit = log.audit();
        assert_eq!(
            audit.unreverted,
            vec![Unpaired {
                position: 0,
                first: 2,
                second: None
            }]
        );
        assert!(!audit.is_balanced());
    }

    #[test]
    fn test_audit_rejects_unpaired_reverts() {
        let mut log = StepLog::new(3);
        log.push(Step::compare(0, 1, ColorTag::Base));
        log.push(Step::compare(1, 2, ColorTag::Comparison));
        log.push(Step::compare(1, 2, ColorTag::Base));
        log.push(Step::compare(1, 2, ColorTag::Base));

        let audit = log.audit();
        assert!(audit.unreverted.is_empty());
        assert_eq!(
            audit.orphan_reverts,
            vec![
                Unpaired {
                    position: 0,
                    first: 0,
                    second: Some(1)
                },
                Unpaired {
                    position: 3,
                    first: 1,
                    second: Some(2)
                },
            ]
        );
        assert!(!audit.is_balanced());
    }

    #[test]
    fn test_exchanged_records_new_values() {
        let mut array = vec![9, 4];
        array.swap(0, 1);
        let mut log = StepLog::new(2);
        log.exchanged(&array, 0, 1);

        let moves: Vec<_> = log.relocation_steps().collect();
        assert_eq!(moves, vec![(0, 4), (1, 9)]);
    }
}
