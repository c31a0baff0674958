//! Display targets the player drives
//!
//! A [`DisplayTarget`] is an index-addressable row of visual elements, one per
//! logical array position. [`BarRow`] is the in-memory row used by the TUI and
//! by tests that compare final visual states.

use crate::step::ColorTag;

/// Index-aligned collection of visual elements
pub trait DisplayTarget {
    /// Number of visual elements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace any prior rendering with one element per value, in index order
    fn render_initial(&mut self, values: &[u32]);

    /// Show `value` (size and label) at slot `index`
    fn set_magnitude(&mut self, index: usize, value: u32);

    /// Color the element at slot `index`
    fn set_color(&mut self, index: usize, tag: ColorTag);
}

/// Controls the user interacts with between runs
pub trait ControlSurface {
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// One rendered bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub value: u32,
    pub color: ColorTag,
}

/// Row of bars with a lockable control surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    bars: Vec<Bar>,
    controls_enabled: bool,
}

impl BarRow {
    pub fn new() -> Self {
        BarRow {
            bars: Vec::new(),
            controls_enabled: true,
        }
    }

    pub fn from_values(values: &[u32]) -> Self {
        let mut row = Self::new();
        row.render_initial(values);
        row
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Magnitudes currently shown, in slot order
    pub fn values(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.value).collect()
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    /// Tallest bar, used to scale the chart
    pub fn max_value(&self) -> u32 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

impl Default for BarRow {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayTarget for BarRow {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn render_initial(&mut self, values: &[u32]) {
        self.bars = values
            .iter()
            .map(|&value| Bar {
                value,
                color: ColorTag::Base,
            })
            .collect();
    }

    fn set_magnitude(&mut self, index: usize, value: u32) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.value = value;
        }
    }

    fn set_color(&mut self, index: usize, tag: ColorTag) {
        if let Some(bar) = self.bars.get_mut(index) {
            bar.color = tag;
        }
    }
}

impl ControlSurface for BarRow {
    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_initial_replaces_bars() {
        let mut row = BarRow::from_values(&[1, 2, 3]);
        row.set_color(1, ColorTag::Comparison);
        row.render_initial(&[7, 8]);

        assert_eq!(row.len(), 2);
        assert_eq!(row.values(), vec![7, 8]);
        assert!(row.bars().iter().all(|b| b.color == ColorTag::Base));
    }

    #[test]
    fn test_set_magnitude_in_place() {
        let mut row = BarRow::from_values(&[5, 6]);
        row.set_magnitude(0, 42);

        assert_eq!(row.values(), vec![42, 6]);
        assert_eq!(row.max_value(), 42);
    }
}
