//! Bar chart pane
//!
//! Renders the [`BarRow`] the player mutates: one bar per slot, height from
//! the shown magnitude, the magnitude itself as the bar's label, and the color
//! of the last highlight applied to that slot.

use crate::playback::{BarRow, DisplayTarget};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

const BAR_GAP: u16 = 1;

/// Widest bar that still fits `count` bars into `width` columns
fn bar_width(width: u16, count: usize) -> u16 {
    let count = u16::try_from(count).unwrap_or(u16::MAX).max(1);
    let gaps = BAR_GAP.saturating_mul(count - 1);
    (width.saturating_sub(gaps) / count).max(1)
}

/// Render the bars pane
pub fn render_bars_pane(frame: &mut Frame, area: Rect, row: &BarRow, title: &str, is_playing: bool) {
    let border_style = if is_playing {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    if row.is_empty() {
        let paragraph = Paragraph::new("(no array, press g to generate)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let width = bar_width(inner_width, row.len());

    let bars: Vec<Bar> = row
        .bars()
        .iter()
        .map(|bar| {
            let color = DEFAULT_THEME.tag_color(bar.color);
            Bar::default()
                .value(u64::from(bar.value))
                .text_value(bar.value.to_string())
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(DEFAULT_THEME.bar_label)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .max(u64::from(row.max_value()))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
