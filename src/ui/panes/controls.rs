//! Controls pane: algorithm menu, speed gauge and array readouts

use crate::algorithms::Algorithm;
use crate::playback::SpeedLevel;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Data needed to render the controls pane
pub struct ControlsRenderData<'a> {
    pub algorithm: Algorithm,
    pub speed: SpeedLevel,
    pub input: &'a [u32],
    pub sorted: Option<&'a [u32]>,
    pub enabled: bool,
}

fn format_array(values: &[u32]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Render the controls pane
pub fn render_controls_pane(frame: &mut Frame, area: Rect, data: ControlsRenderData) {
    let border_style = Style::default().fg(DEFAULT_THEME.border_normal);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Length(26),
            Constraint::Min(0),
        ])
        .split(area);

    // Dimmed while a run owns the controls
    let text_style = if data.enabled {
        Style::default().fg(DEFAULT_THEME.fg)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let items: Vec<ListItem> = Algorithm::ALL
        .iter()
        .enumerate()
        .map(|(i, &algo)| {
            let selected = algo == data.algorithm;
            let marker = if selected { "●" } else { "○" };
            let style = if selected {
                text_style.fg(DEFAULT_THEME.primary).add_modifier(Modifier::BOLD)
            } else {
                text_style
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{} {}", marker, algo.name()), style),
            ]))
        })
        .collect();

    let algorithms = List::new(items).block(
        Block::default()
            .title(" Algorithm ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(algorithms, chunks[0]);

    let filled = SpeedLevel::all().filter(|level| *level <= data.speed).count();
    let empty = SpeedLevel::all().count() - filled;
    let speed_lines = vec![
        Line::from(vec![
            Span::styled("▮".repeat(filled), text_style.fg(DEFAULT_THEME.secondary)),
            Span::styled("▯".repeat(empty), Style::default().fg(DEFAULT_THEME.comment)),
        ]),
        Line::from(Span::styled(format!("level {}", data.speed), text_style)),
        Line::from(Span::styled(
            format!("{} ms / step", data.speed.pace().interval().as_millis()),
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    ];
    let speed = Paragraph::new(speed_lines).block(
        Block::default()
            .title(" Speed ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(speed, chunks[1]);

    let sorted = data
        .sorted
        .map(format_array)
        .unwrap_or_else(|| "[]".to_string());
    let readouts = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Input:  ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(format_array(data.input), Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        Line::from(vec![
            Span::styled("Sorted: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(sorted, Style::default().fg(DEFAULT_THEME.success)),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Array ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(readouts, chunks[2]);
}
