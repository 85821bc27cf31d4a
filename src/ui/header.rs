use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::format_bytes;
use crate::ui::theme::Theme;

/// Host-level facts the header shows; decoupled from `App` so tests can
/// render the widget directly.
#[derive(Debug, Clone, Copy)]
pub struct HeaderInfo<'a> {
    pub memory_total: u64,
    pub memory_used: u64,
    pub mode_label: &'a str,
    pub policy_label: &'a str,
    pub interval_ms: u64,
    pub poll_count: u64,
}

pub fn render(frame: &mut Frame, area: Rect, info: HeaderInfo<'_>, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_branding(frame, chunks[0], info, theme);
    render_ram_gauge(frame, chunks[1], info, theme);
}

fn render_branding(frame: &mut Frame, area: Rect, info: HeaderInfo<'_>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let spans = vec![
        Span::styled(
            " leaktop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(info.mode_label, Style::default().fg(theme.text_primary)),
        Span::styled(" · ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("{} ref", info.policy_label),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(" · ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("every {}ms", info.interval_ms),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(" · ", Style::default().fg(theme.text_secondary)),
        Span::styled(
            format!("poll #{}", info.poll_count),
            Style::default().fg(theme.text_secondary),
        ),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_ram_gauge(frame: &mut Frame, area: Rect, info: HeaderInfo<'_>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ratio = if info.memory_total == 0 {
        0.0
    } else {
        (info.memory_used as f64 / info.memory_total as f64).clamp(0.0, 1.0)
    };
    let label = format!(
        "{} / {}",
        format_bytes(info.memory_used),
        format_bytes(info.memory_total)
    );
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(label)
        .gauge_style(Style::default().fg(theme.gauge_fg).bg(theme.surface_bg));
    frame.render_widget(gauge, inner);
}
