use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    paused: bool,
    status_message: Option<&(String, std::time::Instant)>,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let color = if msg.starts_with("error") {
            theme.status_err
        } else {
            theme.status_ok
        };
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans("q", "Quit", theme));
    spans.extend(pill_spans("Space", if paused { "Resume" } else { "Pause" }, theme));
    spans.extend(pill_spans("s", "Sort", theme));
    spans.extend(pill_spans("r", "Refresh", theme));
    if paused {
        spans.push(Span::styled(
            "  PAUSED",
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
