use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Row, Table};

use crate::app::DeltaRow;
use crate::format::{format_bytes, format_percent, format_signed_bytes, truncate_unicode};
use crate::ui::theme::Theme;

const DELTA_WIDTH: u16 = 10;
const PERCENT_WIDTH: u16 = 9;
const MEM_WIDTH: u16 = 10;
const PID_WIDTH: u16 = 7;
const COLUMN_SPACING: u16 = 1;

/// One line per ranked delta; rows past the visible height are clipped
/// silently by the widget.
pub fn render(frame: &mut Frame, area: Rect, rows: &[DeltaRow], theme: &Theme) {
    let fixed = DELTA_WIDTH + PERCENT_WIDTH + MEM_WIDTH + PID_WIDTH + COLUMN_SPACING * 4;
    let command_width = usize::from(area.width.saturating_sub(fixed));

    let header = Row::new(vec!["DELTA", "CHANGE", "MEM", "PID", "COMMAND"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|row| {
        let fg = theme.delta_fg(row.delta);
        Row::new(vec![
            Cell::from(format_signed_bytes(row.delta)),
            Cell::from(format_percent(row.percent)),
            Cell::from(format_bytes(row.memory)),
            Cell::from(row.pid.to_string()),
            Cell::from(truncate_unicode(&row.command, command_width)),
        ])
        .style(Style::default().fg(fg))
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(DELTA_WIDTH),
            Constraint::Length(PERCENT_WIDTH),
            Constraint::Length(MEM_WIDTH),
            Constraint::Length(PID_WIDTH),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .column_spacing(COLUMN_SPACING);

    frame.render_widget(table, area);
}
