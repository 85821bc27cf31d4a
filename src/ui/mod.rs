pub mod header;
pub mod statusbar;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let info = header::HeaderInfo {
        memory_total: app.memory_total(),
        memory_used: app.memory_used(),
        mode_label: app.memory_mode().label(),
        policy_label: app.reference_policy.label(),
        interval_ms: app.poll_interval_ms,
        poll_count: app.poll_count,
    };
    header::render(frame, chunks[0], info, &app.theme);
    table::render(frame, chunks[1], &app.rows, &app.theme);
    statusbar::render(
        frame,
        chunks[2],
        app.paused,
        app.status_message.as_ref(),
        &app.theme,
    );
}
