use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::delta::ZERO_BASELINE_PERCENT;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Signed variant for deltas; the sign lives here, not in `format_bytes`.
pub fn format_signed_bytes(delta: i64) -> String {
    let magnitude = format_bytes(delta.unsigned_abs());
    if delta < 0 {
        format!("-{magnitude}")
    } else {
        format!("+{magnitude}")
    }
}

/// The zero-baseline sentinel renders as `new` rather than an infinity glyph.
pub fn format_percent(percent: f64) -> String {
    if percent == ZERO_BASELINE_PERCENT {
        "new".to_string()
    } else {
        format!("{percent:+.1}%")
    }
}
