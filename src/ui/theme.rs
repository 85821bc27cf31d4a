use ratatui::style::Color;

/// Fixed dark palette; the leak view has no theme cycling.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header_accent_fg: Color,
    pub header_accent_bg: Color,
    pub overlay_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub grow_fg: Color,
    pub shrink_fg: Color,
    pub flat_fg: Color,
    pub gauge_fg: Color,
    pub statusbar_bg: Color,
    pub surface_bg: Color,
    pub pill_key_fg: Color,
    pub pill_key_bg: Color,
    pub pill_desc_fg: Color,
    pub status_ok: Color,
    pub status_err: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            header_accent_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            header_accent_bg: Color::Rgb(0xf3, 0x8b, 0xa8),
            overlay_border: Color::Rgb(0x58, 0x5b, 0x70),
            text_primary: Color::Rgb(0xcd, 0xd6, 0xf4),
            text_secondary: Color::Rgb(0x7f, 0x84, 0x9c),
            grow_fg: Color::Rgb(0xf3, 0x8b, 0xa8),
            shrink_fg: Color::Rgb(0xa6, 0xe3, 0xa1),
            flat_fg: Color::Rgb(0x7f, 0x84, 0x9c),
            gauge_fg: Color::Rgb(0x89, 0xb4, 0xfa),
            statusbar_bg: Color::Rgb(0x18, 0x18, 0x25),
            surface_bg: Color::Rgb(0x31, 0x32, 0x44),
            pill_key_fg: Color::Rgb(0x1e, 0x1e, 0x2e),
            pill_key_bg: Color::Rgb(0x89, 0xb4, 0xfa),
            pill_desc_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            status_ok: Color::Rgb(0xa6, 0xe3, 0xa1),
            status_err: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

impl Theme {
    /// Row color for a signed memory change: growth is the alarming one.
    pub fn delta_fg(&self, delta: i64) -> Color {
        if delta > 0 {
            self.grow_fg
        } else if delta < 0 {
            self.shrink_fg
        } else {
            self.flat_fg
        }
    }
}
