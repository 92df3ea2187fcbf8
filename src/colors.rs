use crate::terminal::rgb;
use crossterm::style::Color;

/// Brand colors of the landing page
pub const CYAN: Color = Color::Rgb { r: 0x00, g: 0xf6, b: 0xff };
pub const VIOLET: Color = Color::Rgb { r: 0x7b, g: 0x2f, b: 0xf7 };

/// Number of selectable schemes (Shift+0 .. Shift+9)
pub const SCHEME_COUNT: u8 = 10;

/// Two-tone accent used for particles and nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    Cyan,
    Violet,
}

impl Hue {
    /// Coin flip between the two brand hues
    pub fn pick(rng: &mut impl rand::Rng) -> Self {
        if rng.gen_bool(0.5) {
            Hue::Cyan
        } else {
            Hue::Violet
        }
    }

    pub fn color(self, scheme: u8) -> Color {
        match (scheme, self) {
            (0, Hue::Cyan) => CYAN,
            (0, Hue::Violet) => VIOLET,
            (_, Hue::Cyan) => scheme_color(scheme, 3, true).0,
            (_, Hue::Violet) => scheme_color(scheme, 1, false).0,
        }
    }
}

/// Get color from scheme based on intensity (0-3)
pub fn scheme_color(scheme: u8, intensity: u8, bold: bool) -> (Color, bool) {
    match scheme {
        1 => match intensity {  // Red/Yellow (fire)
            0 => (Color::DarkRed, false),
            1 => (Color::Red, false),
            2 => (Color::DarkYellow, bold),
            _ => (Color::Yellow, true),
        },
        2 => match intensity {  // Blue/Cyan (ice)
            0 => (Color::DarkBlue, false),
            1 => (Color::Blue, false),
            2 => (Color::Cyan, bold),
            _ => (Color::Cyan, true),
        },
        3 => match intensity {  // Magenta/Pink (pink)
            0 => (Color::DarkMagenta, false),
            1 => (Color::Magenta, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(13), true),
        },
        4 => match intensity {  // Yellow/Gold (gold)
            0 => (Color::DarkYellow, false),
            1 => (Color::Yellow, false),
            2 => (Color::Yellow, bold),
            _ => (Color::AnsiValue(11), true),
        },
        5 => match intensity {  // Green (matrix)
            0 => (Color::DarkGreen, false),
            1 => (Color::Green, false),
            2 => (Color::Green, true),
            _ => (Color::AnsiValue(10), true),
        },
        6 => match intensity {  // Red/Magenta (lava)
            0 => (Color::DarkRed, false),
            1 => (Color::Red, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(9), true),
        },
        7 => match intensity {  // White/Grey (mono)
            0 => (Color::DarkGrey, false),
            1 => (Color::Grey, false),
            2 => (Color::White, bold),
            _ => (Color::White, true),
        },
        8 => match intensity {  // Rainbow cycling
            0 => (Color::Red, false),
            1 => (Color::Yellow, false),
            2 => (Color::Green, bold),
            _ => (Color::Cyan, true),
        },
        9 => match intensity {  // Blue/Magenta (neon)
            0 => (Color::DarkBlue, false),
            1 => (Color::Blue, false),
            2 => (Color::Magenta, bold),
            _ => (Color::AnsiValue(13), true),
        },
        _ => match intensity {  // Default: violet to cyan (site)
            0 => (rgb(0x3a, 0x1a, 0x78), false),
            1 => (VIOLET, false),
            2 => (rgb(0x00, 0xa8, 0xb8), bold),
            _ => (CYAN, true),
        },
    }
}

/// Scale an RGB color towards black. Non-RGB colors are returned unchanged.
pub fn dim(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb { r, g, b } => {
            let f = factor.clamp(0.0, 1.0);
            rgb(
                (r as f32 * f) as u8,
                (g as f32 * f) as u8,
                (b as f32 * f) as u8,
            )
        }
        other => other,
    }
}

/// Map a 0.0-1.0 brightness onto a scheme intensity
pub fn intensity_for(level: f32) -> u8 {
    match level {
        l if l >= 0.75 => 3,
        l if l >= 0.5 => 2,
        l if l >= 0.25 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_scheme_uses_brand_colors() {
        assert_eq!(scheme_color(0, 3, false).0, CYAN);
        assert_eq!(scheme_color(0, 1, false).0, VIOLET);
        assert_eq!(Hue::Violet.color(0), VIOLET);
    }

    #[test]
    fn dim_scales_rgb_channels() {
        assert_eq!(dim(rgb(200, 100, 50), 0.5), rgb(100, 50, 25));
        assert_eq!(dim(Color::Red, 0.1), Color::Red);
    }

    #[test]
    fn intensity_buckets() {
        assert_eq!(intensity_for(0.0), 0);
        assert_eq!(intensity_for(0.3), 1);
        assert_eq!(intensity_for(0.6), 2);
        assert_eq!(intensity_for(1.0), 3);
    }
}
