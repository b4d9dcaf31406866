//! Hex color parsing and grid-line contrast selection.
//!
//! Gridlines must stay legible against whatever axis color a report theme
//! supplies, so the grid color is picked by perceptual brightness of the
//! axis color. Unparsable input degrades silently to a neutral gray.

use crate::constants::{DARK_GRID_COLOR, LIGHT_GRID_COLOR, NEUTRAL_GRID_COLOR};

/// Brightness threshold above which an axis color counts as "light".
const LIGHT_BRIGHTNESS_THRESHOLD: f64 = 140.0;

/// An 8-bit-per-channel RGB color decoded from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Perceptual brightness in `0.0..=255.0` using the ITU-R 601 luma
    /// weights. Kept fractional so colors near the contrast threshold are
    /// not misclassified by truncation.
    #[must_use]
    pub fn brightness(self) -> f64 {
        f64::from(u32::from(self.r) * 299 + u32::from(self.g) * 587 + u32::from(self.b) * 114)
            / 1000.0
    }
}

/// Parses `#RGB` or `#RRGGBB` into an [`Rgb`].
///
/// The 3-digit form expands by doubling each digit (`#abc` == `#aabbcc`).
/// Returns `None` for a missing `#`, a wrong length, or non-hex digits.
/// Alpha channels are not supported.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<Rgb> {
    let hex = color.strip_prefix('#')?;
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };
    if expanded.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let g = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let b = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Rgb { r, g, b })
}

/// Contrast class of the gridlines relative to the axis color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridTone {
    /// White-based grid for light axis colors.
    Light,
    /// Black-based grid for dark axis colors.
    Dark,
    /// Gray fallback for unparsable axis colors.
    Neutral,
}

/// Classifies the gridline contrast for `axis_color`.
///
/// Light axis colors get a white-based grid, dark ones a black-based grid.
/// Unparsable input falls back to neutral gray instead of erroring.
#[must_use]
pub fn grid_tone(axis_color: &str) -> GridTone {
    parse_hex_color(axis_color).map_or(GridTone::Neutral, |rgb| {
        if rgb.brightness() > LIGHT_BRIGHTNESS_THRESHOLD {
            GridTone::Light
        } else {
            GridTone::Dark
        }
    })
}

/// Picks the translucent CSS gridline color that contrasts with `axis_color`.
#[must_use]
pub fn pick_grid_color(axis_color: &str) -> &'static str {
    match grid_tone(axis_color) {
        GridTone::Light => LIGHT_GRID_COLOR,
        GridTone::Dark => DARK_GRID_COLOR,
        GridTone::Neutral => NEUTRAL_GRID_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_forms_are_equivalent() {
        assert_eq!(parse_hex_color("#abc"), parse_hex_color("#aabbcc"));
    }

    #[test]
    fn six_digit_form_decodes_channels() {
        assert_eq!(
            parse_hex_color("#102030"),
            Some(Rgb {
                r: 0x10,
                g: 0x20,
                b: 0x30
            })
        );
    }

    #[test]
    fn named_color_is_rejected() {
        assert_eq!(parse_hex_color("red"), None);
    }

    #[test]
    fn two_digit_hex_is_rejected() {
        assert_eq!(parse_hex_color("#ab"), None);
    }

    #[test]
    fn empty_string_is_rejected() {
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn missing_hash_is_rejected() {
        assert_eq!(parse_hex_color("aabbcc"), None);
    }

    #[test]
    fn non_hex_digits_are_rejected() {
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn white_axis_gets_light_grid() {
        assert_eq!(pick_grid_color("#ffffff"), LIGHT_GRID_COLOR);
    }

    #[test]
    fn black_axis_gets_dark_grid() {
        assert_eq!(pick_grid_color("#000000"), DARK_GRID_COLOR);
    }

    #[test]
    fn unparsable_axis_gets_neutral_grid() {
        assert_eq!(pick_grid_color("notacolor"), NEUTRAL_GRID_COLOR);
    }

    #[test]
    fn fractional_brightness_just_over_threshold_counts_as_light() {
        // #00ef00 has brightness 140.293; truncating to an integer would
        // misclassify it as dark.
        assert_eq!(pick_grid_color("#00ef00"), LIGHT_GRID_COLOR);
    }

    #[test]
    fn brightness_uses_luma_weights() {
        // Pure green is perceptually brighter than pure red or blue.
        let red = Rgb { r: 255, g: 0, b: 0 };
        let green = Rgb { r: 0, g: 255, b: 0 };
        let blue = Rgb { r: 0, g: 0, b: 255 };
        assert!(green.brightness() > red.brightness());
        assert!(red.brightness() > blue.brightness());
    }
}
