//! Colour helpers for fills and outlines.

use palette::Srgb;

/// Outline colours are the fill shaded by this percentage.
pub const OUTLINE_SHADE_PERCENT: f64 = -20.0;

/// Parses a `#rrggbb` or `#rgb` hex colour.
///
/// Returns `None` for anything else, including named colours and hex
/// digits without the leading `#`.
pub fn parse_hex(color: &str) -> Option<Srgb<u8>> {
    let digits = color.strip_prefix('#')?;
    if !matches!(digits.len(), 3 | 6) {
        return None;
    }
    digits.parse::<Srgb<u8>>().ok()
}

/// Formats a colour as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Shades a hex colour toward black (negative `percent`) or white (positive).
///
/// Each channel moves linearly toward the target by `|percent| / 100` and
/// is truncated. Non-hex input is returned unchanged so fills and strokes
/// never receive an invalid value.
pub fn shade(color: &str, percent: f64) -> String {
    let Some(rgb) = parse_hex(color) else {
        tracing::warn!(color, "shade received a non-hex colour; leaving it unchanged");
        return color.to_string();
    };

    let target = if percent < 0.0 { 0.0 } else { 255.0 };
    let amount = (percent.abs() / 100.0).min(1.0);
    let mix = |c: u8| -> u8 {
        let c = c as f64;
        (c + (target - c) * amount).clamp(0.0, 255.0) as u8
    };

    to_hex(Srgb::new(mix(rgb.red), mix(rgb.green), mix(rgb.blue)))
}

/// Outline colour for a garment fill.
pub fn outline(color: &str) -> String {
    shade(color, OUTLINE_SHADE_PERCENT)
}

// ============================================================================
// Named Colours
// ============================================================================

/// Colour words recognised in free-text prompts, in match priority order.
pub const COLOR_WORDS: &[(&str, &str)] = &[
    ("blue", "#2457F5"),
    ("red", "#E11D48"),
    ("green", "#10B981"),
    ("emerald", "#10B981"),
    ("purple", "#A855F7"),
    ("violet", "#8B5CF6"),
    ("gold", "#EAB308"),
    ("yellow", "#F59E0B"),
    ("white", "#FFFFFF"),
    ("black", "#111827"),
    ("pink", "#EC4899"),
    ("navy", "#1E3A8A"),
];

/// Looks up a colour word, case-insensitively.
pub fn named(word: &str) -> Option<&'static str> {
    COLOR_WORDS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(word))
        .map(|(_, hex)| *hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: &str) -> Option<(u8, u8, u8)> {
        parse_hex(color).map(|c| c.into_components())
    }

    #[test]
    fn parse_accepts_long_and_short_hex() {
        assert_eq!(rgb("#ff8000"), Some((255, 128, 0)));
        assert_eq!(rgb("#F80"), Some((255, 136, 0)));
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert_eq!(rgb("red"), None);
        assert_eq!(rgb("ff8000"), None);
        assert_eq!(rgb("#ff80"), None);
        assert_eq!(rgb("#gggggg"), None);
        assert_eq!(rgb(""), None);
    }

    #[test]
    fn shade_darkens_mid_gray() {
        assert_eq!(rgb(&shade("#808080", -20.0)), Some((102, 102, 102)));
    }

    #[test]
    fn shade_lightens_mid_gray() {
        // 128 + 127 * 0.2 = 153.4
        assert_eq!(rgb(&shade("#808080", 20.0)), Some((153, 153, 153)));
    }

    #[test]
    fn shade_zero_is_identity() {
        assert_eq!(shade("#2457f5", 0.0), "#2457f5");
    }

    #[test]
    fn shade_full_reaches_black_and_white() {
        assert_eq!(shade("#2457F5", -100.0), "#000000");
        assert_eq!(shade("#2457F5", 100.0), "#ffffff");
    }

    #[test]
    fn shade_leaves_invalid_input_unchanged() {
        assert_eq!(shade("tomato", -20.0), "tomato");
        assert_eq!(shade("url(#pattern)", 20.0), "url(#pattern)");
        assert_eq!(shade("", -20.0), "");
    }

    #[test]
    fn outline_matches_negative_twenty() {
        assert_eq!(outline("#EC4899"), shade("#EC4899", -20.0));
    }

    #[test]
    fn named_colours() {
        assert_eq!(named("Emerald"), Some("#10B981"));
        assert_eq!(named("navy"), Some("#1E3A8A"));
        assert_eq!(named("chartreuse"), None);
    }
}
