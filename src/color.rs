use palette::Srgb;
use serde::Serializer;

use crate::data::model::GrowthRating;

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// The fixed qualitative palette shared by every chart. Series colors are
/// assigned by cycling this palette in subset encounter order, so a given
/// occupation's color depends on its position, not its name.
pub const SERIES_PALETTE: [Srgb<u8>; 10] = [
    Srgb::new(0x63, 0x6E, 0xFA),
    Srgb::new(0xEF, 0x55, 0x3B),
    Srgb::new(0x00, 0xCC, 0x96),
    Srgb::new(0xAB, 0x63, 0xFA),
    Srgb::new(0xFF, 0xA1, 0x5A),
    Srgb::new(0x19, 0xD3, 0xF3),
    Srgb::new(0xFF, 0x66, 0x92),
    Srgb::new(0xB6, 0xE8, 0x80),
    Srgb::new(0xFF, 0x97, 0xFF),
    Srgb::new(0xFE, 0xCB, 0x52),
];

/// Color for the series at the given palette position.
pub fn series_color(index: usize) -> Srgb<u8> {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

// ---------------------------------------------------------------------------
// Fixed role colors
// ---------------------------------------------------------------------------

/// Gender colors of the per-occupation bar chart (the donut uses positional
/// palette colors instead).
pub const MALE_COLOR: Srgb<u8> = Srgb::new(0x63, 0x6E, 0xFA);
pub const FEMALE_COLOR: Srgb<u8> = Srgb::new(0xEF, 0x55, 0x3B);

/// Fallback for rating strings outside the recognised five.
pub const DEFAULT_RATING_COLOR: Srgb<u8> = Srgb::new(0x00, 0x00, 0x00);

/// Display color of a recognised growth rating.
pub fn rating_color(rating: GrowthRating) -> Srgb<u8> {
    match rating {
        GrowthRating::VeryStrong => Srgb::new(0x28, 0xA7, 0x45),
        GrowthRating::Strong => Srgb::new(0x17, 0xA2, 0xB8),
        GrowthRating::Moderate => Srgb::new(0xFF, 0xC1, 0x07),
        GrowthRating::Stable => Srgb::new(0x6C, 0x75, 0x7D),
        GrowthRating::Decline => Srgb::new(0xDC, 0x35, 0x45),
    }
}

/// Display color of an arbitrary rating string. Unrecognised ratings get
/// the default color rather than an error.
pub fn growth_rating_color(label: &str) -> Srgb<u8> {
    GrowthRating::from_label(label)
        .map(rating_color)
        .unwrap_or(DEFAULT_RATING_COLOR)
}

// ---------------------------------------------------------------------------
// Hex formatting for the JSON boundary
// ---------------------------------------------------------------------------

/// `#rrggbb` spelling of a color, as the chart renderer expects it.
pub fn hex(color: Srgb<u8>) -> String {
    format!("#{color:x}")
}

/// serde adapter: emit colors as hex strings in renderable records.
pub fn serialize_hex<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex(*color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(series_color(0), SERIES_PALETTE[0]);
        assert_eq!(series_color(9), SERIES_PALETTE[9]);
        assert_eq!(series_color(10), SERIES_PALETTE[0]);
        assert_eq!(series_color(23), SERIES_PALETTE[3]);
    }

    #[test]
    fn rating_strings_map_to_their_colors() {
        assert_eq!(growth_rating_color("Very Strong"), Srgb::new(0x28, 0xA7, 0x45));
        assert_eq!(growth_rating_color("Strong"), Srgb::new(0x17, 0xA2, 0xB8));
        assert_eq!(growth_rating_color("Moderate"), Srgb::new(0xFF, 0xC1, 0x07));
        assert_eq!(growth_rating_color("Stable"), Srgb::new(0x6C, 0x75, 0x7D));
        assert_eq!(growth_rating_color("Decline"), Srgb::new(0xDC, 0x35, 0x45));
    }

    #[test]
    fn unrecognised_rating_falls_back_to_black() {
        assert_eq!(growth_rating_color("Excellent"), DEFAULT_RATING_COLOR);
        assert_eq!(growth_rating_color(""), DEFAULT_RATING_COLOR);
        // Case matters: the dataset spells ratings exactly.
        assert_eq!(growth_rating_color("very strong"), DEFAULT_RATING_COLOR);
    }

    #[test]
    fn hex_spelling_is_lowercase_and_padded() {
        assert_eq!(hex(Srgb::new(0x63, 0x6E, 0xFA)), "#636efa");
        assert_eq!(hex(Srgb::new(0x00, 0x00, 0x00)), "#000000");
        assert_eq!(hex(Srgb::new(0x28, 0xA7, 0x45)), "#28a745");
    }
}
