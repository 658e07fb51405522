// Fixed colors used by the formatters.
//
// Mentions are colored by hashing the mentioned user's identifier into a
// palette, so the same identifier always renders the same color on every
// client and every run.

use crate::node::Color;

/// Background for `HL` spans.
pub const HIGHLIGHT: Color = Color::rgb(0xFF, 0xF1, 0x76);

/// Foreground for text inside a quoted block.
pub const QUOTE_TEXT: Color = Color::rgb(0x61, 0x61, 0x61);

const MENTION: [Color; 16] = [
    Color::rgb(0xE5, 0x39, 0x35),
    Color::rgb(0xD8, 0x1B, 0x60),
    Color::rgb(0x8E, 0x24, 0xAA),
    Color::rgb(0x5E, 0x35, 0xB1),
    Color::rgb(0x39, 0x49, 0xAB),
    Color::rgb(0x1E, 0x88, 0xE5),
    Color::rgb(0x03, 0x9B, 0xE5),
    Color::rgb(0x00, 0xAC, 0xC1),
    Color::rgb(0x00, 0x89, 0x7B),
    Color::rgb(0x43, 0xA0, 0x47),
    Color::rgb(0x7C, 0xB3, 0x42),
    Color::rgb(0xC0, 0xCA, 0x33),
    Color::rgb(0xFB, 0x8C, 0x00),
    Color::rgb(0xF4, 0x51, 0x1E),
    Color::rgb(0x6D, 0x4C, 0x41),
    Color::rgb(0x54, 0x6E, 0x7A),
];

/// Color for a mentioned identifier.
pub fn mention_color(id: &str) -> Color {
    MENTION[(fnv1a(id.as_bytes()) % MENTION.len() as u32) as usize]
}

/// 32-bit FNV-1a. Stable across platforms and releases, unlike `DefaultHasher`.
fn fnv1a(bytes: &[u8]) -> u32 {
    bytes.iter().fold(0x811c_9dc5_u32, |hash, &b| {
        (hash ^ u32::from(b)).wrapping_mul(0x0100_0193)
    })
}
