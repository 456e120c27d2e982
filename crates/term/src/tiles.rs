//! Celestial theme for tile values.
//!
//! Every tile value from 2 to 2048 is drawn as a space object. Values outside
//! the table (4096 and up, or anything unexpected) fall back to [`UNKNOWN_TILE`].

use crate::fb::{CellStyle, Rgb};

/// How one tile value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileTheme {
    pub value: u32,
    pub name: &'static str,
    pub glyph: char,
    pub bg: Rgb,
    pub fg: Rgb,
}

impl TileTheme {
    const fn new(value: u32, name: &'static str, glyph: char, bg: u32, fg: u32) -> Self {
        Self {
            value,
            name,
            glyph,
            bg: Rgb::hex(bg),
            fg: Rgb::hex(fg),
        }
    }

    pub fn style(&self) -> CellStyle {
        CellStyle::new(self.fg, self.bg).bold()
    }
}

const LIGHT: u32 = 0xf7fafc;
const DARK: u32 = 0x1a202c;

pub static TILE_THEMES: [TileTheme; 11] = [
    TileTheme::new(2, "Asteroid", '•', 0x4a5568, LIGHT),
    TileTheme::new(4, "Moon", '☾', 0x2d3748, LIGHT),
    TileTheme::new(8, "Planet", '●', 0x1a365d, LIGHT),
    TileTheme::new(16, "Ringed Planet", '◍', 0x2c5282, LIGHT),
    TileTheme::new(32, "Star", '★', 0x2b6cb0, LIGHT),
    TileTheme::new(64, "Sun", '☼', 0xfbbf24, DARK),
    TileTheme::new(128, "Supernova", '✸', 0xf59e0b, DARK),
    TileTheme::new(256, "Black Hole", '◉', 0x1f2937, LIGHT),
    TileTheme::new(512, "Nebula", '≈', 0x6b21a8, LIGHT),
    TileTheme::new(1024, "Galaxy", '✺', 0x4c1d95, LIGHT),
    TileTheme::new(2048, "Universe", '✦', 0x7c3aed, LIGHT),
];

pub static UNKNOWN_TILE: TileTheme = TileTheme::new(0, "Unknown", '?', 0x1a202c, LIGHT);

/// Theme for a non-empty tile value.
pub fn tile_theme(value: u32) -> &'static TileTheme {
    TILE_THEMES
        .iter()
        .find(|t| t.value == value)
        .unwrap_or(&UNKNOWN_TILE)
}
