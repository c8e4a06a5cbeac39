//! Glyph alphabet and the glyph -> colour table.
//!
//! Every character a builder can write lives in [`glyphs`], and every one of
//! them has an entry in the [`ColorTable`]. The table is built once per
//! process and shared by every generated tree.

use crossterm::style::Color;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Glyphs emitted by the generation stages, grouped by stage.
pub mod glyphs {
    pub const BACKGROUND: char = ' ';

    // Pot
    pub const POT_CORNER: char = '+';
    pub const POT_RIM: char = '=';
    pub const POT_BASE: char = '_';
    pub const POT_LEFT: char = '[';
    pub const POT_RIGHT: char = ']';
    pub const POT_BODY: char = ':';
    pub const POT_FOOT: char = 'U';

    // Soil surface
    pub const SOIL_DARK: char = '~';
    pub const SOIL_LIGHT: char = '.';

    /// Trunk texture bands, core first.
    pub const TRUNK_BANDS: [char; 7] = ['#', '8', 'H', 'N', 'M', 'I', '|'];

    pub const ROOT_THICK: char = 'W';
    pub const ROOT_THIN: char = 'w';

    /// Branch texture per thickness tier, core first within each tier.
    pub const BRANCH_THICK: [char; 3] = ['Y', 'V', 'T'];
    pub const BRANCH_MEDIUM: [char; 3] = ['y', 'v', 't'];
    pub const BRANCH_THIN: [char; 3] = ['/', '\\', '`'];

    /// Canopy palette stratified top to bottom: dense, medium, light.
    pub const CANOPY_DENSE: [char; 4] = ['@', '&', '%', '$'];
    pub const CANOPY_MEDIUM: [char; 4] = ['*', 'o', 'O', 'e'];
    pub const CANOPY_LIGHT: [char; 4] = [',', '\'', '"', ';'];

    /// True for cells later stages may paint over.
    pub fn is_open(ch: char) -> bool {
        ch == BACKGROUND || ch == SOIL_DARK || ch == SOIL_LIGHT
    }

    pub fn is_trunk(ch: char) -> bool {
        TRUNK_BANDS.contains(&ch)
    }
}

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    }
}

/// Returned by [`ColorTable::color_or_default`] for glyphs outside the alphabet.
pub const FALLBACK: Rgb = Rgb::new(128, 128, 128);

// Pot
const TERRACOTTA: Rgb = Rgb::new(178, 102, 64);
const TERRACOTTA_DARK: Rgb = Rgb::new(139, 69, 19);
const TERRACOTTA_LIGHT: Rgb = Rgb::new(205, 133, 63);
const CLAY_SHADOW: Rgb = Rgb::new(120, 60, 35);

// Soil
const SOIL: Rgb = Rgb::new(92, 64, 51);
const SOIL_DRY: Rgb = Rgb::new(150, 115, 85);

// Wood, core to bark
const WOOD: [Rgb; 7] = [
    Rgb::new(101, 67, 33),
    Rgb::new(110, 72, 36),
    Rgb::new(120, 80, 40),
    Rgb::new(130, 86, 42),
    Rgb::new(139, 90, 43),
    Rgb::new(150, 100, 50),
    Rgb::new(160, 110, 60),
];
const ROOT: Rgb = Rgb::new(94, 62, 36);
const ROOT_FINE: Rgb = Rgb::new(125, 88, 58);

// Branches
const BRANCH_HEAVY: Rgb = Rgb::new(115, 76, 38);
const BRANCH_MID: Rgb = Rgb::new(139, 94, 52);
const BRANCH_TWIG: Rgb = Rgb::new(160, 120, 75);

// Foliage, dense crown to light underside
const LEAF_DEEP: Rgb = Rgb::new(34, 110, 34);
const LEAF: Rgb = Rgb::new(34, 139, 34);
const LEAF_BRIGHT: Rgb = Rgb::new(50, 180, 50);
const LEAF_LIGHT: Rgb = Rgb::new(124, 205, 90);

/// Static glyph -> colour lookup.
#[derive(Debug)]
pub struct ColorTable {
    entries: BTreeMap<char, Rgb>,
}

impl ColorTable {
    fn build() -> Self {
        use glyphs::*;

        let mut entries = BTreeMap::new();
        entries.insert(BACKGROUND, Rgb::new(0, 0, 0));

        entries.insert(POT_CORNER, TERRACOTTA_DARK);
        entries.insert(POT_RIM, TERRACOTTA_LIGHT);
        entries.insert(POT_BASE, TERRACOTTA_DARK);
        entries.insert(POT_LEFT, TERRACOTTA);
        entries.insert(POT_RIGHT, TERRACOTTA);
        entries.insert(POT_BODY, TERRACOTTA);
        entries.insert(POT_FOOT, CLAY_SHADOW);

        entries.insert(SOIL_DARK, SOIL);
        entries.insert(SOIL_LIGHT, SOIL_DRY);

        for (ch, color) in TRUNK_BANDS.iter().zip(WOOD) {
            entries.insert(*ch, color);
        }

        entries.insert(ROOT_THICK, ROOT);
        entries.insert(ROOT_THIN, ROOT_FINE);

        for ch in BRANCH_THICK {
            entries.insert(ch, BRANCH_HEAVY);
        }
        for ch in BRANCH_MEDIUM {
            entries.insert(ch, BRANCH_MID);
        }
        for ch in BRANCH_THIN {
            entries.insert(ch, BRANCH_TWIG);
        }

        for (i, ch) in CANOPY_DENSE.iter().enumerate() {
            entries.insert(*ch, if i % 2 == 0 { LEAF_DEEP } else { LEAF });
        }
        for ch in CANOPY_MEDIUM {
            entries.insert(ch, LEAF_BRIGHT);
        }
        for ch in CANOPY_LIGHT {
            entries.insert(ch, LEAF_LIGHT);
        }

        Self { entries }
    }

    /// Process-wide table, built on first use.
    pub fn global() -> &'static ColorTable {
        static TABLE: OnceLock<ColorTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    pub fn color_for(&self, glyph: char) -> Option<Rgb> {
        self.entries.get(&glyph).copied()
    }

    pub fn color_or_default(&self, glyph: char) -> Rgb {
        self.color_for(glyph).unwrap_or(FALLBACK)
    }

    pub fn contains(&self, glyph: char) -> bool {
        self.entries.contains_key(&glyph)
    }

    /// `(glyph, colour)` pairs in glyph order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Rgb)> + '_ {
        self.entries.iter().map(|(ch, c)| (*ch, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every glyph any builder can emit.
    pub fn alphabet() -> Vec<char> {
        use glyphs::*;

        let mut all = vec![
            BACKGROUND, POT_CORNER, POT_RIM, POT_BASE, POT_LEFT, POT_RIGHT, POT_BODY, POT_FOOT,
            SOIL_DARK, SOIL_LIGHT, ROOT_THICK, ROOT_THIN,
        ];
        all.extend(TRUNK_BANDS);
        all.extend(BRANCH_THICK);
        all.extend(BRANCH_MEDIUM);
        all.extend(BRANCH_THIN);
        all.extend(CANOPY_DENSE);
        all.extend(CANOPY_MEDIUM);
        all.extend(CANOPY_LIGHT);
        all
    }
}

/// Shorthand for [`ColorTable::global`].
pub fn color_table() -> &'static ColorTable {
    ColorTable::global()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_covers_alphabet() {
        let table = color_table();
        for ch in ColorTable::alphabet() {
            assert!(table.contains(ch), "glyph {:?} has no colour", ch);
        }
    }

    #[test]
    fn alphabet_has_no_duplicates() {
        let all = ColorTable::alphabet();
        let unique: HashSet<char> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
        assert_eq!(color_table().len(), unique.len());
    }

    #[test]
    fn global_table_is_shared() {
        assert!(std::ptr::eq(ColorTable::global(), ColorTable::global()));
    }

    #[test]
    fn unknown_glyph_falls_back() {
        let table = color_table();
        assert_eq!(table.color_for('Z'), None);
        assert_eq!(table.color_or_default('Z'), FALLBACK);
    }

    #[test]
    fn open_cells() {
        assert!(glyphs::is_open(' '));
        assert!(glyphs::is_open(glyphs::SOIL_LIGHT));
        assert!(!glyphs::is_open(glyphs::POT_RIM));
        assert!(!glyphs::is_open(glyphs::TRUNK_BANDS[0]));
    }

    #[test]
    fn rgb_hex_and_color() {
        let c = Rgb::new(255, 0, 16);
        assert_eq!(c.hex(), "#ff0010");
        assert_eq!(Color::from(c), Color::Rgb { r: 255, g: 0, b: 16 });
    }
}
