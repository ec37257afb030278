#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph([u8; 8]);

impl Glyph {
    pub const fn new(rows: [u8; 8]) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[u8; 8] {
        &self.0
    }
}

pub static FIRE: Glyph = Glyph::new([
    0b0001_0000,
    0b0001_1000,
    0b0011_1100,
    0b0110_1100,
    0b0110_1110,
    0b1111_1110,
    0b0111_1100,
    0b0011_1000,
]);

pub static WATER: Glyph = Glyph::new([
    0b0001_0000,
    0b0001_1000,
    0b0011_1100,
    0b0011_1100,
    0b0111_1110,
    0b0111_1110,
    0b0011_1100,
    0b0001_1000,
]);

pub static GRASS: Glyph = Glyph::new([
    0b0000_0110,
    0b0001_1110,
    0b0011_1110,
    0b0111_1100,
    0b0111_1100,
    0b0011_1000,
    0b0101_0000,
    0b1000_0000,
]);

pub static ELECTRIC: Glyph = Glyph::new([
    0b0000_1100,
    0b0001_1000,
    0b0011_0000,
    0b0111_1110,
    0b0000_1100,
    0b0001_1000,
    0b0011_0000,
    0b0100_0000,
]);

pub static NORMAL: Glyph = Glyph::new([
    0b0011_1100,
    0b0100_0010,
    0b1000_0001,
    0b1000_0001,
    0b1000_0001,
    0b1000_0001,
    0b0100_0010,
    0b0011_1100,
]);

pub static POISON: Glyph = Glyph::new([
    0b0011_1100,
    0b0111_1110,
    0b1101_1011,
    0b1111_1111,
    0b0111_1110,
    0b0011_1100,
    0b0010_0100,
    0b0011_1100,
]);

pub static FLYING: Glyph = Glyph::new([
    0b0000_0000,
    0b1000_0001,
    0b1100_0011,
    0b0110_0110,
    0b0011_1100,
    0b0001_1000,
    0b0000_0000,
    0b0000_0000,
]);

pub static ROCK: Glyph = Glyph::new([
    0b0000_0000,
    0b0001_1000,
    0b0011_1100,
    0b0111_1100,
    0b0111_1110,
    0b1111_1110,
    0b1111_1111,
    0b0000_0000,
]);

pub static PSYCHIC: Glyph = Glyph::new([
    0b0011_1100,
    0b0111_1110,
    0b0110_1110,
    0b0111_1110,
    0b0011_1100,
    0b0001_1000,
    0b0111_1110,
    0b1111_1111,
]);

pub static FIGHTING: Glyph = Glyph::new([
    0b0000_0000,
    0b0111_1100,
    0b1111_1110,
    0b1111_1110,
    0b1111_1110,
    0b0111_1100,
    0b0011_1000,
    0b0011_1000,
]);

pub static DOT: Glyph = Glyph::new([
    0b0000_0000,
    0b0011_1100,
    0b0111_1110,
    0b0111_1110,
    0b0111_1110,
    0b0111_1110,
    0b0011_1100,
    0b0000_0000,
]);

pub static INVADER: Glyph = Glyph::new([
    0b0010_0100,
    0b0001_1000,
    0b0011_1100,
    0b0101_1010,
    0b1111_1111,
    0b1011_1101,
    0b1010_0101,
    0b0001_1000,
]);

pub static POKEBALL: Glyph = Glyph::new([
    0b0011_1100,
    0b0111_1110,
    0b1111_1111,
    0b1110_0111,
    0b1001_1001,
    0b1000_0001,
    0b0100_0010,
    0b0011_1100,
]);
