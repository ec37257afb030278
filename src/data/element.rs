use crate::gfx::color::Color;
use crate::gfx::glyph::{self, Glyph};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Element {
    Fire,
    Water,
    Grass,
    Electric,
    #[default]
    Normal,
    Poison,
    Flying,
    Rock,
    Psychic,
    Fighting,
    Other(String),
}

impl Element {
    pub fn as_str(&self) -> &str {
        use Element::*;
        match self {
            Fire => "fire",
            Water => "water",
            Grass => "grass",
            Electric => "electric",
            Normal => "normal",
            Poison => "poison",
            Flying => "flying",
            Rock => "rock",
            Psychic => "psychic",
            Fighting => "fighting",
            Other(name) => name,
        }
    }

    pub fn color(&self) -> Color {
        use Element::*;
        match self {
            Fire => Color::rgb(0xff, 0x45, 0x00),
            Water => Color::rgb(0x1e, 0x90, 0xff),
            Grass => Color::rgb(0x32, 0xcd, 0x32),
            Electric => Color::rgb(0xff, 0xd7, 0x00),
            Normal => Color::rgb(0xa9, 0xa9, 0xa9),
            Poison => Color::rgb(0x94, 0x00, 0xd3),
            Flying => Color::rgb(0x87, 0xce, 0xeb),
            Rock => Color::rgb(0xa0, 0x52, 0x2d),
            Psychic => Color::rgb(0xff, 0x69, 0xb4),
            Fighting => Color::rgb(0xb2, 0x22, 0x22),
            Other(_) => Color::GREY,
        }
    }

    pub fn glyph(&self) -> &'static Glyph {
        use Element::*;
        match self {
            Fire => &glyph::FIRE,
            Water => &glyph::WATER,
            Grass => &glyph::GRASS,
            Electric => &glyph::ELECTRIC,
            Normal => &glyph::NORMAL,
            Poison => &glyph::POISON,
            Flying => &glyph::FLYING,
            Rock => &glyph::ROCK,
            Psychic => &glyph::PSYCHIC,
            Fighting => &glyph::FIGHTING,
            Other(_) => &glyph::DOT,
        }
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        use Element::*;
        match value.to_lowercase().as_str() {
            "fire" => Fire,
            "water" => Water,
            "grass" => Grass,
            "electric" => Electric,
            "normal" => Normal,
            "poison" => Poison,
            "flying" => Flying,
            "rock" => Rock,
            "psychic" => Psychic,
            "fighting" => Fighting,
            _ => Other(value),
        }
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::from(value.to_string())
    }
}

impl From<Element> for String {
    fn from(value: Element) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_elements_have_their_own_style() {
        assert_eq!(Element::from("fire").color(), Color::rgb(0xff, 0x45, 0x00));
        assert_eq!(Element::from("Water"), Element::Water);
        assert_eq!(Element::from("psychic").glyph(), &glyph::PSYCHIC);
    }

    #[test]
    fn unknown_element_falls_back_to_grey_dot() {
        let element = Element::from("dragon");
        assert_eq!(element, Element::Other("dragon".to_string()));
        assert_eq!(element.color(), Color::GREY);
        assert_eq!(element.glyph(), &glyph::DOT);
        assert_eq!(element.as_str(), "dragon");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let element: Element = serde_json::from_str("\"electric\"").unwrap();
        assert_eq!(element, Element::Electric);
        assert_eq!(serde_json::to_string(&Element::Rock).unwrap(), "\"rock\"");
    }
}
