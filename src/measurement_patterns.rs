//! # Measurement Patterns Module
//!
//! This module contains the regex patterns and constants used by the
//! ingredient parser to recognize quantities and unit words.

use lazy_static::lazy_static;
use regex::Regex;

/// Unicode vulgar fractions and their values
pub const VULGAR_FRACTIONS: [(char, f64); 15] = [
    ('½', 1.0 / 2.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 1.0 / 4.0),
    ('¾', 3.0 / 4.0),
    ('⅕', 1.0 / 5.0),
    ('⅖', 2.0 / 5.0),
    ('⅗', 3.0 / 5.0),
    ('⅘', 4.0 / 5.0),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 1.0 / 8.0),
    ('⅜', 3.0 / 8.0),
    ('⅝', 5.0 / 8.0),
    ('⅞', 7.0 / 8.0),
];

// Quantity token: range, mixed number, vulgar fraction, or a plain run of digits/dots/slashes.
// Alternatives are tried in order, so the more specific shapes come first.
const NUMBER: &str = r"(?:[0-9]+(?:\.[0-9]+)?\s*(?:-|–|to)\s*[0-9]+(?:\.[0-9]+)?|[0-9]+\s+[0-9]+/[0-9]+|[0-9]*\s*[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞]|[0-9][0-9./]*|\.[0-9][0-9./]*)";

lazy_static! {
    /// `<number><rest>` at the very start of the text
    pub static ref PREFIX_REGEX: Regex = Regex::new(&format!(r"^(?P<qty>{NUMBER})(?P<rest>.*)$"))
        .expect("Prefix pattern should be valid");

    /// `<name>(<number><rest>` with the name ahead of the first parenthesis
    pub static ref PARENTHETICAL_REGEX: Regex =
        Regex::new(&format!(r"^(?P<name>[^()]+)\(\s*(?P<qty>{NUMBER})(?P<rest>[^)]*)"))
            .expect("Parenthetical pattern should be valid");

    /// First `<number><rest>` starting at a word boundary anywhere in the text
    pub static ref INLINE_REGEX: Regex =
        Regex::new(&format!(r"(?:^|[^\p{{L}}0-9./])(?P<qty>{NUMBER})(?P<rest>.*)$"))
            .expect("Inline pattern should be valid");

    /// Up to three leading words, the candidates for a unit token
    pub static ref UNIT_WORDS_REGEX: Regex =
        Regex::new(r"^\s*(?P<w1>\p{L}+\.?)(?:\s+(?P<w2>\p{L}+\.?))?(?:\s+(?P<w3>\p{L}+\.?))?")
            .expect("Unit word pattern should be valid");

    /// `low-high`, `low – high` or `low to high`
    pub static ref RANGE_REGEX: Regex =
        Regex::new(r"^(?P<low>[0-9]+(?:\.[0-9]+)?)\s*(?:-|–|to)\s*(?P<high>[0-9]+(?:\.[0-9]+)?)$")
            .expect("Range pattern should be valid");

    /// `whole numerator/denominator`, e.g. "2 1/4"
    pub static ref MIXED_REGEX: Regex =
        Regex::new(r"^(?P<whole>[0-9]+)\s+(?P<num>[0-9]+)/(?P<den>[0-9]+)$")
            .expect("Mixed number pattern should be valid");

    /// Optional whole part followed by a vulgar fraction, e.g. "1½"
    pub static ref VULGAR_REGEX: Regex =
        Regex::new(r"^(?P<whole>[0-9]*)\s*(?P<frac>[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$")
            .expect("Vulgar fraction pattern should be valid");

    /// List markers stripped from ingredient-list lines
    pub static ref BULLET_REGEX: Regex = Regex::new(r"^\s*(?:[-*•·]|[0-9]+[.)])\s+")
        .expect("Bullet pattern should be valid");
}

/// Value of a single vulgar fraction character
pub fn vulgar_fraction_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(symbol, _)| *symbol == c)
        .map(|(_, value)| *value)
}
