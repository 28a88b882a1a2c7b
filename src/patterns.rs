//! # Quantity Patterns Module
//!
//! Regex patterns and vocabularies shared by the ingredient normalizer and the
//! quantity scaler: leading quantities (integers, decimals, fractions, mixed
//! numbers, ranges and Unicode vulgar fractions) and the unit words that may
//! follow them.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Unicode vulgar fraction characters accepted as quantities.
pub const VULGAR_FRACTIONS: &str = "½⅓⅔¼¾⅛⅜⅝⅞";

/// Compiled regex patterns for leading quantities, tried in priority order
pub struct QuantityPatterns {
    /// Ranges: "2-3", "1 to 2", "1.5–2"
    pub range: Regex,
    /// Mixed numbers: "2 1/2", "1 ½"
    pub mixed: Regex,
    /// Simple fractions: "1/2", "3⁄4", "½"
    pub fraction: Regex,
    /// Decimals and integers: "2", "1.5", "1,5", ".5"
    pub decimal: Regex,
}

impl QuantityPatterns {
    fn new() -> Self {
        Self {
            range: Regex::new(
                r"^(?P<min>\d+(?:[.,]\d+)?)\s*(?:-|–|—|to|à)\s*(?P<max>\d+(?:[.,]\d+)?)(?:\s|$)",
            )
            .expect("Range pattern should be valid"),
            mixed: Regex::new(&format!(
                r"^(?P<whole>\d+)(?:\s+(?P<num>\d+)\s*[⁄/]\s*(?P<den>\d+)|\s*(?P<vulgar>[{VULGAR_FRACTIONS}]))"
            ))
            .expect("Mixed number pattern should be valid"),
            fraction: Regex::new(&format!(
                r"^(?:(?P<num>\d+)\s*[⁄/]\s*(?P<den>\d+)|(?P<vulgar>[{VULGAR_FRACTIONS}]))"
            ))
            .expect("Fraction pattern should be valid"),
            decimal: Regex::new(r"^(?:\d+(?:[.,]\d+)?|\.\d+)")
                .expect("Decimal pattern should be valid"),
        }
    }
}

lazy_static! {
    pub static ref QUANTITY_PATTERNS: QuantityPatterns = QuantityPatterns::new();

    /// Unit words (English and French) that may directly follow a quantity
    pub static ref UNIT_WORDS: HashSet<&'static str> = [
        // Volume units
        "tsp", "teaspoon", "teaspoons", "tbsp", "tbs", "tablespoon", "tablespoons",
        "cup", "cups", "c", "fl oz", "fluid ounce", "fluid ounces", "pint", "pints",
        "pt", "quart", "quarts", "qt", "gallon", "gallons", "gal", "ml", "milliliter",
        "milliliters", "millilitre", "millilitres", "cl", "dl", "l", "liter", "liters",
        "litre", "litres",
        // Weight units
        "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds", "mg", "g", "gram",
        "grams", "kg", "kilogram", "kilograms",
        // Count and specialized units
        "piece", "pieces", "dozen", "doz", "pinch", "pinches", "dash", "dashes",
        "clove", "cloves", "package", "packages", "pkg", "can", "cans", "bottle",
        "bottles", "slice", "slices", "stick", "sticks", "bunch", "bunches",
        "handful", "handfuls", "sprig", "sprigs", "head", "heads", "jar", "jars",
        // French units
        "cuillère à café", "cuillères à café", "cuillère à soupe", "cuillères à soupe",
        "cac", "cas", "tasse", "tasses", "gramme", "grammes", "kilogramme",
        "kilogrammes", "pièce", "pièces", "gousse", "gousses", "boîte", "boîtes",
        "bouteille", "bouteilles", "pincée", "pincées", "tranche", "tranches",
        "sachet", "sachets", "brin", "brins", "poignée", "poignées",
    ]
    .into_iter()
    .collect();
}

/// Numeric value of a Unicode vulgar fraction character
pub fn vulgar_fraction_value(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Length in bytes of the leading quantity of `text`, whichever form it takes
pub fn leading_quantity_len(text: &str) -> Option<usize> {
    let patterns = &*QUANTITY_PATTERNS;
    [
        &patterns.range,
        &patterns.mixed,
        &patterns.fraction,
        &patterns.decimal,
    ]
    .iter()
    .find_map(|pattern| pattern.find(text))
    .map(|m| m.end())
}

/// Length in bytes of a leading unit word (up to three words long) in `text`
///
/// A trailing period on the unit ("tbsp.") is part of the match.
pub fn leading_unit_len(text: &str) -> Option<usize> {
    let mut word_ends = Vec::with_capacity(3);
    let mut in_word = false;
    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word {
                word_ends.push(idx);
                in_word = false;
                if word_ends.len() == 3 {
                    break;
                }
            }
        } else {
            in_word = true;
        }
    }
    if in_word && word_ends.len() < 3 {
        word_ends.push(text.len());
    }

    word_ends.into_iter().rev().find(|&end| {
        let candidate = text[..end].trim_end_matches('.');
        UNIT_WORDS.contains(candidate)
    })
}
