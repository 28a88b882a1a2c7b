//! # Ingredient Normalizer
//!
//! This module turns raw ingredient lines into canonical tokens that can be
//! compared across recipes and user input.
//!
//! ## Features
//!
//! - Strips leading quantities: integers, decimals, fractions, mixed numbers,
//!   ranges and Unicode vulgar fractions (e.g., "2 1/2", "½", "2-3")
//! - Strips known English and French unit words that follow a quantity
//! - Drops parenthetical asides and preparation notes after a comma
//! - Reduces the head noun to its singular form so "2 eggs" matches "egg"
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipes::normalizer::normalize;
//!
//! assert_eq!(normalize("2 1/2 cups flour, sifted"), "flour");
//! assert_eq!(normalize("1 tbsp olive oil (extra virgin)"), "olive oil");
//! assert_eq!(normalize("3 large eggs"), "large egg");
//! ```

use crate::config::NormalizerConfig;
use crate::patterns::{leading_quantity_len, leading_unit_len};
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Trailing phrases that describe an amount rather than the ingredient
const AMOUNT_PHRASES: &[&str] = &[
    "to taste",
    "as needed",
    "for garnish",
    "for serving",
    "optional",
    "au goût",
    "à goût",
    "selon le goût",
    "facultatif",
];

/// Connector words between a unit and the ingredient name
const CONNECTORS: &[&str] = &["of", "de", "d'", "du", "des"];

/// Words left untouched by singularization
const INVARIANT_WORDS: &[&str] = &["molasses", "series", "species"];

lazy_static! {
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\([^)]*(?:\)|$)").expect("Parenthetical pattern should be valid");
}

/// Normalizer for ingredient lines
#[derive(Debug, Clone, Default)]
pub struct IngredientNormalizer {
    config: NormalizerConfig,
}

impl IngredientNormalizer {
    /// Create a normalizer with custom configuration
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Get the normalizer configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a raw ingredient line into its canonical token
    ///
    /// Returns an empty string when nothing but quantities, units and
    /// punctuation remain.
    pub fn normalize(&self, line: &str) -> String {
        let lowered = line.trim().to_lowercase();
        if lowered.is_empty() {
            return String::new();
        }

        let without_notes = PARENTHETICAL.replace_all(&lowered, " ");
        let text = without_notes.trim();
        let after_quantity = strip_quantity(text);
        // Units and connectors only follow a quantity
        let name = if after_quantity.len() < text.len() {
            strip_connector(strip_unit(after_quantity))
        } else {
            after_quantity
        };

        // Everything after the first comma, semicolon or colon is a preparation note
        let head = name.split([',', ';', ':']).next().unwrap_or("");
        let head = strip_amount_phrase(head.trim());

        let mut words: Vec<String> = head
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| matches!(c, ',' | '.' | ';' | ':' | '!' | '?')))
            .filter(|w| !w.is_empty())
            .take(self.config.max_words.max(1))
            .map(str::to_string)
            .collect();

        if self.config.singularize {
            if let Some(last) = words.last_mut() {
                *last = singularize(last);
            }
        }

        let token = words.join(" ");
        trace!("Normalized '{}' -> '{}'", line, token);
        token
    }
}

/// Normalize an ingredient line with the default configuration
pub fn normalize(line: &str) -> String {
    IngredientNormalizer::default().normalize(line)
}

/// Normalize a recipe title for duplicate detection
///
/// Lowercases, removes parenthetical content and collapses whitespace, so
/// "Tomato Soup (v2)" and "tomato  soup" compare equal.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    PARENTHETICAL
        .replace_all(&lowered, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reduce an English word to a singular form with simple suffix rules
pub fn singularize(word: &str) -> String {
    if word.chars().count() <= 3
        || word.ends_with("ss")
        || word.ends_with("us")
        || INVARIANT_WORDS.contains(&word)
    {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("oes") {
        return format!("{stem}o");
    }
    if ["ches", "shes", "sses", "xes"]
        .iter()
        .any(|suffix| word.ends_with(suffix))
    {
        return word[..word.len() - 2].to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn strip_quantity(text: &str) -> &str {
    match leading_quantity_len(text) {
        Some(len) => text[len..].trim_start(),
        None => text,
    }
}

fn strip_unit(text: &str) -> &str {
    match leading_unit_len(text) {
        Some(len) => {
            let rest = text[len..].trim_start();
            // A bare unit ("2 cups") has no name to fall back on; keep it
            if rest.is_empty() {
                text
            } else {
                rest
            }
        }
        None => text,
    }
}

fn strip_connector(text: &str) -> &str {
    for connector in CONNECTORS {
        if let Some(rest) = text.strip_prefix(connector) {
            if connector.ends_with('\'') {
                return rest.trim_start();
            }
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    text
}

fn strip_amount_phrase(text: &str) -> &str {
    for phrase in AMOUNT_PHRASES {
        if let Some(rest) = text.strip_suffix(phrase) {
            let rest = rest.trim_end();
            if !rest.is_empty() {
                return rest;
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quantities_and_units() {
        assert_eq!(normalize("2 1/2 cups flour, sifted"), "flour");
        assert_eq!(normalize("1/2 tsp salt"), "salt");
        assert_eq!(normalize("1.5 kg potatoes"), "potato");
        assert_eq!(normalize("½ cup sugar"), "sugar");
        assert_eq!(normalize("1 ½ cups milk"), "milk");
        assert_eq!(normalize("2-3 tbsp. olive oil"), "olive oil");
        assert_eq!(normalize("1 cup of rice"), "rice");
    }

    #[test]
    fn test_parenthetical_and_punctuation() {
        assert_eq!(normalize("1 can tomatoes (diced)"), "tomato");
        assert_eq!(normalize("Butter."), "butter");
        assert_eq!(normalize("garlic: minced"), "garlic");
        assert_eq!(normalize("2 onions (about 300 g"), "onion");
    }

    #[test]
    fn test_amount_phrases() {
        assert_eq!(normalize("salt to taste"), "salt");
        assert_eq!(normalize("parsley, for garnish"), "parsley");
        assert_eq!(normalize("sel selon le goût"), "sel");
    }

    #[test]
    fn test_french_lines() {
        assert_eq!(normalize("2 cuillères à soupe de sucre"), "sucre");
        assert_eq!(normalize("250 g de farine"), "farine");
        assert_eq!(normalize("1 gousse d'ail"), "ail");
    }

    #[test]
    fn test_plain_count_keeps_name() {
        assert_eq!(normalize("2 eggs"), "egg");
        assert_eq!(normalize("EGGS"), "egg");
        assert_eq!(normalize("2 cups"), "cup");
    }

    #[test]
    fn test_unit_words_without_quantity_are_kept() {
        assert_eq!(normalize("head cheese"), "head cheese");
        assert_eq!(normalize("can tomatoes"), "can tomato");
        assert_eq!(normalize("de la crème"), "de la crème");
        assert_eq!(normalize("1 head lettuce"), "lettuce");
    }

    #[test]
    fn test_empty_and_quantity_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("3"), "");
        assert_eq!(normalize("(optional)"), "");
    }

    #[test]
    fn test_word_limit() {
        let normalizer = IngredientNormalizer::new(NormalizerConfig {
            max_words: 2,
            singularize: true,
        });
        assert_eq!(
            normalizer.normalize("1 cup freshly grated parmesan cheese"),
            "freshly grated"
        );
        assert_eq!(normalize("extra virgin olive oil"), "extra virgin olive oil");
    }

    #[test]
    fn test_singularize_rules() {
        assert_eq!(singularize("berries"), "berry");
        assert_eq!(singularize("tomatoes"), "tomato");
        assert_eq!(singularize("peaches"), "peach");
        assert_eq!(singularize("eggs"), "egg");
        assert_eq!(singularize("asparagus"), "asparagus");
        assert_eq!(singularize("swiss"), "swiss");
        assert_eq!(singularize("molasses"), "molasses");
        assert_eq!(singularize("peas"), "pea");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Tomato Soup (v2)"), "tomato soup");
        assert_eq!(normalize_title("  Tomato   Soup "), "tomato soup");
    }

    #[test]
    fn test_singularize_disabled() {
        let normalizer = IngredientNormalizer::new(NormalizerConfig {
            max_words: 4,
            singularize: false,
        });
        assert_eq!(normalizer.normalize("2 eggs"), "eggs");
    }
}
