//! # Quantity Scaler
//!
//! This module parses the leading quantity of an ingredient line and rescales
//! it to a different number of servings.
//!
//! ## Features
//!
//! - Parse integers, decimals ("1.5", "1,5"), fractions ("1/2", "½"),
//!   mixed numbers ("2 1/4", "1 ½") and ranges ("2-3", "1 to 2")
//! - Render scaled values as integers, readable fractions ("1 1/2") or
//!   two-decimal numbers
//! - Lines without a numeric quantity ("salt to taste") keep their text and
//!   get a multiplier note instead
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipes::quantity::scale;
//!
//! let lines = vec!["2 eggs", "1 1/2 cups milk", "salt to taste"];
//! let scaled = scale(&lines, 2, 4);
//!
//! assert_eq!(scaled, vec!["4 eggs", "3 cups milk", "salt to taste (×2)"]);
//! ```

use crate::patterns::{vulgar_fraction_value, QUANTITY_PATTERNS};
use crate::recipe_model::Recipe;
use log::debug;
use regex::Captures;
use std::fmt;

/// Values this close to an integer render as integers
const INTEGER_TOLERANCE: f64 = 1e-9;
/// A fraction is used only when it is closer than two-decimal rounding
const FRACTION_TOLERANCE: f64 = 0.005;
/// Denominators tried, smallest first, when rendering fractions
const FRACTION_DENOMINATORS: [u32; 4] = [2, 3, 4, 8];

/// A numeric quantity read from the front of an ingredient line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityValue {
    /// A single amount (integer, decimal, fraction or mixed number)
    Single(f64),
    /// A range of amounts (e.g., "2-3")
    Range { min: f64, max: f64 },
}

/// A parsed leading quantity and the text that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity<'a> {
    pub value: QuantityValue,
    /// The rest of the line (unit and ingredient), without leading whitespace
    pub remainder: &'a str,
}

impl QuantityValue {
    /// Multiply the quantity by `ratio`
    pub fn scaled(self, ratio: f64) -> Self {
        match self {
            QuantityValue::Single(value) => QuantityValue::Single(value * ratio),
            QuantityValue::Range { min, max } => QuantityValue::Range {
                min: min * ratio,
                max: max * ratio,
            },
        }
    }

    /// Single representative value (midpoint for ranges)
    pub fn estimated_value(self) -> f64 {
        match self {
            QuantityValue::Single(value) => value,
            QuantityValue::Range { min, max } => (min + max) / 2.0,
        }
    }
}

impl fmt::Display for QuantityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityValue::Single(value) => write!(f, "{}", format_quantity(*value)),
            QuantityValue::Range { min, max } => {
                write!(f, "{}-{}", format_quantity(*min), format_quantity(*max))
            }
        }
    }
}

/// Parse the leading quantity of an ingredient line
///
/// Forms are tried in priority order: range, mixed number, fraction, then
/// decimal or integer. The first form that matches wins. Returns `None` when
/// the line has no leading number or the fraction has a zero denominator.
pub fn parse_leading_quantity(line: &str) -> Option<ParsedQuantity<'_>> {
    let text = line.trim();
    let patterns = &*QUANTITY_PATTERNS;

    let (value, end) = if let Some(caps) = patterns.range.captures(text) {
        let min = parse_decimal(&caps["min"])?;
        let max = parse_decimal(&caps["max"])?;
        (QuantityValue::Range { min, max }, caps.get(0)?.end())
    } else if let Some(caps) = patterns.mixed.captures(text) {
        let whole = parse_decimal(&caps["whole"])?;
        let fraction = fraction_value(&caps)?;
        (QuantityValue::Single(whole + fraction), caps.get(0)?.end())
    } else if let Some(caps) = patterns.fraction.captures(text) {
        (QuantityValue::Single(fraction_value(&caps)?), caps.get(0)?.end())
    } else if let Some(m) = patterns.decimal.find(text) {
        (QuantityValue::Single(parse_decimal(m.as_str())?), m.end())
    } else {
        return None;
    };

    Some(ParsedQuantity {
        value,
        remainder: text[end..].trim_start(),
    })
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok()
}

fn fraction_value(caps: &Captures<'_>) -> Option<f64> {
    if let Some(vulgar) = caps.name("vulgar") {
        return vulgar.as_str().chars().next().and_then(vulgar_fraction_value);
    }
    let numerator: f64 = caps.name("num")?.as_str().parse().ok()?;
    let denominator: f64 = caps.name("den")?.as_str().parse().ok()?;
    if denominator == 0.0 {
        debug!("Rejecting fraction with zero denominator");
        return None;
    }
    Some(numerator / denominator)
}

/// Serving ratio with both serving counts floored at one
pub fn serving_ratio(original_servings: u32, new_servings: u32) -> f64 {
    f64::from(new_servings.max(1)) / f64::from(original_servings.max(1))
}

/// Format a quantity for display
///
/// Integral values render as integers, values close to a half, third,
/// quarter or eighth render as fractions, anything else with two decimals.
pub fn format_quantity(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() < INTEGER_TOLERANCE {
        return format!("{}", rounded as i64);
    }
    if let Some(fraction) = as_simple_fraction(value) {
        return fraction;
    }
    format_decimal(value)
}

/// Two decimals, or an integer when that is what two decimals round to
///
/// Positive values too small for two decimals keep one significant digit
/// instead of rendering as zero.
fn format_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    match text.strip_suffix(".00") {
        Some(whole) if whole == "0" || whole == "-0" => {
            if value == 0.0 {
                return "0".to_string();
            }
            let digits = (-value.abs().log10()).ceil() as usize;
            format!("{value:.digits$}")
        }
        Some(whole) => whole.to_string(),
        None => text,
    }
}

fn as_simple_fraction(value: f64) -> Option<String> {
    if value < 0.0 {
        return None;
    }
    let whole = value.trunc();
    let remainder = value - whole;

    FRACTION_DENOMINATORS.iter().find_map(|&den| {
        let den = f64::from(den);
        let num = (remainder * den).round();
        if num < 1.0 || num >= den || (remainder - num / den).abs() >= FRACTION_TOLERANCE {
            return None;
        }
        Some(if whole == 0.0 {
            format!("{}/{}", num as u32, den as u32)
        } else {
            format!("{} {}/{}", whole as i64, num as u32, den as u32)
        })
    })
}

fn format_ratio(ratio: f64) -> String {
    let rounded = ratio.round();
    if (ratio - rounded).abs() < INTEGER_TOLERANCE {
        return format!("{}", rounded as i64);
    }
    let text = format!("{ratio:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Scale a single ingredient line by `ratio`
///
/// Lines without a parseable quantity are returned with a `(×ratio)` note,
/// or unchanged when the ratio is exactly one. Blank lines pass through.
pub fn scale_line(line: &str, ratio: f64) -> String {
    if line.trim().is_empty() {
        return line.to_string();
    }

    match parse_leading_quantity(line) {
        Some(parsed) => format!("{} {}", parsed.value.scaled(ratio), parsed.remainder)
            .trim()
            .to_string(),
        None if ratio == 1.0 => line.to_string(),
        None => {
            debug!("No quantity in '{}', annotating with ratio", line);
            format!("{} (×{})", line, format_ratio(ratio))
        }
    }
}

/// Scale ingredient lines from `original_servings` to `new_servings`
///
/// Serving counts of zero are treated as one.
pub fn scale<S: AsRef<str>>(lines: &[S], original_servings: u32, new_servings: u32) -> Vec<String> {
    let ratio = serving_ratio(original_servings, new_servings);
    debug!(
        "Scaling {} lines from {} to {} servings (ratio {:.3})",
        lines.len(),
        original_servings,
        new_servings,
        ratio
    );
    lines.iter().map(|line| scale_line(line.as_ref(), ratio)).collect()
}

/// Scale a recipe's ingredient lines to `new_servings`
pub fn scale_recipe(recipe: &Recipe, new_servings: u32) -> Vec<String> {
    scale(&recipe.ingredients, recipe.servings, new_servings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_decimal() {
        let parsed = parse_leading_quantity("2 cups flour").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(2.0));
        assert_eq!(parsed.remainder, "cups flour");

        let parsed = parse_leading_quantity("1.5 kg beef").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(1.5));

        let parsed = parse_leading_quantity("1,5 litre de lait").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(1.5));
        assert_eq!(parsed.remainder, "litre de lait");
    }

    #[test]
    fn test_parse_fractions() {
        let parsed = parse_leading_quantity("1/2 cup sugar").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(0.5));
        assert_eq!(parsed.remainder, "cup sugar");

        let parsed = parse_leading_quantity("2 1/4 cups butter").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(2.25));
        assert_eq!(parsed.remainder, "cups butter");

        let parsed = parse_leading_quantity("1 ½ tsp salt").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(1.5));

        let parsed = parse_leading_quantity("¾ cup cream").unwrap();
        assert_eq!(parsed.value, QuantityValue::Single(0.75));
    }

    #[test]
    fn test_parse_range() {
        let parsed = parse_leading_quantity("2-3 tbsp olive oil").unwrap();
        assert_eq!(parsed.value, QuantityValue::Range { min: 2.0, max: 3.0 });
        assert_eq!(parsed.remainder, "tbsp olive oil");
        assert_eq!(parsed.value.estimated_value(), 2.5);
    }

    #[test]
    fn test_parse_failures() {
        assert!(parse_leading_quantity("salt to taste").is_none());
        assert!(parse_leading_quantity("").is_none());
        assert!(parse_leading_quantity("1/0 cup water").is_none());
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(4.0), "4");
        assert_eq!(format_quantity(0.5), "1/2");
        assert_eq!(format_quantity(1.5), "1 1/2");
        assert_eq!(format_quantity(2.0 / 3.0), "2/3");
        assert_eq!(format_quantity(0.125), "1/8");
        assert_eq!(format_quantity(1.17), "1.17");
        assert_eq!(format_quantity(0.1333), "0.13");
        assert_eq!(format_quantity(2.999), "3");
        assert_eq!(format_quantity(0.004), "0.004");
        assert_eq!(format_quantity(0.00046), "0.0005");
    }

    #[test]
    fn test_scale_doubles_quantities() {
        let lines = vec!["2 eggs", "1 cup milk", "1 cup flour"];
        assert_eq!(
            scale(&lines, 2, 4),
            vec!["4 eggs", "2 cup milk", "2 cup flour"]
        );
    }

    #[test]
    fn test_scale_annotates_unparseable_lines() {
        assert_eq!(scale_line("salt to taste", 2.0), "salt to taste (×2)");
        assert_eq!(scale_line("salt to taste", 1.5), "salt to taste (×1.5)");
        assert_eq!(scale_line("salt to taste", 1.0 / 3.0), "salt to taste (×0.33)");
        assert_eq!(scale_line("salt to taste", 1.0), "salt to taste");
        assert_eq!(scale_line("1/0 cup water", 2.0), "1/0 cup water (×2)");
        assert_eq!(scale_line("", 2.0), "");
    }

    #[test]
    fn test_scale_range_and_fraction() {
        assert_eq!(scale_line("2-3 tbsp oil", 2.0), "4-6 tbsp oil");
        assert_eq!(scale_line("1/2 cup sugar", 3.0), "1 1/2 cup sugar");
        assert_eq!(scale_line("3", 2.0), "6");
    }

    #[test]
    fn test_zero_servings_are_clamped() {
        assert_eq!(serving_ratio(0, 4), 4.0);
        assert_eq!(serving_ratio(2, 0), 0.5);
        assert_eq!(scale(&["2 eggs"], 0, 2), vec!["4 eggs"]);
    }

    #[test]
    fn test_scale_recipe_uses_original_servings() {
        let recipe = Recipe::new("r1", "Pancakes")
            .with_ingredients(&["2 eggs", "1 cup milk"])
            .with_servings(2);
        assert_eq!(scale_recipe(&recipe, 1), vec!["1 eggs", "1/2 cup milk"]);
    }
}
