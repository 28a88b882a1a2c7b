//! # Recipe Data Model
//!
//! This module defines the data structures the engine consumes and produces:
//! recipes as loaded from a recipe document, and the transient match results
//! produced by a ranking pass.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a read-only record with ingredient lines, steps and metadata
//! - **Difficulty**: easy/medium/hard, or free text for anything else
//! - **NutritionValue**: a display value that may be a number or text
//! - **MatchResult**: a scored recipe from one matching pass
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipes::recipe_model::{Difficulty, Recipe};
//!
//! let recipe = Recipe::new("r1", "Pancakes")
//!     .with_ingredients(&["2 eggs", "1 cup milk", "1 cup flour"])
//!     .with_servings(2)
//!     .with_difficulty(Difficulty::Easy)
//!     .with_dietary(&["vegetarian"]);
//!
//! assert!(recipe.has_dietary_tag("Vegetarian"));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Ingredient lines, possibly prefixed with a quantity and unit
    #[serde(default)]
    pub ingredients: Vec<String>,

    /// Instruction steps in order
    #[serde(default)]
    pub steps: Vec<String>,

    /// Number of servings the ingredient quantities are written for
    #[serde(default = "default_servings")]
    pub servings: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// Total cooking time in minutes
    #[serde(default)]
    pub time_minutes: u32,

    #[serde(default)]
    pub cuisine: String,

    /// Dietary tags such as "vegetarian", "vegan", "gluten-free"
    #[serde(default)]
    pub dietary: Vec<String>,

    /// Nutrition facts per serving, keyed by field name
    #[serde(default)]
    pub nutrition: BTreeMap<String, NutritionValue>,
}

fn default_servings() -> u32 {
    1
}

/// Recipe difficulty
///
/// A recipe without a difficulty holds an empty `Other` label, which never
/// matches a filter and never counts towards a taste profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// Any other free-text difficulty, kept as written
    Other(String),
}

/// A nutrition display value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionValue {
    Number(f64),
    Text(String),
}

/// The outcome of scoring one recipe against the available ingredients
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,

    /// Final ranking score, never negative
    pub score: f64,

    /// Exactly matched ingredients divided by required ingredients
    pub overlap_ratio: f64,

    /// Number of required ingredients that are available
    pub matched_count: usize,

    /// Number of required ingredients covered by an available substitute
    pub substitute_count: usize,

    /// Number of required ingredients neither available nor substitutable
    pub missing_count: usize,

    /// Normalized names of the missing ingredients, in recipe order
    pub missing: Vec<String>,
}

impl Recipe {
    /// Create a recipe with just an id and a title
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            servings: 1,
            difficulty: Difficulty::default(),
            time_minutes: 0,
            cuisine: String::new(),
            dietary: Vec::new(),
            nutrition: BTreeMap::new(),
        }
    }

    /// Set the ingredient lines
    pub fn with_ingredients(mut self, ingredients: &[&str]) -> Self {
        self.ingredients = ingredients.iter().map(|i| i.to_string()).collect();
        self
    }

    /// Set the instruction steps
    pub fn with_steps(mut self, steps: &[&str]) -> Self {
        self.steps = steps.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the original serving count
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set the difficulty
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the cooking time in minutes
    pub fn with_time(mut self, minutes: u32) -> Self {
        self.time_minutes = minutes;
        self
    }

    /// Set the cuisine
    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = cuisine.to_string();
        self
    }

    /// Set the dietary tags
    pub fn with_dietary(mut self, tags: &[&str]) -> Self {
        self.dietary = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Add a nutrition fact
    pub fn with_nutrition(mut self, field: &str, value: NutritionValue) -> Self {
        self.nutrition.insert(field.to_string(), value);
        self
    }

    /// Serving count with a floor of one
    pub fn effective_servings(&self) -> u32 {
        self.servings.max(1)
    }

    /// Check for a dietary tag, ignoring case
    pub fn has_dietary_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.dietary.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Other(String::new())
    }
}

impl Difficulty {
    /// Parse a difficulty label, ignoring case and surrounding whitespace
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Other(label.trim().to_string()),
        }
    }

    /// Label used for display and comparisons
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Other(label) => label,
        }
    }

    /// Whether no difficulty was given
    pub fn is_unset(&self) -> bool {
        matches!(self, Difficulty::Other(label) if label.trim().is_empty())
    }

    /// Compare against a free-text label, ignoring case
    ///
    /// An unset difficulty matches nothing.
    pub fn matches(&self, label: &str) -> bool {
        !self.is_unset() && self.as_str().eq_ignore_ascii_case(label.trim())
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        Difficulty::parse(&label)
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.as_str().to_string()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for NutritionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NutritionValue::Number(value) => {
                if value.fract() == 0.0 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{value}")
                }
            }
            NutritionValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min, {}, serves {})",
            self.title,
            self.time_minutes,
            self.difficulty,
            self.effective_servings()
        )
    }
}
