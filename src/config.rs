//! # Engine Configuration Module
//!
//! Tunable parameters for normalization, matching, substitution lookup and
//! recommendations. Every constant table the engine consults lives here so
//! tests and callers can swap in alternate values.

use crate::errors::ConfigError;
use std::collections::HashSet;

// Defaults for engine configuration
pub const DEFAULT_MAX_TOKEN_WORDS: usize = 4;
pub const DEFAULT_MAX_RESULTS: usize = 6;
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.6;
pub const DEFAULT_LIKE_THRESHOLD: u8 = 4;
pub const SIMPLE_RECIPE_MAX_INGREDIENTS: usize = 5;

/// Ingredients that rule a recipe out of vegetarian and vegan results
pub const NON_VEGETARIAN_TERMS: &[&str] = &[
    "egg", "chicken", "beef", "pork", "bacon", "ham", "lamb", "mutton", "veal",
    "turkey", "duck", "goose", "sausage", "chorizo", "pepperoni", "salami",
    "prosciutto", "pancetta", "meat", "mince", "fish", "salmon", "tuna", "cod",
    "tilapia", "trout", "sardine", "anchovy", "mackerel", "shrimp", "prawn",
    "crab", "lobster", "clam", "mussel", "oyster", "scallop", "squid", "octopus",
    "gelatin", "gelatine", "lard", "oeuf", "poulet", "boeuf", "porc", "jambon",
    "poisson", "lardon",
];

/// Dietary labels that trigger the ingredient-level plant-based check
pub const PLANT_BASED_LABELS: &[&str] = &["vegetarian", "vegan"];

/// Options for ingredient normalization
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Maximum number of words kept in a token
    pub max_words: usize,
    /// Whether the last word of a token is reduced to its singular form
    pub singularize: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_TOKEN_WORDS,
            singularize: true,
        }
    }
}

/// How required and available tokens are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Tokens must be equal
    #[default]
    Exact,
    /// One token's words must appear as a contiguous run in the other's
    Substring,
}

/// Weights of the recipe scoring formula
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWeights {
    /// Points per exactly matched ingredient
    pub exact: f64,
    /// Points for the overlap ratio (exact matches / required ingredients)
    pub overlap: f64,
    /// Points per ingredient covered by a substitute
    pub substitute: f64,
    /// Penalty per missing ingredient
    pub missing: f64,
    /// Bonus for recipes with few ingredients
    pub simplicity_bonus: f64,
    /// Ingredient count at or below which the simplicity bonus applies
    pub simple_recipe_max_ingredients: usize,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            exact: 2.0,
            overlap: 1.0,
            substitute: 1.0,
            missing: 0.5,
            simplicity_bonus: 0.1,
            simple_recipe_max_ingredients: SIMPLE_RECIPE_MAX_INGREDIENTS,
        }
    }
}

impl MatchWeights {
    /// Check that the weights are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("exact", self.exact),
            ("overlap", self.overlap),
            ("substitute", self.substitute),
            ("missing", self.missing),
            ("simplicity_bonus", self.simplicity_bonus),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight(name));
            }
        }
        if self.exact <= self.substitute {
            return Err(ConfigError::ExactNotAboveSubstitute);
        }
        Ok(())
    }
}

/// Dietary rules applied on top of a recipe's own tags
#[derive(Debug, Clone)]
pub struct DietaryRules {
    /// Ingredient terms that are never vegetarian
    pub non_vegetarian: HashSet<String>,
    /// Dietary labels that trigger the ingredient check
    pub plant_based_labels: Vec<String>,
}

impl Default for DietaryRules {
    fn default() -> Self {
        Self {
            non_vegetarian: NON_VEGETARIAN_TERMS.iter().map(|t| t.to_string()).collect(),
            plant_based_labels: PLANT_BASED_LABELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl DietaryRules {
    /// Whether a dietary label requires the ingredient-level check
    pub fn is_plant_based(&self, label: &str) -> bool {
        self.plant_based_labels
            .iter()
            .any(|l| l.eq_ignore_ascii_case(label.trim()))
    }
}

/// Configuration for the recipe matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub weights: MatchWeights,
    pub mode: MatchMode,
    /// Whether missing ingredients covered by an available substitute earn credit
    pub substitution_credit: bool,
    pub dietary: DietaryRules,
    pub normalizer: NormalizerConfig,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            weights: MatchWeights::default(),
            mode: MatchMode::default(),
            substitution_credit: true,
            dietary: DietaryRules::default(),
            normalizer: NormalizerConfig::default(),
        }
    }
}

/// What `recommend` returns when the user has liked nothing yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecommendationFallback {
    /// Return no recommendations
    #[default]
    Empty,
    /// Return the first `top_n` recipes in input order
    FirstN,
}

/// Configuration for the recommendation engine
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Minimum rating for a recipe to count as liked
    pub like_threshold: u8,
    pub cuisine_weight: u32,
    pub dietary_weight: u32,
    pub difficulty_weight: u32,
    pub fallback: RecommendationFallback,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            like_threshold: DEFAULT_LIKE_THRESHOLD,
            cuisine_weight: 3,
            dietary_weight: 2,
            difficulty_weight: 1,
            fallback: RecommendationFallback::Empty,
        }
    }
}

/// Configuration for the whole engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub matcher: MatcherConfig,
    pub recommendation: RecommendationConfig,
    /// Minimum normalized similarity for fuzzy substitution lookup
    pub fuzzy_cutoff: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            recommendation: RecommendationConfig::default(),
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
        }
    }
}

impl EngineConfig {
    /// Check the whole configuration for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matcher.weights.validate()?;
        if self.matcher.normalizer.max_words == 0 {
            return Err(ConfigError::ZeroTokenWords);
        }
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(ConfigError::InvalidCutoff(self.fuzzy_cutoff));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default().matcher.substitution_credit);
    }

    #[test]
    fn test_exact_weight_must_exceed_substitute() {
        let weights = MatchWeights {
            exact: 1.0,
            substitute: 1.0,
            ..Default::default()
        };
        assert_eq!(weights.validate(), Err(ConfigError::ExactNotAboveSubstitute));
    }

    #[test]
    fn test_invalid_weight_and_cutoff() {
        let weights = MatchWeights {
            missing: f64::NAN,
            ..Default::default()
        };
        assert_eq!(weights.validate(), Err(ConfigError::InvalidWeight("missing")));

        let config = EngineConfig {
            fuzzy_cutoff: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidCutoff(1.5)));
    }

    #[test]
    fn test_plant_based_labels() {
        let rules = DietaryRules::default();
        assert!(rules.is_plant_based("Vegan"));
        assert!(rules.is_plant_based("vegetarian"));
        assert!(!rules.is_plant_based("gluten-free"));
    }
}
