//! # Recipe Matcher
//!
//! Ranks recipes against the ingredients a user has on hand.
//!
//! A matching pass normalizes the available ingredients, drops recipes that
//! fail a hard filter (dietary, difficulty, time, cuisine), scores the rest
//! by ingredient overlap with optional credit for substitutes, sorts them,
//! removes duplicate titles and keeps the top results.
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipes::matcher::{MatchQuery, RecipeMatcher};
//! use smart_recipes::recipe_model::Recipe;
//!
//! let recipes = vec![
//!     Recipe::new("r1", "Pancakes").with_ingredients(&["2 eggs", "1 cup milk", "1 cup flour"]),
//!     Recipe::new("r2", "Steak").with_ingredients(&["1 steak", "salt"]),
//! ];
//!
//! let matcher = RecipeMatcher::default();
//! let found = matcher.match_recipes(&["egg", "milk", "flour"], &recipes, &MatchQuery::default());
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, "r1");
//! ```

use crate::config::{EngineConfig, MatchMode, MatcherConfig, DEFAULT_MAX_RESULTS};
use crate::errors::ConfigError;
use crate::normalizer::{normalize_title, singularize, IngredientNormalizer};
use crate::recipe_model::{MatchResult, Recipe};
use crate::substitutions::SubstitutionCatalog;
use log::{debug, info, trace};
use std::collections::HashSet;

/// Filters and limits for one matching pass
///
/// Text filters that are empty or "any" (in any case) are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub dietary: Option<String>,
    pub difficulty: Option<String>,
    /// Maximum cooking time in minutes
    pub max_time: Option<u32>,
    pub cuisine: Option<String>,
    /// Maximum number of results; zero yields no results
    pub max_results: usize,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            dietary: None,
            difficulty: None,
            max_time: None,
            cuisine: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl MatchQuery {
    /// Create a query with no filters
    pub fn new(max_results: usize) -> Self {
        Self {
            max_results,
            ..Default::default()
        }
    }

    pub fn with_dietary(mut self, dietary: &str) -> Self {
        self.dietary = Some(dietary.to_string());
        self
    }

    pub fn with_difficulty(mut self, difficulty: &str) -> Self {
        self.difficulty = Some(difficulty.to_string());
        self
    }

    pub fn with_max_time(mut self, minutes: u32) -> Self {
        self.max_time = Some(minutes);
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.cuisine = Some(cuisine.to_string());
        self
    }
}

/// Reasons a recipe is excluded before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NonVegetarianIngredient,
    MissingDietaryTag,
    Difficulty,
    TooSlow,
    Cuisine,
}

/// Recipe ranking engine
#[derive(Debug, Clone)]
pub struct RecipeMatcher {
    config: MatcherConfig,
    normalizer: IngredientNormalizer,
    catalog: SubstitutionCatalog,
}

impl Default for RecipeMatcher {
    fn default() -> Self {
        let config = MatcherConfig::default();
        Self {
            normalizer: IngredientNormalizer::new(config.normalizer.clone()),
            config,
            catalog: SubstitutionCatalog::default(),
        }
    }
}

impl RecipeMatcher {
    /// Create a matcher with custom configuration and substitution catalog
    ///
    /// # Errors
    ///
    /// Fails when the scoring weights are unusable or the token word limit
    /// is zero.
    pub fn new(config: MatcherConfig, catalog: SubstitutionCatalog) -> Result<Self, ConfigError> {
        config.weights.validate()?;
        if config.normalizer.max_words == 0 {
            return Err(ConfigError::ZeroTokenWords);
        }
        info!(
            "Creating RecipeMatcher: mode={:?}, substitution_credit={}, catalog_entries={}",
            config.mode,
            config.substitution_credit,
            catalog.len()
        );
        Ok(Self {
            normalizer: IngredientNormalizer::new(config.normalizer.clone()),
            config,
            catalog,
        })
    }

    /// Create a matcher from a whole engine configuration
    ///
    /// The configuration is validated first and its fuzzy cutoff is applied
    /// to the catalog.
    pub fn from_engine_config(
        config: &EngineConfig,
        catalog: SubstitutionCatalog,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = catalog.with_cutoff(config.fuzzy_cutoff)?;
        Self::new(config.matcher.clone(), catalog)
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn catalog(&self) -> &SubstitutionCatalog {
        &self.catalog
    }

    /// Normalize user ingredients into a set of tokens, dropping empty ones
    pub fn available_set<S: AsRef<str>>(&self, available: &[S]) -> HashSet<String> {
        available
            .iter()
            .map(|item| self.normalizer.normalize(item.as_ref()))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Normalized, deduplicated ingredient tokens of a recipe, in recipe order
    pub fn required_tokens(&self, recipe: &Recipe) -> Vec<String> {
        let mut seen = HashSet::new();
        recipe
            .ingredients
            .iter()
            .map(|line| self.normalizer.normalize(line))
            .filter(|token| !token.is_empty() && seen.insert(token.clone()))
            .collect()
    }

    /// Return the recipes that best match the available ingredients
    pub fn match_recipes<'a, S: AsRef<str>>(
        &self,
        available: &[S],
        recipes: &'a [Recipe],
        query: &MatchQuery,
    ) -> Vec<&'a Recipe> {
        self.rank(available, recipes, query)
            .into_iter()
            .map(|result| result.recipe)
            .collect()
    }

    /// Rank recipes against the available ingredients, keeping scores
    ///
    /// Results are sorted by score, then overlap ratio, then input order.
    /// Each normalized title appears at most once and at most
    /// `query.max_results` results are returned.
    pub fn rank<'a, S: AsRef<str>>(
        &self,
        available: &[S],
        recipes: &'a [Recipe],
        query: &MatchQuery,
    ) -> Vec<MatchResult<'a>> {
        if query.max_results == 0 {
            return Vec::new();
        }

        let available = self.available_set(available);
        if available.is_empty() {
            debug!("No usable ingredients supplied, skipping matching");
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for recipe in recipes {
            let required = self.required_tokens(recipe);
            if let Some(rejection) = self.check_filters(recipe, &required, query) {
                trace!("Excluding recipe '{}': {:?}", recipe.id, rejection);
                continue;
            }
            if let Some(result) = self.score(recipe, &required, &available) {
                candidates.push(result);
            }
        }

        // Stable sort keeps input order for equal keys
        candidates.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.overlap_ratio.total_cmp(&a.overlap_ratio))
        });

        let mut seen_titles = HashSet::new();
        let results: Vec<MatchResult<'a>> = candidates
            .into_iter()
            .filter(|result| {
                let title = normalize_title(&result.recipe.title);
                let first = seen_titles.insert(title);
                if !first {
                    trace!("Dropping duplicate title '{}'", result.recipe.title);
                }
                first
            })
            .take(query.max_results)
            .collect();

        info!(
            "Matched {} of {} recipes with {} available ingredients",
            results.len(),
            recipes.len(),
            available.len()
        );
        results
    }

    /// Apply the hard filters in order, returning the first failure
    pub fn check_filters(
        &self,
        recipe: &Recipe,
        required: &[String],
        query: &MatchQuery,
    ) -> Option<Rejection> {
        if let Some(dietary) = active_filter(&query.dietary) {
            if self.config.dietary.is_plant_based(dietary)
                && required.iter().any(|token| self.is_non_vegetarian(token))
            {
                return Some(Rejection::NonVegetarianIngredient);
            }
            if !recipe.has_dietary_tag(dietary) {
                return Some(Rejection::MissingDietaryTag);
            }
        }

        if let Some(difficulty) = active_filter(&query.difficulty) {
            if !recipe.difficulty.matches(difficulty) {
                return Some(Rejection::Difficulty);
            }
        }

        if let Some(max_time) = query.max_time {
            if recipe.time_minutes > max_time {
                return Some(Rejection::TooSlow);
            }
        }

        if let Some(cuisine) = active_filter(&query.cuisine) {
            if !recipe.cuisine.trim().eq_ignore_ascii_case(cuisine) {
                return Some(Rejection::Cuisine);
            }
        }

        None
    }

    /// Whether a token, or any word in it, names a non-vegetarian ingredient
    pub fn is_non_vegetarian(&self, token: &str) -> bool {
        let terms = &self.config.dietary.non_vegetarian;
        terms.contains(token)
            || token
                .split_whitespace()
                .any(|word| terms.contains(word) || terms.contains(&singularize(word)))
    }

    fn is_available(&self, token: &str, available: &HashSet<String>) -> bool {
        if available.contains(token) {
            return true;
        }
        match self.config.mode {
            MatchMode::Exact => false,
            MatchMode::Substring => available
                .iter()
                .any(|a| contains_word_run(a, token) || contains_word_run(token, a)),
        }
    }

    fn has_substitute(&self, token: &str, available: &HashSet<String>) -> bool {
        available
            .iter()
            .any(|candidate| self.catalog.can_substitute(token, candidate))
    }

    fn score<'a>(
        &self,
        recipe: &'a Recipe,
        required: &[String],
        available: &HashSet<String>,
    ) -> Option<MatchResult<'a>> {
        let mut matched_count = 0;
        let mut substitute_count = 0;
        let mut missing = Vec::new();

        for token in required {
            if self.is_available(token, available) {
                matched_count += 1;
            } else if self.config.substitution_credit && self.has_substitute(token, available) {
                substitute_count += 1;
            } else {
                missing.push(token.clone());
            }
        }

        if matched_count == 0 && substitute_count == 0 {
            return None;
        }

        let weights = &self.config.weights;
        let total = required.len();
        let overlap_ratio = matched_count as f64 / total.max(1) as f64;
        let mut score = weights.exact * matched_count as f64
            + weights.overlap * overlap_ratio
            + weights.substitute * substitute_count as f64
            - weights.missing * missing.len() as f64;
        if total <= weights.simple_recipe_max_ingredients {
            score += weights.simplicity_bonus;
        }

        if !score.is_finite() || score < 0.0 {
            trace!("Excluding recipe '{}' with score {:.2}", recipe.id, score);
            return None;
        }

        Some(MatchResult {
            recipe,
            score,
            overlap_ratio,
            matched_count,
            substitute_count,
            missing_count: missing.len(),
            missing,
        })
    }
}

/// Rank recipes with the default matcher
pub fn match_recipes<'a, S: AsRef<str>>(
    available: &[S],
    recipes: &'a [Recipe],
    query: &MatchQuery,
) -> Vec<&'a Recipe> {
    RecipeMatcher::default().match_recipes(available, recipes, query)
}

fn active_filter(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("any"))
}

/// Whether the words of `needle` appear as a contiguous run in `haystack`
fn contains_word_run(haystack: &str, needle: &str) -> bool {
    let hay: Vec<&str> = haystack.split_whitespace().collect();
    let needle: Vec<&str> = needle.split_whitespace().collect();
    !needle.is_empty()
        && needle.len() <= hay.len()
        && hay.windows(needle.len()).any(|window| window == needle.as_slice())
}
