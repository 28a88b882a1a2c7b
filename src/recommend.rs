//! # Recommendation Engine
//!
//! Builds a taste profile from the recipes a user rated highly and suggests
//! other recipes that share their cuisine, dietary tags and difficulty.
//!
//! Ratings come from an external store as a snapshot map of recipe id to a
//! 0-5 rating. When nothing is rated at or above the like threshold, the
//! configured [`RecommendationFallback`] decides the result.
//!
//! ```rust
//! use std::collections::HashMap;
//! use smart_recipes::recipe_model::{Difficulty, Recipe};
//! use smart_recipes::recommend::RecommendationEngine;
//!
//! let recipes = vec![
//!     Recipe::new("r1", "Margherita").with_cuisine("Italian"),
//!     Recipe::new("r2", "Carbonara").with_cuisine("Italian"),
//!     Recipe::new("r3", "Pad Thai").with_cuisine("Thai").with_difficulty(Difficulty::Hard),
//! ];
//! let ratings = HashMap::from([("r1".to_string(), 5)]);
//!
//! let picks = RecommendationEngine::default().recommend(&recipes, &ratings, 5);
//! assert_eq!(picks.len(), 1);
//! assert_eq!(picks[0].id, "r2");
//! ```

use crate::config::{EngineConfig, RecommendationConfig, RecommendationFallback};
use crate::errors::ConfigError;
use crate::recipe_model::Recipe;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Ratings snapshot: recipe id to a 0-5 rating
pub type UserRatings = HashMap<String, u8>;

/// Frequency tables over the recipes a user liked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasteProfile {
    pub cuisines: HashMap<String, u32>,
    pub dietary: HashMap<String, u32>,
    pub difficulties: HashMap<String, u32>,
}

impl TasteProfile {
    /// Build a profile from liked recipes; keys are lowercased
    pub fn from_recipes<'a, I>(liked: I) -> Self
    where
        I: IntoIterator<Item = &'a Recipe>,
    {
        let mut profile = Self::default();
        for recipe in liked {
            let cuisine = recipe.cuisine.trim().to_lowercase();
            if !cuisine.is_empty() {
                *profile.cuisines.entry(cuisine).or_insert(0) += 1;
            }
            for tag in &recipe.dietary {
                let tag = tag.trim().to_lowercase();
                if !tag.is_empty() {
                    *profile.dietary.entry(tag).or_insert(0) += 1;
                }
            }
            if !recipe.difficulty.is_unset() {
                *profile
                    .difficulties
                    .entry(recipe.difficulty.as_str().to_lowercase())
                    .or_insert(0) += 1;
            }
        }
        profile
    }

    pub fn is_empty(&self) -> bool {
        self.cuisines.is_empty() && self.dietary.is_empty() && self.difficulties.is_empty()
    }
}

/// Ratings-driven recipe recommender
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Create an engine from a validated engine configuration
    pub fn from_engine_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.recommendation.clone()))
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Ids of recipes rated at or above the like threshold
    pub fn liked_ids<'r>(&self, ratings: &'r UserRatings) -> HashSet<&'r str> {
        ratings
            .iter()
            .filter(|&(_, &rating)| rating >= self.config.like_threshold)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Similarity of a recipe to a taste profile
    pub fn score(&self, profile: &TasteProfile, recipe: &Recipe) -> u32 {
        let cuisine = profile
            .cuisines
            .get(&recipe.cuisine.trim().to_lowercase())
            .copied()
            .unwrap_or(0);
        let dietary: u32 = recipe
            .dietary
            .iter()
            .filter_map(|tag| profile.dietary.get(&tag.trim().to_lowercase()))
            .sum();
        let difficulty = if recipe.difficulty.is_unset() {
            0
        } else {
            profile
                .difficulties
                .get(&recipe.difficulty.as_str().to_lowercase())
                .copied()
                .unwrap_or(0)
        };

        self.config.cuisine_weight * cuisine
            + self.config.dietary_weight * dietary
            + self.config.difficulty_weight * difficulty
    }

    /// Recommend up to `top_n` recipes the user has not liked yet
    pub fn recommend<'a>(
        &self,
        recipes: &'a [Recipe],
        ratings: &UserRatings,
        top_n: usize,
    ) -> Vec<&'a Recipe> {
        self.recommend_scored(recipes, ratings, top_n)
            .into_iter()
            .map(|(recipe, _)| recipe)
            .collect()
    }

    /// Like [`recommend`](Self::recommend), keeping each recipe's score
    ///
    /// Fallback results carry a score of zero.
    pub fn recommend_scored<'a>(
        &self,
        recipes: &'a [Recipe],
        ratings: &UserRatings,
        top_n: usize,
    ) -> Vec<(&'a Recipe, u32)> {
        let liked = self.liked_ids(ratings);
        if liked.is_empty() {
            debug!("No liked recipes, using {:?} fallback", self.config.fallback);
            return match self.config.fallback {
                RecommendationFallback::Empty => Vec::new(),
                RecommendationFallback::FirstN => {
                    recipes.iter().take(top_n).map(|recipe| (recipe, 0)).collect()
                }
            };
        }

        let profile = TasteProfile::from_recipes(
            recipes.iter().filter(|recipe| liked.contains(recipe.id.as_str())),
        );

        let mut scored: Vec<(&'a Recipe, u32)> = recipes
            .iter()
            .filter(|recipe| !liked.contains(recipe.id.as_str()))
            .map(|recipe| (recipe, self.score(&profile, recipe)))
            .filter(|(_, score)| *score > 0)
            .collect();

        // Stable sort keeps input order among equal scores
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(top_n);

        info!(
            "Recommending {} recipes from {} liked of {} rated",
            scored.len(),
            liked.len(),
            ratings.len()
        );
        scored
    }
}
