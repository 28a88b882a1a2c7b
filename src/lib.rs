//! # Smart Recipes
//!
//! A recipe matching and ranking engine: finds recipes that fit the
//! ingredients a user has on hand, scales quantities to a serving count,
//! suggests ingredient substitutions and recommends recipes from ratings.

pub mod config;
pub mod errors;
pub mod loader;
pub mod localization;
pub mod matcher;
pub mod normalizer;
pub mod patterns;
pub mod quantity;
pub mod recipe_model;
pub mod recommend;
pub mod substitutions;

pub use config::{EngineConfig, MatchMode, MatcherConfig, RecommendationFallback};
pub use errors::{CatalogError, ConfigError};
pub use matcher::{match_recipes, MatchQuery, RecipeMatcher};
pub use normalizer::{normalize, IngredientNormalizer};
pub use quantity::scale;
pub use recipe_model::{Difficulty, MatchResult, Recipe};
pub use recommend::{RecommendationEngine, UserRatings};
pub use substitutions::SubstitutionCatalog;
