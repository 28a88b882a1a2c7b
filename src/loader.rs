//! # Document Loader
//!
//! Reads the JSON documents the engine consumes: the recipe list, a ratings
//! snapshot and an optional substitution catalog. Loading sits outside the
//! matching core; the core only ever sees the parsed values.

use crate::recipe_model::Recipe;
use crate::recommend::UserRatings;
use crate::substitutions::SubstitutionCatalog;
use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Highest rating a user can give
pub const MAX_RATING: u8 = 5;

/// Parse a recipe document (a JSON array of recipes)
///
/// # Errors
///
/// Fails on malformed JSON or when two recipes share an id.
pub fn parse_recipes(json: &str) -> Result<Vec<Recipe>> {
    let recipes: Vec<Recipe> =
        serde_json::from_str(json).context("Failed to parse recipe document")?;

    let mut ids = HashSet::new();
    for recipe in &recipes {
        if !ids.insert(recipe.id.as_str()) {
            bail!("Duplicate recipe id: {}", recipe.id);
        }
        if recipe.servings == 0 {
            warn!("Recipe '{}' has zero servings, treating as 1", recipe.id);
        }
    }

    Ok(recipes)
}

/// Load a recipe document from disk
pub fn load_recipes(path: impl AsRef<Path>) -> Result<Vec<Recipe>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
    let recipes = parse_recipes(&content)
        .with_context(|| format!("Invalid recipe file {}", path.display()))?;
    info!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Parse a ratings document (a JSON object of recipe id to rating)
///
/// Ratings above five are clamped to five.
pub fn parse_ratings(json: &str) -> Result<UserRatings> {
    let raw: HashMap<String, u32> =
        serde_json::from_str(json).context("Failed to parse ratings document")?;

    Ok(raw
        .into_iter()
        .map(|(id, rating)| {
            if rating > u32::from(MAX_RATING) {
                warn!("Rating {} for '{}' is above {}, clamping", rating, id, MAX_RATING);
            }
            (id, rating.min(u32::from(MAX_RATING)) as u8)
        })
        .collect())
}

/// Load a ratings document from disk
pub fn load_ratings(path: impl AsRef<Path>) -> Result<UserRatings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ratings file {}", path.display()))?;
    let ratings = parse_ratings(&content)
        .with_context(|| format!("Invalid ratings file {}", path.display()))?;
    info!("Loaded {} ratings from {}", ratings.len(), path.display());
    Ok(ratings)
}

/// Load a substitution catalog from disk
pub fn load_substitutions(path: impl AsRef<Path>) -> Result<SubstitutionCatalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read substitution file {}", path.display()))?;
    let catalog = SubstitutionCatalog::from_json(&content)
        .with_context(|| format!("Invalid substitution file {}", path.display()))?;
    info!("Loaded {} substitutions from {}", catalog.len(), path.display());
    Ok(catalog)
}
