//! # Substitution Catalog
//!
//! Maps canonical ingredient names to acceptable substitutes. Lookups try the
//! exact key first and fall back to fuzzy matching with normalized
//! Levenshtein similarity, so near-misses like "buter" still find "butter".
//!
//! Keys and substitutes are normalized with the default ingredient
//! normalizer when the catalog is built. Entry order is preserved and breaks
//! fuzzy ties: the earliest key wins. Catalogs loaded from JSON take their
//! order from the document's keys sorted alphabetically.
//!
//! ## Usage
//!
//! ```rust
//! use smart_recipes::substitutions::SubstitutionCatalog;
//!
//! let catalog = SubstitutionCatalog::default();
//! assert!(catalog.suggest("butter").contains(&"oil".to_string()));
//! assert!(catalog.suggest("Buter").contains(&"oil".to_string()));
//! ```

use crate::config::DEFAULT_FUZZY_CUTOFF;
use crate::errors::{CatalogError, ConfigError};
use crate::normalizer::normalize;
use log::{debug, trace};
use std::collections::{BTreeMap, HashMap};
use strsim::normalized_levenshtein;

/// Built-in substitution table
const DEFAULT_SUBSTITUTIONS: &[(&str, &[&str])] = &[
    ("butter", &["margarine", "oil", "coconut oil", "ghee"]),
    ("milk", &["almond milk", "soy milk", "oat milk", "water"]),
    ("egg", &["flax egg", "chia egg", "applesauce", "mashed banana"]),
    ("sugar", &["honey", "maple syrup", "brown sugar"]),
    ("flour", &["almond flour", "oat flour", "whole wheat flour"]),
    ("cream", &["milk", "coconut cream", "greek yogurt"]),
    ("sour cream", &["greek yogurt", "yogurt"]),
    ("yogurt", &["sour cream", "buttermilk"]),
    ("buttermilk", &["milk", "yogurt"]),
    ("cheese", &["nutritional yeast", "vegan cheese"]),
    ("rice", &["quinoa", "couscous", "cauliflower rice"]),
    ("pasta", &["rice noodle", "zucchini noodle"]),
    ("onion", &["shallot", "leek", "onion powder"]),
    ("garlic", &["garlic powder", "shallot"]),
    ("lemon juice", &["lime juice", "vinegar"]),
    ("vinegar", &["lemon juice", "lime juice"]),
    ("tomato", &["tomato paste", "tomato sauce"]),
    ("chicken", &["tofu", "turkey", "chickpea"]),
    ("beef", &["mushroom", "lentil", "turkey"]),
    ("honey", &["maple syrup", "agave syrup"]),
    ("soy sauce", &["tamari", "coconut aminos"]),
    ("oil", &["butter", "applesauce"]),
    ("breadcrumb", &["rolled oat", "crushed cracker"]),
];

/// One catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct SubstitutionEntry {
    /// Canonical ingredient name
    pub ingredient: String,
    /// Substitutes in order of preference
    pub substitutes: Vec<String>,
}

/// Immutable ingredient substitution catalog
#[derive(Debug, Clone)]
pub struct SubstitutionCatalog {
    entries: Vec<SubstitutionEntry>,
    index: HashMap<String, usize>,
    cutoff: f64,
}

impl Default for SubstitutionCatalog {
    fn default() -> Self {
        let entries = DEFAULT_SUBSTITUTIONS.iter().map(|(ingredient, subs)| SubstitutionEntry {
            ingredient: normalize(ingredient),
            substitutes: subs.iter().map(|s| normalize(s)).collect(),
        });
        let entries: Vec<SubstitutionEntry> = entries.collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| (entry.ingredient.clone(), idx))
            .collect();
        Self {
            entries,
            index,
            cutoff: DEFAULT_FUZZY_CUTOFF,
        }
    }
}

impl SubstitutionCatalog {
    /// Build a catalog from `(ingredient, substitutes)` pairs, keeping their order
    ///
    /// # Errors
    ///
    /// Fails when a key is empty after normalization, when two keys
    /// normalize to the same ingredient, or when a key has no non-empty
    /// substitutes.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut catalog = Self {
            entries: Vec::new(),
            index: HashMap::new(),
            cutoff: DEFAULT_FUZZY_CUTOFF,
        };

        for (key, substitutes) in entries {
            let ingredient = normalize(key.as_ref());
            if ingredient.is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if catalog.index.contains_key(&ingredient) {
                return Err(CatalogError::DuplicateKey(ingredient));
            }

            let substitutes: Vec<String> = substitutes
                .iter()
                .map(|s| normalize(s.as_ref()))
                .filter(|s| !s.is_empty())
                .collect();
            if substitutes.is_empty() {
                return Err(CatalogError::EmptySubstitutes(ingredient));
            }

            catalog.index.insert(ingredient.clone(), catalog.entries.len());
            catalog.entries.push(SubstitutionEntry {
                ingredient,
                substitutes,
            });
        }

        debug!("Built substitution catalog with {} entries", catalog.entries.len());
        Ok(catalog)
    }

    /// Build a catalog from a JSON object mapping ingredients to substitute arrays
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_entries(document)
    }

    /// Replace the fuzzy similarity cutoff
    pub fn with_cutoff(mut self, cutoff: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(ConfigError::InvalidCutoff(cutoff));
        }
        self.cutoff = cutoff;
        Ok(self)
    }

    /// Fuzzy similarity cutoff in use
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[SubstitutionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Suggest substitutes for an ingredient
    ///
    /// The input is normalized first. An exact key wins; otherwise the key
    /// with the highest similarity at or above the cutoff is used. Returns
    /// an empty slice when nothing qualifies.
    pub fn suggest(&self, ingredient: &str) -> &[String] {
        let token = normalize(ingredient);
        if token.is_empty() {
            return &[];
        }
        if let Some(&idx) = self.index.get(&token) {
            return &self.entries[idx].substitutes;
        }

        let mut best: Option<(usize, f64)> = None;
        for (idx, entry) in self.entries.iter().enumerate() {
            let similarity = normalized_levenshtein(&token, &entry.ingredient);
            trace!("Similarity '{}' ~ '{}' = {:.3}", token, entry.ingredient, similarity);
            if similarity >= self.cutoff && best.map_or(true, |(_, score)| similarity > score) {
                best = Some((idx, similarity));
            }
        }

        match best {
            Some((idx, similarity)) => {
                debug!(
                    "Fuzzy substitution match '{}' -> '{}' ({:.3})",
                    token, self.entries[idx].ingredient, similarity
                );
                &self.entries[idx].substitutes
            }
            None => &[],
        }
    }

    /// Substitutes for an already-normalized token, exact lookup only
    pub fn substitutes_of(&self, token: &str) -> &[String] {
        self.index
            .get(token)
            .map(|&idx| self.entries[idx].substitutes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether `available` can stand in for `required`, or is listed as
    /// something `required` can replace
    pub fn can_substitute(&self, required: &str, available: &str) -> bool {
        self.substitutes_of(required).iter().any(|s| s == available)
            || self.substitutes_of(available).iter().any(|s| s == required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let catalog = SubstitutionCatalog::default();
        let subs = catalog.suggest("butter");
        assert!(subs.contains(&"oil".to_string()));
        assert_eq!(subs[0], "margarine");
    }

    #[test]
    fn test_lookup_normalizes_input() {
        let catalog = SubstitutionCatalog::default();
        assert!(!catalog.suggest("2 Eggs").is_empty());
        assert!(!catalog.suggest("1 cup milk, warm").is_empty());
    }

    #[test]
    fn test_fuzzy_lookup() {
        let catalog = SubstitutionCatalog::default();
        assert_eq!(catalog.suggest("buter"), catalog.suggest("butter"));
        assert!(catalog.suggest("xylophone").is_empty());
        assert!(catalog.suggest("").is_empty());
    }

    #[test]
    fn test_fuzzy_ties_keep_catalog_order() {
        let catalog =
            SubstitutionCatalog::from_entries(vec![("cat", vec!["dog"]), ("bat", vec!["owl"])])
                .unwrap();
        assert_eq!(catalog.suggest("hat"), &["dog".to_string()]);
    }

    #[test]
    fn test_cutoff_controls_fuzzy_lookup() {
        let strict = SubstitutionCatalog::default().with_cutoff(0.95).unwrap();
        assert!(strict.suggest("buter").is_empty());
        assert!(SubstitutionCatalog::default().with_cutoff(-0.1).is_err());
    }

    #[test]
    fn test_catalog_construction_errors() {
        assert_eq!(
            SubstitutionCatalog::from_entries(vec![("", vec!["x"])]).unwrap_err(),
            CatalogError::EmptyKey
        );
        assert_eq!(
            SubstitutionCatalog::from_entries(vec![("Egg", vec!["tofu"]), ("eggs", vec!["x"])])
                .unwrap_err(),
            CatalogError::DuplicateKey("egg".to_string())
        );
        assert_eq!(
            SubstitutionCatalog::from_entries(vec![("salt", Vec::<String>::new())]).unwrap_err(),
            CatalogError::EmptySubstitutes("salt".to_string())
        );
        assert!(matches!(
            SubstitutionCatalog::from_json("[1, 2]"),
            Err(CatalogError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let catalog =
            SubstitutionCatalog::from_json(r#"{"Butter": ["Ghee", "olive oil"]}"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.suggest("butter"), &["ghee".to_string(), "olive oil".to_string()]);
    }

    #[test]
    fn test_can_substitute_both_directions() {
        let catalog = SubstitutionCatalog::default();
        assert!(catalog.can_substitute("butter", "margarine"));
        assert!(catalog.can_substitute("margarine", "butter"));
        assert!(!catalog.can_substitute("butter", "salt"));
    }
}
