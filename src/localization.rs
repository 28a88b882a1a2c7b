//! # Localization Module
//!
//! User-facing messages for the command line front end, backed by Fluent
//! resources under `locales/<lang>/main.ftl`. English and French are bundled
//! into the binary; unknown languages and missing keys fall back to English.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use log::{error, warn};
use std::collections::HashMap;
use std::sync::LazyLock;
use unic_langid::LanguageIdentifier;

/// Language used when the requested one is not available
pub const DEFAULT_LANGUAGE: &str = "en";

/// Bundled Fluent resources, keyed by language code
const RESOURCES: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en/main.ftl")),
    ("fr", include_str!("../locales/fr/main.ftl")),
];

/// Localization manager for the recipe finder
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a manager with every bundled language loaded
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in RESOURCES {
            let locale: LanguageIdentifier = language.parse()?;
            let bundle = Self::create_bundle(locale, source)?;
            bundles.insert(language.to_string(), bundle);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(
        locale: LanguageIdentifier,
        source: &str,
    ) -> Result<FluentBundle<FluentResource>> {
        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow!("Failed to parse {locale} messages: {errors:?}"))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        // Terminal output has no use for bidi isolation marks
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("Failed to load {locale} messages: {errors:?}"))?;

        Ok(bundle)
    }

    /// Whether a language has bundled messages
    pub fn supports(&self, language: &str) -> bool {
        self.bundles.contains_key(&base_language(language))
    }

    /// Get a message in the default language
    pub fn get_message(&self, key: &str, args: Option<&HashMap<&str, &str>>) -> String {
        self.get_message_in_language(key, DEFAULT_LANGUAGE, args)
    }

    /// Get a message in a specific language, falling back to English
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, &str>>,
    ) -> String {
        let requested = base_language(language);
        let bundle = [requested.as_str(), DEFAULT_LANGUAGE]
            .into_iter()
            .filter_map(|lang| self.bundles.get(lang))
            .find(|bundle| bundle.has_message(key));

        let Some(bundle) = bundle else {
            return format!("Missing translation: {key}");
        };
        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing value for key: {key}");
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(*value));
            }
            fluent_args
        });

        let mut errors = vec![];
        let value = bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors)
            .into_owned();
        if !errors.is_empty() {
            warn!("Errors formatting message '{key}': {errors:?}");
        }
        value
    }

    /// Get a message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, args: &[(&str, &str)], language: &str) -> String {
        let args_map: HashMap<&str, &str> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }
}

/// Reduce "fr-FR" or "fr_CA" to "fr"
fn base_language(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}

/// Global localization instance
static LOCALIZATION_MANAGER: LazyLock<Option<LocalizationManager>> =
    LazyLock::new(|| match LocalizationManager::new() {
        Ok(manager) => Some(manager),
        Err(e) => {
            error!("Failed to initialize localization: {e:?}");
            None
        }
    });

/// Initialize the global localization manager
pub fn init_localization() -> Result<()> {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(_) => Ok(()),
        None => Err(anyhow!("Localization manager could not be initialized")),
    }
}

/// Get a localized message in the given language
pub fn t_lang(key: &str, language: &str) -> String {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(manager) => manager.get_message_in_language(key, language, None),
        None => format!("Missing translation: {key}"),
    }
}

/// Get a localized message with arguments in the given language
pub fn t_args_lang(key: &str, args: &[(&str, &str)], language: &str) -> String {
    match LOCALIZATION_MANAGER.as_ref() {
        Some(manager) => manager.get_message_with_args(key, args, language),
        None => format!("Missing translation: {key}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_language() {
        assert_eq!(base_language("fr-FR"), "fr");
        assert_eq!(base_language("EN_us"), "en");
        assert_eq!(base_language("de"), "de");
    }

    #[test]
    fn test_global_helpers() {
        assert!(init_localization().is_ok());
        assert_eq!(t_lang("results-none", "en"), "No matching recipes found.");
        assert_eq!(
            t_args_lang("results-found", &[("count", "3")], "fr"),
            "3 recettes trouvées."
        );
    }
}
