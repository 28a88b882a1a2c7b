#[cfg(test)]
mod tests {
    use smart_recipes::errors::CatalogError;
    use smart_recipes::substitutions::SubstitutionCatalog;

    #[test]
    fn test_butter_can_be_replaced_by_oil() {
        let catalog = SubstitutionCatalog::default();
        assert!(catalog.suggest("butter").contains(&"oil".to_string()));
    }

    #[test]
    fn test_suggest_accepts_raw_lines_and_typos() {
        let catalog = SubstitutionCatalog::default();
        assert_eq!(catalog.suggest("100 g Butter, softened"), catalog.suggest("butter"));
        assert_eq!(catalog.suggest("tomatos"), catalog.suggest("tomato"));
        assert!(catalog.suggest("dragon fruit").is_empty());
    }

    #[test]
    fn test_fuzzy_lookup_is_deterministic() {
        let catalog = SubstitutionCatalog::default();
        let first = catalog.suggest("creme").to_vec();
        for _ in 0..10 {
            assert_eq!(catalog.suggest("creme"), first.as_slice());
        }
    }

    #[test]
    fn test_custom_catalog_from_json() {
        let catalog = SubstitutionCatalog::from_json(
            r#"{"Pancetta": ["bacon", "smoked tofu"], "parmesan": ["pecorino"]}"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].ingredient, "pancetta");
        assert_eq!(catalog.suggest("100 g pancetta"), &["bacon".to_string(), "smoked tofu".to_string()]);
        assert!(catalog.suggest("butter").is_empty());
    }

    #[test]
    fn test_invalid_catalogs_are_rejected() {
        assert!(matches!(
            SubstitutionCatalog::from_json("not json"),
            Err(CatalogError::InvalidDocument(_))
        ));
        assert!(matches!(
            SubstitutionCatalog::from_json(r#"{"salt": []}"#),
            Err(CatalogError::EmptySubstitutes(_))
        ));
        assert!(matches!(
            SubstitutionCatalog::from_json(r#"{"Tomato": ["x"], "tomatoes": ["y"]}"#),
            Err(CatalogError::DuplicateKey(_))
        ));
    }
}
