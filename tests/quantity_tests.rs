#[cfg(test)]
mod tests {
    use smart_recipes::quantity::{format_quantity, parse_leading_quantity, scale, scale_recipe, serving_ratio};
    use smart_recipes::recipe_model::Recipe;

    fn quantity_of(line: &str) -> Option<f64> {
        parse_leading_quantity(line).map(|parsed| parsed.value.estimated_value())
    }

    #[test]
    fn test_scenario_pancakes_scaled_to_four() {
        let recipe = Recipe::new("r1", "Pancakes")
            .with_ingredients(&["2 eggs", "1 cup milk", "1 cup flour"])
            .with_servings(2);

        assert_eq!(
            scale_recipe(&recipe, 4),
            vec!["4 eggs", "2 cup milk", "2 cup flour"]
        );
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let lines = vec![
            "3 eggs",
            "1 1/2 cups milk",
            "2/3 cup sugar",
            "250 g flour",
            "1.25 tsp baking powder",
            "2 cups flour",
            "13 g yeast",
        ];

        for (a, b) in [(2, 3), (4, 6), (3, 7), (1, 8), (6, 4), (15, 1), (100, 1), (7, 3)] {
            // Each rendering is off by at most 0.005; the first error is
            // scaled by a/b on the way back
            let bound = 0.005 * f64::from(a) / f64::from(b) + 0.005 + 1e-9;
            let back = scale(&scale(&lines, a, b), b, a);
            for (original, restored) in lines.iter().zip(&back) {
                let expected = quantity_of(original).unwrap();
                let actual = quantity_of(restored).unwrap();
                assert!(
                    (expected - actual).abs() <= bound,
                    "{original} -> {restored} ({a} -> {b} -> {a})"
                );
            }
        }
    }

    #[test]
    fn test_small_quantities_prefer_decimals_over_coarse_fractions() {
        let down = scale(&["2 cups flour"], 15, 1);
        assert_eq!(down, vec!["0.13 cups flour"]);
        assert_eq!(scale(&down, 1, 15), vec!["1.95 cups flour"]);

        let down = scale(&["13 g yeast"], 100, 1);
        assert_eq!(down, vec!["0.13 g yeast"]);
        assert_eq!(scale(&down, 1, 100), vec!["13 g yeast"]);
    }

    #[test]
    fn test_near_integers_and_tiny_amounts() {
        assert_eq!(format_quantity(2.999), "3");
        assert_eq!(format_quantity(0.004), "0.004");
        assert_eq!(scale(&["1 g saffron"], 300, 1), vec!["0.003 g saffron"]);
    }

    #[test]
    fn test_unparseable_lines_get_a_note() {
        let lines = vec!["salt to taste", "", "a handful of basil"];
        assert_eq!(
            scale(&lines, 2, 3),
            vec!["salt to taste (×1.5)", "", "a handful of basil (×1.5)"]
        );
        assert_eq!(scale(&lines, 4, 4), lines);
    }

    #[test]
    fn test_ratio_is_always_positive() {
        assert_eq!(serving_ratio(0, 0), 1.0);
        assert_eq!(serving_ratio(4, 2), 0.5);
        assert!(serving_ratio(u32::MAX, 1) > 0.0);
    }

    #[test]
    fn test_halving_renders_fractions() {
        let lines = vec!["3 eggs", "1 cup milk", "1/3 cup oil"];
        assert_eq!(
            scale(&lines, 4, 2),
            vec!["1 1/2 eggs", "1/2 cup milk", "0.17 cup oil"]
        );
    }

    #[test]
    fn test_format_quantity_falls_back_to_decimals() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(2.75), "2 3/4");
        assert_eq!(format_quantity(0.3), "0.30");
    }
}
