use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::env;
use std::path::PathBuf;

use smart_recipes::config::{EngineConfig, MatchMode};
use smart_recipes::localization::{init_localization, t_args_lang, t_lang};
use smart_recipes::loader::{load_ratings, load_recipes, load_substitutions};
use smart_recipes::matcher::{MatchQuery, RecipeMatcher};
use smart_recipes::quantity::scale_recipe;
use smart_recipes::recipe_model::Recipe;
use smart_recipes::recommend::RecommendationEngine;
use smart_recipes::substitutions::SubstitutionCatalog;

const DEFAULT_RECIPES_PATH: &str = "data/recipes.json";

#[derive(Parser)]
#[command(name = "smart-recipes")]
#[command(about = "Find recipes from the ingredients you have", long_about = None)]
#[command(version)]
struct Cli {
    /// Recipe document (defaults to $RECIPES_PATH, then data/recipes.json)
    #[arg(long, global = true)]
    recipes: Option<PathBuf>,

    /// Output language, "en" or "fr" (defaults to $APP_LANG, then en)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Substitution document (defaults to $SUBSTITUTIONS_PATH, then the built-in table)
    #[arg(long, global = true)]
    substitutions: Option<PathBuf>,

    /// Minimum similarity (0.0 to 1.0) for fuzzy substitution lookup
    #[arg(long, global = true)]
    fuzzy_cutoff: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find recipes matching the ingredients on hand
    Find {
        /// Comma-separated ingredients (e.g., "eggs, milk, flour")
        #[arg(long)]
        ingredients: String,

        /// Required dietary tag (e.g., "vegetarian", "vegan")
        #[arg(long)]
        dietary: Option<String>,

        /// Required difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,

        /// Maximum cooking time in minutes
        #[arg(long)]
        max_time: Option<u32>,

        /// Required cuisine
        #[arg(long)]
        cuisine: Option<String>,

        /// Maximum number of results
        #[arg(long, default_value_t = smart_recipes::config::DEFAULT_MAX_RESULTS)]
        max_results: usize,

        /// Match ingredients on whole-word runs instead of exact names
        #[arg(long)]
        substring: bool,

        /// Give no credit for available substitutes
        #[arg(long)]
        no_substitutes: bool,
    },

    /// Show a recipe, optionally scaled to a number of servings
    Show {
        /// Recipe id
        id: String,

        /// Target number of servings
        #[arg(long)]
        servings: Option<u32>,
    },

    /// Suggest substitutes for an ingredient
    Suggest {
        /// Ingredient name
        ingredient: String,
    },

    /// Recommend recipes from a ratings document
    Recommend {
        /// Ratings document (JSON object of recipe id to 0-5 rating)
        #[arg(long)]
        ratings: PathBuf,

        /// Number of recommendations
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

/// Split comma-separated ingredient text, dropping empty entries
fn split_ingredients(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_catalog(path: Option<PathBuf>) -> Result<SubstitutionCatalog> {
    let path = path.or_else(|| env::var("SUBSTITUTIONS_PATH").ok().map(PathBuf::from));
    match path {
        Some(path) => load_substitutions(path),
        None => Ok(SubstitutionCatalog::default()),
    }
}

/// Engine configuration with command line overrides applied
fn engine_config(fuzzy_cutoff: Option<f64>) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    if let Some(cutoff) = fuzzy_cutoff {
        config.fuzzy_cutoff = cutoff;
    }
    config.validate().context("Invalid engine configuration")?;
    Ok(config)
}

fn display_difficulty(recipe: &Recipe) -> &str {
    if recipe.difficulty.is_unset() {
        "-"
    } else {
        recipe.difficulty.as_str()
    }
}

fn run_find(
    recipes: &[Recipe],
    config: &EngineConfig,
    catalog: SubstitutionCatalog,
    lang: &str,
    ingredients: &str,
    query: MatchQuery,
) -> Result<()> {
    let available = split_ingredients(ingredients);
    if available.is_empty() {
        warn!("No ingredients supplied");
        println!("{}", t_lang("error-no-ingredients", lang));
        return Ok(());
    }

    let matcher = RecipeMatcher::from_engine_config(config, catalog)
        .context("Invalid matcher configuration")?;
    let results = matcher.rank(&available, recipes, &query);

    if results.is_empty() {
        println!("{}", t_lang("results-none", lang));
        return Ok(());
    }

    println!(
        "{}",
        t_args_lang("results-found", &[("count", results.len().to_string().as_str())], lang)
    );
    for (rank, result) in results.iter().enumerate() {
        let rank = (rank + 1).to_string();
        let time = result.recipe.time_minutes.to_string();
        let score = format!("{:.2}", result.score);
        let overlap = format!("{:.0}", result.overlap_ratio * 100.0);
        println!(
            "{}",
            t_args_lang(
                "result-line",
                &[
                    ("rank", rank.as_str()),
                    ("title", result.recipe.title.as_str()),
                    ("time", time.as_str()),
                    ("difficulty", display_difficulty(result.recipe)),
                    ("score", score.as_str()),
                    ("overlap", overlap.as_str()),
                ],
                lang,
            )
        );
        if result.substitute_count > 0 {
            let count = result.substitute_count.to_string();
            println!("   {}", t_args_lang("result-substitutes", &[("count", count.as_str())], lang));
        }
        if !result.missing.is_empty() {
            let items = result.missing.join(", ");
            println!("   {}", t_args_lang("result-missing", &[("items", items.as_str())], lang));
        }
    }
    Ok(())
}

fn run_show(recipes: &[Recipe], lang: &str, id: &str, servings: Option<u32>) -> Result<()> {
    let Some(recipe) = recipes.iter().find(|recipe| recipe.id == id) else {
        println!("{}", t_args_lang("error-recipe-not-found", &[("id", id)], lang));
        return Ok(());
    };

    let servings = servings.unwrap_or(recipe.effective_servings());
    let ingredients = scale_recipe(recipe, servings);

    let time = recipe.time_minutes.to_string();
    let servings_text = servings.max(1).to_string();
    println!(
        "{}",
        t_args_lang(
            "recipe-header",
            &[
                ("title", recipe.title.as_str()),
                ("time", time.as_str()),
                ("difficulty", display_difficulty(recipe)),
                ("servings", servings_text.as_str()),
            ],
            lang,
        )
    );

    println!("\n{}", t_lang("section-ingredients", lang));
    for line in &ingredients {
        println!("  - {line}");
    }

    if !recipe.steps.is_empty() {
        println!("\n{}", t_lang("section-instructions", lang));
        for (idx, step) in recipe.steps.iter().enumerate() {
            println!("  {}. {step}", idx + 1);
        }
    }

    if !recipe.nutrition.is_empty() {
        println!("\n{}", t_lang("section-nutrition", lang));
        for (field, value) in &recipe.nutrition {
            println!("  {field}: {value}");
        }
    }
    Ok(())
}

fn run_suggest(catalog: &SubstitutionCatalog, lang: &str, ingredient: &str) {
    let substitutes = catalog.suggest(ingredient);
    if substitutes.is_empty() {
        println!("{}", t_args_lang("suggest-none", &[("ingredient", ingredient)], lang));
    } else {
        let items = substitutes.join(", ");
        println!(
            "{}",
            t_args_lang("suggest-found", &[("ingredient", ingredient), ("items", items.as_str())], lang)
        );
    }
}

fn run_recommend(
    recipes: &[Recipe],
    config: &EngineConfig,
    lang: &str,
    ratings: PathBuf,
    top: usize,
) -> Result<()> {
    let ratings = load_ratings(ratings)?;
    let engine = RecommendationEngine::from_engine_config(config)?;
    let picks = engine.recommend_scored(recipes, &ratings, top);

    if picks.is_empty() {
        println!("{}", t_lang("recommend-none", lang));
        return Ok(());
    }

    println!("{}", t_lang("recommend-found", lang));
    for (rank, (recipe, score)) in picks.iter().enumerate() {
        let rank = (rank + 1).to_string();
        let score = score.to_string();
        println!(
            "{}",
            t_args_lang(
                "recommend-line",
                &[("rank", rank.as_str()), ("title", recipe.title.as_str()), ("score", score.as_str())],
                lang,
            )
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    init_localization()?;

    let lang = cli
        .lang
        .or_else(|| env::var("APP_LANG").ok())
        .unwrap_or_else(|| "en".to_string());

    let recipes_path = cli
        .recipes
        .or_else(|| env::var("RECIPES_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RECIPES_PATH));

    let config = engine_config(cli.fuzzy_cutoff)?;

    info!("Starting Smart Recipe Finder (lang={})", lang);

    match cli.command {
        Commands::Find {
            ingredients,
            dietary,
            difficulty,
            max_time,
            cuisine,
            max_results,
            substring,
            no_substitutes,
        } => {
            let recipes = load_recipes(&recipes_path)?;
            let catalog = load_catalog(cli.substitutions)?;
            let query = MatchQuery {
                dietary,
                difficulty,
                max_time,
                cuisine,
                max_results,
            };
            let mut config = config;
            config.matcher.mode = if substring {
                MatchMode::Substring
            } else {
                MatchMode::Exact
            };
            config.matcher.substitution_credit = !no_substitutes;
            run_find(&recipes, &config, catalog, &lang, &ingredients, query)
        }
        Commands::Show { id, servings } => {
            let recipes = load_recipes(&recipes_path)?;
            run_show(&recipes, &lang, &id, servings)
        }
        Commands::Suggest { ingredient } => {
            let catalog = load_catalog(cli.substitutions)?.with_cutoff(config.fuzzy_cutoff)?;
            run_suggest(&catalog, &lang, &ingredient);
            Ok(())
        }
        Commands::Recommend { ratings, top } => {
            let recipes = load_recipes(&recipes_path)?;
            run_recommend(&recipes, &config, &lang, ratings, top)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_ingredients() {
        assert_eq!(
            split_ingredients(" eggs, milk ,, flour ,"),
            vec!["eggs", "milk", "flour"]
        );
        assert!(split_ingredients(" , ").is_empty());
    }

    #[test]
    fn test_engine_config_overrides() {
        assert_eq!(engine_config(Some(0.8)).unwrap().fuzzy_cutoff, 0.8);
        assert_eq!(
            engine_config(None).unwrap().fuzzy_cutoff,
            smart_recipes::config::DEFAULT_FUZZY_CUTOFF
        );
        assert!(engine_config(Some(2.0)).is_err());

        let cli = Cli::parse_from(["smart-recipes", "suggest", "butter", "--fuzzy-cutoff", "0.75"]);
        assert_eq!(cli.fuzzy_cutoff, Some(0.75));
    }

    #[test]
    fn test_cli_parses_find() {
        let cli = Cli::parse_from([
            "smart-recipes",
            "--lang",
            "fr",
            "find",
            "--ingredients",
            "eggs, milk",
            "--max-time",
            "30",
            "--substring",
        ]);
        assert_eq!(cli.lang.as_deref(), Some("fr"));
        match cli.command {
            Commands::Find {
                ingredients,
                max_time,
                max_results,
                substring,
                no_substitutes,
                ..
            } => {
                assert_eq!(ingredients, "eggs, milk");
                assert_eq!(max_time, Some(30));
                assert_eq!(max_results, 6);
                assert!(substring);
                assert!(!no_substitutes);
            }
            _ => panic!("expected find command"),
        }
    }
}
