//! Command-line front end for the filter engine.
//!
//! ```bash
//! recipe-facets data/recipes.json --tag appliance:blender --text limo
//! ```

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use recipe_facets::{
    load_corpus, load_corpus_dir, EngineOptions, FacetCategory, FilterEngine, FilterResult,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "recipe-facets")]
#[command(about = "Filter a recipe corpus by facet tags and free text", long_about = None)]
struct Cli {
    /// Corpus document, or a directory of corpus documents
    corpus: Utf8PathBuf,

    /// Facet tag as `category:value` (ingredient, appliance or utensil); repeatable
    #[arg(short, long = "tag", value_parser = parse_tag)]
    tags: Vec<(FacetCategory, String)>,

    /// Free-text query matched against recipe names
    #[arg(short = 'q', long)]
    text: Option<String>,

    /// YAML file with engine options
    #[arg(short, long, env = "RECIPE_FACETS_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn parse_tag(raw: &str) -> Result<(FacetCategory, String), String> {
    let (category, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `category:value`, got `{raw}`"))?;
    let category = category.parse::<FacetCategory>().map_err(|e| e.to_string())?;
    Ok((category, value.to_string()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_facets=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => EngineOptions::from_yaml_file(path)
            .with_context(|| format!("Failed to load options from {path}"))?,
        None => EngineOptions::default(),
    };

    let corpus = if cli.corpus.is_dir() {
        load_corpus_dir(&cli.corpus)
    } else {
        load_corpus(&cli.corpus)
    }
    .with_context(|| format!("Failed to load corpus from {}", cli.corpus))?;

    let mut engine = FilterEngine::with_options(corpus, options);
    for (category, value) in &cli.tags {
        engine.add_tag(*category, value);
    }
    if let Some(text) = &cli.text {
        engine.set_free_text(text);
    }

    let result = engine.result();
    info!(
        "{} of {} recipes match",
        result.count(),
        engine.corpus().len()
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &FilterResult) {
    println!("{} recipes", result.count());
    for recipe in &result.visible_recipes {
        println!("  {}", recipe.name);
    }

    for category in FacetCategory::ALL {
        let labels: Vec<String> = result.facets.get(category).iter().map(|v| v.label()).collect();
        println!();
        println!("{category}s ({})", labels.len());
        for label in labels {
            println!("  {label}");
        }
    }
}
