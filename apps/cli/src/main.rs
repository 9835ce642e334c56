use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpRecipeSource, RecipeForm, RecipeStore};
use shared::domain::RecipeId;
use storage::{BookmarkStore, Storage};
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod views;

use client_core::upload::MAX_INGREDIENT_FIELDS;
use controller::{Controller, Outcome};

#[derive(Parser, Debug)]
#[command(name = "forkify", about = "Search, scale and bookmark recipes")]
struct Cli {
    /// Print rendered trees as markup instead of plain text.
    #[arg(long, global = true)]
    markup: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search recipes and show one page of results.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show a recipe, optionally scaled to a number of servings.
    Show {
        id: String,
        #[arg(long)]
        servings: Option<u32>,
    },
    /// Bookmark a recipe, or remove the bookmark if it is already set.
    Bookmark { id: String },
    /// List bookmarks.
    Bookmarks,
    /// Upload a new recipe. Ingredients use the `quantity,unit,description` format.
    Upload {
        #[arg(long)]
        title: String,
        #[arg(long)]
        source_url: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        publisher: String,
        #[arg(long)]
        cooking_time: String,
        #[arg(long)]
        servings: String,
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = config::load_settings();
    let api = settings.api_config()?;

    let storage = Storage::new(&settings.database_url)
        .await
        .with_context(|| format!("failed to open bookmark storage at {}", settings.database_url))?;
    storage.health_check().await?;
    let store = RecipeStore::new(
        Arc::new(HttpRecipeSource::new(api.clone())),
        BookmarkStore::new(Arc::new(storage)),
        api.results_per_page,
    );
    match store.initialize_from_storage().await {
        Ok(count) => tracing::debug!(count, "bookmarks loaded"),
        Err(err) => tracing::warn!(error = %err, "ignoring unreadable stored bookmarks"),
    }

    let mut controller = Controller::new(store);
    let outcome = match cli.command {
        Command::Search { query, page } => controller.control_search(&query, page).await,
        Command::Show { id, servings } => {
            controller
                .control_recipe(&RecipeId::new(id), servings)
                .await
        }
        Command::Bookmark { id } => controller.control_bookmark(&RecipeId::new(id)).await,
        Command::Bookmarks => controller.control_bookmarks().await,
        Command::Upload {
            title,
            source_url,
            image,
            publisher,
            cooking_time,
            servings,
            ingredients,
        } => {
            if ingredients.len() > MAX_INGREDIENT_FIELDS {
                anyhow::bail!("at most {MAX_INGREDIENT_FIELDS} ingredients can be uploaded");
            }
            let mut form = RecipeForm::new()
                .with("title", title)
                .with("sourceUrl", source_url)
                .with("image", image)
                .with("publisher", publisher)
                .with("cookingTime", cooking_time)
                .with("servings", servings);
            for (index, ingredient) in ingredients.into_iter().enumerate() {
                form.set(format!("ingredient-{}", index + 1), ingredient);
            }
            controller.control_upload(&form).await
        }
    };

    print_outcome(&controller, &outcome, cli.markup);
    if !outcome.succeeded {
        std::process::exit(1);
    }
    Ok(())
}

fn print_outcome(controller: &Controller, outcome: &Outcome, markup: bool) {
    for panel in &outcome.panels {
        let Some(tree) = controller.mount(*panel).content() else {
            continue;
        };
        println!("== {} ==", panel.title());
        if markup {
            println!("{}", tree.to_markup());
        } else {
            for line in tree.text_lines() {
                println!("{line}");
            }
        }
        println!();
    }
}
