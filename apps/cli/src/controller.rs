//! Glue between the store and the views. Each `control_*` handler runs one
//! user action and reports which panels it rendered.

use client_core::{ClientError, RecipeForm, RecipeStore};
use render::{
    render, render_error, render_spinner, render_view_error, update, Mount, View,
    ReconcileSummary,
};
use shared::domain::RecipeId;
use tracing::{debug, warn};

use crate::views::{AddRecipeView, BookmarksView, PaginationView, RecipeView, ResultsView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Recipe,
    Results,
    Pagination,
    Bookmarks,
    Upload,
}

impl Panel {
    pub fn title(self) -> &'static str {
        match self {
            Panel::Recipe => "recipe",
            Panel::Results => "results",
            Panel::Pagination => "pagination",
            Panel::Bookmarks => "bookmarks",
            Panel::Upload => "upload",
        }
    }
}

/// What a handler rendered, and whether the action itself went through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub panels: Vec<Panel>,
    pub succeeded: bool,
}

impl Outcome {
    fn ok(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            succeeded: true,
        }
    }

    fn failed(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            succeeded: false,
        }
    }
}

pub struct Controller {
    store: RecipeStore,
    recipe: Mount,
    results: Mount,
    pagination: Mount,
    bookmarks: Mount,
    upload: Mount,
}

impl Controller {
    pub fn new(store: RecipeStore) -> Self {
        Self {
            store,
            recipe: Mount::new(),
            results: Mount::new(),
            pagination: Mount::new(),
            bookmarks: Mount::new(),
            upload: Mount::new(),
        }
    }

    pub fn mount(&self, panel: Panel) -> &Mount {
        match panel {
            Panel::Recipe => &self.recipe,
            Panel::Results => &self.results,
            Panel::Pagination => &self.pagination,
            Panel::Bookmarks => &self.bookmarks,
            Panel::Upload => &self.upload,
        }
    }

    pub async fn control_search(&mut self, query: &str, page: usize) -> Outcome {
        let query = query.trim();
        if query.is_empty() {
            render_error(&mut self.results, "Please enter a search query");
            return Outcome::failed(vec![Panel::Results]);
        }

        render_spinner(&mut self.results);
        if let Err(err) = self.store.load_search_results(query).await {
            warn!(query, error = %err, "controller: search failed");
            render_error(&mut self.results, &err.to_string());
            return Outcome::failed(vec![Panel::Results]);
        }

        self.render_results(Some(page)).await;
        Outcome::ok(vec![Panel::Results, Panel::Pagination])
    }

    /// Shows one recipe. With a non-zero `servings`, the rendered recipe is
    /// then rescaled in place.
    pub async fn control_recipe(&mut self, id: &RecipeId, servings: Option<u32>) -> Outcome {
        render_spinner(&mut self.recipe);
        if let Err(err) = self.store.load_recipe(id).await {
            warn!(recipe_id = %id, error = %err, "controller: recipe load failed");
            self.render_recipe_error(&err);
            return Outcome::failed(vec![Panel::Recipe]);
        }
        self.render_recipe().await;
        self.render_bookmarks().await;

        match servings {
            Some(0) => warn!(recipe_id = %id, "controller: ignoring zero servings"),
            Some(servings) => {
                if let Err(err) = self.control_servings(servings).await {
                    render_error(&mut self.recipe, &err.to_string());
                    return Outcome::failed(vec![Panel::Recipe]);
                }
            }
            None => {}
        }
        Outcome::ok(vec![Panel::Recipe, Panel::Bookmarks])
    }

    /// Rescales the current recipe and patches the mounted recipe tree rather
    /// than rebuilding it.
    pub async fn control_servings(
        &mut self,
        servings: u32,
    ) -> Result<ReconcileSummary, ClientError> {
        let recipe = self.store.update_servings(servings).await?;
        let summary = update(&RecipeView, &mut self.recipe, &recipe);
        debug!(
            servings,
            text_updates = summary.text_updates,
            attribute_updates = summary.attribute_updates,
            "controller: servings applied"
        );
        Ok(summary)
    }

    /// Loads `id` and flips its bookmark.
    pub async fn control_bookmark(&mut self, id: &RecipeId) -> Outcome {
        if let Err(err) = self.store.load_recipe(id).await {
            self.render_recipe_error(&err);
            return Outcome::failed(vec![Panel::Recipe]);
        }
        self.render_recipe().await;

        if let Err(err) = self.store.toggle_bookmark().await {
            warn!(recipe_id = %id, error = %err, "controller: bookmark toggle failed");
            render_error(&mut self.bookmarks, &err.to_string());
            return Outcome::failed(vec![Panel::Recipe, Panel::Bookmarks]);
        }

        if let Some(recipe) = self.store.recipe().await {
            update(&RecipeView, &mut self.recipe, &recipe);
        }
        self.render_bookmarks().await;
        Outcome::ok(vec![Panel::Recipe, Panel::Bookmarks])
    }

    pub async fn control_bookmarks(&mut self) -> Outcome {
        self.render_bookmarks().await;
        Outcome::ok(vec![Panel::Bookmarks])
    }

    pub async fn control_upload(&mut self, form: &RecipeForm) -> Outcome {
        render_spinner(&mut self.upload);
        match self.store.upload_recipe(form).await {
            Ok(recipe) => {
                render(&RecipeView, &mut self.recipe, &recipe);
                render(&AddRecipeView, &mut self.upload, &recipe);
                self.render_bookmarks().await;
                Outcome::ok(vec![Panel::Upload, Panel::Recipe, Panel::Bookmarks])
            }
            Err(err) => {
                warn!(error = %err, "controller: upload failed");
                let message = match &err {
                    ClientError::Validation { .. } => err.to_string(),
                    _ => format!("{} ({err})", AddRecipeView.error_message()),
                };
                render_error(&mut self.upload, &message);
                Outcome::failed(vec![Panel::Upload])
            }
        }
    }

    async fn render_results(&mut self, page: Option<usize>) {
        let view = ResultsView {
            active: self.active_id().await,
        };
        let results = self.store.results_page(page).await;
        render(&view, &mut self.results, results.as_slice());
        render(&PaginationView, &mut self.pagination, &self.store.search().await);
    }

    async fn render_recipe(&mut self) {
        match self.store.recipe().await {
            Some(recipe) => render(&RecipeView, &mut self.recipe, &recipe),
            None => render_view_error(&RecipeView, &mut self.recipe),
        }
    }

    fn render_recipe_error(&mut self, err: &ClientError) {
        if err.is_not_found() || err.status() == Some(400) {
            render_view_error(&RecipeView, &mut self.recipe);
        } else {
            render_error(&mut self.recipe, &err.to_string());
        }
    }

    async fn render_bookmarks(&mut self) {
        let active = self.active_id().await;
        let bookmarks = self.store.bookmarks().await;
        render(&BookmarksView { active }, &mut self.bookmarks, bookmarks.as_slice());
    }

    async fn active_id(&self) -> Option<RecipeId> {
        self.store.recipe().await.map(|recipe| recipe.id)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
