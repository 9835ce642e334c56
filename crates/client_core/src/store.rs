use std::sync::Arc;

use shared::domain::{Recipe, RecipeId, SearchSummary};
use storage::BookmarkStore;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    error::{ClientError, Result},
    source::RecipeSource,
    upload::{build_payload, RecipeForm},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchSummary>,
    /// 1-indexed.
    pub page: usize,
    pub results_per_page: usize,
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page: results_per_page.max(1),
        }
    }

    /// `results[(page-1)*size .. page*size]`, clipped. Pages outside the
    /// result range (including 0) yield an empty slice.
    pub fn page_slice(&self, page: usize) -> &[SearchSummary] {
        let Some(start) = page
            .checked_sub(1)
            .map(|index| index.saturating_mul(self.results_per_page))
        else {
            return &[];
        };
        if start >= self.results.len() {
            return &[];
        }
        let end = start
            .saturating_add(self.results_per_page)
            .min(self.results.len());
        &self.results[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page)
    }

    pub fn page_controls(&self) -> PageControls {
        let total = self.total_pages();
        let current = self.page;
        PageControls {
            current,
            total,
            prev: (current > 1 && current <= total).then(|| current - 1),
            next: (current >= 1 && current < total).then(|| current + 1),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(crate::source::DEFAULT_RESULTS_PER_PAGE)
    }
}

/// Which pagination buttons exist for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub current: usize,
    pub total: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub recipe: Option<Recipe>,
    pub search: SearchState,
    pub bookmarks: Vec<Recipe>,
}

/// Owner of the recipe, search and bookmark state.
///
/// Methods take `&self`; the state lock is never held across a network or
/// storage await, so overlapping calls interleave and the last one to
/// resolve wins.
pub struct RecipeStore {
    source: Arc<dyn RecipeSource>,
    bookmark_store: BookmarkStore,
    state: Mutex<StoreState>,
}

impl RecipeStore {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        bookmark_store: BookmarkStore,
        results_per_page: usize,
    ) -> Self {
        Self {
            source,
            bookmark_store,
            state: Mutex::new(StoreState {
                search: SearchState::new(results_per_page),
                ..StoreState::default()
            }),
        }
    }

    pub async fn snapshot(&self) -> StoreState {
        self.state.lock().await.clone()
    }

    pub async fn recipe(&self) -> Option<Recipe> {
        self.state.lock().await.recipe.clone()
    }

    pub async fn search(&self) -> SearchState {
        self.state.lock().await.search.clone()
    }

    pub async fn bookmarks(&self) -> Vec<Recipe> {
        self.state.lock().await.bookmarks.clone()
    }

    pub async fn page_controls(&self) -> PageControls {
        self.state.lock().await.search.page_controls()
    }

    /// Replaces the bookmark list with the stored one, if any. Returns the
    /// number of bookmarks loaded.
    pub async fn initialize_from_storage(&self) -> Result<usize> {
        let Some(raw) = self
            .bookmark_store
            .load()
            .await
            .map_err(ClientError::Persistence)?
        else {
            info!("store: no stored bookmarks");
            return Ok(0);
        };

        let bookmarks: Vec<Recipe> = serde_json::from_slice(&raw)?;
        let count = bookmarks.len();
        self.state.lock().await.bookmarks = bookmarks;
        info!(count, "store: bookmarks restored");
        Ok(count)
    }

    pub async fn load_recipe(&self, id: &RecipeId) -> Result<Recipe> {
        let wire = self.source.fetch_recipe(id).await?;
        let mut recipe = Recipe::from(wire);

        let mut state = self.state.lock().await;
        recipe.bookmarked = state.bookmarks.iter().any(|bookmark| bookmark.id == *id);
        state.recipe = Some(recipe.clone());
        info!(recipe_id = %id, bookmarked = recipe.bookmarked, "store: recipe loaded");
        Ok(recipe)
    }

    /// Runs a search. On success the results are replaced and the page is
    /// reset to 1; on failure the previous search state is kept. Returns the
    /// number of results, which may be zero.
    pub async fn load_search_results(&self, query: &str) -> Result<usize> {
        let results: Vec<SearchSummary> = self
            .source
            .search(query)
            .await?
            .into_iter()
            .map(SearchSummary::from)
            .collect();

        let count = results.len();
        let mut state = self.state.lock().await;
        state.search.query = query.to_string();
        state.search.results = results;
        state.search.page = 1;
        info!(query, count, "store: search results loaded");
        Ok(count)
    }

    /// Returns one page of results, first moving the current page to `page`
    /// when given. The page is not clamped.
    pub async fn results_page(&self, page: Option<usize>) -> Vec<SearchSummary> {
        let mut state = self.state.lock().await;
        if let Some(page) = page {
            state.search.page = page;
        }
        let page = state.search.page;
        state.search.page_slice(page).to_vec()
    }

    /// Rescales every ingredient quantity from the current servings to
    /// `new_servings`.
    pub async fn update_servings(&self, new_servings: u32) -> Result<Recipe> {
        if new_servings == 0 {
            return Err(ClientError::validation("servings must be at least 1"));
        }

        let mut state = self.state.lock().await;
        let recipe = state.recipe.as_mut().ok_or(ClientError::NoActiveRecipe)?;
        let old_servings = recipe.servings;
        if old_servings == 0 {
            return Err(ClientError::validation(
                "current recipe has zero servings and cannot be scaled",
            ));
        }

        for ingredient in &mut recipe.ingredients {
            ingredient.rescale(old_servings, new_servings);
        }
        recipe.servings = new_servings;
        info!(
            recipe_id = %recipe.id,
            from = old_servings,
            to = new_servings,
            "store: servings updated"
        );
        Ok(recipe.clone())
    }

    /// Appends `recipe` to the bookmarks. There is no duplicate check.
    pub async fn add_bookmark(&self, recipe: Recipe) -> Result<()> {
        let bookmarks = {
            let mut state = self.state.lock().await;
            push_bookmark(&mut state, recipe);
            state.bookmarks.clone()
        };
        self.persist(&bookmarks).await
    }

    /// Removes the first bookmark with `id`. Unknown ids are ignored.
    pub async fn delete_bookmark(&self, id: &RecipeId) -> Result<()> {
        let bookmarks = {
            let mut state = self.state.lock().await;
            remove_bookmark(&mut state, id);
            state.bookmarks.clone()
        };
        self.persist(&bookmarks).await
    }

    /// Bookmarks the current recipe, or removes it if already bookmarked.
    /// Returns the new bookmarked flag.
    pub async fn toggle_bookmark(&self) -> Result<bool> {
        let (bookmarked, bookmarks) = {
            let mut state = self.state.lock().await;
            let current = state.recipe.clone().ok_or(ClientError::NoActiveRecipe)?;
            if current.bookmarked {
                remove_bookmark(&mut state, &current.id);
            } else {
                push_bookmark(&mut state, current);
            }
            let bookmarked = state.recipe.as_ref().is_some_and(|recipe| recipe.bookmarked);
            (bookmarked, state.bookmarks.clone())
        };
        self.persist(&bookmarks).await?;
        Ok(bookmarked)
    }

    /// Validates and uploads a user recipe, then makes it the current recipe
    /// and bookmarks it.
    pub async fn upload_recipe(&self, form: &RecipeForm) -> Result<Recipe> {
        let payload = build_payload(form)?;
        let wire = self.source.upload(&payload).await?;
        let mut recipe = Recipe::from(wire);
        info!(recipe_id = %recipe.id, title = %recipe.title, "store: recipe uploaded");

        let bookmarks = {
            let mut state = self.state.lock().await;
            state.recipe = Some(recipe.clone());
            push_bookmark(&mut state, recipe.clone());
            state.bookmarks.clone()
        };
        recipe.bookmarked = true;
        self.persist(&bookmarks).await?;
        Ok(recipe)
    }

    async fn persist(&self, bookmarks: &[Recipe]) -> Result<()> {
        self.bookmark_store.save(bookmarks).await.map_err(|err| {
            warn!(error = %err, "store: failed to persist bookmarks");
            ClientError::Persistence(err)
        })
    }
}

fn push_bookmark(state: &mut StoreState, mut recipe: Recipe) {
    recipe.bookmarked = true;
    if let Some(current) = state.recipe.as_mut() {
        if current.id == recipe.id {
            current.bookmarked = true;
        }
    }
    info!(recipe_id = %recipe.id, "store: bookmark added");
    state.bookmarks.push(recipe);
}

fn remove_bookmark(state: &mut StoreState, id: &RecipeId) {
    if let Some(index) = state.bookmarks.iter().position(|bookmark| bookmark.id == *id) {
        state.bookmarks.remove(index);
        info!(recipe_id = %id, "store: bookmark removed");
    }
    if let Some(current) = state.recipe.as_mut() {
        if current.id == *id {
            current.bookmarked = false;
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
