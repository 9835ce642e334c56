use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::RecipeId,
    protocol::{Envelope, NewRecipePayload, RecipeData, SearchData, WireRecipe, WireSummary},
};
use tracing::info;
use url::Url;

use crate::{
    error::{ClientError, Result},
    fetch::{fetch_with_timeout, ApiRequest},
};

pub const DEFAULT_API_URL: &str = "https://forkify-api.herokuapp.com/api/v2/recipes/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Fixed per-process client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: Url,
    pub api_key: String,
    pub timeout: Duration,
    pub results_per_page: usize,
}

impl ApiConfig {
    pub fn new(api_url: &str, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_url: parse_base_url(api_url)?,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_results_per_page(mut self, results_per_page: usize) -> Self {
        self.results_per_page = results_per_page.max(1);
        self
    }
}

/// Base URLs are treated as directories so recipe ids join underneath them.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ClientError::validation(format!("invalid api url '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::validation(format!(
            "api url '{raw}' cannot be used as a base"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Remote recipe API, in wire shapes.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn fetch_recipe(&self, id: &RecipeId) -> Result<WireRecipe>;
    async fn search(&self, query: &str) -> Result<Vec<WireSummary>>;
    async fn upload(&self, payload: &NewRecipePayload) -> Result<WireRecipe>;
}

/// Talks to the recipe API over HTTP, every call guarded by the configured
/// timeout.
#[derive(Clone)]
pub struct HttpRecipeSource {
    http: Client,
    config: ApiConfig,
}

impl HttpRecipeSource {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `<base>/<id>?key=`, with the id percent-encoded as one path segment.
    pub(crate) fn recipe_url(&self, id: &RecipeId) -> Result<Url> {
        let raw = id.as_str();
        if raw.trim().is_empty() || raw == "." || raw == ".." {
            return Err(ClientError::validation(format!("invalid recipe id '{id}'")));
        }

        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ClientError::validation(format!(
                    "api url '{}' cannot be used as a base",
                    self.config.api_url
                ))
            })?
            .pop_if_empty()
            .push(raw);
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        Ok(url)
    }

    pub(crate) fn search_url(&self, query: &str) -> Url {
        let mut url = self.config.api_url.clone();
        url.query_pairs_mut()
            .append_pair("search", query)
            .append_pair("key", &self.config.api_key);
        url
    }

    pub(crate) fn upload_url(&self) -> Url {
        let mut url = self.config.api_url.clone();
        url.query_pairs_mut().append_pair("key", &self.config.api_key);
        url
    }
}

#[async_trait]
impl RecipeSource for HttpRecipeSource {
    async fn fetch_recipe(&self, id: &RecipeId) -> Result<WireRecipe> {
        let request = ApiRequest::get(self.recipe_url(id)?);
        let body: Envelope<RecipeData> =
            fetch_with_timeout(&self.http, request, self.config.timeout).await?;
        Ok(body.data.recipe)
    }

    async fn search(&self, query: &str) -> Result<Vec<WireSummary>> {
        let request = ApiRequest::get(self.search_url(query));
        let body: Envelope<SearchData> =
            fetch_with_timeout(&self.http, request, self.config.timeout).await?;
        info!(query, results = body.data.recipes.len(), "api: search answered");
        Ok(body.data.recipes)
    }

    async fn upload(&self, payload: &NewRecipePayload) -> Result<WireRecipe> {
        let request = ApiRequest::post_json(self.upload_url(), payload)?;
        let body: Envelope<RecipeData> =
            fetch_with_timeout(&self.http, request, self.config.timeout).await?;
        Ok(body.data.recipe)
    }
}

#[cfg(test)]
#[path = "tests/source_tests.rs"]
mod tests;
