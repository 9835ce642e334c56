use serde::{Deserialize, Serialize};

use crate::domain::{Ingredient, Recipe, RecipeId, SearchSummary};

/// Top-level body returned by every recipe API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    pub data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeData {
    pub recipe: WireRecipe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchData {
    #[serde(default)]
    pub recipes: Vec<WireSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRecipe {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image_url: String,
    pub servings: u32,
    pub cooking_time: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSummary {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Body POSTed when a user submits a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipePayload {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}

impl From<WireRecipe> for Recipe {
    fn from(value: WireRecipe) -> Self {
        Self {
            id: value.id,
            title: value.title,
            publisher: value.publisher,
            source_url: value.source_url,
            image: value.image_url,
            servings: value.servings,
            cooking_time: value.cooking_time,
            ingredients: value.ingredients,
            key: value.key,
            bookmarked: false,
        }
    }
}

impl From<WireSummary> for SearchSummary {
    fn from(value: WireSummary) -> Self {
        Self {
            id: value.id,
            title: value.title,
            publisher: value.publisher,
            image: value.image_url,
            key: value.key,
        }
    }
}
