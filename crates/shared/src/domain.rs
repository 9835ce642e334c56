use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One ingredient line. A missing quantity means "to taste".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit: String,
    pub description: String,
}

impl Ingredient {
    pub fn new(
        quantity: Option<f64>,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            unit: unit.into(),
            description: description.into(),
        }
    }

    /// Rescales the quantity linearly from `from` servings to `to` servings.
    pub fn rescale(&mut self, from: u32, to: u32) {
        if let Some(quantity) = self.quantity.as_mut() {
            *quantity = *quantity * f64::from(to) / f64::from(from);
        }
    }
}

/// Full recipe as held by the client. Serialized camelCase, which is also the
/// shape persisted for bookmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl Recipe {
    pub fn is_user_generated(&self) -> bool {
        self.key.is_some()
    }

    pub fn summary(&self) -> SearchSummary {
        SearchSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            image: self.image.clone(),
            key: self.key.clone(),
        }
    }
}

/// Lightweight entry of a search result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub id: RecipeId,
    pub title: String,
    pub publisher: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl SearchSummary {
    pub fn is_user_generated(&self) -> bool {
        self.key.is_some()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
