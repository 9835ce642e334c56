//! Parsing of the "add recipe" form into the upload payload.

use std::collections::BTreeMap;

use shared::{domain::Ingredient, protocol::NewRecipePayload};

use crate::error::{ClientError, Result};

/// Ingredient inputs are named `ingredient-1` ..= `ingredient-6`.
pub const MAX_INGREDIENT_FIELDS: usize = 6;

pub const INGREDIENT_FORMAT_HINT: &str =
    "Wrong ingredient format! Please use the correct format, EX: (0.5,Kg,Rice)";

/// Raw form fields keyed by input name (`title`, `sourceUrl`, `image`,
/// `publisher`, `cookingTime`, `servings`, `ingredient-N`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    fields: BTreeMap<String, String>,
}

impl RecipeForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn required(&self, name: &str) -> Result<&str> {
        match self.get(name).map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ClientError::validation(format!("missing required field '{name}'"))),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RecipeForm {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// Collects the non-empty `ingredient-N` fields in field order.
pub fn parse_ingredients(form: &RecipeForm) -> Result<Vec<Ingredient>> {
    (1..=MAX_INGREDIENT_FIELDS)
        .filter_map(|n| form.get(&format!("ingredient-{n}")))
        .filter(|raw| !raw.trim().is_empty())
        .map(parse_ingredient)
        .collect()
}

/// Parses `quantity,unit,description`. An empty quantity means unspecified.
pub fn parse_ingredient(raw: &str) -> Result<Ingredient> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [quantity, unit, description] = parts.as_slice() else {
        return Err(ClientError::validation(INGREDIENT_FORMAT_HINT));
    };

    let quantity = if quantity.is_empty() {
        None
    } else {
        match quantity.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Some(value),
            _ => {
                return Err(ClientError::validation(format!(
                    "invalid ingredient quantity '{quantity}'. {INGREDIENT_FORMAT_HINT}"
                )))
            }
        }
    };

    Ok(Ingredient::new(quantity, *unit, *description))
}

/// Builds the snake_case payload POSTed to the API.
pub fn build_payload(form: &RecipeForm) -> Result<NewRecipePayload> {
    let ingredients = parse_ingredients(form)?;

    let servings: u32 = parse_number(form, "servings")?;
    if servings == 0 {
        return Err(ClientError::validation("servings must be at least 1"));
    }

    Ok(NewRecipePayload {
        title: form.required("title")?.to_string(),
        source_url: form.required("sourceUrl")?.to_string(),
        image_url: form.required("image")?.to_string(),
        publisher: form.required("publisher")?.to_string(),
        cooking_time: parse_number(form, "cookingTime")?,
        servings,
        ingredients,
    })
}

fn parse_number(form: &RecipeForm, name: &str) -> Result<u32> {
    let raw = form.required(name)?;
    raw.parse().map_err(|_| {
        ClientError::validation(format!(
            "field '{name}' must be a whole number, got '{raw}'"
        ))
    })
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
