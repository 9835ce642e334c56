//! Client-side state for the recipe app.
//!
//! [`RecipeStore`] owns the current recipe, the search results and the
//! bookmark list. Remote calls go through a [`RecipeSource`]; the HTTP
//! implementation races every request against a timeout
//! ([`fetch::fetch_with_timeout`]). Bookmarks are persisted through
//! [`storage::BookmarkStore`] after every change.

pub mod error;
pub mod fetch;
pub mod source;
pub mod store;
pub mod upload;

pub use error::{ClientError, Result};
pub use source::{ApiConfig, HttpRecipeSource, RecipeSource};
pub use store::{PageControls, RecipeStore, SearchState, StoreState};
pub use upload::RecipeForm;
