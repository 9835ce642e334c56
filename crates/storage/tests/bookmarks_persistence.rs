use std::sync::Arc;

use shared::domain::{Ingredient, Recipe, RecipeId};
use storage::{BookmarkStore, Storage};

#[tokio::test]
async fn bookmarks_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let database_url = format!(
        "sqlite://{}",
        dir.path()
            .join("bookmarks.db")
            .to_string_lossy()
            .replace('\\', "/")
    );

    let saved = vec![Recipe {
        id: RecipeId::new("664c8f193e7aa067e94e8531"),
        title: "Spicy rice".into(),
        publisher: "me".into(),
        source_url: "https://example.com/rice".into(),
        image: "https://example.com/rice.jpg".into(),
        servings: 2,
        cooking_time: 25,
        ingredients: vec![
            Ingredient::new(Some(0.5), "Kg", "Rice"),
            Ingredient::new(None, "", "Salt"),
        ],
        key: Some("user-key".into()),
        bookmarked: true,
    }];

    {
        let storage = Storage::new(&database_url).await.expect("db");
        BookmarkStore::new(Arc::new(storage))
            .save(&saved)
            .await
            .expect("save");
    }

    let storage = Storage::new(&database_url).await.expect("reopen");
    let raw = BookmarkStore::new(Arc::new(storage))
        .load()
        .await
        .expect("load")
        .expect("stored bookmarks");
    let loaded: Vec<Recipe> = serde_json::from_slice(&raw).expect("decode");
    assert_eq!(loaded, saved);
}
