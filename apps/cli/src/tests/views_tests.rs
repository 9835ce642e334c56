use super::*;

use render::{render, update, Mount};

fn recipe(servings: u32) -> Recipe {
    Recipe {
        id: RecipeId::new("664c8f193e7aa067e94e8706"),
        title: "Spicy Chicken and Pepper Jack Pizza".into(),
        publisher: "My Baking Addiction".into(),
        source_url: "https://example.com/pizza".into(),
        image: "https://example.com/pizza.jpg".into(),
        servings,
        cooking_time: 45,
        ingredients: vec![
            Ingredient::new(Some(1.0), "", "pizza dough"),
            Ingredient::new(None, "", "salt and pepper to taste"),
        ],
        key: None,
        bookmarked: false,
    }
}

fn summary(id: &str, key: Option<&str>) -> SearchSummary {
    SearchSummary {
        id: RecipeId::new(id),
        title: format!("Recipe {id}"),
        publisher: "Closet Cooking".into(),
        image: format!("https://example.com/{id}.jpg"),
        key: key.map(str::to_string),
    }
}

fn button_targets(tree: &RenderNode, class: &str) -> Vec<String> {
    tree.flatten()
        .into_iter()
        .filter(|node| node.has_class(class))
        .filter_map(|node| node.attribute("data-update-to").or(node.attribute("data-goto")))
        .map(str::to_string)
        .collect()
}

#[test]
fn quantities_render_as_fractions_when_close() {
    assert_eq!(format_quantity(2.0), "2");
    assert_eq!(format_quantity(0.5), "1/2");
    assert_eq!(format_quantity(1.5), "1 1/2");
    assert_eq!(format_quantity(1.0 / 3.0), "1/3");
    assert_eq!(format_quantity(8.0 / 3.0), "2 2/3");
    assert_eq!(format_quantity(0.75), "3/4");
    assert_eq!(format_quantity(0.375), "3/8");
    assert_eq!(format_quantity(0.9999), "1");
}

#[test]
fn other_quantities_use_two_decimals() {
    assert_eq!(format_quantity(0.1), "0.1");
    assert_eq!(format_quantity(1.23456), "1.23");
}

#[test]
fn recipe_view_shows_details_and_stepper_targets() {
    let tree = RecipeView.generate_tree(&recipe(4));

    let lines = tree.text_lines();
    assert!(lines.contains(&"Spicy Chicken and Pepper Jack Pizza".to_string()));
    assert!(lines.contains(&"45".to_string()));
    assert!(lines.contains(&"My Baking Addiction".to_string()));
    assert!(lines.contains(&"pizza dough".to_string()));

    assert_eq!(button_targets(&tree, "btn--update-servings"), vec!["3", "5"]);
    assert_eq!(
        tree.find_by_class("recipe__info-data--people")
            .and_then(|node| node.text.as_deref()),
        Some("4")
    );
}

#[test]
fn recipe_view_reflects_bookmark_and_user_marker() {
    let plain = RecipeView.generate_tree(&recipe(4));
    assert!(plain.to_markup().contains("icons.svg#icon-bookmark\""));
    assert!(plain
        .find_by_class("recipe__user-generated")
        .is_some_and(|node| node.has_class("hidden")));

    let mut own = recipe(4);
    own.bookmarked = true;
    own.key = Some("user-key".into());
    let tree = RecipeView.generate_tree(&own);
    assert!(tree.to_markup().contains("icons.svg#icon-bookmark-fill"));
    assert!(tree
        .find_by_class("recipe__user-generated")
        .is_some_and(|node| !node.has_class("hidden")));
}

#[test]
fn missing_quantity_renders_blank() {
    let tree = RecipeView.generate_tree(&recipe(4));
    let quantities: Vec<_> = tree
        .flatten()
        .into_iter()
        .filter(|node| node.has_class("recipe__quantity"))
        .map(|node| node.text.clone().unwrap_or_default())
        .collect();
    assert_eq!(quantities, vec!["1".to_string(), String::new()]);
}

#[test]
fn scaling_servings_patches_only_changed_nodes() {
    let mut mount = Mount::new();
    render(&RecipeView, &mut mount, &recipe(4));

    let mut scaled = recipe(4);
    for ingredient in &mut scaled.ingredients {
        ingredient.rescale(4, 6);
    }
    scaled.servings = 6;

    let summary = update(&RecipeView, &mut mount, &scaled);
    // servings count and the one present quantity
    assert_eq!(summary.text_updates, 2);
    // both stepper targets
    assert_eq!(summary.attribute_updates, 2);
    assert_eq!(summary.unmatched, 0);

    let live = mount.content().expect("mounted");
    assert_eq!(*live, RecipeView.generate_tree(&scaled));
    assert_eq!(
        live.find_by_class("recipe__quantity")
            .and_then(|node| node.text.as_deref()),
        Some("1 1/2")
    );
}

#[test]
fn preview_marks_active_and_user_generated_entries() {
    let view = PreviewView {
        active: Some(RecipeId::new("a")),
    };

    let active = view.generate_tree(&summary("a", None));
    assert!(active.find_by_class("preview__link--active").is_some());
    assert_eq!(
        active.find_by_class("preview__link").and_then(|node| node.attribute("href")),
        Some("#a")
    );

    let other = view.generate_tree(&summary("b", Some("k")));
    assert!(other.find_by_class("preview__link--active").is_none());
    assert!(other
        .find_by_class("preview__user-generated")
        .is_some_and(|node| !node.has_class("hidden")));
}

#[test]
fn empty_results_and_bookmarks_render_messages() {
    let no_results: &[SearchSummary] = &[];
    let mut results = Mount::new();
    render(&ResultsView { active: None }, &mut results, no_results);
    assert_eq!(
        results.content().expect("results").text_lines(),
        vec!["No recipes found for your query! Please try again".to_string()]
    );

    let no_bookmarks: &[Recipe] = &[];
    let mut bookmarks = Mount::new();
    render(&BookmarksView { active: None }, &mut bookmarks, no_bookmarks);
    assert_eq!(
        bookmarks.content().expect("bookmarks").text_lines(),
        vec!["No bookmarks yet. Find a nice recipe and bookmark it :)".to_string()]
    );
}

#[test]
fn results_view_lists_every_summary() {
    let page = vec![summary("a", None), summary("b", None)];
    let tree = ResultsView { active: None }.generate_tree(&page);
    assert_eq!(tree.children.len(), 2);
    assert!(tree.text_lines().contains(&"Recipe b".to_string()));
}

#[test]
fn pagination_buttons_follow_page_position() {
    let mut search = SearchState::new(10);
    search.results = (0..25).map(|i| summary(&format!("r{i}"), None)).collect();

    search.page = 1;
    let first = PaginationView.generate_tree(&search);
    assert_eq!(button_targets(&first, "btn--inline"), vec!["2"]);

    search.page = 2;
    let middle = PaginationView.generate_tree(&search);
    assert_eq!(button_targets(&middle, "btn--inline"), vec!["1", "3"]);
    assert!(middle.text_lines().contains(&"Page 3".to_string()));

    search.page = 3;
    let last = PaginationView.generate_tree(&search);
    assert_eq!(button_targets(&last, "btn--inline"), vec!["2"]);
    assert!(last.find_by_class("pagination__btn--prev").is_some());
}

#[test]
fn single_page_has_no_buttons() {
    let mut search = SearchState::new(10);
    search.results = vec![summary("only", None)];
    search.page = 1;
    assert!(PaginationView.generate_tree(&search).children.is_empty());
}

#[test]
fn upload_confirmation_names_the_recipe() {
    let mut mount = Mount::new();
    render(&AddRecipeView, &mut mount, &recipe(4));

    let tree = mount.content().expect("mounted");
    assert!(tree.has_class("message"));
    assert_eq!(
        tree.text_lines(),
        vec![
            "Recipe was successfully uploaded :)".to_string(),
            "Spicy Chicken and Pepper Jack Pizza".to_string()
        ]
    );
}
