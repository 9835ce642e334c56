//! Templates for the recipe, results, bookmarks and pagination views.

use client_core::SearchState;
use render::{icon, RenderNode, View};
use shared::domain::{Ingredient, Recipe, RecipeId, SearchSummary};

pub struct RecipeView;

impl View for RecipeView {
    type Data = Recipe;

    fn name(&self) -> &'static str {
        "recipe"
    }

    fn error_message(&self) -> &str {
        "We couldn't find that recipe. Please try another one!"
    }

    fn generate_tree(&self, recipe: &Recipe) -> RenderNode {
        let figure = RenderNode::element("figure")
            .class("recipe__fig")
            .child(
                RenderNode::element("img")
                    .class("recipe__img")
                    .attr("src", &recipe.image)
                    .attr("alt", &recipe.title),
            )
            .child(
                RenderNode::element("h1")
                    .class("recipe__title")
                    .child(RenderNode::element("span").text(&recipe.title)),
            );

        let servings_buttons = RenderNode::element("div")
            .class("recipe__info-buttons")
            .child(
                RenderNode::element("button")
                    .class("btn--tiny btn--update-servings")
                    .attr("data-update-to", recipe.servings.saturating_sub(1).to_string())
                    .child(icon("icon-minus-circle")),
            )
            .child(
                RenderNode::element("button")
                    .class("btn--tiny btn--update-servings")
                    .attr("data-update-to", (recipe.servings + 1).to_string())
                    .child(icon("icon-plus-circle")),
            );

        let details = RenderNode::element("div")
            .class("recipe__details")
            .child(
                RenderNode::element("div")
                    .class("recipe__info")
                    .child(icon("icon-clock"))
                    .child(
                        RenderNode::element("span")
                            .class("recipe__info-data recipe__info-data--minutes")
                            .text(recipe.cooking_time.to_string()),
                    )
                    .child(
                        RenderNode::element("span")
                            .class("recipe__info-text")
                            .text("minutes"),
                    ),
            )
            .child(
                RenderNode::element("div")
                    .class("recipe__info")
                    .child(icon("icon-users"))
                    .child(
                        RenderNode::element("span")
                            .class("recipe__info-data recipe__info-data--people")
                            .text(recipe.servings.to_string()),
                    )
                    .child(
                        RenderNode::element("span")
                            .class("recipe__info-text")
                            .text("servings"),
                    )
                    .child(servings_buttons),
            )
            .child(
                RenderNode::element("div")
                    .class(hidden_unless("recipe__user-generated", recipe.is_user_generated()))
                    .child(icon("icon-user")),
            )
            .child(
                RenderNode::element("button")
                    .class("btn--round btn--bookmark")
                    .child(icon(if recipe.bookmarked {
                        "icon-bookmark-fill"
                    } else {
                        "icon-bookmark"
                    })),
            );

        let ingredients = RenderNode::element("div")
            .class("recipe__ingredients")
            .child(
                RenderNode::element("h2")
                    .class("heading--2")
                    .text("Recipe ingredients"),
            )
            .child(
                RenderNode::element("ul")
                    .class("recipe__ingredient-list")
                    .children(recipe.ingredients.iter().map(ingredient_tree)),
            );

        let directions = RenderNode::element("div")
            .class("recipe__directions")
            .child(
                RenderNode::element("h2")
                    .class("heading--2")
                    .text("How to cook it"),
            )
            .child(
                RenderNode::element("p")
                    .class("recipe__directions-text")
                    .text("This recipe was carefully designed and tested by")
                    .child(
                        RenderNode::element("span")
                            .class("recipe__publisher")
                            .text(&recipe.publisher),
                    ),
            )
            .child(
                RenderNode::element("a")
                    .class("btn--small recipe__btn")
                    .attr("href", &recipe.source_url)
                    .attr("target", "_blank")
                    .child(RenderNode::element("span").text("Directions")),
            );

        RenderNode::element("div")
            .class("recipe")
            .child(figure)
            .child(details)
            .child(ingredients)
            .child(directions)
    }
}

fn ingredient_tree(ingredient: &Ingredient) -> RenderNode {
    RenderNode::element("li")
        .class("recipe__ingredient")
        .child(icon("icon-check"))
        .child(
            RenderNode::element("div")
                .class("recipe__quantity")
                .text(ingredient.quantity.map(format_quantity).unwrap_or_default()),
        )
        .child(
            RenderNode::element("div")
                .class("recipe__description")
                .text(&ingredient.description)
                .child(
                    RenderNode::element("span")
                        .class("recipe__unit")
                        .text(&ingredient.unit),
                ),
        )
}

/// One list entry linking to a recipe.
pub struct PreviewView {
    pub active: Option<RecipeId>,
}

impl View for PreviewView {
    type Data = SearchSummary;

    fn name(&self) -> &'static str {
        "preview"
    }

    fn error_message(&self) -> &str {
        ""
    }

    fn generate_tree(&self, summary: &SearchSummary) -> RenderNode {
        let link_class = if self.active.as_ref() == Some(&summary.id) {
            "preview__link preview__link--active"
        } else {
            "preview__link"
        };

        RenderNode::element("li").class("preview").child(
            RenderNode::element("a")
                .class(link_class)
                .attr("href", format!("#{}", summary.id))
                .child(
                    RenderNode::element("figure")
                        .class("preview__fig")
                        .child(
                            RenderNode::element("img")
                                .attr("src", &summary.image)
                                .attr("alt", "Image"),
                        ),
                )
                .child(
                    RenderNode::element("div")
                        .class("preview__data")
                        .child(
                            RenderNode::element("h4")
                                .class("preview__title")
                                .text(&summary.title),
                        )
                        .child(
                            RenderNode::element("p")
                                .class("preview__publisher")
                                .text(&summary.publisher),
                        )
                        .child(
                            RenderNode::element("div")
                                .class(hidden_unless(
                                    "preview__user-generated",
                                    summary.is_user_generated(),
                                ))
                                .child(icon("icon-user")),
                        ),
                ),
        )
    }
}

pub struct ResultsView {
    pub active: Option<RecipeId>,
}

impl View for ResultsView {
    type Data = [SearchSummary];

    fn name(&self) -> &'static str {
        "results"
    }

    fn error_message(&self) -> &str {
        "No recipes found for your query! Please try again"
    }

    fn is_empty(&self, data: &[SearchSummary]) -> bool {
        data.is_empty()
    }

    fn generate_tree(&self, results: &[SearchSummary]) -> RenderNode {
        let preview = PreviewView {
            active: self.active.clone(),
        };
        RenderNode::element("ul")
            .class("results")
            .children(results.iter().map(|summary| preview.generate_tree(summary)))
    }
}

pub struct BookmarksView {
    pub active: Option<RecipeId>,
}

impl View for BookmarksView {
    type Data = [Recipe];

    fn name(&self) -> &'static str {
        "bookmarks"
    }

    fn error_message(&self) -> &str {
        "No bookmarks yet. Find a nice recipe and bookmark it :)"
    }

    fn is_empty(&self, data: &[Recipe]) -> bool {
        data.is_empty()
    }

    fn generate_tree(&self, bookmarks: &[Recipe]) -> RenderNode {
        let preview = PreviewView {
            active: self.active.clone(),
        };
        RenderNode::element("ul").class("bookmarks__list").children(
            bookmarks
                .iter()
                .map(|bookmark| preview.generate_tree(&bookmark.summary())),
        )
    }
}

pub struct PaginationView;

impl View for PaginationView {
    type Data = SearchState;

    fn name(&self) -> &'static str {
        "pagination"
    }

    fn error_message(&self) -> &str {
        ""
    }

    fn generate_tree(&self, search: &SearchState) -> RenderNode {
        let controls = search.page_controls();
        let mut root = RenderNode::element("div").class("pagination");

        if let Some(prev) = controls.prev {
            root = root.child(
                RenderNode::element("button")
                    .class("btn--inline pagination__btn--prev")
                    .attr("data-goto", prev.to_string())
                    .child(icon("icon-arrow-left"))
                    .child(RenderNode::element("span").text(format!("Page {prev}"))),
            );
        }
        if let Some(next) = controls.next {
            root = root.child(
                RenderNode::element("button")
                    .class("btn--inline pagination__btn--next")
                    .attr("data-goto", next.to_string())
                    .child(RenderNode::element("span").text(format!("Page {next}")))
                    .child(icon("icon-arrow-right")),
            );
        }
        root
    }
}

pub struct AddRecipeView;

impl View for AddRecipeView {
    type Data = Recipe;

    fn name(&self) -> &'static str {
        "add-recipe"
    }

    fn error_message(&self) -> &str {
        "The recipe could not be uploaded. Please try again!"
    }

    fn success_message(&self) -> &str {
        "Recipe was successfully uploaded :)"
    }

    /// Confirmation shown in place of the form once the upload went through.
    fn generate_tree(&self, recipe: &Recipe) -> RenderNode {
        RenderNode::element("div")
            .class("message")
            .child(RenderNode::element("div").child(icon("icon-smile")))
            .child(RenderNode::element("p").text(self.success_message()))
            .child(
                RenderNode::element("h3")
                    .class("upload__heading")
                    .text(&recipe.title),
            )
    }
}

fn hidden_unless(class: &str, visible: bool) -> String {
    if visible {
        class.to_string()
    } else {
        format!("{class} hidden")
    }
}

/// Renders a quantity as a (mixed) fraction when it is close to one with a
/// small denominator, e.g. `1.5` → `1 1/2`. Other values use up to two
/// decimals.
pub fn format_quantity(quantity: f64) -> String {
    const DENOMINATORS: [u32; 4] = [2, 3, 4, 8];
    const TOLERANCE: f64 = 1e-3;

    let whole = quantity.trunc();
    let fraction = quantity - whole;

    if fraction.abs() < TOLERANCE {
        return format!("{whole:.0}");
    }
    if (1.0 - fraction).abs() < TOLERANCE {
        return format!("{:.0}", whole + 1.0);
    }

    for denominator in DENOMINATORS {
        let numerator = (fraction * f64::from(denominator)).round();
        if numerator > 0.0 && (fraction - numerator / f64::from(denominator)).abs() < TOLERANCE {
            let (numerator, denominator) = reduce(numerator as u32, denominator);
            return if whole == 0.0 {
                format!("{numerator}/{denominator}")
            } else {
                format!("{whole:.0} {numerator}/{denominator}")
            };
        }
    }

    let decimal = format!("{quantity:.2}");
    decimal.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn reduce(numerator: u32, denominator: u32) -> (u32, u32) {
    let mut a = numerator;
    let mut b = denominator;
    while b != 0 {
        (a, b) = (b, a % b);
    }
    (numerator / a, denominator / a)
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
