use super::*;

fn recipe_template(servings: u32, bookmarked: bool) -> RenderNode {
    RenderNode::element("div")
        .class("recipe__details")
        .child(
            RenderNode::element("div")
                .class("recipe__info")
                .child(
                    RenderNode::element("span")
                        .class("recipe__info-data recipe__info-data--people")
                        .text(servings.to_string()),
                )
                .child(RenderNode::element("span").class("recipe__info-text").text("servings"))
                .child(
                    RenderNode::element("button")
                        .class("btn--tiny btn--update-servings")
                        .attr("data-update-to", (servings + 1).to_string()),
                ),
        )
        .child(
            RenderNode::element("button").class("btn--round btn--bookmark").child(
                RenderNode::element("use").attr(
                    "href",
                    if bookmarked {
                        "icons.svg#icon-bookmark-fill"
                    } else {
                        "icons.svg#icon-bookmark"
                    },
                ),
            ),
        )
}

fn addresses(tree: &RenderNode) -> Vec<*const RenderNode> {
    tree.flatten()
        .into_iter()
        .map(|node| node as *const RenderNode)
        .collect()
}

#[test]
fn identical_trees_are_left_alone() {
    let mut live = recipe_template(4, false);
    let summary = reconcile(&mut live, &recipe_template(4, false));

    assert!(summary.is_noop());
    assert_eq!(summary.visited, live.node_count());
    assert_eq!(summary.unmatched, 0);
}

#[test]
fn only_the_changed_text_node_is_rewritten() {
    // Same servings button target on both sides, so only the text differs.
    let mut live = recipe_template(4, false);
    let mut next = recipe_template(4, false);
    next.children[0].children[0].text = Some("5".into());

    let before = live.clone();
    let identity = addresses(&live);
    let summary = reconcile(&mut live, &next);

    assert_eq!(summary.text_updates, 1);
    assert_eq!(summary.attribute_updates, 0);
    assert_eq!(live.children[0].children[0].text.as_deref(), Some("5"));
    assert_eq!(addresses(&live), identity);

    let changed = live.flatten();
    for (index, (old, new)) in before.flatten().iter().zip(changed.iter()).enumerate() {
        assert_eq!(old.attributes, new.attributes, "attributes of node {index}");
        if index != 2 {
            assert_eq!(old.text, new.text, "text of node {index}");
        }
    }
}

#[test]
fn only_the_changed_attribute_is_rewritten() {
    let mut live = recipe_template(4, false);
    let next = recipe_template(4, true);
    let before = live.clone();

    let summary = reconcile(&mut live, &next);

    assert_eq!(summary.attribute_updates, 1);
    assert_eq!(summary.text_updates, 0);
    let icon = &live.children[1].children[0];
    assert_eq!(icon.attribute("href"), Some("icons.svg#icon-bookmark-fill"));

    let mut expected = before;
    expected.children[1].children[0].set_attribute("href", "icons.svg#icon-bookmark-fill");
    assert_eq!(live, expected);
}

#[test]
fn text_and_attributes_patch_together() {
    let mut live = recipe_template(4, false);
    let next = recipe_template(8, true);

    let summary = reconcile(&mut live, &next);

    assert_eq!(live, next);
    assert_eq!(summary.text_updates, 1);
    assert_eq!(summary.attribute_updates, 2);
}

#[test]
fn blank_new_text_does_not_clobber_live_text() {
    let mut live = RenderNode::element("p").class("old").text("keep me");
    let next = RenderNode::element("p").class("new").text("   ");

    let summary = reconcile(&mut live, &next);

    assert_eq!(live.text.as_deref(), Some("keep me"));
    assert_eq!(live.attribute("class"), Some("new"));
    assert_eq!(summary.text_updates, 0);
    assert_eq!(summary.attribute_updates, 1);
}

#[test]
fn live_only_attributes_survive() {
    let mut live = RenderNode::element("input")
        .attr("value", "a")
        .attr("data-focus", "true");
    let next = RenderNode::element("input").attr("value", "b");

    reconcile(&mut live, &next);

    assert_eq!(live.attribute("value"), Some("b"));
    assert_eq!(live.attribute("data-focus"), Some("true"));
}

#[test]
fn trailing_nodes_of_longer_tree_are_ignored() {
    let mut live = RenderNode::element("ul")
        .child(RenderNode::element("li").text("one"))
        .child(RenderNode::element("li").text("two"))
        .child(RenderNode::element("li").text("three"));
    let next = RenderNode::element("ul")
        .child(RenderNode::element("li").text("uno"))
        .child(RenderNode::element("li").text("dos"));

    let summary = reconcile(&mut live, &next);

    assert_eq!(summary.visited, 3);
    assert_eq!(summary.unmatched, 1);
    assert_eq!(live.children[0].text.as_deref(), Some("uno"));
    assert_eq!(live.children[1].text.as_deref(), Some("dos"));
    assert_eq!(live.children[2].text.as_deref(), Some("three"));
}

#[test]
fn pairing_is_positional_not_keyed() {
    // Reordering looks like content edits: both rows are rewritten in place.
    let mut live = RenderNode::element("ul")
        .child(RenderNode::element("li").attr("data-id", "a").text("Apple"))
        .child(RenderNode::element("li").attr("data-id", "b").text("Banana"));
    let next = RenderNode::element("ul")
        .child(RenderNode::element("li").attr("data-id", "b").text("Banana"))
        .child(RenderNode::element("li").attr("data-id", "a").text("Apple"));

    let identity = addresses(&live);
    reconcile(&mut live, &next);

    assert_eq!(live, next);
    assert_eq!(addresses(&live), identity);
}
