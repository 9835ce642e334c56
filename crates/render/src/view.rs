use tracing::debug;

use crate::{
    node::RenderNode,
    reconcile::{reconcile, ReconcileSummary},
};

const ICONS: &str = "icons.svg";

/// A presentation component: a template from data to a tree, plus the
/// messages shown in place of content.
pub trait View {
    type Data: ?Sized;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn generate_tree(&self, data: &Self::Data) -> RenderNode;

    fn error_message(&self) -> &str;

    fn success_message(&self) -> &str {
        ""
    }

    /// Empty data renders the error message instead of the template.
    fn is_empty(&self, _data: &Self::Data) -> bool {
        false
    }
}

/// The slot a view renders into. Holds the live tree between renders.
#[derive(Debug, Clone, Default)]
pub struct Mount {
    content: Option<RenderNode>,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&RenderNode> {
        self.content.as_ref()
    }

    pub fn clear(&mut self) {
        self.content = None;
    }

    fn replace(&mut self, tree: RenderNode) {
        self.content = Some(tree);
    }
}

/// Replaces the mount's content with a freshly generated tree, or with the
/// view's error message when `data` is empty.
pub fn render<V: View>(view: &V, mount: &mut Mount, data: &V::Data) {
    if view.is_empty(data) {
        debug!(view = view.name(), "render: empty data");
        render_error(mount, view.error_message());
        return;
    }
    mount.replace(view.generate_tree(data));
}

/// Builds the tree without mounting it, for views composed into other views.
pub fn markup<V: View>(view: &V, data: &V::Data) -> Option<RenderNode> {
    if view.is_empty(data) {
        return None;
    }
    Some(view.generate_tree(data))
}

/// Reconciles the mounted tree against a freshly generated one instead of
/// replacing it. Falls back to [`render`] when nothing is mounted yet.
pub fn update<V: View>(view: &V, mount: &mut Mount, data: &V::Data) -> ReconcileSummary {
    let next = view.generate_tree(data);
    match mount.content.as_mut() {
        Some(live) => {
            let summary = reconcile(live, &next);
            debug!(
                view = view.name(),
                text_updates = summary.text_updates,
                attribute_updates = summary.attribute_updates,
                "update: reconciled"
            );
            summary
        }
        None => {
            mount.replace(next);
            ReconcileSummary::default()
        }
    }
}

pub fn render_spinner(mount: &mut Mount) {
    mount.replace(
        RenderNode::element("div")
            .class("spinner")
            .child(icon("icon-loader")),
    );
}

pub fn render_error(mount: &mut Mount, message: &str) {
    mount.replace(message_tree("error", "icon-alert-triangle", message));
}

pub fn render_view_error<V: View>(view: &V, mount: &mut Mount) {
    render_error(mount, view.error_message());
}

pub fn render_success(mount: &mut Mount, message: &str) {
    mount.replace(message_tree("message", "icon-smile", message));
}

pub fn render_view_success<V: View>(view: &V, mount: &mut Mount) {
    render_success(mount, view.success_message());
}

/// `<svg><use href="icons.svg#name"/></svg>`
pub fn icon(name: &str) -> RenderNode {
    RenderNode::element("svg")
        .child(RenderNode::element("use").attr("href", format!("{ICONS}#{name}")))
}

fn message_tree(class: &str, icon_name: &str, message: &str) -> RenderNode {
    RenderNode::element("div")
        .class(class)
        .child(RenderNode::element("div").child(icon(icon_name)))
        .child(RenderNode::element("p").text(message))
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
