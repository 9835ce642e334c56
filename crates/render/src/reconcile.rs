use tracing::{debug, trace, warn};

use crate::node::RenderNode;

/// Counts of what a [`reconcile`] pass touched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Node pairs compared.
    pub visited: usize,
    pub text_updates: usize,
    pub attribute_updates: usize,
    /// Trailing nodes of the longer tree that had no counterpart.
    pub unmatched: usize,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.text_updates == 0 && self.attribute_updates == 0
    }
}

/// Patches `live` in place so its text and attributes match `next`.
///
/// Both trees must come from the same template: nodes are paired purely by
/// their pre-order position, with no insertion, removal or move detection.
/// For every pair that is not deeply equal, non-blank text of the new node
/// replaces the live node's text and every attribute of the new node is
/// written onto the live node. Attributes only present on the live node are
/// kept. If the trees differ in size, the trailing nodes of the longer one are
/// ignored.
///
/// Nodes are never replaced, so the identity of every live node survives.
pub fn reconcile(live: &mut RenderNode, next: &RenderNode) -> ReconcileSummary {
    let targets = next.flatten();
    let live_len = live.node_count();

    let mut summary = ReconcileSummary::default();
    let mut cursor = 0;
    patch_preorder(live, &targets, &mut cursor, &mut summary);

    summary.unmatched = live_len.abs_diff(targets.len());
    if summary.unmatched > 0 {
        warn!(
            live_nodes = live_len,
            next_nodes = targets.len(),
            "reconcile: tree shapes differ, trailing nodes ignored"
        );
    }
    debug!(
        visited = summary.visited,
        text_updates = summary.text_updates,
        attribute_updates = summary.attribute_updates,
        "reconcile: pass complete"
    );
    summary
}

fn patch_preorder(
    node: &mut RenderNode,
    targets: &[&RenderNode],
    cursor: &mut usize,
    summary: &mut ReconcileSummary,
) {
    let Some(target) = targets.get(*cursor).copied() else {
        return;
    };
    let position = *cursor;
    *cursor += 1;
    summary.visited += 1;

    // Deep comparison happens before this node is touched; descendants are
    // still unpatched at this point.
    if *node != *target {
        if !target.has_blank_text() && node.text != target.text {
            trace!(position, tag = %node.tag, "reconcile: text");
            node.text.clone_from(&target.text);
            summary.text_updates += 1;
        }

        for (name, value) in &target.attributes {
            if node.attributes.get(name) != Some(value) {
                trace!(position, tag = %node.tag, attribute = %name, "reconcile: attribute");
                node.attributes.insert(name.clone(), value.clone());
                summary.attribute_updates += 1;
            }
        }
    }

    for child in &mut node.children {
        patch_preorder(child, targets, cursor, summary);
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
