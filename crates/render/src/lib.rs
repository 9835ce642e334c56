//! Rendered trees and in-place reconciliation.
//!
//! Views turn data into [`RenderNode`] trees. The first render mounts a tree;
//! later updates hand a freshly generated tree to [`reconcile`], which patches
//! the mounted one instead of replacing it.

pub mod node;
pub mod reconcile;
pub mod view;

pub use node::RenderNode;
pub use reconcile::{reconcile, ReconcileSummary};
pub use view::{
    icon, markup, render, render_error, render_spinner, render_success, render_view_error,
    render_view_success, update, Mount, View,
};
