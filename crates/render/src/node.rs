use indexmap::IndexMap;

/// One node of a rendered tree.
///
/// `text` is the node's own text, rendered before its children. Trees are
/// plain owned values; the "live" tree is whichever instance the caller keeps
/// and hands to [`crate::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderNode {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<RenderNode>,
    pub text: Option<String>,
}

impl RenderNode {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    #[must_use]
    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = Some(value.into());
        self
    }

    #[must_use]
    pub fn child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// True when the node carries no text or only whitespace.
    pub fn has_blank_text(&self) -> bool {
        self.text.as_deref().map_or(true, |text| text.trim().is_empty())
    }

    /// All nodes of the tree in pre-order, starting with `self`.
    pub fn flatten(&self) -> Vec<&RenderNode> {
        let mut out = Vec::with_capacity(self.node_count());
        collect_preorder(self, &mut out);
        out
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::node_count).sum::<usize>()
    }

    /// First node in pre-order carrying `class`.
    pub fn find_by_class(&self, class: &str) -> Option<&RenderNode> {
        self.flatten().into_iter().find(|node| node.has_class(class))
    }

    /// Non-blank text of every visible node, one entry per node, in pre-order.
    /// Subtrees classed `hidden` are skipped.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        collect_text(self, &mut lines);
        lines
    }

    /// HTML-like serialization, mostly useful for debugging output.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        write_markup(self, &mut out);
        out
    }
}

fn collect_preorder<'a>(node: &'a RenderNode, out: &mut Vec<&'a RenderNode>) {
    out.push(node);
    for child in &node.children {
        collect_preorder(child, out);
    }
}

fn collect_text(node: &RenderNode, lines: &mut Vec<String>) {
    if node.has_class("hidden") {
        return;
    }
    if let Some(text) = node.text.as_deref() {
        let text = text.trim();
        if !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    for child in &node.children {
        collect_text(child, lines);
    }
}

fn write_markup(node: &RenderNode, out: &mut String) {
    out.push('<');
    out.push_str(&node.tag);
    for (name, value) in &node.attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out.push('>');
    if let Some(text) = node.text.as_deref() {
        out.push_str(&escape(text));
    }
    for child in &node.children {
        write_markup(child, out);
    }
    out.push_str("</");
    out.push_str(&node.tag);
    out.push('>');
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
