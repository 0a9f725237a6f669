//! # In-memory Document
//!
//! A minimal element tree standing in for the browser DOM. Elements are built with a plain
//! builder and mounted into a [`Document`], whose top level always ends with the `#bottom`
//! sentinel that new nodes are inserted in front of.

use std::fmt::Write;

/// Id of the sentinel element that closes the document body.
pub const BOTTOM_ID: &str = "bottom";

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img"];

/// A single element with attributes, optional text and children.
///
/// ```rust
/// use person_sync::client::dom::Element;
///
/// let heading = Element::new("h2").with_id("title").with_text("Name: Ana");
/// assert_eq!(heading.to_html(), r#"<h2 id="title">Name: Ana</h2>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, keeping its original position if it already exists.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    /// Depth-first search for the element with `id`, including `self`.
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Text of this element and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            let _ = write!(out, r#" id="{}""#, escape(id));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, r#" {}="{}""#, name, escape(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The document body: a flat list of top-level nodes ending in `#bottom`.
///
/// Only top-level nodes are mounted, replaced and removed; lookups by id and input
/// state reach into descendants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    body: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            body: vec![Element::new("div").with_id(BOTTOM_ID)],
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds an element anywhere in the document.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.body.iter().find_map(|node| node.find(id))
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.iter_mut().find_map(|node| node.find_mut(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Index of the top-level node with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.body.iter().position(|node| node.id() == Some(id))
    }

    /// Swaps the top-level node with `id` for `element`, keeping its position.
    /// Returns `false` when there is no such node.
    pub fn replace(&mut self, id: &str, element: Element) -> bool {
        match self.position(id) {
            Some(index) => {
                self.body[index] = element;
                true
            }
            None => false,
        }
    }

    /// Mounts `element` directly in front of `#bottom`, or at the end when the sentinel
    /// has been removed.
    pub fn insert_before_bottom(&mut self, element: Element) {
        match self.position(BOTTOM_ID) {
            Some(index) => self.body.insert(index, element),
            None => self.body.push(element),
        }
    }

    /// Detaches the top-level node with `id`.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.body.remove(index))
    }

    /// Sets the `value` of an input, as if the user had typed it.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(input) => {
                input.set_attr("value", value);
                true
            }
            None => false,
        }
    }

    /// Ticks or clears a checkbox.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.get_mut(id) {
            Some(input) => {
                if checked {
                    input.set_attr("checked", "checked");
                } else {
                    input.remove_attr("checked");
                }
                true
            }
            None => false,
        }
    }

    pub fn input_value(&self, id: &str) -> Option<&str> {
        self.get(id).map(|input| input.attr("value").unwrap_or(""))
    }

    pub fn is_checked(&self, id: &str) -> Option<bool> {
        self.get(id).map(|input| input.attr("checked").is_some())
    }

    /// Ids of the top-level nodes, in document order.
    pub fn keys(&self) -> Vec<&str> {
        self.body.iter().filter_map(Element::id).collect()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.body {
            node.write_html(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_land_before_bottom() {
        let mut doc = Document::new();
        doc.insert_before_bottom(Element::new("p").with_id("a"));
        doc.insert_before_bottom(Element::new("p").with_id("b"));

        assert_eq!(doc.keys(), vec!["a", "b", BOTTOM_ID]);
    }

    #[test]
    fn replace_keeps_position() {
        let mut doc = Document::new();
        doc.insert_before_bottom(Element::new("p").with_id("a"));
        doc.insert_before_bottom(Element::new("p").with_id("b"));

        assert!(doc.replace("a", Element::new("form").with_id("a")));
        assert_eq!(doc.position("a"), Some(0));
        assert_eq!(doc.get("a").map(Element::tag), Some("form"));
        assert!(!doc.replace("missing", Element::new("p")));
    }

    #[test]
    fn inputs_are_reachable_inside_forms() {
        let mut doc = Document::new();
        doc.insert_before_bottom(
            Element::new("form")
                .with_id("f")
                .with_child(Element::new("input").with_id("f-name").with_attr("value", "Ana"))
                .with_child(Element::new("input").with_id("f-active")),
        );

        assert_eq!(doc.input_value("f-name"), Some("Ana"));
        assert!(doc.set_value("f-name", "Bo"));
        assert_eq!(doc.input_value("f-name"), Some("Bo"));

        assert_eq!(doc.is_checked("f-active"), Some(false));
        doc.set_checked("f-active", true);
        assert_eq!(doc.is_checked("f-active"), Some(true));
        assert_eq!(doc.input_value("nope"), None);
    }

    #[test]
    fn html_is_escaped_and_void_tags_unclosed() {
        let element = Element::new("div")
            .with_child(Element::new("p").with_text("<b>Tom & Jerry</b>"))
            .with_child(Element::new("input").with_attr("value", r#"say "hi""#));

        assert_eq!(
            element.to_html(),
            r#"<div><p>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</p><input value="say &quot;hi&quot;"></div>"#
        );
    }
}
