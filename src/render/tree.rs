//! A minimal visual tree.
//!
//! The renderer produces [`Node`]s rather than a string so structure can be inspected
//! (and tested) before it's serialised to HTML for the rasteriser.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub classes: Vec<&'static str>,
    /// Inline style declarations, in insertion order
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "meta", "link"];

impl Element {
    pub fn new(tag: &'static str) -> Element {
        Element {
            tag,
            attributes: Vec::default(),
            classes: Vec::default(),
            style: Vec::default(),
            children: Vec::default(),
        }
    }

    pub fn attr<S: ToString>(mut self, name: &'static str, value: S) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn style<P: ToString, V: ToString>(mut self, property: P, value: V) -> Self {
        self.style.push((property.to_string(), value.to_string()));
        self
    }

    pub fn child<N: Into<Node>>(mut self, child: N) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I: IntoIterator<Item = N>, N: Into<Node>>(mut self, children: I) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text<S: ToString>(mut self, text: S) -> Self {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All matching elements, depth-first, in document order.
    pub fn find_all<F: Fn(&Element) -> bool + Copy>(&self, predicate: F) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a, F: Fn(&Element) -> bool + Copy>(&'a self, predicate: F, found: &mut Vec<&'a Element>) {
        if predicate(self) {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(e) = child {
                e.collect(predicate, found);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);

        if !self.classes.is_empty() {
            let _ = write!(out, r#" class="{}""#, self.classes.join(" "));
        }
        for (name, value) in &self.attributes {
            let _ = write!(
                out,
                r#" {}="{}""#,
                name,
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(p, v)| format!("{p}: {v}"))
                .collect::<Vec<String>>()
                .join("; ");
            let _ = write!(
                out,
                r#" style="{}""#,
                html_escape::encode_double_quoted_attribute(&style)
            );
        }

        if VOID_TAGS.contains(&self.tag) {
            out.push_str("/>");
            return;
        }
        out.push('>');

        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(&html_escape::encode_text(t)),
                Node::Element(e) => e.write_html(out),
            }
        }

        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Lookups used when asserting on rendered trees.
#[cfg(test)]
impl Element {
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// Depth-first search over this element and its descendants.
    pub fn find<F: Fn(&Element) -> bool + Copy>(&self, predicate: F) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(e) => e.find(predicate),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.text_content()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_serialize_to_html() {
        let el = Element::new("p")
            .class("note")
            .attr("data-x", "a\"b")
            .style("color", "#fff")
            .style("font-family", "'Inter', sans-serif")
            .text("Fish & <chips>");
        assert_eq!(
            el.to_html(),
            r#"<p class="note" data-x="a&quot;b" style="color: #fff; font-family: 'Inter', sans-serif">Fish &amp; &lt;chips&gt;</p>"#
        );
    }

    #[test]
    fn void_elements_self_close() {
        let el = Element::new("img").attr("src", "data:image/png;base64,AAAA");
        assert_eq!(el.to_html(), r#"<img src="data:image/png;base64,AAAA"/>"#);
    }

    #[test]
    fn can_query_the_tree() {
        let tree = Element::new("div")
            .child(Element::new("h2").class("title").text("One"))
            .child(Element::new("section").child(Element::new("h2").class("title").text("Two")));
        let titles = tree.find_all(|e| e.has_class("title"));
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[1].text_content(), "Two");
        assert_eq!(tree.text_content(), "OneTwo");
        assert!(tree.find(|e| e.tag == "ul").is_none());
    }
}
