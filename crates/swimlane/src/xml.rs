//! Owned XML element tree.
//!
//! The logical builder and the diagram assembler produce [`Element`] trees,
//! the normalizer rewrites them and the exporter serializes them. Attributes
//! keep insertion order so serialization is deterministic.

/// A single XML element with ordered attributes, optional text and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with no attributes or content.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends an attribute. Callers are responsible for not repeating a key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Sets the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the value of attribute `key`.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Returns the first direct child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Iterates this element and all of its descendants in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`Element::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("definitions")
            .with_attr("id", "Definitions_1")
            .with_child(
                Element::new("process")
                    .with_attr("id", "Process_1")
                    .with_child(Element::new("startEvent").with_attr("id", "A"))
                    .with_child(Element::new("endEvent").with_attr("id", "B")),
            )
            .with_child(Element::new("collaboration").with_attr("id", "C"))
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let element = Element::new("bounds")
            .with_attr("x", 10)
            .with_attr("y", 20)
            .with_attr("width", 40);
        let keys: Vec<_> = element.attributes().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["x", "y", "width"]);
        assert_eq!(element.attr("y"), Some("20"));
        assert_eq!(element.attr("height"), None);
    }

    #[test]
    fn test_descendants_in_document_order() {
        let root = sample();
        let names: Vec<_> = root.descendants().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec!["definitions", "process", "startEvent", "endEvent", "collaboration"]
        );
    }

    #[test]
    fn test_child_lookup() {
        let root = sample();
        assert_eq!(root.child("collaboration").and_then(|c| c.attr("id")), Some("C"));
        assert!(root.child("laneSet").is_none());
    }
}
