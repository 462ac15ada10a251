//! XML serialization.
//!
//! Writes an [`Element`] tree as pretty-printed XML with a declaration,
//! attributes in insertion order and self-closing tags for elements without
//! content. The same tree always produces the same bytes.

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{error::CompileError, xml::Element};

/// Serializes `root` with `indent` spaces per nesting level.
///
/// # Errors
///
/// Returns [`CompileError::Export`] if the writer fails. Writing into memory
/// only fails for trees that cannot be represented as XML.
pub fn to_xml(root: &Element, indent: usize) -> Result<String, CompileError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', indent);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| CompileError::Export(e.to_string()))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(|e| CompileError::Export(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), CompileError> {
    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children().is_empty() && element.text().is_none() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| CompileError::Export(e.to_string()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| CompileError::Export(e.to_string()))?;
    if let Some(text) = element.text() {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| CompileError::Export(e.to_string()))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name())))
        .map_err(|e| CompileError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("definitions")
            .with_attr("id", "Definitions_1")
            .with_attr("exporter", "swimlane")
            .with_child(
                Element::new("process").with_attr("id", "Process_1").with_child(
                    Element::new("task")
                        .with_attr("id", "Task_1")
                        .with_attr("name", "Check <stock> & \"ship\"")
                        .with_child(Element::new("incoming").with_text("Flow_1")),
                ),
            )
            .with_child(Element::new("messageEventDefinition"))
    }

    #[test]
    fn test_pretty_layout() {
        let xml = to_xml(&sample(), 4).unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<definitions id=\"Definitions_1\" exporter=\"swimlane\">\n",
            "    <process id=\"Process_1\">\n",
            "        <task id=\"Task_1\" name=\"Check &lt;stock&gt; &amp; &quot;ship&quot;\">\n",
            "            <incoming>Flow_1</incoming>\n",
            "        </task>\n",
            "    </process>\n",
            "    <messageEventDefinition/>\n",
            "</definitions>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let tree = sample();
        assert_eq!(to_xml(&tree, 2).unwrap(), to_xml(&tree.clone(), 2).unwrap());
    }

    #[test]
    fn test_output_parses_back() {
        let xml = to_xml(&sample(), 4).unwrap();
        let document = roxmltree::Document::parse(&xml).unwrap();

        let task = document
            .descendants()
            .find(|n| n.has_tag_name("task"))
            .unwrap();
        assert_eq!(task.attribute("name"), Some("Check <stock> & \"ship\""));
        assert_eq!(
            task.first_element_child().and_then(|n| n.text()),
            Some("Flow_1")
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let element = Element::new("documentation").with_text("a < b && c");
        let xml = to_xml(&element, 0).unwrap();
        assert!(xml.contains("<documentation>a &lt; b &amp;&amp; c</documentation>"));
    }
}
