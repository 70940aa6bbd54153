use std::collections::BTreeMap;

use cv_core::ConversationError;
use roxmltree::{Document, Node, NodeType};

#[derive(Debug, Clone, PartialEq)]
pub struct XmlDocument {
    pub root: XmlElementNode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElementNode),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElementNode {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<XmlNode>,
    pub line: u32,
}

impl XmlElementNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElementNode> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let XmlNode::Text(value) = child {
                out.push_str(value);
            }
        }
        out
    }
}

pub fn parse_xml_document(source: &str) -> Result<XmlDocument, ConversationError> {
    let document = Document::parse(source)
        .map_err(|error| ConversationError::new("PARSE_XML_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(ConversationError::new(
            "PARSE_XML_ERROR",
            "XML document must contain a root element.",
        ));
    };

    Ok(XmlDocument {
        root: parse_element(&document, root),
    })
}

fn parse_element(document: &Document<'_>, node: Node<'_, '_>) -> XmlElementNode {
    let mut attributes = BTreeMap::new();
    for attribute in node.attributes() {
        attributes.insert(attribute.name().to_string(), attribute.value().to_string());
    }

    let mut children = Vec::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => children.push(XmlNode::Element(parse_element(document, child))),
            NodeType::Text => {
                let value = child.text().unwrap_or_default();
                if value.is_empty() {
                    continue;
                }
                children.push(XmlNode::Text(value.to_string()));
            }
            _ => {}
        }
    }

    XmlElementNode {
        name: node.tag_name().name().to_string(),
        attributes,
        children,
        line: document.text_pos_at(node.range().start).row,
    }
}
