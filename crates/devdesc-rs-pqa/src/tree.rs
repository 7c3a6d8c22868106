// crates/devdesc-rs-pqa/src/tree.rs

//! Generic element trees for the structural diff.
//!
//! XML documents are read with the `quick-xml` event reader. EDS files are
//! read with the EDS lexer: the root holds one node per section and every
//! section holds one node per entry, whose text is the normalized value.
//! Comments, processing instructions and formatting whitespace are not part
//! of the tree.

use crate::diff::{DiffError, Side};
use devdesc_rs::FileType;
use devdesc_rs::eds::normalized_value;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};

/// Name of the synthetic root of an EDS tree.
pub const EDS_ROOT: &str = "EDS";

/// One element (XML) or section/entry (EDS).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Trimmed text content, `None` when empty.
    pub text: Option<String>,
    pub children: Vec<Node>,
    /// 1-based source line of the start tag or key.
    pub line: u32,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Size of the subtree rooted at this node.
    pub fn extent(&self) -> Extent {
        let mut extent = Extent {
            elements: 1,
            attributes: self.attributes.len() as u32,
            values: u32::from(self.text.is_some()),
        };
        for child in &self.children {
            extent += child.extent();
        }
        extent
    }
}

/// Element, attribute and value totals of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub elements: u32,
    pub attributes: u32,
    pub values: u32,
}

impl Extent {
    pub const ATTRIBUTE: Extent = Extent {
        elements: 0,
        attributes: 1,
        values: 0,
    };
    pub const VALUE: Extent = Extent {
        elements: 0,
        attributes: 0,
        values: 1,
    };

    pub fn total(&self) -> u32 {
        self.elements + self.attributes + self.values
    }
}

impl std::ops::AddAssign for Extent {
    fn add_assign(&mut self, other: Extent) {
        self.elements += other.elements;
        self.attributes += other.attributes;
        self.values += other.values;
    }
}

/// Node totals of a whole document, with a per-group breakdown.
///
/// Groups are the IODD feature phases or the EDS sections; see
/// [`crate::criticality::group_of`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCounts {
    pub elements: u32,
    pub attributes: u32,
    pub values: u32,
    /// `(group, elements + attributes + values)` in first-seen order.
    pub groups: Vec<(String, u32)>,
}

impl NodeCounts {
    pub fn of(file_type: FileType, root: &Node) -> Self {
        let mut counts = NodeCounts::default();
        let mut path = Vec::new();
        counts.visit(file_type, root, &mut path);
        counts
    }

    pub fn group(&self, name: &str) -> u32 {
        self.groups
            .iter()
            .find(|(g, _)| g == name)
            .map_or(0, |(_, n)| *n)
    }

    fn visit<'a>(&mut self, file_type: FileType, node: &'a Node, path: &mut Vec<&'a str>) {
        path.push(node.name.as_str());
        self.elements += 1;
        self.values += u32::from(node.text.is_some());
        self.attributes += node.attributes.len() as u32;

        let element_group = crate::criticality::group_of(file_type, path, None);
        self.bump(element_group, 1 + u32::from(node.text.is_some()));
        for (name, _) in &node.attributes {
            let group = crate::criticality::group_of(file_type, path, Some(name.as_str()));
            self.bump(group, 1);
        }
        for child in &node.children {
            self.visit(file_type, child, path);
        }
        path.pop();
    }

    fn bump(&mut self, group: Option<String>, n: u32) {
        let Some(group) = group else { return };
        match self.groups.iter_mut().find(|(g, _)| *g == group) {
            Some((_, count)) => *count += n,
            None => self.groups.push((group, n)),
        }
    }
}

/// Parses a document of either format into a tree.
pub fn parse_document(file_type: FileType, text: &str, side: Side) -> Result<Node, DiffError> {
    match file_type {
        FileType::Iodd => parse_xml(text, side),
        FileType::Eds => Ok(parse_eds(text)),
    }
}

/// Reads an XML document into a tree rooted at its document element.
pub fn parse_xml(text: &str, side: Side) -> Result<Node, DiffError> {
    let mut reader = Reader::from_str(text);
    let lines = LineIndex::new(text);

    // Open elements; the last one receives children and text.
    let mut stack: Vec<(Node, String)> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| DiffError::Xml {
            side,
            position: reader.buffer_position() as usize,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let node = start_node(&e, lines.line_of(position), side, position)?;
                stack.push((node, String::new()));
            }
            Event::Empty(e) => {
                let node = start_node(&e, lines.line_of(position), side, position)?;
                attach(&mut stack, &mut root, node, side, position)?;
            }
            Event::End(_) => {
                let Some((mut node, raw_text)) = stack.pop() else {
                    return Err(DiffError::Xml {
                        side,
                        position,
                        message: "unexpected closing tag".to_string(),
                    });
                };
                node.text = finish_text(&raw_text);
                attach(&mut stack, &mut root, node, side, position)?;
            }
            Event::Text(e) => {
                if let Some((_, raw_text)) = stack.last_mut() {
                    raw_text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::CData(e) => {
                if let Some((_, raw_text)) = stack.last_mut() {
                    // CDATA content is literal; escape it so unescaping restores it.
                    let literal = String::from_utf8_lossy(&e);
                    raw_text.push_str(&quick_xml::escape::escape(&*literal));
                }
            }
            Event::GeneralRef(r) => {
                if let Some((_, raw_text)) = stack.last_mut() {
                    raw_text.push('&');
                    raw_text.push_str(&String::from_utf8_lossy(&r));
                    raw_text.push(';');
                }
            }
            Event::Eof => break,
            // Declaration, comments, processing instructions, doctype.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(DiffError::Xml {
            side,
            position: text.len(),
            message: format!("{} element(s) not closed", stack.len()),
        });
    }
    root.ok_or(DiffError::Empty { side })
}

fn start_node(e: &BytesStart<'_>, line: u32, side: Side, position: usize) -> Result<Node, DiffError> {
    let mut node = Node::new(String::from_utf8_lossy(e.name().as_ref()));
    node.line = line;
    for attribute in e.attributes() {
        let attribute = attribute.map_err(|err| DiffError::Xml {
            side,
            position,
            message: err.to_string(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw).map_or_else(|_| raw.to_string(), |v| v.into_owned());
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(
    stack: &mut [(Node, String)],
    root: &mut Option<Node>,
    node: Node,
    side: Side,
    position: usize,
) -> Result<(), DiffError> {
    match stack.last_mut() {
        Some((parent, _)) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => {
            return Err(DiffError::Xml {
                side,
                position,
                message: "more than one root element".to_string(),
            });
        }
    }
    Ok(())
}

fn finish_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(unescape(raw).map_or_else(|_| raw.to_string(), |v| v.into_owned()))
}

/// Reads an EDS file into a two-level tree.
///
/// Lexer diagnostics are ignored here; whatever the lexer recovered is
/// compared.
pub fn parse_eds(text: &str) -> Node {
    let lexed = devdesc_rs_eds::lex(text);
    let mut root = Node::new(EDS_ROOT);
    root.line = 1;
    for section in lexed.sections {
        let mut node = Node::new(section.name);
        node.line = section.line;
        for entry in section.entries {
            let mut child = Node::new(entry.key);
            child.text = Some(normalized_value(&entry.fields));
            child.line = entry.line;
            node.children.push(child);
        }
        root.children.push(node);
    }
    root
}

/// Byte offset to line number lookup.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> u32 {
        match self.starts.binary_search(&offset) {
            Ok(i) => i as u32 + 1,
            Err(i) => i as u32,
        }
    }
}
