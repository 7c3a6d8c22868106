// crates/devdesc-rs-pqa/src/diff.rs

//! Structural diff of an original document against its reconstruction.
//!
//! Both texts become [`Node`] trees that are walked in lockstep. Children
//! are matched by tag name and position among same-name siblings: the Nth
//! `<Text>` of the original is compared with the Nth `<Text>` of the
//! reconstruction, never by value. Unmatched elements are reported as
//! missing or extra as a whole; there is no fuzzy matching.

use crate::criticality::{self, DiffSeverity};
use crate::tree::{self, Extent, Node, NodeCounts};
use devdesc_rs::FileType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a structural difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    MissingElement,
    ExtraElement,
    MissingAttribute,
    ExtraAttribute,
    IncorrectAttribute,
    IncorrectValue,
    /// The `xsi:type` of an element changed.
    TypeChanged,
}

impl DiffType {
    pub const ALL: [DiffType; 7] = [
        DiffType::MissingElement,
        DiffType::ExtraElement,
        DiffType::MissingAttribute,
        DiffType::ExtraAttribute,
        DiffType::IncorrectAttribute,
        DiffType::IncorrectValue,
        DiffType::TypeChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffType::MissingElement => "missing_element",
            DiffType::ExtraElement => "extra_element",
            DiffType::MissingAttribute => "missing_attribute",
            DiffType::ExtraAttribute => "extra_attribute",
            DiffType::IncorrectAttribute => "incorrect_attribute",
            DiffType::IncorrectValue => "incorrect_value",
            DiffType::TypeChanged => "type_changed",
        }
    }

    /// True if the item means original content has no counterpart.
    pub fn is_loss(&self) -> bool {
        matches!(self, DiffType::MissingElement | DiffType::MissingAttribute)
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, DiffType::MissingElement | DiffType::ExtraElement)
    }
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position of a difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub side: Side,
    pub line: u32,
}

/// Which of the two compared documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Original,
    Reconstructed,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => f.write_str("original"),
            Side::Reconstructed => f.write_str("reconstructed"),
        }
    }
}

/// One structural difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffItem {
    pub diff_type: DiffType,
    pub severity: DiffSeverity,
    /// Slash-separated element path. Same-name siblings are disambiguated
    /// with a 1-based `[n]`; attributes end with `/@name`.
    pub path: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub description: String,
    pub span: Option<Span>,
    /// Nodes of the unmatched subtree, or one attribute/value.
    pub extent: Extent,
    /// Feature group (IODD phase or EDS section) the item falls in.
    pub group: Option<String>,
}

/// Result of [`diff_documents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    pub file_type: FileType,
    pub items: Vec<DiffItem>,
    pub original_counts: NodeCounts,
    pub reconstructed_counts: NodeCounts,
}

impl DiffReport {
    pub fn is_identical(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count(&self, diff_type: DiffType) -> usize {
        self.items.iter().filter(|i| i.diff_type == diff_type).count()
    }

    pub fn max_severity(&self) -> Option<DiffSeverity> {
        self.items.iter().map(|i| i.severity).max()
    }
}

/// A document could not be read as a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// Malformed XML.
    Xml {
        side: Side,
        position: usize,
        message: String,
    },
    /// The document has no root element.
    Empty { side: Side },
}

impl fmt::Display for DiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffError::Xml {
                side,
                position,
                message,
            } => write!(f, "{} document is not well-formed at byte {}: {}", side, position, message),
            DiffError::Empty { side } => write!(f, "{} document has no root element", side),
        }
    }
}

impl std::error::Error for DiffError {}

/// Compares an original document with its reconstruction.
pub fn diff_documents(
    file_type: FileType,
    original: &str,
    reconstructed: &str,
) -> Result<DiffReport, DiffError> {
    let original = tree::parse_document(file_type, original, Side::Original)?;
    let reconstructed = tree::parse_document(file_type, reconstructed, Side::Reconstructed)?;
    let items = diff_trees(file_type, &original, &reconstructed);
    log::debug!(
        "{} diff: {} items, worst {:?}",
        file_type,
        items.len(),
        items.iter().map(|i| i.severity).max()
    );
    Ok(DiffReport {
        file_type,
        items,
        original_counts: NodeCounts::of(file_type, &original),
        reconstructed_counts: NodeCounts::of(file_type, &reconstructed),
    })
}

/// Compares two trees. Items are in document order of the original.
pub fn diff_trees(file_type: FileType, original: &Node, reconstructed: &Node) -> Vec<DiffItem> {
    let mut walker = Walker {
        file_type,
        names: Vec::new(),
        items: Vec::new(),
    };
    let path = format!("/{}", original.name);
    if original.name != reconstructed.name {
        walker.names.push(original.name.as_str());
        walker.unmatched(DiffType::MissingElement, original, &path);
        walker.names.pop();
        walker.names.push(reconstructed.name.as_str());
        walker.unmatched(
            DiffType::ExtraElement,
            reconstructed,
            &format!("/{}", reconstructed.name),
        );
        walker.names.pop();
    } else {
        walker.matched(original, reconstructed, &path);
    }
    walker.items
}

struct Walker<'a> {
    file_type: FileType,
    /// Element names from the root to the current node.
    names: Vec<&'a str>,
    items: Vec<DiffItem>,
}

impl<'a> Walker<'a> {
    fn matched(&mut self, original: &'a Node, reconstructed: &'a Node, path: &str) {
        self.names.push(original.name.as_str());
        self.attributes(original, reconstructed, path);

        if original.text != reconstructed.text {
            let severity = criticality::value_severity(self.file_type, &self.names);
            self.push(DiffItem {
                diff_type: DiffType::IncorrectValue,
                severity,
                path: path.to_string(),
                expected: original.text.clone(),
                actual: reconstructed.text.clone(),
                description: format!("text of <{}> differs", original.name),
                span: Some(original_span(original)),
                extent: Extent::VALUE,
                group: criticality::group_of(self.file_type, &self.names, None),
            });
        }

        for name in child_names(original, reconstructed) {
            let left: Vec<&Node> = original.children.iter().filter(|c| c.name == name).collect();
            let right: Vec<&Node> = reconstructed.children.iter().filter(|c| c.name == name).collect();
            let indexed = left.len() > 1 || right.len() > 1;

            for i in 0..left.len().max(right.len()) {
                let child_path = if indexed {
                    format!("{}/{}[{}]", path, name, i + 1)
                } else {
                    format!("{}/{}", path, name)
                };
                match (left.get(i), right.get(i)) {
                    (Some(&o), Some(&r)) => self.matched(o, r, &child_path),
                    (Some(&o), None) => {
                        self.names.push(o.name.as_str());
                        self.unmatched(DiffType::MissingElement, o, &child_path);
                        self.names.pop();
                    }
                    (None, Some(&r)) => {
                        self.names.push(r.name.as_str());
                        self.unmatched(DiffType::ExtraElement, r, &child_path);
                        self.names.pop();
                    }
                    (None, None) => {}
                }
            }
        }
        self.names.pop();
    }

    fn attributes(&mut self, original: &Node, reconstructed: &Node, path: &str) {
        for (key, expected) in &original.attributes {
            let attr_path = format!("{}/@{}", path, key);
            let (diff_type, actual, description) = match reconstructed.attribute(key) {
                Some(actual) if actual == expected => continue,
                Some(actual) if key == "xsi:type" => (
                    DiffType::TypeChanged,
                    Some(actual.to_string()),
                    format!("<{}> changed type", original.name),
                ),
                Some(actual) => (
                    DiffType::IncorrectAttribute,
                    Some(actual.to_string()),
                    format!("attribute '{}' of <{}> differs", key, original.name),
                ),
                None => (
                    DiffType::MissingAttribute,
                    None,
                    format!("attribute '{}' of <{}> is missing", key, original.name),
                ),
            };
            self.push(DiffItem {
                diff_type,
                severity: criticality::attribute_severity(self.file_type, key),
                path: attr_path,
                expected: Some(expected.clone()),
                actual,
                description,
                span: Some(original_span(original)),
                extent: Extent::ATTRIBUTE,
                group: criticality::group_of(self.file_type, &self.names, Some(key.as_str())),
            });
        }
        for (key, actual) in &reconstructed.attributes {
            if original.attribute(key).is_some() {
                continue;
            }
            self.push(DiffItem {
                diff_type: DiffType::ExtraAttribute,
                severity: criticality::attribute_severity(self.file_type, key),
                path: format!("{}/@{}", path, key),
                expected: None,
                actual: Some(actual.clone()),
                description: format!("attribute '{}' of <{}> was not in the original", key, original.name),
                span: Some(Span {
                    side: Side::Reconstructed,
                    line: reconstructed.line,
                }),
                extent: Extent::ATTRIBUTE,
                group: criticality::group_of(self.file_type, &self.names, Some(key.as_str())),
            });
        }
    }

    /// Reports a whole unmatched subtree. `names` must already end with `node`.
    fn unmatched(&mut self, diff_type: DiffType, node: &Node, path: &str) {
        let (side, description, expected, actual) = match diff_type {
            DiffType::MissingElement => (
                Side::Original,
                format!("<{}> is missing from the reconstruction", node.name),
                Some(node.name.clone()),
                None,
            ),
            _ => (
                Side::Reconstructed,
                format!("<{}> was not in the original", node.name),
                None,
                Some(node.name.clone()),
            ),
        };
        self.push(DiffItem {
            diff_type,
            severity: criticality::element_severity(self.file_type, &self.names),
            path: path.to_string(),
            expected,
            actual,
            description,
            span: Some(Span {
                side,
                line: node.line,
            }),
            extent: node.extent(),
            group: criticality::group_of(self.file_type, &self.names, None),
        });
    }

    fn push(&mut self, item: DiffItem) {
        log::trace!("{} {} at {}", item.severity, item.diff_type, item.path);
        self.items.push(item);
    }
}

fn original_span(node: &Node) -> Span {
    Span {
        side: Side::Original,
        line: node.line,
    }
}

/// Distinct child names, original order first.
fn child_names<'n>(original: &'n Node, reconstructed: &'n Node) -> Vec<&'n str> {
    let mut names: Vec<&str> = Vec::new();
    for child in original.children.iter().chain(reconstructed.children.iter()) {
        if !names.contains(&child.name.as_str()) {
            names.push(child.name.as_str());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<IODevice xmlns="http://www.io-link.com/IODD/2010/10">
  <ProfileBody>
    <DeviceIdentity vendorId="888" deviceId="1"/>
    <DeviceFunction>
      <Features blockParameter="true"/>
      <VariableCollection>
        <Variable id="V_A" index="64"/>
        <Variable id="V_B" index="65"/>
      </VariableCollection>
    </DeviceFunction>
  </ProfileBody>
</IODevice>
"#;

    #[test]
    fn test_identical_documents_have_no_diff() {
        let report = diff_documents(FileType::Iodd, DOC, DOC).unwrap();
        assert!(report.is_identical());
        assert_eq!(report.original_counts, report.reconstructed_counts);
    }

    #[test]
    fn test_formatting_is_not_a_difference() {
        let compact = DOC.replace("\n", "").replace("  ", "");
        let report = diff_documents(FileType::Iodd, DOC, &compact).unwrap();
        assert!(report.is_identical(), "{:?}", report.items);
    }

    #[test]
    fn test_extra_attribute() {
        let changed = DOC.replace(
            "<Features blockParameter=\"true\"/>",
            "<Features blockParameter=\"true\" dataStorage=\"false\"/>",
        );
        let report = diff_documents(FileType::Iodd, DOC, &changed).unwrap();
        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.diff_type, DiffType::ExtraAttribute);
        assert_eq!(item.severity, DiffSeverity::Medium);
        assert_eq!(
            item.path,
            "/IODevice/ProfileBody/DeviceFunction/Features/@dataStorage"
        );
        assert_eq!(item.actual.as_deref(), Some("false"));
        assert_eq!(item.span.map(|s| s.line), Some(6));
    }

    #[test]
    fn test_positional_matching() {
        let changed = DOC.replace("<Variable id=\"V_B\" index=\"65\"/>\n", "");
        let report = diff_documents(FileType::Iodd, DOC, &changed).unwrap();
        assert_eq!(report.items.len(), 1);
        let item = &report.items[0];
        assert_eq!(item.diff_type, DiffType::MissingElement);
        assert_eq!(item.severity, DiffSeverity::Critical);
        assert_eq!(
            item.path,
            "/IODevice/ProfileBody/DeviceFunction/VariableCollection/Variable[2]"
        );
        assert_eq!(item.extent.elements, 1);
        assert_eq!(item.extent.attributes, 2);

        // Removing the first variable shifts the second into its place.
        let changed = DOC.replace("<Variable id=\"V_A\" index=\"64\"/>\n", "");
        let report = diff_documents(FileType::Iodd, DOC, &changed).unwrap();
        let kinds: Vec<DiffType> = report.items.iter().map(|i| i.diff_type).collect();
        assert_eq!(
            kinds,
            [
                DiffType::IncorrectAttribute,
                DiffType::IncorrectAttribute,
                DiffType::MissingElement
            ]
        );
    }

    #[test]
    fn test_type_changed_and_values() {
        let a = r#"<R xmlns:xsi="x"><D xsi:type="UIntegerT">1</D></R>"#;
        let b = r#"<R xmlns:xsi="x"><D xsi:type="IntegerT">2</D></R>"#;
        let report = diff_documents(FileType::Iodd, a, b).unwrap();
        let kinds: Vec<DiffType> = report.items.iter().map(|i| i.diff_type).collect();
        assert_eq!(kinds, [DiffType::TypeChanged, DiffType::IncorrectValue]);
        assert_eq!(report.items[0].severity, DiffSeverity::Critical);
    }

    #[test]
    fn test_eds_entries() {
        let a = "[File]\nDescText = \"x\";\n[Capacity]\nMaxMsgConnections = 128;\nTSpec1 = TxRx, 32, 1000;\n";
        let b = "[File]\n  DescText = \"x\"; $ same\n[Capacity]\nMaxMsgConnections = 64;\n";
        let report = diff_documents(FileType::Eds, a, b).unwrap();
        assert_eq!(report.items.len(), 2);
        assert_eq!(report.items[0].diff_type, DiffType::IncorrectValue);
        assert_eq!(report.items[0].path, "/EDS/Capacity/MaxMsgConnections");
        assert_eq!(report.items[0].expected.as_deref(), Some("128"));
        assert_eq!(report.items[1].diff_type, DiffType::MissingElement);
        assert_eq!(report.items[1].group.as_deref(), Some("Capacity"));
        assert_eq!(report.items[1].span.map(|s| s.line), Some(5));
    }

    #[test]
    fn test_malformed_reconstruction() {
        let err = diff_documents(FileType::Iodd, DOC, "<IODevice>").unwrap_err();
        assert!(matches!(
            err,
            DiffError::Xml {
                side: Side::Reconstructed,
                ..
            } | DiffError::Empty { .. }
        ));
    }
}
