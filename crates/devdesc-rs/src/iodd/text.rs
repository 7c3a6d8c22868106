// crates/devdesc-rs/src/iodd/text.rs

//! The multi-language text table (`ExternalTextCollection`).

use crate::ids::TextId;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One `PrimaryLanguage` or `Language` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageBlock {
    /// Value of `xml:lang`.
    pub code: String,
    /// Position of this block inside `ExternalTextCollection`.
    pub language_order: u32,
    /// True for the `PrimaryLanguage` block.
    pub is_primary: bool,
}

/// A single `(text_id, language) -> value` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    pub text_id: TextId,
    pub language: String,
    pub value: String,
    /// Position of the `<Text>` element inside its language block.
    pub xml_order: u32,
}

/// Ordered text table. Blocks keep their source order via `language_order`
/// and entries keep their per-block source order via `xml_order`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextTable {
    pub languages: Vec<LanguageBlock>,
    pub entries: Vec<TextEntry>,
}

impl TextTable {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty() && self.entries.is_empty()
    }

    /// The primary language code, if a `PrimaryLanguage` block was present.
    pub fn primary_language(&self) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.is_primary)
            .map(|l| l.code.as_str())
    }

    /// Looks up a text in a specific language.
    pub fn lookup(&self, text_id: &TextId, language: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.text_id == text_id && e.language == language)
            .map(|e| e.value.as_str())
    }

    /// Looks up a text in the primary language.
    pub fn lookup_primary(&self, text_id: &TextId) -> Option<&str> {
        self.primary_language()
            .and_then(|lang| self.lookup(text_id, lang))
    }

    /// True if `text_id` exists in any language block.
    pub fn contains(&self, text_id: &TextId) -> bool {
        self.entries.iter().any(|e| &e.text_id == text_id)
    }

    /// Entries of one language block, sorted by `xml_order`.
    pub fn entries_for<'a>(&'a self, language: &str) -> Vec<&'a TextEntry> {
        let mut entries: Vec<&TextEntry> = self
            .entries
            .iter()
            .filter(|e| e.language == language)
            .collect();
        entries.sort_by_key(|e| e.xml_order);
        entries
    }

    /// Language blocks sorted by `language_order`.
    pub fn ordered_languages(&self) -> Vec<&LanguageBlock> {
        let mut blocks: Vec<&LanguageBlock> = self.languages.iter().collect();
        blocks.sort_by_key(|b| b.language_order);
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn table() -> TextTable {
        TextTable {
            languages: vec![
                LanguageBlock {
                    code: "en".to_string(),
                    language_order: 0,
                    is_primary: true,
                },
                LanguageBlock {
                    code: "de".to_string(),
                    language_order: 1,
                    is_primary: false,
                },
            ],
            entries: vec![
                TextEntry {
                    text_id: TextId::from("TI_B"),
                    language: "en".to_string(),
                    value: "Bee".to_string(),
                    xml_order: 1,
                },
                TextEntry {
                    text_id: TextId::from("TI_A"),
                    language: "en".to_string(),
                    value: "Ay".to_string(),
                    xml_order: 0,
                },
                TextEntry {
                    text_id: TextId::from("TI_A"),
                    language: "de".to_string(),
                    value: "Ah".to_string(),
                    xml_order: 0,
                },
            ],
        }
    }

    #[test]
    fn test_lookup_by_language() {
        let t = table();
        assert_eq!(t.primary_language(), Some("en"));
        assert_eq!(t.lookup(&TextId::from("TI_A"), "de"), Some("Ah"));
        assert_eq!(t.lookup_primary(&TextId::from("TI_A")), Some("Ay"));
        assert_eq!(t.lookup(&TextId::from("TI_B"), "de"), None);
        assert!(t.contains(&TextId::from("TI_B")));
        assert!(!t.contains(&TextId::from("TI_C")));
    }

    #[test]
    fn test_entries_for_follow_xml_order() {
        let t = table();
        let ids: Vec<&str> = t.entries_for("en").iter().map(|e| e.text_id.as_str()).collect();
        assert_eq!(ids, vec!["TI_A", "TI_B"]);
    }
}
