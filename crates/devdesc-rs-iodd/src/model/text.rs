// crates/devdesc-rs-iodd/src/model/text.rs

//! Contains model structs related to `<ExternalTextCollection>`.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<Text id=".." value=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Text {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@value", default)]
    pub value: String,
}

/// `<PrimaryLanguage xml:lang="..">` or `<Language xml:lang="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct LanguageBlock {
    #[serde(rename = "@xml:lang", default)]
    pub lang: String,
    #[serde(rename = "Text", default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<Text>,
}

/// `<ExternalTextCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ExternalTextCollection {
    #[serde(rename = "PrimaryLanguage", default, skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<LanguageBlock>,
    #[serde(rename = "Language", default, skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<LanguageBlock>,
}
