// crates/devdesc-rs-iodd/src/model/common.rs

//! Small element shapes shared across the IODD schema.

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// An element whose only content is a `textId` reference, e.g.
/// `<Name textId="TI_Name"/>`, `<Description textId=".."/>`, `<VendorText textId=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct TextRef {
    #[serde(rename = "@textId")]
    pub text_id: String,
}

impl TextRef {
    pub fn new(text_id: &str) -> Self {
        Self {
            text_id: String::from(text_id),
        }
    }
}

/// An element whose only content is a `menuId` reference
/// (role menu set entries).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct MenuIdRef {
    #[serde(rename = "@menuId")]
    pub menu_id: String,
}

/// `<DatatypeRef datatypeId=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DatatypeRef {
    #[serde(rename = "@datatypeId")]
    pub datatype_id: String,
}

/// `<Condition variableId=".." subindex=".." value=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Condition {
    #[serde(rename = "@variableId")]
    pub variable_id: String,
    #[serde(rename = "@subindex", default, skip_serializing_if = "Option::is_none")]
    pub subindex: Option<String>,
    #[serde(rename = "@value")]
    pub value: String,
}
