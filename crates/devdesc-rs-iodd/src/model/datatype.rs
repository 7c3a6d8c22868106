// crates/devdesc-rs-iodd/src/model/datatype.rs

//! Contains model structs for `<Datatype>`, `<SimpleDatatype>` and their children.

use super::common::{DatatypeRef, TextRef};
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<SingleValue value=".."><Name textId=".."/></SingleValue>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct SingleValue {
    #[serde(rename = "@value")]
    pub value: String,
    #[serde(
        rename(serialize = "@xsi:type", deserialize = "@type"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
}

/// `<ValueRange lowerValue=".." upperValue="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ValueRange {
    #[serde(rename = "@lowerValue")]
    pub lower_value: String,
    #[serde(rename = "@upperValue")]
    pub upper_value: String,
    #[serde(
        rename(serialize = "@xsi:type", deserialize = "@type"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
}

/// A `<RecordItem>` of a `RecordT`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct RecordItem {
    #[serde(rename = "@subindex")]
    pub subindex: String,
    #[serde(rename = "@bitOffset")]
    pub bit_offset: String,
    #[serde(
        rename = "@accessRightRestriction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_right_restriction: Option<String>,

    #[serde(rename = "SimpleDatatype", default, skip_serializing_if = "Option::is_none")]
    pub simple_datatype: Option<Datatype>,
    #[serde(rename = "DatatypeRef", default, skip_serializing_if = "Option::is_none")]
    pub datatype_ref: Option<DatatypeRef>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextRef>,
}

/// The children of a datatype element, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum DatatypeChild {
    SingleValue(SingleValue),
    ValueRange(ValueRange),
    RecordItem(RecordItem),
    /// Element type of an `ArrayT`.
    SimpleDatatype(Datatype),
    /// Referenced element type of an `ArrayT`.
    DatatypeRef(DatatypeRef),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// A `<Datatype>` (inline or in `DatatypeCollection`) or `<SimpleDatatype>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Datatype {
    /// Only set inside `DatatypeCollection`.
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename(serialize = "@xsi:type", deserialize = "@type"), default)]
    pub xsi_type: String,
    #[serde(rename = "@bitLength", default, skip_serializing_if = "Option::is_none")]
    pub bit_length: Option<String>,
    #[serde(rename = "@fixedLength", default, skip_serializing_if = "Option::is_none")]
    pub fixed_length: Option<String>,
    #[serde(rename = "@count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(rename = "@encoding", default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    #[serde(
        rename = "@subindexAccessSupported",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subindex_access_supported: Option<String>,

    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DatatypeChild>,
}

/// `<DatatypeCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DatatypeCollection {
    #[serde(rename = "Datatype", default, skip_serializing_if = "Vec::is_empty")]
    pub datatype: Vec<Datatype>,
}
