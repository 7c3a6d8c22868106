// crates/devdesc-rs-iodd/src/model/variable.rs

//! Contains model structs related to `<VariableCollection>`.

use super::common::{DatatypeRef, TextRef};
use super::datatype::{Datatype, SingleValue, ValueRange};
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<RecordItemInfo subindex=".." defaultValue=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct RecordItemInfo {
    #[serde(rename = "@subindex")]
    pub subindex: String,
    #[serde(rename = "@defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(
        rename = "@excludedFromDataStorage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded_from_data_storage: Option<String>,
    #[serde(
        rename = "@modifiesOtherVariables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modifies_other_variables: Option<String>,
}

/// Children of a `<Variable>` or `<DirectParameterOverlay>`, in document order.
///
/// Kept as one ordered list so the resolver can tell which of `Datatype` and
/// `DatatypeRef` came first when a file carries both.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum VariableChild {
    Datatype(Datatype),
    DatatypeRef(DatatypeRef),
    RecordItemInfo(RecordItemInfo),
    Name(TextRef),
    Description(TextRef),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// A `<Variable>` (also used for `<DirectParameterOverlay>`, whose `index`
/// is optional).
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Variable {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(rename = "@accessRights", default, skip_serializing_if = "Option::is_none")]
    pub access_rights: Option<String>,
    #[serde(rename = "@defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(rename = "@dynamic", default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<String>,
    #[serde(
        rename = "@modifiesOtherVariables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub modifies_other_variables: Option<String>,
    #[serde(
        rename = "@excludedFromDataStorage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded_from_data_storage: Option<String>,

    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<VariableChild>,
}

/// `<StdSingleValueRef value=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdSingleValueRef {
    #[serde(rename = "@value")]
    pub value: String,
}

/// `<StdValueRangeRef lowerValue=".." upperValue=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdValueRangeRef {
    #[serde(rename = "@lowerValue")]
    pub lower_value: String,
    #[serde(rename = "@upperValue")]
    pub upper_value: String,
}

/// `<StdRecordItemRef subindex=".." defaultValue=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdRecordItemRef {
    #[serde(rename = "@subindex")]
    pub subindex: String,
    #[serde(rename = "@defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(
        rename = "@excludedFromDataStorage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded_from_data_storage: Option<String>,
}

/// Children of a `<StdVariableRef>`, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum StdVariableRefChild {
    StdSingleValueRef(StdSingleValueRef),
    SingleValue(SingleValue),
    ValueRange(ValueRange),
    StdValueRangeRef(StdValueRangeRef),
    StdRecordItemRef(StdRecordItemRef),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// A `<StdVariableRef>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdVariableRef {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(
        rename = "@fixedLengthRestriction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_length_restriction: Option<String>,
    #[serde(
        rename = "@excludedFromDataStorage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excluded_from_data_storage: Option<String>,

    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<StdVariableRefChild>,
}

/// Members of `<VariableCollection>`, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum VariableCollectionItem {
    StdVariableRef(StdVariableRef),
    Variable(Variable),
    DirectParameterOverlay(Variable),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// `<VariableCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct VariableCollection {
    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<VariableCollectionItem>,
}
