// crates/devdesc-rs-iodd/src/model/process_data.rs

//! Contains model structs related to `<ProcessDataCollection>`.

use super::common::{Condition, DatatypeRef, TextRef};
use super::datatype::Datatype;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<ProcessDataIn>` / `<ProcessDataOut>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessDataItem {
    #[serde(rename = "@id", default)]
    pub id: String,
    #[serde(rename = "@bitLength", default)]
    pub bit_length: String,

    #[serde(rename = "Datatype", default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Datatype>,
    #[serde(rename = "DatatypeRef", default, skip_serializing_if = "Option::is_none")]
    pub datatype_ref: Option<DatatypeRef>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
}

/// A `<ProcessData>` entry.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessData {
    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(rename = "ProcessDataIn", default, skip_serializing_if = "Option::is_none")]
    pub process_data_in: Option<ProcessDataItem>,
    #[serde(rename = "ProcessDataOut", default, skip_serializing_if = "Option::is_none")]
    pub process_data_out: Option<ProcessDataItem>,
}

/// `<ProcessDataCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessDataCollection {
    #[serde(rename = "ProcessData", default, skip_serializing_if = "Vec::is_empty")]
    pub process_data: Vec<ProcessData>,
}
