// crates/devdesc-rs-iodd/src/model/diagnosis.rs

//! Contains model structs for `<ErrorTypeCollection>` and `<EventCollection>`.

use super::common::TextRef;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<StdErrorTypeRef code=".." additionalCode=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdErrorTypeRef {
    #[serde(rename = "@code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "@additionalCode", default)]
    pub additional_code: String,
}

/// A vendor `<ErrorType>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ErrorType {
    #[serde(rename = "@code", default)]
    pub code: String,
    #[serde(rename = "@additionalCode", default)]
    pub additional_code: String,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextRef>,
}

/// Members of `<ErrorTypeCollection>`, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum ErrorTypeItem {
    StdErrorTypeRef(StdErrorTypeRef),
    ErrorType(ErrorType),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// `<ErrorTypeCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ErrorTypeCollection {
    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ErrorTypeItem>,
}

/// `<StdEventRef code=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct StdEventRef {
    #[serde(rename = "@code", default)]
    pub code: String,
}

/// A vendor `<Event>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Event {
    #[serde(rename = "@code", default)]
    pub code: String,
    #[serde(rename = "@type", default)]
    pub event_type: String,
    #[serde(rename = "@mode", default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextRef>,
}

/// Members of `<EventCollection>`, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum EventItem {
    StdEventRef(StdEventRef),
    Event(Event),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// `<EventCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct EventCollection {
    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<EventItem>,
}
