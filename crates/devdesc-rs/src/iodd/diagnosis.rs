// crates/devdesc-rs/src/iodd/diagnosis.rs

//! Error types and events (`ErrorTypeCollection`, `EventCollection`).

use crate::ids::TextId;
use crate::lexical::Lexical;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// `StdErrorTypeRef code=".." additionalCode=".."`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdErrorTypeRef {
    pub code: Option<Lexical<u16>>,
    pub additional_code: Lexical<u16>,
    pub order_index: u32,
}

/// A vendor-specific `ErrorType`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorType {
    pub code: Lexical<u16>,
    pub additional_code: Lexical<u16>,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// One entry of `ErrorTypeCollection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorTypeEntry {
    Standard(StdErrorTypeRef),
    Custom(ErrorType),
}

impl ErrorTypeEntry {
    pub fn order_index(&self) -> u32 {
        match self {
            ErrorTypeEntry::Standard(e) => e.order_index,
            ErrorTypeEntry::Custom(e) => e.order_index,
        }
    }
}

/// Event class (`type` attribute).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Notification,
    Warning,
    Error,
    Other(String),
}

impl EventType {
    pub fn parse(s: &str) -> Self {
        match s {
            "Notification" => Self::Notification,
            "Warning" => Self::Warning,
            "Error" => Self::Error,
            other => Self::Other(String::from(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Notification => "Notification",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `StdEventRef code=".."`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdEventRef {
    pub code: Lexical<u16>,
    pub order_index: u32,
}

/// A vendor-specific `Event`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub code: Lexical<u16>,
    pub event_type: EventType,
    pub mode: Option<String>,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// One entry of `EventCollection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventEntry {
    Standard(StdEventRef),
    Custom(Event),
}

impl EventEntry {
    pub fn code(&self) -> u16 {
        match self {
            EventEntry::Standard(e) => e.code.get(),
            EventEntry::Custom(e) => e.code.get(),
        }
    }

    pub fn order_index(&self) -> u32 {
        match self {
            EventEntry::Standard(e) => e.order_index,
            EventEntry::Custom(e) => e.order_index,
        }
    }
}
