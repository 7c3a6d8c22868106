// crates/devdesc-rs/src/eds/value.rs

//! Field values of EDS entries and integer literals that echo their spelling.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One comma-separated field of an EDS entry value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdsValue {
    /// Nothing between two commas.
    #[default]
    Empty,
    /// A quoted string. Adjacent literals are already concatenated.
    Quoted(String),
    /// Unquoted text (numbers, keywords, paths).
    Token(String),
    /// A braced group `{ a, b }`.
    Group(Vec<EdsValue>),
}

impl EdsValue {
    pub fn quoted(s: impl Into<String>) -> Self {
        EdsValue::Quoted(s.into())
    }

    pub fn token(s: impl Into<String>) -> Self {
        EdsValue::Token(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, EdsValue::Empty)
    }

    /// The text of a quoted or unquoted field.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EdsValue::Quoted(s) | EdsValue::Token(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The integer value of an unquoted numeric field.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EdsValue::Token(s) => IntLiteral::parse(s).map(|l| l.value),
            _ => None,
        }
    }

    /// The literal form of an unquoted numeric field.
    pub fn as_literal(&self) -> Option<IntLiteral> {
        match self {
            EdsValue::Token(s) => IntLiteral::parse(s),
            _ => None,
        }
    }
}

impl fmt::Display for EdsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdsValue::Empty => Ok(()),
            EdsValue::Quoted(s) => write!(f, "\"{}\"", s),
            EdsValue::Token(s) => f.write_str(s),
            EdsValue::Group(items) => {
                f.write_str("{")?;
                write_fields(f, items)?;
                f.write_str("}")
            }
        }
    }
}

/// Writes fields separated by `,`.
pub fn write_fields(f: &mut impl fmt::Write, fields: &[EdsValue]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", field)?;
    }
    Ok(())
}

/// Canonical text of a field list (fields joined by `,`).
///
/// Two entries with the same normalized value are equal regardless of the
/// whitespace and line breaks in their source.
pub fn normalized_value(fields: &[EdsValue]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_fields(&mut out, fields);
    out
}

/// How an integer was spelled in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntForm {
    Decimal,
    Hex {
        /// Number of hex digits after the prefix, including leading zeros.
        digits: u8,
        uppercase: bool,
        upper_prefix: bool,
    },
}

/// An integer together with the spelling it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntLiteral {
    pub value: i64,
    pub form: IntForm,
}

impl IntLiteral {
    pub fn decimal(value: i64) -> Self {
        Self {
            value,
            form: IntForm::Decimal,
        }
    }

    /// Parses a decimal (`128`, `-3`) or hex (`0x00FF`) literal.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if hex.is_empty() || hex.len() > 16 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let value = u64::from_str_radix(hex, 16).ok()? as i64;
            let uppercase = !hex.bytes().any(|b| b.is_ascii_lowercase());
            return Some(Self {
                value,
                form: IntForm::Hex {
                    digits: hex.len() as u8,
                    uppercase,
                    upper_prefix: s.starts_with("0X"),
                },
            });
        }
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<i64>().ok().map(Self::decimal)
    }

    pub fn to_value(&self) -> EdsValue {
        EdsValue::Token(format!("{}", self))
    }
}

impl fmt::Display for IntLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.form {
            IntForm::Decimal => write!(f, "{}", self.value),
            IntForm::Hex {
                digits,
                uppercase,
                upper_prefix,
            } => {
                let prefix = if upper_prefix { "0X" } else { "0x" };
                let width = digits as usize;
                if uppercase {
                    write!(f, "{}{:0width$X}", prefix, self.value as u64, width = width)
                } else {
                    write!(f, "{}{:0width$x}", prefix, self.value as u64, width = width)
                }
            }
        }
    }
}

/// A raw `key = fields;` entry kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsEntry {
    pub key: String,
    pub fields: Vec<EdsValue>,
    pub order_index: u32,
}

impl EdsEntry {
    pub fn new(key: impl Into<String>, fields: Vec<EdsValue>, order_index: u32) -> Self {
        Self {
            key: key.into(),
            fields,
            order_index,
        }
    }

    pub fn normalized_value(&self) -> String {
        normalized_value(&self.fields)
    }
}
