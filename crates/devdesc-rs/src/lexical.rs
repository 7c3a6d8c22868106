// crates/devdesc-rs/src/lexical.rs

//! Typed attribute values that remember how the source spelled them.
//!
//! `index="0064"` and `blockParameter="1"` parse to `64` and `true`, but a
//! reconstruction must write them back as found. The spelling is kept only
//! when it differs from the canonical form of the value.

use alloc::string::{String, ToString};
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexical<T> {
    pub value: T,
    /// Source text, when it is not `value.to_string()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl<T> Lexical<T> {
    pub fn new(value: T) -> Self {
        Self { value, raw: None }
    }
}

impl<T: Copy> Lexical<T> {
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T: fmt::Display> Lexical<T> {
    /// Pairs a parsed value with the text it came from.
    pub fn parsed(value: T, raw: &str) -> Self {
        let raw = (value.to_string() != raw).then(|| String::from(raw));
        Self { value, raw }
    }

    /// The text to write back.
    pub fn spelling(&self) -> String {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for Lexical<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => self.value.fmt(f),
        }
    }
}

impl<T> From<T> for Lexical<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_spelling_is_not_stored() {
        let v = Lexical::parsed(64u16, "64");
        assert_eq!(v.raw, None);
        assert_eq!(v.spelling(), "64");
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let v = Lexical::parsed(64u16, "0064");
        assert_eq!(v.get(), 64);
        assert_eq!(v.spelling(), "0064");
    }

    #[test]
    fn test_numeric_boolean_is_kept() {
        let v = Lexical::parsed(true, "1");
        assert!(v.get());
        assert_eq!(v.to_string(), "1");
        assert_ne!(v, Lexical::new(true));
    }
}
