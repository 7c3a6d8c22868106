// crates/devdesc-rs/src/diagnostic.rs

//! Non-fatal parse diagnostics shared by both format parsers.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Severity of a parse diagnostic, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    #[serde(rename = "INFO")]
    Info,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "ERROR")]
    Error,
    /// The input could not be turned into a usable model.
    #[serde(rename = "FATAL")]
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where in the source a diagnostic was raised.
///
/// EDS files report section/line/column; IODD files report an element path
/// in `section` and leave line/column empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub section: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl SourceLocation {
    pub fn section(section: impl Into<String>) -> Self {
        Self {
            section: Some(section.into()),
            ..Default::default()
        }
    }

    pub fn at(section: Option<String>, line: u32, column: u32) -> Self {
        Self {
            section,
            line: Some(line),
            column: Some(column),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.section, self.line, self.column) {
            (Some(s), Some(l), Some(c)) => write!(f, "{}:{}:{}", s, l, c),
            (None, Some(l), Some(c)) => write!(f, "{}:{}", l, c),
            (Some(s), _, _) => write!(f, "{}", s),
            _ => f.write_str("-"),
        }
    }
}

/// A single parse diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Parser-defined code, e.g. `EDS-P003`. Kept as a string because vendors
    /// and future parser versions extend the set.
    pub code: String,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            location: SourceLocation::default(),
        }
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, code, message)
    }

    pub fn warn(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, code, message)
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    pub fn fatal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, code, message)
    }

    /// Attaches a source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.code, self.location, self.message
        )
    }
}

/// Returns the highest severity in `diagnostics`, if any.
pub fn max_severity(diagnostics: &[Diagnostic]) -> Option<Severity> {
    diagnostics.iter().map(|d| d.severity).max()
}

/// True if any diagnostic is `FATAL`.
pub fn has_fatal(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(|d| d.severity == Severity::Fatal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_max_severity_and_fatal() {
        let diags = vec![
            Diagnostic::info("X1", "note"),
            Diagnostic::error("X2", "bad value"),
        ];
        assert_eq!(max_severity(&diags), Some(Severity::Error));
        assert!(!has_fatal(&diags));
        assert_eq!(max_severity(&[]), None);
    }

    #[test]
    fn test_display_includes_location() {
        let d = Diagnostic::warn("EDS-P004", "unknown key 'Foo'")
            .with_location(SourceLocation::at(Some("Params".to_string()), 12, 5));
        assert_eq!(d.to_string(), "[WARN] EDS-P004 (Params:12:5): unknown key 'Foo'");
    }
}
