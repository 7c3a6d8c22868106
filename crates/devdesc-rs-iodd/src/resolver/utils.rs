// crates/devdesc-rs-iodd/src/resolver/utils.rs

//! Attribute conversion helpers. Bad values become diagnostics, never errors.

use super::Context;
use crate::model::common::TextRef;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use devdesc_rs::iodd::AccessRights;
use devdesc_rs::{Diagnostic, Lexical, SourceLocation, TextId};

impl Context {
    pub(super) fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Records a child element the model has no variant for.
    pub(super) fn unsupported(&mut self, parent: &str, path: &str) {
        self.push(
            Diagnostic::warn(
                "IODD-R014",
                format!("unsupported child element skipped in <{}>", parent),
            )
            .with_location(SourceLocation::section(path)),
        );
    }

    /// Parses an `xsd:boolean` attribute. Absent stays `None`.
    pub(super) fn flag(
        &mut self,
        value: Option<&String>,
        attribute: &str,
        path: &str,
    ) -> Option<Lexical<bool>> {
        let raw = value?;
        match raw.trim() {
            "true" | "1" => Some(Lexical::parsed(true, raw)),
            "false" | "0" => Some(Lexical::parsed(false, raw)),
            other => {
                self.push(
                    Diagnostic::error(
                        "IODD-R005",
                        format!("invalid boolean '{}' in @{}", other, attribute),
                    )
                    .with_location(SourceLocation::section(path)),
                );
                None
            }
        }
    }

    /// Parses a numeric attribute, keeping its spelling.
    pub(super) fn number<T: FromStr + fmt::Display>(
        &mut self,
        value: &str,
        attribute: &str,
        path: &str,
    ) -> Option<Lexical<T>> {
        match value.trim().parse::<T>() {
            Ok(v) => Some(Lexical::parsed(v, value)),
            Err(_) => {
                self.push(
                    Diagnostic::error(
                        "IODD-R006",
                        format!("invalid number '{}' in @{}", value, attribute),
                    )
                    .with_location(SourceLocation::section(path)),
                );
                None
            }
        }
    }

    /// Parses an optional numeric attribute. Absent stays `None`.
    pub(super) fn opt_number<T: FromStr + fmt::Display>(
        &mut self,
        value: Option<&String>,
        attribute: &str,
        path: &str,
    ) -> Option<Lexical<T>> {
        value.and_then(|v| self.number(v, attribute, path))
    }

    /// Parses a required numeric attribute. An unparsable value becomes the
    /// default number but keeps its source text for reconstruction.
    pub(super) fn required<T: FromStr + fmt::Display + Default>(
        &mut self,
        value: &str,
        attribute: &str,
        path: &str,
    ) -> Lexical<T> {
        self.number(value, attribute, path).unwrap_or_else(|| Lexical {
            value: T::default(),
            raw: Some(String::from(value)),
        })
    }

    pub(super) fn access(&mut self, value: Option<&String>, attribute: &str, path: &str) -> Option<AccessRights> {
        let raw = value?;
        let parsed = AccessRights::parse(raw.trim());
        if parsed.is_none() {
            self.push(
                Diagnostic::error(
                    "IODD-R012",
                    format!("invalid access right '{}' in @{}", raw, attribute),
                )
                .with_location(SourceLocation::section(path)),
            );
        }
        parsed
    }
}

pub(super) fn text_id(r: Option<&TextRef>) -> Option<TextId> {
    r.map(|t| TextId::from(t.text_id.as_str()))
}
