// crates/devdesc-rs-iodd/src/parser.rs

use crate::error::IoddError;
use crate::model::IoDevice;
use crate::resolver::resolve_profile;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use devdesc_rs::{Diagnostic, DeviceProfile, SourceLocation};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Result of [`parse_iodd_with_diagnostics`].
#[derive(Debug, Clone, PartialEq)]
pub struct IoddParseOutcome {
    /// `None` only when a FATAL diagnostic was raised.
    pub profile: Option<DeviceProfile>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses an IODD XML string slice into a canonical `DeviceProfile`.
///
/// Non-fatal findings (unresolved references, bad attribute values) are
/// collected in `DeviceProfile::diagnostics`.
///
/// # Errors
/// Returns an `IoddError` if the XML is malformed or the root element is not
/// `IODevice`.
pub fn load_iodd_from_str(xml_content: &str) -> Result<DeviceProfile, IoddError> {
    // 1. Make sure this is an IODD before handing it to serde, which does not
    //    check the root element name.
    check_root(xml_content)?;

    // 2. Deserialize the raw XML string into our internal model.
    let device: IoDevice = quick_xml::de::from_str(xml_content)?;

    // 3. Resolve it into the canonical model.
    Ok(resolve_profile(device))
}

/// Parses an IODD and reports every outcome as diagnostics.
///
/// Hard failures become a single FATAL diagnostic and an absent profile.
pub fn parse_iodd_with_diagnostics(xml_content: &str) -> IoddParseOutcome {
    match load_iodd_from_str(xml_content) {
        Ok(profile) => IoddParseOutcome {
            diagnostics: profile.diagnostics.clone(),
            profile: Some(profile),
        },
        Err(e) => {
            let code = match &e {
                IoddError::MissingElement { .. } => "IODD-F002",
                _ => "IODD-F001",
            };
            log::error!("IODD parse failed: {}", e);
            IoddParseOutcome {
                profile: None,
                diagnostics: vec![
                    Diagnostic::fatal(code, format!("{}", e))
                        .with_location(SourceLocation::section("IODevice")),
                ],
            }
        }
    }
}

/// Checks that the first element of the document is `IODevice`.
fn check_root(xml_content: &str) -> Result<(), IoddError> {
    let mut reader = Reader::from_str(xml_content);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return if e.local_name().as_ref() == b"IODevice" {
                    Ok(())
                } else {
                    Err(IoddError::MissingElement { element: "IODevice" })
                };
            }
            Event::Eof => return Err(IoddError::MissingElement { element: "IODevice" }),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdesc_rs::Severity;

    #[test]
    fn test_wrong_root_is_missing_element() {
        let result = load_iodd_from_str("<ISO15745ProfileContainer/>");
        assert!(matches!(
            result,
            Err(IoddError::MissingElement { element: "IODevice" })
        ));
    }

    #[test]
    fn test_empty_input_is_fatal() {
        let outcome = parse_iodd_with_diagnostics("");
        assert!(outcome.profile.is_none());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].severity, Severity::Fatal);
        assert_eq!(outcome.diagnostics[0].code, "IODD-F002");
    }
}
