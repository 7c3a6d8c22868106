// crates/devdesc-rs-eds/tests/robustness.rs

//! Damaged input never aborts the parse.

use devdesc_rs::Severity;
use devdesc_rs_eds::{parse_eds, save_eds_to_string};

#[test]
fn test_missing_required_sections_are_fatal_but_partial() {
    let (profile, diagnostics) = parse_eds("[Capacity]\nMaxIOConnections = 4;\n");
    let fatal: Vec<&str> = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Fatal)
        .map(|d| d.code.as_str())
        .collect();
    assert_eq!(fatal, ["EDS-P001", "EDS-P002"]);
    assert_eq!(
        profile.capacity.as_ref().and_then(|c| c.max_io_connections).map(|c| c.value),
        Some(4)
    );
}

#[test]
fn test_garbage_is_skipped() {
    let text = "this is not an eds file\n[File]\nDescText = \"ok\";\n= 3;\n[Device]\nVendCode = 7;\n";
    let (profile, diagnostics) = parse_eds(text);
    assert!(profile.file.is_some());
    assert_eq!(profile.vendor_code(), Some(7));
    assert!(diagnostics.iter().all(|d| d.severity != Severity::Fatal));
    assert!(diagnostics.iter().any(|d| d.code == "EDS-L005"));
}

#[test]
fn test_diagnostics_carry_positions() {
    let text = "[File]\nDescText = \"ok\";\n[Device]\n\n  Bogus = 1;\n";
    let (_, diagnostics) = parse_eds(text);
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!(d.code, "EDS-P004");
    assert_eq!(d.severity, Severity::Warn);
    assert_eq!(d.location.section.as_deref(), Some("Device"));
    assert_eq!((d.location.line, d.location.column), (Some(5), Some(3)));
}

#[test]
fn test_unrecognised_section_is_informational() {
    let (profile, diagnostics) = parse_eds("[File]\n[Device]\n[Vendor Stuff]\nA = 1;\n");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "EDS-P007");
    assert_eq!(diagnostics[0].severity, Severity::Info);
    let saved = save_eds_to_string(&profile);
    assert!(saved.contains("[Vendor Stuff]\n    A = 1;\n"), "{}", saved);
}

#[test]
fn test_unterminated_string_does_not_swallow_file() {
    let text = "[File]\nDescText = \"broken\n[Device]\nVendCode = 9;\n";
    let (profile, diagnostics) = parse_eds(text);
    assert!(diagnostics.iter().any(|d| d.code == "EDS-L001"));
    assert_eq!(profile.vendor_code(), Some(9));
}
