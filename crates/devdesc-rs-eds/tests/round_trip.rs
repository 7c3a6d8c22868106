// crates/devdesc-rs-eds/tests/round_trip.rs

//! Parse -> reconstruct -> parse tests.

use devdesc_rs_eds::{lex, load_eds_from_str, save_eds_to_string};
use std::fs;
use std::path::PathBuf;

fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

/// `(section, key, normalized value)` triples of a text, in order.
fn entries(text: &str) -> Vec<(String, String, String)> {
    lex(text)
        .sections
        .iter()
        .flat_map(|s| {
            s.entries.iter().map(move |e| {
                (
                    s.name.clone(),
                    e.key.clone(),
                    devdesc_rs::eds::normalized_value(&e.fields),
                )
            })
        })
        .collect()
}

#[test]
fn test_sample_reconstructs_to_same_profile() {
    let _ = env_logger::builder().is_test(true).try_init();
    let original = load_test_file("io-adapter.eds");
    let (profile, _) = load_eds_from_str(&original);

    let saved = save_eds_to_string(&profile);
    let (reparsed, diagnostics) = load_eds_from_str(&saved);

    assert!(diagnostics.is_empty(), "{:?}\n{}", diagnostics, saved);
    assert_eq!(reparsed, profile);
    assert_eq!(entries(&saved), entries(&original));
}

#[test]
fn test_reconstruction_is_idempotent() {
    let (profile, _) = load_eds_from_str(&load_test_file("io-adapter.eds"));
    let first = save_eds_to_string(&profile);
    let second = save_eds_to_string(&load_eds_from_str(&first).0);
    assert_eq!(first, second);
}

#[test]
fn test_capacity_entry_is_echoed() {
    let text = "[File]\n[Device]\n[Capacity]\n\tMaxMsgConnections = 128;\n";
    let (profile, diagnostics) = load_eds_from_str(text);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(
        profile.capacity.as_ref().and_then(|c| c.max_msg_connections).map(|c| c.value),
        Some(128)
    );

    let saved = save_eds_to_string(&profile);
    assert!(saved.contains("MaxMsgConnections = 128;"), "{}", saved);
    assert_eq!(entries(&saved), entries(text));
}

#[test]
fn test_integer_spelling_is_echoed() {
    let (profile, _) = load_eds_from_str(&load_test_file("io-adapter.eds"));
    let saved = save_eds_to_string(&profile);
    assert!(saved.contains("    VendCode = 0x0123;\n"));
    assert!(saved.contains("    Object_Class_Code = 0xF5;\n"));
    assert!(saved.contains("    TSpec1 = TxRx, 32, 1000;\n"));
}

#[test]
fn test_damaged_entries_still_reconstruct() {
    let text = "[File]\nDescText = \"x\";\nVendorStamp = 42;\n[Device]\nMajRev = two;\nVendCode = 1;\n";
    let (profile, diagnostics) = load_eds_from_str(text);
    let codes: Vec<&str> = diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, ["EDS-P004", "EDS-P003"]);

    let saved = save_eds_to_string(&profile);
    assert_eq!(entries(&saved), entries(text));
}
