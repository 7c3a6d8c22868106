// src/lib.rs

#![no_std]
#![doc = "Parses and reconstructs IO-Link IODD (IO Device Description) files."]
#![doc = ""]
#![doc = "This `no_std + alloc` library maps IODD XML onto the canonical"]
#![doc = "`devdesc_rs::DeviceProfile` and back:"]
#![doc = "- `load_iodd_from_str`: strict parsing, fails on malformed XML."]
#![doc = "- `parse_iodd_with_diagnostics`: the same parse reported as diagnostics."]
#![doc = "- `save_iodd_to_string`: reconstruction of an IODD document from a profile."]

extern crate alloc;

// --- Crate Modules ---

mod builder;
mod error;
mod model;
mod parser;
mod resolver;

// --- Public API Re-exports ---

pub use builder::save_iodd_to_string;
pub use error::IoddError;
pub use parser::{IoddParseOutcome, load_iodd_from_str, parse_iodd_with_diagnostics};

/// Alias of [`load_iodd_from_str`].
pub fn parse_iodd(xml_content: &str) -> Result<devdesc_rs::DeviceProfile, IoddError> {
    load_iodd_from_str(xml_content)
}
