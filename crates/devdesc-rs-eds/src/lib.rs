// src/lib.rs

#![no_std]
#![doc = "Parses and reconstructs EtherNet/IP EDS (Electronic Data Sheet) files."]
#![doc = ""]
#![doc = "Parsing never fails: lexical and structural problems become diagnostics"]
#![doc = "and the offending entries are kept verbatim so they still reconstruct."]
#![doc = "- `load_eds_from_str`: text to `devdesc_rs::EdsProfile` plus diagnostics."]
#![doc = "- `save_eds_to_string`: reconstruction of an EDS file from a profile."]
#![doc = "- `lexer`: the section/entry tokenizer, shared with the diff engine."]

extern crate alloc;

// --- Crate Modules ---

mod builder;
pub mod lexer;
mod parser;

// --- Public API Re-exports ---

pub use builder::save_eds_to_string;
pub use lexer::{LexOutput, RawEntry, RawSection, lex};
pub use parser::load_eds_from_str;

use alloc::vec::Vec;
use devdesc_rs::{Diagnostic, EdsProfile};

/// Alias of [`load_eds_from_str`].
pub fn parse_eds(text: &str) -> (EdsProfile, Vec<Diagnostic>) {
    load_eds_from_str(text)
}
