#![cfg_attr(not(feature = "std"), no_std)]

//! Canonical model for machine-readable field-device descriptions.
//!
//! Two families share this crate:
//! - [`iodd::DeviceProfile`]: an IO-Link device description (XML).
//! - [`eds::EdsProfile`]: an EtherNet/IP electronic data sheet (sectioned text).
//!
//! The model is plain data. Every attribute that can be absent in the source is
//! an `Option`, so "absent", "present-false" and "present-true" stay distinct and
//! reconstruction can omit what the source omitted.

// 'alloc' is used for String/Vec in every model type
extern crate alloc;

// --- Foundation Modules ---
pub mod diagnostic;
pub mod ids;
pub mod lexical;
pub mod profile;

// --- Format Families ---
pub mod eds;
pub mod iodd;

// --- Top-level Exports ---
pub use diagnostic::{Diagnostic, Severity, SourceLocation};
pub use eds::EdsProfile;
pub use ids::{DatatypeId, MenuId, TextId, VariableId};
pub use lexical::Lexical;
pub use iodd::DeviceProfile;
pub use profile::{FileType, Profile};
