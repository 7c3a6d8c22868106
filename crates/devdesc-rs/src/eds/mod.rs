// crates/devdesc-rs/src/eds/mod.rs

//! Canonical model of an EtherNet/IP electronic data sheet (EDS).
//!
//! Typed sections hold the keys they understand as typed fields. Keys they
//! do not consume stay in `extra_entries`, and `key_order` records the source
//! order of all keys so the reconstructor can interleave both.

use crate::diagnostic::Diagnostic;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub mod records;
pub mod value;

pub use records::{
    EdsAssembly, EdsAssemblyMember, EdsConnection, EdsConnectionEndpoint, EdsEnum, EdsModule,
    EdsParameter, EdsPort, EdsTSpec, TSpecDirection, key_number,
};
pub use value::{EdsEntry, EdsValue, IntForm, IntLiteral, normalized_value};

/// The sections the parser has a typed model for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    File,
    Device,
    DeviceClassification,
    Params,
    Assembly,
    ConnectionManager,
    Port,
    Capacity,
    Modular,
    /// Any other section, kept as an ordered entry list.
    Extension,
}

impl SectionKind {
    /// Classifies a section header (without brackets). Matching ignores
    /// case and surrounding whitespace.
    pub fn from_header(name: &str) -> Self {
        let name = name.trim();
        let is = |s: &str| name.eq_ignore_ascii_case(s);
        if is("File") {
            Self::File
        } else if is("Device") {
            Self::Device
        } else if is("Device Classification") {
            Self::DeviceClassification
        } else if is("Params") {
            Self::Params
        } else if is("Assembly") {
            Self::Assembly
        } else if is("Connection Manager") {
            Self::ConnectionManager
        } else if is("Port") {
            Self::Port
        } else if is("Capacity") {
            Self::Capacity
        } else if is("Modular") {
            Self::Modular
        } else {
            Self::Extension
        }
    }

    /// True for the vendor/optional sections the parser knows by name but
    /// does not type (`[DLR]`, `[TCP/IP Interface]`, ...).
    pub fn is_known_extension(name: &str) -> bool {
        let name = name.trim();
        [
            "DLR",
            "DLR Class",
            "TCP/IP Interface",
            "TCP/IP Interface Class",
            "Ethernet Link",
            "Ethernet Link Class",
            "LLDP Management",
            "LLDP Management Class",
            "QoS Config",
            "QoS Class",
            "Connection Configuration",
        ]
        .iter()
        .any(|known| name.eq_ignore_ascii_case(known))
    }
}

/// A generic section: an ordered list of raw entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsSection {
    /// Header text as spelled in the source.
    pub name: String,
    pub entries: Vec<EdsEntry>,
}

impl EdsSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&EdsEntry> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// `[File]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsFileInfo {
    pub name: String,
    pub desc_text: Option<EdsValue>,
    pub create_date: Option<EdsValue>,
    pub create_time: Option<EdsValue>,
    pub mod_date: Option<EdsValue>,
    pub mod_time: Option<EdsValue>,
    pub revision: Option<EdsValue>,
    pub home_url: Option<EdsValue>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// `[Device]`. Codes and revisions keep their source spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsDeviceInfo {
    pub name: String,
    pub vend_code: Option<IntLiteral>,
    pub vend_name: Option<EdsValue>,
    pub prod_type: Option<IntLiteral>,
    pub prod_type_str: Option<EdsValue>,
    pub prod_code: Option<IntLiteral>,
    pub maj_rev: Option<IntLiteral>,
    pub min_rev: Option<IntLiteral>,
    pub prod_name: Option<EdsValue>,
    pub catalog: Option<EdsValue>,
    pub icon: Option<EdsValue>,
    pub icon_contents: Option<EdsValue>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

impl EdsDeviceInfo {
    pub fn product_name(&self) -> Option<&str> {
        self.prod_name.as_ref().and_then(EdsValue::as_str)
    }

    /// `major.minor` revision, if both are present.
    pub fn revision(&self) -> Option<(i64, i64)> {
        Some((self.maj_rev?.value, self.min_rev?.value))
    }
}

/// `[Params]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsParams {
    pub name: String,
    pub parameters: Vec<EdsParameter>,
    pub enums: Vec<EdsEnum>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

impl EdsParams {
    pub fn parameter(&self, number: u32) -> Option<&EdsParameter> {
        self.parameters.iter().find(|p| p.number == number)
    }
}

/// `[Assembly]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsAssemblySection {
    pub name: String,
    /// Assemblies with a fixed size.
    pub assemblies: Vec<EdsAssembly>,
    /// Assemblies whose size field is empty.
    pub variable_assemblies: Vec<EdsAssembly>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// `[Connection Manager]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsConnectionManager {
    pub name: String,
    pub connections: Vec<EdsConnection>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// `[Port]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsPortSection {
    pub name: String,
    pub ports: Vec<EdsPort>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// `[Capacity]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsCapacity {
    pub name: String,
    pub max_msg_connections: Option<IntLiteral>,
    pub max_io_connections: Option<IntLiteral>,
    pub max_consumers_per_mcast: Option<IntLiteral>,
    pub max_io_producers: Option<IntLiteral>,
    pub max_io_consumers: Option<IntLiteral>,
    pub tspecs: Vec<EdsTSpec>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// `[Modular]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsModular {
    pub name: String,
    pub modules: Vec<EdsModule>,
    pub extra_entries: Vec<EdsEntry>,
    pub key_order: Vec<String>,
}

/// A parsed EDS document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsProfile {
    pub file: Option<EdsFileInfo>,
    pub device: Option<EdsDeviceInfo>,
    pub classification: Option<EdsSection>,
    pub params: Option<EdsParams>,
    pub assembly: Option<EdsAssemblySection>,
    pub connection_manager: Option<EdsConnectionManager>,
    pub port: Option<EdsPortSection>,
    pub capacity: Option<EdsCapacity>,
    pub modular: Option<EdsModular>,
    /// Vendor and unrecognised sections, plus repeated typed sections.
    pub extension_sections: Vec<EdsSection>,
    /// Section headers in source order.
    pub section_order: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl EdsProfile {
    pub fn vendor_code(&self) -> Option<i64> {
        self.device.as_ref()?.vend_code.map(|c| c.value)
    }

    pub fn product_code(&self) -> Option<i64> {
        self.device.as_ref()?.prod_code.map(|c| c.value)
    }

    pub fn product_name(&self) -> Option<&str> {
        self.device.as_ref()?.product_name()
    }

    pub fn parameters(&self) -> &[EdsParameter] {
        self.params.as_ref().map_or(&[], |p| p.parameters.as_slice())
    }

    pub fn extension_section(&self, name: &str) -> Option<&EdsSection> {
        self.extension_sections
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_from_header() {
        assert_eq!(SectionKind::from_header("File"), SectionKind::File);
        assert_eq!(
            SectionKind::from_header(" connection manager "),
            SectionKind::ConnectionManager
        );
        assert_eq!(SectionKind::from_header("DLR Class"), SectionKind::Extension);
        assert!(SectionKind::is_known_extension("TCP/IP Interface"));
        assert!(!SectionKind::is_known_extension("Vendor Stuff"));
    }

    #[test]
    fn test_profile_accessors() {
        let profile = EdsProfile {
            device: Some(EdsDeviceInfo {
                vend_code: IntLiteral::parse("0x0001"),
                prod_code: IntLiteral::parse("42"),
                maj_rev: IntLiteral::parse("2"),
                min_rev: IntLiteral::parse("7"),
                prod_name: Some(EdsValue::quoted("Widget")),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(profile.vendor_code(), Some(1));
        assert_eq!(profile.product_code(), Some(42));
        assert_eq!(profile.product_name(), Some("Widget"));
        assert_eq!(profile.device.as_ref().and_then(|d| d.revision()), Some((2, 7)));
        assert!(profile.parameters().is_empty());
    }
}
