//! Internal `serde` data structures that map directly to the IODD XML schema.
//!
//! These structs are annotated with `serde` attributes to facilitate parsing
//! via `quick-xml` and are not intended for direct public use. Numeric and
//! boolean attributes stay strings here; the resolver parses them and turns
//! bad values into diagnostics.
//!
//! The deserializer reports prefixed attributes by their local name
//! (`xsi:type` arrives as `@type`), so those fields carry separate
//! serialize and deserialize names.

#![allow(clippy::pedantic)] // XML schema naming conventions differ from Rust

use alloc::string::String;
use serde::{Deserialize, Serialize};

pub mod comm;
pub mod common;
pub mod datatype;
pub mod device_function;
pub mod diagnosis;
pub mod header;
pub mod identity;
pub mod process_data;
pub mod text;
pub mod user_interface;
pub mod variable;

pub use comm::CommNetworkProfile;
pub use device_function::DeviceFunction;
pub use header::{DocumentInfo, ProfileHeader, Stamp};
pub use identity::DeviceIdentity;
pub use text::ExternalTextCollection;

/// The root element of an IODD file.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
#[serde(rename = "IODevice")]
pub struct IoDevice {
    #[serde(rename = "@xmlns", default, skip_serializing_if = "Option::is_none")]
    pub xmlns: Option<String>,

    #[serde(rename = "@xmlns:xsi", default, skip_serializing_if = "Option::is_none")]
    pub xmlns_xsi: Option<String>,

    #[serde(
        rename(serialize = "@xsi:schemaLocation", deserialize = "@schemaLocation"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_schema_location: Option<String>,

    #[serde(rename = "DocumentInfo", default, skip_serializing_if = "Option::is_none")]
    pub document_info: Option<DocumentInfo>,

    #[serde(rename = "ProfileHeader", default, skip_serializing_if = "Option::is_none")]
    pub profile_header: Option<ProfileHeader>,

    #[serde(rename = "ProfileBody", default)]
    pub profile_body: ProfileBody,

    #[serde(
        rename = "CommNetworkProfile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub comm_network_profile: Option<CommNetworkProfile>,

    #[serde(
        rename = "ExternalTextCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub external_text_collection: Option<ExternalTextCollection>,

    #[serde(rename = "Stamp", default, skip_serializing_if = "Option::is_none")]
    pub stamp: Option<Stamp>,
}

/// `<ProfileBody>`: identity and function of the device.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProfileBody {
    #[serde(rename = "DeviceIdentity", default, skip_serializing_if = "Option::is_none")]
    pub device_identity: Option<DeviceIdentity>,

    #[serde(rename = "DeviceFunction", default, skip_serializing_if = "Option::is_none")]
    pub device_function: Option<DeviceFunction>,
}
