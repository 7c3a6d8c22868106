// crates/devdesc-rs-iodd/src/model/identity.rs

//! Contains model structs related to `<DeviceIdentity>`.

use super::common::TextRef;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<VendorLogo name=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct VendorLogo {
    #[serde(rename = "@name")]
    pub name: String,
}

/// A `<DeviceVariant>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DeviceVariant {
    #[serde(rename = "@productId", default)]
    pub product_id: String,
    #[serde(rename = "@deviceSymbol", default, skip_serializing_if = "Option::is_none")]
    pub device_symbol: Option<String>,
    #[serde(rename = "@deviceIcon", default, skip_serializing_if = "Option::is_none")]
    pub device_icon: Option<String>,

    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<TextRef>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextRef>,
}

/// `<DeviceVariantCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DeviceVariantCollection {
    #[serde(rename = "DeviceVariant", default, skip_serializing_if = "Vec::is_empty")]
    pub device_variant: Vec<DeviceVariant>,
}

/// The `<DeviceIdentity>` block.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DeviceIdentity {
    #[serde(rename = "@vendorId", default)]
    pub vendor_id: String,
    #[serde(rename = "@vendorName", default)]
    pub vendor_name: String,
    #[serde(rename = "@deviceId", default)]
    pub device_id: String,

    #[serde(rename = "VendorText", default, skip_serializing_if = "Option::is_none")]
    pub vendor_text: Option<TextRef>,
    #[serde(rename = "VendorUrl", default, skip_serializing_if = "Option::is_none")]
    pub vendor_url: Option<TextRef>,
    #[serde(rename = "VendorLogo", default, skip_serializing_if = "Option::is_none")]
    pub vendor_logo: Option<VendorLogo>,
    #[serde(rename = "DeviceName", default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<TextRef>,
    #[serde(rename = "DeviceFamily", default, skip_serializing_if = "Option::is_none")]
    pub device_family: Option<TextRef>,
    #[serde(
        rename = "DeviceVariantCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub device_variant_collection: Option<DeviceVariantCollection>,
}
