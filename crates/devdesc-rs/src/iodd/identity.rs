// crates/devdesc-rs/src/iodd/identity.rs

//! Vendor, device and feature descriptions (`DeviceIdentity`, `Features`).

use crate::ids::TextId;
use crate::lexical::Lexical;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Vendor attributes and text references of `DeviceIdentity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorInfo {
    pub vendor_id: Lexical<u32>,
    pub vendor_name: String,
    pub vendor_text: Option<TextId>,
    pub vendor_url: Option<TextId>,
    /// File name of the `VendorLogo` element.
    pub vendor_logo: Option<String>,
}

/// Device attributes and text references of `DeviceIdentity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// 24-bit IO-Link device id.
    pub device_id: Lexical<u32>,
    pub device_name: Option<TextId>,
    pub device_family: Option<TextId>,
}

/// A `DeviceVariant` inside `DeviceVariantCollection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceVariant {
    pub product_id: String,
    pub device_symbol: Option<String>,
    pub device_icon: Option<String>,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// The `Features` element of `DeviceFunction`.
///
/// Every flag is tri-state. `None` means the attribute was absent and must
/// not be emitted on reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFeatures {
    pub block_parameter: Option<Lexical<bool>>,
    pub data_storage: Option<Lexical<bool>>,
    pub profile_characteristic: Option<String>,
    pub supported_access_locks: Option<SupportedAccessLocks>,
}

/// `SupportedAccessLocks` with four independent tri-state flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedAccessLocks {
    pub parameter: Option<Lexical<bool>>,
    pub data_storage: Option<Lexical<bool>>,
    pub local_parameterization: Option<Lexical<bool>>,
    pub local_user_interface: Option<Lexical<bool>>,
}
