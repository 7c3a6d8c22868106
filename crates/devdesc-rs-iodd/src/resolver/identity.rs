// crates/devdesc-rs-iodd/src/resolver/identity.rs

use super::Context;
use super::utils::text_id;
use crate::model::device_function::Features;
use crate::model::identity::DeviceIdentity;
use alloc::vec::Vec;
use devdesc_rs::iodd::{DeviceFeatures, DeviceInfo, DeviceVariant, SupportedAccessLocks, VendorInfo};
use devdesc_rs::{Diagnostic, SourceLocation};

const PATH: &str = "DeviceIdentity";

/// Resolves vendor, device and variant data.
///
/// A missing `DeviceIdentity` is an ERROR; the ids fall back to zero.
pub(super) fn resolve_identity(
    ctx: &mut Context,
    identity: Option<&DeviceIdentity>,
) -> (VendorInfo, DeviceInfo, Option<Vec<DeviceVariant>>) {
    let Some(identity) = identity else {
        ctx.push(
            Diagnostic::error("IODD-R011", "ProfileBody has no DeviceIdentity")
                .with_location(SourceLocation::section("ProfileBody")),
        );
        return (VendorInfo::default(), DeviceInfo::default(), None);
    };

    let vendor = VendorInfo {
        vendor_id: ctx.required(&identity.vendor_id, "vendorId", PATH),
        vendor_name: identity.vendor_name.clone(),
        vendor_text: text_id(identity.vendor_text.as_ref()),
        vendor_url: text_id(identity.vendor_url.as_ref()),
        vendor_logo: identity.vendor_logo.as_ref().map(|l| l.name.clone()),
    };
    let device = DeviceInfo {
        device_id: ctx.required(&identity.device_id, "deviceId", PATH),
        device_name: text_id(identity.device_name.as_ref()),
        device_family: text_id(identity.device_family.as_ref()),
    };
    let variants = identity.device_variant_collection.as_ref().map(|c| {
        c.device_variant
            .iter()
            .enumerate()
            .map(|(i, v)| DeviceVariant {
                product_id: v.product_id.clone(),
                device_symbol: v.device_symbol.clone(),
                device_icon: v.device_icon.clone(),
                name: text_id(v.name.as_ref()),
                description: text_id(v.description.as_ref()),
                order_index: i as u32,
            })
            .collect()
    });
    (vendor, device, variants)
}

/// Every flag is tri-state: an absent attribute stays `None`.
pub(super) fn resolve_features(ctx: &mut Context, features: &Features) -> DeviceFeatures {
    let path = "DeviceFunction/Features";
    DeviceFeatures {
        block_parameter: ctx.flag(features.block_parameter.as_ref(), "blockParameter", path),
        data_storage: ctx.flag(features.data_storage.as_ref(), "dataStorage", path),
        profile_characteristic: features.profile_characteristic.clone(),
        supported_access_locks: features.supported_access_locks.as_ref().map(|locks| {
            let path = "DeviceFunction/Features/SupportedAccessLocks";
            SupportedAccessLocks {
                parameter: ctx.flag(locks.parameter.as_ref(), "parameter", path),
                data_storage: ctx.flag(locks.data_storage.as_ref(), "dataStorage", path),
                local_parameterization: ctx.flag(
                    locks.local_parameterization.as_ref(),
                    "localParameterization",
                    path,
                ),
                local_user_interface: ctx.flag(
                    locks.local_user_interface.as_ref(),
                    "localUserInterface",
                    path,
                ),
            }
        }),
    }
}
