//! Serializes a canonical `DeviceProfile` back into IODD XML.
//!
//! This module converts the canonical model back to the internal `model`
//! structs required by `quick-xml`. Ordering fields drive element order and
//! tri-state options are emitted only when present.

mod comm;
mod datatype;
mod device_function;
mod user_interface;

use crate::error::IoddError;
use crate::model::common::TextRef;
use crate::model::header as model_header;
use crate::model::identity as model_identity;
use crate::model::text::{ExternalTextCollection, LanguageBlock, Text};
use crate::model::{IoDevice, ProfileBody};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};
use devdesc_rs::iodd::{DeviceInfo, DeviceProfile, TextTable, VendorInfo};
use devdesc_rs::{Lexical, TextId};
use serde::Serialize;

/// Serializes a `DeviceProfile` into an IODD XML string.
///
/// The output is deterministic: the same profile always yields the same text.
///
/// # Errors
/// Returns an `IoddError` if `quick-xml` fails to serialize the document.
pub fn save_iodd_to_string(profile: &DeviceProfile) -> Result<String, IoddError> {
    let device = build_io_device(profile);

    let mut buffer = String::new();
    write!(
        &mut buffer,
        "{}",
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"
    )?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);

    device.serialize(serializer)?;
    log::debug!("reconstructed IODD: {} bytes", buffer.len());
    Ok(buffer)
}

/// Builds the internal `IODevice` model from a profile.
pub(crate) fn build_io_device(profile: &DeviceProfile) -> IoDevice {
    IoDevice {
        xmlns: profile.root.xmlns.clone(),
        xmlns_xsi: profile.root.xmlns_xsi.clone(),
        xsi_schema_location: profile.root.schema_location.clone(),
        document_info: profile
            .document_info
            .as_ref()
            .map(|d| model_header::DocumentInfo {
                version: d.version.clone(),
                release_date: d.release_date.clone(),
                copyright: d.copyright.clone(),
            }),
        profile_header: profile
            .profile_header
            .as_ref()
            .map(|h| model_header::ProfileHeader {
                profile_identification: h.identification.clone(),
                profile_revision: h.revision.clone(),
                profile_name: h.name.clone(),
                profile_source: h.source.clone(),
                profile_class_id: h.class_id.clone(),
                iso15745_reference: h.iso15745_reference.as_ref().map(|r| {
                    model_header::Iso15745Reference {
                        iso15745_part: r.part.clone(),
                        iso15745_edition: r.edition.clone(),
                        profile_technology: r.technology.clone(),
                    }
                }),
            }),
        profile_body: ProfileBody {
            device_identity: build_identity(profile),
            device_function: device_function::build_device_function(profile),
        },
        comm_network_profile: profile.communication.as_ref().map(comm::build_comm),
        external_text_collection: build_texts(&profile.texts),
        stamp: profile.stamp.as_ref().map(|s| model_header::Stamp {
            crc: s.crc.clone(),
            checker: s.checker.as_ref().map(|c| model_header::Checker {
                name: c.name.clone(),
                version: c.version.clone(),
            }),
        }),
    }
}

pub(crate) fn text_ref(id: Option<&TextId>) -> Option<TextRef> {
    id.map(|t| TextRef::new(t.as_str()))
}

/// Writes an optional attribute back the way the source spelled it.
pub(crate) fn spelled<T: fmt::Display>(value: Option<&Lexical<T>>) -> Option<String> {
    value.map(Lexical::spelling)
}

/// Emitted when the source had a `DeviceIdentity` or the profile carries identity data.
fn build_identity(profile: &DeviceProfile) -> Option<model_identity::DeviceIdentity> {
    let vendor = &profile.vendor;
    let device = &profile.device;
    let has_content = vendor != &VendorInfo::default()
        || device != &DeviceInfo::default()
        || profile.variants.is_some();
    if !profile.has_device_identity && !has_content {
        return None;
    }
    Some(model_identity::DeviceIdentity {
        vendor_id: vendor.vendor_id.to_string(),
        vendor_name: vendor.vendor_name.clone(),
        device_id: device.device_id.to_string(),
        vendor_text: text_ref(vendor.vendor_text.as_ref()),
        vendor_url: text_ref(vendor.vendor_url.as_ref()),
        vendor_logo: vendor
            .vendor_logo
            .as_ref()
            .map(|name| model_identity::VendorLogo { name: name.clone() }),
        device_name: text_ref(device.device_name.as_ref()),
        device_family: text_ref(device.device_family.as_ref()),
        device_variant_collection: profile.variants.as_ref().map(|variants| {
            let mut sorted: Vec<_> = variants.iter().collect();
            sorted.sort_by_key(|v| v.order_index);
            model_identity::DeviceVariantCollection {
                device_variant: sorted
                    .into_iter()
                    .map(|v| model_identity::DeviceVariant {
                        product_id: v.product_id.clone(),
                        device_symbol: v.device_symbol.clone(),
                        device_icon: v.device_icon.clone(),
                        name: text_ref(v.name.as_ref()),
                        description: text_ref(v.description.as_ref()),
                    })
                    .collect(),
            }
        }),
    })
}

/// Rebuilds `ExternalTextCollection` from the text table, blocks by
/// `language_order` and texts by `xml_order`.
fn build_texts(texts: &TextTable) -> Option<ExternalTextCollection> {
    if texts.is_empty() {
        return None;
    }
    let mut collection = ExternalTextCollection::default();
    for block in texts.ordered_languages() {
        let model_block = LanguageBlock {
            lang: block.code.clone(),
            text: texts
                .entries_for(&block.code)
                .into_iter()
                .map(|e| Text {
                    id: e.text_id.as_str().to_string(),
                    value: e.value.clone(),
                })
                .collect(),
        };
        if block.is_primary {
            collection.primary_language = Some(model_block);
        } else {
            collection.language.push(model_block);
        }
    }
    Some(collection)
}
