// crates/devdesc-rs-iodd/src/resolver/mod.rs

//! Turns the deserialized `IODevice` tree into a canonical `DeviceProfile`.
//!
//! Resolution runs in two passes: the text table and the custom datatype
//! lookup are built first, then every collection that may reference them is
//! walked once. Cross-references are checked last against the finished profile.

use crate::model::IoDevice;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use devdesc_rs::iodd::{DeviceProfile, ResolvedDatatype};
use devdesc_rs::Diagnostic;

mod comm;
mod datatype;
mod diagnosis;
mod header;
mod identity;
mod process_data;
mod text;
mod user_interface;
mod utils;
mod variable;

/// Shared state of one resolution run.
#[derive(Default)]
pub(crate) struct Context {
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Custom datatype id -> resolved kind and size.
    datatypes: BTreeMap<String, ResolvedDatatype>,
}

/// Resolves the final `DeviceProfile` from the raw deserialized document.
pub(crate) fn resolve_profile(device: IoDevice) -> DeviceProfile {
    let mut ctx = Context::default();

    // --- Pass 1: text table and datatype lookup ---
    let texts = text::resolve_texts(device.external_text_collection.as_ref());
    let function = device.profile_body.device_function.as_ref();
    let custom_datatypes = function
        .and_then(|f| f.datatype_collection.as_ref())
        .map(|c| datatype::resolve_collection(&mut ctx, c));
    log::debug!(
        "pass 1: {} texts, {} custom datatypes",
        texts.entries.len(),
        ctx.datatypes.len()
    );

    // --- Pass 2: everything that may reference the lookups ---
    let (vendor, device_info, variants) =
        identity::resolve_identity(&mut ctx, device.profile_body.device_identity.as_ref());

    let mut profile = DeviceProfile {
        root: header::resolve_root(&device),
        document_info: device.document_info.as_ref().map(header::resolve_document_info),
        profile_header: device.profile_header.as_ref().map(header::resolve_profile_header),
        vendor,
        device: device_info,
        variants,
        custom_datatypes,
        texts,
        stamp: device.stamp.as_ref().map(header::resolve_stamp),
        has_device_identity: device.profile_body.device_identity.is_some(),
        has_device_function: function.is_some(),
        ..Default::default()
    };

    if let Some(function) = function {
        profile.features = function
            .features
            .as_ref()
            .map(|f| identity::resolve_features(&mut ctx, f));
        if let Some(collection) = &function.variable_collection {
            profile.has_variable_collection = true;
            variable::resolve_variables(&mut ctx, collection, &mut profile);
        }
        profile.process_data = function
            .process_data_collection
            .as_ref()
            .map(|c| process_data::resolve_process_data(&mut ctx, c));
        profile.error_types = function
            .error_type_collection
            .as_ref()
            .map(|c| diagnosis::resolve_error_types(&mut ctx, c));
        profile.events = function
            .event_collection
            .as_ref()
            .map(|c| diagnosis::resolve_events(&mut ctx, c));
        profile.user_interface = function
            .user_interface
            .as_ref()
            .map(|ui| user_interface::resolve_user_interface(&mut ctx, ui));
    }
    profile.communication = device
        .comm_network_profile
        .as_ref()
        .map(|c| comm::resolve_comm(&mut ctx, c));

    // --- Pass 3: cross-reference check ---
    let unresolved = profile.validate_references();
    for d in &unresolved {
        log::warn!("{}", d);
    }
    ctx.diagnostics.extend(unresolved);

    log::info!(
        "resolved IODD: {} variables, {} menus, {} diagnostics",
        profile.variable_entries().len(),
        profile.user_interface.as_ref().map_or(0, |ui| ui.menus.len()),
        ctx.diagnostics.len()
    );
    profile.diagnostics = ctx.diagnostics;
    profile
}
