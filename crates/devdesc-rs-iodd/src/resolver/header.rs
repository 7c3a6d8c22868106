// crates/devdesc-rs-iodd/src/resolver/header.rs

use crate::model::{self, IoDevice};
use devdesc_rs::iodd::{
    Checker, DocumentInfo, DocumentRoot, Iso15745Reference, ProfileHeader, Stamp,
};

/// Namespace attributes are echoed verbatim, including their absence.
pub(super) fn resolve_root(device: &IoDevice) -> DocumentRoot {
    DocumentRoot {
        xmlns: device.xmlns.clone(),
        xmlns_xsi: device.xmlns_xsi.clone(),
        schema_location: device.xsi_schema_location.clone(),
    }
}

pub(super) fn resolve_document_info(info: &model::DocumentInfo) -> DocumentInfo {
    DocumentInfo {
        version: info.version.clone(),
        release_date: info.release_date.clone(),
        copyright: info.copyright.clone(),
    }
}

pub(super) fn resolve_profile_header(header: &model::ProfileHeader) -> ProfileHeader {
    ProfileHeader {
        identification: header.profile_identification.clone(),
        revision: header.profile_revision.clone(),
        name: header.profile_name.clone(),
        source: header.profile_source.clone(),
        class_id: header.profile_class_id.clone(),
        iso15745_reference: header
            .iso15745_reference
            .as_ref()
            .map(|r| Iso15745Reference {
                part: r.iso15745_part.clone(),
                edition: r.iso15745_edition.clone(),
                technology: r.profile_technology.clone(),
            }),
    }
}

pub(super) fn resolve_stamp(stamp: &model::Stamp) -> Stamp {
    Stamp {
        crc: stamp.crc.clone(),
        checker: stamp.checker.as_ref().map(|c| Checker {
            name: c.name.clone(),
            version: c.version.clone(),
        }),
    }
}
