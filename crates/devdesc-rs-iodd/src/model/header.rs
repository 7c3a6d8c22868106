// crates/devdesc-rs-iodd/src/model/header.rs

//! Contains model structs related to `<DocumentInfo>`, `<ProfileHeader>` and `<Stamp>`.

use alloc::string::String;
use serde::{Deserialize, Serialize};

/// `<DocumentInfo version=".." releaseDate=".." copyright=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DocumentInfo {
    #[serde(rename = "@version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(rename = "@releaseDate", default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(rename = "@copyright", default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// References the ISO 15745 part and edition this profile follows.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Iso15745Reference {
    #[serde(rename = "ISO15745Part")]
    pub iso15745_part: String,
    #[serde(rename = "ISO15745Edition")]
    pub iso15745_edition: String,
    #[serde(rename = "ProfileTechnology")]
    pub profile_technology: String,
}

/// Metadata header of the profile.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProfileHeader {
    #[serde(rename = "ProfileIdentification", default)]
    pub profile_identification: String,

    #[serde(rename = "ProfileRevision", default)]
    pub profile_revision: String,

    #[serde(rename = "ProfileName", default)]
    pub profile_name: String,

    #[serde(rename = "ProfileSource", default)]
    pub profile_source: String,

    #[serde(rename = "ProfileClassID", default)]
    pub profile_class_id: String,

    #[serde(
        rename = "ISO15745Reference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub iso15745_reference: Option<Iso15745Reference>,
}

/// `<Checker name=".." version=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Checker {
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@version", default)]
    pub version: String,
}

/// `<Stamp crc="..">` with an optional `<Checker>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Stamp {
    #[serde(rename = "@crc", default)]
    pub crc: String,
    #[serde(rename = "Checker", default, skip_serializing_if = "Option::is_none")]
    pub checker: Option<Checker>,
}
