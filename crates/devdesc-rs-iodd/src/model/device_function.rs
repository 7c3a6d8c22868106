// crates/devdesc-rs-iodd/src/model/device_function.rs

//! Contains model structs related to `<DeviceFunction>`.

use super::datatype::DatatypeCollection;
use super::diagnosis::{ErrorTypeCollection, EventCollection};
use super::process_data::ProcessDataCollection;
use super::user_interface::UserInterface;
use super::variable::VariableCollection;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// `<SupportedAccessLocks>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct SupportedAccessLocks {
    #[serde(rename = "@parameter", default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    #[serde(rename = "@dataStorage", default, skip_serializing_if = "Option::is_none")]
    pub data_storage: Option<String>,
    #[serde(
        rename = "@localParameterization",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_parameterization: Option<String>,
    #[serde(
        rename = "@localUserInterface",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub local_user_interface: Option<String>,
}

/// `<Features>`. Every attribute is optional and must stay absent when absent.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Features {
    #[serde(rename = "@blockParameter", default, skip_serializing_if = "Option::is_none")]
    pub block_parameter: Option<String>,
    #[serde(rename = "@dataStorage", default, skip_serializing_if = "Option::is_none")]
    pub data_storage: Option<String>,
    #[serde(
        rename = "@profileCharacteristic",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub profile_characteristic: Option<String>,

    #[serde(
        rename = "SupportedAccessLocks",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supported_access_locks: Option<SupportedAccessLocks>,
}

/// The `<DeviceFunction>` block.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct DeviceFunction {
    #[serde(rename = "Features", default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,

    #[serde(
        rename = "DatatypeCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub datatype_collection: Option<DatatypeCollection>,

    #[serde(
        rename = "VariableCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub variable_collection: Option<VariableCollection>,

    #[serde(
        rename = "ProcessDataCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub process_data_collection: Option<ProcessDataCollection>,

    #[serde(
        rename = "ErrorTypeCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_type_collection: Option<ErrorTypeCollection>,

    #[serde(
        rename = "EventCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub event_collection: Option<EventCollection>,

    #[serde(rename = "UserInterface", default, skip_serializing_if = "Option::is_none")]
    pub user_interface: Option<UserInterface>,
}
