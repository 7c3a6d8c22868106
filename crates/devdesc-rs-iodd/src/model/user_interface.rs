// crates/devdesc-rs-iodd/src/model/user_interface.rs

//! Contains model structs related to `<UserInterface>`.

use super::common::{Condition, MenuIdRef, TextRef};
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<ProcessDataRecordItemInfo>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessDataRecordItemInfo {
    #[serde(rename = "@subindex")]
    pub subindex: String,
    #[serde(rename = "@gradient", default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(rename = "@offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(rename = "@unitCode", default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(rename = "@displayFormat", default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
}

/// `<ProcessDataRef processDataId="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessDataRef {
    #[serde(rename = "@processDataId")]
    pub process_data_id: String,
    #[serde(
        rename = "ProcessDataRecordItemInfo",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub record_item_info: Vec<ProcessDataRecordItemInfo>,
}

/// `<ProcessDataRefCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProcessDataRefCollection {
    #[serde(rename = "ProcessDataRef", default, skip_serializing_if = "Vec::is_empty")]
    pub process_data_ref: Vec<ProcessDataRef>,
}

/// `<Button buttonValue="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Button {
    #[serde(rename = "@buttonValue")]
    pub button_value: String,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<TextRef>,
    #[serde(
        rename = "ActionStartedMessage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub action_started_message: Option<TextRef>,
}

/// `<VariableRef variableId="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct VariableRef {
    #[serde(rename = "@variableId")]
    pub variable_id: String,
    #[serde(
        rename = "@accessRightRestriction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_right_restriction: Option<String>,
    #[serde(rename = "@displayFormat", default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(rename = "@unitCode", default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(rename = "@gradient", default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(rename = "@offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    #[serde(rename = "Button", default, skip_serializing_if = "Vec::is_empty")]
    pub button: Vec<Button>,
}

/// `<RecordItemRef variableId=".." subindex="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct RecordItemRef {
    #[serde(rename = "@variableId")]
    pub variable_id: String,
    #[serde(rename = "@subindex")]
    pub subindex: String,
    #[serde(
        rename = "@accessRightRestriction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_right_restriction: Option<String>,
    #[serde(rename = "@displayFormat", default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(rename = "@unitCode", default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(rename = "@gradient", default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<String>,
    #[serde(rename = "@offset", default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

/// `<MenuRef menuId="..">` with an optional `<Condition>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct MenuRef {
    #[serde(rename = "@menuId")]
    pub menu_id: String,
    #[serde(rename = "Condition", default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

/// Children of a `<Menu>`, in document order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum MenuChild {
    Name(TextRef),
    VariableRef(VariableRef),
    RecordItemRef(RecordItemRef),
    MenuRef(MenuRef),
    /// Any element not listed above. Skipped with its whole subtree.
    #[serde(other)]
    Unknown,
}

/// A `<Menu id="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Menu {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "$value", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuChild>,
}

/// `<MenuCollection>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct MenuCollection {
    #[serde(rename = "Menu", default, skip_serializing_if = "Vec::is_empty")]
    pub menu: Vec<Menu>,
}

/// `<ObserverRoleMenuSet>`, `<MaintenanceRoleMenuSet>` or `<SpecialistRoleMenuSet>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct RoleMenuSet {
    #[serde(
        rename = "IdentificationMenu",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub identification_menu: Option<MenuIdRef>,
    #[serde(rename = "ParameterMenu", default, skip_serializing_if = "Option::is_none")]
    pub parameter_menu: Option<MenuIdRef>,
    #[serde(rename = "ObservationMenu", default, skip_serializing_if = "Option::is_none")]
    pub observation_menu: Option<MenuIdRef>,
    #[serde(rename = "DiagnosisMenu", default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_menu: Option<MenuIdRef>,
}

/// The `<UserInterface>` block.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct UserInterface {
    #[serde(
        rename = "ProcessDataRefCollection",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub process_data_ref_collection: Option<ProcessDataRefCollection>,

    #[serde(rename = "MenuCollection", default)]
    pub menu_collection: MenuCollection,

    #[serde(
        rename = "ObserverRoleMenuSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub observer_role_menu_set: Option<RoleMenuSet>,
    #[serde(
        rename = "MaintenanceRoleMenuSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub maintenance_role_menu_set: Option<RoleMenuSet>,
    #[serde(
        rename = "SpecialistRoleMenuSet",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub specialist_role_menu_set: Option<RoleMenuSet>,
}
