// crates/devdesc-rs-pqa/src/criticality.rs

//! Static criticality tables and feature-group classification.
//!
//! Identity and data-shape fields are CRITICAL or HIGH; documentation and
//! formatting fields are LOW or INFO. Anything not listed is MEDIUM.

use devdesc_rs::FileType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a single structural difference. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiffSeverity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl DiffSeverity {
    pub const ALL: [DiffSeverity; 5] = [
        DiffSeverity::Critical,
        DiffSeverity::High,
        DiffSeverity::Medium,
        DiffSeverity::Low,
        DiffSeverity::Info,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiffSeverity::Info => "INFO",
            DiffSeverity::Low => "LOW",
            DiffSeverity::Medium => "MEDIUM",
            DiffSeverity::High => "HIGH",
            DiffSeverity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for DiffSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// IODD feature groups with their own fidelity sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    UiRendering,
    VariantsConditions,
    MenuButtons,
    WiringTestConfig,
    CustomDatatypes,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::UiRendering,
        Phase::VariantsConditions,
        Phase::MenuButtons,
        Phase::WiringTestConfig,
        Phase::CustomDatatypes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::UiRendering => "ui_rendering",
            Phase::VariantsConditions => "variants_conditions",
            Phase::MenuButtons => "menu_buttons",
            Phase::WiringTestConfig => "wiring_test_config",
            Phase::CustomDatatypes => "custom_datatypes",
        }
    }

    fn of_element(name: &str) -> Option<Phase> {
        match name {
            "Button" | "ActionStartedMessage" => Some(Phase::MenuButtons),
            "DeviceVariantCollection" | "DeviceVariant" | "Condition" => {
                Some(Phase::VariantsConditions)
            }
            "Connection" | "Test" | "ProductRef" => Some(Phase::WiringTestConfig),
            n if is_numbered(n, "Wire") || is_numbered(n, "Config") => {
                Some(Phase::WiringTestConfig)
            }
            "DatatypeCollection" | "DatatypeRef" => Some(Phase::CustomDatatypes),
            "UserInterface" | "MenuCollection" | "Menu" | "MenuRef" | "VariableRef"
            | "RecordItemRef" | "ProcessDataRefCollection" | "ProcessDataRef"
            | "ProcessDataRecordItemInfo" | "ObserverRoleMenuSet" | "MaintenanceRoleMenuSet"
            | "SpecialistRoleMenuSet" | "IdentificationMenu" | "ParameterMenu"
            | "ObservationMenu" | "DiagnosisMenu" => Some(Phase::UiRendering),
            _ => None,
        }
    }
}

/// Rendering hints carried as attributes on menu references.
const UI_RENDERING_ATTRIBUTES: [&str; 5] = [
    "gradient",
    "offset",
    "unitCode",
    "displayFormat",
    "accessRightRestriction",
];

fn is_numbered(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Group a node or attribute belongs to, for per-group fidelity.
///
/// IODD: the [`Phase`] of the deepest classified element on `path`, or
/// `UiRendering` for rendering-hint attributes. EDS: the section name.
pub fn group_of(file_type: FileType, path: &[&str], attribute: Option<&str>) -> Option<String> {
    match file_type {
        FileType::Iodd => {
            if attribute.is_some_and(|a| UI_RENDERING_ATTRIBUTES.contains(&a)) {
                return Some(Phase::UiRendering.as_str().to_string());
            }
            path.iter()
                .rev()
                .find_map(|name| Phase::of_element(name))
                .map(|p| p.as_str().to_string())
        }
        FileType::Eds => path.get(1).map(|section| section.to_string()),
    }
}

/// Severity of a missing or extra element.
pub fn element_severity(file_type: FileType, path: &[&str]) -> DiffSeverity {
    match file_type {
        FileType::Iodd => iodd_element(path.last().copied().unwrap_or_default()),
        FileType::Eds => match path {
            [_root] => DiffSeverity::Critical,
            [_root, section] => eds_section(section),
            [_root, _section, key, ..] => eds_key(key),
            [] => DiffSeverity::Critical,
        },
    }
}

/// Severity of a missing, extra or differing attribute.
pub fn attribute_severity(file_type: FileType, attribute: &str) -> DiffSeverity {
    match file_type {
        FileType::Iodd => iodd_attribute(attribute),
        // EDS trees carry no attributes.
        FileType::Eds => DiffSeverity::Medium,
    }
}

/// Severity of differing text content.
pub fn value_severity(file_type: FileType, path: &[&str]) -> DiffSeverity {
    element_severity(file_type, path)
}

fn iodd_element(name: &str) -> DiffSeverity {
    match name {
        "IODevice" | "ProfileBody" | "DeviceIdentity" | "DeviceFunction" | "VariableCollection"
        | "Variable" | "StdVariableRef" | "DirectParameterOverlay" | "ProcessDataCollection"
        | "ProcessData" | "ProcessDataIn" | "ProcessDataOut" | "DatatypeCollection"
        | "Datatype" | "DatatypeRef" | "SimpleDatatype" | "RecordItem" | "VariableRef"
        | "RecordItemRef" => DiffSeverity::Critical,
        "SingleValue" | "StdSingleValueRef" | "ValueRange" | "StdValueRangeRef"
        | "StdRecordItemRef" | "RecordItemInfo" | "ErrorTypeCollection" | "ErrorType"
        | "StdErrorTypeRef" | "EventCollection" | "Event" | "StdEventRef" | "UserInterface"
        | "MenuCollection" | "Menu" | "MenuRef" | "DeviceVariantCollection"
        | "DeviceVariant" | "Condition" | "Features" | "CommNetworkProfile"
        | "PhysicalLayer" | "ExternalTextCollection" | "PrimaryLanguage" | "Language"
        | "Text" => DiffSeverity::High,
        "DocumentInfo" | "ProfileHeader" | "ProfileIdentification" | "ProfileRevision"
        | "ProfileName" | "ProfileSource" | "ProfileClassID" | "ISO15745Reference"
        | "ISO15745Part" | "ISO15745Edition" | "ProfileTechnology" | "Stamp" | "Checker"
        | "VendorLogo" | "DeviceIcon" => DiffSeverity::Low,
        _ => DiffSeverity::Medium,
    }
}

fn iodd_attribute(name: &str) -> DiffSeverity {
    match name {
        "vendorId" | "deviceId" | "index" | "subindex" | "subIndex" | "id" | "bitLength"
        | "bitOffset" | "datatypeId" | "variableId" | "xsi:type" => DiffSeverity::Critical,
        "textId" | "value" | "defaultValue" | "lowerValue" | "upperValue" | "fixedLength"
        | "menuId" | "accessRights" | "code" | "additionalCode" | "count" | "buttonValue"
        | "xml:lang" | "encoding" | "dynamic" | "excludedFromDataStorage"
        | "modifiesOtherVariables" | "mode" | "type" => DiffSeverity::High,
        "xsi:schemaLocation" => DiffSeverity::Info,
        n if n == "xmlns" || n.starts_with("xmlns:") => DiffSeverity::Low,
        "crc32" | "checkerName" | "checkerVersion" | "releaseDate" | "copyright" | "version"
        | "name" | "ISO15745Part" | "ISO15745Edition" => DiffSeverity::Low,
        _ => DiffSeverity::Medium,
    }
}

fn eds_section(name: &str) -> DiffSeverity {
    let is = |s: &str| name.eq_ignore_ascii_case(s);
    if is("File") || is("Device") {
        DiffSeverity::Critical
    } else if is("Params")
        || is("Assembly")
        || is("Connection Manager")
        || is("Capacity")
        || is("Port")
        || is("Modular")
    {
        DiffSeverity::High
    } else {
        DiffSeverity::Medium
    }
}

fn eds_key(key: &str) -> DiffSeverity {
    let lower = key.to_ascii_lowercase();
    let numbered = |prefix: &str| {
        lower
            .strip_prefix(prefix)
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
    };
    match lower.as_str() {
        "vendcode" | "prodcode" | "prodtype" | "majrev" | "minrev" => DiffSeverity::Critical,
        "desctext" | "createdate" | "createtime" | "moddate" | "modtime" | "revision"
        | "homeurl" | "icon" | "iconcontents" | "catalog" | "object_name" => DiffSeverity::Low,
        k if k.starts_with("max") => DiffSeverity::High,
        _ if ["param", "enum", "assem", "connection", "port", "tspec"]
            .iter()
            .any(|p| numbered(p)) =>
        {
            DiffSeverity::High
        }
        _ => DiffSeverity::Medium,
    }
}
