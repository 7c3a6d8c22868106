// crates/devdesc-rs/src/iodd/mod.rs

//! Canonical model of an IO-Link device description (IODD).
//!
//! `DeviceProfile` is a complete snapshot of one parsed document. Collections
//! that the source may omit entirely are `Option<Vec<_>>`, so an explicitly
//! empty collection and an absent one stay distinguishable.

use crate::diagnostic::{Diagnostic, SourceLocation};
use crate::ids::{DatatypeId, MenuId, TextId, VariableId};
use crate::lexical::Lexical;
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub mod comm;
pub mod datatype;
pub mod diagnosis;
pub mod identity;
pub mod menu;
pub mod process_data;
pub mod text;
pub mod variable;

pub use comm::{
    BitrateSpelling, CommunicationProfile, Connection, EventTrigger, PhysicalLayer, TestConfig,
    TestConfiguration, TransportLayers, Wire,
};
pub use datatype::{
    AccessRights, CustomDatatype, Datatype, DatatypeChoice, DatatypeKind, RecordItem,
    ResolvedDatatype, SingleValue, ValueRange,
};
pub use diagnosis::{
    ErrorType, ErrorTypeEntry, Event, EventEntry, EventType, StdErrorTypeRef, StdEventRef,
};
pub use identity::{DeviceFeatures, DeviceInfo, DeviceVariant, SupportedAccessLocks, VendorInfo};
pub use menu::{
    DisplayHints, Menu, MenuButton, MenuItem, MenuRefItem, ProcessDataRecordItemInfo,
    ProcessDataRef, RecordItemRefItem, RoleMenuSet, UserInterfaceMenus, VariableRefItem,
};
pub use process_data::{Condition, ProcessData, ProcessDataItem};
pub use text::{LanguageBlock, TextEntry, TextTable};
pub use variable::{
    DirectParameterOverlay, Parameter, RecordItemInfo, StdRefChild, StdVariableRef,
    VariableEntry,
};

/// Default IODD namespace.
pub const IODD_NAMESPACE: &str = "http://www.io-link.com/IODD/2010/10";
/// XML schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Namespace attributes of the `IODevice` root, echoed on reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRoot {
    pub xmlns: Option<String>,
    pub xmlns_xsi: Option<String>,
    pub schema_location: Option<String>,
}

impl Default for DocumentRoot {
    fn default() -> Self {
        Self {
            xmlns: Some(String::from(IODD_NAMESPACE)),
            xmlns_xsi: Some(String::from(XSI_NAMESPACE)),
            schema_location: None,
        }
    }
}

/// `DocumentInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub version: Option<String>,
    pub release_date: Option<String>,
    pub copyright: Option<String>,
}

/// `ISO15745Reference` of the profile header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso15745Reference {
    pub part: String,
    pub edition: String,
    pub technology: String,
}

/// `ProfileHeader`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHeader {
    pub identification: String,
    pub revision: String,
    pub name: String,
    pub source: String,
    pub class_id: String,
    pub iso15745_reference: Option<Iso15745Reference>,
}

/// `Checker` of the stamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checker {
    pub name: String,
    pub version: String,
}

/// `Stamp` with the document checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub crc: String,
    pub checker: Option<Checker>,
}

/// A parsed IODD document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub root: DocumentRoot,
    pub document_info: Option<DocumentInfo>,
    pub profile_header: Option<ProfileHeader>,

    /// True if the source had a `DeviceIdentity` element.
    pub has_device_identity: bool,
    /// True if the source had a `DeviceFunction` element (even an empty one).
    pub has_device_function: bool,

    pub vendor: VendorInfo,
    pub device: DeviceInfo,
    /// `DeviceVariantCollection`.
    pub variants: Option<Vec<DeviceVariant>>,

    pub features: Option<DeviceFeatures>,
    /// `DatatypeCollection`.
    pub custom_datatypes: Option<Vec<CustomDatatype>>,

    /// True if the source had a `VariableCollection` element (even an empty one).
    pub has_variable_collection: bool,
    /// `Variable`, `StdVariableRef` and `DirectParameterOverlay` share one
    /// `order_index` counter.
    pub parameters: Vec<Parameter>,
    pub std_variable_refs: Vec<StdVariableRef>,
    pub direct_parameter_overlays: Vec<DirectParameterOverlay>,

    pub process_data: Option<Vec<ProcessData>>,
    pub error_types: Option<Vec<ErrorTypeEntry>>,
    pub events: Option<Vec<EventEntry>>,
    pub user_interface: Option<UserInterfaceMenus>,
    pub communication: Option<CommunicationProfile>,

    pub texts: TextTable,
    pub stamp: Option<Stamp>,

    /// Non-fatal diagnostics from the parse that produced this snapshot.
    pub diagnostics: Vec<Diagnostic>,
}

impl DeviceProfile {
    /// All `VariableCollection` members merged in source order.
    pub fn variable_entries(&self) -> Vec<VariableEntry<'_>> {
        let mut entries: Vec<VariableEntry<'_>> = self
            .parameters
            .iter()
            .map(VariableEntry::Variable)
            .chain(self.std_variable_refs.iter().map(VariableEntry::StdRef))
            .chain(
                self.direct_parameter_overlays
                    .iter()
                    .map(VariableEntry::Overlay),
            )
            .collect();
        entries.sort_by_key(|e| e.order_index());
        entries
    }

    pub fn parameter(&self, id: &VariableId) -> Option<&Parameter> {
        self.parameters.iter().find(|p| &p.id == id)
    }

    pub fn parameter_by_index(&self, index: u16) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.index.as_ref().map(Lexical::get) == Some(index))
    }

    pub fn custom_datatype(&self, id: &DatatypeId) -> Option<&CustomDatatype> {
        self.custom_datatypes
            .as_ref()
            .and_then(|dts| dts.iter().find(|d| &d.id == id))
    }

    /// True if `id` names a variable, standard variable or overlay.
    pub fn has_variable(&self, id: &VariableId) -> bool {
        self.variable_entries().iter().any(|e| e.id() == id)
    }

    /// Checks every cross-reference against the profile's own tables.
    ///
    /// Returns one WARN diagnostic per unresolved reference. Standard variables
    /// (`V_*` ids defined by the IO-Link standard) are not required to be
    /// declared locally when referenced from menus or conditions.
    pub fn validate_references(&self) -> Vec<Diagnostic> {
        let mut refs = References::default();
        self.collect_references(&mut refs);

        let mut diagnostics = Vec::new();
        for text_id in &refs.texts {
            if !self.texts.contains(text_id) {
                diagnostics.push(unresolved("IODD-R001", "textId", text_id.as_str()));
            }
        }
        for dt_id in &refs.datatypes {
            if self.custom_datatype(dt_id).is_none() {
                diagnostics.push(unresolved("IODD-R002", "datatypeId", dt_id.as_str()));
            }
        }
        for var_id in &refs.variables {
            if !self.has_variable(var_id) && !is_standard_variable_id(var_id) {
                diagnostics.push(unresolved("IODD-R003", "variableId", var_id.as_str()));
            }
        }
        let known_menus: BTreeSet<&MenuId> = self
            .user_interface
            .iter()
            .flat_map(|ui| ui.menus.iter().map(|m| &m.id))
            .collect();
        for menu_id in &refs.menus {
            if !known_menus.contains(menu_id) {
                diagnostics.push(unresolved("IODD-R004", "menuId", menu_id.as_str()));
            }
        }
        if !diagnostics.is_empty() {
            log::debug!("{} unresolved cross-references", diagnostics.len());
        }
        diagnostics
    }

    fn collect_references<'a>(&'a self, refs: &mut References<'a>) {
        refs.text(self.vendor.vendor_text.as_ref());
        refs.text(self.vendor.vendor_url.as_ref());
        refs.text(self.device.device_name.as_ref());
        refs.text(self.device.device_family.as_ref());
        for v in self.variants.iter().flatten() {
            refs.text(v.name.as_ref());
            refs.text(v.description.as_ref());
        }
        for dt in self.custom_datatypes.iter().flatten() {
            refs.datatype_body(&dt.datatype);
        }
        for p in &self.parameters {
            refs.text(p.name.as_ref());
            refs.text(p.description.as_ref());
            if let Some(choice) = &p.datatype {
                refs.choice(choice);
            }
        }
        for r in &self.std_variable_refs {
            for child in &r.children {
                match child {
                    StdRefChild::SingleValue { text_id, .. }
                    | StdRefChild::ValueRange { text_id, .. } => refs.text(text_id.as_ref()),
                    _ => {}
                }
            }
        }
        for o in &self.direct_parameter_overlays {
            refs.text(o.name.as_ref());
            refs.text(o.description.as_ref());
            if let Some(choice) = &o.datatype {
                refs.choice(choice);
            }
        }
        for pd in self.process_data.iter().flatten() {
            if let Some(c) = &pd.condition {
                refs.variables.insert(&c.variable_id);
            }
            for item in pd.input.iter().chain(pd.output.iter()) {
                refs.text(item.name.as_ref());
                if let Some(choice) = &item.datatype {
                    refs.choice(choice);
                }
            }
        }
        for e in self.error_types.iter().flatten() {
            if let ErrorTypeEntry::Custom(e) = e {
                refs.text(e.name.as_ref());
                refs.text(e.description.as_ref());
            }
        }
        for e in self.events.iter().flatten() {
            if let EventEntry::Custom(e) = e {
                refs.text(e.name.as_ref());
                refs.text(e.description.as_ref());
            }
        }
        if let Some(ui) = &self.user_interface {
            for menu in &ui.menus {
                refs.text(menu.name.as_ref());
                for item in &menu.items {
                    match item {
                        MenuItem::Variable(v) => {
                            refs.variables.insert(&v.variable_id);
                            for b in &v.buttons {
                                refs.text(b.description.as_ref());
                                refs.text(b.action_started_message.as_ref());
                            }
                        }
                        MenuItem::RecordItem(r) => {
                            refs.variables.insert(&r.variable_id);
                        }
                        MenuItem::Menu(m) => {
                            refs.menus.insert(&m.menu_id);
                            if let Some(c) = &m.condition {
                                refs.variables.insert(&c.variable_id);
                            }
                        }
                    }
                }
            }
            for set in ui.role_menu_sets() {
                for id in set.menu_ids() {
                    refs.menus.insert(id);
                }
            }
        }
    }
}

/// Standard variables are defined by the IO-Link specification rather than
/// the device file.
pub fn is_standard_variable_id(id: &VariableId) -> bool {
    matches!(
        id.as_str(),
        "V_DirectParameters_1"
            | "V_DirectParameters_2"
            | "V_SystemCommand"
            | "V_DeviceAccessLocks"
            | "V_VendorName"
            | "V_VendorText"
            | "V_ProductName"
            | "V_ProductID"
            | "V_ProductText"
            | "V_SerialNumber"
            | "V_HardwareRevision"
            | "V_FirmwareRevision"
            | "V_ApplicationSpecificTag"
            | "V_FunctionTag"
            | "V_LocationTag"
            | "V_ErrorCount"
            | "V_DeviceStatus"
            | "V_DetailedDeviceStatus"
            | "V_ProcessDataInput"
            | "V_ProcessDataOutput"
            | "V_OfflineCommand"
            | "V_ProfileCharacteristic"
            | "V_PDInputDescriptor"
            | "V_PDOutputDescriptor"
    )
}

fn unresolved(code: &str, kind: &str, id: &str) -> Diagnostic {
    Diagnostic::warn(code, format!("unresolved {} '{}'", kind, id))
        .with_location(SourceLocation::section(kind))
}

#[derive(Default)]
struct References<'a> {
    texts: BTreeSet<&'a TextId>,
    datatypes: BTreeSet<&'a DatatypeId>,
    variables: BTreeSet<&'a VariableId>,
    menus: BTreeSet<&'a MenuId>,
}

impl<'a> References<'a> {
    fn text(&mut self, id: Option<&'a TextId>) {
        if let Some(id) = id {
            self.texts.insert(id);
        }
    }

    fn choice(&mut self, choice: &'a DatatypeChoice) {
        match choice {
            DatatypeChoice::Ref(id) => {
                self.datatypes.insert(id);
            }
            DatatypeChoice::Inline(dt) => self.datatype_body(dt),
        }
    }

    fn datatype_body(&mut self, dt: &'a Datatype) {
        for sv in &dt.single_values {
            self.text(sv.text_id.as_ref());
        }
        for vr in &dt.value_ranges {
            self.text(vr.text_id.as_ref());
        }
        for ri in &dt.record_items {
            self.text(ri.name.as_ref());
            self.text(ri.description.as_ref());
            self.choice(&ri.datatype);
        }
        if let Some(element) = &dt.element {
            self.choice(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn parameter(id: &str, index: u16, order_index: u32) -> Parameter {
        Parameter {
            id: VariableId::from(id),
            index: Some(Lexical::new(index)),
            access_rights: Some(AccessRights::Rw),
            default_value: None,
            dynamic: None,
            modifies_other_variables: None,
            excluded_from_data_storage: None,
            datatype: Some(DatatypeChoice::Ref(DatatypeId::from("DT_Missing"))),
            resolved: None,
            record_item_info: vec![],
            name: Some(TextId::from("TI_Name")),
            description: None,
            order_index,
        }
    }

    #[test]
    fn test_variable_entries_merge_by_order_index() {
        let profile = DeviceProfile {
            parameters: vec![parameter("V_B", 65, 2), parameter("V_A", 64, 0)],
            std_variable_refs: vec![StdVariableRef {
                id: VariableId::from("V_VendorName"),
                order_index: 1,
                ..Default::default()
            }],
            ..Default::default()
        };
        let ids: Vec<&str> = profile
            .variable_entries()
            .iter()
            .map(|e| e.id().as_str())
            .collect();
        assert_eq!(ids, vec!["V_A", "V_VendorName", "V_B"]);
    }

    #[test]
    fn test_parameter_by_index_matches_value_not_spelling() {
        let mut padded = parameter("V_A", 64, 0);
        padded.index = Some(Lexical::parsed(64, "0064"));
        let mut missing = parameter("V_B", 0, 1);
        missing.index = None;
        let profile = DeviceProfile {
            parameters: vec![missing, padded],
            ..Default::default()
        };
        assert_eq!(profile.parameter_by_index(64).map(|p| p.id.as_str()), Some("V_A"));
        assert!(profile.parameter_by_index(0).is_none());
    }

    #[test]
    fn test_validate_references_reports_unresolved() {
        let mut profile = DeviceProfile {
            parameters: vec![parameter("V_A", 64, 0)],
            ..Default::default()
        };
        profile.texts.entries.push(TextEntry {
            text_id: TextId::from("TI_Name"),
            language: "en".to_string(),
            value: "A".to_string(),
            xml_order: 0,
        });
        profile.user_interface = Some(UserInterfaceMenus {
            menus: vec![Menu {
                id: MenuId::from("M_Main"),
                items: vec![
                    MenuItem::Variable(VariableRefItem {
                        variable_id: VariableId::from("V_SerialNumber"),
                        ..Default::default()
                    }),
                    MenuItem::Menu(MenuRefItem {
                        menu_id: MenuId::from("M_Gone"),
                        ..Default::default()
                    }),
                ],
                ..Default::default()
            }],
            ..Default::default()
        });

        let diags = profile.validate_references();
        let codes: Vec<&str> = diags.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, vec!["IODD-R002", "IODD-R004"]);
    }
}
