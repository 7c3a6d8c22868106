// crates/devdesc-rs/src/iodd/menu.rs

//! `UserInterface`: menus, menu items, buttons, role menu sets and
//! process data rendering hints.

use super::datatype::AccessRights;
use super::process_data::Condition;
use crate::ids::{MenuId, TextId, VariableId};
use crate::lexical::Lexical;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Display hints shared by `VariableRef`, `RecordItemRef` and
/// `ProcessDataRecordItemInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayHints {
    pub display_format: Option<String>,
    pub unit_code: Option<String>,
    /// Kept as source text so the spelling survives (`0.1` vs `1E-1`).
    pub gradient: Option<String>,
    pub offset: Option<String>,
}

/// A `ProcessDataRecordItemInfo` inside a `ProcessDataRef`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDataRecordItemInfo {
    pub subindex: Lexical<u8>,
    pub hints: DisplayHints,
    pub order_index: u32,
}

/// A `ProcessDataRef` inside `ProcessDataRefCollection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDataRef {
    pub process_data_id: String,
    pub record_item_infos: Vec<ProcessDataRecordItemInfo>,
    pub order_index: u32,
}

/// A `Button` of a `VariableRef`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub button_value: String,
    pub description: Option<TextId>,
    pub action_started_message: Option<TextId>,
    pub order_index: u32,
}

/// A `VariableRef` menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRefItem {
    pub variable_id: VariableId,
    pub access_right_restriction: Option<AccessRights>,
    pub hints: DisplayHints,
    pub buttons: Vec<MenuButton>,
    pub order_index: u32,
}

/// A `RecordItemRef` menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItemRefItem {
    pub variable_id: VariableId,
    pub subindex: Lexical<u8>,
    pub access_right_restriction: Option<AccessRights>,
    pub hints: DisplayHints,
    pub order_index: u32,
}

/// A `MenuRef` menu item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRefItem {
    pub menu_id: MenuId,
    pub condition: Option<Condition>,
    pub order_index: u32,
}

/// One item of a `Menu`, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuItem {
    Variable(VariableRefItem),
    RecordItem(RecordItemRefItem),
    Menu(MenuRefItem),
}

impl MenuItem {
    /// Deduplication key: `(variable_id, subindex)`. Menu references have none.
    pub fn variable_key(&self) -> Option<(&VariableId, Option<u8>)> {
        match self {
            MenuItem::Variable(v) => Some((&v.variable_id, None)),
            MenuItem::RecordItem(r) => Some((&r.variable_id, Some(r.subindex.get()))),
            MenuItem::Menu(_) => None,
        }
    }

    pub fn order_index(&self) -> u32 {
        match self {
            MenuItem::Variable(v) => v.order_index,
            MenuItem::RecordItem(r) => r.order_index,
            MenuItem::Menu(m) => m.order_index,
        }
    }
}

/// A `Menu` of `MenuCollection`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub id: MenuId,
    pub name: Option<TextId>,
    pub items: Vec<MenuItem>,
    pub order_index: u32,
}

impl Menu {
    /// Buttons across all variable items of this menu.
    pub fn button_count(&self) -> usize {
        self.items
            .iter()
            .map(|i| match i {
                MenuItem::Variable(v) => v.buttons.len(),
                _ => 0,
            })
            .sum()
    }
}

/// A role menu set (`ObserverRoleMenuSet`, `MaintenanceRoleMenuSet`, `SpecialistRoleMenuSet`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMenuSet {
    pub identification_menu: Option<MenuId>,
    pub parameter_menu: Option<MenuId>,
    pub observation_menu: Option<MenuId>,
    pub diagnosis_menu: Option<MenuId>,
}

impl RoleMenuSet {
    /// All menu ids referenced by this set.
    pub fn menu_ids(&self) -> impl Iterator<Item = &MenuId> {
        [
            self.identification_menu.as_ref(),
            self.parameter_menu.as_ref(),
            self.observation_menu.as_ref(),
            self.diagnosis_menu.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// The `UserInterface` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInterfaceMenus {
    /// `ProcessDataRefCollection`; `Some(empty)` for an explicitly empty collection.
    pub process_data_refs: Option<Vec<ProcessDataRef>>,
    pub menus: Vec<Menu>,
    pub observer_role_menu_set: Option<RoleMenuSet>,
    pub maintenance_role_menu_set: Option<RoleMenuSet>,
    pub specialist_role_menu_set: Option<RoleMenuSet>,
}

impl UserInterfaceMenus {
    pub fn menu(&self, id: &MenuId) -> Option<&Menu> {
        self.menus.iter().find(|m| &m.id == id)
    }

    /// The role menu sets that are present.
    pub fn role_menu_sets(&self) -> impl Iterator<Item = &RoleMenuSet> {
        [
            self.observer_role_menu_set.as_ref(),
            self.maintenance_role_menu_set.as_ref(),
            self.specialist_role_menu_set.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_variable_key_distinguishes_subindex() {
        let whole = MenuItem::Variable(VariableRefItem {
            variable_id: VariableId::from("V_A"),
            ..Default::default()
        });
        let item = MenuItem::RecordItem(RecordItemRefItem {
            variable_id: VariableId::from("V_A"),
            subindex: Lexical::new(2),
            ..Default::default()
        });
        assert_ne!(whole.variable_key(), item.variable_key());
        assert_eq!(item.variable_key(), Some((&VariableId::from("V_A"), Some(2))));
    }

    #[test]
    fn test_role_menu_ids() {
        let set = RoleMenuSet {
            identification_menu: Some(MenuId::from("M_Ident")),
            diagnosis_menu: Some(MenuId::from("M_Diag")),
            ..Default::default()
        };
        let ids: Vec<&str> = set.menu_ids().map(|m| m.as_str()).collect();
        assert_eq!(ids, vec!["M_Ident", "M_Diag"]);
    }
}
