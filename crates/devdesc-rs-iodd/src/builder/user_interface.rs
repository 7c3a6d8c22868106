// crates/devdesc-rs-iodd/src/builder/user_interface.rs

use super::device_function::build_condition;
use super::text_ref;
use crate::model::common::MenuIdRef;
use crate::model::user_interface::{
    self as model, MenuChild, MenuCollection, ProcessDataRefCollection, UserInterface,
};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use devdesc_rs::MenuId;
use devdesc_rs::iodd::{
    AccessRights, Menu, MenuItem, ProcessDataRef, RoleMenuSet, UserInterfaceMenus,
};

pub(super) fn build_user_interface(ui: &UserInterfaceMenus) -> UserInterface {
    let mut menus: Vec<&Menu> = ui.menus.iter().collect();
    menus.sort_by_key(|m| m.order_index);
    UserInterface {
        process_data_ref_collection: ui
            .process_data_refs
            .as_deref()
            .map(build_process_data_refs),
        menu_collection: MenuCollection {
            menu: menus.into_iter().map(build_menu).collect(),
        },
        observer_role_menu_set: ui.observer_role_menu_set.as_ref().map(build_role_set),
        maintenance_role_menu_set: ui.maintenance_role_menu_set.as_ref().map(build_role_set),
        specialist_role_menu_set: ui.specialist_role_menu_set.as_ref().map(build_role_set),
    }
}

fn build_process_data_refs(refs: &[ProcessDataRef]) -> ProcessDataRefCollection {
    let mut sorted: Vec<&ProcessDataRef> = refs.iter().collect();
    sorted.sort_by_key(|r| r.order_index);
    ProcessDataRefCollection {
        process_data_ref: sorted
            .into_iter()
            .map(|r| {
                let mut infos: Vec<_> = r.record_item_infos.iter().collect();
                infos.sort_by_key(|i| i.order_index);
                model::ProcessDataRef {
                    process_data_id: r.process_data_id.clone(),
                    record_item_info: infos
                        .into_iter()
                        .map(|i| model::ProcessDataRecordItemInfo {
                            subindex: i.subindex.to_string(),
                            gradient: i.hints.gradient.clone(),
                            offset: i.hints.offset.clone(),
                            unit_code: i.hints.unit_code.clone(),
                            display_format: i.hints.display_format.clone(),
                        })
                        .collect(),
                }
            })
            .collect(),
    }
}

fn access(a: Option<AccessRights>) -> Option<String> {
    a.map(|a| a.as_str().to_string())
}

/// `Name` comes first, items follow in `order_index` order.
fn build_menu(menu: &Menu) -> model::Menu {
    let mut children = Vec::with_capacity(menu.items.len() + 1);
    if let Some(name) = text_ref(menu.name.as_ref()) {
        children.push(MenuChild::Name(name));
    }
    let mut items: Vec<&MenuItem> = menu.items.iter().collect();
    items.sort_by_key(|i| i.order_index());
    for item in items {
        children.push(match item {
            MenuItem::Variable(v) => {
                let mut buttons: Vec<_> = v.buttons.iter().collect();
                buttons.sort_by_key(|b| b.order_index);
                MenuChild::VariableRef(model::VariableRef {
                    variable_id: v.variable_id.as_str().to_string(),
                    access_right_restriction: access(v.access_right_restriction),
                    display_format: v.hints.display_format.clone(),
                    unit_code: v.hints.unit_code.clone(),
                    gradient: v.hints.gradient.clone(),
                    offset: v.hints.offset.clone(),
                    button: buttons
                        .into_iter()
                        .map(|b| model::Button {
                            button_value: b.button_value.clone(),
                            description: text_ref(b.description.as_ref()),
                            action_started_message: text_ref(b.action_started_message.as_ref()),
                        })
                        .collect(),
                })
            }
            MenuItem::RecordItem(r) => MenuChild::RecordItemRef(model::RecordItemRef {
                variable_id: r.variable_id.as_str().to_string(),
                subindex: r.subindex.to_string(),
                access_right_restriction: access(r.access_right_restriction),
                display_format: r.hints.display_format.clone(),
                unit_code: r.hints.unit_code.clone(),
                gradient: r.hints.gradient.clone(),
                offset: r.hints.offset.clone(),
            }),
            MenuItem::Menu(m) => MenuChild::MenuRef(model::MenuRef {
                menu_id: m.menu_id.as_str().to_string(),
                condition: m.condition.as_ref().map(build_condition),
            }),
        });
    }
    model::Menu {
        id: menu.id.as_str().to_string(),
        children,
    }
}

fn build_role_set(set: &RoleMenuSet) -> model::RoleMenuSet {
    let id = |m: &Option<MenuId>| {
        m.as_ref().map(|m| MenuIdRef {
            menu_id: m.as_str().to_string(),
        })
    };
    model::RoleMenuSet {
        identification_menu: id(&set.identification_menu),
        parameter_menu: id(&set.parameter_menu),
        observation_menu: id(&set.observation_menu),
        diagnosis_menu: id(&set.diagnosis_menu),
    }
}
