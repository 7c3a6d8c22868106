// crates/devdesc-rs-iodd/src/resolver/user_interface.rs

//! `UserInterface`: menus, role menu sets and process data rendering hints.

use super::Context;
use super::process_data::resolve_condition;
use super::utils::text_id;
use crate::model::common::MenuIdRef;
use crate::model::user_interface::{self as model, MenuChild, UserInterface};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    DisplayHints, Menu, MenuButton, MenuItem, MenuRefItem, ProcessDataRecordItemInfo,
    ProcessDataRef, RecordItemRefItem, RoleMenuSet, UserInterfaceMenus, VariableRefItem,
};
use devdesc_rs::{Diagnostic, MenuId, SourceLocation, TextId, VariableId};

pub(super) fn resolve_user_interface(ctx: &mut Context, ui: &UserInterface) -> UserInterfaceMenus {
    let process_data_refs = ui
        .process_data_ref_collection
        .as_ref()
        .map(|c| resolve_process_data_refs(ctx, &c.process_data_ref));

    let menus = ui
        .menu_collection
        .menu
        .iter()
        .enumerate()
        .map(|(i, m)| resolve_menu(ctx, m, i as u32))
        .collect();

    UserInterfaceMenus {
        process_data_refs,
        menus,
        observer_role_menu_set: ui.observer_role_menu_set.as_ref().map(resolve_role_set),
        maintenance_role_menu_set: ui.maintenance_role_menu_set.as_ref().map(resolve_role_set),
        specialist_role_menu_set: ui.specialist_role_menu_set.as_ref().map(resolve_role_set),
    }
}

fn resolve_process_data_refs(ctx: &mut Context, refs: &[model::ProcessDataRef]) -> Vec<ProcessDataRef> {
    refs.iter()
        .enumerate()
        .map(|(i, r)| {
            let path = format!("ProcessDataRefCollection/ProcessDataRef[{}]", r.process_data_id);
            let mut infos = Vec::with_capacity(r.record_item_info.len());
            for info in &r.record_item_info {
                let Some(subindex) = ctx.number(&info.subindex, "subindex", &path) else {
                    continue;
                };
                infos.push(ProcessDataRecordItemInfo {
                    subindex,
                    hints: DisplayHints {
                        display_format: info.display_format.clone(),
                        unit_code: info.unit_code.clone(),
                        gradient: info.gradient.clone(),
                        offset: info.offset.clone(),
                    },
                    order_index: infos.len() as u32,
                });
            }
            ProcessDataRef {
                process_data_id: r.process_data_id.clone(),
                record_item_infos: infos,
                order_index: i as u32,
            }
        })
        .collect()
}

/// Resolves one menu. Items keep their source position in `order_index`;
/// a second item for the same `(variable_id, subindex)` is dropped.
fn resolve_menu(ctx: &mut Context, m: &model::Menu, order_index: u32) -> Menu {
    let path = format!("MenuCollection/Menu[{}]", m.id);
    let mut menu = Menu {
        id: MenuId::from(m.id.as_str()),
        name: None,
        items: Vec::new(),
        order_index,
    };
    let mut seen: BTreeSet<(String, Option<u8>)> = BTreeSet::new();

    for (i, child) in m.children.iter().enumerate() {
        let order_index = i as u32;
        let item = match child {
            MenuChild::Name(t) => {
                menu.name.get_or_insert_with(|| TextId::from(t.text_id.as_str()));
                continue;
            }
            MenuChild::VariableRef(v) => MenuItem::Variable(resolve_variable_ref(ctx, v, order_index, &path)),
            MenuChild::RecordItemRef(r) => {
                let Some(subindex) = ctx.number(&r.subindex, "subindex", &path) else {
                    continue;
                };
                MenuItem::RecordItem(RecordItemRefItem {
                    variable_id: VariableId::from(r.variable_id.as_str()),
                    subindex,
                    access_right_restriction: ctx.access(
                        r.access_right_restriction.as_ref(),
                        "accessRightRestriction",
                        &path,
                    ),
                    hints: DisplayHints {
                        display_format: r.display_format.clone(),
                        unit_code: r.unit_code.clone(),
                        gradient: r.gradient.clone(),
                        offset: r.offset.clone(),
                    },
                    order_index,
                })
            }
            MenuChild::MenuRef(r) => MenuItem::Menu(MenuRefItem {
                menu_id: MenuId::from(r.menu_id.as_str()),
                condition: r
                    .condition
                    .as_ref()
                    .map(|c| resolve_condition(ctx, c, &path)),
                order_index,
            }),
            MenuChild::Unknown => {
                ctx.unsupported("Menu", &path);
                continue;
            }
        };

        if let Some((variable_id, subindex)) = item.variable_key() {
            let key = (String::from(variable_id.as_str()), subindex);
            if seen.contains(&key) {
                ctx.push(
                    Diagnostic::warn(
                        "IODD-R009",
                        format!(
                            "duplicate menu item for variable '{}' subindex {:?}; first kept",
                            variable_id, subindex
                        ),
                    )
                    .with_location(SourceLocation::section(path.as_str())),
                );
                continue;
            }
            seen.insert(key);
        }
        menu.items.push(item);
    }
    menu
}

fn resolve_variable_ref(
    ctx: &mut Context,
    v: &model::VariableRef,
    order_index: u32,
    path: &str,
) -> VariableRefItem {
    VariableRefItem {
        variable_id: VariableId::from(v.variable_id.as_str()),
        access_right_restriction: ctx.access(
            v.access_right_restriction.as_ref(),
            "accessRightRestriction",
            path,
        ),
        hints: DisplayHints {
            display_format: v.display_format.clone(),
            unit_code: v.unit_code.clone(),
            gradient: v.gradient.clone(),
            offset: v.offset.clone(),
        },
        buttons: v
            .button
            .iter()
            .enumerate()
            .map(|(i, b)| MenuButton {
                button_value: b.button_value.clone(),
                description: text_id(b.description.as_ref()),
                action_started_message: text_id(b.action_started_message.as_ref()),
                order_index: i as u32,
            })
            .collect(),
        order_index,
    }
}

fn resolve_role_set(set: &model::RoleMenuSet) -> RoleMenuSet {
    let id = |r: &Option<MenuIdRef>| r.as_ref().map(|m| MenuId::from(m.menu_id.as_str()));
    RoleMenuSet {
        identification_menu: id(&set.identification_menu),
        parameter_menu: id(&set.parameter_menu),
        observation_menu: id(&set.observation_menu),
        diagnosis_menu: id(&set.diagnosis_menu),
    }
}
