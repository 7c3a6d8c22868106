// crates/devdesc-rs-iodd/src/resolver/variable.rs

//! `VariableCollection`: variables, standard variable references and
//! direct parameter overlays share one `order_index` counter.

use super::Context;
use super::datatype::{both_forms, no_form, resolve_datatype};
use crate::model::variable::{
    self as model, StdVariableRefChild, VariableChild, VariableCollection, VariableCollectionItem,
};
use alloc::format;
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    DatatypeChoice, DeviceProfile, DirectParameterOverlay, Parameter, RecordItemInfo, StdRefChild,
    StdVariableRef,
};
use devdesc_rs::{DatatypeId, Diagnostic, SourceLocation, TextId, VariableId};

pub(super) fn resolve_variables(
    ctx: &mut Context,
    collection: &VariableCollection,
    profile: &mut DeviceProfile,
) {
    for (i, item) in collection.items.iter().enumerate() {
        let order_index = i as u32;
        match item {
            VariableCollectionItem::Variable(v) => {
                profile.parameters.push(resolve_parameter(ctx, v, order_index));
            }
            VariableCollectionItem::StdVariableRef(r) => {
                profile
                    .std_variable_refs
                    .push(resolve_std_ref(ctx, r, order_index));
            }
            VariableCollectionItem::DirectParameterOverlay(o) => {
                profile
                    .direct_parameter_overlays
                    .push(resolve_overlay(ctx, o, order_index));
            }
            VariableCollectionItem::Unknown => {
                ctx.unsupported("VariableCollection", "VariableCollection");
            }
        }
    }
    log::debug!(
        "VariableCollection: {} variables, {} standard refs, {} overlays",
        profile.parameters.len(),
        profile.std_variable_refs.len(),
        profile.direct_parameter_overlays.len()
    );
}

/// The pieces shared by `Variable` and `DirectParameterOverlay`.
struct VariableBody {
    datatype: Option<DatatypeChoice>,
    record_item_info: Vec<RecordItemInfo>,
    name: Option<TextId>,
    description: Option<TextId>,
}

/// Walks the children in source order. The first datatype form wins.
fn resolve_body(ctx: &mut Context, children: &[VariableChild], path: &str) -> VariableBody {
    let mut body = VariableBody {
        datatype: None,
        record_item_info: Vec::new(),
        name: None,
        description: None,
    };
    for child in children {
        match child {
            VariableChild::Datatype(dt) => {
                if body.datatype.is_some() {
                    both_forms(ctx, path);
                } else {
                    let inner_path = format!("{}/Datatype", path);
                    body.datatype = Some(DatatypeChoice::Inline(resolve_datatype(
                        ctx,
                        dt,
                        &inner_path,
                    )));
                }
            }
            VariableChild::DatatypeRef(r) => {
                if body.datatype.is_some() {
                    both_forms(ctx, path);
                } else {
                    body.datatype = Some(DatatypeChoice::Ref(DatatypeId::from(
                        r.datatype_id.as_str(),
                    )));
                }
            }
            VariableChild::RecordItemInfo(info) => {
                let order_index = body.record_item_info.len() as u32;
                if let Some(info) = resolve_record_item_info(ctx, info, order_index, path) {
                    body.record_item_info.push(info);
                }
            }
            VariableChild::Name(t) => {
                body.name.get_or_insert_with(|| TextId::from(t.text_id.as_str()));
            }
            VariableChild::Description(t) => {
                body.description
                    .get_or_insert_with(|| TextId::from(t.text_id.as_str()));
            }
            VariableChild::Unknown => ctx.unsupported("Variable", path),
        }
    }
    body
}

fn resolve_record_item_info(
    ctx: &mut Context,
    info: &model::RecordItemInfo,
    order_index: u32,
    path: &str,
) -> Option<RecordItemInfo> {
    Some(RecordItemInfo {
        subindex: ctx.number(&info.subindex, "subindex", path)?,
        default_value: info.default_value.clone(),
        excluded_from_data_storage: ctx.flag(
            info.excluded_from_data_storage.as_ref(),
            "excludedFromDataStorage",
            path,
        ),
        modifies_other_variables: ctx.flag(
            info.modifies_other_variables.as_ref(),
            "modifiesOtherVariables",
            path,
        ),
        order_index,
    })
}

fn resolve_parameter(ctx: &mut Context, v: &model::Variable, order_index: u32) -> Parameter {
    let path = format!("VariableCollection/Variable[{}]", v.id);
    let index = match &v.index {
        Some(raw) => Some(ctx.required(raw, "index", &path)),
        None => {
            ctx.push(
                Diagnostic::error("IODD-R006", "Variable has no @index")
                    .with_location(SourceLocation::section(path.as_str())),
            );
            None
        }
    };
    let body = resolve_body(ctx, &v.children, &path);
    if body.datatype.is_none() {
        no_form(ctx, &path);
    }
    let resolved = body.datatype.as_ref().and_then(|c| ctx.resolve_kind(c));

    Parameter {
        id: VariableId::from(v.id.as_str()),
        index,
        access_rights: ctx.access(v.access_rights.as_ref(), "accessRights", &path),
        default_value: v.default_value.clone(),
        dynamic: ctx.flag(v.dynamic.as_ref(), "dynamic", &path),
        modifies_other_variables: ctx.flag(
            v.modifies_other_variables.as_ref(),
            "modifiesOtherVariables",
            &path,
        ),
        excluded_from_data_storage: ctx.flag(
            v.excluded_from_data_storage.as_ref(),
            "excludedFromDataStorage",
            &path,
        ),
        datatype: body.datatype,
        resolved,
        record_item_info: body.record_item_info,
        name: body.name,
        description: body.description,
        order_index,
    }
}

fn resolve_overlay(
    ctx: &mut Context,
    o: &model::Variable,
    order_index: u32,
) -> DirectParameterOverlay {
    let path = format!("VariableCollection/DirectParameterOverlay[{}]", o.id);
    let body = resolve_body(ctx, &o.children, &path);
    DirectParameterOverlay {
        id: VariableId::from(o.id.as_str()),
        index: ctx.opt_number(o.index.as_ref(), "index", &path),
        access_rights: ctx.access(o.access_rights.as_ref(), "accessRights", &path),
        default_value: o.default_value.clone(),
        dynamic: ctx.flag(o.dynamic.as_ref(), "dynamic", &path),
        modifies_other_variables: ctx.flag(
            o.modifies_other_variables.as_ref(),
            "modifiesOtherVariables",
            &path,
        ),
        excluded_from_data_storage: ctx.flag(
            o.excluded_from_data_storage.as_ref(),
            "excludedFromDataStorage",
            &path,
        ),
        datatype: body.datatype,
        record_item_info: body.record_item_info,
        name: body.name,
        description: body.description,
        order_index,
    }
}

/// Standard variables keep their `VariableId`; no numeric index is derived.
fn resolve_std_ref(ctx: &mut Context, r: &model::StdVariableRef, order_index: u32) -> StdVariableRef {
    let path = format!("VariableCollection/StdVariableRef[{}]", r.id);
    let mut children = Vec::with_capacity(r.children.len());
    for child in &r.children {
        let child = match child {
            StdVariableRefChild::StdSingleValueRef(sv) => StdRefChild::SingleValueRef {
                value: sv.value.clone(),
            },
            StdVariableRefChild::SingleValue(sv) => StdRefChild::SingleValue {
                value: sv.value.clone(),
                xsi_type: sv.xsi_type.clone(),
                text_id: sv.name.as_ref().map(|t| TextId::from(t.text_id.as_str())),
            },
            StdVariableRefChild::ValueRange(vr) => StdRefChild::ValueRange {
                lower_value: vr.lower_value.clone(),
                upper_value: vr.upper_value.clone(),
                xsi_type: vr.xsi_type.clone(),
                text_id: vr.name.as_ref().map(|t| TextId::from(t.text_id.as_str())),
            },
            StdVariableRefChild::StdValueRangeRef(vr) => StdRefChild::ValueRangeRef {
                lower_value: vr.lower_value.clone(),
                upper_value: vr.upper_value.clone(),
            },
            StdVariableRefChild::StdRecordItemRef(ri) => {
                let Some(subindex) = ctx.number(&ri.subindex, "subindex", &path) else {
                    continue;
                };
                StdRefChild::RecordItemRef {
                    subindex,
                    default_value: ri.default_value.clone(),
                    excluded_from_data_storage: ctx.flag(
                        ri.excluded_from_data_storage.as_ref(),
                        "excludedFromDataStorage",
                        &path,
                    ),
                }
            }
            StdVariableRefChild::Unknown => {
                ctx.unsupported("StdVariableRef", &path);
                continue;
            }
        };
        children.push(child);
    }

    StdVariableRef {
        id: VariableId::from(r.id.as_str()),
        default_value: r.default_value.clone(),
        fixed_length_restriction: ctx.opt_number(
            r.fixed_length_restriction.as_ref(),
            "fixedLengthRestriction",
            &path,
        ),
        excluded_from_data_storage: ctx.flag(
            r.excluded_from_data_storage.as_ref(),
            "excludedFromDataStorage",
            &path,
        ),
        children,
        order_index,
    }
}
