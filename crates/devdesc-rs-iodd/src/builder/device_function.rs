// crates/devdesc-rs-iodd/src/builder/device_function.rs

//! `DeviceFunction`: features, variables, process data, errors and events.

use super::datatype::{build_collection, build_datatype, split_choice};
use super::user_interface::build_user_interface;
use super::{spelled, text_ref};
use crate::model::common;
use crate::model::device_function::{DeviceFunction, Features, SupportedAccessLocks};
use crate::model::diagnosis::{
    self as model_diag, ErrorTypeCollection, ErrorTypeItem, EventCollection, EventItem,
};
use crate::model::process_data::{self as model_pd, ProcessDataCollection};
use crate::model::variable::{
    self as model_var, StdVariableRefChild, VariableChild, VariableCollection,
    VariableCollectionItem,
};
use crate::model::common::DatatypeRef;
use crate::model::datatype::{SingleValue, ValueRange};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    AccessRights, Condition, DatatypeChoice, DeviceFeatures, DeviceProfile, ErrorTypeEntry,
    EventEntry, ProcessData, ProcessDataItem, RecordItemInfo, StdRefChild, VariableEntry,
};
use devdesc_rs::TextId;

/// Returns `None` when the source had no `DeviceFunction` and the profile has
/// nothing that lives in it.
pub(super) fn build_device_function(profile: &DeviceProfile) -> Option<DeviceFunction> {
    let function = DeviceFunction {
        features: profile.features.as_ref().map(build_features),
        datatype_collection: profile.custom_datatypes.as_deref().map(build_collection),
        variable_collection: profile
            .has_variable_collection
            .then(|| build_variables(profile)),
        process_data_collection: profile.process_data.as_deref().map(build_process_data),
        error_type_collection: profile.error_types.as_deref().map(build_error_types),
        event_collection: profile.events.as_deref().map(build_events),
        user_interface: profile.user_interface.as_ref().map(build_user_interface),
    };
    (profile.has_device_function || function != DeviceFunction::default()).then_some(function)
}

fn build_features(f: &DeviceFeatures) -> Features {
    Features {
        block_parameter: spelled(f.block_parameter.as_ref()),
        data_storage: spelled(f.data_storage.as_ref()),
        profile_characteristic: f.profile_characteristic.clone(),
        supported_access_locks: f
            .supported_access_locks
            .as_ref()
            .map(|l| SupportedAccessLocks {
                parameter: spelled(l.parameter.as_ref()),
                data_storage: spelled(l.data_storage.as_ref()),
                local_parameterization: spelled(l.local_parameterization.as_ref()),
                local_user_interface: spelled(l.local_user_interface.as_ref()),
            }),
    }
}

fn access(a: Option<AccessRights>) -> Option<String> {
    a.map(|a| a.as_str().to_string())
}

/// Emits the merged `VariableCollection` in `order_index` order.
fn build_variables(profile: &DeviceProfile) -> VariableCollection {
    let items = profile
        .variable_entries()
        .into_iter()
        .map(|entry| match entry {
            VariableEntry::Variable(p) => VariableCollectionItem::Variable(model_var::Variable {
                id: p.id.as_str().to_string(),
                index: spelled(p.index.as_ref()),
                access_rights: access(p.access_rights),
                default_value: p.default_value.clone(),
                dynamic: spelled(p.dynamic.as_ref()),
                modifies_other_variables: spelled(p.modifies_other_variables.as_ref()),
                excluded_from_data_storage: spelled(p.excluded_from_data_storage.as_ref()),
                children: variable_children(
                    p.datatype.as_ref(),
                    &p.record_item_info,
                    p.name.as_ref(),
                    p.description.as_ref(),
                ),
            }),
            VariableEntry::Overlay(o) => {
                VariableCollectionItem::DirectParameterOverlay(model_var::Variable {
                    id: o.id.as_str().to_string(),
                    index: spelled(o.index.as_ref()),
                    access_rights: access(o.access_rights),
                    default_value: o.default_value.clone(),
                    dynamic: spelled(o.dynamic.as_ref()),
                    modifies_other_variables: spelled(o.modifies_other_variables.as_ref()),
                    excluded_from_data_storage: spelled(o.excluded_from_data_storage.as_ref()),
                    children: variable_children(
                        o.datatype.as_ref(),
                        &o.record_item_info,
                        o.name.as_ref(),
                        o.description.as_ref(),
                    ),
                })
            }
            VariableEntry::StdRef(r) => {
                VariableCollectionItem::StdVariableRef(model_var::StdVariableRef {
                    id: r.id.as_str().to_string(),
                    default_value: r.default_value.clone(),
                    fixed_length_restriction: spelled(r.fixed_length_restriction.as_ref()),
                    excluded_from_data_storage: spelled(r.excluded_from_data_storage.as_ref()),
                    children: r.children.iter().map(build_std_ref_child).collect(),
                })
            }
        })
        .collect();
    VariableCollection { items }
}

/// Schema order: datatype, record item infos, name, description.
fn variable_children(
    datatype: Option<&DatatypeChoice>,
    infos: &[RecordItemInfo],
    name: Option<&TextId>,
    description: Option<&TextId>,
) -> Vec<VariableChild> {
    let mut children = Vec::new();
    match datatype {
        Some(DatatypeChoice::Inline(dt)) => {
            children.push(VariableChild::Datatype(build_datatype(dt, None)));
        }
        Some(DatatypeChoice::Ref(id)) => children.push(VariableChild::DatatypeRef(DatatypeRef {
            datatype_id: id.as_str().to_string(),
        })),
        None => {}
    }
    let mut sorted: Vec<&RecordItemInfo> = infos.iter().collect();
    sorted.sort_by_key(|i| i.order_index);
    children.extend(sorted.into_iter().map(|i| {
        VariableChild::RecordItemInfo(model_var::RecordItemInfo {
            subindex: i.subindex.to_string(),
            default_value: i.default_value.clone(),
            excluded_from_data_storage: spelled(i.excluded_from_data_storage.as_ref()),
            modifies_other_variables: spelled(i.modifies_other_variables.as_ref()),
        })
    }));
    if let Some(t) = text_ref(name) {
        children.push(VariableChild::Name(t));
    }
    if let Some(t) = text_ref(description) {
        children.push(VariableChild::Description(t));
    }
    children
}

fn build_std_ref_child(child: &StdRefChild) -> StdVariableRefChild {
    match child {
        StdRefChild::SingleValueRef { value } => {
            StdVariableRefChild::StdSingleValueRef(model_var::StdSingleValueRef {
                value: value.clone(),
            })
        }
        StdRefChild::SingleValue {
            value,
            xsi_type,
            text_id,
        } => StdVariableRefChild::SingleValue(SingleValue {
            value: value.clone(),
            xsi_type: xsi_type.clone(),
            name: text_ref(text_id.as_ref()),
        }),
        StdRefChild::ValueRange {
            lower_value,
            upper_value,
            xsi_type,
            text_id,
        } => StdVariableRefChild::ValueRange(ValueRange {
            lower_value: lower_value.clone(),
            upper_value: upper_value.clone(),
            xsi_type: xsi_type.clone(),
            name: text_ref(text_id.as_ref()),
        }),
        StdRefChild::ValueRangeRef {
            lower_value,
            upper_value,
        } => StdVariableRefChild::StdValueRangeRef(model_var::StdValueRangeRef {
            lower_value: lower_value.clone(),
            upper_value: upper_value.clone(),
        }),
        StdRefChild::RecordItemRef {
            subindex,
            default_value,
            excluded_from_data_storage,
        } => StdVariableRefChild::StdRecordItemRef(model_var::StdRecordItemRef {
            subindex: subindex.to_string(),
            default_value: default_value.clone(),
            excluded_from_data_storage: spelled(excluded_from_data_storage.as_ref()),
        }),
    }
}

pub(super) fn build_condition(c: &Condition) -> common::Condition {
    common::Condition {
        variable_id: c.variable_id.as_str().to_string(),
        subindex: spelled(c.subindex.as_ref()),
        value: c.value.clone(),
    }
}

fn build_process_data(process_data: &[ProcessData]) -> ProcessDataCollection {
    let mut sorted: Vec<&ProcessData> = process_data.iter().collect();
    sorted.sort_by_key(|pd| pd.order_index);
    ProcessDataCollection {
        process_data: sorted
            .into_iter()
            .map(|pd| model_pd::ProcessData {
                id: pd.id.clone(),
                condition: pd.condition.as_ref().map(build_condition),
                process_data_in: pd.input.as_ref().map(build_process_data_item),
                process_data_out: pd.output.as_ref().map(build_process_data_item),
            })
            .collect(),
    }
}

fn build_process_data_item(item: &ProcessDataItem) -> model_pd::ProcessDataItem {
    let (datatype, datatype_ref) = split_choice(item.datatype.as_ref());
    model_pd::ProcessDataItem {
        id: item.id.clone(),
        bit_length: item.bit_length.to_string(),
        datatype,
        datatype_ref,
        name: text_ref(item.name.as_ref()),
    }
}

fn build_error_types(entries: &[ErrorTypeEntry]) -> ErrorTypeCollection {
    let mut sorted: Vec<&ErrorTypeEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.order_index());
    ErrorTypeCollection {
        items: sorted
            .into_iter()
            .map(|e| match e {
                ErrorTypeEntry::Standard(s) => ErrorTypeItem::StdErrorTypeRef(model_diag::StdErrorTypeRef {
                    code: spelled(s.code.as_ref()),
                    additional_code: s.additional_code.to_string(),
                }),
                ErrorTypeEntry::Custom(c) => ErrorTypeItem::ErrorType(model_diag::ErrorType {
                    code: c.code.to_string(),
                    additional_code: c.additional_code.to_string(),
                    name: text_ref(c.name.as_ref()),
                    description: text_ref(c.description.as_ref()),
                }),
            })
            .collect(),
    }
}

fn build_events(entries: &[EventEntry]) -> EventCollection {
    let mut sorted: Vec<&EventEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.order_index());
    EventCollection {
        items: sorted
            .into_iter()
            .map(|e| match e {
                EventEntry::Standard(s) => EventItem::StdEventRef(model_diag::StdEventRef {
                    code: s.code.to_string(),
                }),
                EventEntry::Custom(c) => EventItem::Event(model_diag::Event {
                    code: c.code.to_string(),
                    event_type: c.event_type.as_str().to_string(),
                    mode: c.mode.clone(),
                    name: text_ref(c.name.as_ref()),
                    description: text_ref(c.description.as_ref()),
                }),
            })
            .collect(),
    }
}
