// crates/devdesc-rs-iodd/src/resolver/process_data.rs

use super::Context;
use super::datatype::resolve_choice;
use super::utils::text_id;
use crate::model::common;
use crate::model::process_data::{self as model, ProcessDataCollection};
use alloc::format;
use alloc::vec::Vec;
use devdesc_rs::VariableId;
use devdesc_rs::iodd::{Condition, ProcessData, ProcessDataItem};

pub(super) fn resolve_process_data(
    ctx: &mut Context,
    collection: &ProcessDataCollection,
) -> Vec<ProcessData> {
    collection
        .process_data
        .iter()
        .enumerate()
        .map(|(i, pd)| {
            let path = format!("ProcessDataCollection/ProcessData[{}]", pd.id);
            ProcessData {
                id: pd.id.clone(),
                condition: pd
                    .condition
                    .as_ref()
                    .map(|c| resolve_condition(ctx, c, &path)),
                input: pd
                    .process_data_in
                    .as_ref()
                    .map(|item| resolve_item(ctx, item, &path)),
                output: pd
                    .process_data_out
                    .as_ref()
                    .map(|item| resolve_item(ctx, item, &path)),
                order_index: i as u32,
            }
        })
        .collect()
}

pub(super) fn resolve_condition(ctx: &mut Context, c: &common::Condition, path: &str) -> Condition {
    Condition {
        variable_id: VariableId::from(c.variable_id.as_str()),
        subindex: ctx.opt_number(c.subindex.as_ref(), "subindex", path),
        value: c.value.clone(),
    }
}

fn resolve_item(ctx: &mut Context, item: &model::ProcessDataItem, parent: &str) -> ProcessDataItem {
    let path = format!("{}/{}", parent, item.id);
    ProcessDataItem {
        id: item.id.clone(),
        bit_length: ctx.required(&item.bit_length, "bitLength", &path),
        datatype: resolve_choice(ctx, item.datatype.as_ref(), item.datatype_ref.as_ref(), &path),
        name: text_id(item.name.as_ref()),
    }
}
