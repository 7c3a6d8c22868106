// crates/devdesc-rs-iodd/src/builder/datatype.rs

use super::{spelled, text_ref};
use crate::model::common::DatatypeRef;
use crate::model::datatype::{self as model, DatatypeChild, DatatypeCollection};
use alloc::string::ToString;
use alloc::vec::Vec;
use devdesc_rs::iodd::{CustomDatatype, Datatype, DatatypeChoice, RecordItem};

pub(super) fn build_collection(datatypes: &[CustomDatatype]) -> DatatypeCollection {
    let mut sorted: Vec<&CustomDatatype> = datatypes.iter().collect();
    sorted.sort_by_key(|d| d.order_index);
    DatatypeCollection {
        datatype: sorted
            .into_iter()
            .map(|d| build_datatype(&d.datatype, Some(d.id.as_str())))
            .collect(),
    }
}

/// Builds a `Datatype`/`SimpleDatatype` element. Single values, value ranges
/// and record items are merged back into source order by `order_index`.
pub(super) fn build_datatype(dt: &Datatype, id: Option<&str>) -> model::Datatype {
    let mut ordered: Vec<(u32, DatatypeChild)> = Vec::new();
    for sv in &dt.single_values {
        ordered.push((
            sv.order_index,
            DatatypeChild::SingleValue(model::SingleValue {
                value: sv.value.clone(),
                xsi_type: sv.xsi_type.clone(),
                name: text_ref(sv.text_id.as_ref()),
            }),
        ));
    }
    for vr in &dt.value_ranges {
        ordered.push((
            vr.order_index,
            DatatypeChild::ValueRange(model::ValueRange {
                lower_value: vr.lower_value.clone(),
                upper_value: vr.upper_value.clone(),
                xsi_type: vr.xsi_type.clone(),
                name: text_ref(vr.text_id.as_ref()),
            }),
        ));
    }
    for ri in &dt.record_items {
        ordered.push((ri.order_index, DatatypeChild::RecordItem(build_record_item(ri))));
    }
    ordered.sort_by_key(|(order_index, _)| *order_index);

    let mut children = Vec::with_capacity(ordered.len() + 1);
    if let Some(element) = &dt.element {
        children.push(match element.as_ref() {
            DatatypeChoice::Inline(inner) => DatatypeChild::SimpleDatatype(build_datatype(inner, None)),
            DatatypeChoice::Ref(id) => DatatypeChild::DatatypeRef(DatatypeRef {
                datatype_id: id.as_str().to_string(),
            }),
        });
    }
    children.extend(ordered.into_iter().map(|(_, child)| child));

    model::Datatype {
        id: id.map(ToString::to_string),
        xsi_type: dt.kind.as_xsi_type().to_string(),
        bit_length: spelled(dt.bit_length.as_ref()),
        fixed_length: spelled(dt.fixed_length.as_ref()),
        count: spelled(dt.count.as_ref()),
        encoding: dt.encoding.clone(),
        subindex_access_supported: spelled(dt.subindex_access_supported.as_ref()),
        children,
    }
}

fn build_record_item(ri: &RecordItem) -> model::RecordItem {
    let (simple_datatype, datatype_ref) = split_choice(Some(&ri.datatype));
    model::RecordItem {
        subindex: ri.subindex.to_string(),
        bit_offset: ri.bit_offset.to_string(),
        access_right_restriction: ri
            .access_right_restriction
            .map(|a| a.as_str().to_string()),
        simple_datatype,
        datatype_ref,
        name: text_ref(ri.name.as_ref()),
        description: text_ref(ri.description.as_ref()),
    }
}

/// Echoes the inline-or-reference form the source used.
pub(super) fn split_choice(
    choice: Option<&DatatypeChoice>,
) -> (Option<model::Datatype>, Option<DatatypeRef>) {
    match choice {
        Some(DatatypeChoice::Inline(dt)) => (Some(build_datatype(dt, None)), None),
        Some(DatatypeChoice::Ref(id)) => (
            None,
            Some(DatatypeRef {
                datatype_id: id.as_str().to_string(),
            }),
        ),
        None => (None, None),
    }
}
