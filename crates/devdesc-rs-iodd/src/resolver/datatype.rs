// crates/devdesc-rs-iodd/src/resolver/datatype.rs

//! Datatype resolution and the custom datatype lookup.

use super::Context;
use super::utils::text_id;
use crate::model::common::DatatypeRef;
use crate::model::datatype::{self as model, DatatypeChild, DatatypeCollection};
use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    CustomDatatype, Datatype, DatatypeChoice, DatatypeKind, RecordItem, ResolvedDatatype,
    SingleValue, ValueRange,
};
use devdesc_rs::{DatatypeId, Diagnostic, SourceLocation};

/// Resolves `DatatypeCollection` and fills the datatype lookup.
///
/// Custom datatypes may only reference each other through record items and
/// array elements, which the lookup does not follow, so one pass suffices.
pub(super) fn resolve_collection(
    ctx: &mut Context,
    collection: &DatatypeCollection,
) -> Vec<CustomDatatype> {
    let mut resolved = Vec::with_capacity(collection.datatype.len());
    for (i, dt) in collection.datatype.iter().enumerate() {
        let id = dt.id.clone().unwrap_or_default();
        let path = format!("DatatypeCollection/Datatype[{}]", id);
        let datatype = resolve_datatype(ctx, dt, &path);

        if ctx.datatypes.contains_key(&id) {
            ctx.push(
                Diagnostic::warn("IODD-R013", format!("duplicate datatype id '{}'", id))
                    .with_location(SourceLocation::section(path.as_str())),
            );
        } else {
            ctx.datatypes.insert(id.clone(), summarize(&datatype, false));
        }
        resolved.push(CustomDatatype {
            id: DatatypeId::from(id),
            datatype,
            order_index: i as u32,
        });
    }
    resolved
}

/// Converts one `Datatype`/`SimpleDatatype` element.
///
/// All children share one `order_index` counter so single values, ranges and
/// record items can be re-interleaved on reconstruction.
pub(super) fn resolve_datatype(ctx: &mut Context, dt: &model::Datatype, path: &str) -> Datatype {
    let kind = DatatypeKind::from_xsi_type(dt.xsi_type.trim());
    if !kind.is_known() {
        ctx.push(
            Diagnostic::warn("IODD-R010", format!("unknown datatype xsi:type '{}'", dt.xsi_type))
                .with_location(SourceLocation::section(path)),
        );
    }

    let mut datatype = Datatype {
        kind,
        bit_length: ctx.opt_number(dt.bit_length.as_ref(), "bitLength", path),
        fixed_length: ctx.opt_number(dt.fixed_length.as_ref(), "fixedLength", path),
        count: ctx.opt_number(dt.count.as_ref(), "count", path),
        encoding: dt.encoding.clone(),
        subindex_access_supported: ctx.flag(
            dt.subindex_access_supported.as_ref(),
            "subindexAccessSupported",
            path,
        ),
        ..Default::default()
    };

    for (i, child) in dt.children.iter().enumerate() {
        let order_index = i as u32;
        match child {
            DatatypeChild::SingleValue(sv) => datatype.single_values.push(SingleValue {
                value: sv.value.clone(),
                xsi_type: sv.xsi_type.clone(),
                text_id: text_id(sv.name.as_ref()),
                order_index,
            }),
            DatatypeChild::ValueRange(vr) => datatype.value_ranges.push(ValueRange {
                lower_value: vr.lower_value.clone(),
                upper_value: vr.upper_value.clone(),
                xsi_type: vr.xsi_type.clone(),
                text_id: text_id(vr.name.as_ref()),
                order_index,
            }),
            DatatypeChild::RecordItem(ri) => {
                if let Some(item) = resolve_record_item(ctx, ri, order_index, path) {
                    datatype.record_items.push(item);
                }
            }
            DatatypeChild::SimpleDatatype(inner) => {
                let inner_path = format!("{}/SimpleDatatype", path);
                let inner = resolve_datatype(ctx, inner, &inner_path);
                datatype.element = Some(Box::new(DatatypeChoice::Inline(inner)));
            }
            DatatypeChild::DatatypeRef(r) => {
                datatype.element = Some(Box::new(DatatypeChoice::Ref(DatatypeId::from(
                    r.datatype_id.as_str(),
                ))));
            }
            DatatypeChild::Unknown => ctx.unsupported("Datatype", path),
        }
    }
    datatype
}

fn resolve_record_item(
    ctx: &mut Context,
    ri: &model::RecordItem,
    order_index: u32,
    parent: &str,
) -> Option<RecordItem> {
    let path = format!("{}/RecordItem[{}]", parent, ri.subindex);
    let subindex = ctx.number(&ri.subindex, "subindex", &path)?;
    let bit_offset = ctx.required(&ri.bit_offset, "bitOffset", &path);
    let access_right_restriction =
        ctx.access(ri.access_right_restriction.as_ref(), "accessRightRestriction", &path);

    let datatype = match (&ri.simple_datatype, &ri.datatype_ref) {
        (Some(inline), other) => {
            if other.is_some() {
                both_forms(ctx, &path);
            }
            let inner_path = format!("{}/SimpleDatatype", path);
            DatatypeChoice::Inline(resolve_datatype(ctx, inline, &inner_path))
        }
        (None, Some(r)) => DatatypeChoice::Ref(DatatypeId::from(r.datatype_id.as_str())),
        (None, None) => {
            no_form(ctx, &path);
            return None;
        }
    };

    Some(RecordItem {
        subindex,
        bit_offset,
        access_right_restriction,
        datatype,
        name: text_id(ri.name.as_ref()),
        description: text_id(ri.description.as_ref()),
        order_index,
    })
}

/// Picks the datatype form of an element whose schema allows either an inline
/// `Datatype` or a `DatatypeRef`. Used where the source order is not known.
pub(super) fn resolve_choice(
    ctx: &mut Context,
    inline: Option<&model::Datatype>,
    reference: Option<&DatatypeRef>,
    path: &str,
) -> Option<DatatypeChoice> {
    match (inline, reference) {
        (Some(dt), other) => {
            if other.is_some() {
                both_forms(ctx, path);
            }
            let inner_path = format!("{}/Datatype", path);
            Some(DatatypeChoice::Inline(resolve_datatype(ctx, dt, &inner_path)))
        }
        (None, Some(r)) => Some(DatatypeChoice::Ref(DatatypeId::from(r.datatype_id.as_str()))),
        (None, None) => None,
    }
}

pub(super) fn both_forms(ctx: &mut Context, path: &str) {
    ctx.push(
        Diagnostic::warn(
            "IODD-R007",
            "both Datatype and DatatypeRef present; the first one is kept",
        )
        .with_location(SourceLocation::section(path)),
    );
}

pub(super) fn no_form(ctx: &mut Context, path: &str) {
    ctx.push(
        Diagnostic::error("IODD-R008", "neither Datatype nor DatatypeRef present")
            .with_location(SourceLocation::section(path)),
    );
}

impl Context {
    /// Looks up kind and size for a datatype choice. Unknown references
    /// resolve to `None`; the cross-reference check reports them.
    pub(super) fn resolve_kind(&self, choice: &DatatypeChoice) -> Option<ResolvedDatatype> {
        match choice {
            DatatypeChoice::Inline(dt) => Some(summarize(dt, false)),
            DatatypeChoice::Ref(id) => self.datatypes.get(id.as_str()).map(|r| ResolvedDatatype {
                via_ref: true,
                ..r.clone()
            }),
        }
    }
}

fn summarize(dt: &Datatype, via_ref: bool) -> ResolvedDatatype {
    ResolvedDatatype {
        kind: dt.kind.clone(),
        bit_length: dt.effective_bit_length(),
        single_value_count: dt.single_values.len() as u32,
        via_ref,
    }
}

