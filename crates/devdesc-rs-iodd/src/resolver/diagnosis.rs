// crates/devdesc-rs-iodd/src/resolver/diagnosis.rs

use super::Context;
use super::utils::text_id;
use crate::model::diagnosis::{ErrorTypeCollection, ErrorTypeItem, EventCollection, EventItem};
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    ErrorType, ErrorTypeEntry, Event, EventEntry, EventType, StdErrorTypeRef, StdEventRef,
};

pub(super) fn resolve_error_types(
    ctx: &mut Context,
    collection: &ErrorTypeCollection,
) -> Vec<ErrorTypeEntry> {
    let path = "ErrorTypeCollection";
    let mut entries = Vec::with_capacity(collection.items.len());
    for (i, item) in collection.items.iter().enumerate() {
        let order_index = i as u32;
        let entry = match item {
            ErrorTypeItem::StdErrorTypeRef(r) => ErrorTypeEntry::Standard(StdErrorTypeRef {
                code: ctx.opt_number(r.code.as_ref(), "code", path),
                additional_code: ctx.required(&r.additional_code, "additionalCode", path),
                order_index,
            }),
            ErrorTypeItem::ErrorType(e) => ErrorTypeEntry::Custom(ErrorType {
                code: ctx.required(&e.code, "code", path),
                additional_code: ctx.required(&e.additional_code, "additionalCode", path),
                name: text_id(e.name.as_ref()),
                description: text_id(e.description.as_ref()),
                order_index,
            }),
            ErrorTypeItem::Unknown => {
                ctx.unsupported(path, path);
                continue;
            }
        };
        entries.push(entry);
    }
    entries
}

pub(super) fn resolve_events(ctx: &mut Context, collection: &EventCollection) -> Vec<EventEntry> {
    let path = "EventCollection";
    let mut entries = Vec::with_capacity(collection.items.len());
    for (i, item) in collection.items.iter().enumerate() {
        let order_index = i as u32;
        let entry = match item {
            EventItem::StdEventRef(r) => EventEntry::Standard(StdEventRef {
                code: ctx.required(&r.code, "code", path),
                order_index,
            }),
            EventItem::Event(e) => EventEntry::Custom(Event {
                code: ctx.required(&e.code, "code", path),
                event_type: EventType::parse(e.event_type.trim()),
                mode: e.mode.clone(),
                name: text_id(e.name.as_ref()),
                description: text_id(e.description.as_ref()),
                order_index,
            }),
            EventItem::Unknown => {
                ctx.unsupported(path, path);
                continue;
            }
        };
        entries.push(entry);
    }
    entries
}
