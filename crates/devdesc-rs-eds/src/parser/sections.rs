// crates/devdesc-rs-eds/src/parser/sections.rs

//! Per-section parsers.
//!
//! Each typed section consumes the keys it understands. Everything else is
//! kept as an extra entry, and `key_order` records the source order of all
//! keys so the reconstructor can interleave typed and extra entries again.

use super::Context;
use crate::lexer::{RawEntry, RawSection};
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use devdesc_rs::eds::{
    EdsAssembly, EdsAssemblySection, EdsCapacity, EdsConnection, EdsConnectionManager,
    EdsDeviceInfo, EdsEntry, EdsEnum, EdsFileInfo, EdsModular, EdsModule, EdsParameter,
    EdsParams, EdsPort, EdsPortSection, EdsSection, EdsTSpec, EdsValue, IntLiteral, key_number,
};
use devdesc_rs::{Diagnostic, SourceLocation};

/// Keys shared by the CIP object class sections.
const CLASS_KEYS: [&str; 6] = [
    "revision",
    "object_name",
    "object_class_code",
    "maxinst",
    "number_of_static_instances",
    "max_number_of_dynamic_instances",
];

fn is_class_key(key: &str) -> bool {
    CLASS_KEYS.contains(&key)
}

/// Bookkeeping shared by the typed section parsers.
struct Scope<'a> {
    ctx: &'a mut Context,
    section: &'a str,
    seen: BTreeSet<String>,
    key_order: Vec<String>,
    extra_entries: Vec<EdsEntry>,
}

impl<'a> Scope<'a> {
    fn new(ctx: &'a mut Context, raw: &'a RawSection) -> Self {
        Self {
            ctx,
            section: raw.name.as_str(),
            seen: BTreeSet::new(),
            key_order: Vec::with_capacity(raw.entries.len()),
            extra_entries: Vec::new(),
        }
    }

    fn location(&self, entry: &RawEntry) -> SourceLocation {
        SourceLocation::at(Some(String::from(self.section)), entry.line, entry.column)
    }

    /// Records the key. A repeated key is kept as an extra entry and
    /// `false` is returned.
    fn admit(&mut self, entry: &RawEntry, order: u32) -> bool {
        self.key_order.push(entry.key.clone());
        if self.seen.insert(entry.key.to_ascii_lowercase()) {
            return true;
        }
        let diagnostic = Diagnostic::warn(
            "EDS-P005",
            format!("duplicate key '{}'; later value kept verbatim", entry.key),
        )
        .with_location(self.location(entry));
        self.ctx.push(diagnostic);
        self.keep(entry, order);
        false
    }

    fn keep(&mut self, entry: &RawEntry, order: u32) {
        self.extra_entries
            .push(EdsEntry::new(entry.key.clone(), entry.fields.clone(), order));
    }

    fn unknown(&mut self, entry: &RawEntry, order: u32) {
        let diagnostic = Diagnostic::warn("EDS-P004", format!("unknown key '{}'", entry.key))
            .with_location(self.location(entry));
        self.ctx.push(diagnostic);
        self.keep(entry, order);
    }

    fn invalid(&mut self, entry: &RawEntry, order: u32, expected: &str) {
        let diagnostic = Diagnostic::error(
            "EDS-P003",
            format!("invalid value for '{}': expected {}", entry.key, expected),
        )
        .with_location(self.location(entry));
        self.ctx.push(diagnostic);
        self.keep(entry, order);
    }

    fn scalar(&mut self, entry: &RawEntry, order: u32) -> Option<EdsValue> {
        match entry.fields.as_slice() {
            [value] => Some(value.clone()),
            _ => {
                self.invalid(entry, order, "a single value");
                None
            }
        }
    }

    fn int(&mut self, entry: &RawEntry, order: u32) -> Option<IntLiteral> {
        let literal = match entry.fields.as_slice() {
            [value] => value.as_literal(),
            _ => None,
        };
        if literal.is_none() {
            self.invalid(entry, order, "an integer");
        }
        literal
    }

    fn finish(self) -> (Vec<EdsEntry>, Vec<String>) {
        (self.extra_entries, self.key_order)
    }
}

pub(super) fn parse_untyped(raw: &RawSection) -> EdsSection {
    EdsSection {
        name: raw.name.clone(),
        entries: raw
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| EdsEntry::new(e.key.clone(), e.fields.clone(), i as u32))
            .collect(),
    }
}

pub(super) fn parse_file(ctx: &mut Context, raw: &RawSection) -> EdsFileInfo {
    let mut info = EdsFileInfo {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        let key = entry.key.to_ascii_lowercase();
        let slot = match key.as_str() {
            "desctext" => &mut info.desc_text,
            "createdate" => &mut info.create_date,
            "createtime" => &mut info.create_time,
            "moddate" => &mut info.mod_date,
            "modtime" => &mut info.mod_time,
            "revision" => &mut info.revision,
            "homeurl" => &mut info.home_url,
            _ => {
                scope.unknown(entry, order);
                continue;
            }
        };
        *slot = scope.scalar(entry, order);
    }
    (info.extra_entries, info.key_order) = scope.finish();
    info
}

pub(super) fn parse_device(ctx: &mut Context, raw: &RawSection) -> EdsDeviceInfo {
    let mut info = EdsDeviceInfo {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        let key = entry.key.to_ascii_lowercase();
        let int_slot = match key.as_str() {
            "vendcode" => Some(&mut info.vend_code),
            "prodtype" => Some(&mut info.prod_type),
            "prodcode" => Some(&mut info.prod_code),
            "majrev" => Some(&mut info.maj_rev),
            "minrev" => Some(&mut info.min_rev),
            _ => None,
        };
        if let Some(slot) = int_slot {
            *slot = scope.int(entry, order);
            continue;
        }
        let slot = match key.as_str() {
            "vendname" => &mut info.vend_name,
            "prodtypestr" => &mut info.prod_type_str,
            "prodname" => &mut info.prod_name,
            "catalog" => &mut info.catalog,
            "icon" => &mut info.icon,
            "iconcontents" => &mut info.icon_contents,
            _ => {
                scope.unknown(entry, order);
                continue;
            }
        };
        *slot = scope.scalar(entry, order);
    }
    (info.extra_entries, info.key_order) = scope.finish();
    info
}

pub(super) fn parse_params(ctx: &mut Context, raw: &RawSection) -> EdsParams {
    let mut params = EdsParams {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        if let Some(n) = key_number(&entry.key, "Param") {
            params
                .parameters
                .push(EdsParameter::from_fields(n, &entry.key, &entry.fields, order));
        } else if let Some(n) = key_number(&entry.key, "Enum") {
            params
                .enums
                .push(EdsEnum::from_fields(n, &entry.key, &entry.fields, order));
        } else if is_class_key(&entry.key.to_ascii_lowercase()) {
            scope.keep(entry, order);
        } else {
            scope.unknown(entry, order);
        }
    }
    (params.extra_entries, params.key_order) = scope.finish();
    log::debug!(
        "[{}]: {} parameters, {} enums",
        params.name,
        params.parameters.len(),
        params.enums.len()
    );
    params
}

pub(super) fn parse_assembly(ctx: &mut Context, raw: &RawSection) -> EdsAssemblySection {
    let mut section = EdsAssemblySection {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        if let Some(n) = key_number(&entry.key, "Assem") {
            let assembly = EdsAssembly::from_fields(n, &entry.key, &entry.fields, order);
            if assembly.is_variable() {
                section.variable_assemblies.push(assembly);
            } else {
                section.assemblies.push(assembly);
            }
        } else if is_class_key(&entry.key.to_ascii_lowercase()) {
            scope.keep(entry, order);
        } else {
            scope.unknown(entry, order);
        }
    }
    (section.extra_entries, section.key_order) = scope.finish();
    section
}

pub(super) fn parse_connection_manager(ctx: &mut Context, raw: &RawSection) -> EdsConnectionManager {
    let mut section = EdsConnectionManager {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        if let Some(n) = key_number(&entry.key, "Connection") {
            section
                .connections
                .push(EdsConnection::from_fields(n, &entry.key, &entry.fields, order));
        } else if is_class_key(&entry.key.to_ascii_lowercase()) {
            scope.keep(entry, order);
        } else {
            scope.unknown(entry, order);
        }
    }
    (section.extra_entries, section.key_order) = scope.finish();
    section
}

pub(super) fn parse_port(ctx: &mut Context, raw: &RawSection) -> EdsPortSection {
    let mut section = EdsPortSection {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        if let Some(n) = key_number(&entry.key, "Port") {
            section
                .ports
                .push(EdsPort::from_fields(n, &entry.key, &entry.fields, order));
        } else if is_class_key(&entry.key.to_ascii_lowercase()) {
            scope.keep(entry, order);
        } else {
            scope.unknown(entry, order);
        }
    }
    (section.extra_entries, section.key_order) = scope.finish();
    section
}

pub(super) fn parse_capacity(ctx: &mut Context, raw: &RawSection) -> EdsCapacity {
    let mut capacity = EdsCapacity {
        name: raw.name.clone(),
        ..Default::default()
    };
    let mut scope = Scope::new(ctx, raw);
    for (i, entry) in raw.entries.iter().enumerate() {
        let order = i as u32;
        if !scope.admit(entry, order) {
            continue;
        }
        if let Some(n) = key_number(&entry.key, "TSpec") {
            let tspec = EdsTSpec::from_fields(n, &entry.key, &entry.fields, order);
            if tspec.direction().is_none() {
                let diagnostic = Diagnostic::warn(
                    "EDS-P008",
                    format!("'{}' has no valid Tx/Rx/TxRx direction", entry.key),
                )
                .with_location(scope.location(entry));
                scope.ctx.push(diagnostic);
            }
            capacity.tspecs.push(tspec);
            continue;
        }
        let key = entry.key.to_ascii_lowercase();
        let slot = match key.as_str() {
            "maxmsgconnections" => &mut capacity.max_msg_connections,
            "maxioconnections" => &mut capacity.max_io_connections,
            "maxconsumerspermcast" => &mut capacity.max_consumers_per_mcast,
            "maxioproducers" => &mut capacity.max_io_producers,
            "maxioconsumers" => &mut capacity.max_io_consumers,
            _ => {
                scope.unknown(entry, order);
                continue;
            }
        };
        *slot = scope.int(entry, order);
    }
    (capacity.extra_entries, capacity.key_order) = scope.finish();
    capacity
}

/// `[Modular]` entries are all module records; the number is the key's
/// numeric suffix, or 0 when it has none.
pub(super) fn parse_modular(raw: &RawSection) -> EdsModular {
    let modules = raw
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let digits = e.key.len() - e.key.trim_end_matches(|c: char| c.is_ascii_digit()).len();
            let number = e.key[e.key.len() - digits..].parse().unwrap_or(0);
            EdsModule {
                number,
                key: e.key.clone(),
                fields: e.fields.clone(),
                order_index: i as u32,
            }
        })
        .collect();
    EdsModular {
        name: raw.name.clone(),
        modules,
        key_order: raw.entries.iter().map(|e| e.key.clone()).collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn section(name: &str, entries: &[(&str, Vec<EdsValue>)]) -> RawSection {
        RawSection {
            name: String::from(name),
            line: 1,
            column: 1,
            entries: entries
                .iter()
                .enumerate()
                .map(|(i, (k, f))| RawEntry {
                    key: String::from(*k),
                    fields: f.clone(),
                    line: i as u32 + 2,
                    column: 1,
                })
                .collect(),
        }
    }

    #[test]
    fn test_device_keeps_literal_form_and_order() {
        let raw = section(
            "Device",
            &[
                ("VendName", vec![EdsValue::quoted("Acme")]),
                ("VendCode", vec![EdsValue::token("0x002A")]),
                ("Vendor_Specific", vec![EdsValue::token("1")]),
            ],
        );
        let mut ctx = Context::default();
        let device = parse_device(&mut ctx, &raw);

        let code = device.vend_code.expect("vend code");
        assert_eq!(code.value, 42);
        assert_eq!(alloc::string::ToString::to_string(&code), "0x002A");
        assert_eq!(device.key_order, ["VendName", "VendCode", "Vendor_Specific"]);
        assert_eq!(device.extra_entries.len(), 1);
        assert_eq!(device.extra_entries[0].order_index, 2);
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].code, "EDS-P004");
        assert_eq!(ctx.diagnostics[0].location.line, Some(4));
    }

    #[test]
    fn test_invalid_integer_is_kept_verbatim() {
        let raw = section("Device", &[("MajRev", vec![EdsValue::token("two")])]);
        let mut ctx = Context::default();
        let device = parse_device(&mut ctx, &raw);
        assert_eq!(device.maj_rev, None);
        assert_eq!(device.extra_entries[0].key, "MajRev");
        assert_eq!(ctx.diagnostics[0].code, "EDS-P003");
    }

    #[test]
    fn test_duplicate_key() {
        let raw = section(
            "Capacity",
            &[
                ("MaxMsgConnections", vec![EdsValue::token("128")]),
                ("MaxMsgConnections", vec![EdsValue::token("64")]),
            ],
        );
        let mut ctx = Context::default();
        let capacity = parse_capacity(&mut ctx, &raw);
        assert_eq!(capacity.max_msg_connections.map(|l| l.value), Some(128));
        assert_eq!(capacity.extra_entries.len(), 1);
        assert_eq!(ctx.diagnostics[0].code, "EDS-P005");
    }

    #[test]
    fn test_tspec_without_direction() {
        let raw = section(
            "Capacity",
            &[(
                "TSpec1",
                vec![EdsValue::token("Both"), EdsValue::token("32"), EdsValue::token("100")],
            )],
        );
        let mut ctx = Context::default();
        let capacity = parse_capacity(&mut ctx, &raw);
        assert_eq!(capacity.tspecs.len(), 1);
        assert_eq!(ctx.diagnostics[0].code, "EDS-P008");
    }

    #[test]
    fn test_modular_numbers() {
        let raw = section(
            "Modular",
            &[
                ("Slot12", vec![EdsValue::token("1")]),
                ("Rack", vec![EdsValue::token("2")]),
            ],
        );
        let modular = parse_modular(&raw);
        assert_eq!(modular.modules[0].number, 12);
        assert_eq!(modular.modules[1].number, 0);
    }
}
