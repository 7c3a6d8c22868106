// crates/devdesc-rs-eds/src/builder.rs

//! Reconstructs EDS text from an `EdsProfile`.
//!
//! Sections follow `section_order`. Inside a section, keys follow the
//! recorded `key_order`; typed values are matched to their key first and
//! extra entries fill the remaining occurrences. Anything not covered by
//! the recorded order (profiles built in code) is appended at the end.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use devdesc_rs::eds::{EdsEntry, EdsProfile, EdsValue, IntLiteral};

/// Entries with more fields than this are written one field per line.
const INLINE_FIELDS: usize = 4;

/// Serializes an `EdsProfile` into EDS text.
///
/// The output is deterministic: the same profile always gives the same text.
pub fn save_eds_to_string(profile: &EdsProfile) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_profile(&mut out, profile);
    log::debug!(
        "reconstructed EDS: {} sections, {} bytes",
        profile.section_order.len(),
        out.len()
    );
    out
}

/// One section ready to be written.
struct Block<'a> {
    name: &'a str,
    key_order: &'a [String],
    typed: Vec<(String, Vec<EdsValue>)>,
    extra: &'a [EdsEntry],
}

impl<'a> Block<'a> {
    fn new(name: &'a str, key_order: &'a [String], extra: &'a [EdsEntry]) -> Self {
        Self {
            name,
            key_order,
            typed: Vec::new(),
            extra,
        }
    }

    fn value(mut self, key: &str, value: &Option<EdsValue>) -> Self {
        if let Some(v) = value {
            self.typed.push((String::from(key), alloc::vec![v.clone()]));
        }
        self
    }

    fn int(mut self, key: &str, value: &Option<IntLiteral>) -> Self {
        if let Some(v) = value {
            self.typed.push((String::from(key), alloc::vec![v.to_value()]));
        }
        self
    }

    fn records(mut self, records: impl IntoIterator<Item = (String, Vec<EdsValue>)>) -> Self {
        self.typed.extend(records);
        self
    }
}

fn write_profile(out: &mut String, profile: &EdsProfile) -> fmt::Result {
    let blocks = blocks(profile);
    let mut emitted = alloc::vec![false; blocks.len()];
    let mut first = true;

    for name in &profile.section_order {
        if let Some(i) = (0..blocks.len()).find(|&i| !emitted[i] && blocks[i].name == name.as_str()) {
            emitted[i] = true;
            write_block(out, &blocks[i], &mut first)?;
        }
    }
    for (i, block) in blocks.iter().enumerate() {
        if !emitted[i] {
            write_block(out, block, &mut first)?;
        }
    }
    Ok(())
}

/// Typed sections first, then extension sections in their stored order.
fn blocks(profile: &EdsProfile) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();

    if let Some(f) = &profile.file {
        blocks.push(
            Block::new(&f.name, &f.key_order, &f.extra_entries)
                .value("DescText", &f.desc_text)
                .value("CreateDate", &f.create_date)
                .value("CreateTime", &f.create_time)
                .value("ModDate", &f.mod_date)
                .value("ModTime", &f.mod_time)
                .value("Revision", &f.revision)
                .value("HomeURL", &f.home_url),
        );
    }
    if let Some(d) = &profile.device {
        blocks.push(
            Block::new(&d.name, &d.key_order, &d.extra_entries)
                .int("VendCode", &d.vend_code)
                .value("VendName", &d.vend_name)
                .int("ProdType", &d.prod_type)
                .value("ProdTypeStr", &d.prod_type_str)
                .int("ProdCode", &d.prod_code)
                .int("MajRev", &d.maj_rev)
                .int("MinRev", &d.min_rev)
                .value("ProdName", &d.prod_name)
                .value("Catalog", &d.catalog)
                .value("Icon", &d.icon)
                .value("IconContents", &d.icon_contents),
        );
    }
    if let Some(c) = &profile.classification {
        blocks.push(untyped(&c.name, &c.entries));
    }
    if let Some(p) = &profile.params {
        let mut records: Vec<(u32, String, Vec<EdsValue>)> = p
            .parameters
            .iter()
            .map(|r| (r.order_index, r.key.clone(), r.to_fields()))
            .chain(p.enums.iter().map(|e| (e.order_index, e.key.clone(), e.to_fields())))
            .collect();
        records.sort_by_key(|r| r.0);
        blocks.push(
            Block::new(&p.name, &p.key_order, &p.extra_entries)
                .records(records.into_iter().map(|(_, k, f)| (k, f))),
        );
    }
    if let Some(a) = &profile.assembly {
        let mut records: Vec<_> = a.assemblies.iter().chain(a.variable_assemblies.iter()).collect();
        records.sort_by_key(|r| r.order_index);
        blocks.push(
            Block::new(&a.name, &a.key_order, &a.extra_entries)
                .records(records.into_iter().map(|r| (r.key.clone(), r.to_fields()))),
        );
    }
    if let Some(c) = &profile.connection_manager {
        blocks.push(
            Block::new(&c.name, &c.key_order, &c.extra_entries)
                .records(c.connections.iter().map(|r| (r.key.clone(), r.to_fields()))),
        );
    }
    if let Some(p) = &profile.port {
        blocks.push(
            Block::new(&p.name, &p.key_order, &p.extra_entries)
                .records(p.ports.iter().map(|r| (r.key.clone(), r.to_fields()))),
        );
    }
    if let Some(c) = &profile.capacity {
        blocks.push(
            Block::new(&c.name, &c.key_order, &c.extra_entries)
                .int("MaxMsgConnections", &c.max_msg_connections)
                .int("MaxIOConnections", &c.max_io_connections)
                .int("MaxConsumersPerMcast", &c.max_consumers_per_mcast)
                .int("MaxIOProducers", &c.max_io_producers)
                .int("MaxIOConsumers", &c.max_io_consumers)
                .records(c.tspecs.iter().map(|t| (t.key.clone(), t.to_fields()))),
        );
    }
    if let Some(m) = &profile.modular {
        blocks.push(
            Block::new(&m.name, &m.key_order, &m.extra_entries)
                .records(m.modules.iter().map(|r| (r.key.clone(), r.fields.clone()))),
        );
    }
    for s in &profile.extension_sections {
        blocks.push(untyped(&s.name, &s.entries));
    }
    blocks
}

/// An untyped section: every entry is an extra entry in stored order.
fn untyped<'a>(name: &'a str, entries: &'a [EdsEntry]) -> Block<'a> {
    Block::new(name, &[], entries)
}

fn write_block(out: &mut String, block: &Block<'_>, first: &mut bool) -> fmt::Result {
    if !*first {
        out.push('\n');
    }
    *first = false;
    writeln!(out, "[{}]", block.name)?;

    let mut typed_used = alloc::vec![false; block.typed.len()];
    let mut extra: Vec<&EdsEntry> = block.extra.iter().collect();
    extra.sort_by_key(|e| e.order_index);
    let mut extra_used = alloc::vec![false; extra.len()];

    for key in block.key_order {
        let typed = (0..block.typed.len())
            .find(|&i| !typed_used[i] && block.typed[i].0.eq_ignore_ascii_case(key));
        if let Some(i) = typed {
            typed_used[i] = true;
            write_entry(out, key, &block.typed[i].1)?;
            continue;
        }
        if let Some(i) = (0..extra.len()).find(|&i| !extra_used[i] && &extra[i].key == key) {
            extra_used[i] = true;
            write_entry(out, key, &extra[i].fields)?;
        }
    }
    for (i, (key, fields)) in block.typed.iter().enumerate() {
        if !typed_used[i] {
            write_entry(out, key, fields)?;
        }
    }
    for (i, entry) in extra.iter().enumerate() {
        if !extra_used[i] {
            write_entry(out, &entry.key, &entry.fields)?;
        }
    }
    Ok(())
}

fn write_entry(out: &mut String, key: &str, fields: &[EdsValue]) -> fmt::Result {
    if fields.len() <= INLINE_FIELDS {
        write!(out, "    {} = ", key)?;
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write!(out, "{}", field)?;
        }
        return writeln!(out, ";");
    }
    writeln!(out, "    {} =", key)?;
    let last = fields.len() - 1;
    for (i, field) in fields.iter().enumerate() {
        let separator = if i == last { ';' } else { ',' };
        writeln!(out, "        {}{}", field, separator)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use devdesc_rs::eds::{EdsCapacity, EdsDeviceInfo, EdsSection};

    #[test]
    fn test_write_entry_layout() {
        let mut out = String::new();
        write_entry(&mut out, "Key", &[EdsValue::token("1"), EdsValue::Empty]).unwrap();
        assert_eq!(out, "    Key = 1, ;\n");

        out.clear();
        let fields: Vec<EdsValue> = (0..5).map(|i| EdsValue::token(alloc::format!("{}", i))).collect();
        write_entry(&mut out, "Param1", &fields).unwrap();
        assert_eq!(out, "    Param1 =\n        0,\n        1,\n        2,\n        3,\n        4;\n");
    }

    #[test]
    fn test_key_order_interleaves_typed_and_extra() {
        let profile = EdsProfile {
            device: Some(EdsDeviceInfo {
                name: "Device".into(),
                vend_code: IntLiteral::parse("0x0001"),
                vend_name: Some(EdsValue::quoted("Acme")),
                extra_entries: vec![EdsEntry::new("Vendor_Key", vec![EdsValue::token("7")], 1)],
                key_order: vec!["VendName".into(), "Vendor_Key".into(), "VendCode".into()],
                ..Default::default()
            }),
            section_order: vec!["Device".into()],
            ..Default::default()
        };
        assert_eq!(
            save_eds_to_string(&profile),
            "[Device]\n    VendName = \"Acme\";\n    Vendor_Key = 7;\n    VendCode = 0x0001;\n"
        );
    }

    #[test]
    fn test_sections_follow_recorded_order() {
        let profile = EdsProfile {
            capacity: Some(EdsCapacity {
                name: "Capacity".into(),
                max_msg_connections: IntLiteral::parse("128"),
                key_order: vec!["MaxMsgConnections".into()],
                ..Default::default()
            }),
            extension_sections: vec![EdsSection::new("DLR Class")],
            section_order: vec!["DLR Class".into(), "Capacity".into()],
            ..Default::default()
        };
        assert_eq!(
            save_eds_to_string(&profile),
            "[DLR Class]\n\n[Capacity]\n    MaxMsgConnections = 128;\n"
        );
    }
}
