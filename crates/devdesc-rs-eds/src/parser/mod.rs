// crates/devdesc-rs-eds/src/parser/mod.rs

//! Turns lexed sections into a typed `EdsProfile`.
//!
//! Every section is parsed on its own. A problem in one entry never stops
//! the rest of the file from being read.

use crate::lexer::{RawSection, lex};
use alloc::format;
use alloc::vec::Vec;
use devdesc_rs::eds::{EdsProfile, SectionKind};
use devdesc_rs::{Diagnostic, Severity, SourceLocation};

mod sections;

/// Diagnostics of one parse run.
#[derive(Default)]
pub(crate) struct Context {
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Context {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity == Severity::Info {
            log::debug!("{}", diagnostic);
        } else {
            log::warn!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }
}

/// Parses an EDS file.
///
/// Always returns a profile. The diagnostics are returned separately and
/// are also stored in `EdsProfile::diagnostics`. A FATAL diagnostic is raised
/// only when `[File]` or `[Device]` is missing.
pub fn load_eds_from_str(text: &str) -> (EdsProfile, Vec<Diagnostic>) {
    let lexed = lex(text);
    let mut ctx = Context {
        diagnostics: lexed.diagnostics,
    };
    let mut profile = EdsProfile::default();

    for raw in &lexed.sections {
        profile.section_order.push(raw.name.clone());
        let kind = SectionKind::from_header(&raw.name);

        if kind != SectionKind::Extension && is_filled(&profile, kind) {
            ctx.push(
                Diagnostic::warn(
                    "EDS-P006",
                    format!("duplicate section [{}] kept as an untyped section", raw.name),
                )
                .with_location(header_location(raw)),
            );
            profile.extension_sections.push(sections::parse_untyped(raw));
            continue;
        }

        match kind {
            SectionKind::File => profile.file = Some(sections::parse_file(&mut ctx, raw)),
            SectionKind::Device => profile.device = Some(sections::parse_device(&mut ctx, raw)),
            SectionKind::DeviceClassification => {
                profile.classification = Some(sections::parse_untyped(raw))
            }
            SectionKind::Params => profile.params = Some(sections::parse_params(&mut ctx, raw)),
            SectionKind::Assembly => {
                profile.assembly = Some(sections::parse_assembly(&mut ctx, raw))
            }
            SectionKind::ConnectionManager => {
                profile.connection_manager = Some(sections::parse_connection_manager(&mut ctx, raw))
            }
            SectionKind::Port => profile.port = Some(sections::parse_port(&mut ctx, raw)),
            SectionKind::Capacity => {
                profile.capacity = Some(sections::parse_capacity(&mut ctx, raw))
            }
            SectionKind::Modular => profile.modular = Some(sections::parse_modular(raw)),
            SectionKind::Extension => {
                if !SectionKind::is_known_extension(&raw.name) {
                    ctx.push(
                        Diagnostic::info(
                            "EDS-P007",
                            format!("unrecognised section [{}] kept verbatim", raw.name),
                        )
                        .with_location(header_location(raw)),
                    );
                }
                profile.extension_sections.push(sections::parse_untyped(raw));
            }
        }
    }

    if profile.file.is_none() {
        ctx.push(
            Diagnostic::fatal("EDS-P001", "required section [File] is missing")
                .with_location(SourceLocation::section("File")),
        );
    }
    if profile.device.is_none() {
        ctx.push(
            Diagnostic::fatal("EDS-P002", "required section [Device] is missing")
                .with_location(SourceLocation::section("Device")),
        );
    }

    log::info!(
        "parsed EDS: {} sections, {} parameters, {} diagnostics",
        profile.section_order.len(),
        profile.parameters().len(),
        ctx.diagnostics.len()
    );
    profile.diagnostics = ctx.diagnostics.clone();
    (profile, ctx.diagnostics)
}

fn is_filled(profile: &EdsProfile, kind: SectionKind) -> bool {
    match kind {
        SectionKind::File => profile.file.is_some(),
        SectionKind::Device => profile.device.is_some(),
        SectionKind::DeviceClassification => profile.classification.is_some(),
        SectionKind::Params => profile.params.is_some(),
        SectionKind::Assembly => profile.assembly.is_some(),
        SectionKind::ConnectionManager => profile.connection_manager.is_some(),
        SectionKind::Port => profile.port.is_some(),
        SectionKind::Capacity => profile.capacity.is_some(),
        SectionKind::Modular => profile.modular.is_some(),
        SectionKind::Extension => false,
    }
}

fn header_location(raw: &RawSection) -> SourceLocation {
    SourceLocation::at(Some(raw.name.clone()), raw.line, raw.column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_reports_both_required_sections() {
        let (profile, diags) = load_eds_from_str("");
        let codes: Vec<&str> = diags.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(codes, ["EDS-P001", "EDS-P002"]);
        assert!(diags.iter().all(|d| d.severity == Severity::Fatal));
        assert_eq!(profile.diagnostics, diags);
    }

    #[test]
    fn test_duplicate_section_is_kept() {
        let (profile, diags) =
            load_eds_from_str("[File]\n[Device]\n[Port]\nPort1 = TCP;\n[Port]\nPort2 = TCP;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, "EDS-P006");
        assert_eq!(profile.port.as_ref().map(|p| p.ports.len()), Some(1));
        assert_eq!(profile.extension_sections.len(), 1);
        assert_eq!(profile.section_order, ["File", "Device", "Port", "Port"]);
    }
}
