// crates/devdesc-rs-iodd/src/resolver/text.rs

use crate::model::text::{ExternalTextCollection, LanguageBlock as ModelBlock};
use alloc::string::String;
use devdesc_rs::TextId;
use devdesc_rs::iodd::{LanguageBlock, TextEntry, TextTable};

/// Builds the multi-language text table.
///
/// The primary block gets `language_order` 0, secondary blocks follow in
/// source order. `xml_order` restarts at 0 inside every block.
pub(super) fn resolve_texts(collection: Option<&ExternalTextCollection>) -> TextTable {
    let mut table = TextTable::default();
    let Some(collection) = collection else {
        return table;
    };

    let blocks = collection
        .primary_language
        .iter()
        .map(|b| (b, true))
        .chain(collection.language.iter().map(|b| (b, false)));

    for (language_order, (block, is_primary)) in blocks.enumerate() {
        push_block(&mut table, block, language_order as u32, is_primary);
    }
    table
}

fn push_block(table: &mut TextTable, block: &ModelBlock, language_order: u32, is_primary: bool) {
    table.languages.push(LanguageBlock {
        code: block.lang.clone(),
        language_order,
        is_primary,
    });
    for (xml_order, text) in block.text.iter().enumerate() {
        table.entries.push(TextEntry {
            text_id: TextId::from(text.id.as_str()),
            language: String::from(block.lang.as_str()),
            value: text.value.clone(),
            xml_order: xml_order as u32,
        });
    }
}
