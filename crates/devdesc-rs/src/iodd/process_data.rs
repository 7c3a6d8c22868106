// crates/devdesc-rs/src/iodd/process_data.rs

//! `ProcessDataCollection`: cyclic input/output data layouts.

use super::datatype::DatatypeChoice;
use crate::ids::{TextId, VariableId};
use crate::lexical::Lexical;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A `Condition` selecting a process data layout by variable value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub variable_id: VariableId,
    pub subindex: Option<Lexical<u8>>,
    pub value: String,
}

/// A `ProcessDataIn` or `ProcessDataOut` element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDataItem {
    pub id: String,
    pub bit_length: Lexical<u32>,
    /// Usually an inline `RecordT`/`ArrayT`/simple type, sometimes a `DatatypeRef`.
    pub datatype: Option<DatatypeChoice>,
    pub name: Option<TextId>,
}

/// A `ProcessData` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessData {
    pub id: String,
    pub condition: Option<Condition>,
    pub input: Option<ProcessDataItem>,
    pub output: Option<ProcessDataItem>,
    pub order_index: u32,
}

impl ProcessData {
    /// Total process data width in bits (input plus output).
    pub fn total_bit_length(&self) -> u32 {
        self.input.as_ref().map_or(0, |i| i.bit_length.get())
            + self.output.as_ref().map_or(0, |o| o.bit_length.get())
    }
}
