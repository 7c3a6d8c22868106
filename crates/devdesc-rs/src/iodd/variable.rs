// crates/devdesc-rs/src/iodd/variable.rs

//! Members of `VariableCollection`: variables, standard variable references
//! and direct parameter overlays.

use super::datatype::{AccessRights, DatatypeChoice, ResolvedDatatype};
use crate::ids::{TextId, VariableId};
use crate::lexical::Lexical;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// A `RecordItemInfo` child of a variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordItemInfo {
    pub subindex: Lexical<u8>,
    pub default_value: Option<String>,
    pub excluded_from_data_storage: Option<Lexical<bool>>,
    pub modifies_other_variables: Option<Lexical<bool>>,
    pub order_index: u32,
}

/// An IODD `Variable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: VariableId,
    /// `None` when the source omitted `@index` (reported as an ERROR diagnostic).
    pub index: Option<Lexical<u16>>,
    pub access_rights: Option<AccessRights>,
    pub default_value: Option<String>,
    pub dynamic: Option<Lexical<bool>>,
    pub modifies_other_variables: Option<Lexical<bool>>,
    pub excluded_from_data_storage: Option<Lexical<bool>>,
    /// `None` only when the source had neither form (reported as an ERROR diagnostic).
    pub datatype: Option<DatatypeChoice>,
    /// Lookup result for the datatype, filled during resolution.
    pub resolved: Option<ResolvedDatatype>,
    pub record_item_info: Vec<RecordItemInfo>,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// Child elements of a `StdVariableRef`, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StdRefChild {
    /// `StdSingleValueRef value="..."`.
    SingleValueRef { value: String },
    /// An explicit `SingleValue` override.
    SingleValue {
        value: String,
        xsi_type: Option<String>,
        text_id: Option<TextId>,
    },
    /// An explicit `ValueRange` override.
    ValueRange {
        lower_value: String,
        upper_value: String,
        xsi_type: Option<String>,
        text_id: Option<TextId>,
    },
    /// `StdValueRangeRef lowerValue=".." upperValue=".."`.
    ValueRangeRef {
        lower_value: String,
        upper_value: String,
    },
    /// `StdRecordItemRef subindex=".."`.
    RecordItemRef {
        subindex: Lexical<u8>,
        default_value: Option<String>,
        excluded_from_data_storage: Option<Lexical<bool>>,
    },
}

/// A `StdVariableRef`: a standard variable referenced by id.
///
/// Keyed by its `VariableId`; it carries no numeric index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdVariableRef {
    pub id: VariableId,
    pub default_value: Option<String>,
    pub fixed_length_restriction: Option<Lexical<u32>>,
    pub excluded_from_data_storage: Option<Lexical<bool>>,
    pub children: Vec<StdRefChild>,
    pub order_index: u32,
}

/// A `DirectParameterOverlay`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectParameterOverlay {
    pub id: VariableId,
    pub index: Option<Lexical<u16>>,
    pub access_rights: Option<AccessRights>,
    pub default_value: Option<String>,
    pub dynamic: Option<Lexical<bool>>,
    pub modifies_other_variables: Option<Lexical<bool>>,
    pub excluded_from_data_storage: Option<Lexical<bool>>,
    pub datatype: Option<DatatypeChoice>,
    pub record_item_info: Vec<RecordItemInfo>,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// A borrowed view over the three `VariableCollection` member kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariableEntry<'a> {
    Variable(&'a Parameter),
    StdRef(&'a StdVariableRef),
    Overlay(&'a DirectParameterOverlay),
}

impl<'a> VariableEntry<'a> {
    pub fn id(&self) -> &'a VariableId {
        match self {
            VariableEntry::Variable(p) => &p.id,
            VariableEntry::StdRef(r) => &r.id,
            VariableEntry::Overlay(o) => &o.id,
        }
    }

    pub fn order_index(&self) -> u32 {
        match self {
            VariableEntry::Variable(p) => p.order_index,
            VariableEntry::StdRef(r) => r.order_index,
            VariableEntry::Overlay(o) => o.order_index,
        }
    }
}
