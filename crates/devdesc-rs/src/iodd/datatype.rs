// crates/devdesc-rs/src/iodd/datatype.rs

//! Datatype definitions: inline `Datatype`, custom datatypes and references.

use crate::ids::{DatatypeId, TextId};
use crate::lexical::Lexical;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

/// The `xsi:type` of a datatype.
///
/// The set is closed; a type the parser does not know is kept verbatim in
/// `Other` so it still reconstructs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatatypeKind {
    BooleanT,
    #[default]
    UIntegerT,
    IntegerT,
    Float32T,
    StringT,
    OctetStringT,
    TimeT,
    TimeSpanT,
    RecordT,
    ArrayT,
    Other(String),
}

impl DatatypeKind {
    /// Maps an `xsi:type` value to a kind.
    pub fn from_xsi_type(s: &str) -> Self {
        match s {
            "BooleanT" => Self::BooleanT,
            "UIntegerT" => Self::UIntegerT,
            "IntegerT" => Self::IntegerT,
            "Float32T" => Self::Float32T,
            "StringT" => Self::StringT,
            "OctetStringT" => Self::OctetStringT,
            "TimeT" => Self::TimeT,
            "TimeSpanT" => Self::TimeSpanT,
            "RecordT" => Self::RecordT,
            "ArrayT" => Self::ArrayT,
            other => Self::Other(String::from(other)),
        }
    }

    pub fn as_xsi_type(&self) -> &str {
        match self {
            Self::BooleanT => "BooleanT",
            Self::UIntegerT => "UIntegerT",
            Self::IntegerT => "IntegerT",
            Self::Float32T => "Float32T",
            Self::StringT => "StringT",
            Self::OctetStringT => "OctetStringT",
            Self::TimeT => "TimeT",
            Self::TimeSpanT => "TimeSpanT",
            Self::RecordT => "RecordT",
            Self::ArrayT => "ArrayT",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Bit length implied by the kind when the source omits `bitLength`.
    pub fn implicit_bit_length(&self) -> Option<u32> {
        match self {
            Self::BooleanT => Some(1),
            Self::Float32T => Some(32),
            Self::TimeT => Some(64),
            Self::TimeSpanT => Some(64),
            _ => None,
        }
    }
}

impl fmt::Display for DatatypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_xsi_type())
    }
}

/// Access rights of a variable (`accessRights`, `accessRightRestriction`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessRights {
    Ro,
    Wo,
    Rw,
}

impl AccessRights {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ro" => Some(Self::Ro),
            "wo" => Some(Self::Wo),
            "rw" => Some(Self::Rw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::Wo => "wo",
            Self::Rw => "rw",
        }
    }
}

/// A `SingleValue` enumeration entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleValue {
    pub value: String,
    pub xsi_type: Option<String>,
    /// `textId` of the nested `<Name>`.
    pub text_id: Option<TextId>,
    pub order_index: u32,
}

/// A `ValueRange` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub lower_value: String,
    pub upper_value: String,
    pub xsi_type: Option<String>,
    pub text_id: Option<TextId>,
    pub order_index: u32,
}

/// A `RecordItem` of a `RecordT` datatype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordItem {
    pub subindex: Lexical<u8>,
    pub bit_offset: Lexical<u32>,
    pub access_right_restriction: Option<AccessRights>,
    /// `SimpleDatatype` (inline) or `DatatypeRef`.
    pub datatype: DatatypeChoice,
    pub name: Option<TextId>,
    pub description: Option<TextId>,
    pub order_index: u32,
}

/// A datatype definition, inline or as a custom datatype body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Datatype {
    pub kind: DatatypeKind,
    pub bit_length: Option<Lexical<u32>>,
    pub fixed_length: Option<Lexical<u32>>,
    /// Element count of an `ArrayT`.
    pub count: Option<Lexical<u32>>,
    /// String encoding of a `StringT` (`UTF-8`, `US-ASCII`).
    pub encoding: Option<String>,
    pub subindex_access_supported: Option<Lexical<bool>>,
    pub single_values: Vec<SingleValue>,
    pub value_ranges: Vec<ValueRange>,
    pub record_items: Vec<RecordItem>,
    /// Element datatype of an `ArrayT`.
    pub element: Option<Box<DatatypeChoice>>,
}

impl Datatype {
    pub fn new(kind: DatatypeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Effective bit length: the explicit attribute, else the kind's implicit size.
    pub fn effective_bit_length(&self) -> Option<u32> {
        self.bit_length
            .as_ref()
            .map(Lexical::get)
            .or_else(|| self.kind.implicit_bit_length())
    }

    /// Looks up the `SingleValue` whose value equals `value`.
    pub fn single_value(&self, value: &str) -> Option<&SingleValue> {
        self.single_values.iter().find(|sv| sv.value == value)
    }
}

/// The mutually exclusive inline-or-reference choice for a datatype.
///
/// The parser records which form the source used so reconstruction can echo it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatatypeChoice {
    Inline(Datatype),
    Ref(DatatypeId),
}

impl DatatypeChoice {
    pub fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }

    pub fn as_inline(&self) -> Option<&Datatype> {
        match self {
            Self::Inline(dt) => Some(dt),
            Self::Ref(_) => None,
        }
    }

    pub fn as_ref_id(&self) -> Option<&DatatypeId> {
        match self {
            Self::Ref(id) => Some(id),
            Self::Inline(_) => None,
        }
    }
}

/// A datatype declared in `DatatypeCollection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomDatatype {
    pub id: DatatypeId,
    pub datatype: Datatype,
    pub order_index: u32,
}

/// Kind and size information resolved through the datatype lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDatatype {
    pub kind: DatatypeKind,
    pub bit_length: Option<u32>,
    /// Number of `SingleValue` entries visible through the reference.
    pub single_value_count: u32,
    /// True when resolved through a `DatatypeRef`.
    pub via_ref: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_xsi_type() {
        for name in ["BooleanT", "UIntegerT", "RecordT", "ArrayT", "TimeSpanT"] {
            assert_eq!(DatatypeKind::from_xsi_type(name).as_xsi_type(), name);
        }
        let other = DatatypeKind::from_xsi_type("VendorFooT");
        assert!(!other.is_known());
        assert_eq!(other.as_xsi_type(), "VendorFooT");
    }

    #[test]
    fn test_effective_bit_length() {
        let mut dt = Datatype::new(DatatypeKind::BooleanT);
        assert_eq!(dt.effective_bit_length(), Some(1));
        dt.bit_length = Some(Lexical::new(8));
        assert_eq!(dt.effective_bit_length(), Some(8));
        assert_eq!(Datatype::new(DatatypeKind::UIntegerT).effective_bit_length(), None);
    }

    #[test]
    fn test_access_rights_parse() {
        assert_eq!(AccessRights::parse("rw"), Some(AccessRights::Rw));
        assert_eq!(AccessRights::parse("RW"), None);
        assert_eq!(AccessRights::Ro.as_str(), "ro");
    }
}
