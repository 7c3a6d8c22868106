// crates/devdesc-rs/src/eds/records.rs

//! Positional records of the typed EDS sections.
//!
//! Each record keeps its fields as typed slots plus the source field count,
//! so `to_fields` emits exactly the fields the source had, trailing empties
//! included.

use super::value::EdsValue;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

fn take(fields: &[EdsValue], i: usize) -> EdsValue {
    fields.get(i).cloned().unwrap_or_default()
}

fn rest(fields: &[EdsValue], from: usize) -> Vec<EdsValue> {
    fields.get(from..).map(<[EdsValue]>::to_vec).unwrap_or_default()
}

/// Extracts the numeric suffix of keys like `Param12` or `Assem100`.
pub fn key_number(key: &str, prefix: &str) -> Option<u32> {
    let digits = key.strip_prefix(prefix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A `ParamN` entry of `[Params]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsParameter {
    pub number: u32,
    pub key: String,
    pub reserved: EdsValue,
    pub link_path_size: EdsValue,
    pub link_path: EdsValue,
    pub descriptor: EdsValue,
    pub data_type: EdsValue,
    pub data_size: EdsValue,
    pub name: EdsValue,
    pub units: EdsValue,
    pub help: EdsValue,
    pub min: EdsValue,
    pub max: EdsValue,
    pub default: EdsValue,
    /// Multiplier, divider, base, offset.
    pub scaling: Vec<EdsValue>,
    /// Multiplier, divider, base and offset links.
    pub links: Vec<EdsValue>,
    pub decimal_places: EdsValue,
    /// Fields after the decimal places (international strings, vendor data).
    pub trailing: Vec<EdsValue>,
    pub field_count: usize,
    pub order_index: u32,
}

impl EdsParameter {
    pub const STANDARD_FIELDS: usize = 21;

    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        Self {
            number,
            key: String::from(key),
            reserved: take(fields, 0),
            link_path_size: take(fields, 1),
            link_path: take(fields, 2),
            descriptor: take(fields, 3),
            data_type: take(fields, 4),
            data_size: take(fields, 5),
            name: take(fields, 6),
            units: take(fields, 7),
            help: take(fields, 8),
            min: take(fields, 9),
            max: take(fields, 10),
            default: take(fields, 11),
            scaling: (12..16).map(|i| take(fields, i)).collect(),
            links: (16..20).map(|i| take(fields, i)).collect(),
            decimal_places: take(fields, 20),
            trailing: rest(fields, Self::STANDARD_FIELDS),
            field_count: fields.len(),
            order_index,
        }
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields = Vec::with_capacity(Self::STANDARD_FIELDS + self.trailing.len());
        fields.extend([
            self.reserved.clone(),
            self.link_path_size.clone(),
            self.link_path.clone(),
            self.descriptor.clone(),
            self.data_type.clone(),
            self.data_size.clone(),
            self.name.clone(),
            self.units.clone(),
            self.help.clone(),
            self.min.clone(),
            self.max.clone(),
            self.default.clone(),
        ]);
        fields.extend(self.scaling.iter().cloned());
        fields.extend(self.links.iter().cloned());
        fields.push(self.decimal_places.clone());
        fields.extend(self.trailing.iter().cloned());
        fields.truncate(self.field_count);
        fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str().unwrap_or("")
    }

    /// CIP data type code (e.g. `0xC7` for UINT).
    pub fn data_type_code(&self) -> Option<i64> {
        self.data_type.as_int()
    }
}

/// An `EnumN` entry: `value, "label"` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsEnum {
    pub number: u32,
    pub key: String,
    pub values: Vec<(EdsValue, EdsValue)>,
    /// Odd trailing field without a label.
    pub dangling: Option<EdsValue>,
    pub order_index: u32,
}

impl EdsEnum {
    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        let mut values = Vec::new();
        let mut chunks = fields.chunks_exact(2);
        for pair in chunks.by_ref() {
            values.push((pair[0].clone(), pair[1].clone()));
        }
        let dangling = chunks.remainder().first().cloned();
        Self {
            number,
            key: String::from(key),
            values,
            dangling,
            order_index,
        }
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields: Vec<EdsValue> = self
            .values
            .iter()
            .flat_map(|(v, l)| [v.clone(), l.clone()])
            .collect();
        fields.extend(self.dangling.iter().cloned());
        fields
    }
}

/// A member of an assembly: `size, reference`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsAssemblyMember {
    pub size: EdsValue,
    pub reference: EdsValue,
}

/// An `AssemN` entry of `[Assembly]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsAssembly {
    pub number: u32,
    pub key: String,
    pub name: EdsValue,
    pub path: EdsValue,
    /// Empty for a variable-size assembly.
    pub size: EdsValue,
    pub descriptor: EdsValue,
    pub reserved: Vec<EdsValue>,
    pub members: Vec<EdsAssemblyMember>,
    /// Odd trailing member field.
    pub dangling: Option<EdsValue>,
    pub field_count: usize,
    pub order_index: u32,
}

impl EdsAssembly {
    pub const HEADER_FIELDS: usize = 6;

    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        let mut members = Vec::new();
        let tail = rest(fields, Self::HEADER_FIELDS);
        let mut chunks = tail.chunks_exact(2);
        for pair in chunks.by_ref() {
            members.push(EdsAssemblyMember {
                size: pair[0].clone(),
                reference: pair[1].clone(),
            });
        }
        let dangling = chunks.remainder().first().cloned();
        Self {
            number,
            key: String::from(key),
            name: take(fields, 0),
            path: take(fields, 1),
            size: take(fields, 2),
            descriptor: take(fields, 3),
            reserved: vec_of(fields, 4, 6),
            members,
            dangling,
            field_count: fields.len(),
            order_index,
        }
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields = Vec::new();
        fields.extend([
            self.name.clone(),
            self.path.clone(),
            self.size.clone(),
            self.descriptor.clone(),
        ]);
        fields.extend(self.reserved.iter().cloned());
        for m in &self.members {
            fields.push(m.size.clone());
            fields.push(m.reference.clone());
        }
        fields.extend(self.dangling.iter().cloned());
        fields.truncate(self.field_count);
        fields
    }

    /// True when the size field is empty (a variable assembly).
    pub fn is_variable(&self) -> bool {
        self.size.is_empty()
    }
}

fn vec_of(fields: &[EdsValue], from: usize, to: usize) -> Vec<EdsValue> {
    (from..to).map(|i| take(fields, i)).collect()
}

/// Size, RPI and format of one connection direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsConnectionEndpoint {
    pub rpi: EdsValue,
    pub size: EdsValue,
    pub format: EdsValue,
}

/// A `ConnectionN` entry of `[Connection Manager]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsConnection {
    pub number: u32,
    pub key: String,
    pub trigger_transport: EdsValue,
    pub connection_parameters: EdsValue,
    pub o_to_t: EdsConnectionEndpoint,
    pub t_to_o: EdsConnectionEndpoint,
    /// Config part 1: size, format.
    pub config1: (EdsValue, EdsValue),
    /// Config part 2: size, format.
    pub config2: (EdsValue, EdsValue),
    pub name: EdsValue,
    pub help: EdsValue,
    pub path: EdsValue,
    pub trailing: Vec<EdsValue>,
    pub field_count: usize,
    pub order_index: u32,
}

impl EdsConnection {
    pub const STANDARD_FIELDS: usize = 15;

    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        Self {
            number,
            key: String::from(key),
            trigger_transport: take(fields, 0),
            connection_parameters: take(fields, 1),
            o_to_t: EdsConnectionEndpoint {
                rpi: take(fields, 2),
                size: take(fields, 3),
                format: take(fields, 4),
            },
            t_to_o: EdsConnectionEndpoint {
                rpi: take(fields, 5),
                size: take(fields, 6),
                format: take(fields, 7),
            },
            config1: (take(fields, 8), take(fields, 9)),
            config2: (take(fields, 10), take(fields, 11)),
            name: take(fields, 12),
            help: take(fields, 13),
            path: take(fields, 14),
            trailing: rest(fields, Self::STANDARD_FIELDS),
            field_count: fields.len(),
            order_index,
        }
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields = Vec::with_capacity(Self::STANDARD_FIELDS + self.trailing.len());
        fields.extend([
            self.trigger_transport.clone(),
            self.connection_parameters.clone(),
            self.o_to_t.rpi.clone(),
            self.o_to_t.size.clone(),
            self.o_to_t.format.clone(),
            self.t_to_o.rpi.clone(),
            self.t_to_o.size.clone(),
            self.t_to_o.format.clone(),
            self.config1.0.clone(),
            self.config1.1.clone(),
            self.config2.0.clone(),
            self.config2.1.clone(),
            self.name.clone(),
            self.help.clone(),
            self.path.clone(),
        ]);
        fields.extend(self.trailing.iter().cloned());
        fields.truncate(self.field_count);
        fields
    }
}

/// A `PortN` entry of `[Port]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsPort {
    pub number: u32,
    pub key: String,
    pub port_type: EdsValue,
    pub name: EdsValue,
    pub path: EdsValue,
    pub port_number: EdsValue,
    pub trailing: Vec<EdsValue>,
    pub field_count: usize,
    pub order_index: u32,
}

impl EdsPort {
    pub const STANDARD_FIELDS: usize = 4;

    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        Self {
            number,
            key: String::from(key),
            port_type: take(fields, 0),
            name: take(fields, 1),
            path: take(fields, 2),
            port_number: take(fields, 3),
            trailing: rest(fields, Self::STANDARD_FIELDS),
            field_count: fields.len(),
            order_index,
        }
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields = Vec::new();
        fields.extend([
            self.port_type.clone(),
            self.name.clone(),
            self.path.clone(),
            self.port_number.clone(),
        ]);
        fields.extend(self.trailing.iter().cloned());
        fields.truncate(self.field_count);
        fields
    }
}

/// A module entry of `[Modular]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsModule {
    pub number: u32,
    pub key: String,
    pub fields: Vec<EdsValue>,
    pub order_index: u32,
}

/// Direction of a `TSpecN` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TSpecDirection {
    Tx,
    Rx,
    TxRx,
}

impl TSpecDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Tx" | "TX" => Some(Self::Tx),
            "Rx" | "RX" => Some(Self::Rx),
            "TxRx" | "TXRX" => Some(Self::TxRx),
            _ => None,
        }
    }
}

/// A `TSpecN = direction, frame size, frames per second;` entry of `[Capacity]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdsTSpec {
    pub number: u32,
    pub key: String,
    /// Raw direction token; see [`EdsTSpec::direction`].
    pub direction_token: EdsValue,
    pub frame_size: EdsValue,
    pub frames_per_second: EdsValue,
    pub trailing: Vec<EdsValue>,
    pub field_count: usize,
    pub order_index: u32,
}

impl EdsTSpec {
    pub fn from_fields(number: u32, key: &str, fields: &[EdsValue], order_index: u32) -> Self {
        Self {
            number,
            key: String::from(key),
            direction_token: take(fields, 0),
            frame_size: take(fields, 1),
            frames_per_second: take(fields, 2),
            trailing: rest(fields, 3),
            field_count: fields.len(),
            order_index,
        }
    }

    pub fn direction(&self) -> Option<TSpecDirection> {
        self.direction_token.as_str().and_then(TSpecDirection::parse)
    }

    pub fn to_fields(&self) -> Vec<EdsValue> {
        let mut fields = Vec::new();
        fields.extend([
            self.direction_token.clone(),
            self.frame_size.clone(),
            self.frames_per_second.clone(),
        ]);
        fields.extend(self.trailing.iter().cloned());
        fields.truncate(self.field_count);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(spec: &[&str]) -> Vec<EdsValue> {
        spec.iter()
            .map(|s| {
                if s.is_empty() {
                    EdsValue::Empty
                } else if let Some(q) = s.strip_prefix('"') {
                    EdsValue::quoted(q.trim_end_matches('"'))
                } else {
                    EdsValue::token(*s)
                }
            })
            .collect()
    }

    #[test]
    fn test_parameter_fields_round_trip() {
        let fields = tokens(&[
            "0", "", "", "0x0000", "0xC7", "2", "\"Speed\"", "\"rpm\"", "\"Motor speed\"", "0",
            "3000", "1500", "", "", "", "", "", "", "", "", "0",
        ]);
        let p = EdsParameter::from_fields(1, "Param1", &fields, 0);
        assert_eq!(p.name(), "Speed");
        assert_eq!(p.data_type_code(), Some(0xC7));
        assert_eq!(p.to_fields(), fields);
    }

    #[test]
    fn test_short_parameter_keeps_field_count() {
        let fields = tokens(&["0", "", "", "0x0000", "0xC6", "1", "\"Mode\""]);
        let p = EdsParameter::from_fields(7, "Param7", &fields, 3);
        assert_eq!(p.to_fields().len(), 7);
        assert_eq!(p.to_fields(), fields);
    }

    #[test]
    fn test_assembly_members_and_variable_size() {
        let fields = tokens(&[
            "\"Input\"",
            "\"20 04 24 64 30 03\"",
            "",
            "0x0000",
            "",
            "",
            "16",
            "Param1",
            "16",
            "Param2",
        ]);
        let a = EdsAssembly::from_fields(100, "Assem100", &fields, 0);
        assert!(a.is_variable());
        assert_eq!(a.members.len(), 2);
        assert_eq!(a.to_fields(), fields);
    }

    #[test]
    fn test_enum_pairs() {
        let fields = tokens(&["0", "\"Off\"", "1", "\"On\""]);
        let e = EdsEnum::from_fields(1, "Enum1", &fields, 0);
        assert_eq!(e.values.len(), 2);
        assert_eq!(e.dangling, None);
        assert_eq!(e.to_fields(), fields);
    }

    #[test]
    fn test_tspec_direction() {
        let t = EdsTSpec::from_fields(1, "TSpec1", &tokens(&["TxRx", "32", "1000"]), 0);
        assert_eq!(t.direction(), Some(TSpecDirection::TxRx));
        assert_eq!(key_number("TSpec12", "TSpec"), Some(12));
        assert_eq!(key_number("TSpecX", "TSpec"), None);
    }
}
