// crates/devdesc-rs/src/iodd/comm.rs

//! `CommNetworkProfile`: physical layer, connection wiring and test configuration.

use crate::lexical::Lexical;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Which attribute name carried the transmission rate in the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BitrateSpelling {
    /// Current `bitrate` attribute.
    #[default]
    Bitrate,
    /// Legacy `baudrate` attribute.
    Baudrate,
}

impl BitrateSpelling {
    pub fn attribute_name(&self) -> &'static str {
        match self {
            BitrateSpelling::Bitrate => "bitrate",
            BitrateSpelling::Baudrate => "baudrate",
        }
    }
}

/// A `WireN` element of a connection (N = 1..=5).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub number: u8,
    pub function: Option<String>,
    pub color: Option<String>,
}

/// The `Connection` element of a physical layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub xsi_type: Option<String>,
    pub connection_symbol: Option<String>,
    /// `productId` values of `ProductRef` children.
    pub product_refs: Vec<String>,
    /// Wires sorted by `number`.
    pub wires: Vec<Wire>,
}

/// A `PhysicalLayer` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalLayer {
    pub bitrate: Option<String>,
    pub bitrate_spelling: BitrateSpelling,
    pub min_cycle_time: Option<Lexical<u32>>,
    pub sio_supported: Option<Lexical<bool>>,
    pub m_sequence_capability: Option<Lexical<u8>>,
    pub physics: Option<String>,
    pub connection: Option<Connection>,
}

/// `TransportLayers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportLayers {
    pub physical_layers: Vec<PhysicalLayer>,
}

/// An `EventTrigger` of a test configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTrigger {
    pub appear_value: String,
    pub disappear_value: String,
}

/// A `ConfigN` element of `Test` (N = 1..=7).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    pub slot: u8,
    pub index: Lexical<u16>,
    pub test_value: Option<String>,
    pub event_triggers: Vec<EventTrigger>,
}

/// The `Test` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    /// Configs sorted by `slot`.
    pub configs: Vec<TestConfig>,
}

/// The `CommNetworkProfile` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationProfile {
    pub xsi_type: Option<String>,
    pub iolink_revision: Option<String>,
    pub compatible_with: Option<String>,
    pub transport_layers: Option<TransportLayers>,
    pub test: Option<TestConfiguration>,
}
