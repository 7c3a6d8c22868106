// crates/devdesc-rs-iodd/src/model/comm.rs

//! Contains model structs related to `<CommNetworkProfile>`.

use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// `<ProductRef productId=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct ProductRef {
    #[serde(rename = "@productId")]
    pub product_id: String,
}

/// `<Wire1 function=".." color=".."/>` and siblings.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Wire {
    #[serde(rename = "@function", default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(rename = "@color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `<Connection xsi:type="..">`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Connection {
    #[serde(
        rename(serialize = "@xsi:type", deserialize = "@type"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,
    #[serde(
        rename = "@connectionSymbol",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub connection_symbol: Option<String>,

    #[serde(rename = "ProductRef", default, skip_serializing_if = "Vec::is_empty")]
    pub product_ref: Vec<ProductRef>,
    #[serde(rename = "Wire1", default, skip_serializing_if = "Option::is_none")]
    pub wire1: Option<Wire>,
    #[serde(rename = "Wire2", default, skip_serializing_if = "Option::is_none")]
    pub wire2: Option<Wire>,
    #[serde(rename = "Wire3", default, skip_serializing_if = "Option::is_none")]
    pub wire3: Option<Wire>,
    #[serde(rename = "Wire4", default, skip_serializing_if = "Option::is_none")]
    pub wire4: Option<Wire>,
    #[serde(rename = "Wire5", default, skip_serializing_if = "Option::is_none")]
    pub wire5: Option<Wire>,
}

/// `<PhysicalLayer>`. Either `bitrate` or the legacy `baudrate` carries the rate.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct PhysicalLayer {
    #[serde(rename = "@bitrate", default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
    #[serde(rename = "@baudrate", default, skip_serializing_if = "Option::is_none")]
    pub baudrate: Option<String>,
    #[serde(rename = "@minCycleTime", default, skip_serializing_if = "Option::is_none")]
    pub min_cycle_time: Option<String>,
    #[serde(rename = "@sioSupported", default, skip_serializing_if = "Option::is_none")]
    pub sio_supported: Option<String>,
    #[serde(
        rename = "@mSequenceCapability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub m_sequence_capability: Option<String>,
    #[serde(rename = "@physics", default, skip_serializing_if = "Option::is_none")]
    pub physics: Option<String>,

    #[serde(rename = "Connection", default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,
}

/// `<TransportLayers>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct TransportLayers {
    #[serde(rename = "PhysicalLayer", default, skip_serializing_if = "Vec::is_empty")]
    pub physical_layer: Vec<PhysicalLayer>,
}

/// `<EventTrigger appearValue=".." disappearValue=".."/>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct EventTrigger {
    #[serde(rename = "@appearValue")]
    pub appear_value: String,
    #[serde(rename = "@disappearValue")]
    pub disappear_value: String,
}

/// `<Config1 index=".." testValue="..">` and siblings.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct TestConfig {
    #[serde(rename = "@index")]
    pub index: String,
    #[serde(rename = "@testValue", default, skip_serializing_if = "Option::is_none")]
    pub test_value: Option<String>,
    #[serde(rename = "EventTrigger", default, skip_serializing_if = "Vec::is_empty")]
    pub event_trigger: Vec<EventTrigger>,
}

/// `<Test>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Test {
    #[serde(rename = "Config1", default, skip_serializing_if = "Option::is_none")]
    pub config1: Option<TestConfig>,
    #[serde(rename = "Config2", default, skip_serializing_if = "Option::is_none")]
    pub config2: Option<TestConfig>,
    #[serde(rename = "Config3", default, skip_serializing_if = "Option::is_none")]
    pub config3: Option<TestConfig>,
    #[serde(rename = "Config4", default, skip_serializing_if = "Option::is_none")]
    pub config4: Option<TestConfig>,
    #[serde(rename = "Config5", default, skip_serializing_if = "Option::is_none")]
    pub config5: Option<TestConfig>,
    #[serde(rename = "Config6", default, skip_serializing_if = "Option::is_none")]
    pub config6: Option<TestConfig>,
    #[serde(rename = "Config7", default, skip_serializing_if = "Option::is_none")]
    pub config7: Option<TestConfig>,
}

/// `<CommNetworkProfile>`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct CommNetworkProfile {
    #[serde(
        rename(serialize = "@xsi:type", deserialize = "@type"),
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub xsi_type: Option<String>,
    #[serde(rename = "@iolinkRevision", default, skip_serializing_if = "Option::is_none")]
    pub iolink_revision: Option<String>,
    #[serde(rename = "@compatibleWith", default, skip_serializing_if = "Option::is_none")]
    pub compatible_with: Option<String>,

    #[serde(rename = "TransportLayers", default, skip_serializing_if = "Option::is_none")]
    pub transport_layers: Option<TransportLayers>,
    #[serde(rename = "Test", default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Test>,
}
