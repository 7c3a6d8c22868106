// crates/devdesc-rs-iodd/src/builder/comm.rs

use super::spelled;
use crate::model::comm::{self as model, CommNetworkProfile};
use alloc::string::ToString;
use devdesc_rs::iodd::{
    BitrateSpelling, CommunicationProfile, Connection, PhysicalLayer, TestConfiguration,
};

pub(super) fn build_comm(comm: &CommunicationProfile) -> CommNetworkProfile {
    CommNetworkProfile {
        xsi_type: comm.xsi_type.clone(),
        iolink_revision: comm.iolink_revision.clone(),
        compatible_with: comm.compatible_with.clone(),
        transport_layers: comm
            .transport_layers
            .as_ref()
            .map(|t| model::TransportLayers {
                physical_layer: t.physical_layers.iter().map(build_physical_layer).collect(),
            }),
        test: comm.test.as_ref().map(build_test),
    }
}

/// Echoes the rate under the attribute name the source used.
fn build_physical_layer(p: &PhysicalLayer) -> model::PhysicalLayer {
    let (bitrate, baudrate) = match p.bitrate_spelling {
        BitrateSpelling::Bitrate => (p.bitrate.clone(), None),
        BitrateSpelling::Baudrate => (None, p.bitrate.clone()),
    };
    model::PhysicalLayer {
        bitrate,
        baudrate,
        min_cycle_time: spelled(p.min_cycle_time.as_ref()),
        sio_supported: spelled(p.sio_supported.as_ref()),
        m_sequence_capability: spelled(p.m_sequence_capability.as_ref()),
        physics: p.physics.clone(),
        connection: p.connection.as_ref().map(build_connection),
    }
}

fn build_connection(c: &Connection) -> model::Connection {
    let mut connection = model::Connection {
        xsi_type: c.xsi_type.clone(),
        connection_symbol: c.connection_symbol.clone(),
        product_ref: c
            .product_refs
            .iter()
            .map(|id| model::ProductRef {
                product_id: id.clone(),
            })
            .collect(),
        ..Default::default()
    };
    for wire in &c.wires {
        let slot = match wire.number {
            1 => &mut connection.wire1,
            2 => &mut connection.wire2,
            3 => &mut connection.wire3,
            4 => &mut connection.wire4,
            5 => &mut connection.wire5,
            other => {
                log::warn!("dropping wire with out-of-range number {}", other);
                continue;
            }
        };
        *slot = Some(model::Wire {
            function: wire.function.clone(),
            color: wire.color.clone(),
        });
    }
    connection
}

fn build_test(t: &TestConfiguration) -> model::Test {
    let mut test = model::Test::default();
    for config in &t.configs {
        let slot = match config.slot {
            1 => &mut test.config1,
            2 => &mut test.config2,
            3 => &mut test.config3,
            4 => &mut test.config4,
            5 => &mut test.config5,
            6 => &mut test.config6,
            7 => &mut test.config7,
            other => {
                log::warn!("dropping test config with out-of-range slot {}", other);
                continue;
            }
        };
        *slot = Some(model::TestConfig {
            index: config.index.to_string(),
            test_value: config.test_value.clone(),
            event_trigger: config
                .event_triggers
                .iter()
                .map(|e| model::EventTrigger {
                    appear_value: e.appear_value.clone(),
                    disappear_value: e.disappear_value.clone(),
                })
                .collect(),
        });
    }
    test
}
