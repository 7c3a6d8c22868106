// crates/devdesc-rs-iodd/src/resolver/comm.rs

use super::Context;
use crate::model::comm::{self as model, CommNetworkProfile};
use alloc::vec::Vec;
use devdesc_rs::iodd::{
    BitrateSpelling, CommunicationProfile, Connection, EventTrigger, PhysicalLayer, TestConfig,
    TestConfiguration, TransportLayers, Wire,
};

pub(super) fn resolve_comm(ctx: &mut Context, comm: &CommNetworkProfile) -> CommunicationProfile {
    CommunicationProfile {
        xsi_type: comm.xsi_type.clone(),
        iolink_revision: comm.iolink_revision.clone(),
        compatible_with: comm.compatible_with.clone(),
        transport_layers: comm.transport_layers.as_ref().map(|t| TransportLayers {
            physical_layers: t
                .physical_layer
                .iter()
                .map(|p| resolve_physical_layer(ctx, p))
                .collect(),
        }),
        test: comm.test.as_ref().map(|t| resolve_test(ctx, t)),
    }
}

/// Records whether the rate came from `bitrate` or the legacy `baudrate`.
fn resolve_physical_layer(ctx: &mut Context, p: &model::PhysicalLayer) -> PhysicalLayer {
    let path = "CommNetworkProfile/TransportLayers/PhysicalLayer";
    let (bitrate, bitrate_spelling) = match (&p.bitrate, &p.baudrate) {
        (Some(b), _) => (Some(b.clone()), BitrateSpelling::Bitrate),
        (None, Some(b)) => (Some(b.clone()), BitrateSpelling::Baudrate),
        (None, None) => (None, BitrateSpelling::Bitrate),
    };
    PhysicalLayer {
        bitrate,
        bitrate_spelling,
        min_cycle_time: ctx.opt_number(p.min_cycle_time.as_ref(), "minCycleTime", path),
        sio_supported: ctx.flag(p.sio_supported.as_ref(), "sioSupported", path),
        m_sequence_capability: ctx.opt_number(
            p.m_sequence_capability.as_ref(),
            "mSequenceCapability",
            path,
        ),
        physics: p.physics.clone(),
        connection: p.connection.as_ref().map(resolve_connection),
    }
}

fn resolve_connection(c: &model::Connection) -> Connection {
    let wires = [&c.wire1, &c.wire2, &c.wire3, &c.wire4, &c.wire5]
        .into_iter()
        .zip(1u8..)
        .filter_map(|(wire, number)| {
            wire.as_ref().map(|w| Wire {
                number,
                function: w.function.clone(),
                color: w.color.clone(),
            })
        })
        .collect();
    Connection {
        xsi_type: c.xsi_type.clone(),
        connection_symbol: c.connection_symbol.clone(),
        product_refs: c.product_ref.iter().map(|r| r.product_id.clone()).collect(),
        wires,
    }
}

fn resolve_test(ctx: &mut Context, t: &model::Test) -> TestConfiguration {
    let path = "CommNetworkProfile/Test";
    let slots = [
        &t.config1, &t.config2, &t.config3, &t.config4, &t.config5, &t.config6, &t.config7,
    ];
    let mut configs = Vec::new();
    for (config, slot) in slots.into_iter().zip(1u8..) {
        let Some(config) = config else { continue };
        configs.push(TestConfig {
            slot,
            index: ctx.required(&config.index, "index", path),
            test_value: config.test_value.clone(),
            event_triggers: config
                .event_trigger
                .iter()
                .map(|e| EventTrigger {
                    appear_value: e.appear_value.clone(),
                    disappear_value: e.disappear_value.clone(),
                })
                .collect(),
        });
    }
    TestConfiguration { configs }
}
