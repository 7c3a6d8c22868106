// crates/devdesc-rs-iodd/tests/parsing.rs

use devdesc_rs::iodd::{
    AccessRights, BitrateSpelling, DatatypeChoice, DatatypeKind, ErrorTypeEntry, EventEntry,
    MenuItem, StdRefChild,
};
use devdesc_rs::{DatatypeId, Lexical, MenuId, Severity, TextId, VariableId};
use devdesc_rs_iodd::{load_iodd_from_str, parse_iodd_with_diagnostics};
use std::fs;
use std::path::PathBuf;

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

fn value<T: Copy>(v: &Option<Lexical<T>>) -> Option<T> {
    v.as_ref().map(Lexical::get)
}

#[test]
fn test_sample_parses_without_findings() {
    let xml = load_test_file("pressure-sensor.xml");
    let outcome = parse_iodd_with_diagnostics(&xml);
    assert!(
        outcome.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        outcome.diagnostics
    );
    let profile = outcome.profile.expect("profile should be present");

    assert_eq!(profile.vendor.vendor_id.get(), 888);
    assert_eq!(profile.vendor.vendor_name, "Example Sensors GmbH");
    assert_eq!(profile.vendor.vendor_logo.as_deref(), Some("Example-logo.png"));
    assert_eq!(profile.device.device_id.get(), 1_193_046);
    assert_eq!(
        profile.texts.lookup_primary(profile.device.device_name.as_ref().unwrap()),
        Some("PS Pressure Sensor")
    );
    assert_eq!(
        profile.texts.lookup(&TextId::from("TI_DeviceName"), "de"),
        Some("PS Drucksensor")
    );
    assert_eq!(profile.texts.primary_language(), Some("en"));

    let variants = profile.variants.as_ref().expect("variants");
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].product_id, "PS-100");
    assert_eq!(variants[1].device_symbol, None);

    let header = profile.profile_header.as_ref().expect("header");
    assert_eq!(header.class_id, "Device");
    assert_eq!(
        header.iso15745_reference.as_ref().map(|r| r.technology.as_str()),
        Some("IODD")
    );
    assert_eq!(
        profile.stamp.as_ref().map(|s| s.crc.as_str()),
        Some("2093754402")
    );
}

/// An attribute absent from the source stays absent in the model.
#[test]
fn test_absent_feature_flag_stays_absent() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let features = profile.features.as_ref().expect("features");
    assert_eq!(value(&features.block_parameter), Some(true));
    assert_eq!(features.data_storage, None);
    assert_eq!(features.profile_characteristic.as_deref(), Some("1 2 32768"));

    let locks = features.supported_access_locks.as_ref().expect("locks");
    assert_eq!(value(&locks.parameter), Some(false));
    assert_eq!(value(&locks.data_storage), Some(true));
    assert_eq!(locks.local_user_interface, None);
}

#[test]
fn test_single_value_text_is_attached_to_its_value() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let mode = profile
        .parameter(&VariableId::from("V_Mode"))
        .expect("V_Mode");

    assert_eq!(value(&mode.index), Some(64));
    assert_eq!(mode.access_rights, Some(AccessRights::Rw));
    assert_eq!(mode.default_value.as_deref(), Some("1"));

    let dt = mode
        .datatype
        .as_ref()
        .and_then(DatatypeChoice::as_inline)
        .expect("inline datatype");
    assert_eq!(dt.kind, DatatypeKind::UIntegerT);
    assert_eq!(dt.single_values.len(), 2);
    let one = dt.single_value("1").expect("single value 1");
    assert_eq!(one.text_id, Some(TextId::from("TI_5")));
    assert_eq!(profile.texts.lookup_primary(&TextId::from("TI_5")), Some("Standard"));
    assert_eq!(dt.value_ranges[0].lower_value, "10");

    // Single values and the value range share one ordering counter.
    let orders: Vec<u32> = dt
        .single_values
        .iter()
        .map(|sv| sv.order_index)
        .chain(dt.value_ranges.iter().map(|vr| vr.order_index))
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_datatype_refs_are_resolved() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();

    let switchpoint = profile
        .parameter(&VariableId::from("V_Switchpoint"))
        .expect("V_Switchpoint");
    assert!(matches!(
        &switchpoint.datatype,
        Some(DatatypeChoice::Ref(id)) if id == &DatatypeId::from("DT_Switchpoint")
    ));
    let resolved = switchpoint.resolved.as_ref().expect("resolved datatype");
    assert_eq!(resolved.kind, DatatypeKind::RecordT);
    assert_eq!(resolved.bit_length, Some(32));
    assert!(resolved.via_ref);
    assert_eq!(switchpoint.record_item_info.len(), 2);
    assert_eq!(value(&switchpoint.record_item_info[1].excluded_from_data_storage), Some(true));
    assert_eq!(value(&switchpoint.dynamic), Some(false));

    let record = profile
        .custom_datatype(&DatatypeId::from("DT_Switchpoint"))
        .expect("DT_Switchpoint");
    assert_eq!(record.datatype.record_items.len(), 2);
    assert_eq!(
        record.datatype.record_items[1].access_right_restriction,
        Some(AccessRights::Ro)
    );
    assert!(record.datatype.record_items[1].datatype.is_ref());
}

#[test]
fn test_variable_collection_keeps_source_order() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    assert!(profile.has_variable_collection);

    let ids: Vec<&str> = profile
        .variable_entries()
        .iter()
        .map(|e| e.id().as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "V_DirectParameters_1",
            "V_SystemCommand",
            "V_DeviceAccessLocks",
            "V_ApplicationSpecificTag",
            "V_Mode",
            "V_Switchpoint",
            "V_Flag",
            "V_DirectParameters_2",
        ]
    );

    let command = &profile.std_variable_refs[1];
    assert!(matches!(
        command.children.as_slice(),
        [StdRefChild::SingleValueRef { value: a }, StdRefChild::SingleValueRef { value: b }]
            if a == "130" && b == "131"
    ));
    let tag = &profile.std_variable_refs[3];
    assert_eq!(value(&tag.fixed_length_restriction), Some(16));
    assert_eq!(value(&tag.excluded_from_data_storage), Some(false));

    let overlay = &profile.direct_parameter_overlays[0];
    assert_eq!(overlay.access_rights, Some(AccessRights::Rw));
    assert!(overlay.datatype.as_ref().and_then(|d| d.as_inline()).is_some());
}

#[test]
fn test_process_data_and_diagnosis_collections() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();

    let pd = profile.process_data.as_ref().expect("process data");
    assert_eq!(pd.len(), 2);
    assert_eq!(pd[0].total_bit_length(), 24);
    let condition = pd[1].condition.as_ref().expect("condition");
    assert_eq!(condition.variable_id, VariableId::from("V_Mode"));
    assert_eq!(condition.value, "2");
    assert!(pd[1].output.is_none());

    let errors = profile.error_types.as_ref().expect("error types");
    assert_eq!(errors.len(), 3);
    assert!(matches!(&errors[0], ErrorTypeEntry::Standard(r) if r.code.is_none()));
    assert!(matches!(&errors[1], ErrorTypeEntry::Standard(r) if value(&r.code) == Some(128)));
    assert!(matches!(&errors[2], ErrorTypeEntry::Custom(e) if e.additional_code.get() == 129));

    let events = profile.events.as_ref().expect("events");
    assert_eq!(events.iter().map(EventEntry::code).collect::<Vec<_>>(), vec![16912, 6144]);
}

#[test]
fn test_user_interface_menus() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let ui = profile.user_interface.as_ref().expect("user interface");
    assert_eq!(ui.menus.len(), 4);

    let params = ui.menu(&MenuId::from("M_Params")).expect("M_Params");
    assert_eq!(params.name, Some(TextId::from("TI_Menu_Params")));
    assert_eq!(params.items.len(), 4);
    assert_eq!(params.button_count(), 2);
    match &params.items[1] {
        MenuItem::RecordItem(r) => {
            assert_eq!(r.subindex.get(), 1);
            assert_eq!(r.hints.unit_code.as_deref(), Some("1137"));
        }
        other => panic!("expected a record item ref, got {:?}", other),
    }
    match &params.items[3] {
        MenuItem::Menu(m) => {
            assert_eq!(m.menu_id, MenuId::from("M_Expert"));
            assert_eq!(m.condition.as_ref().map(|c| c.value.as_str()), Some("1"));
        }
        other => panic!("expected a menu ref, got {:?}", other),
    }

    let specialist = ui.specialist_role_menu_set.as_ref().expect("specialist set");
    assert_eq!(specialist.diagnosis_menu, Some(MenuId::from("M_Expert")));
    assert!(ui.observer_role_menu_set.as_ref().unwrap().parameter_menu.is_none());

    let pd_refs = ui.process_data_refs.as_ref().expect("process data refs");
    assert_eq!(pd_refs[0].record_item_infos.len(), 2);
    assert_eq!(pd_refs[0].record_item_infos[0].hints.gradient.as_deref(), Some("0.1"));
}

#[test]
fn test_communication_profile() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let comm = profile.communication.as_ref().expect("comm profile");
    assert_eq!(comm.iolink_revision.as_deref(), Some("V1.1"));

    let layer = &comm.transport_layers.as_ref().expect("layers").physical_layers[0];
    assert_eq!(layer.bitrate.as_deref(), Some("COM2"));
    assert_eq!(layer.bitrate_spelling, BitrateSpelling::Bitrate);
    assert_eq!(value(&layer.min_cycle_time), Some(2300));
    assert_eq!(value(&layer.sio_supported), Some(true));

    let connection = layer.connection.as_ref().expect("connection");
    assert_eq!(connection.product_refs, vec!["PS-100", "PS-200"]);
    let numbers: Vec<u8> = connection.wires.iter().map(|w| w.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);
    assert_eq!(connection.wires[1].color, None);

    let test = comm.test.as_ref().expect("test");
    let slots: Vec<u8> = test.configs.iter().map(|c| c.slot).collect();
    assert_eq!(slots, vec![1, 7]);
    assert_eq!(test.configs[1].event_triggers.len(), 1);
}

#[test]
fn test_legacy_baudrate_spelling_is_recorded() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="V" deviceId="2"/>
  </ProfileBody>
  <CommNetworkProfile>
    <TransportLayers>
      <PhysicalLayer baudrate="COM3"/>
    </TransportLayers>
  </CommNetworkProfile>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    let layer = &profile
        .communication
        .as_ref()
        .and_then(|c| c.transport_layers.as_ref())
        .expect("layers")
        .physical_layers[0];
    assert_eq!(layer.bitrate.as_deref(), Some("COM3"));
    assert_eq!(layer.bitrate_spelling, BitrateSpelling::Baudrate);
    assert!(profile.diagnostics.iter().all(|d| d.severity < Severity::Error));
}
