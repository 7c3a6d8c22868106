// crates/devdesc-rs-iodd/tests/round_trip.rs

//! Parse -> reconstruct -> parse tests.
//!
//! A reconstructed document must parse back into the same profile, and
//! reconstructing that profile again must give byte-identical output.

use devdesc_rs_iodd::{load_iodd_from_str, save_iodd_to_string};
use std::fs;
use std::path::PathBuf;

fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

/// Returns the start tag of the first `<name ` element in `xml`.
fn start_tag<'a>(xml: &'a str, name: &str) -> &'a str {
    let open = format!("<{} ", name);
    let start = xml
        .find(&open)
        .unwrap_or_else(|| panic!("no <{}> in output", name));
    let end = xml[start..].find('>').expect("unterminated tag") + start;
    &xml[start..=end]
}

#[test]
fn test_reconstructed_sample_parses_to_same_profile() {
    let _ = env_logger::builder().is_test(true).try_init();
    let original = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();

    let saved = save_iodd_to_string(&original).expect("reconstruction failed");
    let reparsed = load_iodd_from_str(&saved).expect("reconstructed XML did not parse");

    assert_eq!(reparsed, original);
}

#[test]
fn test_reconstruction_is_idempotent() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let first = save_iodd_to_string(&profile).unwrap();
    let second = save_iodd_to_string(&load_iodd_from_str(&first).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_output_shape() {
    let profile = load_iodd_from_str(&load_test_file("pressure-sensor.xml")).unwrap();
    let saved = save_iodd_to_string(&profile).unwrap();

    assert!(saved.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    let root = start_tag(&saved, "IODevice");
    assert!(root.contains("xmlns=\"http://www.io-link.com/IODD/2010/10\""));
    assert!(root.contains("xsi:schemaLocation="));

    // Features had no dataStorage attribute, so none is written.
    let features = start_tag(&saved, "Features");
    assert!(!features.contains("dataStorage"), "got {}", features);
    assert!(features.contains("blockParameter=\"true\""));

    let layer = start_tag(&saved, "PhysicalLayer");
    assert!(layer.contains("bitrate=\"COM2\""));
    assert!(!layer.contains("baudrate"));

    assert!(saved.contains("<Wire4 function=\"C/Q\" color=\"BK\"/>"));
    assert!(saved.contains("<Config7 index=\"67\">"));
    assert!(saved.contains("<PrimaryLanguage xml:lang=\"en\">"));
}

#[test]
fn test_legacy_baudrate_is_echoed() {
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
    let saved = save_iodd_to_string(&load_iodd_from_str(xml).unwrap()).unwrap();
    let layer = start_tag(&saved, "PhysicalLayer");
    assert!(layer.contains("baudrate=\"COM3\""), "got {}", layer);
    assert!(!layer.contains(" bitrate="));
}

#[test]
fn test_absent_collections_stay_absent() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="V" deviceId="2"/>
  </ProfileBody>
</IODevice>"#;
    let saved = save_iodd_to_string(&load_iodd_from_str(xml).unwrap()).unwrap();
    assert!(saved.contains("<DeviceIdentity vendorId=\"1\" vendorName=\"V\" deviceId=\"2\"/>"));
    for absent in [
        "DeviceFunction",
        "VariableCollection",
        "ExternalTextCollection",
        "CommNetworkProfile",
        "Stamp",
    ] {
        assert!(!saved.contains(absent), "{} should not be written", absent);
    }
}

#[test]
fn test_xsi_attributes_are_written_back() {
    let xml = r#"<IODevice xmlns="http://www.io-link.com/IODD/2010/10" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.io-link.com/IODD/2010/10 IODD1.1.xsd">
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="V" deviceId="2"/>
    <DeviceFunction>
      <VariableCollection>
        <Variable id="V_Mode" index="64" accessRights="rw">
          <Datatype xsi:type="UIntegerT" bitLength="8">
            <SingleValue value="1"/>
          </Datatype>
        </Variable>
      </VariableCollection>
    </DeviceFunction>
  </ProfileBody>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    assert!(profile.diagnostics.is_empty(), "{:?}", profile.diagnostics);
    let saved = save_iodd_to_string(&profile).unwrap();

    let root = start_tag(&saved, "IODevice");
    assert!(
        root.contains("xsi:schemaLocation=\"http://www.io-link.com/IODD/2010/10 IODD1.1.xsd\""),
        "got {}",
        root
    );
    let datatype = start_tag(&saved, "Datatype");
    assert!(datatype.contains("xsi:type=\"UIntegerT\""), "got {}", datatype);
    assert!(!saved.contains(" type="), "unprefixed type attribute in {}", saved);
}

#[test]
fn test_attribute_spelling_is_echoed() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceIdentity vendorId="0888" vendorName="V" deviceId="2"/>
    <DeviceFunction>
      <Features blockParameter="1" dataStorage="false"/>
      <VariableCollection>
        <Variable id="V_Mode" index="0064" accessRights="rw" dynamic="0">
          <Datatype xsi:type="UIntegerT" bitLength="08"/>
        </Variable>
      </VariableCollection>
    </DeviceFunction>
  </ProfileBody>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    let saved = save_iodd_to_string(&profile).unwrap();

    assert!(start_tag(&saved, "DeviceIdentity").contains("vendorId=\"0888\""));
    let features = start_tag(&saved, "Features");
    assert!(features.contains("blockParameter=\"1\""), "got {}", features);
    assert!(features.contains("dataStorage=\"false\""), "got {}", features);
    let variable = start_tag(&saved, "Variable");
    assert!(variable.contains("index=\"0064\""), "got {}", variable);
    assert!(variable.contains("dynamic=\"0\""), "got {}", variable);
    assert!(start_tag(&saved, "Datatype").contains("bitLength=\"08\""));

    assert_eq!(load_iodd_from_str(&saved).unwrap(), profile);
}

#[test]
fn test_missing_index_is_not_invented() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="V" deviceId="2"/>
    <DeviceFunction>
      <VariableCollection>
        <Variable id="V_Mode" accessRights="rw">
          <Datatype xsi:type="BooleanT"/>
        </Variable>
      </VariableCollection>
    </DeviceFunction>
  </ProfileBody>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    assert_eq!(profile.parameters[0].index, None);
    let saved = save_iodd_to_string(&profile).unwrap();
    let variable = start_tag(&saved, "Variable");
    assert!(!variable.contains("index="), "got {}", variable);
}

#[test]
fn test_empty_device_function_is_kept() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="V" deviceId="2"/>
    <DeviceFunction></DeviceFunction>
  </ProfileBody>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    assert!(profile.has_device_function);
    let saved = save_iodd_to_string(&profile).unwrap();
    assert!(saved.contains("<DeviceFunction/>"), "got {}", saved);
    assert_eq!(load_iodd_from_str(&saved).unwrap(), profile);
}

#[test]
fn test_missing_device_identity_is_not_invented() {
    let xml = r#"<IODevice>
  <ProfileBody>
    <DeviceFunction>
      <Features blockParameter="true"/>
    </DeviceFunction>
  </ProfileBody>
</IODevice>"#;
    let profile = load_iodd_from_str(xml).unwrap();
    assert!(!profile.has_device_identity);
    let saved = save_iodd_to_string(&profile).unwrap();
    assert!(!saved.contains("DeviceIdentity"), "got {}", saved);
    assert!(saved.contains("<Features blockParameter=\"true\"/>"));
}
