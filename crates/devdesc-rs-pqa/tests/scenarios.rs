// crates/devdesc-rs-pqa/tests/scenarios.rs

//! Round-trip scenarios checked end to end: parse, reconstruct, diff, score.

use devdesc_rs::iodd::{DatatypeChoice, DatatypeKind, MenuItem};
use devdesc_rs::{FileType, MenuId, Profile, TextId, VariableId};
use devdesc_rs_pqa::api::{parse_eds, parse_iodd, reconstruct_profile};
use devdesc_rs_pqa::repository::{InMemoryStore, PqaStore};
use devdesc_rs_pqa::{
    DiffSeverity, DiffType, IssuePriority, IssueSink, ProfileId, QualityIssue, QualityMetrics,
    Threshold, ThresholdId, diff_documents, score_report,
};
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

fn iodd(function: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<IODevice xmlns="http://www.io-link.com/IODD/2010/10" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <ProfileBody>
    <DeviceIdentity vendorId="1" vendorName="Test" deviceId="2"/>
    <DeviceFunction>
      {}
    </DeviceFunction>
  </ProfileBody>
</IODevice>"#,
        function
    )
}

/// Repeats the first `<name .../>` element of `xml` right after itself.
fn duplicate_first(xml: &str, name: &str) -> String {
    let start = xml
        .find(&format!("<{} ", name))
        .unwrap_or_else(|| panic!("no <{}> in {}", name, xml));
    let end = xml[start..].find("/>").expect("self-closing element") + start + 2;
    let element = &xml[start..end];
    format!("{}{}{}", &xml[..end], element, &xml[end..])
}

#[test]
fn test_eds_capacity_round_trip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let original = load_test_file("io-adapter.eds");
    let (profile, diagnostics) = parse_eds(&original);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);

    let max_msg = profile
        .capacity
        .as_ref()
        .and_then(|c| c.max_msg_connections)
        .map(|c| c.value);
    assert_eq!(max_msg, Some(128));

    let reconstructed = reconstruct_profile(&Profile::Eds(profile)).unwrap();
    assert!(reconstructed.contains("MaxMsgConnections = 128;"));

    let report = diff_documents(FileType::Eds, &original, &reconstructed).unwrap();
    assert!(report.is_identical(), "{:#?}", report.items);
}

#[test]
fn test_iodd_single_value_round_trip() {
    let original = iodd(
        r#"<VariableCollection>
        <Variable id="V_Mode" index="64" accessRights="rw">
          <Datatype xsi:type="UIntegerT" bitLength="8">
            <SingleValue value="1">
              <Name textId="TI_5"/>
            </SingleValue>
          </Datatype>
        </Variable>
      </VariableCollection>"#,
    );
    let profile = parse_iodd(&original).unwrap();

    let parameter = profile
        .parameter(&VariableId::from("V_Mode"))
        .expect("V_Mode parsed");
    let datatype = match &parameter.datatype {
        Some(DatatypeChoice::Inline(dt)) => dt,
        other => panic!("expected an inline datatype, got {:?}", other),
    };
    assert_eq!(datatype.kind, DatatypeKind::UIntegerT);
    assert_eq!(datatype.single_values.len(), 1);
    assert_eq!(datatype.single_values[0].value, "1");
    assert_eq!(datatype.single_values[0].text_id, Some(TextId::from("TI_5")));

    let reconstructed = reconstruct_profile(&Profile::Iodd(profile)).unwrap();
    let report = diff_documents(FileType::Iodd, &original, &reconstructed).unwrap();
    assert!(report.is_identical(), "{:#?}\n{}", report.items, reconstructed);
}

#[test]
fn test_iodd_attribute_spelling_round_trip() {
    let original = iodd(
        r#"<Features blockParameter="1"/>
      <VariableCollection>
        <Variable id="V_Mode" index="0064" accessRights="rw">
          <Datatype xsi:type="BooleanT"/>
        </Variable>
      </VariableCollection>"#,
    );
    let reconstructed = reconstruct_profile(&Profile::Iodd(parse_iodd(&original).unwrap())).unwrap();
    let report = diff_documents(FileType::Iodd, &original, &reconstructed).unwrap();
    assert!(report.is_identical(), "{:#?}\n{}", report.items, reconstructed);
}

#[test]
fn test_iodd_empty_device_function_round_trip() {
    let original = iodd("");
    let reconstructed = reconstruct_profile(&Profile::Iodd(parse_iodd(&original).unwrap())).unwrap();
    assert!(reconstructed.contains("<DeviceFunction/>"), "{}", reconstructed);
    let report = diff_documents(FileType::Iodd, &original, &reconstructed).unwrap();
    assert!(report.is_identical(), "{:#?}\n{}", report.items, reconstructed);
}

#[test]
fn test_absent_data_storage_is_not_invented() {
    let original = load_test_file("pressure-sensor.xml");
    let profile = parse_iodd(&original).unwrap();
    assert_eq!(profile.features.as_ref().and_then(|f| f.data_storage.as_ref()), None);

    let clean = reconstruct_profile(&Profile::Iodd(profile)).unwrap();
    let clean_report = diff_documents(FileType::Iodd, &original, &clean).unwrap();
    assert!(!clean_report
        .items
        .iter()
        .any(|d| d.path.ends_with("/Features/@dataStorage")));

    // A reconstructor that writes the default instead of omitting it.
    let faulty = clean.replacen("<Features ", "<Features dataStorage=\"false\" ", 1);
    let faulty_report = diff_documents(FileType::Iodd, &original, &faulty).unwrap();
    let extra = faulty_report
        .items
        .iter()
        .find(|d| d.path == "/IODevice/ProfileBody/DeviceFunction/Features/@dataStorage")
        .expect("dataStorage reported");
    assert_eq!(extra.diff_type, DiffType::ExtraAttribute);
    assert_eq!(extra.severity, DiffSeverity::Medium);
    assert_eq!(extra.actual.as_deref(), Some("false"));

    let threshold = Threshold::default();
    let clean_card = score_report(&clean_report, &threshold);
    let faulty_card = score_report(&faulty_report, &threshold);
    assert!(faulty_card.attribute_score < clean_card.attribute_score);
}

#[test]
fn test_score_just_below_threshold_opens_medium_issue() {
    let report = diff_documents(FileType::Eds, "[File]\n", "[File]\n").unwrap();
    let threshold = Threshold::default();
    let card = score_report(&report, &threshold);

    let mut metrics = QualityMetrics::new(ProfileId(1), None, ThresholdId(1), &report, &card);
    metrics.overall_score = 94.5;
    metrics.passed_threshold = threshold.passes(
        metrics.overall_score,
        metrics.data_loss_percentage,
        metrics.critical_data_loss,
    );
    assert!(!metrics.passed_threshold);
    assert!(threshold.auto_ticket_on_fail);

    let issue = QualityIssue::for_run(&metrics, &[]);
    assert_eq!(issue.priority, IssuePriority::Medium);

    let store = InMemoryStore::new();
    let issue_id = store.open_issue(&issue).unwrap();
    let issues = store.issues().unwrap();
    assert_eq!(issues, vec![(issue_id, issue)]);
    // Nothing else was written.
    assert!(store.all_metrics().unwrap().is_empty());
}

#[test]
fn test_duplicate_menu_reference_is_critical() {
    let original = iodd(
        r#"<VariableCollection>
        <Variable id="V_A" index="64" accessRights="rw">
          <Datatype xsi:type="UIntegerT" bitLength="8"/>
        </Variable>
      </VariableCollection>
      <UserInterface>
        <MenuCollection>
          <Menu id="M_Main">
            <VariableRef variableId="V_A"/>
            <VariableRef variableId="V_A" accessRightRestriction="ro"/>
          </Menu>
        </MenuCollection>
      </UserInterface>"#,
    );
    let profile = parse_iodd(&original).unwrap();
    let menu = profile
        .user_interface
        .as_ref()
        .and_then(|ui| ui.menu(&MenuId::from("M_Main")))
        .expect("menu parsed");
    assert_eq!(menu.items.len(), 1);
    assert!(matches!(&menu.items[0], MenuItem::Variable(v) if v.variable_id == VariableId::from("V_A")));

    let clean = reconstruct_profile(&Profile::Iodd(profile)).unwrap();
    // Emitting the merged item twice must not go unnoticed.
    let faulty = duplicate_first(&clean, "VariableRef");
    let report = diff_documents(FileType::Iodd, &clean, &faulty).unwrap();
    assert_eq!(report.items.len(), 1, "{:#?}", report.items);
    let item = &report.items[0];
    assert_eq!(item.diff_type, DiffType::ExtraElement);
    assert_eq!(item.severity, DiffSeverity::Critical);
    assert_eq!(
        item.path,
        "/IODevice/ProfileBody/DeviceFunction/UserInterface/MenuCollection/Menu/VariableRef[2]"
    );
    assert!(score_report(&report, &Threshold::default()).critical_data_loss);
}
