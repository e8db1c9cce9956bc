use bindxml_reader::bindxml::format::schema::Extractor;
use bindxml_reader::bindxml::format::tree::{RawDocument, MAX_DEPTH};
use bindxml_reader::bindxml::format::version;
use bindxml_reader::{parse, BindXmlError, SchemaVersion, Serial, SerialKind};

const SAMPLE: &str = r#"<?xml version="1.0"?>
<Statistics Version="3.6">
  <server>
    <counters type="opcode">
      <counter name="QUERY"> 12 </counter>
    </counters>
  </server>
  <views>
    <view name="_default"><zones><zone name="a.example" rdataclass="IN"/></zones></view>
    <view name="inside"><zones><zone name="b.example" rdataclass="IN"/></zones></view>
  </views>
  <note><![CDATA[<raw> & text]]></note>
  <escaped>AT&amp;T</escaped>
</Statistics>"#;

#[test]
fn names_are_folded_and_values_preserved() {
    let doc = RawDocument::parse_str(SAMPLE).expect("parse");
    let root = doc.root();
    assert_eq!(root.name(), "statistics");
    assert_eq!(root.attr("version"), Some("3.6"));

    let counter = doc.find("counter").expect("counter");
    assert_eq!(counter.attr("name"), Some("QUERY"));
    assert_eq!(counter.text(), "12", "text is trimmed");

    assert_eq!(doc.find("note").map(|n| n.text()), Some("<raw> & text"));
    assert_eq!(doc.find("escaped").map(|n| n.text()), Some("AT&T"));
}

#[test]
fn lookups_follow_document_order() {
    let doc = RawDocument::parse_str(SAMPLE).expect("parse");
    let views = doc.find("views").expect("views");

    assert_eq!(views.find("zone").and_then(|z| z.attr("name")), Some("a.example"));
    let names: Vec<_> = views.find_all("zone").into_iter().filter_map(|z| z.attr("name")).collect();
    assert_eq!(names, vec!["a.example", "b.example"]);

    assert!(views.child("zone").is_none(), "child only looks one level down");
    assert_eq!(views.children_named("view").count(), 2);
    assert!(doc.find_path(&["statistics", "server", "counters", "counter"]).is_some());
    assert!(doc.find_path(&["server", "missing"]).is_none());
}

#[test]
fn declared_version_is_read_from_statistics() {
    let doc = RawDocument::parse_str(SAMPLE).expect("parse");
    assert_eq!(version::declared(&doc).expect("declared"), "3.6");
    assert_eq!(version::detect(&doc).expect("detect"), SchemaVersion::V3_6);
}

#[test]
fn utf16_document_with_bom() {
    let xml = r#"<statistics version="3.11"><server/></statistics>"#;
    let mut bytes = vec![0xFF, 0xFE];
    for unit in xml.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let doc = RawDocument::parse(&bytes).expect("parse utf-16");
    assert_eq!(version::detect(&doc).expect("detect"), SchemaVersion::V3_11);
}

#[test]
fn second_root_element_is_rejected() {
    let err = RawDocument::parse_str("<a/><b/>").expect_err("two roots");
    assert!(matches!(err, BindXmlError::MalformedDocument(_)));
}

#[test]
fn version_strings_map_onto_variants() {
    for version in SchemaVersion::SUPPORTED {
        assert_eq!(SchemaVersion::try_from(version.as_str()).expect("known"), *version);
        assert_eq!(version.to_string(), version.as_str());
    }
    assert_eq!("3.8".parse::<SchemaVersion>().expect("3.8"), SchemaVersion::V3_8);
    assert!(matches!(
        SchemaVersion::try_from("3.1"),
        Err(BindXmlError::UnsupportedVersion(v)) if v == "3.1"
    ));
}

#[test]
fn serial_representation_follows_version() {
    assert_eq!(SchemaVersion::V3_0.serial_kind(), SerialKind::Numeric);
    assert_eq!(SchemaVersion::V3_3.serial_kind(), SerialKind::Numeric);
    assert_eq!(SchemaVersion::V2_2.serial_kind(), SerialKind::Textual);
    assert_eq!(SchemaVersion::V3_6.serial_kind(), SerialKind::Textual);

    assert_eq!(Serial::from_text(" 1803 ", SerialKind::Numeric), Serial::Number(1803));
    assert_eq!(Serial::from_text("1803", SerialKind::Textual), Serial::Text("1803".into()));
    assert_eq!(Serial::from_text("1803", SerialKind::Textual).as_u64(), Some(1803));
}

#[test]
fn v38_is_read_with_the_36_rules() {
    let xml = r#"<statistics version="3.8">
  <server><counters type="nsstat"><counter name="Requestv4">9</counter></counters></server>
  <views><view name="_default"><zones>
    <zone name="z.example" rdataclass="IN"><serial>44</serial></zone>
  </zones></view></views>
  <memory><summary><Lost>0</Lost></summary></memory>
</statistics>"#;
    let snapshot = parse(xml.as_bytes()).expect("3.8 document");
    assert_eq!(snapshot.version(), SchemaVersion::V3_8);
    assert_eq!(snapshot.queries().get("Requestv4"), Some(&9));
    assert_eq!(
        snapshot.zones().get("z.example", "_default").map(|d| d.serial.clone()),
        Some(Serial::Text("44".into()))
    );
}

#[test]
fn nesting_is_accepted_up_to_the_limit() {
    let xml = format!("{}{}", "<a>".repeat(MAX_DEPTH), "</a>".repeat(MAX_DEPTH));
    let doc = RawDocument::parse_str(&xml).expect("nesting at the limit");
    assert_eq!(doc.root().find_all("a").len(), MAX_DEPTH - 1);

    let deeper = format!("{}{}", "<a>".repeat(MAX_DEPTH + 1), "</a>".repeat(MAX_DEPTH + 1));
    assert!(matches!(
        RawDocument::parse_str(&deeper),
        Err(BindXmlError::MalformedDocument(_))
    ));
}

#[test]
fn extractor_keeps_the_version_it_was_built_for() {
    let doc = RawDocument::parse_str(SAMPLE).expect("parse");
    let extractor = Extractor::for_version(version::detect(&doc).expect("detect"));
    assert_eq!(extractor.version(), SchemaVersion::V3_6);

    let queries = extractor.query_stats(&doc).expect("queries");
    assert_eq!(queries.get("QUERY"), Some(&12));
}
