//! Infoset XML persistence

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qp_codec::ValueCodec;
use qp_infoset::{AttributeDocument, Element, Infoset, InfosetPart, StorageScope};

#[test]
fn blank_text_loads_empty_document() {
    let infoset = Infoset::from_xml("  \n").unwrap();
    assert!(infoset.is_empty());
    assert_eq!(infoset.to_xml().unwrap(), "<Data/>");
}

#[test]
fn stored_documents_reload() {
    let xml = r#"<Data><BlogPart Title="Hello &amp; welcome" Count="3"/><TagsPart Tags="a,b"/></Data>"#;
    let infoset = Infoset::from_xml(xml).unwrap();
    assert_eq!(
        infoset.get("BlogPart", "Title").as_deref(),
        Some("Hello & welcome")
    );
    assert_eq!(
        infoset.element_names(),
        vec!["BlogPart".to_string(), "TagsPart".to_string()]
    );

    let reloaded = Infoset::from_xml(&infoset.to_xml().unwrap()).unwrap();
    assert_eq!(reloaded.snapshot(), infoset.snapshot());
}

#[test]
fn multi_line_strings_survive_reload() {
    let codec = ValueCodec::new();
    let body = "Dear reader,\r\n\tthanks for visiting.\nBye";
    let part = InfosetPart::new();
    part.store(&codec, "BlogPart", "Body", &body.to_string(), StorageScope::Item)
        .unwrap();

    let xml = part.infoset().to_xml().unwrap();
    assert!(!xml.contains('\n'));
    let reloaded = Infoset::from_xml(&xml).unwrap();
    assert_eq!(reloaded.get("BlogPart", "Body").as_deref(), Some(body));
}

#[test]
fn foreign_elements_are_preserved() {
    let xml = r#"<Data><Notes><Note>first</Note></Notes><BlogPart Title="x"/></Data>"#;
    let infoset = Infoset::from_xml(xml).unwrap();
    infoset.set("BlogPart", "Title", "y".to_string());
    assert_eq!(
        infoset.to_xml().unwrap(),
        r#"<Data><Notes><Note>first</Note></Notes><BlogPart Title="y"/></Data>"#
    );
}

#[test]
fn typed_part_storage_survives_reload() {
    let codec = ValueCodec::new();
    let part = InfosetPart::new();
    part.store(&codec, "MapPart", "Zoom", &Some(12_i32), StorageScope::Item)
        .unwrap();
    part.store(&codec, "MapPart", "Latitude", &-33.8688_f64, StorageScope::Version)
        .unwrap();

    let item_xml = part.infoset().to_xml().unwrap();
    let version_xml = part.version_infoset().to_xml().unwrap();
    let reloaded = InfosetPart::from_xml(&item_xml, &version_xml).unwrap();

    let zoom: Option<i32> = reloaded
        .retrieve(&codec, "MapPart", "Zoom", StorageScope::Item)
        .unwrap();
    let latitude: f64 = reloaded
        .retrieve(&codec, "MapPart", "Latitude", StorageScope::Version)
        .unwrap();
    assert_eq!(zoom, Some(12));
    assert_eq!(latitude, -33.8688);
}

fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,12}"
}

proptest! {
    #[test]
    fn prop_attributes_survive_xml(
        entries in prop::collection::vec((name(), name(), "[ -~]{0,24}"), 0..16)
    ) {
        let infoset = Infoset::new();
        for (element, attribute, value) in &entries {
            infoset.set(element, attribute, value.clone());
        }
        let reloaded = Infoset::from_xml(&infoset.to_xml().unwrap()).unwrap();
        prop_assert_eq!(reloaded.snapshot(), infoset.snapshot());
    }

    #[test]
    fn prop_text_survives_xml(text in "[ -~]*[!-~][ -~]*") {
        let root = Element::new("Data").with_child(Element::new("Note").with_text(text.clone()));
        let infoset = Infoset::from_root(root);
        let reloaded = Infoset::from_xml(&infoset.to_xml().unwrap()).unwrap();
        let note = reloaded.element("Note").unwrap();
        prop_assert_eq!(note.text(), Some(text.as_str()));
    }
}
