//! Integration tests for number formatting and hierarchical numbering.

use pagetree::model::{Content, ContentType, Document, NodeConfig, NodeId};
use pagetree::number::{alpha, format_number, roman, Case, NumberFormat};
use pagetree::numbering::{Numberable, NumberingOverride, NumberingSettings};
use pagetree::{document_from_json, DocumentSettings, Warning};

fn section(doc: &mut Document, parent: NodeId, title: &str, enumerate: bool) -> NodeId {
    let config = NodeConfig::for_type(ContentType::Section)
        .with_title(title)
        .with_enumerate(enumerate);
    doc.add(parent, Content::Section, config).unwrap()
}

#[test]
fn test_alpha_values() {
    assert_eq!(alpha(1, Case::Upper), "A");
    assert_eq!(alpha(26, Case::Upper), "Z");
    assert_eq!(alpha(27, Case::Upper), "AA");
    assert_eq!(alpha(702, Case::Upper), "ZZ");
    assert_eq!(alpha(703, Case::Upper), "AAA");
    assert_eq!(alpha(0, Case::Lower), "0");
    assert_eq!(format_number(28, NumberFormat::LowerAlpha), "ab");
}

#[test]
fn test_roman_values() {
    assert_eq!(roman(1994, Case::Upper), "MCMXCIV");
    assert_eq!(roman(4, Case::Upper), "IV");
    assert_eq!(roman(0, Case::Upper), "0");
    assert_eq!(roman(-12, Case::Lower), "-xii");
}

#[test]
fn test_unknown_format_prints_raw_value() {
    let format = NumberFormat::from_name("hebrew");
    assert_eq!(format, NumberFormat::Raw);
    assert_eq!(format_number(1234, format), "1234");
}

#[test]
fn test_components_match_enumerable_ancestors() {
    let mut doc = Document::new();
    let root = doc.root();
    let a = section(&mut doc, root, "A", true);
    let b = section(&mut doc, a, "B", true);
    let c = section(&mut doc, b, "C", true);

    assert_eq!(doc.get(c).unwrap().numbers().len(), 3);
    assert_eq!(doc.get(c).unwrap().formatted_numbers(), "1.1.1");
}

#[test]
fn test_disabling_ancestor_removes_one_component() {
    let build = |enumerate_middle: bool| {
        let mut doc = Document::new();
        let root = doc.root();
        let a = section(&mut doc, root, "A", true);
        let b = section(&mut doc, a, "B", enumerate_middle);
        let c1 = section(&mut doc, b, "C1", true);
        let c2 = section(&mut doc, b, "C2", true);
        let lens: Vec<usize> = [c1, c2]
            .iter()
            .map(|id| doc.get(*id).unwrap().numbers().len())
            .collect();
        lens
    };

    let with = build(true);
    let without = build(false);
    for (w, wo) in with.iter().zip(&without) {
        assert_eq!(*w, wo + 1);
    }
}

#[test]
fn test_top_level_node_is_its_own_ordinal() {
    let mut doc = Document::new();
    let root = doc.root();
    section(&mut doc, root, "A", true);
    section(&mut doc, root, "B", true);
    let c = section(&mut doc, root, "C", true);
    assert_eq!(doc.get(c).unwrap().formatted_numbers(), "3");
}

#[test]
fn test_numbering_from_json_settings() {
    let mut doc = document_from_json(
        r#"{
            "numbering": {
                "default": {"format": "Roman"},
                "types": {
                    "section": {"separator": "-"},
                    "image": {"level": 0, "prefix": "Fig. ", "format": "int"}
                }
            }
        }"#,
    )
    .unwrap();
    let root = doc.root();
    let a = section(&mut doc, root, "A", true);
    let b = section(&mut doc, root, "B", true);
    let b1 = section(&mut doc, b, "B1", true);
    let image = doc
        .add_image(b1, pagetree::model::Image::new("plot.svg"))
        .unwrap();

    assert_eq!(doc.get(a).unwrap().formatted_numbers(), "I");
    assert_eq!(doc.get(b1).unwrap().formatted_numbers(), "II-I");
    assert_eq!(doc.get(image).unwrap().formatted_numbers(), "Fig. 1");
}

#[test]
fn test_invalid_level_warns_and_uses_unlimited() {
    let numbering = NumberingSettings::new()
        .with_override(ContentType::Section, NumberingOverride::default().with_level(-5));
    let mut doc = Document::with_settings(DocumentSettings::new().with_numbering(numbering));

    assert_eq!(
        doc.diagnostics().warnings(),
        &[Warning::InvalidNumberingLevel {
            content_type: ContentType::Section,
            level: -5,
        }]
    );

    let root = doc.root();
    let a = section(&mut doc, root, "A", true);
    let b = section(&mut doc, a, "B", true);
    assert_eq!(doc.get(b).unwrap().formatted_numbers(), "1.1");
}
