/*
SPDX-License-Identifier: MPL-2.0
*/

use relaton_bib::{parser, ShortrefOptions};

const PART_ITEM: &str = r#"
docid:
  id: 'ISO 1111-2:2014'
  type: ISO
title:
- type: title-main
  content: Geographic information
  language: en
- type: title-part
  content: 'Part 2: Extraction'
  language: en
- type: main
  content: 'Geographic information - Part 2: Extraction'
  language: en
language: en
abstract: Part two of the series.
date:
  type: published
  value: '2014'
structuredidentifier:
  docnumber: '1111-2'
  partnumber: '2'
  year: '2014'
"#;

#[test]
fn all_parts_reference() {
    let item = parser::from_yaml(PART_ITEM).unwrap().unwrap();
    let all = item.to_all_parts();

    assert_eq!(all.docidentifier[0].id, "ISO 1111 (all parts)");
    assert_eq!(all.structuredidentifier.0[0].docnumber, "1111 (all parts)");
    assert!(all.structuredidentifier.0[0].year.is_none());
    assert!(all.abstracts.is_empty());
    assert!(all.title.0.iter().all(|t| t.title_type.as_deref() != Some("title-part")));
    assert_eq!(all.title.main_title().unwrap().title.plain(), "Geographic information");

    let relation = all.relation.0.last().unwrap();
    assert_eq!(relation.relation_type, "instance");
    assert_eq!(relation.bibitem.docidentifier[0].id, "ISO 1111-2:2014");

    // a second application changes nothing
    let again = all.to_all_parts();
    assert_eq!(again.docidentifier[0].id, "ISO 1111 (all parts)");
    assert_eq!(again.relation.len(), all.relation.len());
}

#[test]
fn most_recent_reference() {
    let item = parser::from_yaml(PART_ITEM).unwrap().unwrap();
    let recent = item.to_most_recent_reference();

    assert_eq!(recent.docidentifier[0].id, "ISO 1111-2");
    assert_eq!(recent.id.as_deref(), Some("ISO1111-2"));
    assert!(recent.date.is_empty());
    assert!(recent.abstracts.is_empty());
    assert_eq!(recent.relation.0.last().unwrap().relation_type, "instance");

    // the source item keeps its dated identifier
    assert_eq!(item.docidentifier[0].id, "ISO 1111-2:2014");
    assert_eq!(item.date.len(), 1);
}

#[test]
fn shortref_forms() {
    let item = parser::from_yaml(PART_ITEM).unwrap().unwrap();
    assert_eq!(item.shortref(None, ShortrefOptions::default()), "ISO1111-2-2014:2014");
    assert_eq!(
        item.shortref(None, ShortrefOptions { no_year: true, all_parts: false }),
        "ISO1111-2-2014"
    );
    let all = item.to_all_parts();
    assert!(all
        .shortref(None, ShortrefOptions::default())
        .ends_with(": All Parts"));
}

#[test]
fn all_parts_xml_contains_instance_relation() {
    let item = parser::from_yaml(PART_ITEM).unwrap().unwrap();
    let rendered = item.to_all_parts().to_xml().unwrap();
    assert!(rendered.contains(r#"<relation type="instance"><bibitem>"#));
    assert!(rendered.contains("ISO 1111 (all parts)"));
}
