/*
SPDX-License-Identifier: MPL-2.0
*/

use relaton_bib::parser;

const FULL_ITEM: &str = r#"
id: ISO123-2014
type: standard
title:
- type: main
  content: Geographic information
  language: en
  script: Latn
link:
- type: src
  content: https://www.iso.org/standard/53798.html
docid:
- id: 'ISO 123:2014'
  type: ISO
docnumber: '123'
date:
- type: published
  value: '2014-04'
contributor:
- organization:
    name: International Organization for Standardization
    abbreviation: ISO
    uri: https://iso.org
  role: publisher
- person:
    name:
      surname: Nikolaev
      forename: Andrei
  role: author
edition: '1'
biblionote:
- text: Withdrawn and replaced
  type: status
language: en
script: Latn
abstract:
- content: Specifies a method for sampling.
  language: en
docstatus:
  stage: published
copyright:
  owner:
    name: International Organization for Standardization
  from: '2014'
relation:
- type: obsoletes
  bibitem:
    docid: 'ISO 123:1992'
  locality:
  - type: clause
    reference_from: '3.1'
place: Geneva
extent:
- type: page
  reference_from: '1'
  reference_to: '10'
validity:
  begins: '2014-01-01 00:00'
keyword: sampling
"#;

const BIBDATA_ITEM: &str = r#"
docid: 'ISO 123:2014'
doctype: international-standard
subdoctype: vocabulary
editorialgroup:
  technical_committee:
    name: Raw materials
    number: 45
    type: TC
ics:
- code: '83.040.10'
  text: Latex and raw rubber
structuredidentifier:
  docnumber: '123'
  agency: ISO
  year: '2014'
"#;

#[test]
fn bibitem_round_trip_is_stable() {
    let item = parser::from_yaml(FULL_ITEM).unwrap().unwrap();
    let rendered = item.to_xml().unwrap();
    let reparsed = parser::from_xml(&rendered).unwrap().unwrap();
    assert_eq!(reparsed.to_xml().unwrap(), rendered);
}

#[test]
fn bibitem_renders_expected_pieces() {
    let item = parser::from_yaml(FULL_ITEM).unwrap().unwrap();
    let rendered = item.to_xml().unwrap();
    assert!(rendered.starts_with(r#"<bibitem id="ISO123-2014" type="standard">"#));
    assert!(rendered.contains(r#"<title type="main" language="en" script="Latn">Geographic information</title>"#));
    assert!(rendered.contains(r#"<docidentifier type="ISO">ISO 123:2014</docidentifier>"#));
    assert!(rendered.contains(r#"<date type="published"><on>2014-04</on></date>"#));
    assert!(rendered.contains(r#"<role type="publisher">"#));
    assert!(rendered.contains("<surname>Nikolaev</surname>"));
    assert!(rendered.contains("<copyright><from>2014</from>"));
    assert!(rendered.contains(r#"<relation type="obsoletes">"#));
    assert!(rendered.contains("<localityStack>"));
    assert!(rendered.contains(r#"<extent type="page"><referenceFrom>1</referenceFrom><referenceTo>10</referenceTo></extent>"#));
    assert!(rendered.contains(r#"<validity validityBegins="2014-01-01 00:00">"#));
    // ext-only fields never show up on a bibitem root
    assert!(!rendered.contains("<ext>"));
}

#[test]
fn bibdata_round_trip_with_ext() {
    let item = parser::from_yaml(BIBDATA_ITEM).unwrap().unwrap();
    let rendered = item.to_bibdata_xml().unwrap();
    assert!(rendered.starts_with("<bibdata>"));
    assert!(rendered.contains("<ext><doctype>international-standard</doctype>"));
    assert!(rendered.contains(r#"<technical-committee number="45" type="TC">Raw materials</technical-committee>"#));
    assert!(rendered.contains("<structuredidentifier><agency>ISO</agency><docnumber>123</docnumber><year>2014</year></structuredidentifier>"));
    let reparsed = parser::from_xml(&rendered).unwrap().unwrap();
    assert_eq!(reparsed.to_bibdata_xml().unwrap(), rendered);
}

#[test]
fn embedded_relation_item_has_no_id_attribute() {
    let item = parser::from_yaml(FULL_ITEM).unwrap().unwrap();
    let rendered = item.to_xml().unwrap();
    assert!(rendered.contains(r#"<relation type="obsoletes"><bibitem><docidentifier>"#));
}

#[test]
fn language_filtered_rendering_falls_back() {
    let item = parser::from_yaml(FULL_ITEM).unwrap().unwrap();
    let with_lang = item
        .to_xml_with(&relaton_bib::XmlOptions {
            lang: Some("fr".to_string()),
            ..Default::default()
        })
        .unwrap();
    // no French abstract exists, so the English one is kept
    assert!(with_lang.contains("Specifies a method for sampling."));
}
