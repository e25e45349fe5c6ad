/*
SPDX-License-Identifier: MPL-2.0
*/

use relaton_bib::parser;

const ITEM: &str = r#"
docid:
  id: 'ISO 123'
  type: ISO
title:
  type: main
  content: Geographic information
language: en
date:
  type: published
  value: '2014-04'
contributor:
  organization:
    name: ISO
  role: publisher
"#;

#[test]
fn full_document_output() {
    let item = parser::from_yaml(ITEM).unwrap().unwrap();
    let expected = "\
[%bibitem]
== {blank}
id:: ISO123
title.type:: main
title.content:: Geographic information
docid.type:: ISO
docid.id:: ISO 123
language:: en
date.type:: published
date.on:: 2014-04
contributor.organization.name:: ISO
contributor.role.type:: publisher";
    assert_eq!(item.to_asciibib(""), expected);
}

#[test]
fn untyped_docid_collapses_to_one_line() {
    let item = parser::from_yaml("docid: REF99\n").unwrap().unwrap();
    let out = item.to_asciibib("");
    assert!(out.contains("\ndocid:: REF99"));
    assert!(!out.contains("docid.id::"));
}

#[test]
fn repeated_groups_get_marker_lines() {
    let yaml = concat!(
        "docid: A\n",
        "date:\n",
        "- type: published\n",
        "  value: '2014'\n",
        "- type: accessed\n",
        "  value: '2015-05-06'\n",
    );
    let item = parser::from_yaml(yaml).unwrap().unwrap();
    let out = item.to_asciibib("");
    assert!(out.contains("date::\ndate.type:: published\ndate.on:: 2014"));
    assert!(out.contains("date::\ndate.type:: accessed\ndate.on:: 2015-05-06"));
}

#[test]
fn nested_person_keys() {
    let yaml = concat!(
        "docid: A\n",
        "contributor:\n",
        "  person:\n",
        "    name:\n",
        "      surname: Nikolaev\n",
        "      forename: Andrei\n",
        "  role: author\n",
    );
    let item = parser::from_yaml(yaml).unwrap().unwrap();
    let out = item.to_asciibib("");
    assert!(out.contains("contributor.person.name.forename:: Andrei"));
    assert!(out.contains("contributor.person.name.surname:: Nikolaev"));
    assert!(out.contains("contributor.role.type:: author"));
}
