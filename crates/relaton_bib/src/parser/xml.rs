/*
SPDX-License-Identifier: MPL-2.0
*/

//! Parsing from the XML dialect (`bibitem` and `bibdata` documents).

use chrono::{NaiveDate, NaiveDateTime};
use roxmltree::{Document, Node};
use tracing::warn;

use crate::contributor::{
    Address, Contact, ContactInfo, ContributionInfo, ContributorEntity, ContributorRole,
};
use crate::classification::Classification;
use crate::copyright::CopyrightAssociation;
use crate::date::BibliographicDate;
use crate::editorial_group::{EditorialGroup, TechnicalCommittee, WorkGroup};
use crate::formatted_string::{FormattedRef, FormattedString};
use crate::ics::Ics;
use crate::identifier::{
    DocumentIdentifier, StructuredIdentifier, StructuredIdentifierCollection,
};
use crate::item::BibliographicItem;
use crate::locality::{
    BibItemLocality, Locality, LocalityStack, SourceLocality, SourceLocalityStack,
};
use crate::localized_string::LocalizedString;
use crate::medium::Medium;
use crate::note::BiblioNote;
use crate::organization::{OrgIdentifier, Organization};
use crate::person::{Affiliation, FullName, Person, PersonIdentifier};
use crate::place::Place;
use crate::relation::DocumentRelation;
use crate::series::Series;
use crate::status::{DocumentStatus, Stage};
use crate::title::TypedTitleString;
use crate::typed_uri::TypedUri;
use crate::validity::{Validity, VALIDITY_FORMAT};
use crate::version::BibliographicItemVersion;
use crate::Result;

/// Parses a `bibitem` or `bibdata` document. A missing root is a soft
/// failure: a warning is logged and no item is returned.
pub fn from_xml(source: &str) -> Result<Option<BibliographicItem>> {
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    let node = if is_item_root(&root) {
        root
    } else if let Some(nested) = root.descendants().find(is_item_root) {
        nested
    } else {
        warn!("can not find bibitem or bibdata element in the XML");
        return Ok(None);
    };
    Ok(Some(parse_item(&node)?))
}

fn is_item_root(node: &Node) -> bool {
    node.is_element()
        && (node.has_tag_name("bibitem") || node.has_tag_name("bibdata"))
}

fn text_of(node: &Node) -> String {
    node.text().unwrap_or("").to_string()
}

fn child<'a, 'i>(node: &Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children().find(|n| n.is_element() && n.has_tag_name(name))
}

fn child_text(node: &Node, name: &str) -> Option<String> {
    child(node, name).map(|n| text_of(&n))
}

fn split_attr(node: &Node, name: &str) -> Vec<String> {
    node.attribute(name)
        .map(|v| v.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

fn parse_localized(node: &Node) -> LocalizedString {
    let variants: Vec<LocalizedString> = node
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("variant"))
        .map(|n| parse_localized(&n))
        .collect();
    if !variants.is_empty() {
        return LocalizedString {
            content: crate::localized_string::LocalizedStringContent::Variants(variants),
            language: Vec::new(),
            script: Vec::new(),
        };
    }
    let mut ls = LocalizedString::new(text_of(node));
    ls.language = split_attr(node, "language");
    ls.script = split_attr(node, "script");
    ls
}

fn parse_formatted(node: &Node) -> FormattedString {
    FormattedString::new(parse_localized(node), node.attribute("format").map(str::to_string))
}

fn parse_item(node: &Node) -> Result<BibliographicItem> {
    let mut item = BibliographicItem::new();
    item.id = node.attribute("id").map(str::to_string);
    item.item_type = node.attribute("type").map(str::to_string);
    if let Some(t) = &item.item_type {
        BibliographicItem::check_type(t);
    }

    for n in node.children().filter(Node::is_element) {
        match n.tag_name().name() {
            "fetched" => {
                item.fetched = NaiveDate::parse_from_str(&text_of(&n), "%Y-%m-%d").ok();
            }
            "title" => item.title.0.push(TypedTitleString::new(
                n.attribute("type").map(str::to_string),
                parse_formatted(&n),
            )),
            "formattedref" => item.formattedref = Some(FormattedRef(parse_formatted(&n))),
            "uri" => item.link.push(TypedUri::new(
                n.attribute("type").map(str::to_string),
                text_of(&n),
            )),
            "docidentifier" => item.docidentifier.push(DocumentIdentifier::new(
                text_of(&n),
                n.attribute("type").map(str::to_string),
                n.attribute("scope").map(str::to_string),
            )),
            "docnumber" => item.docnumber = Some(text_of(&n)),
            "date" => item.date.push(parse_date(&n)?),
            "contributor" => {
                if let Some(c) = parse_contributor(&n)? {
                    item.contributor.push(c);
                }
            }
            "edition" => item.edition = Some(text_of(&n)),
            "version" => {
                item.version = Some(BibliographicItemVersion {
                    revision_date: child_text(&n, "revision-date"),
                    draft: n
                        .children()
                        .filter(|c| c.is_element() && c.has_tag_name("draft"))
                        .map(|c| text_of(&c))
                        .collect(),
                });
            }
            "note" => item.biblionote.0.push(BiblioNote::new(
                parse_formatted(&n),
                n.attribute("type").map(str::to_string),
            )),
            "language" => item.language.push(text_of(&n)),
            "script" => item.script.push(text_of(&n)),
            "abstract" => item.abstracts.push(parse_formatted(&n)),
            "status" => item.status = parse_status(&n),
            "copyright" => item.copyright.push(parse_copyright(&n)?),
            "relation" => item.relation.push(parse_relation(&n)?),
            "series" => item.series.push(parse_series(&n)?),
            "medium" => {
                item.medium = Some(Medium {
                    form: child_text(&n, "form"),
                    size: child_text(&n, "size"),
                    scale: child_text(&n, "scale"),
                });
            }
            "place" => {
                let mut place = Place::new(text_of(&n));
                place.uri = n.attribute("uri").map(str::to_string);
                place.region = n.attribute("region").map(str::to_string);
                item.place.push(place);
            }
            "extent" => item.extent.push(parse_locality(&n)),
            "accesslocation" => item.accesslocation.push(text_of(&n)),
            "license" => item.license.push(text_of(&n)),
            "classification" => item.classification.push(Classification::new(
                text_of(&n),
                n.attribute("type").map(str::to_string),
            )),
            "keyword" => item.keyword.push(parse_localized(&n)),
            "validity" => item.validity = Some(parse_validity(&n)),
            "ext" => parse_ext(&n, &mut item),
            _ => {}
        }
    }
    item.ensure_id();
    Ok(item)
}

fn parse_date(node: &Node) -> Result<BibliographicDate> {
    BibliographicDate::new(
        node.attribute("type").unwrap_or(""),
        child_text(node, "on").as_deref(),
        child_text(node, "from").as_deref(),
        child_text(node, "to").as_deref(),
    )
}

fn parse_contributor(node: &Node) -> Result<Option<ContributionInfo>> {
    let entity = if let Some(person) = child(node, "person") {
        ContributorEntity::Person(parse_person(&person)?)
    } else if let Some(org) = child(node, "organization") {
        ContributorEntity::Organization(parse_organization(&org)?)
    } else {
        warn!("contributor without person or organization");
        return Ok(None);
    };
    let role = node
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("role"))
        .map(|n| {
            let description = n
                .children()
                .filter(|c| c.is_element() && c.has_tag_name("description"))
                .map(|c| parse_formatted(&c))
                .collect();
            ContributorRole::new(n.attribute("type").unwrap_or(""), description)
        })
        .collect();
    Ok(Some(ContributionInfo::new(entity, role)))
}

fn parse_person(node: &Node) -> Result<Person> {
    let name_node = child(node, "name");
    let mut name = FullName::new(
        name_node.as_ref().and_then(|n| child(n, "surname")).map(|n| parse_localized(&n)),
        name_node
            .as_ref()
            .and_then(|n| child(n, "completename"))
            .map(|n| parse_localized(&n)),
    )?;
    if let Some(name_node) = &name_node {
        for n in name_node.children().filter(Node::is_element) {
            match n.tag_name().name() {
                "forename" => name.forename.push(parse_localized(&n)),
                "initial" => name.initial.push(parse_localized(&n)),
                "addition" => name.addition.push(parse_localized(&n)),
                "prefix" => name.prefix.push(parse_localized(&n)),
                _ => {}
            }
        }
    }
    let mut person = Person::new(name);
    for n in node.children().filter(Node::is_element) {
        match n.tag_name().name() {
            "affiliation" => {
                let org = child(&n, "organization");
                let Some(org) = org else { continue };
                let mut affiliation = Affiliation::new(parse_organization(&org)?);
                affiliation.name = child(&n, "name").map(|c| parse_localized(&c));
                affiliation.description = n
                    .children()
                    .filter(|c| c.is_element() && c.has_tag_name("description"))
                    .map(|c| parse_formatted(&c))
                    .collect();
                person.affiliation.push(affiliation);
            }
            "identifier" => person.identifier.push(PersonIdentifier::new(
                n.attribute("type").unwrap_or(""),
                text_of(&n),
            )?),
            "address" => person.contact.push(ContactInfo::Address(parse_address(&n))),
            "phone" | "email" | "uri" => person
                .contact
                .push(ContactInfo::Contact(Contact::new(n.tag_name().name(), text_of(&n)))),
            _ => {}
        }
    }
    Ok(person)
}

fn parse_organization(node: &Node) -> Result<Organization> {
    let name = node
        .children()
        .filter(|n| n.is_element() && n.has_tag_name("name"))
        .map(|n| parse_localized(&n))
        .collect();
    let mut org = Organization::new(name)?;
    for n in node.children().filter(Node::is_element) {
        match n.tag_name().name() {
            "subdivision" => org.subdivision.push(parse_localized(&n)),
            "abbreviation" => org.abbreviation = Some(parse_localized(&n)),
            "uri" => org.uri = Some(text_of(&n)),
            "identifier" => org
                .identifier
                .push(OrgIdentifier::new(n.attribute("type").unwrap_or(""), text_of(&n))),
            "address" => org.contact.push(ContactInfo::Address(parse_address(&n))),
            "phone" | "email" => org
                .contact
                .push(ContactInfo::Contact(Contact::new(n.tag_name().name(), text_of(&n)))),
            _ => {}
        }
    }
    Ok(org)
}

fn parse_address(node: &Node) -> Address {
    Address {
        street: node
            .children()
            .filter(|n| n.is_element() && n.has_tag_name("street"))
            .map(|n| text_of(&n))
            .collect(),
        city: child_text(node, "city").unwrap_or_default(),
        state: child_text(node, "state"),
        country: child_text(node, "country").unwrap_or_default(),
        postcode: child_text(node, "postcode"),
    }
}

fn parse_status(node: &Node) -> Option<DocumentStatus> {
    let stage_node = child(node, "stage")?;
    let mut stage = Stage::new(text_of(&stage_node));
    stage.abbreviation = stage_node.attribute("abbreviation").map(str::to_string);
    let mut status = DocumentStatus::new(stage);
    if let Some(substage_node) = child(node, "substage") {
        let mut substage = Stage::new(text_of(&substage_node));
        substage.abbreviation = substage_node.attribute("abbreviation").map(str::to_string);
        status.substage = Some(substage);
    }
    status.iteration = child_text(node, "iteration");
    Some(status)
}

fn parse_copyright(node: &Node) -> Result<CopyrightAssociation> {
    let mut owner = Vec::new();
    for n in node.children().filter(|n| n.is_element() && n.has_tag_name("owner")) {
        if let Some(c) = parse_contributor(&n)? {
            owner.push(c);
        }
    }
    CopyrightAssociation::new(
        owner,
        child_text(node, "from").as_deref(),
        child_text(node, "to").as_deref(),
        child_text(node, "scope"),
    )
}

fn parse_relation(node: &Node) -> Result<DocumentRelation> {
    let bibitem = match child(node, "bibitem") {
        Some(n) => parse_item(&n)?,
        None => BibliographicItem::new(),
    };
    let mut relation = DocumentRelation::new(node.attribute("type").unwrap_or(""), bibitem);
    relation.description = child(node, "description").map(|n| parse_formatted(&n));
    for n in node.children().filter(Node::is_element) {
        match n.tag_name().name() {
            "localityStack" => relation.locality.push(LocalityStack(
                n.children()
                    .filter(|c| c.is_element() && c.has_tag_name("locality"))
                    .map(|c| Locality(parse_locality(&c)))
                    .collect(),
            )),
            // bare localities predate the stack wrapper
            "locality" => relation
                .locality
                .push(LocalityStack(vec![Locality(parse_locality(&n))])),
            "sourceLocalityStack" => relation.source_locality.push(SourceLocalityStack(
                n.children()
                    .filter(|c| c.is_element() && c.has_tag_name("sourceLocality"))
                    .map(|c| SourceLocality(parse_locality(&c)))
                    .collect(),
            )),
            "sourceLocality" => relation
                .source_locality
                .push(SourceLocalityStack(vec![SourceLocality(parse_locality(&n))])),
            _ => {}
        }
    }
    Ok(relation)
}

fn parse_locality(node: &Node) -> BibItemLocality {
    BibItemLocality::new(
        node.attribute("type").unwrap_or(""),
        child_text(node, "referenceFrom").unwrap_or_default(),
        child_text(node, "referenceTo"),
    )
}

fn parse_series(node: &Node) -> Result<Series> {
    let title = child(node, "title").map(|n| {
        TypedTitleString::new(n.attribute("type").map(str::to_string), parse_formatted(&n))
    });
    let formattedref =
        child(node, "formattedref").map(|n| FormattedRef(parse_formatted(&n)));
    let mut series = Series::new(
        node.attribute("type").map(str::to_string),
        title,
        formattedref,
    )?;
    series.place = child_text(node, "place");
    series.organization = child_text(node, "organization");
    series.abbreviation = child(node, "abbreviation").map(|n| parse_localized(&n));
    series.from = child_text(node, "from");
    series.to = child_text(node, "to");
    series.number = child_text(node, "number");
    series.partnumber = child_text(node, "partnumber");
    Ok(series)
}

fn parse_validity(node: &Node) -> Validity {
    let time = |attr: &str| {
        node.attribute(attr)
            .and_then(|v| NaiveDateTime::parse_from_str(v, VALIDITY_FORMAT).ok())
    };
    Validity {
        begins: time("validityBegins"),
        ends: time("validityEnds"),
        revision: time("revision"),
    }
}

fn parse_ext(node: &Node, item: &mut BibliographicItem) {
    for n in node.children().filter(Node::is_element) {
        match n.tag_name().name() {
            "doctype" => item.doctype = Some(text_of(&n)),
            "subdoctype" => item.subdoctype = Some(text_of(&n)),
            "editorialgroup" => {
                let technical_committee = n
                    .children()
                    .filter(|c| c.is_element() && c.has_tag_name("technical-committee"))
                    .map(|c| {
                        let mut wg = WorkGroup::new(text_of(&c));
                        wg.number = c.attribute("number").and_then(|v| v.parse().ok());
                        wg.workgroup_type = c.attribute("type").map(str::to_string);
                        wg.identifier = c.attribute("identifier").map(str::to_string);
                        wg.prefix = c.attribute("prefix").map(str::to_string);
                        TechnicalCommittee { workgroup: wg }
                    })
                    .collect();
                item.editorialgroup = Some(EditorialGroup { technical_committee });
            }
            "ics" => item.ics.push(Ics {
                code: child_text(&n, "code").unwrap_or_default(),
                text: child_text(&n, "text").unwrap_or_default(),
            }),
            "structuredidentifier" => {
                let mut si =
                    StructuredIdentifier::new(child_text(&n, "docnumber").unwrap_or_default());
                si.agency = n
                    .children()
                    .filter(|c| c.is_element() && c.has_tag_name("agency"))
                    .map(|c| text_of(&c))
                    .collect();
                si.si_type = n.attribute("type").map(str::to_string);
                si.class = child_text(&n, "class");
                si.partnumber = child_text(&n, "partnumber");
                si.edition = child_text(&n, "edition");
                si.version = child_text(&n, "version");
                si.supplementtype = child_text(&n, "supplementtype");
                si.supplementnumber = child_text(&n, "supplementnumber");
                si.language = child_text(&n, "language");
                si.year = child_text(&n, "year");
                let StructuredIdentifierCollection(list) = &mut item.structuredidentifier;
                list.push(si);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_is_soft_failure() {
        assert!(from_xml("<wrong/>").unwrap().is_none());
    }

    #[test]
    fn bibitem_root_attributes() {
        let item = from_xml(
            r#"<bibitem id="ISO1" type="standard"><docidentifier type="ISO">ISO 1</docidentifier></bibitem>"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(item.id.as_deref(), Some("ISO1"));
        assert_eq!(item.item_type.as_deref(), Some("standard"));
        assert_eq!(item.docidentifier[0].id_type.as_deref(), Some("ISO"));
    }

    #[test]
    fn bibdata_ext_block() {
        let source = concat!(
            "<bibdata><docidentifier>X</docidentifier><ext>",
            "<doctype>standard</doctype>",
            r#"<editorialgroup><technical-committee number="211" type="TC">Geo</technical-committee></editorialgroup>"#,
            "<ics><code>01.040.35</code><text>IT</text></ics>",
            "</ext></bibdata>",
        );
        let item = from_xml(source).unwrap().unwrap();
        assert_eq!(item.doctype.as_deref(), Some("standard"));
        let wg = &item.editorialgroup.as_ref().unwrap().technical_committee[0].workgroup;
        assert_eq!(wg.name, "Geo");
        assert_eq!(wg.number, Some(211));
        assert_eq!(item.ics[0].code, "01.040.35");
    }

    #[test]
    fn contributor_person_and_roles() {
        let source = concat!(
            "<bibitem><docidentifier>X</docidentifier>",
            r#"<contributor><role type="author"/>"#,
            "<person><name><surname>Nikolaev</surname></name></person>",
            "</contributor></bibitem>",
        );
        let item = from_xml(source).unwrap().unwrap();
        let c = &item.contributor[0];
        assert!(c.has_role("author"));
        let person = c.entity.as_person().unwrap();
        assert_eq!(person.name.surname.as_ref().unwrap().plain(), "Nikolaev");
    }

    #[test]
    fn relation_with_locality_stack() {
        let source = concat!(
            "<bibitem><docidentifier>A</docidentifier>",
            r#"<relation type="updates"><bibitem><docidentifier>B</docidentifier></bibitem>"#,
            r#"<localityStack><locality type="page"><referenceFrom>10</referenceFrom></locality></localityStack>"#,
            "</relation></bibitem>",
        );
        let item = from_xml(source).unwrap().unwrap();
        let relation = &item.relation.0[0];
        assert_eq!(relation.relation_type, "updates");
        assert_eq!(relation.bibitem.docidentifier[0].id, "B");
        assert_eq!(relation.locality[0].0[0].0.reference_from, "10");
    }

    #[test]
    fn localized_variants() {
        let source = concat!(
            "<bibitem><docidentifier>X</docidentifier>",
            r#"<keyword><variant language="en">word</variant><variant language="fr">mot</variant></keyword>"#,
            "</bibitem>",
        );
        let item = from_xml(source).unwrap().unwrap();
        match &item.keyword[0].content {
            crate::localized_string::LocalizedStringContent::Variants(v) => {
                assert_eq!(v.len(), 2);
                assert_eq!(v[1].language, ["fr"]);
            }
            _ => panic!("expected variants"),
        }
    }
}
