/*
SPDX-License-Identifier: MPL-2.0
*/

//! xml2rfc `<reference>` rendering, as consumed by RFC tooling.

use super::BibliographicItem;
use crate::contributor::{ContactInfo, ContributionInfo};
use crate::person::Person;
use crate::xml::{self, text_element, Element, XmlWriter};
use crate::Result;

const MONTH_NAMES: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl BibliographicItem {
    /// Renders the item as an xml2rfc `<reference>` element.
    pub fn to_bibxml(&self) -> Result<String> {
        xml::render(|w| self.write_reference(w))
    }

    fn write_reference(&self, w: &mut XmlWriter) -> Result<()> {
        let anchor = self.bibxml_anchor();
        let target = self.url("src").or_else(|| self.url("doi"));
        Element::new("reference")
            .attr_opt("anchor", anchor.as_deref())
            .attr_opt("target", target)
            .build(w, |w| {
                Element::new("front").build(w, |w| {
                    if let Some(title) = self.title.main_title() {
                        text_element(w, "title", title.title.plain())?;
                    }
                    for c in &self.contributor {
                        if c.has_role("author") || c.has_role("editor") {
                            self.write_author(w, c)?;
                        }
                    }
                    self.write_date(w)?;
                    for a in &self.abstracts {
                        Element::new("abstract")
                            .build(w, |w| text_element(w, "t", a.plain()))?;
                    }
                    Ok(())
                })?;
                for di in &self.docidentifier {
                    if di.id_type.as_deref() == Some("rfc-anchor") {
                        continue;
                    }
                    Element::new("seriesInfo")
                        .attr("name", di.id_type.as_deref().unwrap_or(""))
                        .attr("value", di.id.as_str())
                        .empty(w)?;
                }
                Ok(())
            })
    }

    /// The `rfc-anchor` identifier wins; otherwise the anchor is built
    /// from the first identifier's scheme and the docnumber.
    fn bibxml_anchor(&self) -> Option<String> {
        if let Some(di) =
            self.docidentifier.iter().find(|di| di.id_type.as_deref() == Some("rfc-anchor"))
        {
            return Some(di.id.clone());
        }
        let scheme = self.docidentifier.first().and_then(|di| di.id_type.as_deref())?;
        let docnumber = self.docnumber.as_deref()?;
        Some(format!("{scheme}.{docnumber}"))
    }

    fn write_author(&self, w: &mut XmlWriter, c: &ContributionInfo) -> Result<()> {
        let role = if c.has_role("editor") { Some("editor") } else { None };
        if let Some(person) = c.entity.as_person() {
            let fullname = person_fullname(person);
            let surname = person.name.surname.as_ref().map(|s| s.plain().to_string());
            let initials = person
                .name
                .initial
                .iter()
                .map(|i| i.plain())
                .collect::<Vec<_>>()
                .join(" ");
            let el = Element::new("author")
                .attr_opt("fullname", fullname.as_deref())
                .attr_opt("initials", (!initials.is_empty()).then_some(initials.as_str()))
                .attr_opt("surname", surname.as_deref())
                .attr_opt("role", role);
            if person.contact.is_empty() && person.uri.is_none() {
                el.empty(w)
            } else {
                el.build(w, |w| write_address(w, &person.contact, person.uri.as_deref()))
            }
        } else if let Some(org) = c.entity.as_organization() {
            Element::new("author").attr_opt("role", role).build(w, |w| {
                let name = org.name.first().map(|n| n.plain()).unwrap_or("");
                text_element(w, "organization", name)?;
                write_address(w, &org.contact, org.uri.as_deref())
            })
        } else {
            Ok(())
        }
    }

    fn write_date(&self, w: &mut XmlWriter) -> Result<()> {
        let Some(date) = self.date.iter().find(|d| d.date_type == "published") else {
            return Ok(());
        };
        let month = date
            .month()
            .and_then(|m| MONTH_NAMES.get(m as usize - 1))
            .map(|m| m.to_string());
        Element::new("date")
            .attr_opt("year", date.year())
            .attr_opt("month", month.as_deref())
            .empty(w)
    }
}

fn person_fullname(person: &Person) -> Option<String> {
    if let Some(completename) = &person.name.completename {
        return Some(completename.plain().to_string());
    }
    let surname = person.name.surname.as_ref()?;
    let mut parts: Vec<&str> = person.name.forename.iter().map(|f| f.plain()).collect();
    parts.push(surname.plain());
    Some(parts.join(" "))
}

fn write_address(w: &mut XmlWriter, contact: &[ContactInfo], uri: Option<&str>) -> Result<()> {
    if contact.is_empty() && uri.is_none() {
        return Ok(());
    }
    Element::new("address").build(w, |w| {
        for c in contact {
            match c {
                ContactInfo::Address(a) => {
                    Element::new("postal").build(w, |w| {
                        for street in &a.street {
                            text_element(w, "street", street)?;
                        }
                        text_element(w, "city", &a.city)?;
                        if let Some(postcode) = &a.postcode {
                            text_element(w, "code", postcode)?;
                        }
                        text_element(w, "country", &a.country)?;
                        if let Some(state) = &a.state {
                            text_element(w, "region", state)?;
                        }
                        Ok(())
                    })?;
                }
                ContactInfo::Contact(c) => {
                    text_element(w, &c.contact_type, &c.value)?;
                }
            }
        }
        if let Some(uri) = uri {
            text_element(w, "uri", uri)?;
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::{ContributionInfo, ContributorEntity, ContributorRole};
    use crate::date::BibliographicDate;
    use crate::formatted_string::FormattedString;
    use crate::identifier::DocumentIdentifier;
    use crate::person::FullName;
    use crate::title::TypedTitleString;
    use crate::typed_uri::TypedUri;

    #[test]
    fn anchor_from_rfc_anchor_docid() {
        let mut item = BibliographicItem::new();
        item.docidentifier.push(DocumentIdentifier::new(
            "RFC7991",
            Some("rfc-anchor".to_string()),
            None,
        ));
        let rendered = item.to_bibxml().unwrap();
        assert!(rendered.starts_with(r#"<reference anchor="RFC7991">"#));
    }

    #[test]
    fn anchor_from_type_and_docnumber() {
        let mut item = BibliographicItem::new();
        item.docidentifier.push(DocumentIdentifier::new(
            "RFC 7991",
            Some("IETF".to_string()),
            None,
        ));
        item.docnumber = Some("7991".to_string());
        item.link.push(TypedUri::new(
            Some("src".to_string()),
            "https://www.rfc-editor.org/info/rfc7991",
        ));
        let rendered = item.to_bibxml().unwrap();
        assert!(rendered.starts_with(
            r#"<reference anchor="IETF.7991" target="https://www.rfc-editor.org/info/rfc7991">"#
        ));
        assert!(rendered.contains(r#"<seriesInfo name="IETF" value="RFC 7991"/>"#));
    }

    #[test]
    fn person_author_attributes() {
        let mut item = BibliographicItem::new();
        let mut name = FullName::with_surname("Hoffman");
        name.forename.push(crate::LocalizedString::new("Paul"));
        name.initial.push(crate::LocalizedString::new("P."));
        item.contributor.push(ContributionInfo::new(
            ContributorEntity::Person(crate::Person::new(name)),
            vec![ContributorRole::new("author", Vec::new())],
        ));
        item.title.0.push(TypedTitleString::new(
            Some("main".to_string()),
            FormattedString::plain_text("The xml2rfc Vocabulary"),
        ));
        item.date.push(BibliographicDate::published("2016-12").unwrap());
        let rendered = item.to_bibxml().unwrap();
        assert!(rendered
            .contains(r#"<author fullname="Paul Hoffman" initials="P." surname="Hoffman"/>"#));
        assert!(rendered.contains(r#"<date year="2016" month="December"/>"#));
    }
}
