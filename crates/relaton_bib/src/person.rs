/*
SPDX-License-Identifier: MPL-2.0
*/

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::asciibib::push;
use crate::contributor::{contacts_to_asciibib, ContactInfo};
use crate::formatted_string::FormattedString;
use crate::localized_string::LocalizedString;
use crate::organization::Organization;
use crate::xml::{lang_filter, Element, XmlWriter};
use crate::{Error, Result};

static RE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*$").unwrap());

/// A person's name: either a complete name or a surname with optional
/// forenames, initials, additions and prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FullName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<LocalizedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completename: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forename: Vec<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub initial: Vec<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addition: Vec<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prefix: Vec<LocalizedString>,
}

impl FullName {
    pub fn new(
        surname: Option<LocalizedString>,
        completename: Option<LocalizedString>,
    ) -> Result<Self> {
        if surname.is_none() && completename.is_none() {
            return Err(Error::IncompleteName);
        }
        Ok(Self { surname, completename, ..Default::default() })
    }

    pub fn with_surname(surname: &str) -> Self {
        Self { surname: Some(LocalizedString::new(surname)), ..Default::default() }
    }

    pub fn with_completename(completename: &str) -> Self {
        Self { completename: Some(LocalizedString::new(completename)), ..Default::default() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("name").build(w, |w| {
            if let Some(completename) = &self.completename {
                return completename.to_xml(w, "completename");
            }
            for p in lang_filter(&self.prefix, lang, |s| &s.language) {
                p.to_xml(w, "prefix")?;
            }
            for f in lang_filter(&self.forename, lang, |s| &s.language) {
                f.to_xml(w, "forename")?;
            }
            for i in lang_filter(&self.initial, lang, |s| &s.language) {
                i.to_xml(w, "initial")?;
            }
            if let Some(surname) = &self.surname {
                surname.to_xml(w, "surname")?;
            }
            for a in lang_filter(&self.addition, lang, |s| &s.language) {
                a.to_xml(w, "addition")?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { "name.".to_string() } else { format!("{prefix}.name.") };
        let mut out = Vec::new();
        for f in &self.forename {
            push(&mut out, f.to_asciibib(&format!("{pfx}forename"), self.forename.len(), false));
        }
        for i in &self.initial {
            push(&mut out, i.to_asciibib(&format!("{pfx}initial"), self.initial.len(), false));
        }
        if let Some(surname) = &self.surname {
            push(&mut out, surname.to_asciibib(&format!("{pfx}surname"), 1, false));
        }
        for a in &self.addition {
            push(&mut out, a.to_asciibib(&format!("{pfx}addition"), self.addition.len(), false));
        }
        for p in &self.prefix {
            push(&mut out, p.to_asciibib(&format!("{pfx}prefix"), self.prefix.len(), false));
        }
        if let Some(completename) = &self.completename {
            push(&mut out, completename.to_asciibib(&format!("{pfx}completename"), 1, false));
        }
        out.join("\n")
    }
}

/// A person identifier; only `isni` and `uri` schemes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonIdentifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub value: String,
}

impl PersonIdentifier {
    pub fn new(id_type: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let id_type = id_type.into();
        if id_type != "isni" && id_type != "uri" {
            return Err(Error::InvalidPersonIdentifierType(id_type));
        }
        Ok(Self { id_type, value: value.into() })
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("identifier").attr("type", self.id_type.as_str()).text(w, &self.value)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{prefix}::"));
        }
        out.push(format!("{pfx}type:: {}", self.id_type));
        out.push(format!("{pfx}value:: {}", self.value));
        out.join("\n")
    }
}

/// A person's affiliation with an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affiliation {
    pub organization: Organization,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<FormattedString>,
}

impl Affiliation {
    pub fn new(organization: Organization) -> Self {
        Self { organization, name: None, description: Vec::new() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("affiliation").build(w, |w| {
            if let Some(name) = &self.name {
                name.to_xml(w, "name")?;
            }
            for d in lang_filter(&self.description, lang, |d| d.language()) {
                d.to_xml(w, "description")?;
            }
            self.organization.to_xml(w, lang)
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}affiliation::"));
        }
        if let Some(name) = &self.name {
            push(&mut out, name.to_asciibib(&format!("{pfx}affiliation.name"), 1, false));
        }
        for d in &self.description {
            push(
                &mut out,
                d.to_asciibib(
                    &format!("{pfx}affiliation.description"),
                    self.description.len(),
                    false,
                ),
            );
        }
        push(&mut out, self.organization.to_asciibib(&format!("{pfx}affiliation.*"), 1));
        out.join("\n")
    }
}

/// A contributing person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub name: FullName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affiliation: Vec<Affiliation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<PersonIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<ContactInfo>,
}

impl Person {
    pub fn new(name: FullName) -> Self {
        Self {
            name,
            affiliation: Vec::new(),
            identifier: Vec::new(),
            uri: None,
            contact: Vec::new(),
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("person").build(w, |w| {
            self.name.to_xml(w, lang)?;
            for a in &self.affiliation {
                a.to_xml(w, lang)?;
            }
            for i in &self.identifier {
                i.to_xml(w)?;
            }
            for c in &self.contact {
                c.to_xml(w)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() {
            "person".to_string()
        } else {
            RE_STAR.replace(prefix, "person").into_owned()
        };
        let mut out = Vec::new();
        push(&mut out, self.name.to_asciibib(&pfx));
        for a in &self.affiliation {
            out.push(a.to_asciibib(&pfx, self.affiliation.len()));
        }
        for i in &self.identifier {
            out.push(i.to_asciibib(&pfx, self.identifier.len()));
        }
        push(&mut out, contacts_to_asciibib(&pfx, self.uri.as_deref(), &self.contact));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn name_requires_surname_or_completename() {
        assert!(FullName::new(None, None).is_err());
    }

    #[test]
    fn completename_suppresses_parts() {
        let mut name = FullName::with_completename("A. Nikolaev");
        name.forename.push(LocalizedString::new("Andrei"));
        let rendered = xml::render(|w| name.to_xml(w, None)).unwrap();
        assert_eq!(rendered, "<name><completename>A. Nikolaev</completename></name>");
    }

    #[test]
    fn structured_name_order() {
        let mut name = FullName::with_surname("Nikolaev");
        name.forename.push(LocalizedString::new("Andrei"));
        name.initial.push(LocalizedString::new("A."));
        let rendered = xml::render(|w| name.to_xml(w, None)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                "<name><forename>Andrei</forename><initial>A.</initial>",
                "<surname>Nikolaev</surname></name>"
            )
        );
    }

    #[test]
    fn invalid_identifier_type_rejected() {
        assert!(PersonIdentifier::new("wrong", "value").is_err());
        assert!(PersonIdentifier::new("isni", "0000-0001").is_ok());
    }

    #[test]
    fn person_to_xml() {
        let mut person = Person::new(FullName::with_surname("Nikolaev"));
        person.identifier.push(PersonIdentifier::new("uri", "https://example.com/an").unwrap());
        let rendered = xml::render(|w| person.to_xml(w, None)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                "<person><name><surname>Nikolaev</surname></name>",
                r#"<identifier type="uri">https://example.com/an</identifier></person>"#
            )
        );
    }

    #[test]
    fn person_asciibib() {
        let person = Person::new(FullName::with_surname("Nikolaev"));
        assert_eq!(person.to_asciibib("contributor.*"), "contributor.person.name.surname:: Nikolaev");
    }
}
