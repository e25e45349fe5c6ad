/*
SPDX-License-Identifier: MPL-2.0
*/

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::asciibib::push;
use crate::contributor::{contacts_to_asciibib, ContactInfo};
use crate::localized_string::LocalizedString;
use crate::xml::{lang_filter, text_element, Element, XmlWriter};
use crate::{Error, Result};

const ORG_IDENTIFIER_TYPES: &[&str] = &["orcid", "uri"];

static RE_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*$").unwrap());

/// An organization identifier within some scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgIdentifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub value: String,
}

impl OrgIdentifier {
    pub fn new(id_type: impl Into<String>, value: impl Into<String>) -> Self {
        let id_type = id_type.into();
        if !ORG_IDENTIFIER_TYPES.contains(&id_type.as_str()) {
            warn!(id_type = %id_type, "invalid organization identifier type");
        }
        Self { id_type, value: value.into() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("identifier").attr("type", self.id_type.as_str()).text(w, &self.value)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}identifier::"));
        }
        out.push(format!("{pfx}identifier.type:: {}", self.id_type));
        out.push(format!("{pfx}identifier.value:: {}", self.value));
        out.join("\n")
    }
}

/// A contributing organization. At least one name is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Organization {
    pub name: Vec<LocalizedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subdivision: Vec<LocalizedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<OrgIdentifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<ContactInfo>,
}

impl Organization {
    pub fn new(name: Vec<LocalizedString>) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::MissingOrgName);
        }
        Ok(Self {
            name,
            abbreviation: None,
            subdivision: Vec::new(),
            identifier: Vec::new(),
            uri: None,
            contact: Vec::new(),
        })
    }

    pub fn named(name: &str) -> Self {
        Self {
            name: vec![LocalizedString::new(name)],
            abbreviation: None,
            subdivision: Vec::new(),
            identifier: Vec::new(),
            uri: None,
            contact: Vec::new(),
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("organization").build(w, |w| {
            for n in lang_filter(&self.name, lang, |n| &n.language) {
                n.to_xml(w, "name")?;
            }
            for s in lang_filter(&self.subdivision, lang, |s| &s.language) {
                s.to_xml(w, "subdivision")?;
            }
            if let Some(abbr) = &self.abbreviation {
                abbr.to_xml(w, "abbreviation")?;
            }
            if let Some(uri) = &self.uri {
                text_element(w, "uri", uri)?;
            }
            for id in &self.identifier {
                id.to_xml(w)?;
            }
            for c in &self.contact {
                c.to_xml(w)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() {
            "organization".to_string()
        } else {
            RE_STAR.replace(prefix, "organization").into_owned()
        };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        for n in &self.name {
            push(&mut out, n.to_asciibib(&format!("{pfx}.name"), self.name.len(), false));
        }
        if let Some(abbr) = &self.abbreviation {
            push(&mut out, abbr.to_asciibib(&format!("{pfx}.abbreviation"), 1, false));
        }
        for sd in &self.subdivision {
            if self.subdivision.len() > 1 {
                out.push(format!("{pfx}.subdivision::"));
            }
            push(&mut out, sd.to_asciibib(&format!("{pfx}.subdivision"), 1, false));
        }
        for id in &self.identifier {
            out.push(id.to_asciibib(&pfx, self.identifier.len()));
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
    fn name_is_required() {
        assert!(Organization::new(Vec::new()).is_err());
    }

    #[test]
    fn xml_child_order() {
        let mut org = Organization::named("International Organization for Standardization");
        org.abbreviation = Some(LocalizedString::new("ISO"));
        org.uri = Some("https://iso.org".to_string());
        org.identifier.push(OrgIdentifier::new("uri", "https://ror.org/xxx"));
        let rendered = xml::render(|w| org.to_xml(w, None)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                "<organization>",
                "<name>International Organization for Standardization</name>",
                "<abbreviation>ISO</abbreviation>",
                "<uri>https://iso.org</uri>",
                r#"<identifier type="uri">https://ror.org/xxx</identifier>"#,
                "</organization>"
            )
        );
    }

    #[test]
    fn name_language_filter_with_fallback() {
        let mut org = Organization::named("fallback");
        org.name = vec![
            LocalizedString::with_locale("Organisation", "fr", "Latn"),
            LocalizedString::with_locale("Organization", "en", "Latn"),
        ];
        let rendered = xml::render(|w| org.to_xml(w, Some("en"))).unwrap();
        assert!(rendered.contains("Organization"));
        assert!(!rendered.contains("Organisation"));

        let rendered = xml::render(|w| org.to_xml(w, Some("de"))).unwrap();
        assert!(rendered.contains("Organization"));
        assert!(rendered.contains("Organisation"));
    }

    #[test]
    fn asciibib_star_prefix() {
        let org = Organization::named("ISO");
        let out = org.to_asciibib("contributor.*", 1);
        assert_eq!(out, "contributor.organization.name:: ISO");
    }
}
