/*
SPDX-License-Identifier: MPL-2.0
*/

//! Contribution metadata shared by persons and organizations: postal
//! addresses, contact channels, roles and the entity wrapper.

use serde::Serialize;
use tracing::warn;

use crate::asciibib::push;
use crate::formatted_string::FormattedString;
use crate::organization::Organization;
use crate::person::Person;
use crate::xml::{lang_filter, text_element, Element, XmlWriter};
use crate::Result;

const ROLE_TYPES: &[&str] =
    &["author", "performer", "publisher", "editor", "adapter", "translator", "distributor"];

const CONTACT_TYPES: &[&str] = &["phone", "email", "uri"];

/// Postal address of a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub street: Vec<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
}

impl Address {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("address").build(w, |w| {
            for street in &self.street {
                text_element(w, "street", street)?;
            }
            text_element(w, "city", &self.city)?;
            text_element(w, "country", &self.country)?;
            if let Some(state) = &self.state {
                text_element(w, "state", state)?;
            }
            if let Some(postcode) = &self.postcode {
                text_element(w, "postcode", postcode)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx =
            if prefix.is_empty() { "address".to_string() } else { format!("{prefix}.address") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        for street in &self.street {
            out.push(format!("{pfx}.street:: {street}"));
        }
        out.push(format!("{pfx}.city:: {}", self.city));
        if let Some(state) = &self.state {
            out.push(format!("{pfx}.state:: {state}"));
        }
        out.push(format!("{pfx}.country:: {}", self.country));
        if let Some(postcode) = &self.postcode {
            out.push(format!("{pfx}.postcode:: {postcode}"));
        }
        out.join("\n")
    }
}

/// A contact channel; the type names the XML element (`phone`, `email`,
/// `uri`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    #[serde(rename = "type")]
    pub contact_type: String,
    pub value: String,
}

impl Contact {
    pub fn new(contact_type: impl Into<String>, value: impl Into<String>) -> Self {
        let contact_type = contact_type.into();
        if !CONTACT_TYPES.contains(&contact_type.as_str()) {
            warn!(contact_type = %contact_type, "invalid contact type");
        }
        Self { contact_type, value: value.into() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        text_element(w, &self.contact_type, &self.value)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}contact::"));
        }
        out.push(format!("{pfx}contact.type:: {}", self.contact_type));
        out.push(format!("{pfx}contact.value:: {}", self.value));
        out.join("\n")
    }
}

/// Either a postal address or a contact channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContactInfo {
    Address(Address),
    Contact(Contact),
}

impl ContactInfo {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        match self {
            ContactInfo::Address(a) => a.to_xml(w),
            ContactInfo::Contact(c) => c.to_xml(w),
        }
    }
}

/// Renders the url/address/contact tail shared by persons and
/// organizations.
pub(crate) fn contacts_to_asciibib(
    prefix: &str,
    uri: Option<&str>,
    contact: &[ContactInfo],
) -> String {
    let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
    let mut out = Vec::new();
    if let Some(uri) = uri {
        out.push(format!("{pfx}url:: {uri}"));
    }
    let addresses: Vec<&Address> = contact
        .iter()
        .filter_map(|c| match c {
            ContactInfo::Address(a) => Some(a),
            _ => None,
        })
        .collect();
    for a in &addresses {
        push(&mut out, a.to_asciibib(prefix, addresses.len()));
    }
    let contacts: Vec<&Contact> = contact
        .iter()
        .filter_map(|c| match c {
            ContactInfo::Contact(c) => Some(c),
            _ => None,
        })
        .collect();
    for c in &contacts {
        push(&mut out, c.to_asciibib(prefix, contacts.len()));
    }
    out.join("\n")
}

/// A role a contributor plays for an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorRole {
    #[serde(rename = "type")]
    pub role_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<FormattedString>,
}

impl ContributorRole {
    pub fn new(role_type: impl Into<String>, description: Vec<FormattedString>) -> Self {
        let role_type = role_type.into();
        if !ROLE_TYPES.contains(&role_type.as_str()) {
            warn!(role_type = %role_type, "invalid contributor role type");
        }
        Self { role_type, description }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("role").attr("type", self.role_type.as_str()).build(w, |w| {
            for d in lang_filter(&self.description, lang, |d| d.language()) {
                d.to_xml(w, "description")?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{prefix}::"));
        }
        for desc in &self.description {
            out.push(desc.to_asciibib(
                &format!("{pfx}role.description"),
                self.description.len(),
                false,
            ));
        }
        out.push(format!("{pfx}role.type:: {}", self.role_type));
        out.join("\n")
    }
}

/// The contributing entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContributorEntity {
    Person(Person),
    Organization(Organization),
}

impl ContributorEntity {
    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        match self {
            ContributorEntity::Person(p) => p.to_xml(w, lang),
            ContributorEntity::Organization(o) => o.to_xml(w, lang),
        }
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        match self {
            ContributorEntity::Person(p) => p.to_asciibib(prefix),
            ContributorEntity::Organization(o) => o.to_asciibib(prefix, 1),
        }
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            ContributorEntity::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            ContributorEntity::Organization(o) => Some(o),
            _ => None,
        }
    }
}

/// An entity together with its roles. An empty role list defaults to
/// `author` for persons and `publisher` for organizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionInfo {
    pub entity: ContributorEntity,
    pub role: Vec<ContributorRole>,
}

impl ContributionInfo {
    pub fn new(entity: ContributorEntity, mut role: Vec<ContributorRole>) -> Self {
        if role.is_empty() {
            let default_role = match entity {
                ContributorEntity::Person(_) => "author",
                ContributorEntity::Organization(_) => "publisher",
            };
            role.push(ContributorRole::new(default_role, Vec::new()));
        }
        Self { entity, role }
    }

    pub fn has_role(&self, role_type: &str) -> bool {
        self.role.iter().any(|r| r.role_type == role_type)
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        self.entity.to_xml(w, lang)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = prefix.split('.').next().unwrap_or("");
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        push(&mut out, self.entity.to_asciibib(prefix));
        for r in &self.role {
            out.push(r.to_asciibib(pfx, self.role.len()));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localized_string::LocalizedString;
    use crate::xml;

    fn address() -> Address {
        Address {
            street: vec!["Main st. 1".to_string()],
            city: "Geneva".to_string(),
            state: None,
            country: "Switzerland".to_string(),
            postcode: Some("1211".to_string()),
        }
    }

    #[test]
    fn address_xml_order() {
        let rendered = xml::render(|w| address().to_xml(w)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                "<address><street>Main st. 1</street><city>Geneva</city>",
                "<country>Switzerland</country><postcode>1211</postcode></address>"
            )
        );
    }

    #[test]
    fn contact_element_named_by_type() {
        let contact = Contact::new("email", "info@example.com");
        let rendered = xml::render(|w| contact.to_xml(w)).unwrap();
        assert_eq!(rendered, "<email>info@example.com</email>");
    }

    #[test]
    fn role_with_description() {
        let role = ContributorRole::new(
            "publisher",
            vec![FormattedString::new(LocalizedString::new("Publisher role"), None)],
        );
        let rendered = xml::render(|w| role.to_xml(w, None)).unwrap();
        assert_eq!(
            rendered,
            r#"<role type="publisher"><description>Publisher role</description></role>"#
        );
    }

    #[test]
    fn default_role_for_organization() {
        let org = Organization::new(vec![LocalizedString::new("ISO")]).unwrap();
        let info = ContributionInfo::new(ContributorEntity::Organization(org), Vec::new());
        assert_eq!(info.role[0].role_type, "publisher");
    }

    #[test]
    fn contact_tail_asciibib() {
        let contacts = vec![
            ContactInfo::Address(address()),
            ContactInfo::Contact(Contact::new("phone", "223322")),
        ];
        let out = contacts_to_asciibib("org", Some("https://iso.org"), &contacts);
        assert!(out.starts_with("org.url:: https://iso.org\norg.address.street:: Main st. 1"));
        assert!(out.ends_with("org.contact.type:: phone\norg.contact.value:: 223322"));
    }
}
