/*
SPDX-License-Identifier: MPL-2.0
*/

//! Pinpoint references into a cited work ("page 10-20", "clause 3.1").

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

static RE_CUSTOM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^locality:[a-zA-Z0-9_]+$").unwrap());

/// Locality type: a fixed vocabulary plus the `locality:<identifier>`
/// escape hatch for custom types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum LocalityType {
    Section,
    Clause,
    Part,
    Paragraph,
    Chapter,
    Page,
    Whole,
    Table,
    Annex,
    Figure,
    Note,
    List,
    Example,
    Volume,
    Issue,
    Time,
    Custom(String),
}

impl LocalityType {
    /// Unknown values outside the escape pattern are kept but logged.
    pub fn parse(value: &str) -> Self {
        match value {
            "section" => Self::Section,
            "clause" => Self::Clause,
            "part" => Self::Part,
            "paragraph" => Self::Paragraph,
            "chapter" => Self::Chapter,
            "page" => Self::Page,
            "whole" => Self::Whole,
            "table" => Self::Table,
            "annex" => Self::Annex,
            "figure" => Self::Figure,
            "note" => Self::Note,
            "list" => Self::List,
            "example" => Self::Example,
            "volume" => Self::Volume,
            "issue" => Self::Issue,
            "time" => Self::Time,
            other => {
                if !RE_CUSTOM.is_match(other) {
                    warn!(locality_type = %other, "invalid locality type");
                }
                Self::Custom(other.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Section => "section",
            Self::Clause => "clause",
            Self::Part => "part",
            Self::Paragraph => "paragraph",
            Self::Chapter => "chapter",
            Self::Page => "page",
            Self::Whole => "whole",
            Self::Table => "table",
            Self::Annex => "annex",
            Self::Figure => "figure",
            Self::Note => "note",
            Self::List => "list",
            Self::Example => "example",
            Self::Volume => "volume",
            Self::Issue => "issue",
            Self::Time => "time",
            Self::Custom(s) => s,
        }
    }
}

impl fmt::Display for LocalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LocalityType> for String {
    fn from(t: LocalityType) -> Self {
        t.as_str().to_string()
    }
}

/// A typed reference range within a work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibItemLocality {
    #[serde(rename = "type")]
    pub locality_type: LocalityType,
    pub reference_from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,
}

impl BibItemLocality {
    pub fn new(
        locality_type: &str,
        reference_from: impl Into<String>,
        reference_to: Option<String>,
    ) -> Self {
        Self {
            locality_type: LocalityType::parse(locality_type),
            reference_from: reference_from.into(),
            reference_to,
        }
    }

    /// Writes the locality under the given element name; extents use
    /// `<extent>`, plain localities `<locality>`.
    pub fn to_xml_with_tag(&self, w: &mut XmlWriter, tag: &str) -> Result<()> {
        Element::new(tag).attr("type", self.locality_type.as_str()).build(w, |w| {
            text_element(w, "referenceFrom", &self.reference_from)?;
            if let Some(to) = &self.reference_to {
                text_element(w, "referenceTo", to)?;
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
        out.push(format!("{pfx}type:: {}", self.locality_type));
        out.push(format!("{pfx}reference_from:: {}", self.reference_from));
        if let Some(to) = &self.reference_to {
            out.push(format!("{pfx}reference_to:: {to}"));
        }
        out.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locality(pub BibItemLocality);

impl Locality {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        self.0.to_xml_with_tag(w, "locality")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocality(pub BibItemLocality);

impl SourceLocality {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        self.0.to_xml_with_tag(w, "sourceLocality")
    }
}

/// A group of localities rendered under a single wrapping element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalityStack(pub Vec<Locality>);

impl LocalityStack {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("localityStack").build(w, |w| {
            for l in &self.0 {
                l.to_xml(w)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceLocalityStack(pub Vec<SourceLocality>);

impl SourceLocalityStack {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("sourceLocalityStack").build(w, |w| {
            for l in &self.0 {
                l.to_xml(w)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn known_and_custom_types() {
        assert_eq!(LocalityType::parse("page"), LocalityType::Page);
        assert_eq!(
            LocalityType::parse("locality:updates"),
            LocalityType::Custom("locality:updates".to_string())
        );
    }

    #[test]
    fn locality_to_xml() {
        let loc = Locality(BibItemLocality::new("page", "10", Some("20".to_string())));
        let rendered = xml::render(|w| loc.to_xml(w)).unwrap();
        assert_eq!(
            rendered,
            r#"<locality type="page"><referenceFrom>10</referenceFrom><referenceTo>20</referenceTo></locality>"#
        );
    }

    #[test]
    fn stack_wraps_children() {
        let stack = LocalityStack(vec![
            Locality(BibItemLocality::new("section", "1", None)),
            Locality(BibItemLocality::new("page", "4", None)),
        ]);
        let rendered = xml::render(|w| stack.to_xml(w)).unwrap();
        assert!(rendered.starts_with("<localityStack><locality"));
        assert!(rendered.ends_with("</localityStack>"));
    }

    #[test]
    fn asciibib_with_marker() {
        let loc = BibItemLocality::new("section", "2", None);
        assert_eq!(
            loc.to_asciibib("extent", 2),
            "extent::\nextent.type:: section\nextent.reference_from:: 2"
        );
    }
}
