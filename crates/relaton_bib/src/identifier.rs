/*
SPDX-License-Identifier: MPL-2.0
*/

//! Document identifiers and the transformations used when deriving
//! all-parts and most-recent references.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

/// Identifier scheme names with dedicated manipulation rules.
pub mod id_type {
    pub const CN_STD: &str = "Chinese Standard";
    pub const ISO: &str = "ISO";
    pub const IEC: &str = "IEC";
    pub const URN: &str = "URN";
}

static RE_URN_ISO_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(urn:iso:std:[^:]+                         # originator
          (?::(?:data|guide|isp|iwa|pas|r|tr|ts|tta))?  # type
          :\d+)                                     # docnumber
        (?::-[^:]+)?                                # partnumber
        (?::(?:draft|cancelled|stage-[^:]+))?       # status
        (?::ed-\d+)?(?::v[^:]+)?                    # edition, version
        (?::\w{2}(?:,\w{2})*)?                      # language
        ",
    )
    .unwrap()
});
static RE_URN_IEC_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(urn:iec:std:[^:]+:\d+)(?:-[^:]+)?").unwrap());
static RE_URN_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(urn:iec:std:[^:]+:[^:]+:)[^:]*").unwrap());
static RE_URN_ALL_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(urn:iec:std(?::[^:]*){4}).*").unwrap());
static RE_DOT_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\d+").unwrap());
static RE_DASH_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"-[^:]+").unwrap());
static RE_DASH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-[12]\d\d\d").unwrap());
static RE_COLON_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r":[12]\d\d\d").unwrap());
static RE_NUM_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"-\d+").unwrap());

/// An identifier of a document within some scheme (ISO, URN, DOI, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentIdentifier {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub id_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl DocumentIdentifier {
    pub fn new(id: impl Into<String>, id_type: Option<String>, scope: Option<String>) -> Self {
        Self { id: id.into(), id_type, scope }
    }

    /// Strips the part number from the identifier, scheme-dependently.
    pub fn remove_part(&mut self) {
        match self.id_type.as_deref() {
            Some(id_type::CN_STD) => self.id = RE_DOT_PART.replace_all(&self.id, "").into_owned(),
            Some(id_type::ISO) | Some(id_type::IEC) => {
                self.id = RE_DASH_PART.replace_all(&self.id, "").into_owned();
            }
            Some(id_type::URN) => {
                self.id = RE_URN_ISO_PART.replace(&self.id, "$1").into_owned();
                self.id = RE_URN_IEC_PART.replace(&self.id, "$1").into_owned();
            }
            other => warn!(id_type = ?other, "unknown doc type"),
        }
    }

    /// Strips the year from the identifier, scheme-dependently.
    pub fn remove_date(&mut self) {
        match self.id_type.as_deref() {
            Some(id_type::CN_STD) => self.id = RE_DASH_YEAR.replace_all(&self.id, "").into_owned(),
            Some(id_type::ISO) | Some(id_type::IEC) => {
                self.id = RE_COLON_YEAR.replace_all(&self.id, "").into_owned();
            }
            Some(id_type::URN) => {
                self.id = RE_URN_DATE.replace(&self.id, "$1").into_owned();
            }
            other => warn!(id_type = ?other, "unknown doc type"),
        }
    }

    /// Rewrites the identifier to refer to the whole multipart series.
    pub fn all_parts(&mut self) {
        if self.id_type.as_deref() == Some(id_type::URN) {
            self.id = RE_URN_ALL_PARTS.replace(&self.id, "${1}:ser").into_owned();
        } else {
            self.id.push_str(" (all parts)");
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        let id = match (self.id_type.as_deref(), lang) {
            (Some(id_type::URN), Some(lang)) => {
                // Keep only the requested language in the URN language list.
                let re =
                    Regex::new(&format!(r":(?:\w{{2}},)*?{}(?:,\w{{2}})*", regex::escape(lang)))?;
                re.replace(&self.id, format!(":{lang}")).into_owned()
            }
            _ => self.id.clone(),
        };
        Element::new("docidentifier")
            .attr_opt("type", self.id_type.as_deref())
            .attr_opt("scope", self.scope.as_deref())
            .text(w, &id)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        if self.id_type.is_none() && self.scope.is_none() {
            return format!("{pfx}docid:: {}", self.id);
        }
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}docid::"));
        }
        if let Some(t) = &self.id_type {
            out.push(format!("{pfx}docid.type:: {t}"));
        }
        if let Some(s) = &self.scope {
            out.push(format!("{pfx}docid.scope:: {s}"));
        }
        out.push(format!("{pfx}docid.id:: {}", self.id));
        out.join("\n")
    }
}

/// Structured decomposition of a document identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredIdentifier {
    pub docnumber: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agency: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub si_type: Option<String>,
    #[serde(rename = "class", skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementtype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplementnumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl StructuredIdentifier {
    pub fn new(docnumber: impl Into<String>) -> Self {
        Self { docnumber: docnumber.into(), ..Default::default() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("structuredidentifier")
            .attr_opt("type", self.si_type.as_deref())
            .build(w, |w| {
                for agency in &self.agency {
                    text_element(w, "agency", agency)?;
                }
                if let Some(class) = &self.class {
                    text_element(w, "class", class)?;
                }
                text_element(w, "docnumber", &self.docnumber)?;
                for (name, value) in [
                    ("partnumber", &self.partnumber),
                    ("edition", &self.edition),
                    ("version", &self.version),
                    ("supplementtype", &self.supplementtype),
                    ("supplementnumber", &self.supplementnumber),
                    ("language", &self.language),
                    ("year", &self.year),
                ] {
                    if let Some(v) = value {
                        text_element(w, name, v)?;
                    }
                }
                Ok(())
            })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = vec![format!("{pfx}docnumber:: {}", self.docnumber)];
        for agency in &self.agency {
            out.push(format!("{pfx}agency:: {agency}"));
        }
        if let Some(class) = &self.class {
            out.push(format!("{pfx}class:: {class}"));
        }
        for (name, value) in [
            ("type", &self.si_type),
            ("partnumber", &self.partnumber),
            ("edition", &self.edition),
            ("version", &self.version),
            ("supplementtype", &self.supplementtype),
            ("supplementnumber", &self.supplementnumber),
            ("language", &self.language),
            ("year", &self.year),
        ] {
            if let Some(v) = value {
                out.push(format!("{pfx}{name}:: {v}"));
            }
        }
        out.join("\n")
    }

    pub fn remove_date(&mut self) {
        if self.si_type.as_deref() == Some(id_type::CN_STD) {
            self.docnumber = RE_DASH_YEAR.replace_all(&self.docnumber, "").into_owned();
        } else {
            self.docnumber = RE_COLON_YEAR.replace_all(&self.docnumber, "").into_owned();
        }
        self.year = None;
    }

    // Identifier manipulations assume the ISO shape: id-part:year.
    pub fn remove_part(&mut self) {
        self.partnumber = None;
        self.docnumber = RE_NUM_PART.replace_all(&self.docnumber, "").into_owned();
    }

    pub fn all_parts(&mut self) {
        self.docnumber.push_str(" (all parts)");
    }
}

/// Structured identifiers of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructuredIdentifierCollection(pub Vec<StructuredIdentifier>);

impl StructuredIdentifierCollection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        for si in &self.0 {
            si.to_xml(w)?;
        }
        Ok(())
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() {
            "structured_identifier".to_string()
        } else {
            format!("{prefix}.structured_identifier")
        };
        let mut out = Vec::new();
        for si in &self.0 {
            if self.0.len() > 1 {
                out.push(format!("{pfx}::"));
            }
            out.push(si.to_asciibib(&pfx));
        }
        out.join("\n")
    }

    pub fn remove_date(&mut self) {
        for si in &mut self.0 {
            si.remove_date();
        }
    }

    pub fn remove_part(&mut self) {
        for si in &mut self.0 {
            si.remove_part();
        }
    }

    pub fn all_parts(&mut self) {
        for si in &mut self.0 {
            si.all_parts();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn iso_part_and_all_parts() {
        let mut docid = DocumentIdentifier::new(
            "1111-2:2014",
            Some(id_type::ISO.to_string()),
            None,
        );
        docid.remove_part();
        assert_eq!(docid.id, "1111:2014");
        docid.all_parts();
        assert_eq!(docid.id, "1111:2014 (all parts)");
        docid.remove_date();
        assert_eq!(docid.id, "1111 (all parts)");
    }

    #[test]
    fn urn_part_removal() {
        let mut docid = DocumentIdentifier::new(
            "urn:iec:std:iec:61058-2-4:1995::csv:en:plus:amd:1:2003",
            Some(id_type::URN.to_string()),
            None,
        );
        docid.remove_part();
        assert_eq!(docid.id, "urn:iec:std:iec:61058:1995::csv:en:plus:amd:1:2003");
    }

    #[test]
    fn urn_all_parts() {
        let mut docid = DocumentIdentifier::new(
            "urn:iec:std:iec:61058:1995::csv:en",
            Some(id_type::URN.to_string()),
            None,
        );
        docid.all_parts();
        assert_eq!(docid.id, "urn:iec:std:iec:61058:1995::ser");
    }

    #[test]
    fn chinese_standard_date() {
        let mut docid = DocumentIdentifier::new(
            "GB 1-2009",
            Some(id_type::CN_STD.to_string()),
            None,
        );
        docid.remove_date();
        assert_eq!(docid.id, "GB 1");
    }

    #[test]
    fn urn_language_filter_in_xml() {
        let docid = DocumentIdentifier::new(
            "urn:iso:std:iso:1111:en,fr",
            Some(id_type::URN.to_string()),
            None,
        );
        let rendered = xml::render(|w| docid.to_xml(w, Some("fr"))).unwrap();
        assert_eq!(
            rendered,
            r#"<docidentifier type="URN">urn:iso:std:iso:1111:fr</docidentifier>"#
        );
    }

    #[test]
    fn asciibib_untyped_collapses() {
        let docid = DocumentIdentifier::new("ISO 1111", None, None);
        assert_eq!(docid.to_asciibib("", 1), "docid:: ISO 1111");
    }

    #[test]
    fn structured_identifier_xml_order() {
        let mut si = StructuredIdentifier::new("TC211");
        si.agency = vec!["ISO".to_string()];
        si.class = Some("committee".to_string());
        si.si_type = Some("ISO".to_string());
        si.year = Some("2014".to_string());
        let rendered = xml::render(|w| si.to_xml(w)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                r#"<structuredidentifier type="ISO">"#,
                "<agency>ISO</agency><class>committee</class>",
                "<docnumber>TC211</docnumber><year>2014</year>",
                "</structuredidentifier>"
            )
        );
    }

    #[test]
    fn structured_identifier_chinese_date() {
        let mut si = StructuredIdentifier::new("TEST-1999");
        si.si_type = Some(id_type::CN_STD.to_string());
        si.year = Some("1999".to_string());
        si.remove_date();
        assert_eq!(si.docnumber, "TEST");
        assert!(si.year.is_none());
    }

    #[test]
    fn structured_identifier_part() {
        let mut si = StructuredIdentifier::new("1111-2");
        si.partnumber = Some("2".to_string());
        si.remove_part();
        assert_eq!(si.docnumber, "1111");
        assert!(si.partnumber.is_none());
    }
}
