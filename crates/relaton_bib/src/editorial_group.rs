/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{Element, XmlWriter};
use crate::Result;

/// A working group within a technical committee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkGroup {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub workgroup_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl WorkGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: None,
            workgroup_type: None,
            identifier: None,
            prefix: None,
        }
    }

    fn attrs(&self) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        if let Some(n) = self.number {
            attrs.push(("number".to_string(), n.to_string()));
        }
        if let Some(t) = &self.workgroup_type {
            attrs.push(("type".to_string(), t.clone()));
        }
        if let Some(i) = &self.identifier {
            attrs.push(("identifier".to_string(), i.clone()));
        }
        if let Some(p) = &self.prefix {
            attrs.push(("prefix".to_string(), p.clone()));
        }
        attrs
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = vec![format!("{pfx}name:: {}", self.name)];
        if let Some(n) = self.number {
            out.push(format!("{pfx}number:: {n}"));
        }
        if let Some(t) = &self.workgroup_type {
            out.push(format!("{pfx}type:: {t}"));
        }
        if let Some(i) = &self.identifier {
            out.push(format!("{pfx}identifier:: {i}"));
        }
        if let Some(p) = &self.prefix {
            out.push(format!("{pfx}prefix:: {p}"));
        }
        out.join("\n")
    }
}

/// A technical committee wrapping a single workgroup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnicalCommittee {
    pub workgroup: WorkGroup,
}

impl TechnicalCommittee {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        let mut el = Element::new("technical-committee");
        for (k, v) in self.workgroup.attrs() {
            el = el.attr(k, v);
        }
        el.text(w, &self.workgroup.name)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() {
            "technical_committee".to_string()
        } else {
            format!("{prefix}.technical_committee")
        };
        let mut out = String::new();
        if count > 1 {
            out.push_str(&format!("{pfx}::\n"));
        }
        out.push_str(&self.workgroup.to_asciibib(&pfx));
        out
    }
}

/// Editorial group responsible for the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorialGroup {
    pub technical_committee: Vec<TechnicalCommittee>,
}

impl EditorialGroup {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("editorialgroup").build(w, |w| {
            for tc in &self.technical_committee {
                tc.to_xml(w)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() {
            "editorialgroup".to_string()
        } else {
            format!("{prefix}.editorialgroup")
        };
        self.technical_committee
            .iter()
            .map(|tc| tc.to_asciibib(&pfx, self.technical_committee.len()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
