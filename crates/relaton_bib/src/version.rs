/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::asciibib::pref;
use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

/// Revision metadata of a bibliographic item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BibliographicItemVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub draft: Vec<String>,
}

impl BibliographicItemVersion {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("version").build(w, |w| {
            if let Some(date) = &self.revision_date {
                text_element(w, "revision-date", date)?;
            }
            for draft in &self.draft {
                text_element(w, "draft", draft)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = pref(prefix);
        let mut out = Vec::new();
        if let Some(date) = &self.revision_date {
            out.push(format!("{pfx}version.revision_date:: {date}"));
        }
        for draft in &self.draft {
            out.push(format!("{pfx}version.draft:: {draft}"));
        }
        out.join("\n")
    }
}
