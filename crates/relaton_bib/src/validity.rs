/*
SPDX-License-Identifier: MPL-2.0
*/

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::xml::{Element, XmlWriter};
use crate::Result;

/// Timestamp format used for validity attributes.
pub const VALIDITY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Validity window of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begins: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<NaiveDateTime>,
}

impl Validity {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        let mut el = Element::new("validity");
        if let Some(begins) = &self.begins {
            el = el.attr("validityBegins", begins.format(VALIDITY_FORMAT).to_string());
        }
        if let Some(ends) = &self.ends {
            el = el.attr("validityEnds", ends.format(VALIDITY_FORMAT).to_string());
        }
        if let Some(revision) = &self.revision {
            el = el.attr("revision", revision.format(VALIDITY_FORMAT).to_string());
        }
        el.build(w, |_| Ok(()))
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx =
            if prefix.is_empty() { "validity.".to_string() } else { format!("{prefix}.validity.") };
        let mut out = Vec::new();
        if let Some(begins) = &self.begins {
            out.push(format!("{pfx}begins:: {}", begins.format(VALIDITY_FORMAT)));
        }
        if let Some(ends) = &self.ends {
            out.push(format!("{pfx}ends:: {}", ends.format(VALIDITY_FORMAT)));
        }
        if let Some(revision) = &self.revision {
            out.push(format!("{pfx}revision:: {}", revision.format(VALIDITY_FORMAT)));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, VALIDITY_FORMAT).unwrap()
    }

    #[test]
    fn attributes_rendered_with_timestamp_format() {
        let validity = Validity {
            begins: Some(dt("2010-10-21 00:00")),
            ends: Some(dt("2011-02-03 09:30")),
            revision: None,
        };
        let rendered = xml::render(|w| validity.to_xml(w)).unwrap();
        assert_eq!(
            rendered,
            r#"<validity validityBegins="2010-10-21 00:00" validityEnds="2011-02-03 09:30"></validity>"#
        );
        assert_eq!(
            validity.to_asciibib(""),
            "validity.begins:: 2010-10-21 00:00\nvalidity.ends:: 2011-02-03 09:30"
        );
    }
}
