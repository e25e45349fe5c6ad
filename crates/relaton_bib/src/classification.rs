/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{Element, XmlWriter};
use crate::Result;

/// Classification code with an optional scheme type (e.g. `udc`, `keyword`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub class_type: Option<String>,
}

impl Classification {
    pub fn new(value: impl Into<String>, class_type: Option<String>) -> Self {
        Self { value: value.into(), class_type }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("classification")
            .attr_opt("type", self.class_type.as_deref())
            .text(w, &self.value)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() {
            "classification".to_string()
        } else {
            format!("{prefix}.classification")
        };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        if let Some(t) = &self.class_type {
            out.push(format!("{pfx}.type:: {t}"));
        }
        out.push(format!("{pfx}.value:: {}", self.value));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn typed_classification() {
        let c = Classification::new("01.040.01", Some("udc".to_string()));
        let rendered = xml::render(|w| c.to_xml(w)).unwrap();
        assert_eq!(rendered, r#"<classification type="udc">01.040.01</classification>"#);
        assert_eq!(
            c.to_asciibib("", 1),
            "classification.type:: udc\nclassification.value:: 01.040.01"
        );
    }
}
