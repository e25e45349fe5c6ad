/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{Element, XmlWriter};
use crate::Result;

/// A link to the document, optionally typed (`src`, `doi`, `obp`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedUri {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub uri_type: Option<String>,
    pub content: String,
}

impl TypedUri {
    pub fn new(uri_type: Option<String>, content: impl Into<String>) -> Self {
        Self { uri_type, content: content.into() }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("uri")
            .attr_opt("type", self.uri_type.as_deref())
            .text(w, &self.content)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { "link".to_string() } else { format!("{prefix}.link") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        if let Some(t) = &self.uri_type {
            out.push(format!("{pfx}.type:: {t}"));
        }
        out.push(format!("{pfx}.content:: {}", self.content));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn typed_link_to_xml() {
        let uri = TypedUri::new(Some("src".to_string()), "https://example.com/doc");
        let rendered = xml::render(|w| uri.to_xml(w)).unwrap();
        assert_eq!(rendered, r#"<uri type="src">https://example.com/doc</uri>"#);
    }

    #[test]
    fn asciibib_marker_when_repeated() {
        let uri = TypedUri::new(Some("doi".to_string()), "https://doi.org/x");
        assert_eq!(
            uri.to_asciibib("", 2),
            "link::\nlink.type:: doi\nlink.content:: https://doi.org/x"
        );
    }
}
