/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{Element, XmlWriter};
use crate::Result;

/// Place of publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Place {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), uri: None, region: None }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("place")
            .attr_opt("uri", self.uri.as_deref())
            .attr_opt("region", self.region.as_deref())
            .text(w, &self.name)
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { "place".to_string() } else { format!("{prefix}.place") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        out.push(format!("{pfx}.name:: {}", self.name));
        if let Some(uri) = &self.uri {
            out.push(format!("{pfx}.uri:: {uri}"));
        }
        if let Some(region) = &self.region {
            out.push(format!("{pfx}.region:: {region}"));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn place_with_region() {
        let mut place = Place::new("Geneva");
        place.region = Some("CH".to_string());
        let rendered = xml::render(|w| place.to_xml(w)).unwrap();
        assert_eq!(rendered, r#"<place region="CH">Geneva</place>"#);
        assert_eq!(place.to_asciibib("", 1), "place.name:: Geneva\nplace.region:: CH");
    }
}
