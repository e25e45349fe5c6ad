/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

/// International Classification for Standards entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ics {
    pub code: String,
    pub text: String,
}

impl Ics {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("ics").build(w, |w| {
            text_element(w, "code", &self.code)?;
            text_element(w, "text", &self.text)
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { "ics".to_string() } else { format!("{prefix}.ics") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        out.push(format!("{pfx}.code:: {}", self.code));
        out.push(format!("{pfx}.text:: {}", self.text));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn code_and_text() {
        let ics = Ics { code: "01.040.01".to_string(), text: "Vocabularies".to_string() };
        let rendered = xml::render(|w| ics.to_xml(w)).unwrap();
        assert_eq!(rendered, "<ics><code>01.040.01</code><text>Vocabularies</text></ics>");
    }
}
