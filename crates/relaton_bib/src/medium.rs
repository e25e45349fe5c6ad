/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

/// Physical medium of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Medium {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
}

impl Medium {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("medium").build(w, |w| {
            if let Some(form) = &self.form {
                text_element(w, "form", form)?;
            }
            if let Some(size) = &self.size {
                text_element(w, "size", size)?;
            }
            if let Some(scale) = &self.scale {
                text_element(w, "scale", scale)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx =
            if prefix.is_empty() { "medium.".to_string() } else { format!("{prefix}.medium.") };
        let mut out = Vec::new();
        if let Some(form) = &self.form {
            out.push(format!("{pfx}form:: {form}"));
        }
        if let Some(size) = &self.size {
            out.push(format!("{pfx}size:: {size}"));
        }
        if let Some(scale) = &self.scale {
            out.push(format!("{pfx}scale:: {scale}"));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    #[test]
    fn children_in_order() {
        let medium = Medium {
            form: Some("print".to_string()),
            size: Some("A4".to_string()),
            scale: None,
        };
        let rendered = xml::render(|w| medium.to_xml(w)).unwrap();
        assert_eq!(rendered, "<medium><form>print</form><size>A4</size></medium>");
    }
}
