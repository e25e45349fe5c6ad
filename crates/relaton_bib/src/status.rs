/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::xml::{text_element, Element, XmlWriter};
use crate::Result;

/// A stage of the document lifecycle, with an optional abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
}

impl Stage {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), abbreviation: None }
    }

    fn write_xml(&self, w: &mut XmlWriter, tag: &str) -> Result<()> {
        Element::new(tag)
            .attr_opt("abbreviation", self.abbreviation.as_deref())
            .text(w, &self.value)
    }
}

/// Publication status of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStatus {
    pub stage: Stage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<String>,
}

impl DocumentStatus {
    pub fn new(stage: Stage) -> Self {
        Self { stage, substage: None, iteration: None }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("status").build(w, |w| {
            self.stage.write_xml(w, "stage")?;
            if let Some(substage) = &self.substage {
                substage.write_xml(w, "substage")?;
            }
            if let Some(iteration) = &self.iteration {
                text_element(w, "iteration", iteration)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = vec![format!("{pfx}docstatus.stage:: {}", self.stage.value)];
        if let Some(substage) = &self.substage {
            out.push(format!("{pfx}docstatus.substage:: {}", substage.value));
        }
        if let Some(iteration) = &self.iteration {
            out.push(format!("{pfx}docstatus.iteration:: {iteration}"));
        }
        out.join("\n")
    }
}
