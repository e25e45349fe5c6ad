/*
SPDX-License-Identifier: MPL-2.0
*/

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::contributor::ContributionInfo;
use crate::xml::{text_element, Element, XmlWriter};
use crate::{Error, Result};

static RE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Copyright held over an item; at least one owner is required.
/// `from` and `to` keep only the year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyrightAssociation {
    pub owner: Vec<ContributionInfo>,
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl CopyrightAssociation {
    pub fn new(
        owner: Vec<ContributionInfo>,
        from: Option<&str>,
        to: Option<&str>,
        scope: Option<String>,
    ) -> Result<Self> {
        if owner.is_empty() {
            return Err(Error::MissingCopyrightOwner);
        }
        Ok(Self {
            owner,
            from: from.and_then(Self::year_of),
            to: to.and_then(Self::year_of),
            scope,
        })
    }

    fn year_of(date: &str) -> Option<String> {
        RE_YEAR.find(date).map(|m| m.as_str().to_string())
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        Element::new("copyright").build(w, |w| {
            text_element(w, "from", self.from.as_deref().unwrap_or("unknown"))?;
            if let Some(to) = &self.to {
                text_element(w, "to", to)?;
            }
            for owner in &self.owner {
                Element::new("owner").build(w, |w| owner.to_xml(w, lang))?;
            }
            if let Some(scope) = &self.scope {
                text_element(w, "scope", scope)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() {
            "copyright".to_string()
        } else {
            format!("{prefix}.copyright")
        };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        for owner in &self.owner {
            out.push(owner.to_asciibib(&format!("{pfx}.owner"), self.owner.len()));
        }
        if let Some(from) = &self.from {
            out.push(format!("{pfx}.from:: {from}"));
        }
        if let Some(to) = &self.to {
            out.push(format!("{pfx}.to:: {to}"));
        }
        if let Some(scope) = &self.scope {
            out.push(format!("{pfx}.scope:: {scope}"));
        }
        out.join("\n")
    }
}
