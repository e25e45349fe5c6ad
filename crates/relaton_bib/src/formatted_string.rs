/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;
use tracing::warn;

use crate::asciibib::pref;
use crate::localized_string::LocalizedString;
use crate::xml::{Element, XmlWriter};
use crate::Result;

/// Media types accepted for [`FormattedString::format`].
pub const FORMATS: &[&str] = &[
    "text/plain",
    "text/html",
    "text/markdown",
    "application/docbook+xml",
    "application/tei+xml",
    "text/x-asciidoc",
    "application/x-isodoc+xml",
];

/// A [`LocalizedString`] with an optional media-type format tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedString {
    #[serde(flatten)]
    pub string: LocalizedString,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FormattedString {
    pub fn new(string: LocalizedString, format: Option<String>) -> Self {
        if let Some(f) = &format {
            if !FORMATS.contains(&f.as_str()) {
                warn!(format = %f, "invalid format");
            }
        }
        Self { string, format }
    }

    pub fn plain_text(content: impl Into<String>) -> Self {
        Self::new(LocalizedString::new(content), Some("text/plain".to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.string.is_empty()
    }

    pub fn plain(&self) -> &str {
        self.string.plain()
    }

    pub fn language(&self) -> &[String] {
        &self.string.language
    }

    /// Attributes in rendering order: format first, then locale.
    pub(crate) fn attrs(&self) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        if let Some(f) = &self.format {
            attrs.push(("format".to_string(), f.clone()));
        }
        attrs.extend(self.string.locale_attrs());
        attrs
    }

    pub fn to_xml(&self, w: &mut XmlWriter, tag: &str) -> Result<()> {
        let mut el = Element::new(tag);
        for (k, v) in self.attrs() {
            el = el.attr(k, v);
        }
        el.build(w, |w| self.string.write_content(w))
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize, has_attrs: bool) -> String {
        let has_attrs = has_attrs || self.format.is_some();
        let mut out = self.string.to_asciibib(prefix, count, has_attrs);
        if let Some(f) = &self.format {
            let pfx = pref(prefix);
            out.push_str(&format!("\n{pfx}format:: {f}"));
        }
        out
    }
}

/// Formatted reference to a document in place of structured identification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedRef(pub FormattedString);

impl FormattedRef {
    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        self.0.to_xml(w, "formattedref")
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = pref(prefix);
        self.0.to_asciibib(&format!("{pfx}formattedref"), 1, false)
    }
}
