/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::asciibib::pref;
use crate::xml::{Element, write_text, XmlWriter};
use crate::{Error, Result};

/// Content of a [`LocalizedString`]: either a plain string or an ordered
/// list of localized variants (multi-script/multi-language alternatives).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LocalizedStringContent {
    Single(String),
    Variants(Vec<LocalizedString>),
}

impl From<&str> for LocalizedStringContent {
    fn from(s: &str) -> Self {
        LocalizedStringContent::Single(s.to_string())
    }
}

impl From<String> for LocalizedStringContent {
    fn from(s: String) -> Self {
        LocalizedStringContent::Single(s)
    }
}

/// A string carrying optional language and script tags, or a list of such
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedString {
    pub content: LocalizedStringContent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
}

impl LocalizedString {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: LocalizedStringContent::Single(content.into()),
            language: Vec::new(),
            script: Vec::new(),
        }
    }

    /// A single-language, single-script string.
    pub fn with_locale(content: impl Into<String>, language: &str, script: &str) -> Self {
        Self {
            content: LocalizedStringContent::Single(content.into()),
            language: vec![language.to_string()],
            script: vec![script.to_string()],
        }
    }

    /// Builds a variant list; the list must not be empty.
    pub fn from_variants(variants: Vec<LocalizedString>) -> Result<Self> {
        if variants.is_empty() {
            return Err(Error::InvalidLocalizedString);
        }
        Ok(Self {
            content: LocalizedStringContent::Variants(variants),
            language: Vec::new(),
            script: Vec::new(),
        })
    }

    pub fn is_empty(&self) -> bool {
        match &self.content {
            LocalizedStringContent::Single(s) => s.is_empty(),
            LocalizedStringContent::Variants(v) => v.is_empty(),
        }
    }

    /// The plain text of this string: the content itself, or the first
    /// variant's text when the content is a variant list.
    pub fn plain(&self) -> &str {
        match &self.content {
            LocalizedStringContent::Single(s) => s,
            LocalizedStringContent::Variants(v) => v.first().map(|v| v.plain()).unwrap_or(""),
        }
    }

    /// Comma-joined language/script attributes; variant lists carry none.
    pub(crate) fn locale_attrs(&self) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        if let LocalizedStringContent::Single(_) = self.content {
            if !self.language.is_empty() {
                attrs.push(("language".to_string(), self.language.join(",")));
            }
            if !self.script.is_empty() {
                attrs.push(("script".to_string(), self.script.join(",")));
            }
        }
        attrs
    }

    /// Writes the element content: escaped text, or `<variant>` children.
    pub(crate) fn write_content(&self, w: &mut XmlWriter) -> Result<()> {
        match &self.content {
            LocalizedStringContent::Single(s) => write_text(w, s),
            LocalizedStringContent::Variants(variants) => {
                for v in variants {
                    v.to_xml(w, "variant")?;
                }
                Ok(())
            }
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, tag: &str) -> Result<()> {
        let mut el = Element::new(tag);
        for (k, v) in self.locale_attrs() {
            el = el.attr(k, v);
        }
        el.build(w, |w| self.write_content(w))
    }

    /// Renders `key:: value` lines. A leaf without language/script (and no
    /// inherited attributes) collapses to a single `prefix:: content` line.
    pub fn to_asciibib(&self, prefix: &str, count: usize, has_attrs: bool) -> String {
        let pfx = pref(prefix);
        match &self.content {
            LocalizedStringContent::Variants(variants) => variants
                .iter()
                .map(|v| v.to_asciibib(&format!("{pfx}variant"), variants.len(), false))
                .collect::<Vec<_>>()
                .join("\n"),
            LocalizedStringContent::Single(content) => {
                if self.language.is_empty() && self.script.is_empty() && !has_attrs {
                    return format!("{prefix}:: {content}");
                }
                let mut out = Vec::new();
                if count > 1 {
                    out.push(format!("{prefix}::"));
                }
                out.push(format!("{pfx}content:: {content}"));
                for lang in &self.language {
                    out.push(format!("{pfx}language:: {lang}"));
                }
                for script in &self.script {
                    out.push(format!("{pfx}script:: {script}"));
                }
                out.join("\n")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn render(ls: &LocalizedString, tag: &str) -> String {
        xml::render(|w| ls.to_xml(w, tag)).unwrap()
    }

    #[test]
    fn plain_content_to_xml() {
        let ls = LocalizedString::new("value");
        assert_eq!(render(&ls, "name"), "<name>value</name>");
    }

    #[test]
    fn localized_content_to_xml() {
        let ls = LocalizedString::with_locale("value", "en", "Latn");
        assert_eq!(
            render(&ls, "name"),
            r#"<name language="en" script="Latn">value</name>"#
        );
    }

    #[test]
    fn content_is_escaped() {
        let ls = LocalizedString::new("a <b> & c");
        assert_eq!(render(&ls, "name"), "<name>a &lt;b&gt; &amp; c</name>");
    }

    #[test]
    fn variants_render_as_children() {
        let ls = LocalizedString::from_variants(vec![
            LocalizedString::with_locale("value-en", "en", "Latn"),
            LocalizedString::with_locale("value-fr", "fr", "Latn"),
        ])
        .unwrap();
        assert_eq!(
            render(&ls, "name"),
            concat!(
                "<name>",
                r#"<variant language="en" script="Latn">value-en</variant>"#,
                r#"<variant language="fr" script="Latn">value-fr</variant>"#,
                "</name>"
            )
        );
    }

    #[test]
    fn empty_variants_rejected() {
        assert!(LocalizedString::from_variants(Vec::new()).is_err());
    }

    #[test]
    fn asciibib_leaf_collapses() {
        let ls = LocalizedString::new("value");
        assert_eq!(ls.to_asciibib("keyword", 1, false), "keyword:: value");
    }

    #[test]
    fn asciibib_with_locale() {
        let ls = LocalizedString::with_locale("value", "en", "Latn");
        assert_eq!(
            ls.to_asciibib("name", 1, false),
            "name.content:: value\nname.language:: en\nname.script:: Latn"
        );
    }

    #[test]
    fn asciibib_marker_when_repeated() {
        let ls = LocalizedString::with_locale("value", "en", "Latn");
        assert_eq!(
            ls.to_asciibib("name", 2, false),
            "name::\nname.content:: value\nname.language:: en\nname.script:: Latn"
        );
    }
}
