/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;

use crate::asciibib::{pref, push};
use crate::formatted_string::FormattedString;
use crate::xml::{lang_filter, Element, XmlWriter};
use crate::Result;

/// A typed note attached to a bibliographic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BiblioNote {
    #[serde(flatten)]
    pub content: FormattedString,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub note_type: Option<String>,
}

impl BiblioNote {
    pub fn new(content: FormattedString, note_type: Option<String>) -> Self {
        Self { content, note_type }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        let mut el = Element::new("note");
        for (k, v) in self.content.attrs() {
            el = el.attr(k, v);
        }
        el = el.attr_opt("type", self.note_type.as_deref());
        el.build(w, |w| self.content.string.write_content(w))
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = pref(prefix);
        let mut out = Vec::new();
        if count > 1 && self.note_type.is_some() {
            out.push(format!("{pfx}biblionote::"));
        }
        if let Some(t) = &self.note_type {
            out.push(format!("{pfx}biblionote.type:: {t}"));
        }
        push(
            &mut out,
            self.content.to_asciibib(
                &format!("{pfx}biblionote"),
                1,
                self.note_type.is_some(),
            ),
        );
        out.join("\n")
    }
}

/// Notes with language-aware XML rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BiblioNoteCollection(pub Vec<BiblioNote>);

impl BiblioNoteCollection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        for note in lang_filter(&self.0, lang, |n| n.content.language()) {
            note.to_xml(w)?;
        }
        Ok(())
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        self.0
            .iter()
            .map(|n| n.to_asciibib(prefix, self.0.len()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localized_string::LocalizedString;
    use crate::xml;

    fn note(content: &str, lang: Option<&str>, note_type: Option<&str>) -> BiblioNote {
        let string = match lang {
            Some(l) => LocalizedString::with_locale(content, l, "Latn"),
            None => LocalizedString::new(content),
        };
        BiblioNote::new(
            FormattedString::new(string, Some("text/plain".to_string())),
            note_type.map(str::to_string),
        )
    }

    #[test]
    fn typed_note_to_xml() {
        let n = note("some note", None, Some("annote"));
        let rendered = xml::render(|w| n.to_xml(w)).unwrap();
        assert_eq!(rendered, r#"<note format="text/plain" type="annote">some note</note>"#);
    }

    #[test]
    fn collection_filters_by_language() {
        let notes = BiblioNoteCollection(vec![
            note("note-en", Some("en"), None),
            note("note-fr", Some("fr"), None),
        ]);
        let rendered = xml::render(|w| notes.to_xml(w, Some("fr"))).unwrap();
        assert!(rendered.contains("note-fr"));
        assert!(!rendered.contains("note-en"));
    }

    #[test]
    fn collection_falls_back_when_no_language_matches() {
        let notes = BiblioNoteCollection(vec![
            note("note-en", Some("en"), None),
            note("note-fr", Some("fr"), None),
        ]);
        let rendered = xml::render(|w| notes.to_xml(w, Some("de"))).unwrap();
        assert!(rendered.contains("note-en"));
        assert!(rendered.contains("note-fr"));
    }

    #[test]
    fn asciibib_with_type() {
        let n = note("some note", None, Some("annote"));
        assert_eq!(
            n.to_asciibib("", 1),
            "biblionote.type:: annote\nbiblionote.content:: some note\nbiblionote.format:: text/plain"
        );
    }

    #[test]
    fn asciibib_marker_needs_type_and_repetition() {
        let n = note("some note", None, Some("annote"));
        assert!(n.to_asciibib("", 2).starts_with("biblionote::\n"));
        let untyped = BiblioNote::new(
            FormattedString::new(LocalizedString::new("plain"), None),
            None,
        );
        assert_eq!(untyped.to_asciibib("", 2), "biblionote:: plain");
    }
}
