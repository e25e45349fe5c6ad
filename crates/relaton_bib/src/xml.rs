/*
SPDX-License-Identifier: MPL-2.0
*/

//! Shared helpers for the XML writer side of the converters.
//!
//! Output is deterministic: no indentation, attributes in the order they
//! were pushed, text and attribute values escaped by quick-xml.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::Result;

pub(crate) type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Runs `f` against a fresh writer and returns the rendered document.
pub(crate) fn render<F>(f: F) -> Result<String>
where
    F: FnOnce(&mut XmlWriter) -> Result<()>,
{
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    f(&mut writer)?;
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

/// Builder for a single element; keeps attribute insertion order.
pub(crate) struct Element {
    name: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attrs: Vec::new() }
    }

    pub(crate) fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    pub(crate) fn attr_opt(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        if let Some(v) = value {
            self.attrs.push((key.into(), v.to_string()));
        }
        self
    }

    fn start(&self) -> BytesStart<'_> {
        let mut start = BytesStart::new(self.name.as_str());
        for (k, v) in &self.attrs {
            start.push_attribute((k.as_str(), v.as_str()));
        }
        start
    }

    /// Writes `<name attrs>text</name>`.
    pub(crate) fn text(self, w: &mut XmlWriter, text: &str) -> Result<()> {
        w.write_event(Event::Start(self.start()))?;
        w.write_event(Event::Text(BytesText::new(text)))?;
        w.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }

    /// Writes a self-closing `<name attrs/>`.
    pub(crate) fn empty(self, w: &mut XmlWriter) -> Result<()> {
        w.write_event(Event::Empty(self.start()))?;
        Ok(())
    }

    /// Writes the element with child content produced by `f`.
    pub(crate) fn build<F>(self, w: &mut XmlWriter, f: F) -> Result<()>
    where
        F: FnOnce(&mut XmlWriter) -> Result<()>,
    {
        w.write_event(Event::Start(self.start()))?;
        f(w)?;
        w.write_event(Event::End(BytesEnd::new(self.name.as_str())))?;
        Ok(())
    }
}

/// Writes a bare `<name>text</name>` element.
pub(crate) fn text_element(w: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    Element::new(name).text(w, text)
}

/// Writes a text event inside the currently open element.
pub(crate) fn write_text(w: &mut XmlWriter, text: &str) -> Result<()> {
    w.write_event(Event::Text(BytesText::new(text)))?;
    Ok(())
}

/// Language filter with fallback: entries matching `lang` win, but when the
/// filter comes back empty the whole collection is rendered instead.
pub(crate) fn lang_filter<'a, T, F>(items: &'a [T], lang: Option<&str>, languages: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &[String],
{
    if let Some(code) = lang {
        let filtered: Vec<&T> = items
            .iter()
            .filter(|item| languages(item).iter().any(|l| l == code))
            .collect();
        if !filtered.is_empty() {
            return filtered;
        }
    }
    items.iter().collect()
}
