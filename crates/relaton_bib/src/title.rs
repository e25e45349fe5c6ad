/*
SPDX-License-Identifier: MPL-2.0
*/

//! Typed titles, including the splitter that turns a raw
//! `"Intro - Main - Part 1: Detail"` string into typed components.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::formatted_string::FormattedString;
use crate::localized_string::LocalizedString;
use crate::xml::{lang_filter, Element, XmlWriter};
use crate::Result;

static RE_IMP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new("\\w\\.Imp\\s?\\d+\u{00A0}:\u{00A0}").unwrap());
static RE_PART: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Part|Partie) \d+:").unwrap());

/// A title with a type (`title-intro`, `title-main`, `title-part`, `main`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedTitleString {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub title_type: Option<String>,
    pub title: FormattedString,
}

impl TypedTitleString {
    pub fn new(title_type: Option<String>, title: FormattedString) -> Self {
        Self { title_type, title }
    }

    fn typed(title_type: &str, content: &str, lang: Option<&str>, script: Option<&str>) -> Self {
        let mut string = LocalizedString::new(content);
        if let Some(lang) = lang {
            string.language = vec![lang.to_string()];
        }
        if let Some(script) = script {
            string.script = vec![script.to_string()];
        }
        Self::new(Some(title_type.to_string()), FormattedString::new(string, None))
    }

    /// Splits a raw title into intro/main/part components plus a synthesized
    /// `main` title joining them back together.
    pub fn from_string(
        title: &str,
        lang: Option<&str>,
        script: Option<&str>,
    ) -> TypedTitleStringCollection {
        const TYPES: [&str; 3] = ["title-intro", "title-main", "title-part"];
        let parts = Self::split_title(title);
        let mut titles: Vec<TypedTitleString> = parts
            .iter()
            .enumerate()
            .filter_map(|(i, p)| {
                p.as_deref().map(|p| Self::typed(TYPES[i], p, lang, script))
            })
            .collect();
        let joined = parts.iter().flatten().cloned().collect::<Vec<_>>().join(" - ");
        titles.push(Self::typed("main", &joined, lang, script));
        TypedTitleStringCollection(titles)
    }

    fn split_title(title: &str) -> [Option<String>; 3] {
        let cleaned = RE_IMP_MARKER.replace_all(title, "");
        let segments: Vec<&str> = cleaned.split(" - ").collect();
        if segments.len() < 2 {
            return [None, Some(segments[0].to_string()), None];
        }
        Self::intro_or_part(&segments)
    }

    fn intro_or_part(segments: &[&str]) -> [Option<String>; 3] {
        if RE_PART.is_match(segments[1]) {
            [None, Some(segments[0].to_string()), Some(segments[1..].join(" -- "))]
        } else {
            let rest = &segments[2..];
            let part = if rest.iter().any(|s| !s.is_empty()) {
                Some(rest.join(" -- "))
            } else {
                None
            };
            [Some(segments[0].to_string()), Some(segments[1].to_string()), part]
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        let mut el = Element::new("title");
        el = el.attr_opt("type", self.title_type.as_deref());
        for (k, v) in self.title.attrs() {
            el = el.attr(k, v);
        }
        el.build(w, |w| self.title.string.write_content(w))
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}title::"));
        }
        if let Some(t) = &self.title_type {
            out.push(format!("{pfx}title.type:: {t}"));
        }
        out.push(self.title.to_asciibib(
            &format!("{pfx}title"),
            1,
            self.title_type.is_some(),
        ));
        out.join("\n")
    }
}

/// The titles of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TypedTitleStringCollection(pub Vec<TypedTitleString>);

impl TypedTitleStringCollection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Titles in the given language; no fallback, `None` returns everything.
    pub fn lang(&self, lang: Option<&str>) -> Self {
        match lang {
            Some(code) => Self(
                self.0
                    .iter()
                    .filter(|t| t.title.language().iter().any(|l| l == code))
                    .cloned()
                    .collect(),
            ),
            None => self.clone(),
        }
    }

    /// The `main` title, when present.
    pub fn main_title(&self) -> Option<&TypedTitleString> {
        self.0.iter().find(|t| t.title_type.as_deref() == Some("main"))
    }

    pub fn delete_title_part(&mut self) {
        self.0.retain(|t| t.title_type.as_deref() != Some("title-part"));
    }

    pub fn to_xml(&self, w: &mut XmlWriter, lang: Option<&str>) -> Result<()> {
        for title in lang_filter(&self.0, lang, |t| t.title.language()) {
            title.to_xml(w)?;
        }
        Ok(())
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        self.0
            .iter()
            .map(|t| t.to_asciibib(prefix, self.0.len()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
