/*
SPDX-License-Identifier: MPL-2.0
*/

//! The aggregate bibliographic record and its renderers.

mod bibtex;
mod bibxml;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::asciibib::push;
use crate::classification::Classification;
use crate::contributor::ContributionInfo;
use crate::copyright::CopyrightAssociation;
use crate::date::{BibliographicDate, DateFormat};
use crate::editorial_group::EditorialGroup;
use crate::formatted_string::{FormattedRef, FormattedString};
use crate::ics::Ics;
use crate::identifier::{DocumentIdentifier, StructuredIdentifierCollection};
use crate::localized_string::{LocalizedString, LocalizedStringContent};
use crate::locality::BibItemLocality;
use crate::medium::Medium;
use crate::note::BiblioNoteCollection;
use crate::place::Place;
use crate::relation::{DocRelationCollection, DocumentRelation};
use crate::series::Series;
use crate::status::DocumentStatus;
use crate::title::TypedTitleStringCollection;
use crate::typed_uri::TypedUri;
use crate::validity::Validity;
use crate::version::BibliographicItemVersion;
use crate::xml::{self, text_element, Element, XmlWriter};
use crate::Result;

pub const ITEM_TYPES: &[&str] = &[
    "article",
    "book",
    "booklet",
    "conference",
    "manual",
    "proceedings",
    "presentation",
    "thesis",
    "techreport",
    "standard",
    "unpublished",
    "map",
    "electronics",
    "resource",
    "audiovisual",
    "film",
    "video",
    "broadcast",
    "graphic_work",
    "music",
    "patent",
    "inbook",
    "incollection",
    "inproceedings",
    "journal",
];

static RE_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r":").unwrap());
static RE_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());
static RE_ID_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-[12]\d\d\d").unwrap());

/// Extra note passed by a renderer caller, placed after the item's own
/// notes.
#[derive(Debug, Clone, Default)]
pub struct ExtraNote {
    pub text: String,
    pub note_type: String,
}

/// Options for [`BibliographicItem::to_xml_opts`].
#[derive(Debug, Clone, Default)]
pub struct XmlOptions {
    /// Render a `bibdata` root with an `<ext>` block instead of `bibitem`.
    pub bibdata: bool,
    /// Set for items nested inside a relation; suppresses the `id`
    /// attribute.
    pub embedded: bool,
    pub lang: Option<String>,
    pub date_format: Option<DateFormat>,
    pub no_year: bool,
    pub note: Vec<ExtraNote>,
}

/// Options for [`BibliographicItem::shortref`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortrefOptions {
    pub no_year: bool,
    pub all_parts: bool,
}

/// A bibliographic record: the document's identity, provenance and
/// publication metadata, plus relations to other records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographicItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docnumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdoctype: Option<String>,
    pub title: TypedTitleStringCollection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<TypedUri>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docidentifier: Vec<DocumentIdentifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub date: Vec<BibliographicDate>,
    #[serde(rename = "abstract", default, skip_serializing_if = "Vec::is_empty")]
    pub abstracts: Vec<FormattedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributor: Vec<ContributionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<BibliographicItemVersion>,
    pub biblionote: BiblioNoteCollection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub language: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub script: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formattedref: Option<FormattedRef>,
    #[serde(rename = "docstatus", skip_serializing_if = "Option::is_none")]
    pub status: Option<DocumentStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copyright: Vec<CopyrightAssociation>,
    pub relation: DocRelationCollection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<Medium>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub place: Vec<Place>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extent: Vec<BibItemLocality>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accesslocation: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub license: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classification: Vec<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<Validity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword: Vec<LocalizedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorialgroup: Option<EditorialGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ics: Vec<Ics>,
    pub structuredidentifier: StructuredIdentifierCollection,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub all_parts: bool,
    #[serde(skip)]
    pub(crate) id_attribute: bool,
}

impl Default for BibliographicItem {
    fn default() -> Self {
        Self {
            id: None,
            item_type: None,
            docnumber: None,
            edition: None,
            doctype: None,
            subdoctype: None,
            title: TypedTitleStringCollection::default(),
            link: Vec::new(),
            docidentifier: Vec::new(),
            date: Vec::new(),
            abstracts: Vec::new(),
            contributor: Vec::new(),
            version: None,
            biblionote: BiblioNoteCollection::default(),
            language: Vec::new(),
            script: Vec::new(),
            formattedref: None,
            status: None,
            copyright: Vec::new(),
            relation: DocRelationCollection::default(),
            series: Vec::new(),
            medium: None,
            place: Vec::new(),
            extent: Vec::new(),
            accesslocation: Vec::new(),
            license: Vec::new(),
            classification: Vec::new(),
            validity: None,
            fetched: None,
            keyword: Vec::new(),
            editorialgroup: None,
            ics: Vec::new(),
            structuredidentifier: StructuredIdentifierCollection::default(),
            all_parts: false,
            id_attribute: true,
        }
    }
}

impl BibliographicItem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs unknown document types; the record is still usable.
    pub(crate) fn check_type(item_type: &str) {
        if !ITEM_TYPES.contains(&item_type) {
            warn!(item_type = %item_type, "document type is invalid");
        }
    }

    /// Fills in the derived `id` when none was supplied.
    pub(crate) fn ensure_id(&mut self) {
        if self.id.is_none() {
            self.id = self.makeid(None, false);
        }
    }

    /// Derives an identifier string from the first non-DOI document
    /// identifier: colons become dashes, whitespace is stripped.
    pub fn makeid(&self, docid: Option<&DocumentIdentifier>, attribute: bool) -> Option<String> {
        if attribute && !self.id_attribute {
            return None;
        }
        let docid = docid
            .or_else(|| self.docidentifier.iter().find(|i| i.id_type.as_deref() != Some("DOI")))?;
        let id = RE_COLON.replace_all(&docid.id, "-");
        let id = RE_SPACE.replace_all(&id, "");
        Some(id.trim().to_string())
    }

    /// Short citation string: `<id>[:<published-year>][: All Parts]`.
    pub fn shortref(
        &self,
        identifier: Option<&DocumentIdentifier>,
        opts: ShortrefOptions,
    ) -> String {
        let pubdate = self.date.iter().find(|d| d.date_type == "published");
        let mut year = String::new();
        if !opts.no_year {
            if let Some(y) = pubdate.and_then(|d| d.year()) {
                year = format!(":{y}");
            }
        }
        if opts.all_parts || self.all_parts {
            year.push_str(": All Parts");
        }
        format!("{}{year}", self.makeid(identifier, false).unwrap_or_default())
    }

    /// Content of the first link of the given type (`src` by default).
    pub fn url(&self, link_type: &str) -> Option<&str> {
        self.link
            .iter()
            .find(|l| l.uri_type.as_deref() == Some(link_type))
            .map(|l| l.content.as_str())
    }

    pub fn abstract_for_lang(&self, lang: &str) -> Option<&FormattedString> {
        self.abstracts.iter().find(|a| a.language().iter().any(|l| l == lang))
    }

    pub fn title_for_lang(&self, lang: Option<&str>) -> TypedTitleStringCollection {
        self.title.lang(lang)
    }

    /// Revision date: the version's revision date, else the published
    /// date.
    pub fn revdate(&self) -> Option<&str> {
        if let Some(date) = self.version.as_ref().and_then(|v| v.revision_date.as_deref()) {
            return Some(date);
        }
        self.date
            .iter()
            .find(|d| d.date_type == "published")
            .and_then(|d| d.on.as_deref())
    }

    pub fn disable_id_attribute(&mut self) {
        self.id_attribute = false;
    }

    /// A derived record representing every part of a multipart series:
    /// part-specific titles, identifiers and abstract are stripped and an
    /// `instance` relation embeds the original. Applying it twice changes
    /// nothing further.
    pub fn to_all_parts(&self) -> Self {
        if self.all_parts {
            return self.clone();
        }
        let mut me = self.clone();
        me.id_attribute = false;
        me.relation.push(DocumentRelation::new("instance", self.clone()));
        me.title.delete_title_part();
        for lang in &self.language {
            let joined = me
                .title
                .0
                .iter()
                .filter(|t| {
                    t.title_type.as_deref() != Some("main")
                        && t.title.language().iter().any(|l| l == lang)
                })
                .map(|t| t.title.plain().to_string())
                .collect::<Vec<_>>()
                .join(" - ");
            if let Some(main) = me.title.0.iter_mut().find(|t| {
                t.title_type.as_deref() == Some("main")
                    && t.title.language().iter().any(|l| l == lang)
            }) {
                main.title.string.content = LocalizedStringContent::Single(joined);
            }
        }
        me.abstracts.clear();
        for di in &mut me.docidentifier {
            di.remove_part();
            di.all_parts();
            di.remove_date();
        }
        me.structuredidentifier.remove_part();
        me.structuredidentifier.all_parts();
        me.structuredidentifier.remove_date();
        me.all_parts = true;
        me
    }

    /// A derived record referring to the undated "most recent" edition:
    /// dates, abstract and identifier years are stripped and an `instance`
    /// relation embeds the original.
    pub fn to_most_recent_reference(&self) -> Self {
        let mut me = self.clone();
        me.id_attribute = false;
        me.relation.push(DocumentRelation::new("instance", self.clone()));
        me.abstracts.clear();
        me.date.clear();
        for di in &mut me.docidentifier {
            di.remove_date();
        }
        me.structuredidentifier.remove_date();
        if let Some(id) = &me.id {
            me.id = Some(RE_ID_YEAR.replace_all(id, "").into_owned());
        }
        me
    }

    /// Renders the item as a standalone `bibitem` document.
    pub fn to_xml(&self) -> Result<String> {
        self.to_xml_with(&XmlOptions::default())
    }

    /// Renders a `bibdata` record with the `<ext>` extension block.
    pub fn to_bibdata_xml(&self) -> Result<String> {
        self.to_xml_with(&XmlOptions { bibdata: true, ..Default::default() })
    }

    pub fn to_xml_with(&self, opts: &XmlOptions) -> Result<String> {
        xml::render(|w| self.to_xml_opts(w, opts))
    }

    /// Event-level renderer; child order follows the RelaxNG grammar.
    pub fn to_xml_opts(&self, w: &mut XmlWriter, opts: &XmlOptions) -> Result<()> {
        let lang = opts.lang.as_deref();
        let root = if opts.bibdata { "bibdata" } else { "bibitem" };
        let mut el = Element::new(root);
        if self.id_attribute && !opts.bibdata && !opts.embedded {
            el = el.attr_opt("id", self.id.as_deref());
        }
        el = el.attr_opt("type", self.item_type.as_deref());
        el.build(w, |w| {
            if let Some(fetched) = &self.fetched {
                text_element(w, "fetched", &fetched.format("%Y-%m-%d").to_string())?;
            }
            self.title.to_xml(w, lang)?;
            if let Some(fref) = &self.formattedref {
                fref.to_xml(w)?;
            }
            for link in &self.link {
                link.to_xml(w)?;
            }
            for di in &self.docidentifier {
                di.to_xml(w, lang)?;
            }
            if let Some(docnumber) = &self.docnumber {
                text_element(w, "docnumber", docnumber)?;
            }
            for d in &self.date {
                d.to_xml(w, opts.date_format, opts.no_year)?;
            }
            for c in &self.contributor {
                Element::new("contributor").build(w, |w| {
                    for r in &c.role {
                        r.to_xml(w, lang)?;
                    }
                    c.to_xml(w, lang)
                })?;
            }
            if let Some(edition) = &self.edition {
                text_element(w, "edition", edition)?;
            }
            if let Some(version) = &self.version {
                version.to_xml(w)?;
            }
            self.biblionote.to_xml(w, lang)?;
            for n in &opts.note {
                Element::new("note")
                    .attr("format", "text/plain")
                    .attr("type", n.note_type.as_str())
                    .text(w, &n.text)?;
            }
            for l in &self.language {
                text_element(w, "language", l)?;
            }
            for s in &self.script {
                text_element(w, "script", s)?;
            }
            for a in xml::lang_filter(&self.abstracts, lang, |a| a.language()) {
                a.to_xml(w, "abstract")?;
            }
            if let Some(status) = &self.status {
                status.to_xml(w)?;
            }
            for c in &self.copyright {
                c.to_xml(w, lang)?;
            }
            self.relation.to_xml(w, opts)?;
            for s in &self.series {
                s.to_xml(w)?;
            }
            if let Some(medium) = &self.medium {
                medium.to_xml(w)?;
            }
            for place in &self.place {
                place.to_xml(w)?;
            }
            for extent in &self.extent {
                extent.to_xml_with_tag(w, "extent")?;
            }
            for al in &self.accesslocation {
                text_element(w, "accesslocation", al)?;
            }
            for license in &self.license {
                text_element(w, "license", license)?;
            }
            for cl in &self.classification {
                cl.to_xml(w)?;
            }
            for kw in xml::lang_filter(&self.keyword, lang, |k| &k.language) {
                kw.to_xml(w, "keyword")?;
            }
            if let Some(validity) = &self.validity {
                validity.to_xml(w)?;
            }
            if opts.bibdata && self.has_ext() {
                Element::new("ext").build(w, |w| {
                    if let Some(doctype) = &self.doctype {
                        text_element(w, "doctype", doctype)?;
                    }
                    if let Some(subdoctype) = &self.subdoctype {
                        text_element(w, "subdoctype", subdoctype)?;
                    }
                    if let Some(eg) = &self.editorialgroup {
                        eg.to_xml(w)?;
                    }
                    for ics in &self.ics {
                        ics.to_xml(w)?;
                    }
                    self.structuredidentifier.to_xml(w)?;
                    Ok(())
                })?;
            }
            Ok(())
        })
    }

    fn has_ext(&self) -> bool {
        self.doctype.is_some()
            || self.editorialgroup.is_some()
            || !self.ics.is_empty()
            || !self.structuredidentifier.is_empty()
    }

    /// Renders the flat `key:: value` representation. A top-level call
    /// (empty prefix) is preceded by the AsciiBib document header.
    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out: Vec<String> = if prefix.is_empty() {
            vec!["[%bibitem]".to_string(), "== {blank}".to_string()]
        } else {
            Vec::new()
        };
        if let Some(id) = &self.id {
            out.push(format!("{pfx}id:: {id}"));
        }
        if let Some(fetched) = &self.fetched {
            out.push(format!("{pfx}fetched:: {}", fetched.format("%Y-%m-%d")));
        }
        push(&mut out, self.title.to_asciibib(prefix));
        if let Some(t) = &self.item_type {
            out.push(format!("{pfx}type:: {t}"));
        }
        for di in &self.docidentifier {
            out.push(di.to_asciibib(prefix, self.docidentifier.len()));
        }
        if let Some(docnumber) = &self.docnumber {
            out.push(format!("{pfx}docnumber:: {docnumber}"));
        }
        if let Some(edition) = &self.edition {
            out.push(format!("{pfx}edition:: {edition}"));
        }
        for l in &self.language {
            out.push(format!("{pfx}language:: {l}"));
        }
        for s in &self.script {
            out.push(format!("{pfx}script:: {s}"));
        }
        if let Some(version) = &self.version {
            push(&mut out, version.to_asciibib(prefix));
        }
        push(&mut out, self.biblionote.to_asciibib(prefix));
        if let Some(status) = &self.status {
            push(&mut out, status.to_asciibib(prefix));
        }
        for d in &self.date {
            out.push(d.to_asciibib(prefix, self.date.len()));
        }
        for a in &self.abstracts {
            push(&mut out, a.to_asciibib(&format!("{pfx}abstract"), self.abstracts.len(), false));
        }
        for c in &self.copyright {
            out.push(c.to_asciibib(prefix, self.copyright.len()));
        }
        for link in &self.link {
            out.push(link.to_asciibib(prefix, self.link.len()));
        }
        if let Some(medium) = &self.medium {
            push(&mut out, medium.to_asciibib(prefix));
        }
        for place in &self.place {
            out.push(place.to_asciibib(prefix, self.place.len()));
        }
        for extent in &self.extent {
            out.push(extent.to_asciibib(&format!("{pfx}extent"), self.extent.len()));
        }
        for al in &self.accesslocation {
            out.push(format!("{pfx}accesslocation:: {al}"));
        }
        for cl in &self.classification {
            out.push(cl.to_asciibib(prefix, self.classification.len()));
        }
        if let Some(validity) = &self.validity {
            push(&mut out, validity.to_asciibib(prefix));
        }
        for c in &self.contributor {
            out.push(c.to_asciibib("contributor.*", self.contributor.len()));
        }
        push(&mut out, self.relation.to_asciibib(prefix));
        for s in &self.series {
            out.push(s.to_asciibib(prefix, self.series.len()));
        }
        if let Some(doctype) = &self.doctype {
            out.push(format!("{pfx}doctype:: {doctype}"));
        }
        if let Some(fref) = &self.formattedref {
            push(&mut out, fref.to_asciibib(prefix));
        }
        for kw in &self.keyword {
            push(&mut out, kw.to_asciibib(&format!("{pfx}keyword"), self.keyword.len(), false));
        }
        if let Some(eg) = &self.editorialgroup {
            push(&mut out, eg.to_asciibib(prefix));
        }
        for ics in &self.ics {
            out.push(ics.to_asciibib(prefix, self.ics.len()));
        }
        push(&mut out, self.structuredidentifier.to_asciibib(prefix));
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::id_type;

    fn item_with_docid(id: &str, ty: Option<&str>) -> BibliographicItem {
        let mut item = BibliographicItem::new();
        item.docidentifier.push(DocumentIdentifier::new(id, ty.map(str::to_string), None));
        item.ensure_id();
        item
    }

    #[test]
    fn makeid_skips_doi_and_strips() {
        let mut item = BibliographicItem::new();
        item.docidentifier.push(DocumentIdentifier::new(
            "10.1000/x",
            Some("DOI".to_string()),
            None,
        ));
        item.docidentifier.push(DocumentIdentifier::new("ISO 1:2014", None, None));
        assert_eq!(item.makeid(None, false).as_deref(), Some("ISO1-2014"));
    }

    #[test]
    fn shortref_appends_published_year() {
        let mut item = item_with_docid("TC211", None);
        item.date.push(BibliographicDate::published("2014-04").unwrap());
        assert_eq!(item.shortref(Some(&item.docidentifier[0]), ShortrefOptions::default()), "TC211:2014");
        assert_eq!(
            item.shortref(None, ShortrefOptions { no_year: true, all_parts: false }),
            "TC211"
        );
        assert_eq!(
            item.shortref(None, ShortrefOptions { no_year: false, all_parts: true }),
            "TC211:2014: All Parts"
        );
    }

    #[test]
    fn bibitem_root_carries_id_attribute() {
        let item = item_with_docid("ISO 1", Some(id_type::ISO));
        let rendered = item.to_xml().unwrap();
        assert!(rendered.starts_with(r#"<bibitem id="ISO1">"#));
        let bibdata = item.to_bibdata_xml().unwrap();
        assert!(bibdata.starts_with("<bibdata>"));
    }

    #[test]
    fn all_parts_is_idempotent() {
        let mut item = item_with_docid("1111-2:2014", Some(id_type::ISO));
        item.structuredidentifier =
            StructuredIdentifierCollection(vec![crate::StructuredIdentifier::new("1111-2")]);
        let all = item.to_all_parts();
        assert_eq!(all.docidentifier[0].id, "1111 (all parts)");
        assert!(all.all_parts);
        assert_eq!(all.relation.len(), 1);
        let again = all.to_all_parts();
        assert_eq!(again.docidentifier[0].id, "1111 (all parts)");
        assert_eq!(again.relation.len(), 1);
    }

    #[test]
    fn most_recent_reference_strips_dates() {
        let mut item = item_with_docid("ISO 1:2014", Some(id_type::ISO));
        item.date.push(BibliographicDate::published("2014").unwrap());
        let recent = item.to_most_recent_reference();
        assert_eq!(recent.docidentifier[0].id, "ISO 1");
        assert_eq!(recent.id.as_deref(), Some("ISO1"));
        assert!(recent.date.is_empty());
        // the source item is untouched
        assert_eq!(item.date.len(), 1);
        assert!(item.id_attribute);
    }

    #[test]
    fn asciibib_header_and_id() {
        let item = item_with_docid("ISO 1", None);
        let out = item.to_asciibib("");
        assert!(out.starts_with("[%bibitem]\n== {blank}\nid:: ISO1\ndocid:: ISO 1"));
    }
}
