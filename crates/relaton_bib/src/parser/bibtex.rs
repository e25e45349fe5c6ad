/*
SPDX-License-Identifier: MPL-2.0
*/

//! Parsing from BibTeX databases.

use biblatex::{Bibliography, ChunksExt, Entry};
use indexmap::IndexMap;
use tracing::warn;

use crate::classification::Classification;
use crate::contributor::{ContributionInfo, ContributorEntity, ContributorRole};
use crate::date::BibliographicDate;
use crate::formatted_string::FormattedString;
use crate::identifier::DocumentIdentifier;
use crate::item::BibliographicItem;
use crate::locality::BibItemLocality;
use crate::localized_string::LocalizedString;
use crate::note::BiblioNote;
use crate::organization::Organization;
use crate::person::{FullName, Person};
use crate::place::Place;
use crate::relation::DocumentRelation;
use crate::series::Series;
use crate::title::TypedTitleString;
use crate::typed_uri::TypedUri;
use crate::{Error, Result};

const MONTHS: &[&str] =
    &["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

/// BibTeX carries English language names; the schema wants ISO 639
/// codes. Unknown names pass through unchanged.
fn language_code(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "english" => "en",
        "french" => "fr",
        "german" => "de",
        "spanish" => "es",
        "italian" => "it",
        "portuguese" => "pt",
        "russian" => "ru",
        "chinese" => "zh",
        "japanese" => "ja",
        "korean" => "ko",
        "arabic" => "ar",
        "dutch" => "nl",
        _ => return name.to_string(),
    }
    .to_string()
}

/// Parses a BibTeX database into items keyed by citation key, in
/// database order.
pub fn from_bibtex(source: &str) -> Result<IndexMap<String, BibliographicItem>> {
    let bibliography =
        Bibliography::parse(source).map_err(|e| Error::Bibtex(e.to_string()))?;
    let mut items = IndexMap::new();
    for entry in bibliography.into_vec() {
        let item = convert_entry(&entry)?;
        items.insert(entry.key.clone(), item);
    }
    Ok(items)
}

fn field(entry: &Entry, name: &str) -> Option<String> {
    entry.get(name).map(|chunks| chunks.format_verbatim())
}

fn convert_entry(entry: &Entry) -> Result<BibliographicItem> {
    let mut item = BibliographicItem::new();
    // BibTeX's weakly-typed entry kinds upgrade to the schema vocabulary.
    let entry_type = entry.entry_type.to_string().to_lowercase();
    item.item_type = Some(
        match entry_type.as_str() {
            "misc" => "standard",
            "conference" => "inproceedings",
            "mastersthesis" | "phdthesis" => "thesis",
            other => other,
        }
        .to_string(),
    );
    item.docidentifier.push(DocumentIdentifier::new(entry.key.clone(), None, None));

    if let Some(title) = field(entry, "title") {
        item.title.0.push(TypedTitleString::new(
            Some("main".to_string()),
            FormattedString::plain_text(title),
        ));
    }
    item.edition = field(entry, "edition");
    convert_persons(entry, "author", "author", &mut item);
    convert_persons(entry, "editor", "editor", &mut item);
    convert_organizations(entry, &mut item);
    if let Some(address) = field(entry, "address") {
        item.place.push(Place::new(address));
    }
    convert_notes(entry, &mut item);
    if let Some(booktitle) = field(entry, "booktitle") {
        let mut host = BibliographicItem::new();
        host.title.0.push(TypedTitleString::new(
            Some("main".to_string()),
            FormattedString::plain_text(booktitle),
        ));
        item.relation.push(DocumentRelation::new("partOf", host));
    }
    convert_extent(entry, &mut item);
    convert_dates(entry, &mut item)?;
    convert_series(entry, &mut item)?;
    if let Some(value) = field(entry, "type") {
        item.classification.push(Classification::new(value, Some("type".to_string())));
    }
    if let Some(value) = field(entry, "mendeley-tags") {
        item.classification.push(Classification::new(value, Some("mendeley".to_string())));
    }
    if let Some(keywords) = field(entry, "keywords") {
        item.keyword =
            keywords.split(", ").map(LocalizedString::new).collect();
    }
    for scheme in ["isbn", "lccn", "issn"] {
        if let Some(id) = field(entry, scheme) {
            item.docidentifier.push(DocumentIdentifier::new(
                id,
                Some(scheme.to_string()),
                None,
            ));
        }
    }
    if let Some(language) = field(entry, "language") {
        item.language.push(language_code(&language));
    }
    item.fetched = field(entry, "timestamp")
        .and_then(|t| chrono::NaiveDate::parse_from_str(&t, "%Y-%m-%d").ok());
    for (name, link_type) in [("url", "src"), ("doi", "doi"), ("file2", "file")] {
        if let Some(content) = field(entry, name) {
            item.link.push(TypedUri::new(Some(link_type.to_string()), content));
        }
    }
    item.ensure_id();
    Ok(item)
}

fn convert_persons(entry: &Entry, name: &str, role: &str, item: &mut BibliographicItem) {
    let Some(chunks) = entry.get(name) else { return };
    for p in chunks.parse::<Vec<biblatex::Person>>().unwrap_or_default() {
        let mut full_name = FullName::with_surname(&p.name);
        if !p.given_name.is_empty() {
            full_name.forename.push(LocalizedString::new(p.given_name.clone()));
        }
        item.contributor.push(ContributionInfo::new(
            ContributorEntity::Person(Person::new(full_name)),
            vec![ContributorRole::new(role, Vec::new())],
        ));
    }
}

/// `publisher` keeps its role; the venue-ish fields all become
/// distributors with a "sponsor" description.
fn convert_organizations(entry: &Entry, item: &mut BibliographicItem) {
    if let Some(name) = field(entry, "publisher") {
        item.contributor.push(ContributionInfo::new(
            ContributorEntity::Organization(Organization::named(&name)),
            vec![ContributorRole::new("publisher", Vec::new())],
        ));
    }
    for source in ["institution", "organization", "school"] {
        if let Some(name) = field(entry, source) {
            item.contributor.push(ContributionInfo::new(
                ContributorEntity::Organization(Organization::named(&name)),
                vec![ContributorRole::new(
                    "distributor",
                    vec![FormattedString::plain_text("sponsor")],
                )],
            ));
        }
    }
}

fn convert_notes(entry: &Entry, item: &mut BibliographicItem) {
    for (name, note_type) in [
        ("annote", Some("annote")),
        ("howpublished", Some("howpublished")),
        ("comment", Some("comment")),
        ("content", Some("tableOfContents")),
        ("note", None),
    ] {
        if let Some(text) = field(entry, name) {
            item.biblionote.0.push(BiblioNote::new(
                FormattedString::plain_text(text),
                note_type.map(str::to_string),
            ));
        }
    }
}

fn convert_extent(entry: &Entry, item: &mut BibliographicItem) {
    if let Some(chapter) = field(entry, "chapter") {
        item.extent.push(BibItemLocality::new("chapter", chapter, None));
    }
    if let Some(pages) = field(entry, "pages") {
        // biblatex renders a parsed page range with an en dash
        let mut parts =
            pages.split(['-', '\u{2013}']).map(str::trim).filter(|p| !p.is_empty());
        if let Some(from) = parts.next() {
            item.extent.push(BibItemLocality::new(
                "page",
                from,
                parts.next().map(str::to_string),
            ));
        }
    }
    if let Some(volume) = field(entry, "volume") {
        item.extent.push(BibItemLocality::new("volume", volume, None));
    }
}

fn convert_dates(entry: &Entry, item: &mut BibliographicItem) -> Result<()> {
    if let Some(year) = field(entry, "year") {
        let month = field(entry, "month_numeric")
            .and_then(|m| m.parse::<u32>().ok())
            .or_else(|| {
                field(entry, "month").and_then(|m| {
                    let m = m.to_lowercase();
                    MONTHS.iter().position(|n| m.starts_with(n)).map(|i| i as u32 + 1)
                })
            });
        let on = match month {
            Some(m) => format!("{year}-{m:02}"),
            None => year,
        };
        item.date.push(BibliographicDate::new("published", Some(&on), None, None)?);
    }
    if let Some(urldate) = field(entry, "urldate") {
        item.date.push(BibliographicDate::new("accessed", Some(&urldate), None, None)?);
    }
    Ok(())
}

fn convert_series(entry: &Entry, item: &mut BibliographicItem) -> Result<()> {
    if let Some(journal) = field(entry, "journal") {
        let mut series = Series::new(
            Some("journal".to_string()),
            Some(TypedTitleString::new(None, FormattedString::plain_text(journal))),
            None,
        )?;
        series.number = field(entry, "number");
        item.series.push(series);
    }
    if let Some(title) = field(entry, "series") {
        match Series::titled(TypedTitleString::new(
            None,
            FormattedString::plain_text(title),
        )) {
            Ok(series) => item.series.push(series),
            Err(e) => warn!(error = %e, "invalid series"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOOK: &str = r#"@book{mybook,
  title = {My Book},
  author = {Nikolaev, Andrei and Doe, Jane},
  publisher = {Springer},
  year = {2014},
  month = {apr},
  isbn = {978-3-16-148410-0},
}"#;

    #[test]
    fn book_entry() {
        let items = from_bibtex(BOOK).unwrap();
        let item = &items["mybook"];
        assert_eq!(item.item_type.as_deref(), Some("book"));
        assert_eq!(item.title.main_title().unwrap().title.plain(), "My Book");
        assert_eq!(item.contributor.len(), 3);
        assert!(item.contributor[0].has_role("author"));
        assert!(item.contributor[2].has_role("publisher"));
        assert_eq!(item.date[0].on.as_deref(), Some("2014-04"));
        assert!(item
            .docidentifier
            .iter()
            .any(|d| d.id_type.as_deref() == Some("isbn")));
    }

    #[test]
    fn misc_upgrades_to_standard() {
        let items = from_bibtex("@misc{x, title = {T}}").unwrap();
        assert_eq!(items["x"].item_type.as_deref(), Some("standard"));
    }

    #[test]
    fn language_name_becomes_code() {
        let items = from_bibtex("@book{b, title = {T}, language = {English}}").unwrap();
        assert_eq!(items["b"].language, ["en"]);
    }

    #[test]
    fn techreport_institution_roundtrip() {
        let items = from_bibtex(
            "@techreport{r1, title = {T}, institution = {NIST}, pages = {10--20}}",
        )
        .unwrap();
        let item = &items["r1"];
        assert!(item.contributor[0].has_role("distributor"));
        let extent = &item.extent[0];
        assert_eq!(extent.reference_from, "10");
        assert_eq!(extent.reference_to.as_deref(), Some("20"));
    }
}
