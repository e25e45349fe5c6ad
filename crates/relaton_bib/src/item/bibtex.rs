/*
SPDX-License-Identifier: MPL-2.0
*/

//! BibTeX rendering of a bibliographic item.

use super::BibliographicItem;
use crate::contributor::ContributionInfo;
use crate::locality::LocalityType;

const MONTHS: &[&str] =
    &["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

/// Accumulates fields in display order; BibTeX readers do not care
/// about ordering but diffs do.
#[derive(Default)]
struct BibtexFields(Vec<(&'static str, String)>);

impl BibtexFields {
    fn set(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.push((key, value.into()));
    }

    fn set_opt(&mut self, key: &'static str, value: Option<impl Into<String>>) {
        if let Some(v) = value {
            self.set(key, v);
        }
    }
}

impl BibliographicItem {
    /// Renders the item as a single BibTeX entry. The entry type falls
    /// back to `misc` when the item type is unset or has no BibTeX
    /// counterpart.
    pub fn to_bibtex(&self) -> String {
        let entry_type = match self.item_type.as_deref() {
            None | Some("standard") => "misc",
            Some(t) => t,
        };
        let key = self
            .id
            .clone()
            .or_else(|| self.docnumber.clone())
            .unwrap_or_else(|| "unknown".to_string());

        let mut fields = BibtexFields::default();
        self.bibtex_title(&mut fields);
        fields.set_opt("edition", self.edition.clone());
        self.bibtex_author(&mut fields);
        self.bibtex_contributor(entry_type, &mut fields);
        fields.set_opt("address", self.place.first().map(|p| p.name.clone()));
        self.bibtex_note(&mut fields);
        self.bibtex_relation(&mut fields);
        self.bibtex_extent(&mut fields);
        self.bibtex_date(&mut fields);
        self.bibtex_series(&mut fields);
        self.bibtex_classification(&mut fields);
        if !self.keyword.is_empty() {
            let keywords =
                self.keyword.iter().map(|k| k.plain()).collect::<Vec<_>>().join(", ");
            fields.set("keywords", keywords);
        }
        self.bibtex_docidentifier(&mut fields);
        if let Some(fetched) = &self.fetched {
            fields.set("timestamp", fetched.format("%Y-%m-%d").to_string());
        }
        self.bibtex_link(&mut fields);

        let mut out = format!("@{entry_type}{{{key}");
        for (name, value) in &fields.0 {
            // month abbreviations stay unquoted so readers expand them
            if *name == "month" {
                out.push_str(&format!(",\n  {name} = {value}"));
            } else {
                out.push_str(&format!(",\n  {name} = {{{value}}}"));
            }
        }
        out.push_str("\n}\n");
        out
    }

    fn bibtex_title(&self, fields: &mut BibtexFields) {
        if let Some(title) = self.title.main_title() {
            fields.set("title", title.title.plain());
        }
    }

    fn bibtex_author(&self, fields: &mut BibtexFields) {
        let authors: Vec<String> = self
            .contributor
            .iter()
            .filter(|c| c.has_role("author"))
            .filter_map(|c| c.entity.as_person())
            .map(|p| {
                if let Some(surname) = &p.name.surname {
                    let forenames = p
                        .name
                        .forename
                        .iter()
                        .map(|f| f.plain())
                        .collect::<Vec<_>>()
                        .join(" ");
                    if forenames.is_empty() {
                        surname.plain().to_string()
                    } else {
                        format!("{}, {forenames}", surname.plain())
                    }
                } else {
                    p.name.completename.as_ref().map(|c| c.plain()).unwrap_or("").to_string()
                }
            })
            .collect();
        if !authors.is_empty() {
            fields.set("author", authors.join(" and "));
        }
    }

    fn bibtex_contributor(&self, entry_type: &str, fields: &mut BibtexFields) {
        for c in &self.contributor {
            if c.has_role("publisher") {
                fields.set_opt("publisher", Self::org_name(c));
            }
            if c.has_role("distributor") {
                match entry_type {
                    "techreport" => fields.set_opt("institution", Self::org_name(c)),
                    "inproceedings" | "conference" | "manual" | "proceedings" => {
                        fields.set_opt("organization", Self::org_name(c));
                    }
                    "mastersthesis" | "phdthesis" | "thesis" => {
                        fields.set_opt("school", Self::org_name(c));
                    }
                    _ => {}
                }
            }
        }
    }

    fn org_name(c: &ContributionInfo) -> Option<String> {
        c.entity.as_organization().and_then(|o| o.name.first()).map(|n| n.plain().to_string())
    }

    fn bibtex_note(&self, fields: &mut BibtexFields) {
        for note in &self.biblionote.0 {
            let key = match note.note_type.as_deref() {
                Some("annote") => "annote",
                Some("howpublished") => "howpublished",
                Some("comment") => "comment",
                Some("tableOfContents") => "content",
                None => "note",
                _ => continue,
            };
            fields.set(key, note.content.plain());
        }
    }

    fn bibtex_relation(&self, fields: &mut BibtexFields) {
        for rel in &self.relation.0 {
            if rel.relation_type == "partOf" {
                if let Some(title) = rel.bibitem.title.main_title() {
                    fields.set("booktitle", title.title.plain());
                }
            }
        }
    }

    fn bibtex_extent(&self, fields: &mut BibtexFields) {
        for extent in &self.extent {
            match &extent.locality_type {
                LocalityType::Chapter => fields.set("chapter", extent.reference_from.clone()),
                LocalityType::Page => {
                    let mut pages = extent.reference_from.clone();
                    if let Some(to) = &extent.reference_to {
                        pages.push_str(&format!("-{to}"));
                    }
                    fields.set("pages", pages);
                }
                LocalityType::Volume => fields.set("volume", extent.reference_from.clone()),
                _ => {}
            }
        }
    }

    fn bibtex_date(&self, fields: &mut BibtexFields) {
        for date in &self.date {
            match date.date_type.as_str() {
                "published" => {
                    fields.set_opt("year", date.year());
                    // calendar-invalid months pass parsing, so bounds-check
                    if let Some(month) = date.month().filter(|m| (1..=12).contains(m)) {
                        if let Some(name) = MONTHS.get(month as usize - 1) {
                            fields.set("month", *name);
                        }
                        fields.set("month_numeric", month.to_string());
                    }
                }
                "accessed" => fields.set_opt("urldate", date.on.clone()),
                _ => {}
            }
        }
    }

    fn bibtex_series(&self, fields: &mut BibtexFields) {
        for series in &self.series {
            let title = series.title.as_ref().map(|t| t.title.plain().to_string());
            match series.series_type.as_deref() {
                Some("journal") => {
                    fields.set_opt("journal", title);
                    fields.set_opt("number", series.number.clone());
                }
                None => fields.set_opt("series", title),
                _ => {}
            }
        }
    }

    fn bibtex_classification(&self, fields: &mut BibtexFields) {
        for c in &self.classification {
            match c.class_type.as_deref() {
                Some("type") => fields.set("type", c.value.clone()),
                Some("mendeley") => fields.set("mendeley-tags", c.value.clone()),
                _ => {}
            }
        }
    }

    fn bibtex_docidentifier(&self, fields: &mut BibtexFields) {
        for di in &self.docidentifier {
            match di.id_type.as_deref() {
                Some("isbn") => fields.set("isbn", di.id.clone()),
                Some("lccn") => fields.set("lccn", di.id.clone()),
                Some("issn") => fields.set("issn", di.id.clone()),
                _ => {}
            }
        }
    }

    fn bibtex_link(&self, fields: &mut BibtexFields) {
        for link in &self.link {
            match link.uri_type.as_deref() {
                Some("src") => fields.set("url", link.content.clone()),
                Some("doi") => fields.set("doi", link.content.clone()),
                Some("file") => fields.set("file2", link.content.clone()),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributor::{ContributionInfo, ContributorEntity, ContributorRole};
    use crate::date::BibliographicDate;
    use crate::formatted_string::FormattedString;
    use crate::identifier::DocumentIdentifier;
    use crate::locality::BibItemLocality;
    use crate::person::{FullName, Person};
    use crate::title::TypedTitleString;

    #[test]
    fn misc_entry_with_author_and_year() {
        let mut item = BibliographicItem::new();
        item.id = Some("mybook".to_string());
        item.title.0.push(TypedTitleString::new(
            Some("main".to_string()),
            FormattedString::plain_text("My Book"),
        ));
        let mut name = FullName::with_surname("Nikolaev");
        name.forename.push(crate::LocalizedString::new("Andrei"));
        item.contributor.push(ContributionInfo::new(
            ContributorEntity::Person(Person::new(name)),
            vec![ContributorRole::new("author", Vec::new())],
        ));
        item.date.push(BibliographicDate::published("2014-04").unwrap());
        let bibtex = item.to_bibtex();
        assert_eq!(
            bibtex,
            "@misc{mybook,\n  title = {My Book},\n  author = {Nikolaev, Andrei},\n  \
             year = {2014},\n  month = apr,\n  month_numeric = {4}\n}\n"
        );
    }

    #[test]
    fn standard_maps_to_misc() {
        let mut item = BibliographicItem::new();
        item.item_type = Some("standard".to_string());
        item.docnumber = Some("ISO1".to_string());
        assert!(item.to_bibtex().starts_with("@misc{ISO1"));
    }

    #[test]
    fn pages_from_extent() {
        let mut item = BibliographicItem::new();
        item.id = Some("a".to_string());
        item.extent.push(BibItemLocality::new("page", "10", Some("20".to_string())));
        assert!(item.to_bibtex().contains("pages = {10-20}"));
    }

    #[test]
    fn zero_month_is_skipped() {
        let mut item = BibliographicItem::new();
        item.id = Some("a".to_string());
        item.date.push(BibliographicDate::published("2014-00").unwrap());
        let bibtex = item.to_bibtex();
        assert!(bibtex.contains("year = {2014}"));
        assert!(!bibtex.contains("month"));
    }

    #[test]
    fn identifier_schemes() {
        let mut item = BibliographicItem::new();
        item.id = Some("a".to_string());
        item.docidentifier.push(DocumentIdentifier::new(
            "978-3-16",
            Some("isbn".to_string()),
            None,
        ));
        assert!(item.to_bibtex().contains("isbn = {978-3-16}"));
    }
}
