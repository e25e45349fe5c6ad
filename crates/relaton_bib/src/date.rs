/*
SPDX-License-Identifier: MPL-2.0
*/

//! Bibliographic dates keep their original granularity: a year, a
//! year-month or a full date, stored as a normalized string.

use std::str::FromStr;

use chrono::Month;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::xml::{text_element, Element, XmlWriter};
use crate::{Error, Result};

/// Placeholder rendered instead of a date when the year is suppressed.
pub const NO_YEAR: &str = "--";

const DATE_TYPES: &[&str] = &[
    "published",
    "accessed",
    "created",
    "implemented",
    "obsoleted",
    "confirmed",
    "updated",
    "issued",
    "transmitted",
    "copied",
    "unchanged",
    "circulated",
    "adapted",
    "vote-started",
    "vote-ended",
];

/// Output granularity for [`BibliographicDate::to_xml`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `%Y-%m`
    Short,
    /// `%Y-%m-%d`
    Full,
}

static RE_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w+)\s(\d{4})").unwrap());
static RE_MONTH_DAY_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s(\d{1,2}),\s(\d{4})").unwrap());
static RE_YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());
static RE_YM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}").unwrap());
static RE_Y: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}").unwrap());

/// Normalizes a date string to `%Y`, `%Y-%m` or `%Y-%m-%d`, keeping the
/// input's granularity. Month names ("November 2014", "July 1, 2018") are
/// converted to numeric form. Unrecognized input passes through unchanged.
pub fn parse_date(date: &str) -> String {
    if let Some(caps) = RE_MONTH_DAY_YEAR.captures(date) {
        if let Ok(month) = Month::from_str(&caps[1]) {
            if let Ok(day) = caps[2].parse::<u32>() {
                return format!("{}-{:02}-{:02}", &caps[3], month.number_from_month(), day);
            }
        }
    }
    if let Some(caps) = RE_MONTH_YEAR.captures(date) {
        if let Ok(month) = Month::from_str(&caps[1]) {
            return format!("{}-{:02}", &caps[2], month.number_from_month());
        }
    }
    for re in [&RE_YMD, &RE_YM, &RE_Y] {
        if let Some(m) = re.find(date) {
            return m.as_str().to_string();
        }
    }
    date.to_string()
}

/// A date of a given type attached to a bibliographic item.
///
/// Either `on` or `from` must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BibliographicDate {
    #[serde(rename = "type")]
    pub date_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl BibliographicDate {
    pub fn new(
        date_type: impl Into<String>,
        on: Option<&str>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self> {
        let date_type = date_type.into();
        if !DATE_TYPES.contains(&date_type.as_str()) {
            warn!(date_type = %date_type, "invalid bibliographic date type");
        }
        if on.is_none() && from.is_none() {
            return Err(Error::MissingDate);
        }
        Ok(Self {
            date_type,
            on: on.map(parse_date),
            from: from.map(parse_date),
            to: to.map(parse_date),
        })
    }

    pub fn published(on: &str) -> Result<Self> {
        Self::new("published", Some(on), None, None)
    }

    /// Year portion of `on`, when it starts with one.
    pub fn year(&self) -> Option<&str> {
        self.on.as_deref().filter(|on| RE_Y.is_match(on)).map(|on| &on[..4])
    }

    /// Numeric month portion of `on`, when present.
    pub fn month(&self) -> Option<u32> {
        self.on.as_deref().and_then(|on| {
            if RE_YM.is_match(on) {
                on[5..7].parse().ok()
            } else {
                None
            }
        })
    }

    fn format_date(date: &str, format: Option<DateFormat>) -> String {
        let Some(format) = format else {
            return date.to_string();
        };
        // Re-expressing granularity: missing month/day default to 01.
        let (year, month, day) = if RE_YMD.is_match(date) {
            (&date[..4], &date[5..7], &date[8..10])
        } else if RE_YM.is_match(date) {
            (&date[..4], &date[5..7], "01")
        } else if RE_Y.is_match(date) {
            (&date[..4], "01", "01")
        } else {
            return date.to_string();
        };
        match format {
            DateFormat::Short => format!("{year}-{month}"),
            DateFormat::Full => format!("{year}-{month}-{day}"),
        }
    }

    pub fn to_xml(
        &self,
        w: &mut XmlWriter,
        format: Option<DateFormat>,
        no_year: bool,
    ) -> Result<()> {
        Element::new("date").attr("type", self.date_type.as_str()).build(w, |w| {
            if let Some(on) = &self.on {
                let text =
                    if no_year { NO_YEAR.to_string() } else { Self::format_date(on, format) };
                text_element(w, "on", &text)?;
            } else if let Some(from) = &self.from {
                if no_year {
                    text_element(w, "from", NO_YEAR)?;
                } else {
                    text_element(w, "from", &Self::format_date(from, format))?;
                    if let Some(to) = &self.to {
                        text_element(w, "to", &Self::format_date(to, format))?;
                    }
                }
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}date::"));
        }
        out.push(format!("{pfx}date.type:: {}", self.date_type));
        if let Some(on) = &self.on {
            out.push(format!("{pfx}date.on:: {on}"));
        }
        if let Some(from) = &self.from {
            out.push(format!("{pfx}date.from:: {from}"));
        }
        if let Some(to) = &self.to {
            out.push(format!("{pfx}date.to:: {to}"));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn render(date: &BibliographicDate, format: Option<DateFormat>, no_year: bool) -> String {
        xml::render(|w| date.to_xml(w, format, no_year)).unwrap()
    }

    #[test]
    fn month_name_normalized() {
        let date = BibliographicDate::published("November 2014").unwrap();
        assert_eq!(date.on.as_deref(), Some("2014-11"));
    }

    #[test]
    fn month_day_year_normalized() {
        let date = BibliographicDate::published("July 1, 2018").unwrap();
        assert_eq!(date.on.as_deref(), Some("2018-07-01"));
    }

    #[test]
    fn requires_on_or_from() {
        assert!(BibliographicDate::new("published", None, None, None).is_err());
    }

    #[test]
    fn on_to_xml() {
        let date = BibliographicDate::published("November 2014").unwrap();
        assert_eq!(render(&date, None, false), r#"<date type="published"><on>2014-11</on></date>"#);
    }

    #[test]
    fn full_format_pads_missing_parts() {
        let date = BibliographicDate::published("November 2014").unwrap();
        assert_eq!(
            render(&date, Some(DateFormat::Full), false),
            r#"<date type="published"><on>2014-11-01</on></date>"#
        );

        let year_only = BibliographicDate::new("accessed", Some("2014"), None, None).unwrap();
        assert_eq!(
            render(&year_only, Some(DateFormat::Full), false),
            r#"<date type="accessed"><on>2014-01-01</on></date>"#
        );
    }

    #[test]
    fn short_format_keeps_year_month() {
        let date =
            BibliographicDate::new("adapted", None, Some("2014-11"), Some("2015-12")).unwrap();
        assert_eq!(
            render(&date, Some(DateFormat::Short), false),
            r#"<date type="adapted"><from>2014-11</from><to>2015-12</to></date>"#
        );
    }

    #[test]
    fn no_year_placeholder() {
        let date = BibliographicDate::published("2014-11-03").unwrap();
        assert_eq!(render(&date, None, true), r#"<date type="published"><on>--</on></date>"#);
    }

    #[test]
    fn year_and_month_accessors() {
        let date = BibliographicDate::published("2014-11-03").unwrap();
        assert_eq!(date.year(), Some("2014"));
        assert_eq!(date.month(), Some(11));

        let year_only = BibliographicDate::published("2014").unwrap();
        assert_eq!(year_only.year(), Some("2014"));
        assert_eq!(year_only.month(), None);
    }

    #[test]
    fn asciibib_lines() {
        let date =
            BibliographicDate::new("copied", None, Some("2014-11"), Some("2015-12")).unwrap();
        assert_eq!(
            date.to_asciibib("", 1),
            "date.type:: copied\ndate.from:: 2014-11\ndate.to:: 2015-12"
        );
    }
}
