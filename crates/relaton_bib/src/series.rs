/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;
use tracing::warn;

use crate::asciibib::push;
use crate::formatted_string::FormattedRef;
use crate::localized_string::LocalizedString;
use crate::title::TypedTitleString;
use crate::xml::{text_element, Element, XmlWriter};
use crate::{Error, Result};

const SERIES_TYPES: &[&str] = &["main", "alt", "journal"];

/// A series the item belongs to. Either a title or a formatted reference
/// must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub series_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formattedref: Option<FormattedRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TypedTitleString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<LocalizedString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnumber: Option<String>,
}

impl Series {
    pub fn new(
        series_type: Option<String>,
        title: Option<TypedTitleString>,
        formattedref: Option<FormattedRef>,
    ) -> Result<Self> {
        if title.is_none() && formattedref.is_none() {
            return Err(Error::InvalidSeries);
        }
        if let Some(t) = &series_type {
            if !SERIES_TYPES.contains(&t.as_str()) {
                warn!(series_type = %t, "invalid series type");
            }
        }
        Ok(Self {
            series_type,
            formattedref,
            title,
            place: None,
            organization: None,
            abbreviation: None,
            from: None,
            to: None,
            number: None,
            partnumber: None,
        })
    }

    pub fn titled(title: TypedTitleString) -> Result<Self> {
        Self::new(None, Some(title), None)
    }

    pub fn to_xml(&self, w: &mut XmlWriter) -> Result<()> {
        Element::new("series").attr_opt("type", self.series_type.as_deref()).build(w, |w| {
            if let Some(fref) = &self.formattedref {
                return fref.to_xml(w);
            }
            if let Some(title) = &self.title {
                title.to_xml(w)?;
            }
            if let Some(place) = &self.place {
                text_element(w, "place", place)?;
            }
            if let Some(org) = &self.organization {
                text_element(w, "organization", org)?;
            }
            if let Some(abbr) = &self.abbreviation {
                abbr.to_xml(w, "abbreviation")?;
            }
            if let Some(from) = &self.from {
                text_element(w, "from", from)?;
            }
            if let Some(to) = &self.to {
                text_element(w, "to", to)?;
            }
            if let Some(number) = &self.number {
                text_element(w, "number", number)?;
            }
            if let Some(partnumber) = &self.partnumber {
                text_element(w, "partnumber", partnumber)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str, count: usize) -> String {
        let pfx = if prefix.is_empty() { "series".to_string() } else { format!("{prefix}.series") };
        let mut out = Vec::new();
        if count > 1 {
            out.push(format!("{pfx}::"));
        }
        if let Some(t) = &self.series_type {
            out.push(format!("{pfx}.type:: {t}"));
        }
        if let Some(fref) = &self.formattedref {
            push(&mut out, fref.to_asciibib(&pfx));
        }
        if let Some(title) = &self.title {
            push(&mut out, title.to_asciibib(&pfx, 1));
        }
        if let Some(place) = &self.place {
            out.push(format!("{pfx}.place:: {place}"));
        }
        if let Some(org) = &self.organization {
            out.push(format!("{pfx}.organization:: {org}"));
        }
        if let Some(abbr) = &self.abbreviation {
            push(&mut out, abbr.to_asciibib(&format!("{pfx}.abbreviation"), 1, false));
        }
        if let Some(from) = &self.from {
            out.push(format!("{pfx}.from:: {from}"));
        }
        if let Some(to) = &self.to {
            out.push(format!("{pfx}.to:: {to}"));
        }
        if let Some(number) = &self.number {
            out.push(format!("{pfx}.number:: {number}"));
        }
        if let Some(partnumber) = &self.partnumber {
            out.push(format!("{pfx}.partnumber:: {partnumber}"));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatted_string::FormattedString;
    use crate::xml;

    fn title(content: &str) -> TypedTitleString {
        TypedTitleString::new(
            Some("main".to_string()),
            FormattedString::new(LocalizedString::new(content), None),
        )
    }

    #[test]
    fn requires_title_or_formattedref() {
        assert!(Series::new(None, None, None).is_err());
    }

    #[test]
    fn titled_series_to_xml() {
        let mut series =
            Series::new(Some("journal".to_string()), Some(title("Journal")), None).unwrap();
        series.number = Some("7".to_string());
        let rendered = xml::render(|w| series.to_xml(w)).unwrap();
        assert_eq!(
            rendered,
            concat!(
                r#"<series type="journal"><title type="main">Journal</title>"#,
                "<number>7</number></series>"
            )
        );
    }

    #[test]
    fn formattedref_replaces_body() {
        let fref = FormattedRef(FormattedString::new(LocalizedString::new("ISO 712"), None));
        let series = Series::new(None, None, Some(fref)).unwrap();
        let rendered = xml::render(|w| series.to_xml(w)).unwrap();
        assert_eq!(rendered, "<series><formattedref>ISO 712</formattedref></series>");
    }

    #[test]
    fn asciibib_lines() {
        let series = Series::new(Some("main".to_string()), Some(title("Series")), None).unwrap();
        assert_eq!(
            series.to_asciibib("", 1),
            "series.type:: main\nseries.title.type:: main\nseries.title.content:: Series"
        );
    }
}
