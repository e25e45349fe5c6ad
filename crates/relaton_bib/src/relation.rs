/*
SPDX-License-Identifier: MPL-2.0
*/

use serde::Serialize;
use tracing::warn;

use crate::asciibib::push;
use crate::formatted_string::FormattedString;
use crate::item::{BibliographicItem, XmlOptions};
use crate::locality::{LocalityStack, SourceLocalityStack};
use crate::xml::{Element, XmlWriter};
use crate::Result;

const RELATION_TYPES: &[&str] = &[
    "includes",
    "includedIn",
    "hasPart",
    "partOf",
    "merges",
    "mergedInto",
    "splits",
    "splitInto",
    "instance",
    "hasInstance",
    "exemplarOf",
    "hasExemplar",
    "manifestationOf",
    "hasManifestation",
    "reproductionOf",
    "hasReproduction",
    "reprintOf",
    "hasReprint",
    "expressionOf",
    "hasExpression",
    "translatedFrom",
    "hasTranslation",
    "arrangementOf",
    "hasArrangement",
    "abridgementOf",
    "hasAbridgement",
    "annotationOf",
    "hasAnnotation",
    "draftOf",
    "hasDraft",
    "editionOf",
    "hasEdition",
    "updates",
    "updatedBy",
    "derivedFrom",
    "derives",
    "describes",
    "describedBy",
    "catalogues",
    "cataloguedBy",
    "hasSuccessor",
    "successorOf",
    "adaptedFrom",
    "hasAdaptation",
    "adoptedFrom",
    "adoptedAs",
    "reviewOf",
    "hasReview",
    "commentaryOf",
    "hasCommentary",
    "related",
    "complements",
    "complementOf",
    "obsoletes",
    "obsoletedBy",
    "cited",
    "isCitedIn",
];

/// A typed relation to another bibliographic item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRelation {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub bibitem: Box<BibliographicItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<FormattedString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locality: Vec<LocalityStack>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_locality: Vec<SourceLocalityStack>,
}

impl DocumentRelation {
    /// The legacy "Now withdrawn" label maps to `obsoletes`.
    pub fn new(relation_type: &str, bibitem: BibliographicItem) -> Self {
        let relation_type =
            if relation_type == "Now withdrawn" { "obsoletes" } else { relation_type };
        if !RELATION_TYPES.contains(&relation_type) {
            warn!(relation_type = %relation_type, "invalid relation type");
        }
        Self {
            relation_type: relation_type.to_string(),
            bibitem: Box::new(bibitem),
            description: None,
            locality: Vec::new(),
            source_locality: Vec::new(),
        }
    }

    pub fn to_xml(&self, w: &mut XmlWriter, opts: &XmlOptions) -> Result<()> {
        // Nested items always render as embedded bibitem roots.
        let mut opts = opts.clone();
        opts.bibdata = false;
        opts.note.clear();
        opts.embedded = true;
        Element::new("relation").attr("type", self.relation_type.as_str()).build(w, |w| {
            if let Some(description) = &self.description {
                description.to_xml(w, "description")?;
            }
            self.bibitem.to_xml_opts(w, &opts)?;
            for loc in &self.locality {
                loc.to_xml(w)?;
            }
            for loc in &self.source_locality {
                loc.to_xml(w)?;
            }
            Ok(())
        })
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
        let mut out = vec![format!("{pfx}type:: {}", self.relation_type)];
        if let Some(description) = &self.description {
            push(&mut out, description.to_asciibib(&format!("{pfx}description"), 1, false));
        }
        push(&mut out, self.bibitem.to_asciibib(&format!("{pfx}bibitem")));
        out.join("\n")
    }
}

/// Relations of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocRelationCollection(pub Vec<DocumentRelation>);

impl DocRelationCollection {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, relation: DocumentRelation) {
        self.0.push(relation);
    }

    /// Relations marking this item as a replacement.
    pub fn replaces(&self) -> Self {
        Self(self.0.iter().filter(|r| r.relation_type == "replace").cloned().collect())
    }

    pub fn to_xml(&self, w: &mut XmlWriter, opts: &XmlOptions) -> Result<()> {
        for r in &self.0 {
            r.to_xml(w, opts)?;
        }
        Ok(())
    }

    pub fn to_asciibib(&self, prefix: &str) -> String {
        let pfx =
            if prefix.is_empty() { "relation".to_string() } else { format!("{prefix}.relation") };
        let mut out = Vec::new();
        for r in &self.0 {
            if self.0.len() > 1 {
                out.push(format!("{pfx}::"));
            }
            push(&mut out, r.to_asciibib(&pfx));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withdrawn_maps_to_obsoletes() {
        let rel = DocumentRelation::new("Now withdrawn", BibliographicItem::default());
        assert_eq!(rel.relation_type, "obsoletes");
    }

    #[test]
    fn replaces_filters_by_type() {
        let coll = DocRelationCollection(vec![
            DocumentRelation::new("updates", BibliographicItem::default()),
            DocumentRelation::new("replace", BibliographicItem::default()),
        ]);
        assert_eq!(coll.replaces().len(), 1);
    }
}
