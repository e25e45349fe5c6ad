/*
SPDX-License-Identifier: MPL-2.0
*/

//! A typed model for bibliographic records (the Relaton schema) with
//! bidirectional converters: an XML dialect, BibTeX, the flat AsciiBib
//! text format, and xml2rfc `<reference>` output, plus parsing from
//! generic nested maps (parsed JSON/YAML).
//!
//! The aggregate root is [`BibliographicItem`]; entities below it are
//! plain value types with their own per-format rendering rules. Parsing
//! accepts loose input shapes (strings vs. records, singular vs. plural
//! fields) and normalizes them into one canonical in-memory form.
//!
//! ```
//! use relaton_bib::parser;
//!
//! let item = parser::from_yaml("docid:\n  id: ISO 123\n  type: ISO\n")?
//!     .expect("a map");
//! assert_eq!(item.id.as_deref(), Some("ISO123"));
//! let xml = item.to_xml()?;
//! assert!(xml.starts_with("<bibitem"));
//! # Ok::<(), relaton_bib::Error>(())
//! ```

mod asciibib;
mod classification;
mod contributor;
mod copyright;
mod date;
mod editorial_group;
mod error;
mod formatted_string;
mod ics;
mod identifier;
mod item;
mod locality;
mod localized_string;
mod medium;
mod note;
mod organization;
pub mod parser;
mod person;
mod place;
mod relation;
mod series;
mod status;
mod title;
mod typed_uri;
mod validity;
mod version;
mod xml;

pub use classification::Classification;
pub use contributor::{
    Address, Contact, ContactInfo, ContributionInfo, ContributorEntity, ContributorRole,
};
pub use copyright::CopyrightAssociation;
pub use date::{BibliographicDate, DateFormat, NO_YEAR};
pub use editorial_group::{EditorialGroup, TechnicalCommittee, WorkGroup};
pub use error::{Error, Result};
pub use formatted_string::{FormattedRef, FormattedString};
pub use ics::Ics;
pub use identifier::{
    id_type, DocumentIdentifier, StructuredIdentifier, StructuredIdentifierCollection,
};
pub use item::{
    BibliographicItem, ExtraNote, ShortrefOptions, XmlOptions, ITEM_TYPES,
};
pub use locality::{
    BibItemLocality, Locality, LocalityStack, LocalityType, SourceLocality,
    SourceLocalityStack,
};
pub use localized_string::{LocalizedString, LocalizedStringContent};
pub use medium::Medium;
pub use note::{BiblioNote, BiblioNoteCollection};
pub use organization::{OrgIdentifier, Organization};
pub use person::{Affiliation, FullName, Person, PersonIdentifier};
pub use place::Place;
pub use relation::{DocRelationCollection, DocumentRelation};
pub use series::Series;
pub use status::{DocumentStatus, Stage};
pub use title::{TypedTitleString, TypedTitleStringCollection};
pub use typed_uri::TypedUri;
pub use validity::{Validity, VALIDITY_FORMAT};
pub use version::BibliographicItemVersion;
