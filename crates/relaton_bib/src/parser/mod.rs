/*
SPDX-License-Identifier: MPL-2.0
*/

//! Parsers reconstructing a [`BibliographicItem`] from an external
//! representation: a generic nested map, the XML dialect, or BibTeX.
//!
//! [`BibliographicItem`]: crate::BibliographicItem

pub mod bibtex;
pub mod dict;
pub mod xml;

pub use bibtex::from_bibtex;
pub use dict::{from_dict, from_json, from_yaml};
pub use xml::from_xml;
