/*
SPDX-License-Identifier: MPL-2.0
*/

use thiserror::Error;

/// Errors raised while constructing or converting bibliographic records.
///
/// Only structurally unrepresentable records produce an error; unknown
/// vocabulary values are logged and kept as-is so that plausible upstream
/// extensions survive ingestion.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid localized string content")]
    InvalidLocalizedString,

    #[error("should be given surname or completename")]
    IncompleteName,

    #[error("organization name is required")]
    MissingOrgName,

    #[error("invalid person identifier type: {0}")]
    InvalidPersonIdentifierType(String),

    #[error("at least one copyright owner should exist")]
    MissingCopyrightOwner,

    #[error("date should have either on or from attribute")]
    MissingDate,

    #[error("series should have either title or formattedref")]
    InvalidSeries,

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("BibTeX error: {0}")]
    Bibtex(String),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
