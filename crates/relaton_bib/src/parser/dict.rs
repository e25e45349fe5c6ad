/*
SPDX-License-Identifier: MPL-2.0
*/

//! Parsing from a generic nested-map representation (parsed JSON/YAML).
//!
//! Input shapes are loose: many fields accept a bare string, a single
//! record or a list, and all of them normalize to the canonical list
//! form before the typed entities are constructed.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use tracing::warn;

use crate::classification::Classification;
use crate::contributor::{
    Address, Contact, ContactInfo, ContributionInfo, ContributorEntity, ContributorRole,
};
use crate::copyright::CopyrightAssociation;
use crate::date::BibliographicDate;
use crate::editorial_group::{EditorialGroup, TechnicalCommittee, WorkGroup};
use crate::formatted_string::{FormattedRef, FormattedString};
use crate::ics::Ics;
use crate::identifier::{
    DocumentIdentifier, StructuredIdentifier, StructuredIdentifierCollection,
};
use crate::item::BibliographicItem;
use crate::locality::{
    BibItemLocality, Locality, LocalityStack, SourceLocality, SourceLocalityStack,
};
use crate::localized_string::LocalizedString;
use crate::medium::Medium;
use crate::note::{BiblioNote, BiblioNoteCollection};
use crate::organization::{OrgIdentifier, Organization};
use crate::person::{Affiliation, FullName, Person, PersonIdentifier};
use crate::place::Place;
use crate::relation::{DocRelationCollection, DocumentRelation};
use crate::series::Series;
use crate::status::{DocumentStatus, Stage};
use crate::title::{TypedTitleString, TypedTitleStringCollection};
use crate::typed_uri::TypedUri;
use crate::validity::{Validity, VALIDITY_FORMAT};
use crate::version::BibliographicItemVersion;
use crate::Result;

/// Builds an item from an already-parsed map. Non-map input yields
/// `None` with a warning rather than an error.
pub fn from_dict(value: &serde_json::Value) -> Result<Option<BibliographicItem>> {
    if !value.is_object() {
        warn!("bibliographic item source is not a map");
        return Ok(None);
    }
    let dict: ItemDict = serde_json::from_value(value.clone())?;
    Ok(Some(dict.into_item()?))
}

pub fn from_json(source: &str) -> Result<Option<BibliographicItem>> {
    let value: serde_json::Value = serde_json::from_str(source)?;
    from_dict(&value)
}

pub fn from_yaml(source: &str) -> Result<Option<BibliographicItem>> {
    let value: serde_json::Value = serde_yaml::from_str(source)?;
    from_dict(&value)
}

/// A field that may arrive as one value or a list of values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(v) => v,
            Self::One(v) => vec![v],
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

fn many<T>(field: Option<OneOrMany<T>>) -> Vec<T> {
    field.map(OneOrMany::into_vec).unwrap_or_default()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalizedStringDict {
    Str(String),
    Record {
        content: String,
        #[serde(default)]
        language: Option<OneOrMany<String>>,
        #[serde(default)]
        script: Option<OneOrMany<String>>,
    },
    Variants(Vec<LocalizedStringDict>),
}

impl LocalizedStringDict {
    fn into_localized(self) -> Result<LocalizedString> {
        match self {
            Self::Str(s) => Ok(LocalizedString::new(s)),
            Self::Record { content, language, script } => {
                let mut ls = LocalizedString::new(content);
                ls.language = many(language);
                ls.script = many(script);
                Ok(ls)
            }
            Self::Variants(variants) => {
                let variants = variants
                    .into_iter()
                    .map(Self::into_localized)
                    .collect::<Result<Vec<_>>>()?;
                LocalizedString::from_variants(variants)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FormattedStringDict {
    Str(String),
    Record {
        content: String,
        #[serde(default)]
        language: Option<OneOrMany<String>>,
        #[serde(default)]
        script: Option<OneOrMany<String>>,
        #[serde(default)]
        format: Option<String>,
    },
}

impl FormattedStringDict {
    fn into_formatted(self) -> FormattedString {
        match self {
            Self::Str(s) => FormattedString::plain_text(s),
            Self::Record { content, language, script, format } => {
                let mut ls = LocalizedString::new(content);
                ls.language = many(language);
                ls.script = many(script);
                FormattedString::new(ls, format.or_else(|| Some("text/plain".to_string())))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct TitleDict {
    #[serde(rename = "type", default)]
    title_type: Option<String>,
    content: String,
    #[serde(default)]
    language: Option<OneOrMany<String>>,
    #[serde(default)]
    script: Option<OneOrMany<String>>,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TitleEntry {
    Str(String),
    Record(TitleDict),
}

impl TitleEntry {
    /// A bare string goes through the intro/main/part splitter.
    fn into_titles(self) -> Vec<TypedTitleString> {
        match self {
            Self::Str(s) => TypedTitleString::from_string(&s, None, None).0,
            Self::Record(r) => {
                let mut ls = LocalizedString::new(r.content);
                ls.language = many(r.language);
                ls.script = many(r.script);
                vec![TypedTitleString::new(r.title_type, FormattedString::new(ls, r.format))]
            }
        }
    }

    fn into_single(self) -> TypedTitleString {
        match self {
            Self::Str(s) => {
                TypedTitleString::new(None, FormattedString::plain_text(s))
            }
            Self::Record(r) => {
                let mut ls = LocalizedString::new(r.content);
                ls.language = many(r.language);
                ls.script = many(r.script);
                TypedTitleString::new(r.title_type, FormattedString::new(ls, r.format))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DocidEntry {
    Str(String),
    Record {
        id: String,
        #[serde(rename = "type", default)]
        id_type: Option<String>,
        #[serde(default)]
        scope: Option<String>,
    },
}

impl From<DocidEntry> for DocumentIdentifier {
    fn from(entry: DocidEntry) -> Self {
        match entry {
            DocidEntry::Str(id) => DocumentIdentifier::new(id, None, None),
            DocidEntry::Record { id, id_type, scope } => {
                DocumentIdentifier::new(id, id_type, scope)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct DateDict {
    #[serde(rename = "type")]
    date_type: String,
    #[serde(alias = "value", default)]
    on: Option<String>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
}

impl DateDict {
    fn into_date(self) -> Result<BibliographicDate> {
        BibliographicDate::new(
            self.date_type,
            self.on.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoleEntry {
    Str(String),
    Record {
        #[serde(rename = "type")]
        role_type: String,
        #[serde(default)]
        description: Option<OneOrMany<FormattedStringDict>>,
    },
}

impl From<RoleEntry> for ContributorRole {
    fn from(entry: RoleEntry) -> Self {
        match entry {
            RoleEntry::Str(t) => ContributorRole::new(t, Vec::new()),
            RoleEntry::Record { role_type, description } => {
                let description = many(description)
                    .into_iter()
                    .map(FormattedStringDict::into_formatted)
                    .collect();
                ContributorRole::new(role_type, description)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContactEntry {
    Typed {
        #[serde(rename = "type")]
        contact_type: String,
        value: String,
    },
    Address {
        #[serde(default)]
        street: Option<OneOrMany<String>>,
        city: String,
        #[serde(default)]
        state: Option<String>,
        country: String,
        #[serde(default)]
        postcode: Option<String>,
    },
}

impl From<ContactEntry> for ContactInfo {
    fn from(entry: ContactEntry) -> Self {
        match entry {
            ContactEntry::Typed { contact_type, value } => {
                ContactInfo::Contact(Contact::new(contact_type, value))
            }
            ContactEntry::Address { street, city, state, country, postcode } => {
                ContactInfo::Address(Address {
                    street: many(street),
                    city,
                    state,
                    country,
                    postcode,
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrgIdentifierDict {
    #[serde(rename = "type")]
    id_type: String,
    #[serde(alias = "value", alias = "id")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct OrganizationDict {
    name: OneOrMany<LocalizedStringDict>,
    #[serde(default)]
    abbreviation: Option<LocalizedStringDict>,
    #[serde(default)]
    subdivision: Option<OneOrMany<LocalizedStringDict>>,
    #[serde(default)]
    identifier: Option<OneOrMany<OrgIdentifierDict>>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    contact: Option<OneOrMany<ContactEntry>>,
}

impl OrganizationDict {
    fn into_organization(self) -> Result<Organization> {
        let name = self
            .name
            .into_vec()
            .into_iter()
            .map(LocalizedStringDict::into_localized)
            .collect::<Result<Vec<_>>>()?;
        let mut org = Organization::new(name)?;
        org.abbreviation =
            self.abbreviation.map(LocalizedStringDict::into_localized).transpose()?;
        org.subdivision = many(self.subdivision)
            .into_iter()
            .map(LocalizedStringDict::into_localized)
            .collect::<Result<Vec<_>>>()?;
        org.identifier = many(self.identifier)
            .into_iter()
            .map(|i| OrgIdentifier::new(i.id_type, i.value))
            .collect();
        org.uri = self.uri;
        org.contact = many(self.contact).into_iter().map(ContactInfo::from).collect();
        Ok(org)
    }
}

#[derive(Debug, Deserialize)]
struct FullNameDict {
    #[serde(default)]
    surname: Option<LocalizedStringDict>,
    #[serde(default)]
    completename: Option<LocalizedStringDict>,
    #[serde(default)]
    forename: Option<OneOrMany<LocalizedStringDict>>,
    #[serde(default)]
    initial: Option<OneOrMany<LocalizedStringDict>>,
    #[serde(default)]
    addition: Option<OneOrMany<LocalizedStringDict>>,
    #[serde(default)]
    prefix: Option<OneOrMany<LocalizedStringDict>>,
}

impl FullNameDict {
    fn into_name(self) -> Result<FullName> {
        let surname = self.surname.map(LocalizedStringDict::into_localized).transpose()?;
        let completename =
            self.completename.map(LocalizedStringDict::into_localized).transpose()?;
        let mut name = FullName::new(surname, completename)?;
        name.forename = localized_list(self.forename)?;
        name.initial = localized_list(self.initial)?;
        name.addition = localized_list(self.addition)?;
        name.prefix = localized_list(self.prefix)?;
        Ok(name)
    }
}

fn localized_list(
    field: Option<OneOrMany<LocalizedStringDict>>,
) -> Result<Vec<LocalizedString>> {
    many(field).into_iter().map(LocalizedStringDict::into_localized).collect()
}

#[derive(Debug, Deserialize)]
struct AffiliationDict {
    organization: OrganizationDict,
    #[serde(default)]
    name: Option<LocalizedStringDict>,
    #[serde(default)]
    description: Option<OneOrMany<FormattedStringDict>>,
}

#[derive(Debug, Deserialize)]
struct PersonIdentifierDict {
    #[serde(rename = "type")]
    id_type: String,
    #[serde(alias = "value", alias = "id")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct PersonDict {
    name: FullNameDict,
    #[serde(default)]
    affiliation: Option<OneOrMany<AffiliationDict>>,
    #[serde(default)]
    identifier: Option<OneOrMany<PersonIdentifierDict>>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    contact: Option<OneOrMany<ContactEntry>>,
}

impl PersonDict {
    fn into_person(self) -> Result<Person> {
        let mut person = Person::new(self.name.into_name()?);
        for a in many(self.affiliation) {
            let mut affiliation = Affiliation::new(a.organization.into_organization()?);
            affiliation.name = a.name.map(LocalizedStringDict::into_localized).transpose()?;
            affiliation.description = many(a.description)
                .into_iter()
                .map(FormattedStringDict::into_formatted)
                .collect();
            person.affiliation.push(affiliation);
        }
        person.identifier = many(self.identifier)
            .into_iter()
            .map(|i| PersonIdentifier::new(i.id_type, i.value))
            .collect::<Result<Vec<_>>>()?;
        person.uri = self.uri;
        person.contact = many(self.contact).into_iter().map(ContactInfo::from).collect();
        Ok(person)
    }
}

#[derive(Debug, Deserialize)]
struct ContributorDict {
    #[serde(default)]
    person: Option<PersonDict>,
    #[serde(default)]
    organization: Option<OrganizationDict>,
    #[serde(default)]
    role: Option<OneOrMany<RoleEntry>>,
}

impl ContributorDict {
    fn into_contributor(self) -> Result<Option<ContributionInfo>> {
        let entity = if let Some(person) = self.person {
            ContributorEntity::Person(person.into_person()?)
        } else if let Some(org) = self.organization {
            ContributorEntity::Organization(org.into_organization()?)
        } else {
            warn!("contributor without person or organization");
            return Ok(None);
        };
        let role = many(self.role).into_iter().map(ContributorRole::from).collect();
        Ok(Some(ContributionInfo::new(entity, role)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StageEntry {
    Str(String),
    Record {
        value: String,
        #[serde(default)]
        abbreviation: Option<String>,
    },
}

impl From<StageEntry> for Stage {
    fn from(entry: StageEntry) -> Self {
        match entry {
            StageEntry::Str(value) => Stage::new(value),
            StageEntry::Record { value, abbreviation } => {
                let mut stage = Stage::new(value);
                stage.abbreviation = abbreviation;
                stage
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusDict {
    stage: StageEntry,
    #[serde(default)]
    substage: Option<StageEntry>,
    #[serde(default)]
    iteration: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OwnerEntry {
    // An owner may be a bare organization record or a wrapped entity.
    Org(OrganizationDict),
    Wrapped(ContributorDict),
}

#[derive(Debug, Deserialize)]
struct CopyrightDict {
    owner: OneOrMany<OwnerEntry>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl CopyrightDict {
    fn into_copyright(self) -> Result<CopyrightAssociation> {
        let mut owner = Vec::new();
        for entry in self.owner.into_vec() {
            match entry {
                OwnerEntry::Org(org) => owner.push(ContributionInfo::new(
                    ContributorEntity::Organization(org.into_organization()?),
                    Vec::new(),
                )),
                OwnerEntry::Wrapped(c) => {
                    if let Some(c) = c.into_contributor()? {
                        owner.push(c);
                    }
                }
            }
        }
        CopyrightAssociation::new(owner, self.from.as_deref(), self.to.as_deref(), self.scope)
    }
}

#[derive(Debug, Deserialize)]
struct LocalityDict {
    #[serde(rename = "type")]
    locality_type: String,
    reference_from: String,
    #[serde(default)]
    reference_to: Option<String>,
}

impl LocalityDict {
    fn into_locality(self) -> BibItemLocality {
        BibItemLocality::new(&self.locality_type, self.reference_from, self.reference_to)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LocalityEntry {
    Stack {
        locality_stack: OneOrMany<LocalityDict>,
    },
    Single(LocalityDict),
}

impl LocalityEntry {
    /// Plain localities are wrapped into single-element stacks so the
    /// model only carries the stack form.
    fn into_stack(self) -> LocalityStack {
        match self {
            Self::Stack { locality_stack } => LocalityStack(
                locality_stack
                    .into_vec()
                    .into_iter()
                    .map(|l| Locality(l.into_locality()))
                    .collect(),
            ),
            Self::Single(l) => LocalityStack(vec![Locality(l.into_locality())]),
        }
    }

    fn into_source_stack(self) -> SourceLocalityStack {
        match self {
            Self::Stack { locality_stack } => SourceLocalityStack(
                locality_stack
                    .into_vec()
                    .into_iter()
                    .map(|l| SourceLocality(l.into_locality()))
                    .collect(),
            ),
            Self::Single(l) => SourceLocalityStack(vec![SourceLocality(l.into_locality())]),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelationDict {
    #[serde(rename = "type")]
    relation_type: String,
    bibitem: Box<ItemDict>,
    #[serde(default)]
    description: Option<FormattedStringDict>,
    #[serde(default)]
    locality: Option<OneOrMany<LocalityEntry>>,
    #[serde(default)]
    source_locality: Option<OneOrMany<LocalityEntry>>,
}

impl RelationDict {
    fn into_relation(self) -> Result<DocumentRelation> {
        let mut relation =
            DocumentRelation::new(&self.relation_type, self.bibitem.into_item()?);
        relation.description = self.description.map(FormattedStringDict::into_formatted);
        relation.locality =
            many(self.locality).into_iter().map(LocalityEntry::into_stack).collect();
        relation.source_locality = many(self.source_locality)
            .into_iter()
            .map(LocalityEntry::into_source_stack)
            .collect();
        Ok(relation)
    }
}

#[derive(Debug, Deserialize)]
struct SeriesDict {
    #[serde(rename = "type", default)]
    series_type: Option<String>,
    #[serde(default)]
    formattedref: Option<FormattedStringDict>,
    #[serde(default)]
    title: Option<TitleEntry>,
    #[serde(default)]
    place: Option<String>,
    #[serde(default)]
    organization: Option<String>,
    #[serde(default)]
    abbreviation: Option<LocalizedStringDict>,
    #[serde(default)]
    from: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    number: Option<String>,
    #[serde(default)]
    partnumber: Option<String>,
}

impl SeriesDict {
    fn into_series(self) -> Result<Series> {
        let title = self.title.map(TitleEntry::into_single);
        let formattedref = self
            .formattedref
            .map(|f| FormattedRef(f.into_formatted()));
        let mut series = Series::new(self.series_type, title, formattedref)?;
        series.place = self.place;
        series.organization = self.organization;
        series.abbreviation =
            self.abbreviation.map(LocalizedStringDict::into_localized).transpose()?;
        series.from = self.from;
        series.to = self.to;
        series.number = self.number;
        series.partnumber = self.partnumber;
        Ok(series)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlaceEntry {
    Str(String),
    Record {
        name: String,
        #[serde(default)]
        uri: Option<String>,
        #[serde(default)]
        region: Option<String>,
    },
}

impl From<PlaceEntry> for Place {
    fn from(entry: PlaceEntry) -> Self {
        match entry {
            PlaceEntry::Str(name) => Place::new(name),
            PlaceEntry::Record { name, uri, region } => {
                let mut place = Place::new(name);
                place.uri = uri;
                place.region = region;
                place
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassificationEntry {
    Str(String),
    Record {
        value: String,
        #[serde(rename = "type", default)]
        class_type: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct NoteEntry {
    #[serde(alias = "content")]
    text: String,
    #[serde(rename = "type", default)]
    note_type: Option<String>,
    #[serde(default)]
    language: Option<OneOrMany<String>>,
    #[serde(default)]
    script: Option<OneOrMany<String>>,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BiblioNoteEntry {
    Str(String),
    Record(NoteEntry),
}

impl From<BiblioNoteEntry> for BiblioNote {
    fn from(entry: BiblioNoteEntry) -> Self {
        match entry {
            BiblioNoteEntry::Str(s) => BiblioNote::new(FormattedString::plain_text(s), None),
            BiblioNoteEntry::Record(r) => {
                let mut ls = LocalizedString::new(r.text);
                ls.language = many(r.language);
                ls.script = many(r.script);
                BiblioNote::new(FormattedString::new(ls, r.format), r.note_type)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct VersionDict {
    #[serde(default)]
    revision_date: Option<String>,
    #[serde(default)]
    draft: Option<OneOrMany<String>>,
}

#[derive(Debug, Deserialize)]
struct MediumDict {
    #[serde(default)]
    form: Option<String>,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    scale: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidityDict {
    #[serde(default)]
    begins: Option<String>,
    #[serde(default)]
    ends: Option<String>,
    #[serde(default)]
    revision: Option<String>,
}

fn validity_time(value: Option<String>, field: &str) -> Option<NaiveDateTime> {
    let value = value?;
    match NaiveDateTime::parse_from_str(&value, VALIDITY_FORMAT) {
        Ok(t) => Some(t),
        Err(_) => {
            warn!(%field, %value, "unparseable validity timestamp");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkGroupDict {
    #[serde(alias = "content")]
    name: String,
    #[serde(default)]
    number: Option<u32>,
    #[serde(rename = "type", default)]
    workgroup_type: Option<String>,
    #[serde(default)]
    identifier: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
}

impl From<WorkGroupDict> for WorkGroup {
    fn from(d: WorkGroupDict) -> Self {
        let mut wg = WorkGroup::new(d.name);
        wg.number = d.number;
        wg.workgroup_type = d.workgroup_type;
        wg.identifier = d.identifier;
        wg.prefix = d.prefix;
        wg
    }
}

#[derive(Debug, Deserialize)]
struct EditorialGroupDict {
    technical_committee: OneOrMany<WorkGroupDict>,
}

#[derive(Debug, Deserialize)]
struct IcsDict {
    code: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct StructuredIdentifierDict {
    docnumber: String,
    #[serde(default)]
    agency: Option<OneOrMany<String>>,
    #[serde(rename = "type", default)]
    si_type: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    partnumber: Option<String>,
    #[serde(default)]
    edition: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    supplementtype: Option<String>,
    #[serde(default)]
    supplementnumber: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    year: Option<String>,
}

impl From<StructuredIdentifierDict> for StructuredIdentifier {
    fn from(d: StructuredIdentifierDict) -> Self {
        let mut si = StructuredIdentifier::new(d.docnumber);
        si.agency = many(d.agency);
        si.si_type = d.si_type;
        si.class = d.class;
        si.partnumber = d.partnumber;
        si.edition = d.edition;
        si.version = d.version;
        si.supplementtype = d.supplementtype;
        si.supplementnumber = d.supplementnumber;
        si.language = d.language;
        si.year = d.year;
        si
    }
}

/// Top-level shadow of the loose map representation.
#[derive(Debug, Deserialize)]
struct ItemDict {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default)]
    item_type: Option<String>,
    #[serde(default)]
    fetched: Option<String>,
    #[serde(default)]
    title: Option<OneOrMany<TitleEntry>>,
    #[serde(default)]
    link: Option<OneOrMany<LinkEntry>>,
    #[serde(alias = "docidentifier", default)]
    docid: Option<OneOrMany<DocidEntry>>,
    #[serde(default)]
    docnumber: Option<String>,
    #[serde(default)]
    date: Option<OneOrMany<DateDict>>,
    #[serde(default)]
    contributor: Option<OneOrMany<ContributorDict>>,
    #[serde(default)]
    edition: Option<String>,
    #[serde(default)]
    version: Option<VersionDict>,
    #[serde(default)]
    biblionote: Option<OneOrMany<BiblioNoteEntry>>,
    #[serde(default)]
    language: Option<OneOrMany<String>>,
    #[serde(default)]
    script: Option<OneOrMany<String>>,
    #[serde(rename = "abstract", default)]
    abstracts: Option<OneOrMany<FormattedStringDict>>,
    #[serde(default)]
    formattedref: Option<FormattedStringDict>,
    #[serde(default)]
    docstatus: Option<StatusDict>,
    #[serde(default)]
    copyright: Option<OneOrMany<CopyrightDict>>,
    #[serde(default)]
    relation: Option<OneOrMany<RelationDict>>,
    #[serde(default)]
    series: Option<OneOrMany<SeriesDict>>,
    #[serde(default)]
    medium: Option<MediumDict>,
    #[serde(default)]
    place: Option<OneOrMany<PlaceEntry>>,
    #[serde(default)]
    extent: Option<OneOrMany<LocalityDict>>,
    #[serde(default)]
    accesslocation: Option<OneOrMany<String>>,
    #[serde(default)]
    license: Option<OneOrMany<String>>,
    #[serde(default)]
    classification: Option<OneOrMany<ClassificationEntry>>,
    #[serde(default)]
    validity: Option<ValidityDict>,
    #[serde(default)]
    keyword: Option<OneOrMany<LocalizedStringDict>>,
    #[serde(default)]
    doctype: Option<String>,
    #[serde(default)]
    subdoctype: Option<String>,
    #[serde(default)]
    editorialgroup: Option<EditorialGroupDict>,
    #[serde(default)]
    ics: Option<OneOrMany<IcsDict>>,
    #[serde(default)]
    structuredidentifier: Option<OneOrMany<StructuredIdentifierDict>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinkEntry {
    Str(String),
    Record {
        content: String,
        #[serde(rename = "type", default)]
        link_type: Option<String>,
    },
}

impl From<LinkEntry> for TypedUri {
    fn from(entry: LinkEntry) -> Self {
        match entry {
            LinkEntry::Str(content) => TypedUri::new(None, content),
            LinkEntry::Record { content, link_type } => TypedUri::new(link_type, content),
        }
    }
}

impl ItemDict {
    fn into_item(self) -> Result<BibliographicItem> {
        let mut item = BibliographicItem::new();
        item.id = self.id;
        if let Some(t) = &self.item_type {
            BibliographicItem::check_type(t);
        }
        item.item_type = self.item_type;
        item.fetched = self.fetched.and_then(|f| {
            NaiveDate::parse_from_str(&f, "%Y-%m-%d")
                .map_err(|_| warn!(fetched = %f, "unparseable fetched date"))
                .ok()
        });
        item.title = TypedTitleStringCollection(
            many(self.title).into_iter().flat_map(TitleEntry::into_titles).collect(),
        );
        item.link = many(self.link).into_iter().map(TypedUri::from).collect();
        item.docidentifier =
            many(self.docid).into_iter().map(DocumentIdentifier::from).collect();
        item.docnumber = self.docnumber;
        item.date = many(self.date)
            .into_iter()
            .map(DateDict::into_date)
            .collect::<Result<Vec<_>>>()?;
        for c in many(self.contributor) {
            if let Some(c) = c.into_contributor()? {
                item.contributor.push(c);
            }
        }
        item.edition = self.edition;
        item.version = self.version.map(|v| BibliographicItemVersion {
            revision_date: v.revision_date,
            draft: many(v.draft),
        });
        item.biblionote = BiblioNoteCollection(
            many(self.biblionote).into_iter().map(BiblioNote::from).collect(),
        );
        item.language = many(self.language);
        item.script = many(self.script);
        item.abstracts = many(self.abstracts)
            .into_iter()
            .map(FormattedStringDict::into_formatted)
            .collect();
        item.formattedref =
            self.formattedref.map(|f| FormattedRef(f.into_formatted()));
        item.status = self.docstatus.map(|s| {
            let mut status = DocumentStatus::new(Stage::from(s.stage));
            status.substage = s.substage.map(Stage::from);
            status.iteration = s.iteration;
            status
        });
        item.copyright = many(self.copyright)
            .into_iter()
            .map(CopyrightDict::into_copyright)
            .collect::<Result<Vec<_>>>()?;
        item.relation = DocRelationCollection(
            many(self.relation)
                .into_iter()
                .map(RelationDict::into_relation)
                .collect::<Result<Vec<_>>>()?,
        );
        item.series = many(self.series)
            .into_iter()
            .map(SeriesDict::into_series)
            .collect::<Result<Vec<_>>>()?;
        item.medium = self.medium.map(|m| Medium { form: m.form, size: m.size, scale: m.scale });
        item.place = many(self.place).into_iter().map(Place::from).collect();
        item.extent =
            many(self.extent).into_iter().map(LocalityDict::into_locality).collect();
        item.accesslocation = many(self.accesslocation);
        item.license = many(self.license);
        item.classification = many(self.classification)
            .into_iter()
            .map(|c| match c {
                ClassificationEntry::Str(value) => Classification::new(value, None),
                ClassificationEntry::Record { value, class_type } => {
                    Classification::new(value, class_type)
                }
            })
            .collect();
        item.validity = self.validity.map(|v| Validity {
            begins: validity_time(v.begins, "begins"),
            ends: validity_time(v.ends, "ends"),
            revision: validity_time(v.revision, "revision"),
        });
        item.keyword = localized_list(self.keyword)?;
        item.doctype = self.doctype;
        item.subdoctype = self.subdoctype;
        item.editorialgroup = self.editorialgroup.map(|eg| EditorialGroup {
            technical_committee: eg
                .technical_committee
                .into_vec()
                .into_iter()
                .map(|wg| TechnicalCommittee { workgroup: WorkGroup::from(wg) })
                .collect(),
        });
        item.ics = many(self.ics)
            .into_iter()
            .map(|i| Ics { code: i.code, text: i.text })
            .collect();
        item.structuredidentifier = StructuredIdentifierCollection(
            many(self.structuredidentifier)
                .into_iter()
                .map(StructuredIdentifier::from)
                .collect(),
        );
        item.ensure_id();
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_map_input_yields_none() {
        let value = serde_json::json!("just a string");
        assert!(from_dict(&value).unwrap().is_none());
    }

    #[test]
    fn minimal_item_from_yaml() {
        let item = from_yaml("docid:\n  id: ISO 123\n  type: ISO\n")
            .unwrap()
            .unwrap();
        assert_eq!(item.docidentifier[0].id, "ISO 123");
        assert_eq!(item.id.as_deref(), Some("ISO123"));
    }

    #[test]
    fn string_title_is_split() {
        let item = from_yaml("title: Intro - Main\ndocid: X\n").unwrap().unwrap();
        let types: Vec<_> =
            item.title.0.iter().filter_map(|t| t.title_type.as_deref()).collect();
        assert_eq!(types, ["title-intro", "title-main", "main"]);
    }

    #[test]
    fn singular_fields_normalize_to_lists() {
        let yaml = concat!(
            "docid: REF1\n",
            "language: en\n",
            "contributor:\n",
            "  organization:\n",
            "    name: ISO\n",
            "  role: publisher\n",
            "date:\n",
            "  type: published\n",
            "  value: '2014-04'\n",
        );
        let item = from_yaml(yaml).unwrap().unwrap();
        assert_eq!(item.language, ["en"]);
        assert_eq!(item.contributor.len(), 1);
        assert!(item.contributor[0].has_role("publisher"));
        assert_eq!(item.date[0].on.as_deref(), Some("2014-04"));
    }

    #[test]
    fn relation_locality_normalizes_to_stacks() {
        let yaml = concat!(
            "docid: A\n",
            "relation:\n",
            "- type: updates\n",
            "  bibitem:\n",
            "    docid: B\n",
            "  locality:\n",
            "  - type: page\n",
            "    reference_from: '10'\n",
        );
        let item = from_yaml(yaml).unwrap().unwrap();
        let relation = &item.relation.0[0];
        assert_eq!(relation.locality.len(), 1);
        assert_eq!(relation.locality[0].0.len(), 1);
        assert_eq!(relation.bibitem.docidentifier[0].id, "B");
    }

    #[test]
    fn missing_date_fields_is_hard_error() {
        let yaml = "docid: A\ndate:\n  type: published\n";
        assert!(from_yaml(yaml).is_err());
    }
}
