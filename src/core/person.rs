//! Person business logic - Handles all contact-related operations.
//!
//! Names are trimmed and must be 1 to 100 characters; contact and notes are trimmed and
//! blank values are dropped. A person can only be deleted once no debt references them.

use crate::{
    db::{self, PersonRecord},
    entities::person,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::info;

/// Longest accepted person name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// User-supplied person fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonInput {
    /// Display name
    pub name: String,
    /// Contact details
    #[serde(default)]
    pub contact: Option<String>,
    /// Notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl PersonInput {
    /// Input with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    fn normalize(self, id: Option<String>) -> Result<PersonRecord> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Person name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(Error::validation(format!(
                "Person name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        Ok(PersonRecord {
            id,
            name: name.to_string(),
            contact: super::normalize_optional(self.contact),
            notes: super::normalize_optional(self.notes),
        })
    }
}

fn into_model(id: String, record: PersonRecord) -> person::Model {
    person::Model {
        id,
        name: record.name,
        contact: record.contact,
        notes: record.notes,
    }
}

/// Creates a new person with a generated id.
pub async fn create_person(db: &DatabaseConnection, input: PersonInput) -> Result<person::Model> {
    let record = input.normalize(None)?;
    let id = db::upsert_person(db, record.clone()).await?;
    info!(person_id = %id, name = %record.name, "Person created");
    Ok(into_model(id, record))
}

/// Replaces name, contact and notes of an existing person.
pub async fn update_person(
    db: &DatabaseConnection,
    id: &str,
    input: PersonInput,
) -> Result<person::Model> {
    let record = input.normalize(Some(id.to_string()))?;
    if db::get_person_by_id(db, id).await?.is_none() {
        return Err(Error::PersonNotFound { id: id.to_string() });
    }
    let id = db::upsert_person(db, record.clone()).await?;
    info!(person_id = %id, name = %record.name, "Person updated");
    Ok(into_model(id, record))
}

/// Updates when `id` is given, creates otherwise. Returns the person's id.
pub async fn upsert_person(
    db: &DatabaseConnection,
    id: Option<&str>,
    input: PersonInput,
) -> Result<String> {
    let person = match id {
        Some(id) => update_person(db, id, input).await?,
        None => create_person(db, input).await?,
    };
    Ok(person.id)
}

/// Deletes a person who owns no debts, settled or not.
pub async fn delete_person(db: &DatabaseConnection, id: &str) -> Result<()> {
    let person = db::get_person_by_id(db, id)
        .await?
        .ok_or_else(|| Error::PersonNotFound { id: id.to_string() })?;
    db::delete_person(db, id).await?;
    info!(person_id = %id, name = %person.name, "Person deleted");
    Ok(())
}

/// Finds a person by id.
pub async fn get_person(db: &DatabaseConnection, id: &str) -> Result<Option<person::Model>> {
    if id.trim().is_empty() {
        return Err(Error::validation("Person ID is required"));
    }
    db::get_person_by_id(db, id).await
}

/// Lists everyone, ordered by name ignoring case.
pub async fn list_people(db: &DatabaseConnection) -> Result<Vec<person::Model>> {
    db::list_all_people(db).await
}
