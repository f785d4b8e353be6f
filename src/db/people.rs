//! Person rows.

use crate::{
    entities::{Debt, Person, debt, person},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Person fields as written to storage. An absent `id` means "create".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonRecord {
    /// Existing id to overwrite, or `None` to generate one
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Contact details
    pub contact: Option<String>,
    /// Notes
    pub notes: Option<String>,
}

/// Inserts the person, or overwrites name/contact/notes in place when the id already exists.
///
/// Returns the id of the written row.
pub async fn upsert_person<C>(db: &C, record: PersonRecord) -> Result<String>
where
    C: ConnectionTrait,
{
    let id = record.id.unwrap_or_else(super::new_id);
    let row = person::ActiveModel {
        id: Set(id.clone()),
        name: Set(record.name),
        contact: Set(record.contact),
        notes: Set(record.notes),
    };

    Person::insert(row)
        .on_conflict(
            OnConflict::column(person::Column::Id)
                .update_columns([
                    person::Column::Name,
                    person::Column::Contact,
                    person::Column::Notes,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(id)
}

/// Finds a person by id.
pub async fn get_person_by_id<C>(db: &C, id: &str) -> Result<Option<person::Model>>
where
    C: ConnectionTrait,
{
    Person::find_by_id(id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every person ordered by name, ignoring case.
pub async fn list_all_people<C>(db: &C) -> Result<Vec<person::Model>>
where
    C: ConnectionTrait,
{
    let mut people = Person::find().all(db).await?;
    people.sort_by_cached_key(|p| (p.name.to_lowercase(), p.id.clone()));
    Ok(people)
}

/// Counts all people.
pub async fn count_people<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Person::find().count(db).await.map_err(Into::into)
}

/// Counts the debts referencing a person, whatever their status.
pub async fn count_debts_for_person<C>(db: &C, person_id: &str) -> Result<u64>
where
    C: ConnectionTrait,
{
    Debt::find()
        .filter(debt::Column::PersonId.eq(person_id))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Deletes a person that owns no debts. Never cascades.
pub async fn delete_person<C>(db: &C, id: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let count = count_debts_for_person(db, id).await?;
    if count > 0 {
        return Err(Error::HasExistingDebts {
            person_id: id.to_string(),
            count,
        });
    }

    let result = Person::delete_by_id(id.to_string()).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::PersonNotFound { id: id.to_string() });
    }
    Ok(())
}
