//! Database models
//!
//! Relations are explicit foreign-key fields. A group's persons are found by
//! querying `persons.group_id`, never through a back-reference collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage-assigned group identifier
pub type GroupId = i64;

/// Storage-assigned person identifier
pub type PersonId = i64;

/// A named category that every person belongs to exactly one of
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
}

/// A persisted person record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub date_added: NaiveDate,
    pub group_id: GroupId,
}

/// A person that has not been persisted yet
///
/// `group_id` must name an existing group; the repository resolves it before
/// inserting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub name: String,
    pub date_added: NaiveDate,
    pub group_id: GroupId,
}

/// A person joined with the group it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonWithGroup {
    pub id: PersonId,
    pub name: String,
    pub date_added: NaiveDate,
    pub group: Group,
}
