//! Storage gateway for persons and groups

use async_trait::async_trait;
use roster_common::db::{Group, NewPerson, Person, PersonWithGroup};
use roster_common::Result;

mod sqlite;

pub use sqlite::SqlitePersonRepository;

/// Persistence operations used by the request handler
///
/// Implementations fail with `Error::NotFound` when a new person names a
/// group that does not exist; all other faults surface as storage errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// All groups
    async fn list_groups(&self) -> Result<Vec<Group>>;

    /// Resolve the person's group and persist the person, returning it with
    /// its storage-assigned id
    async fn add_person(&self, person: NewPerson) -> Result<Person>;

    /// Persons whose name contains `name_filter` and whose group name contains
    /// `group_filter`; an empty filter matches everything
    async fn search(&self, name_filter: &str, group_filter: &str) -> Result<Vec<PersonWithGroup>>;

    /// All persons with their group attached
    async fn list_all_persons(&self) -> Result<Vec<PersonWithGroup>>;
}
