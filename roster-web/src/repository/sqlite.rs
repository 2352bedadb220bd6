//! SQLite-backed person repository

use async_trait::async_trait;
use roster_common::db::{Group, GroupId, NewPerson, Person, PersonWithGroup};
use roster_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::debug;

use super::PersonRepository;

const SELECT_PERSON_WITH_GROUP: &str = r#"
    SELECT p.id, p.name, p.date_added, g.id AS group_id, g.name AS group_name
    FROM persons p
    JOIN groups g ON g.id = p.group_id
"#;

/// Repository over a pooled SQLite database
///
/// Each call borrows a pooled connection only for its own duration.
#[derive(Debug, Clone)]
pub struct SqlitePersonRepository {
    pool: SqlitePool,
}

impl SqlitePersonRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonRepository for SqlitePersonRepository {
    async fn list_groups(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>("SELECT id, name FROM groups ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(groups)
    }

    async fn add_person(&self, person: NewPerson) -> Result<Person> {
        let mut tx = self.pool.begin().await?;

        let group = find_group(&mut tx, person.group_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Group {}", person.group_id)))?;

        let result = sqlx::query("INSERT INTO persons (name, date_added, group_id) VALUES (?, ?, ?)")
            .bind(&person.name)
            .bind(person.date_added)
            .bind(group.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(id, group_id = group.id, "Inserted person");

        Ok(Person {
            id,
            name: person.name,
            date_added: person.date_added,
            group_id: group.id,
        })
    }

    async fn search(&self, name_filter: &str, group_filter: &str) -> Result<Vec<PersonWithGroup>> {
        // instr() is a plain case-sensitive substring test, so filter text
        // containing % or _ needs no escaping
        let sql = format!(
            "{} WHERE (? = '' OR instr(p.name, ?) > 0) AND (? = '' OR instr(g.name, ?) > 0) ORDER BY p.id",
            SELECT_PERSON_WITH_GROUP
        );

        let rows = sqlx::query(&sql)
            .bind(name_filter)
            .bind(name_filter)
            .bind(group_filter)
            .bind(group_filter)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(person_with_group_from_row).collect()
    }

    async fn list_all_persons(&self) -> Result<Vec<PersonWithGroup>> {
        let sql = format!("{} ORDER BY p.id", SELECT_PERSON_WITH_GROUP);

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(person_with_group_from_row).collect()
    }
}

/// Look up a group inside the caller's transaction
async fn find_group(conn: &mut SqliteConnection, id: GroupId) -> Result<Option<Group>> {
    let group = sqlx::query_as::<_, Group>("SELECT id, name FROM groups WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(group)
}

fn person_with_group_from_row(row: &SqliteRow) -> Result<PersonWithGroup> {
    Ok(PersonWithGroup {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        date_added: row.try_get("date_added")?,
        group: Group {
            id: row.try_get("group_id")?,
            name: row.try_get("group_name")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roster_common::db::{init_memory_database, seed_groups};

    async fn setup_repository() -> SqlitePersonRepository {
        let pool = init_memory_database().await.unwrap();
        seed_groups(&pool, &["Group A".to_string(), "Group B".to_string()])
            .await
            .unwrap();
        SqlitePersonRepository::new(pool)
    }

    fn new_person(name: &str, group_id: GroupId) -> NewPerson {
        NewPerson {
            name: name.to_string(),
            date_added: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            group_id,
        }
    }

    #[tokio::test]
    async fn test_list_groups() {
        let repo = setup_repository().await;

        let groups = repo.list_groups().await.unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Group A");
        assert_eq!(groups[1].name, "Group B");
    }

    #[tokio::test]
    async fn test_add_person_assigns_id_and_group() {
        let repo = setup_repository().await;

        let first = repo.add_person(new_person("John Smith", 1)).await.unwrap();
        let second = repo.add_person(new_person("Jane Smith", 2)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.group_id, 1);
        assert_eq!(second.group_id, 2);
    }

    #[tokio::test]
    async fn test_add_person_unknown_group_is_not_found() {
        let repo = setup_repository().await;

        let result = repo.add_person(new_person("Nobody", 99)).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert!(repo.list_all_persons().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_keeps_group() {
        let repo = setup_repository().await;
        repo.add_person(new_person("John Smith", 1)).await.unwrap();

        let listed = repo.list_all_persons().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].group.id, 1);
        assert_eq!(listed[0].group.name, "Group A");
        assert_eq!(listed[0].date_added, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());

        let found = repo.search("John", "").await.unwrap();
        assert_eq!(found, listed);
    }

    #[tokio::test]
    async fn test_search_filters() {
        let repo = setup_repository().await;
        repo.add_person(new_person("John Smith", 1)).await.unwrap();
        repo.add_person(new_person("Jane Smith", 1)).await.unwrap();
        repo.add_person(new_person("Bob Jones", 2)).await.unwrap();

        assert_eq!(repo.search("Smith", "").await.unwrap().len(), 2);
        assert_eq!(repo.search("", "Group B").await.unwrap().len(), 1);
        assert_eq!(repo.search("Smith", "Group B").await.unwrap().len(), 0);
        assert_eq!(repo.search("Jane", "Group").await.unwrap().len(), 1);
        assert_eq!(repo.search("", "").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_substring_not_pattern() {
        let repo = setup_repository().await;
        repo.add_person(new_person("John Smith", 1)).await.unwrap();

        assert!(repo.search("%", "").await.unwrap().is_empty());
        assert!(repo.search("J_hn", "").await.unwrap().is_empty());
        assert!(repo.search("smith", "").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_leading_space_is_part_of_filter() {
        let repo = setup_repository().await;
        repo.add_person(new_person("Smithers", 1)).await.unwrap();
        repo.add_person(new_person("Jane Smith", 1)).await.unwrap();

        let found = repo.search(" Smith", "").await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Jane Smith");
    }
}
