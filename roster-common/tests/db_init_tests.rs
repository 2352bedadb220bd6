//! Tests for on-disk database initialization

use roster_common::db::init::{init_database, seed_groups};

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("roster.db");

    let pool = init_database(&db_path).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("roster.db");
    let names = vec!["Group A".to_string(), "Group B".to_string()];

    let pool1 = init_database(&db_path).await.unwrap();
    assert_eq!(seed_groups(&pool1, &names).await.unwrap(), 2);
    pool1.close().await;

    let pool2 = init_database(&db_path).await.unwrap();
    assert_eq!(seed_groups(&pool2, &names).await.unwrap(), 0);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM groups")
        .fetch_one(&pool2)
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_foreign_keys_enforced_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("roster.db");
    let pool = init_database(&db_path).await.unwrap();

    let result = sqlx::query(
        "INSERT INTO persons (name, date_added, group_id) VALUES ('Orphan', '2024-01-01', 7)",
    )
    .execute(&pool)
    .await;

    assert!(result.is_err());
}
