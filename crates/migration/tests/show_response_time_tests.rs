//! Tests for the `show_response_time` migration unit against a bare
//! `status_page {id, slug}` table.

use migration::error::SchemaError;
use migration::m20251103_000000_add_show_response_time::{show_response_time, Migration};
use migration::{DbErr, MigrationTrait, SchemaManager};
use sea_orm_migration::sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement,
};

#[derive(Debug, PartialEq)]
struct ColumnInfo {
    name: String,
    column_type: String,
    not_null: bool,
    default: Option<String>,
}

async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        r#"CREATE TABLE status_page (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE
        );"#,
    ))
    .await
    .expect("Failed to create status_page table");

    db
}

async fn columns(db: &DatabaseConnection) -> Vec<ColumnInfo> {
    let rows = db
        .query_all(Statement::from_string(
            DbBackend::Sqlite,
            r#"SELECT name, type, "notnull" AS not_null, dflt_value
               FROM pragma_table_info('status_page') ORDER BY cid"#,
        ))
        .await
        .expect("Failed to read table info");

    rows.iter()
        .map(|row| ColumnInfo {
            name: row.try_get("", "name").unwrap(),
            column_type: row.try_get("", "type").unwrap(),
            not_null: row.try_get::<i32>("", "not_null").unwrap() == 1,
            default: row.try_get("", "dflt_value").unwrap(),
        })
        .collect()
}

fn names(cols: &[ColumnInfo]) -> Vec<&str> {
    cols.iter().map(|c| c.name.as_str()).collect()
}

#[tokio::test]
async fn up_adds_not_null_boolean_defaulting_to_false() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);

    Migration.up(&manager).await.expect("up");

    let cols = columns(&db).await;
    assert_eq!(names(&cols), vec!["id", "slug", "show_response_time"]);

    let added = &cols[2];
    assert!(added.column_type.to_ascii_lowercase().contains("bool"));
    assert!(added.not_null);
    let default = added.default.as_deref().map(str::to_ascii_lowercase);
    assert!(
        matches!(default.as_deref(), Some("false") | Some("0")),
        "unexpected default {default:?}"
    );
}

#[tokio::test]
async fn rows_inserted_without_column_read_back_false() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);
    Migration.up(&manager).await.expect("up");

    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        "INSERT INTO status_page (slug) VALUES ('default');",
    ))
    .await
    .expect("insert");

    let row = db
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT show_response_time FROM status_page WHERE slug = 'default';",
        ))
        .await
        .expect("select")
        .expect("row present");
    let shown: bool = row.try_get("", "show_response_time").unwrap();
    assert!(!shown);
}

#[tokio::test]
async fn existing_rows_get_the_default() {
    let db = setup_test_db().await;
    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        "INSERT INTO status_page (slug) VALUES ('before');",
    ))
    .await
    .expect("insert");

    let manager = SchemaManager::new(&db);
    Migration.up(&manager).await.expect("up on populated table");

    let row = db
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT show_response_time FROM status_page WHERE slug = 'before';",
        ))
        .await
        .expect("select")
        .expect("row present");
    let shown: bool = row.try_get("", "show_response_time").unwrap();
    assert!(!shown);
}

#[tokio::test]
async fn up_twice_fails_with_column_already_exists() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);
    show_response_time()
        .add_column(&manager)
        .await
        .expect("first add");

    let err = show_response_time().add_column(&manager).await.unwrap_err();
    assert!(matches!(err, SchemaError::ColumnAlreadyExists { .. }));

    // Through the migration boundary the same refusal is a migration error.
    match Migration.up(&manager).await {
        Err(DbErr::Migration(msg)) => assert!(msg.contains("already exists")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn up_without_table_fails_with_table_not_found() {
    let db = Database::connect("sqlite::memory:").await.expect("connect");
    let manager = SchemaManager::new(&db);

    let err = show_response_time().add_column(&manager).await.unwrap_err();
    assert!(matches!(err, SchemaError::TableNotFound(ref t) if t == "status_page"));
}

#[tokio::test]
async fn down_removes_column() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);
    Migration.up(&manager).await.expect("up");

    Migration.down(&manager).await.expect("down");

    assert_eq!(names(&columns(&db).await), vec!["id", "slug"]);
}

#[tokio::test]
async fn down_without_column_fails_with_column_not_found() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);

    let err = show_response_time().drop_column(&manager).await.unwrap_err();
    assert!(matches!(err, SchemaError::ColumnNotFound { .. }));

    assert!(matches!(
        Migration.down(&manager).await,
        Err(DbErr::Migration(_))
    ));
}

#[tokio::test]
async fn up_then_down_restores_column_set() {
    let db = setup_test_db().await;
    let manager = SchemaManager::new(&db);
    let before = columns(&db).await;

    Migration.up(&manager).await.expect("up");
    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        "INSERT INTO status_page (slug, show_response_time) VALUES ('shown', 1);",
    ))
    .await
    .expect("insert");
    Migration.down(&manager).await.expect("down");

    assert_eq!(columns(&db).await, before);

    let row = db
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "SELECT COUNT(*) AS n FROM status_page;",
        ))
        .await
        .expect("count")
        .expect("row");
    let n: i64 = row.try_get("", "n").unwrap();
    assert_eq!(n, 1, "rows survive the drop, only the column data is lost");
}
