use sqlx::sqlite::SqliteQueryResult;

pub async fn create_entries(
    connection: &sqlx::Pool<sqlx::Sqlite>,
) -> Result<SqliteQueryResult, sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            symbol TEXT NOT NULL,
            coin_id TEXT NOT NULL,
            name TEXT NOT NULL,
            quantity REAL NOT NULL,
            price_used REAL NOT NULL,
            purchase_date INTEGER NOT NULL,
            notes TEXT,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(connection)
    .await
}
