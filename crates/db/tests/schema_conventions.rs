use sqlx::PgPool;

/// Every `id` column is BIGINT.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// Every table carries timestamptz `created_at` / `updated_at`.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    let rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT t.table_name, COUNT(c.column_name)
         FROM information_schema.tables t
         LEFT JOIN information_schema.columns c
           ON c.table_schema = t.table_schema
          AND c.table_name = t.table_name
          AND c.column_name IN ('created_at', 'updated_at')
          AND c.data_type = 'timestamp with time zone'
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
         GROUP BY t.table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for (table, count) in &rows {
        assert_eq!(*count, 2, "Table {table} is missing timestamptz created_at/updated_at");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    onlycard_db::health_check(&pool).await.unwrap();
}
