use crate::db::{connect_with_config, DatabaseConfig, DATABASE_URL};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = super::setup_test_db().await? else {
        println!("Skipping database tests (no DATABASE_URL or SKIP_DB_TESTS set)");
        return Ok(());
    };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    Ok(())
}

/// Test connection with custom pool configuration
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if super::setup_test_db().await?.is_none() {
        return Ok(());
    }

    let config = DatabaseConfig {
        url: DATABASE_URL.clone(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout_secs: 10,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&config).await?;

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT current_database()".to_string());
    let result = db.query_one(stmt).await?;
    assert!(result.is_some());
    Ok(())
}
