use std::env;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use crate::error::AppError;

pub async fn connect() -> Result<DatabaseConnection, AppError> {
    let database_url = env::var("DATABASE_URL")
        .map_err(|_| AppError::Internal("DATABASE_URL must be set".to_string()))?;
    Database::connect(&database_url)
        .await
        .map_err(|e| AppError::Database {
            message: "Failed to connect to database".to_string(),
            source: e,
            context: None,
        })
}

/// Idempotent schema bootstrap, run once at startup. The `total_line`
/// generated column and the cascading foreign key are declared here so the
/// engine enforces line-total consistency and orphan-free deletes.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), AppError> {
    db.execute_unprepared(
        r#"
        CREATE TABLE IF NOT EXISTS carts (
            id SERIAL PRIMARY KEY,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            modified_at TIMESTAMPTZ,
            status VARCHAR(50),
            user_id INTEGER
        )
        "#,
    )
    .await
    .map_err(|e| AppError::from(e).with_context("creating carts table"))?;

    db.execute_unprepared(
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id SERIAL PRIMARY KEY,
            cart_id INTEGER NOT NULL REFERENCES carts(id) ON DELETE CASCADE,
            product_id VARCHAR(255) NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price DECIMAL(10, 2) NOT NULL,
            total_line DECIMAL(10, 2) GENERATED ALWAYS AS (quantity * unit_price) STORED,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .await
    .map_err(|e| AppError::from(e).with_context("creating cart_items table"))?;

    Ok(())
}
