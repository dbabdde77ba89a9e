mod api;
mod db;
mod entity;
mod error;
mod models;
mod services;
mod validation;
mod verify_user;

use axum::http::Method;
use dotenv::dotenv;
use std::env;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn,sea_orm=warn".to_string()),
        ))
        .init();

    let db = db::connect().await?;
    db::init_schema(&db).await?;

    let users = verify_user::UserServiceClient::from_env()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(Any);

    let app = api::router(db, users).layer(cors);

    let port = env::var("PORT").unwrap_or_else(|_| "5001".to_string());
    tracing::info!("cart service listening on port {}", port);

    axum::serve(
        TcpListener::bind(format!("0.0.0.0:{}", port))
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to port: {}", e)))?,
        app,
    )
    .await
    .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
