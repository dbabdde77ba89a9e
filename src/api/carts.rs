use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::carts::{Cart, CartWithItems, CreateCartRequest, UpdateCartRequest};
use crate::models::envelope::ApiResponse;
use crate::models::items::Item;
use crate::services;
use crate::validation::{validate_pagination, validate_status};
use crate::verify_user::UserServiceClient;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    user_id: Option<String>,
    status: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// POST /carts
pub async fn create(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(users): Extension<UserServiceClient>,
    body: Option<Json<CreateCartRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    let status = body.status.unwrap_or_else(|| "active".to_string());
    validate_status(&status)?;

    if let Some(user_id) = body.user_id {
        users.ensure_exists(user_id).await?;
    }

    let cart = services::carts::create(&db, body.user_id, Some(status)).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(Cart::from(cart))),
    ))
}

/// GET /carts
pub async fn list(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = validate_pagination(query.page.as_deref(), query.limit.as_deref())?;

    let user_id = match query.user_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| AppError::Validation {
            message: "Invalid userId".to_string(),
            field: "userId".to_string(),
            value: Some(raw.to_string()),
        })?),
    };
    let status = query.status.filter(|s| !s.is_empty());

    let (rows, total, total_pages) =
        services::carts::list(&db, page, limit, user_id, status).await?;
    let data: Vec<Cart> = rows.into_iter().map(Cart::from).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        page,
        limit,
        total,
        total_pages,
    )))
}

/// GET /carts/:id — cart with its items and aggregates.
pub async fn get(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match services::carts::get_with_items(&db, id).await? {
        Some(found) => Ok(Json(ApiResponse::new(CartWithItems {
            cart: Cart::from(found.cart),
            items: found.items.into_iter().map(Item::from).collect(),
            total_quantity: found.total_quantity,
            total_price: found.total_price,
        }))),
        None => Err(AppError::not_found("Cart", id.to_string())),
    }
}

/// PUT /carts/:id
pub async fn update(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(users): Extension<UserServiceClient>,
    Path(id): Path<i32>,
    body: Option<Json<UpdateCartRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();

    if let Some(status) = body.status.as_deref() {
        validate_status(status)?;
    }
    if let Some(user_id) = body.user_id {
        users.ensure_exists(user_id).await?;
    }

    match services::carts::update(&db, id, body.user_id, body.status).await? {
        Some(cart) => Ok(Json(ApiResponse::new(Cart::from(cart)))),
        None => Err(AppError::not_found("Cart", id.to_string())),
    }
}

/// DELETE /carts/:id
pub async fn remove(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if services::carts::delete(&db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Cart", id.to_string()))
    }
}

/// GET /carts/user/:user_id
pub async fn list_for_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(user_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = validate_pagination(query.page.as_deref(), query.limit.as_deref())?;

    let (rows, total, total_pages) =
        services::carts::list_by_user(&db, user_id, page, limit).await?;
    let data: Vec<Cart> = rows.into_iter().map(Cart::from).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        page,
        limit,
        total,
        total_pages,
    )))
}
