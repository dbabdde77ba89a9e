use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::envelope::ApiResponse;
use crate::models::items::Item;
use crate::services;
use crate::validation::{
    coerce_id, coerce_price, coerce_product_id, coerce_quantity, validate_pagination,
    validate_required_fields,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<String>,
    limit: Option<String>,
    cart_id: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    page: Option<String>,
    limit: Option<String>,
}

/// POST /items — all four fields required; the body is taken as loose JSON
/// so missing and malformed fields can be reported per field.
pub async fn create(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_else(|| Value::Object(Default::default()));

    validate_required_fields(&body, &["cartId", "productId", "quantity", "unitPrice"])?;
    let cart_id = coerce_id(&body["cartId"], "cartId")?;
    let product_id = coerce_product_id(&body["productId"], "productId")?;
    let quantity = coerce_quantity(&body["quantity"], "quantity")?;
    let unit_price = coerce_price(&body["unitPrice"], "unitPrice")?;

    match services::items::create(&db, cart_id, product_id, quantity, unit_price).await? {
        Some(item) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::new(Item::from(item))),
        )),
        None => Err(AppError::not_found("Cart", cart_id.to_string())),
    }
}

/// GET /items
pub async fn list(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = validate_pagination(query.page.as_deref(), query.limit.as_deref())?;

    let cart_id = match query.cart_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| AppError::Validation {
            message: "Invalid cartId".to_string(),
            field: "cartId".to_string(),
            value: Some(raw.to_string()),
        })?),
    };

    let (rows, total, total_pages) = services::items::list(&db, page, limit, cart_id).await?;
    let data: Vec<Item> = rows.into_iter().map(Item::from).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        page,
        limit,
        total,
        total_pages,
    )))
}

/// GET /items/:id
pub async fn get(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    match services::items::get(&db, id).await? {
        Some(item) => Ok(Json(ApiResponse::new(Item::from(item)))),
        None => Err(AppError::not_found("Item", id.to_string())),
    }
}

/// PUT /items/:id — partial update of productId, quantity, unitPrice.
pub async fn update(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    body: Option<Json<Value>>,
) -> Result<impl IntoResponse, AppError> {
    let body = body.map(|Json(b)| b).unwrap_or_else(|| Value::Object(Default::default()));

    let product_id = match body.get("productId") {
        Some(v) if !v.is_null() => Some(coerce_product_id(v, "productId")?),
        _ => None,
    };
    let quantity = match body.get("quantity") {
        Some(v) if !v.is_null() => Some(coerce_quantity(v, "quantity")?),
        _ => None,
    };
    let unit_price = match body.get("unitPrice") {
        Some(v) if !v.is_null() => Some(coerce_price(v, "unitPrice")?),
        _ => None,
    };

    match services::items::update(&db, id, product_id, quantity, unit_price).await? {
        Some(item) => Ok(Json(ApiResponse::new(Item::from(item)))),
        None => Err(AppError::not_found("Item", id.to_string())),
    }
}

/// DELETE /items/:id
pub async fn remove(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    if services::items::delete(&db, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Item", id.to_string()))
    }
}

/// GET /items/cart/:cart_id
pub async fn list_for_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Path(cart_id): Path<i32>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = validate_pagination(query.page.as_deref(), query.limit.as_deref())?;

    let (rows, total, total_pages) =
        services::items::list_by_cart(&db, cart_id, page, limit).await?;
    let data: Vec<Item> = rows.into_iter().map(Item::from).collect();

    Ok(Json(ApiResponse::paginated(
        data,
        page,
        limit,
        total,
        total_pages,
    )))
}
