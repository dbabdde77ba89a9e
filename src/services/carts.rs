use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entity::prelude::{CartItems, Carts};
use crate::entity::{cart_items, carts};
use crate::error::AppError;

/// A cart with its items and the aggregates derived from them. Totals are
/// computed from the live item set on every read, never persisted.
pub struct CartWithTotals {
    pub cart: carts::Model,
    pub items: Vec<cart_items::Model>,
    pub total_quantity: i64,
    pub total_price: Decimal,
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: Option<i32>,
    status: Option<String>,
) -> Result<carts::Model, AppError> {
    let cart = carts::ActiveModel {
        status: Set(Some(status.unwrap_or_else(|| "active".to_string()))),
        user_id: Set(user_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    cart.insert(db)
        .await
        .map_err(|e| AppError::from(e).with_context("creating cart"))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<carts::Model>, AppError> {
    Ok(Carts::find_by_id(id).one(db).await?)
}

/// Lists carts newest-first with optional equality filters, returning the
/// requested page plus `(total, total_pages)`.
pub async fn list(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
    user_id: Option<i32>,
    status: Option<String>,
) -> Result<(Vec<carts::Model>, u64, u64), AppError> {
    let mut query = Carts::find();
    if let Some(user_id) = user_id {
        query = query.filter(carts::Column::UserId.eq(user_id));
    }
    if let Some(status) = status {
        query = query.filter(carts::Column::Status.eq(status));
    }

    let paginator = query
        .order_by_desc(carts::Column::CreatedAt)
        .order_by_desc(carts::Column::Id)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
    let rows = paginator.fetch_page(page - 1).await?;

    Ok((rows, total, total_pages))
}

pub async fn list_by_user(
    db: &DatabaseConnection,
    user_id: i32,
    page: u64,
    limit: u64,
) -> Result<(Vec<carts::Model>, u64, u64), AppError> {
    list(db, page, limit, Some(user_id), None).await
}

/// Partial update. `modified_at` is stamped on every successful update,
/// even when no field actually changed.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    user_id: Option<i32>,
    status: Option<String>,
) -> Result<Option<carts::Model>, AppError> {
    let Some(cart) = get(db, id).await? else {
        return Ok(None);
    };

    let mut cart: carts::ActiveModel = cart.into();
    if let Some(user_id) = user_id {
        cart.user_id = Set(Some(user_id));
    }
    if let Some(status) = status {
        cart.status = Set(Some(status));
    }
    cart.modified_at = Set(Some(Utc::now()));

    let updated = cart
        .update(db)
        .await
        .map_err(|e| AppError::from(e).with_context("updating cart"))?;
    Ok(Some(updated))
}

/// Deletes the cart and all of its items in one transaction. Returns whether
/// the cart existed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, AppError> {
    let txn = db.begin().await?;

    CartItems::delete_many()
        .filter(cart_items::Column::CartId.eq(id))
        .exec(&txn)
        .await
        .map_err(|e| AppError::from(e).with_context("deleting cart items"))?;

    let result = Carts::delete_by_id(id)
        .exec(&txn)
        .await
        .map_err(|e| AppError::from(e).with_context("deleting cart"))?;

    txn.commit().await?;
    Ok(result.rows_affected > 0)
}

pub async fn get_with_items(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<CartWithTotals>, AppError> {
    let Some(cart) = get(db, id).await? else {
        return Ok(None);
    };

    let items = cart
        .find_related(CartItems)
        .order_by_asc(cart_items::Column::Id)
        .all(db)
        .await?;

    let total_quantity: i64 = items.iter().map(|item| i64::from(item.quantity)).sum();
    let total_price = items
        .iter()
        .map(|item| item.total_line)
        .sum::<Decimal>()
        .round_dp(2);

    Ok(Some(CartWithTotals {
        cart,
        items,
        total_quantity,
        total_price,
    }))
}
