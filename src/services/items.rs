use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::entity::cart_items;
use crate::entity::prelude::{CartItems, Carts};
use crate::error::AppError;

/// Creates an item against an existing cart. The parent-existence check and
/// the insert share one transaction so the row can never land on a cart that
/// disappeared in between. Returns `None` when the cart does not exist.
///
/// `total_line` is left unset: the generated column computes it and the
/// RETURNING clause carries it back on the persisted model.
pub async fn create(
    db: &DatabaseConnection,
    cart_id: i32,
    product_id: String,
    quantity: i32,
    unit_price: Decimal,
) -> Result<Option<cart_items::Model>, AppError> {
    let txn = db.begin().await?;

    if Carts::find_by_id(cart_id).one(&txn).await?.is_none() {
        txn.rollback().await?;
        return Ok(None);
    }

    let item = cart_items::ActiveModel {
        cart_id: Set(cart_id),
        product_id: Set(product_id),
        quantity: Set(quantity),
        unit_price: Set(unit_price),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let item = item
        .insert(&txn)
        .await
        .map_err(|e| AppError::from(e).with_context("creating cart item"))?;
    txn.commit().await?;

    Ok(Some(item))
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<Option<cart_items::Model>, AppError> {
    Ok(CartItems::find_by_id(id).one(db).await?)
}

pub async fn list(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
    cart_id: Option<i32>,
) -> Result<(Vec<cart_items::Model>, u64, u64), AppError> {
    let mut query = CartItems::find();
    if let Some(cart_id) = cart_id {
        query = query.filter(cart_items::Column::CartId.eq(cart_id));
    }

    let paginator = query
        .order_by_desc(cart_items::Column::CreatedAt)
        .order_by_desc(cart_items::Column::Id)
        .paginate(db, limit);

    let total = paginator.num_items().await?;
    let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
    let rows = paginator.fetch_page(page - 1).await?;

    Ok((rows, total, total_pages))
}

pub async fn list_by_cart(
    db: &DatabaseConnection,
    cart_id: i32,
    page: u64,
    limit: u64,
) -> Result<(Vec<cart_items::Model>, u64, u64), AppError> {
    list(db, page, limit, Some(cart_id)).await
}

/// Partial update of the three mutable fields. Items carry no modification
/// timestamp; the generated column keeps `total_line` in step with whatever
/// ends up stored.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    product_id: Option<String>,
    quantity: Option<i32>,
    unit_price: Option<Decimal>,
) -> Result<Option<cart_items::Model>, AppError> {
    let Some(item) = CartItems::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let mut item: cart_items::ActiveModel = item.into();
    if let Some(product_id) = product_id {
        item.product_id = Set(product_id);
    }
    if let Some(quantity) = quantity {
        item.quantity = Set(quantity);
    }
    if let Some(unit_price) = unit_price {
        item.unit_price = Set(unit_price);
    }

    let updated = item
        .update(db)
        .await
        .map_err(|e| AppError::from(e).with_context("updating cart item"))?;
    Ok(Some(updated))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, AppError> {
    let result = CartItems::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| AppError::from(e).with_context("deleting cart item"))?;
    Ok(result.rows_affected > 0)
}
