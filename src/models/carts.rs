use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::carts::Model as CartModel;
use crate::models::items::Item;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub user_id: Option<i32>,
}

impl From<CartModel> for Cart {
    fn from(val: CartModel) -> Cart {
        Cart {
            id: val.id,
            created_at: val.created_at,
            modified_at: val.modified_at,
            status: val.status,
            user_id: val.user_id,
        }
    }
}

/// Full cart representation with its items and read-time aggregates.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartWithItems {
    #[serde(flatten)]
    pub cart: Cart,
    pub items: Vec<Item>,
    pub total_quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartRequest {
    pub user_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub user_id: Option<i32>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_with_items_serializes_flat_with_aggregates() {
        let created = Utc::now();
        let body = serde_json::to_value(CartWithItems {
            cart: Cart {
                id: 1,
                created_at: created,
                modified_at: None,
                status: Some("active".to_string()),
                user_id: Some(9),
            },
            items: vec![],
            total_quantity: 0,
            total_price: Decimal::ZERO,
        })
        .unwrap();

        assert_eq!(body["id"], 1);
        assert_eq!(body["userId"], 9);
        assert_eq!(body["status"], "active");
        assert_eq!(body["totalQuantity"], 0);
        assert_eq!(body["totalPrice"], 0.0);
        assert!(body["items"].as_array().unwrap().is_empty());
    }
}
