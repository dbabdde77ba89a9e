use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::cart_items::Model as ItemModel;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: String,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_line: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<ItemModel> for Item {
    fn from(val: ItemModel) -> Item {
        Item {
            id: val.id,
            cart_id: val.cart_id,
            product_id: val.product_id,
            quantity: val.quantity,
            unit_price: val.unit_price,
            total_line: val.total_line,
            created_at: val.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_prices_as_numbers() {
        let body = serde_json::to_value(Item {
            id: 4,
            cart_id: 1,
            product_id: "sku-42".to_string(),
            quantity: 2,
            unit_price: Decimal::new(300, 2),
            total_line: Decimal::new(600, 2),
            created_at: Utc::now(),
        })
        .unwrap();

        assert_eq!(body["cartId"], 1);
        assert_eq!(body["productId"], "sku-42");
        assert_eq!(body["unitPrice"], 3.0);
        assert_eq!(body["totalLine"], 6.0);
    }
}
