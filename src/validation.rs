use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::AppError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

pub const CART_STATUSES: [&str; 3] = ["active", "completed", "abandoned"];

/// Normalizes `page`/`limit` query parameters. Absent or empty values fall
/// back to the defaults; anything non-numeric or out of range is rejected.
pub fn validate_pagination(
    page: Option<&str>,
    limit: Option<&str>,
) -> Result<(u64, u64), AppError> {
    let page = parse_param(page, DEFAULT_PAGE as i64)?;
    let limit = parse_param(limit, DEFAULT_LIMIT as i64)?;

    if page < 1 {
        return Err(AppError::validation(
            "page",
            "Page must be greater than or equal to 1",
        ));
    }
    if limit < 1 {
        return Err(AppError::validation(
            "limit",
            "Limit must be greater than or equal to 1",
        ));
    }
    if limit as u64 > MAX_LIMIT {
        return Err(AppError::validation("limit", "Limit cannot exceed 100"));
    }

    Ok((page as u64, limit as u64))
}

fn parse_param(raw: Option<&str>, default: i64) -> Result<i64, AppError> {
    match raw {
        None => Ok(default),
        Some(s) if s.trim().is_empty() => Ok(default),
        Some(s) => s.trim().parse::<i64>().map_err(|_| {
            AppError::validation("page or limit", "Invalid pagination parameters")
        }),
    }
}

/// Checks that every required key is present in the payload, reporting all
/// missing fields at once. An explicit JSON `null` counts as missing.
pub fn validate_required_fields(payload: &Value, fields: &[&str]) -> Result<(), AppError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|field| payload.get(**field).map_or(true, Value::is_null))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(
            missing.join(", "),
            format!("Missing required fields: {}", missing.join(", ")),
        ))
    }
}

pub fn validate_status(status: &str) -> Result<(), AppError> {
    if CART_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(AppError::Validation {
            message: format!("Status must be one of: {}", CART_STATUSES.join(", ")),
            field: "status".to_string(),
            value: Some(status.to_string()),
        })
    }
}

/// Coerces a JSON value into a positive record id. Integral strings are
/// accepted for parity with form-encoded clients.
pub fn coerce_id(value: &Value, field: &str) -> Result<i32, AppError> {
    coerce_integer(value, field)?
        .try_into()
        .map_err(|_| AppError::validation(field, format!("{} is out of range", field)))
}

pub fn coerce_quantity(value: &Value, field: &str) -> Result<i32, AppError> {
    let quantity = coerce_integer(value, field)?;
    if quantity <= 0 {
        return Err(AppError::validation(
            field,
            "Quantity must be greater than 0",
        ));
    }
    quantity
        .try_into()
        .map_err(|_| AppError::validation(field, format!("{} is out of range", field)))
}

pub fn coerce_price(value: &Value, field: &str) -> Result<Decimal, AppError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => {
            return Err(AppError::validation(
                field,
                format!("{} must be a number", field),
            ))
        }
    };
    let price = Decimal::from_str(&text)
        .map_err(|_| AppError::validation(field, format!("{} must be a number", field)))?;
    if price < Decimal::ZERO {
        return Err(AppError::validation(
            field,
            "Unit price cannot be negative",
        ));
    }
    Ok(price)
}

pub fn coerce_product_id(value: &Value, field: &str) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::validation(
            field,
            format!("{} must be a string", field),
        )),
    }
}

// Accepts integral floats (`2.0`) as well, since JSON clients routinely send
// whole numbers with a decimal point.
fn coerce_integer(value: &Value, field: &str) -> Result<i64, AppError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| {
                AppError::validation(field, format!("{} must be an integer", field))
            }),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| AppError::validation(field, format!("{} must be an integer", field))),
        _ => Err(AppError::validation(
            field,
            format!("{} must be an integer", field),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pagination_defaults_when_absent_or_empty() {
        assert_eq!(validate_pagination(None, None).unwrap(), (1, 20));
        assert_eq!(validate_pagination(Some(""), Some("")).unwrap(), (1, 20));
        assert_eq!(validate_pagination(Some("3"), Some("50")).unwrap(), (3, 50));
    }

    #[test]
    fn pagination_rejects_out_of_range() {
        assert!(validate_pagination(Some("0"), None).is_err());
        assert!(validate_pagination(None, Some("0")).is_err());
        assert!(validate_pagination(None, Some("101")).is_err());
        assert!(validate_pagination(Some("-1"), Some("20")).is_err());
    }

    #[test]
    fn pagination_rejects_non_numeric() {
        assert!(validate_pagination(Some("abc"), None).is_err());
        assert!(validate_pagination(None, Some("1.5")).is_err());
    }

    #[test]
    fn limit_100_is_the_inclusive_maximum() {
        assert_eq!(validate_pagination(None, Some("100")).unwrap(), (1, 100));
    }

    #[test]
    fn required_fields_reports_every_missing_field() {
        let payload = json!({ "productId": "sku-1", "quantity": null });
        let err = validate_required_fields(
            &payload,
            &["cartId", "productId", "quantity", "unitPrice"],
        )
        .unwrap_err();
        match err {
            AppError::Validation { message, .. } => {
                assert_eq!(
                    message,
                    "Missing required fields: cartId, quantity, unitPrice"
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn required_fields_accepts_complete_payload() {
        let payload = json!({
            "cartId": 1, "productId": "sku-1", "quantity": 2, "unitPrice": 3.0
        });
        assert!(validate_required_fields(
            &payload,
            &["cartId", "productId", "quantity", "unitPrice"]
        )
        .is_ok());
    }

    #[test]
    fn status_domain_is_enforced() {
        assert!(validate_status("active").is_ok());
        assert!(validate_status("completed").is_ok());
        assert!(validate_status("abandoned").is_ok());
        assert!(validate_status("archived").is_err());
    }

    #[test]
    fn quantity_must_be_a_positive_integer() {
        assert_eq!(coerce_quantity(&json!(2), "quantity").unwrap(), 2);
        assert_eq!(coerce_quantity(&json!("4"), "quantity").unwrap(), 4);
        assert_eq!(coerce_quantity(&json!(2.0), "quantity").unwrap(), 2);
        assert!(coerce_quantity(&json!(0), "quantity").is_err());
        assert!(coerce_quantity(&json!(-1), "quantity").is_err());
        assert!(coerce_quantity(&json!(2.5), "quantity").is_err());
        assert!(coerce_quantity(&json!("two"), "quantity").is_err());
    }

    #[test]
    fn price_must_be_non_negative() {
        assert_eq!(
            coerce_price(&json!(5.5), "unitPrice").unwrap(),
            Decimal::new(55, 1)
        );
        assert_eq!(
            coerce_price(&json!(0), "unitPrice").unwrap(),
            Decimal::ZERO
        );
        assert!(coerce_price(&json!(-0.01), "unitPrice").is_err());
        assert!(coerce_price(&json!("free"), "unitPrice").is_err());
    }
}
