pub mod carts;
pub mod items;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::verify_user::UserServiceClient;

// The connection is shared as `Arc<DatabaseConnection>`: `Extension` needs
// `Clone`, and the mock backend's connection is not.
pub fn router(db: DatabaseConnection, users: UserServiceClient) -> Router {
    Router::new()
        .route("/carts", post(carts::create).get(carts::list))
        .route(
            "/carts/:id",
            get(carts::get).put(carts::update).delete(carts::remove),
        )
        .route("/carts/user/:user_id", get(carts::list_for_user))
        .route("/items", post(items::create).get(items::list))
        .route(
            "/items/:id",
            get(items::get).put(items::update).delete(items::remove),
        )
        .route("/items/cart/:cart_id", get(items::list_for_cart))
        .route("/health", get(health))
        .route("/hello", get(hello))
        .layer(Extension(Arc::new(db)))
        .layer(Extension(users))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "cart-service" }))
}

async fn hello() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use tower::ServiceExt;

    fn app(db: DatabaseConnection) -> Router {
        // Points nowhere; tests never exercise the user check.
        let users = UserServiceClient::new("http://localhost:9").unwrap();
        router(db, users)
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_probe_responds() {
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn oversized_limit_is_rejected_before_the_database() {
        let req = Request::builder()
            .uri("/carts?limit=500")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Limit cannot exceed 100");
    }

    #[tokio::test]
    async fn item_create_lists_all_missing_fields() {
        let req = json_request("POST", "/items", serde_json::json!({}));
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Missing required fields: cartId, productId, quantity, unitPrice"
        );
    }

    #[tokio::test]
    async fn item_create_rejects_zero_quantity() {
        let req = json_request(
            "POST",
            "/items",
            serde_json::json!({
                "cartId": 1, "productId": "sku-1", "quantity": 0, "unitPrice": 1.0
            }),
        );
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"]["field"], "quantity");
    }

    #[tokio::test]
    async fn item_create_rejects_negative_price() {
        let req = json_request(
            "POST",
            "/items",
            serde_json::json!({
                "cartId": 1, "productId": "sku-1", "quantity": 1, "unitPrice": -0.01
            }),
        );
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"]["field"], "unitPrice");
    }

    #[tokio::test]
    async fn cart_create_rejects_unknown_status() {
        let req = json_request("POST", "/carts", serde_json::json!({ "status": "archived" }));
        let (status, body) = send(app(empty_db()), req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["details"]["field"], "status");
        assert_eq!(body["error"]["details"]["invalidValue"], "archived");
    }

    #[tokio::test]
    async fn cart_delete_returns_no_content() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 2,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let req = Request::builder()
            .method("DELETE")
            .uri("/carts/7")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(db), req).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn missing_cart_maps_to_not_found_envelope() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<crate::entity::carts::Model>::new()])
            .into_connection();

        let req = Request::builder()
            .uri("/carts/42")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(db), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["details"]["id"], "42");
    }
}
