use std::env;
use std::time::Duration;

use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_BASE_URL: &str = "http://user-api:3000";

/// Outcome of a user lookup. Timeouts and connection failures are reported
/// as `Unreachable`, never silently collapsed into exists / not-exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCheck {
    Exists,
    NotFound,
    Unreachable,
}

#[derive(Clone)]
pub struct UserServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl UserServiceClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_env() -> Result<Self, AppError> {
        let base_url =
            env::var("USER_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub async fn check(&self, user_id: i32) -> UserCheck {
        let url = format!("{}/users/{}", self.base_url, user_id);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => UserCheck::Exists,
            Ok(resp) if resp.status() == reqwest::StatusCode::NOT_FOUND => UserCheck::NotFound,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), user_id, "unexpected status from user service");
                UserCheck::Unreachable
            }
            Err(e) => {
                tracing::warn!(error = %e, user_id, "user service request failed");
                UserCheck::Unreachable
            }
        }
    }

    /// Blocks a cart write unless the referenced user is confirmed to exist.
    /// Both `NotFound` and `Unreachable` surface as `USER_NOT_FOUND` for
    /// compatibility with existing clients; the reason text tells them apart.
    pub async fn ensure_exists(&self, user_id: i32) -> Result<(), AppError> {
        match self.check(user_id).await {
            UserCheck::Exists => Ok(()),
            UserCheck::NotFound => Err(AppError::UserNotFound {
                user_id,
                reason: format!("User with ID {} not found", user_id),
            }),
            UserCheck::Unreachable => Err(AppError::UserNotFound {
                user_id,
                reason: "Unable to verify user with the user service".to_string(),
            }),
        }
    }
}
