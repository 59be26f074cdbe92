//! Shared HTTP plumbing for the remote collaborators.

use crate::errors::{AppError, AppResult};
use reqwest::Response;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(30);

/// Turn a non-2xx response into `AppError::Api`, keeping the body as message.
pub async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body
    };

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
