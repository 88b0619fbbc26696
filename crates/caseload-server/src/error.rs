//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use caseload_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error(transparent)]
  Core(#[from] CoreError),
}

impl Error {
  pub fn not_found(what: impl Into<String>) -> Self {
    Self::Core(CoreError::NotFound(what.into()))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"caseload\""),
        );
        res
      }
      Error::Core(CoreError::Forbidden(action)) => {
        tracing::warn!(%action, "transition denied");
        (
          StatusCode::FORBIDDEN,
          Json(json!({ "error": format!("not permitted to {action}") })),
        )
          .into_response()
      }
      Error::Core(CoreError::NotFound(what)) => (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{what} not found") })),
      )
        .into_response(),
      Error::Core(CoreError::ValidationFailed(messages)) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
          "error":    format!("{}.", messages.join(". ")),
          "messages": messages,
        })),
      )
        .into_response(),
      Error::Core(CoreError::Store(e)) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "internal error" })),
        )
          .into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn body_of(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn store_failure_hides_detail() {
    let cause = std::io::Error::other("disk I/O error at /var/lib/caseload.db");
    let res = Error::Core(CoreError::Store(Box::new(cause))).into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_of(res).await, json!({ "error": "internal error" }));
  }

  #[tokio::test]
  async fn validation_failure_lists_messages() {
    let res = Error::Core(CoreError::invalid("Case must exist")).into_response();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_of(res).await;
    assert_eq!(body["messages"], json!(["Case must exist"]));
  }
}
