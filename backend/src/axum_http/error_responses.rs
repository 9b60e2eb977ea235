use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::usecases::errors::UseCaseError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub kind: String,
    pub message: String,
}

impl IntoResponse for UseCaseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Store and provider details stay in the logs.
        let body = Json(ErrorResponse {
            code: status.as_u16(),
            kind: self.kind().to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn error_body_carries_code_kind_and_message() {
        let response = UseCaseError::Conflict("account already has a subscription".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["code"], 409);
        assert_eq!(json["kind"], "conflict");
        assert_eq!(json["message"], "account already has a subscription");
    }

    #[tokio::test]
    async fn store_failure_hides_details() {
        let response = UseCaseError::StoreFailure.into_response();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["message"], "internal server error");
    }
}
