use axum::http::StatusCode;
use thiserror::Error;

/// Failure kinds surfaced by every use case. `kind()` is the stable string
/// clients match on; messages are for humans.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UseCaseError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("billing provider request failed")]
    UpstreamFailure,
    #[error("internal server error")]
    StoreFailure,
    #[error("{0}")]
    AuthenticationFailure(String),
}

impl UseCaseError {
    pub fn kind(&self) -> &'static str {
        match self {
            UseCaseError::Validation(_) => "validation",
            UseCaseError::NotFound(_) => "not_found",
            UseCaseError::Conflict(_) => "conflict",
            UseCaseError::UpstreamFailure => "upstream_failure",
            UseCaseError::StoreFailure => "store_failure",
            UseCaseError::AuthenticationFailure(_) => "authentication_failure",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            UseCaseError::Validation(_) => StatusCode::BAD_REQUEST,
            UseCaseError::NotFound(_) => StatusCode::NOT_FOUND,
            UseCaseError::Conflict(_) => StatusCode::CONFLICT,
            UseCaseError::UpstreamFailure => StatusCode::BAD_GATEWAY,
            UseCaseError::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
            UseCaseError::AuthenticationFailure(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, UseCaseError>;

/// Rejects blank text for a named field.
pub fn require_text(field: &str, value: &str) -> UseCaseResult<()> {
    if value.trim().is_empty() {
        return Err(UseCaseError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_status_codes() {
        let cases = [
            (UseCaseError::Validation("x".into()), "validation", 400),
            (UseCaseError::NotFound("x".into()), "not_found", 404),
            (UseCaseError::Conflict("x".into()), "conflict", 409),
            (UseCaseError::UpstreamFailure, "upstream_failure", 502),
            (UseCaseError::StoreFailure, "store_failure", 500),
            (UseCaseError::AuthenticationFailure("x".into()), "authentication_failure", 401),
        ];

        for (error, kind, status) in cases {
            assert_eq!(error.kind(), kind);
            assert_eq!(error.status_code().as_u16(), status);
        }
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("plate", "AB-123").is_ok());
        assert_eq!(
            require_text("plate", "  "),
            Err(UseCaseError::Validation("plate must not be empty".to_string()))
        );
    }
}
