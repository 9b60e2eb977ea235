use super::*;
use axum::{Extension, Router, body::Body, http::Request, routing::get};
use jsonwebtoken::{EncodingKey, Header, encode};
use tower::ServiceExt;

const SECRET: &str = "supersecretjwtsecretforunittesting123";
const ACCOUNT_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn token(secret: &str, sub: &str, exp: usize) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

async fn whoami(auth: AuthUser) -> String {
    auth.account_id.to_string()
}

fn app() -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .layer(Extension(Arc::new(AuthConfig::new(SECRET))))
}

async fn call(authorization: Option<String>) -> (StatusCode, String) {
    let mut request = Request::builder().uri("/whoami");
    if let Some(value) = authorization {
        request = request.header("authorization", value);
    }

    let response = app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn validate_accepts_token_signed_with_secret() {
    let claims = AuthConfig::new(SECRET)
        .validate(&token(SECRET, ACCOUNT_ID, 9_999_999_999))
        .unwrap();

    assert_eq!(claims.sub, ACCOUNT_ID);
}

#[test]
fn validate_rejects_expired_and_foreign_tokens() {
    let config = AuthConfig::new(SECRET);

    assert_eq!(
        config.validate(&token(SECRET, ACCOUNT_ID, 1)).unwrap_err(),
        AuthError::InvalidToken
    );
    assert_eq!(
        config
            .validate(&token("wrongsecret", ACCOUNT_ID, 9_999_999_999))
            .unwrap_err(),
        AuthError::InvalidToken
    );
}

#[tokio::test]
async fn extractor_yields_account_id_from_sub() {
    let (status, body) = call(Some(format!(
        "Bearer {}",
        token(SECRET, ACCOUNT_ID, 9_999_999_999)
    )))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, ACCOUNT_ID);
}

#[tokio::test]
async fn extractor_rejects_missing_header_and_non_uuid_subject() {
    let (status, body) = call(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("authentication_failure"));

    let (status, _) = call(Some(format!(
        "Bearer {}",
        token(SECRET, "not-a-uuid", 9_999_999_999)
    )))
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
