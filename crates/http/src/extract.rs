//! Extractors that deserialize a request component and run its declared
//! `validator` constraints before the handler sees it.
//!
//! Every failure, whether malformed input or a violated constraint, is
//! reported as [`AppError::Validation`].

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body validated against its declared field constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Query string validated against its declared field constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

/// Path parameters validated against their declared field constraints
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Limit {
        #[validate(range(min = 1, max = 10))]
        n: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Note {
        #[validate(length(min = 1, max = 5))]
        text: String,
    }

    fn router() -> Router {
        Router::new()
            .route(
                "/q",
                get(|ValidatedQuery(limit): ValidatedQuery<Limit>| async move {
                    limit.n.to_string()
                }),
            )
            .route(
                "/p/{n}",
                get(|ValidatedPath(limit): ValidatedPath<Limit>| async move {
                    limit.n.to_string()
                }),
            )
            .route(
                "/j",
                post(|ValidatedJson(note): ValidatedJson<Note>| async move { note.text }),
            )
    }

    async fn status_of(request: axum::http::Request<Body>) -> StatusCode {
        router().oneshot(request).await.unwrap().status()
    }

    fn get_request(uri: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_request(body: &str) -> axum::http::Request<Body> {
        axum::http::Request::builder()
            .method("POST")
            .uri("/j")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn query_within_bounds_is_accepted() {
        assert_eq!(status_of(get_request("/q?n=10")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn query_out_of_bounds_is_unprocessable() {
        assert_eq!(
            status_of(get_request("/q?n=11")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn malformed_query_is_unprocessable() {
        assert_eq!(
            status_of(get_request("/q?n=ten")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(get_request("/q")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn path_is_validated() {
        assert_eq!(status_of(get_request("/p/3")).await, StatusCode::OK);
        assert_eq!(
            status_of(get_request("/p/0")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(get_request("/p/-4")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn json_body_is_validated() {
        assert_eq!(
            status_of(json_request(r#"{"text":"hey"}"#)).await,
            StatusCode::OK
        );
        assert_eq!(
            status_of(json_request(r#"{"text":"too long"}"#)).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(json_request(r#"{"text":"#)).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn json_without_content_type_is_bad_request() {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/j")
            .body(Body::from(r#"{"text":"hey"}"#))
            .unwrap();
        assert_eq!(status_of(request).await, StatusCode::BAD_REQUEST);
    }
}
