//! Query-string extractor with validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the query string into `T` and runs its validation rules.
///
/// Both failure kinds reject with a 400.
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state).await?;
        data.validate()?;
        Ok(ValidatedQuery(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Paging {
        #[validate(range(min = 1))]
        page: Option<u64>,
    }

    async fn handler(ValidatedQuery(q): ValidatedQuery<Paging>) -> String {
        q.page.unwrap_or(1).to_string()
    }

    async fn status_for(uri: &str) -> StatusCode {
        Router::new()
            .route("/", get(handler))
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_query_accepted() {
        assert_eq!(status_for("/").await, StatusCode::OK);
        assert_eq!(status_for("/?page=3").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_query_rejected() {
        assert_eq!(status_for("/?page=0").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?page=abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?page=-1").await, StatusCode::BAD_REQUEST);
    }
}
