//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Versioned API routes, mounted under `/api` by the server shell
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/v1/products", products::router(state))
}

/// Full application: docs, middleware, `/api/v1/products`, `/health`, `/ready`
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.http)?
        .merge(health_router(state.config.app))
        .merge(health::router(state));

    Ok(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{
        app_info,
        server::{HttpConfig, ServerConfig},
    };
    use database::mongodb::MongoConfig;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    // The driver connects lazily, so routes that never touch the store can be
    // exercised without a server.
    async fn test_app() -> Router {
        let mongo_config = MongoConfig::with_database("mongodb://127.0.0.1:1", "catalog");
        let mongo_client = mongodb::Client::with_uri_str(mongo_config.url())
            .await
            .unwrap();
        let db = mongo_client.database(mongo_config.database());

        let state = AppState {
            config: Config {
                app: app_info!(),
                mongodb: mongo_config,
                server: ServerConfig::default(),
                http: HttpConfig::default(),
                environment: Environment::Development,
            },
            mongo_client,
            db,
        };

        app(&state).unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get(test_app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["name"], "products_api");
    }

    #[tokio::test]
    async fn test_malformed_id_rejected_before_store() {
        let (status, body) = get(test_app().await, "/api/v1/products/xyz").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "bad request" }));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get(test_app().await, "/api/v2/products").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "not found" }));
    }

    #[tokio::test]
    async fn test_unsupported_method_on_product() {
        let response = test_app()
            .await
            .oneshot(
                Request::patch("/api/v1/products/507f1f77bcf86cd799439011")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "method not allowed" }));
    }

    #[tokio::test]
    async fn test_oversized_create_body() {
        let body = json!({
            "title": "x".repeat(3 * 1024 * 1024),
            "description": "B",
            "url": "C"
        });
        let response = test_app()
            .await
            .oneshot(
                Request::post("/api/v1/products")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "payload too large" }));
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (status, body) = get(test_app().await, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/products/{id}"].is_object());
    }
}
