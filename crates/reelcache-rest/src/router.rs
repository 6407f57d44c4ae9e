//! Main application router.

use crate::{
    controllers::{admin_controller, health_controller, movie_controller},
    middleware::logging_middleware,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use reelcache_config::ServerConfig;
use reelcache_service::{DetailsService, KeyValueCache};
use shaku::{HasComponent, Module};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the main application router from a Shaku module.
///
/// The module must provide the `DetailsService` and `KeyValueCache` components.
pub fn create_router<M>(module: &M, server_config: &ServerConfig) -> Router
where
    M: Module + HasComponent<dyn DetailsService> + HasComponent<dyn KeyValueCache>,
{
    create_router_with_state(AppState::from_module(module), server_config)
}

/// Creates the main application router around an existing state.
pub fn create_router_with_state(state: AppState, server_config: &ServerConfig) -> Router {
    let api_router = Router::new()
        .nest("/movies", movie_controller::router())
        .nest("/admin", admin_controller::router());

    let router = Router::new()
        .merge(health_controller::router())
        .merge(movie_controller::legacy_router())
        .nest("/api/v1", api_router)
        .route("/", get(root))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(server_config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(server_config.request_timeout())),
        );

    info!("Router created with movie, admin and health endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins = server_config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Reelcache API v1"
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use reelcache_core::{MovieRecord, MovieSummary, ReelError, ReelResult};
    use reelcache_service::{CacheExt, DetailsServiceImpl, InMemoryCache, MetadataProvider};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    /// Provider that knows a single movie and counts calls.
    #[derive(Default)]
    struct StubProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataProvider for StubProvider {
        async fn fetch_details(&self, movie_id: &str) -> ReelResult<MovieRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if movie_id == "550" {
                MovieRecord::try_from(json!({"id": 550, "title": "Fight Club"}))
            } else {
                Err(ReelError::provider(Some(404), "Provider returned 404"))
            }
        }

        async fn fetch_popular(&self) -> ReelResult<Vec<MovieSummary>> {
            Ok(vec![MovieSummary {
                id: 550,
                title: "Fight Club".to_string(),
                year: "1999".to_string(),
                rating: json!(8.4),
                description: "No description available.".to_string(),
            }])
        }
    }

    /// Cache whose store is always unreachable.
    struct DownCache;

    #[async_trait]
    impl KeyValueCache for DownCache {
        async fn get_raw(&self, _key: &str) -> ReelResult<Option<String>> {
            Err(ReelError::cache("connection refused"))
        }

        async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> ReelResult<()> {
            Err(ReelError::cache("connection refused"))
        }

        async fn delete(&self, _key: &str) -> ReelResult<bool> {
            Err(ReelError::cache("connection refused"))
        }

        async fn clear(&self) -> ReelResult<()> {
            Err(ReelError::cache("connection refused"))
        }

        async fn ping(&self) -> ReelResult<()> {
            Err(ReelError::cache("connection refused"))
        }

        fn is_enabled(&self) -> bool {
            true
        }
    }

    struct TestApp {
        router: Router,
        cache: Arc<dyn KeyValueCache>,
        provider: Arc<StubProvider>,
    }

    fn app_with_cache(cache: Arc<dyn KeyValueCache>) -> TestApp {
        let provider = Arc::new(StubProvider::default());
        let service = DetailsServiceImpl::new(
            Arc::clone(&cache),
            provider.clone(),
            Duration::from_secs(3600),
        );
        let state = AppState::new(Arc::new(service), Arc::clone(&cache));
        TestApp {
            router: create_router_with_state(state, &ServerConfig::default()),
            cache,
            provider,
        }
    }

    fn app() -> TestApp {
        app_with_cache(Arc::new(InMemoryCache::new()))
    }

    async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_legacy_route_returns_raw_document() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/movie/550").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": 550, "title": "Fight Club"}));
    }

    #[tokio::test]
    async fn test_legacy_route_not_found() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/movie/999999999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Movie not found"}));
        let cached: Option<Value> = app.cache.get("999999999").await.unwrap();
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_second_request_served_from_cache() {
        let app = app();

        send(&app.router, Method::GET, "/movie/550").await;
        let (status, _) = send(&app.router, Method::GET, "/api/v1/movies/550").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_versioned_route_wraps_envelope() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/api/v1/movies/550").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["title"], json!("Fight Club"));
    }

    #[tokio::test]
    async fn test_versioned_route_not_found() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/api/v1/movies/999999999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_popular_movies() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/api/v1/movies/popular").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["year"], json!("1999"));
    }

    #[tokio::test]
    async fn test_cache_down_is_service_unavailable() {
        let app = app_with_cache(Arc::new(DownCache));

        let (status, body) = send(&app.router, Method::GET, "/movie/550").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], json!("CACHE_UNAVAILABLE"));
        assert_eq!(app.provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_evict_and_clear() {
        let app = app();
        send(&app.router, Method::GET, "/movie/550").await;

        let (status, body) = send(&app.router, Method::DELETE, "/api/v1/admin/cache/550").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!({"deleted": true}));

        let (_, body) = send(&app.router, Method::DELETE, "/api/v1/admin/cache/550").await;
        assert_eq!(body["data"], json!({"deleted": false}));

        let (status, _) = send(&app.router, Method::DELETE, "/api/v1/admin/cache").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();

        let (status, body) = send(&app.router, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));

        let (status, _) = send(&app.router, Method::GET, "/live").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app.router, Method::GET, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cache"], json!("up"));
    }

    #[tokio::test]
    async fn test_not_ready_when_cache_down() {
        let app = app_with_cache(Arc::new(DownCache));

        let (status, body) = send(&app.router, Method::GET, "/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["cache"], json!("down"));
    }
}
