use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{handlers, request_context, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Define routes
    Router::new()
        .route("/episodes/:slug", get(handlers::episode_page))
        .route("/_data/episodes/:slug", get(handlers::episode_data))
        .route("/_paths", get(handlers::static_paths))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(request_context::request_context_middleware))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use podcastr_shared::{EpisodeSource, Fallback};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        generator::{GeneratorSettings, PageGenerator},
        request_context::REQUEST_ID_HEADER,
        test_support::{record, FakeSource},
    };

    async fn app(source: Arc<FakeSource>) -> Router {
        let source: Arc<dyn EpisodeSource> = source;
        let generator = Arc::new(PageGenerator::new(source, GeneratorSettings {
            prerender_limit: 2,
            revalidate: None,
            fallback: Fallback::Blocking,
        }));
        generator.prebuild().await.expect("prebuild should succeed");
        create_router(AppState::new(generator))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("router should respond");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, headers, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }

    #[tokio::test]
    async fn serves_prebuilt_page_with_cache_headers() {
        let app = app(Arc::new(FakeSource::with_episodes(&["a", "b"]))).await;

        let (status, headers, body) = fetch(app, "/episodes/a").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["x-page-cache"], "HIT");
        assert_eq!(headers["cache-control"], "s-maxage=86400, stale-while-revalidate");
        assert!(headers.contains_key(REQUEST_ID_HEADER));
        assert!(body.contains(r#"<div class="description"><p>hi</p></div>"#));
    }

    #[tokio::test]
    async fn renders_unknown_slug_on_demand() {
        let app = app(Arc::new(FakeSource::with_episodes(&["a", "b", "c"]))).await;

        let (status, headers, body) = fetch(app.clone(), "/episodes/c").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["x-page-cache"], "MISS");
        assert!(body.contains("<h1>Episode c</h1>"));

        let (_, headers, _) = fetch(app, "/episodes/c").await;
        assert_eq!(headers["x-page-cache"], "HIT");
    }

    #[tokio::test]
    async fn missing_episode_is_404() {
        let app = app(Arc::new(FakeSource::with_episodes(&["a"]))).await;

        let (status, _, body) = fetch(app, "/episodes/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_str(&body).expect("json error body");
        assert_eq!(value["code"], 404);
    }

    #[tokio::test]
    async fn api_outage_on_demand_is_502() {
        let source = Arc::new(FakeSource::with_episodes(&["a", "b", "c"]));
        let app = app(Arc::clone(&source)).await;
        source.set_failing(true);

        let (status, _, _) = fetch(app, "/episodes/c").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unparseable_record_is_500() {
        let source = Arc::new(FakeSource::with_episodes(&["a", "b"]));
        source.upsert(record("c", "Episode c", "ontem"));
        let app = app(source).await;

        let (status, headers, body) = fetch(app, "/episodes/c").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!headers.contains_key("x-page-cache"));
        let value: serde_json::Value = serde_json::from_str(&body).expect("json error body");
        assert_eq!(value["code"], 500);
    }

    #[tokio::test]
    async fn data_route_returns_props() {
        let app = app(Arc::new(FakeSource::with_episodes(&["a"]))).await;

        let (status, _, body) = fetch(app, "/_data/episodes/a").await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).expect("json props");
        assert_eq!(value["revalidate"], 86_400);
        assert_eq!(value["props"]["episode"]["durationAsString"], "01:30:00");
        assert_eq!(value["props"]["episode"]["publishedAt"], "10 mai 21");
    }

    #[tokio::test]
    async fn paths_and_health_report_build_output() {
        let app = app(Arc::new(FakeSource::with_episodes(&["a", "b", "c"]))).await;

        let (_, _, paths) = fetch(app.clone(), "/_paths").await;
        let paths: serde_json::Value = serde_json::from_str(&paths).expect("json paths");
        assert_eq!(
            paths,
            serde_json::json!({
                "paths": [{ "params": { "slug": "a" } }, { "params": { "slug": "b" } }],
                "fallback": "blocking"
            })
        );

        let (_, _, health) = fetch(app, "/healthz").await;
        let health: serde_json::Value = serde_json::from_str(&health).expect("json health");
        assert_eq!(health["cached_pages"], 2);
    }
}
