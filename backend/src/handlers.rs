use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use podcastr_shared::{PageError, StaticPaths, StaticProps};
use serde::Serialize;

use crate::{generator::Served, state::AppState};

const PAGE_CACHE_HEADER: &str = "x-page-cache";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cached_pages: usize,
}

/// GET /episodes/:slug — rendered episode page
pub async fn episode_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.generator.serve(&slug).await {
        Ok(served) => {
            let headers = cache_headers(&served);
            (StatusCode::OK, headers, Html(served.page.html.to_string())).into_response()
        },
        Err(err) => page_error(&slug, err),
    }
}

/// GET /_data/episodes/:slug — props the page was rendered from
pub async fn episode_data(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match state.generator.serve(&slug).await {
        Ok(served) => {
            let headers = cache_headers(&served);
            let props: StaticProps = served.page.props.as_ref().clone();
            (StatusCode::OK, headers, Json(props)).into_response()
        },
        Err(err) => page_error(&slug, err),
    }
}

/// GET /_paths — routes pre-rendered at startup
pub async fn static_paths(State(state): State<AppState>) -> Json<StaticPaths> {
    Json(state.generator.static_paths().await)
}

/// GET /healthz
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cached_pages: state.generator.cached_pages(),
    })
}

fn cache_headers(served: &Served) -> [(HeaderName, String); 2] {
    let max_age = served.page.props.revalidate.as_secs();
    [
        (header::CACHE_CONTROL, format!("s-maxage={max_age}, stale-while-revalidate")),
        (HeaderName::from_static(PAGE_CACHE_HEADER), served.status.as_str().to_string()),
    ]
}

fn page_error(slug: &str, err: PageError) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if matches!(err, PageError::Api(_)) {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    if status == StatusCode::NOT_FOUND {
        tracing::info!("no episode page for slug={}: {}", slug, err);
    } else {
        tracing::warn!("failed to render episode page slug={}: {}", slug, err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code: status.as_u16(),
        }),
    )
        .into_response()
}
