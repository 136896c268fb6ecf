use std::sync::Arc;

use api::routers::api;
use axum::Router;
use tower_http::{
    cors::CorsLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};
use tower_layer::Layer;
use web::AppState;

/// `/bookmarks/` and `/bookmarks` reach the same handler. CORS echoes the
/// request origin and allows credentials, so browser clients may send cookies.
pub fn app(state: Arc<AppState>) -> NormalizePath<Router> {
    let router = Router::new()
        .merge(api())
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use metadata::{MetadataFetcher, DEFAULT_TIMEOUT};
    use serde_json::Value;
    use tower::ServiceExt;
    use web::AppState;

    use super::app;

    // The pool connects lazily; none of these requests reach the store.
    fn build_state() -> Arc<AppState> {
        Arc::new(AppState {
            db_pool: db::pool("postgres://localhost/linkshelf_test", 1).unwrap(),
            metadata: MetadataFetcher::new(DEFAULT_TIMEOUT).unwrap(),
        })
    }

    fn post_bookmark(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/bookmarks/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn rejects_non_http_scheme() {
        let res = app(build_state())
            .oneshot(post_bookmark(r#"{"url": "ftp://example.com/file"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = hyper::body::to_bytes(res.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "URL scheme should be 'http' or 'https'");
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let res = app(build_state())
            .oneshot(post_bookmark(r#"{"url": "not a url"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn rejects_non_numeric_id() {
        let req = Request::builder()
            .method(Method::PATCH)
            .uri("/bookmarks/abc/archive")
            .body(Body::empty())
            .unwrap();
        let res = app(build_state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route() {
        let req = Request::builder()
            .uri("/bookmarks/1")
            .body(Body::empty())
            .unwrap();
        let res = app(build_state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn preflight_allows_credentials() {
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/bookmarks")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let res = app(build_state()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let headers = res.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }
}
