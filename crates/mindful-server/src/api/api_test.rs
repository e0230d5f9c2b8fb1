use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use mindful_scraper::client::DEFAULT_MAX_BODY_BYTES;
use mindful_scraper::{FetchClient, PriceCache};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn state_with_origin(origin: &str) -> AppState {
    let fetcher =
        FetchClient::new(2, "mindful-test/0.1", DEFAULT_MAX_BODY_BYTES).expect("fetch client");
    let service = PriceService::new(fetcher, PriceCache::default(), Duration::from_secs(5))
        .with_origin_override(origin);
    AppState {
        prices: Arc::new(service),
    }
}

/// Nothing listens on the discard port, so any store request fails fast.
fn offline_state() -> AppState {
    state_with_origin("http://127.0.0.1:9")
}

fn open_app(state: AppState) -> Router {
    build_app(state, AuthState::disabled(), default_rate_limit_state())
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_message(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/messages")
        .header("content-type", "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_other_codes_map_to_internal_error() {
    let response = ApiError::new("req-1", "internal_error", "boom").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let response = ApiError::new("req-1", "not_found", "gone").into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn parse_region_defaults_to_ukraine() {
    assert_eq!(parse_region("req", None).unwrap(), Region::Ukraine);
    assert_eq!(parse_region("req", Some("Europe")).unwrap(), Region::Europe);
    assert!(parse_region("req", Some("mars")).is_err());
}

#[tokio::test]
async fn health_reports_cache_size_and_echoes_request_id() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("req-health")
    );
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["cached_prices"], 0);
    assert_eq!(json["meta"]["request_id"], "req-health");
}

#[tokio::test]
async fn malformed_message_gets_failure_reply_with_ok_status() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(post_message("{\"action\":"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn unknown_store_message_succeeds_with_null_price() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(post_message(
            r#"{"action":"getPrice","storeName":"NoSuchStore","productName":"tv"}"#,
        ))
        .await
        .expect("response");

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"success": true, "price": null}));
}

#[tokio::test]
async fn price_route_returns_scraped_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("text", "iphone"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<b class="product-price">32 499 ₴</b>"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = open_app(state_with_origin(&server.uri()));
    let response = app
        .oneshot(get("/api/v1/prices?store=rozetka&product=iphone"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["price"], "32\u{a0}499₴");
    assert_eq!(json["data"]["region"], "ukraine");
    assert_eq!(json["data"]["store"], "rozetka");
}

#[tokio::test]
async fn price_route_rejects_unknown_region() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(get("/api/v1/prices?store=Rozetka&product=tv&region=mars"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn price_route_rejects_blank_product() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(get("/api/v1/prices?store=Rozetka&product=%20%20"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_route_skips_current_store() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(get(
            "/api/v1/prices/compare?product=lego&region=europe&current_host=www.amazon.de",
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().expect("data array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["store"], "Google Shopping");
    assert!(rows[0]["price"].is_null());
    assert_eq!(
        rows[0]["search_url"],
        "https://www.google.com/search?tbm=shop&q=lego&hl=en"
    );
}

#[tokio::test]
async fn detect_route_maps_host_to_region_and_store() {
    let app = open_app(offline_state());
    let response = app
        .oneshot(get("/api/v1/detect?host=rozetka.com.ua&language=en-US"))
        .await
        .expect("response");

    let json = body_json(response).await;
    assert_eq!(json["data"]["region"], "ukraine");
    assert_eq!(json["data"]["store"], "Rozetka");
}

#[tokio::test]
async fn protected_routes_require_bearer_token_when_enabled() {
    let auth = AuthState::from_keys("ext-key", false).expect("auth");
    let app = build_app(offline_state(), auth, default_rate_limit_state());

    let response = app
        .clone()
        .oneshot(get("/api/v1/detect?host=comfy.ua"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/detect?host=comfy.ua")
                .header("authorization", "Bearer ext-key")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/v1/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_are_rate_limited() {
    let limiter = RateLimitState::new(1, Duration::from_secs(60));
    let app = build_app(offline_state(), AuthState::disabled(), limiter);

    let first = app
        .clone()
        .oneshot(get("/api/v1/detect?host=allo.ua"))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(get("/api/v1/detect?host=allo.ua"))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(second).await;
    assert_eq!(json["error"]["code"], "rate_limited");
}
