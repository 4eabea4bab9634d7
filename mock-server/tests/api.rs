use std::collections::BTreeMap;

use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Item};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- create ---

#[tokio::test]
async fn create_item_returns_201() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"name":"x"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Item = body_json(resp).await;
    assert_eq!(
        item,
        Item {
            id: 1,
            name: "x".to_string()
        }
    );
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/items", r#"{"title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_item_not_found() {
    let resp = app().oneshot(get("/items/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_bytes(resp).await, "item not found");
}

#[tokio::test]
async fn get_item_bad_id_returns_400() {
    let resp = app().oneshot(get("/items/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- diagnostics routes ---

#[tokio::test]
async fn headers_are_echoed_lowercase() {
    let request = Request::builder()
        .uri("/headers")
        .header("X-Trace", "abc")
        .body(String::new())
        .unwrap();
    let resp = app().oneshot(request).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let headers: BTreeMap<String, String> = body_json(resp).await;
    assert_eq!(headers.get("x-trace").map(String::as_str), Some("abc"));
}

#[tokio::test]
async fn teapot_returns_418() {
    let resp = app().oneshot(get("/teapot")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::IM_A_TEAPOT);
    assert_eq!(body_bytes(resp).await, "short and stout");
}

// --- create then get ---

#[tokio::test]
async fn create_then_get() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/items", r#"{"name":"first"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let first: Item = body_json(resp).await;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/items", r#"{"name":"second"}"#))
        .await
        .unwrap();
    let second: Item = body_json(resp).await;
    assert_eq!(second.id, first.id + 1);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/items/{}", first.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Item = body_json(resp).await;
    assert_eq!(fetched, first);
}
