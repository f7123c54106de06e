use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{build_router, config::AuthConfig, db::memory::MemoryStore, AppState};

pub const ADMIN_KEY: &str = "admin-secret";
pub const SOURCE_KEY: &str = "woo";

pub fn app(store: MemoryStore) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(store);
    let state = AppState {
        store: store.clone(),
        auth: Arc::new(AuthConfig {
            admin_key: ADMIN_KEY.to_string(),
            source_key: SOURCE_KEY.to_string(),
        }),
    };
    (build_router(state), store)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: String,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body is not JSON")
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("router error during test request");

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");

    TestResponse {
        status,
        content_type,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}
