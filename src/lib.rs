use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod rpc;

use domain::params::{
    AssetBatch, AssetById, AssetProof, AssetProofBatch, AssetsByAuthority, AssetsByCreator,
    AssetsByGroup, AssetsByOwner, SearchAssets, SignaturesForAsset, TokenAccounts,
};
use http::handlers::{forward, health};
use rpc::RpcTransport;

#[derive(Clone)]
pub struct AppState {
    pub rpc: Arc<dyn RpcTransport>,
}

impl AppState {
    pub fn new(rpc: Arc<dyn RpcTransport>) -> Self {
        Self { rpc }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/asset", post(forward::<AssetById>))
        .route("/api/asset/proof", post(forward::<AssetProof>))
        .route("/api/asset/signatures", post(forward::<SignaturesForAsset>))
        .route("/api/assets/batch", post(forward::<AssetBatch>))
        .route("/api/assets/proof/batch", post(forward::<AssetProofBatch>))
        .route("/api/assets/owner", post(forward::<AssetsByOwner>))
        .route("/api/assets/authority", post(forward::<AssetsByAuthority>))
        .route("/api/assets/group", post(forward::<AssetsByGroup>))
        .route("/api/assets/creator", post(forward::<AssetsByCreator>))
        .route("/api/assets/search", post(forward::<SearchAssets>))
        .route("/api/token/accounts", post(forward::<TokenAccounts>))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::rpc::RpcError;

    use super::*;

    enum Reply {
        Result(Value),
        RemoteError(&'static str),
    }

    struct StubTransport {
        reply: Reply,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl StubTransport {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    #[async_trait::async_trait]
    impl RpcTransport for StubTransport {
        async fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((method.to_string(), params));

            match &self.reply {
                Reply::Result(value) => Ok(value.clone()),
                Reply::RemoteError(message) => Err(RpcError::Upstream {
                    message: message.to_string(),
                    code: Some(-32000),
                }),
            }
        }
    }

    fn app(transport: Arc<StubTransport>) -> Router {
        build_app(AppState::new(transport))
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .method("POST")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let body_json: Value = serde_json::from_slice(&body).expect("valid json response");
        (status, body_json)
    }

    #[tokio::test]
    async fn health_is_public() {
        let response = app(StubTransport::new(Reply::Result(Value::Null)))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        let body = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        assert_eq!(body, "{\"status\":\"ok\"}");
    }

    #[tokio::test]
    async fn missing_required_fields_never_reach_remote() {
        let cases = [
            ("/api/asset", "{}"),
            ("/api/asset/proof", r#"{"id":""}"#),
            ("/api/assets/batch", "{}"),
            ("/api/assets/proof/batch", "{}"),
            ("/api/assets/owner", r#"{"limit":10}"#),
            ("/api/assets/authority", "{}"),
            ("/api/assets/group", r#"{"groupValue":"col1"}"#),
            ("/api/assets/creator", r#"{"onlyVerified":true}"#),
            ("/api/asset/signatures", r#"{"limit":5}"#),
            ("/api/token/accounts", r#"{"page":1}"#),
        ];

        for (uri, body) in cases {
            let transport = StubTransport::new(Reply::Result(json!({})));
            let (status, body_json) = post_json(app(transport.clone()), uri, body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body_json["error"].is_string(), "{uri}");
            assert!(transport.calls().is_empty(), "{uri} reached the remote");
        }
    }

    #[tokio::test]
    async fn batch_rejects_non_array_asset_ids() {
        for uri in ["/api/assets/batch", "/api/assets/proof/batch"] {
            let transport = StubTransport::new(Reply::Result(json!([])));
            let (status, body_json) =
                post_json(app(transport.clone()), uri, r#"{"assetIds":"abc"}"#).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body_json, json!({"error": "assetIds must be an array"}));
            assert!(transport.calls().is_empty());
        }
    }

    #[tokio::test]
    async fn batch_forwards_ids() {
        let transport = StubTransport::new(Reply::Result(json!([{"id": "a"}, {"id": "b"}])));
        let (status, body_json) = post_json(
            app(transport.clone()),
            "/api/assets/batch",
            r#"{"assetIds":["a","b"]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json, json!([{"id": "a"}, {"id": "b"}]));
        assert_eq!(
            transport.calls(),
            vec![("getAssetBatch".to_string(), json!({"ids": ["a", "b"]}))]
        );
    }

    #[tokio::test]
    async fn signatures_limit_is_capped() {
        let transport = StubTransport::new(Reply::Result(json!({"items": []})));
        let (status, _) = post_json(
            app(transport.clone()),
            "/api/asset/signatures",
            r#"{"id":"abc","limit":5000}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = post_json(
            app(transport.clone()),
            "/api/asset/signatures",
            r#"{"id":"abc","limit":50}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let calls = transport.calls();
        assert_eq!(calls[0].0, "getSignaturesForAsset");
        assert_eq!(calls[0].1, json!({"id": "abc", "limit": 1000}));
        assert_eq!(calls[1].1, json!({"id": "abc", "limit": 50}));
    }

    #[tokio::test]
    async fn token_accounts_owner_only_omits_mint() {
        let transport = StubTransport::new(Reply::Result(json!({"token_accounts": []})));
        let (status, _) = post_json(
            app(transport.clone()),
            "/api/token/accounts",
            r#"{"owner":"owner1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "getTokenAccounts");
        assert_eq!(calls[0].1, json!({"owner": "owner1"}));
    }

    #[tokio::test]
    async fn token_accounts_without_mint_or_owner_is_rejected() {
        let transport = StubTransport::new(Reply::Result(json!({})));
        let (status, body_json) =
            post_json(app(transport.clone()), "/api/token/accounts", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json,
            json!({"error": "Either mint or owner address is required"})
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn search_with_empty_body_still_dispatches() {
        let transport = StubTransport::new(Reply::Result(json!({"total": 0, "items": []})));
        let response = app(transport.clone())
            .oneshot(
                Request::builder()
                    .uri("/api/assets/search")
                    .method("POST")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            transport.calls(),
            vec![("searchAssets".to_string(), json!({}))]
        );
    }

    #[tokio::test]
    async fn search_forwards_false_flags() {
        let transport = StubTransport::new(Reply::Result(json!({"items": []})));
        let (status, _) = post_json(
            app(transport.clone()),
            "/api/assets/search",
            r#"{"ownerAddress":"owner1","frozen":false,"compressed":false,"page":1}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            transport.calls()[0].1,
            json!({"ownerAddress": "owner1", "frozen": false, "compressed": false, "page": 1})
        );
    }

    #[tokio::test]
    async fn creator_forwards_only_verified_false() {
        let transport = StubTransport::new(Reply::Result(json!({"items": []})));
        let (status, _) = post_json(
            app(transport.clone()),
            "/api/assets/creator",
            r#"{"creatorAddress":"creator1","onlyVerified":false}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            transport.calls(),
            vec![(
                "getAssetsByCreator".to_string(),
                json!({"creatorAddress": "creator1", "onlyVerified": false})
            )]
        );
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn remote_error_returns_generic_failure() {
        let transport = StubTransport::new(Reply::RemoteError("boom"));
        let (status, body_json) =
            post_json(app(transport.clone()), "/api/asset", r#"{"id":"abc"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json, json!({"error": "Failed to fetch asset details"}));
        assert!(!body_json.to_string().contains("boom"));
        assert_eq!(transport.calls().len(), 1);

        assert!(logs_contain("rpc dispatch failed"));
        assert!(logs_contain("kind=\"upstream\""));
        assert!(logs_contain("boom"));
        assert!(logs_contain("method=\"getAsset\""));
    }

    #[tokio::test]
    async fn remote_result_is_passed_through() {
        let transport = StubTransport::new(Reply::Result(json!({"id": "abc"})));
        let (status, body_json) =
            post_json(app(transport.clone()), "/api/asset", r#"{"id":"abc"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_json, json!({"id": "abc"}));
        assert_eq!(
            transport.calls(),
            vec![("getAsset".to_string(), json!({"id": "abc"}))]
        );
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let transport = StubTransport::new(Reply::Result(json!({})));
        let (status, body_json) =
            post_json(app(transport.clone()), "/api/assets/owner", "{oops").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body_json, json!({"error": "request body must be valid JSON"}));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn get_on_rpc_route_is_not_allowed() {
        let response = app(StubTransport::new(Reply::Result(Value::Null)))
            .oneshot(
                Request::builder()
                    .uri("/api/asset")
                    .method("GET")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let response = app(StubTransport::new(Reply::Result(Value::Null)))
            .oneshot(
                Request::builder()
                    .uri("/api/asset")
                    .method("OPTIONS")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .expect("request build"),
            )
            .await
            .expect("request execution");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
