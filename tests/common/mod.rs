//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts mock origin and device-lookup
//! servers and builds an [`AppContext`] pointing at them. The
//! [`TestHarness::with_server`] constructor also starts Axum on a random port
//! for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hls_edge::config::Config;
use hls_edge::server::{create_router, AppContext};

pub const MASTER_PLAYLIST: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-STREAM-INF:BANDWIDTH=3000000,RESOLUTION=1920x1080
1080p.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=1280x720
720p.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=600000,RESOLUTION=640x360
360p.m3u8
";

pub const MEDIA_PLAYLIST: &str = "#EXTM3U
#EXT-X-TARGETDURATION:6
#EXTINF:6.0,
segment0.ts
#EXT-X-ENDLIST
";

pub const MPEGURL: &str = "application/vnd.apple.mpegurl";

/// Device-lookup document for a desktop browser.
pub fn desktop_document() -> Value {
    json!({"result": {"attributes": {"is_desktop": "true"}}})
}

/// Device-lookup document for a phone.
pub fn mobile_document(width: u32, height: u32, os: &str, version: &str) -> Value {
    json!({
        "result": {
            "attributes": {
                "displayWidth": width.to_string(),
                "displayHeight": height.to_string(),
                "is_desktop": "false",
                "device_os": os,
                "device_os_version": version
            }
        }
    })
}

/// Mock origin and device-lookup servers plus the proxy context using them.
pub struct TestHarness {
    pub origin: MockServer,
    pub ddr: MockServer,
    pub ctx: AppContext,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Create a new harness; origin and lookup URLs are replaced by the mocks.
    pub async fn with_config(mut config: Config) -> Self {
        let origin = MockServer::start().await;
        let ddr = MockServer::start().await;

        config.origin.url = Some(origin.uri());
        config.ddr.url = format!("{}/servlet/classify", ddr.uri());

        let ctx = AppContext::from_config(config).expect("failed to build context");
        Self { origin, ddr, ctx }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let app = harness.router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Serve `body` from the origin at `route`.
    pub async fn mount_playlist(&self, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, MPEGURL))
            .mount(&self.origin)
            .await;
    }

    /// Answer every classify request with `document`.
    pub async fn mount_device(&self, document: Value) {
        Mock::given(method("GET"))
            .and(path("/servlet/classify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(document))
            .mount(&self.ddr)
            .await;
    }

    /// Send a GET through the router.
    pub async fn get(&self, uri: &str, user_agent: &str) -> Response {
        self.router()
            .oneshot(
                Request::get(uri)
                    .header(header::USER_AGENT, user_agent)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Helper to get response body as string
pub async fn body_to_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
