//! HTTP server setup and request orchestration.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (request timeout, tracing)
//! - Drive each request through resolve → fetch → classify → translate
//! - Serve with graceful shutdown
//!
//! # Request state machine
//! ```text
//! Resolving → Fetching → Classifying → ┬→ NotFound    (miss signal)
//!                                      ├→ ServerError (fetch failure)
//!                                      └→ Translating → Sent
//! ```
//! Every path writes exactly one response; a failure terminates only its
//! own request.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::archive::{classify, ArchiveClient, Classification, SnapshotResolver};
use crate::config::ProxyConfig;
use crate::http::response;
use crate::rewrite::headers::GUESSED_CHARSET;
use crate::rewrite::{BodyRewriter, HeaderTranslator};

/// Application state injected into the handler. Built once at startup;
/// everything in here is immutable and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub resolver: Arc<SnapshotResolver>,
    pub client: ArchiveClient,
    pub translator: Arc<HeaderTranslator>,
    pub rewriter: Arc<BodyRewriter>,
}

/// HTTP server for the snapshot proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given (validated) configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let resolver = Arc::new(SnapshotResolver::new(&config.archive));
        let client = ArchiveClient::new(&config.upstream, &config.timeouts)?;
        let translator = Arc::new(HeaderTranslator::new(&config.proxy.name));
        let archive_host = config.archive.host().expect("base_url validated at startup");
        let rewriter = Arc::new(BodyRewriter::new(&archive_host));

        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let state = AppState {
            config: Arc::new(config),
            resolver,
            client,
            translator,
            rewriter,
        };

        let router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP proxy listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all proxy handler: one request, one upstream fetch, one response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let request_url = original_url(&request);
    let archive_url = state.resolver.resolve(request.uri().path(), &request_url);
    let proxy_name = &state.config.proxy.name;

    let upstream = match state.client.fetch(&archive_url).await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                archive_url = %archive_url,
                error = %e,
                "Upstream fetch failed"
            );
            return response::server_error(proxy_name, &e);
        }
    };

    // Redirects may have moved us; report where the bytes actually came from.
    let final_url = upstream.url().to_string();
    tracing::info!(
        request_id = %request_id,
        request_url = %request_url,
        archive_url = %final_url,
        status = %upstream.status(),
        "Proxying request"
    );

    match classify(upstream.headers()) {
        Classification::SnapshotMiss => {
            tracing::warn!(
                request_id = %request_id,
                archive_url = %final_url,
                "No capture near target timestamp"
            );
            response::not_found(proxy_name)
        }
        Classification::Textual => {
            let status = upstream.status();
            let headers = state
                .translator
                .translate(upstream.headers(), &final_url, &request_url);
            let charset = upstream
                .headers()
                .get(GUESSED_CHARSET)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            match upstream.bytes().await {
                Ok(raw) => {
                    let rewritten = state.rewriter.rewrite_bytes(&raw, charset.as_deref());
                    response::translated(status, headers, Body::from(rewritten))
                }
                Err(e) => {
                    tracing::error!(
                        request_id = %request_id,
                        archive_url = %final_url,
                        error = %e,
                        "Failed to read upstream body"
                    );
                    response::server_error(proxy_name, &e)
                }
            }
        }
        Classification::Binary => {
            let status = upstream.status();
            let headers = state
                .translator
                .translate(upstream.headers(), &final_url, &request_url);
            response::translated(status, headers, Body::from_stream(upstream.bytes_stream()))
        }
    }
}

/// Reconstruct the full original URL of an inbound request.
///
/// Proxy-style requests carry an absolute URI already; origin-form requests
/// are rebuilt from the Host header.
fn original_url(request: &Request<Body>) -> String {
    let uri = request.uri();
    if uri.scheme().is_some() {
        return uri.to_string();
    }
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    format!("http://{host}{path_and_query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_url_keeps_absolute_form() {
        let request = Request::builder()
            .uri("http://example.com/page?q=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(original_url(&request), "http://example.com/page?q=1");
    }

    #[test]
    fn test_original_url_rebuilds_origin_form() {
        let request = Request::builder()
            .uri("/page?q=1")
            .header("Host", "example.com")
            .body(Body::empty())
            .unwrap();
        assert_eq!(original_url(&request), "http://example.com/page?q=1");
    }

    #[test]
    fn test_original_url_without_host_header() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(original_url(&request), "http://localhost/");
    }
}
