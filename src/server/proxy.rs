//! Catch-all proxy handler.
//!
//! GET requests for playlist paths are fetched from the origin while the
//! device profile is resolved; master playlists in successful responses are
//! rewritten for the device. Everything else is relayed as received.

use super::error::AppError;
use super::request_id::RequestId;
use super::AppContext;
use crate::origin::ForwardRequest;
use crate::rewrite::rewrite_playlist;
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::request::Parts;
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use hls_edge_common::Error;
use hls_edge_manifest::is_master_playlist;

/// Largest inbound request body the proxy buffers.
const MAX_REQUEST_BODY: usize = 16 * 1024 * 1024;

pub async fn proxy(State(ctx): State<AppContext>, request: Request) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();
    let request_id = parts.extensions.get::<RequestId>().map(|id| id.0.clone());

    handle(&ctx, parts, body)
        .await
        .map_err(|e| AppError::new(e).with_request_id(request_id))
}

async fn handle(ctx: &AppContext, parts: Parts, body: Body) -> hls_edge_common::Result<Response> {
    let body = to_bytes(body, MAX_REQUEST_BODY)
        .await
        .map_err(|e| Error::runtime(format!("Failed to read request body: {}", e)))?;

    let path = parts.uri.path().to_string();
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let rewritable = parts.method == Method::GET && ctx.config.rewrite.matches(&path);
    let forward = ForwardRequest::new(parts.method, path_and_query, &parts.headers, body);

    if !rewritable {
        tracing::trace!(method = %forward.method, %path, "Passing through");
        return Ok(ctx.origin.forward(forward).await?.into_response());
    }

    let user_agent = forward.user_agent().to_string();
    let (profile, upstream) = tokio::try_join!(
        async {
            ctx.resolver
                .resolve(&user_agent)
                .await
                .map_err(Error::from)
        },
        ctx.origin.forward(forward),
    )?;

    if !upstream.status.is_success() {
        tracing::debug!(%path, status = %upstream.status, "Origin error status, passing through");
        return Ok(upstream.into_response());
    }

    let rewritten = match std::str::from_utf8(&upstream.body) {
        Ok(text) if is_master_playlist(text) => Some(rewrite_playlist(
            text,
            &profile,
            &ctx.config.decision,
            ctx.config.rewrite.line_ending,
        )?),
        Ok(_) => {
            tracing::debug!(%path, "Not a master playlist, passing through");
            None
        }
        Err(_) => {
            tracing::debug!(%path, "Body is not UTF-8, passing through");
            None
        }
    };

    let Some(rewritten) = rewritten else {
        return Ok(upstream.into_response());
    };

    tracing::info!(
        %path,
        device = %profile,
        order = %rewritten.policy.primary_order,
        capped = rewritten.policy.cap_enabled,
        variants_in = rewritten.variants_in,
        variants_out = rewritten.variants_out,
        "Rewrote playlist"
    );

    Ok(upstream.with_body(rewritten.body).into_response())
}
