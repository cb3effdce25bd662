//! Forwarding to the page renderer.
//!
//! # Responsibilities
//! - Rewrite the request URI to the upstream authority
//! - Stream the upstream response back unchanged
//! - Map connection failures to 502 Bad Gateway
//!
//! # Design Decisions
//! - The client's `Host` header is kept so the renderer sees the public host
//! - Always HTTP/1.1 towards the upstream
//! - No retries: page requests are cheap to repeat for the client

use std::time::Instant;

use axum::{
    body::Body,
    http::{
        uri::{Authority, InvalidUri, PathAndQuery, Scheme},
        Request, StatusCode, Uri, Version,
    },
    response::{IntoResponse, Response},
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::http::request::RequestIdExt;
use crate::observability::metrics;

/// HTTP client bound to one upstream address.
#[derive(Clone)]
pub struct Upstream {
    client: Client<HttpConnector, Body>,
    authority: Authority,
}

impl Upstream {
    /// `address` is `host:port`.
    pub fn new(address: &str) -> Result<Self, InvalidUri> {
        let authority = address.parse::<Authority>()?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Ok(Self { client, authority })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    pub async fn forward(&self, mut req: Request<Body>) -> Response {
        let start = Instant::now();
        let request_id = req.request_id().to_string();

        let mut uri_parts = req.uri().clone().into_parts();
        uri_parts.scheme = Some(Scheme::HTTP);
        uri_parts.authority = Some(self.authority.clone());
        if uri_parts.path_and_query.is_none() {
            uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
        }
        match Uri::from_parts(uri_parts) {
            Ok(uri) => *req.uri_mut() = uri,
            Err(e) => {
                tracing::warn!(request_id = %request_id, error = %e, "Cannot build upstream URI");
                return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
            }
        }
        *req.version_mut() = Version::HTTP_11;

        match self.client.request(req).await {
            Ok(response) => {
                metrics::record_upstream(response.status().as_u16(), start);
                let (parts, body) = response.into_parts();
                Response::from_parts(parts, Body::new(body))
            }
            Err(e) => {
                tracing::error!(
                    request_id = %request_id,
                    upstream = %self.authority,
                    error = %e,
                    "Upstream error"
                );
                metrics::record_upstream(StatusCode::BAD_GATEWAY.as_u16(), start);
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}
