//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the locale set (non-empty, unique codes, default is a member)
//! - Validate addresses, the site URL and the redirect status
//! - Reject locales whose `/{code}` prefix an exclusion would swallow
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::locale::{LocaleRegistry, RegistryError};
use crate::routing::{AnyMatcher, Matcher};

/// Redirect statuses the gateway may issue.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// A single semantic configuration problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("locales: {0}")]
    Locale(#[from] RegistryError),

    #[error("site url '{url}' is invalid: {reason}")]
    InvalidSiteUrl { url: String, reason: String },

    #[error("redirect status {0} is not one of 301, 302, 303, 307, 308")]
    UnsupportedRedirectStatus(u16),

    #[error("exclusion '{0}' must start with '/'")]
    InvalidExclusion(String),

    #[error("locale '{0}' is unreachable: '/{0}' matches an exclusion")]
    LocaleShadowedByExclusion(String),

    #[error("cookie name '{0}' is not a valid cookie token")]
    InvalidCookieName(String),

    #[error("listener bind address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("upstream address '{0}' is not host:port")]
    InvalidUpstreamAddress(String),

    #[error("metrics address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("sitemap page '{path}' has priority {priority} outside 0.0..=1.0")]
    InvalidSitemapPriority { path: String, priority: f32 },

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,
}

/// Validate a configuration, collecting every problem.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = LocaleRegistry::check(&config.locales.supported, &config.locales.default)
        .into_iter()
        .map(ValidationError::from)
        .collect();

    match url::Url::parse(&config.site.url) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ValidationError::InvalidSiteUrl {
                    url: config.site.url.clone(),
                    reason: "must not carry a query or fragment".to_string(),
                });
            }
        }
        Ok(url) => errors.push(ValidationError::InvalidSiteUrl {
            url: config.site.url.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidSiteUrl {
            url: config.site.url.clone(),
            reason: e.to_string(),
        }),
    }

    if !REDIRECT_STATUSES.contains(&config.redirect.status) {
        errors.push(ValidationError::UnsupportedRedirectStatus(config.redirect.status));
    }

    for path in config.exclusions.prefixes.iter().chain(&config.exclusions.exact) {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidExclusion(path.clone()));
        }
    }

    let exclusions = AnyMatcher::from_config(&config.exclusions);
    for locale in &config.locales.supported {
        if exclusions.matches(&format!("/{}", locale.code)) {
            errors.push(ValidationError::LocaleShadowedByExclusion(locale.code.clone()));
        }
    }

    if !is_cookie_token(&config.cookie.name) {
        errors.push(ValidationError::InvalidCookieName(config.cookie.name.clone()));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(config.listener.bind_address.clone()));
    }

    if let Some(address) = &config.upstream.address {
        if address.parse::<axum::http::uri::Authority>().is_err() || !address.contains(':') {
            errors.push(ValidationError::InvalidUpstreamAddress(address.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for page in &config.seo.sitemap.pages {
        if !(0.0..=1.0).contains(&page.priority) {
            errors.push(ValidationError::InvalidSitemapPriority {
                path: page.path.clone(),
                priority: page.priority,
            });
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// RFC 6265 token: visible ASCII without separators.
fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}
