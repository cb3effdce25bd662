//! Locale middleware.
//! Applies the resolver to every request before any handler runs.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::http::response::{preference_cookie, redirect_response};
use crate::http::server::AppState;
use crate::locale::{cookie_value, Locale};
use crate::observability::metrics;
use crate::routing::{Resolution, ResolveRequest, ResolvedRoute};

/// Request header carrying the resolved locale code.
pub const X_LOCALE: &str = "x-locale";

/// Request header carrying the path without its locale prefix.
pub const X_PATH_WITHOUT_LOCALE: &str = "x-path-without-locale";

/// Context attached to localized requests.
#[derive(Clone, Debug, PartialEq)]
pub struct LocaleContext {
    pub locale: Locale,
    pub path_without_locale: String,
}

impl From<ResolvedRoute> for LocaleContext {
    fn from(route: ResolvedRoute) -> Self {
        Self {
            locale: route.locale,
            path_without_locale: route.path_without_locale,
        }
    }
}

pub async fn locale_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Downstream must only ever see values we resolved.
    req.headers_mut().remove(X_LOCALE);
    req.headers_mut().remove(X_PATH_WITHOUT_LOCALE);

    let (resolution, cookie_locale) = {
        let headers = req.headers();
        let cookie_locale = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|h| cookie_value(h, &state.config.cookie.name));
        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok());

        let request = ResolveRequest {
            path: req.uri().path(),
            query: req.uri().query(),
            cookie_locale,
            accept_language,
        };
        (state.resolver.resolve(&request), cookie_locale.map(str::to_owned))
    };

    // 1. Excluded paths skip locale handling entirely.
    let route = match resolution {
        Resolution::PassThrough => {
            metrics::record_resolution("pass_through", None);
            return next.run(req).await;
        }
        Resolution::Localized(route) => route,
    };

    // 2. Unprefixed paths are redirected; no page logic runs.
    if let Some(target) = &route.redirect_target {
        tracing::debug!(
            path = %req.uri().path(),
            locale = %route.locale,
            target = %target,
            "Redirecting to localized path"
        );
        metrics::record_resolution("redirect", Some(&route.locale));
        return redirect_response(state.redirect_status, target);
    }

    // 3. Attach context and proceed.
    metrics::record_resolution("localized", Some(&route.locale));
    if let Ok(value) = HeaderValue::from_str(route.locale.code()) {
        req.headers_mut().insert(X_LOCALE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&route.path_without_locale) {
        req.headers_mut().insert(X_PATH_WITHOUT_LOCALE, value);
    }

    let persist = state.config.cookie.persist && cookie_locale.as_deref() != Some(route.locale.code());
    let locale = route.locale.clone();
    req.extensions_mut().insert(LocaleContext::from(route));

    let mut response = next.run(req).await;
    if persist {
        if let Some(cookie) = preference_cookie(&state.config.cookie, &locale) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}
