//! Response construction.
//!
//! # Responsibilities
//! - Build locale redirects (status from config, `Location`, `Vary`)
//! - Build the preference cookie header
//! - Describe a resolved page as JSON when no upstream renders it

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

use crate::config::CookieConfig;
use crate::http::middleware::LocaleContext;
use crate::locale::{LanguageLink, Locale, UrlLocalizer};
use crate::seo::PageMetadata;

/// Redirect to a localized path. Negotiation inputs are listed in `Vary`
/// so caches keep one redirect per preference.
pub fn redirect_response(status: StatusCode, target: &str) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    if let Ok(location) = HeaderValue::from_str(target) {
        response.headers_mut().insert(header::LOCATION, location);
    }
    response
        .headers_mut()
        .insert(header::VARY, HeaderValue::from_static("Cookie, Accept-Language"));
    response
}

/// `Set-Cookie` value remembering `locale`.
pub fn preference_cookie(config: &CookieConfig, locale: &Locale) -> Option<HeaderValue> {
    let cookie = format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        config.name,
        locale.code(),
        config.max_age_secs
    );
    HeaderValue::from_str(&cookie).ok()
}

/// Everything a renderer needs to know about a localized page.
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub locale: Locale,
    pub locale_name: String,
    pub date_format: String,
    pub path_without_locale: String,
    pub metadata: PageMetadata,
    pub languages: Vec<LanguageLink>,
}

impl PageContext {
    pub fn new(localizer: &UrlLocalizer, context: &LocaleContext) -> Self {
        let settings = localizer.registry().settings(&context.locale);
        Self {
            locale: context.locale.clone(),
            locale_name: settings.name.clone(),
            date_format: settings.date_format.clone(),
            path_without_locale: context.path_without_locale.clone(),
            metadata: PageMetadata::new(localizer, &context.path_without_locale, &context.locale),
            languages: localizer.language_links(&context.path_without_locale, &context.locale),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocalesConfig;
    use crate::locale::LocaleRegistry;
    use std::sync::Arc;

    fn localizer() -> UrlLocalizer {
        let registry = LocaleRegistry::from_config(&LocalesConfig::default()).unwrap();
        UrlLocalizer::new(Arc::new(registry), "https://roundnet-directory.eu")
    }

    #[test]
    fn test_redirect_response() {
        let response = redirect_response(StatusCode::PERMANENT_REDIRECT, "/de/clubs?page=2");
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/de/clubs?page=2");
        assert_eq!(response.headers()[header::VARY], "Cookie, Accept-Language");
    }

    #[test]
    fn test_preference_cookie() {
        let l = localizer();
        let it = l.registry().get("it").unwrap();
        let value = preference_cookie(&CookieConfig::default(), it).unwrap();
        assert_eq!(value, "NEXT_LOCALE=it; Path=/; Max-Age=31536000; SameSite=Lax");
    }

    #[test]
    fn test_page_context() {
        let l = localizer();
        let context = LocaleContext {
            locale: l.registry().get("de").unwrap().clone(),
            path_without_locale: "/clubs/germany".into(),
        };
        let page = PageContext::new(&l, &context);

        assert_eq!(page.locale_name, "Deutsch");
        assert_eq!(page.date_format, "d. MMM yyyy");
        assert_eq!(page.metadata.canonical, "https://roundnet-directory.eu/de/clubs/germany");
        assert_eq!(page.languages.len(), 5);

        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["locale"], "de");
        assert_eq!(json["metadata"]["alternates"]["x-default"], "https://roundnet-directory.eu/en/clubs/germany");
    }
}
