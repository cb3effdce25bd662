//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the locale gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Public site settings used for absolute URLs.
    pub site: SiteConfig,

    /// Supported locales and the default one.
    pub locales: LocalesConfig,

    /// Redirect policy for unprefixed paths.
    pub redirect: RedirectConfig,

    /// Locale preference cookie.
    pub cookie: CookieConfig,

    /// Paths that are never localized.
    pub exclusions: ExclusionConfig,

    /// Optional page renderer behind the gateway.
    pub upstream: UpstreamConfig,

    /// robots.txt and sitemap.xml settings.
    pub seo: SeoConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Public site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute base URL of the site, without trailing slash.
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://roundnet-directory.eu".to_string(),
        }
    }
}

/// Supported locale set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Code of the default locale. Must be one of `supported`.
    pub default: String,

    /// Supported locales in declaration order.
    pub supported: Vec<LocaleSettings>,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: "en".to_string(),
            supported: vec![
                LocaleSettings::new("en", "English", "🇬🇧", "MMM d, yyyy"),
                LocaleSettings::new("de", "Deutsch", "🇩🇪", "d. MMM yyyy"),
                LocaleSettings::new("fr", "Français", "🇫🇷", "d MMM yyyy"),
                LocaleSettings::new("es", "Español", "🇪🇸", "d MMM yyyy"),
                LocaleSettings::new("it", "Italiano", "🇮🇹", "d MMM yyyy"),
            ],
        }
    }
}

/// Per-locale metadata.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocaleSettings {
    /// Locale code used as the URL prefix (e.g., "en").
    pub code: String,

    /// Display name in the locale's own language.
    pub name: String,

    /// Flag or icon token for language switchers.
    #[serde(default)]
    pub flag: String,

    /// hreflang tag; defaults to the code.
    #[serde(default)]
    pub hreflang: Option<String>,

    /// HTML `lang` attribute; defaults to the code.
    #[serde(default)]
    pub html_lang: Option<String>,

    /// Date format pattern for rendered dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    "d MMM yyyy".to_string()
}

impl LocaleSettings {
    /// Create settings whose hreflang and html lang equal the code.
    pub fn new(code: &str, name: &str, flag: &str, date_format: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
            hreflang: None,
            html_lang: None,
            date_format: date_format.to_string(),
        }
    }

    pub fn hreflang(&self) -> &str {
        self.hreflang.as_deref().unwrap_or(&self.code)
    }

    pub fn html_lang(&self) -> &str {
        self.html_lang.as_deref().unwrap_or(&self.code)
    }
}

/// Redirect policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// HTTP status for locale redirects (301, 302, 303, 307 or 308).
    pub status: u16,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self { status: 307 }
    }
}

/// Locale preference cookie.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie name carrying the preferred locale.
    pub name: String,

    /// Write the cookie when a request arrives on an explicit locale path.
    pub persist: bool,

    /// Cookie lifetime in seconds.
    pub max_age_secs: u64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "NEXT_LOCALE".to_string(),
            persist: true,
            max_age_secs: 365 * 24 * 60 * 60,
        }
    }
}

/// Paths excluded from locale handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExclusionConfig {
    /// Path prefixes, matched on segment boundaries.
    pub prefixes: Vec<String>,

    /// Exact paths.
    pub exact: Vec<String>,

    /// Treat any path whose last segment contains a dot as a static file.
    pub skip_file_extensions: bool,
}

impl Default for ExclusionConfig {
    fn default() -> Self {
        Self {
            prefixes: ["/api", "/_next", "/_vercel", "/static", "/images", "/fonts"]
                .into_iter()
                .map(String::from)
                .collect(),
            exact: ["/favicon.ico", "/robots.txt", "/sitemap.xml", "/healthz"]
                .into_iter()
                .map(String::from)
                .collect(),
            skip_file_extensions: true,
        }
    }
}

/// Upstream page renderer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Renderer address (e.g., "127.0.0.1:3000"). Without one the gateway
    /// answers localized requests with the resolved page context as JSON.
    pub address: Option<String>,
}

/// SEO endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SeoConfig {
    pub robots: RobotsConfig,
    pub sitemap: SitemapConfig,
}

/// robots.txt rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Paths disallowed for every crawler.
    pub disallow: Vec<String>,

    /// User agents denied the whole site.
    pub blocked_agents: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            disallow: ["/api/", "/admin/", "/auth/", "/*.json$"]
                .into_iter()
                .map(String::from)
                .collect(),
            blocked_agents: vec!["GPTBot".to_string(), "CCBot".to_string()],
        }
    }
}

/// sitemap.xml contents.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Pages listed once per locale.
    pub pages: Vec<SitemapPage>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            pages: vec![
                SitemapPage {
                    path: "/".to_string(),
                    change_frequency: "weekly".to_string(),
                    priority: 1.0,
                },
                SitemapPage {
                    path: "/clubs".to_string(),
                    change_frequency: "monthly".to_string(),
                    priority: 0.9,
                },
            ],
        }
    }
}

/// A single sitemap page, without locale prefix.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SitemapPage {
    pub path: String,

    #[serde(default = "default_change_frequency")]
    pub change_frequency: String,

    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_change_frequency() -> String {
    "weekly".to_string()
}

fn default_priority() -> f32 {
    0.7
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locales() {
        let locales = LocalesConfig::default();
        let codes: Vec<_> = locales.supported.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["en", "de", "fr", "es", "it"]);
        assert_eq!(locales.default, "en");
    }

    #[test]
    fn test_hreflang_falls_back_to_code() {
        let mut settings = LocaleSettings::new("de", "Deutsch", "🇩🇪", "d. MMM yyyy");
        assert_eq!(settings.hreflang(), "de");
        assert_eq!(settings.html_lang(), "de");

        settings.hreflang = Some("de-DE".into());
        assert_eq!(settings.hreflang(), "de-DE");
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("[listener]\nbind_address = \"127.0.0.1:9000\"\n").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.redirect.status, 307);
        assert_eq!(config.cookie.name, "NEXT_LOCALE");
        assert!(config.upstream.address.is_none());
        assert_eq!(config.locales.supported.len(), 5);
    }

    #[test]
    fn test_locale_table_parses() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [locales]
            default = "de"

            [[locales.supported]]
            code = "de"
            name = "Deutsch"
            hreflang = "de-DE"

            [[locales.supported]]
            code = "en"
            name = "English"
            "#,
        )
        .unwrap();

        assert_eq!(config.locales.default, "de");
        assert_eq!(config.locales.supported[0].hreflang(), "de-DE");
        assert_eq!(config.locales.supported[1].date_format, "d MMM yyyy");
    }
}
