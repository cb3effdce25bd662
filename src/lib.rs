//! Locale resolution and URL localization gateway library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod locale;
pub mod observability;
pub mod routing;
pub mod seo;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use locale::{Locale, LocaleRegistry, UrlLocalizer};
pub use routing::{LocaleResolver, Resolution};
