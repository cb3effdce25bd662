//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the locale set never changes at runtime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CookieConfig, ExclusionConfig, GatewayConfig, ListenerConfig, LocaleSettings, LocalesConfig,
    ObservabilityConfig, RedirectConfig, SeoConfig, SitemapPage, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
