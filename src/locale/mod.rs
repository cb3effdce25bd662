//! Locale subsystem.
//!
//! # Data Flow
//! ```text
//! LocalesConfig (startup)
//!     → registry.rs (closed, immutable locale set + per-locale metadata)
//!
//! Per request:
//!     Cookie / Accept-Language
//!     → negotiation.rs (cookie > Accept-Language > default)
//!     → Locale
//!
//! Link and metadata building:
//!     path + Locale
//!     → paths.rs (localize, delocalize, alternates, canonical)
//! ```
//!
//! # Design Decisions
//! - No ambient "current locale": every function takes its locale explicitly
//! - Negotiation is total; bad input falls back to the default locale
//! - Locale codes match case-sensitively as whole path segments

pub mod negotiation;
pub mod paths;
pub mod registry;

pub use negotiation::{cookie_value, detect_locale, negotiate, parse_accept_language, LanguagePreference};
pub use paths::{localize, normalize, Alternates, LanguageLink, UrlLocalizer, X_DEFAULT};
pub use registry::{Locale, LocaleRegistry, RegistryError};
