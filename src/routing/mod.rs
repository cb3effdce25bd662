//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query, Cookie, Accept-Language)
//!     → matcher.rs (excluded path? → PassThrough)
//!     → resolver.rs (locale prefix? → proceed : detect + redirect)
//!     → Return: Resolution
//!
//! Exclusion Compilation (at startup):
//!     ExclusionConfig
//!     → Compile matchers (exact paths, prefixes, file extensions)
//!     → Freeze inside an immutable LocaleResolver
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always resolves the same way

pub mod matcher;
pub mod resolver;

pub use matcher::{AnyMatcher, Matcher};
pub use resolver::{LocaleResolver, ResolveRequest, Resolution, ResolvedRoute};
