//! SEO surfaces built on resolved locales.
//!
//! # Data Flow
//! ```text
//! path + Locale
//!     → metadata.rs (canonical + hreflang alternates + html lang)
//!
//! GET /robots.txt  → robots.rs  (crawler rules, sitemap pointer)
//! GET /sitemap.xml → sitemap.rs (page × locale with alternates)
//! ```
//!
//! # Design Decisions
//! - Pure formatting over the locale registry; no I/O
//! - Alternates always list every locale in declaration order, x-default last

pub mod metadata;
pub mod robots;
pub mod sitemap;

pub use metadata::PageMetadata;
pub use robots::render_robots;
pub use sitemap::render_sitemap;
