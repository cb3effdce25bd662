//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers)
//!     → request.rs (request ID, tracing span)
//!     → middleware/locale.rs (resolve: pass through, redirect, or attach locale)
//!     → server.rs handlers (robots, sitemap, health, page fallback)
//!     → upstream.rs (forward to renderer) or response.rs (page context JSON)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;
pub mod upstream;

pub use middleware::{LocaleContext, X_LOCALE, X_PATH_WITHOUT_LOCALE};
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::PageContext;
pub use server::{AppState, HttpServer};
pub use upstream::Upstream;
