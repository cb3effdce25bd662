//! Request middleware.

pub mod locale;

pub use locale::{locale_middleware, LocaleContext, X_LOCALE, X_PATH_WITHOUT_LOCALE};
