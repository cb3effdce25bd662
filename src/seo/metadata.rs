//! Canonical and hreflang metadata for a page.

use std::fmt::Write as _;

use serde::Serialize;

use crate::locale::{Alternates, Locale, UrlLocalizer};

/// Locale metadata for one page in one locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub canonical: String,
    pub alternates: Alternates,
    pub html_lang: String,
    /// Open Graph locale (`de_DE` style separators).
    pub og_locale: String,
}

impl PageMetadata {
    /// Metadata for `path` (with or without locale prefix) rendered in `locale`.
    pub fn new(localizer: &UrlLocalizer, path: &str, locale: &Locale) -> Self {
        let settings = localizer.registry().settings(locale);
        Self {
            canonical: localizer.canonical_url(path, locale),
            alternates: localizer.alternates_for(path),
            html_lang: settings.html_lang().to_string(),
            og_locale: settings.html_lang().replace('-', "_"),
        }
    }

    /// `<link>` elements for the document head, one per line.
    pub fn to_link_tags(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, r#"<link rel="canonical" href="{}">"#, escape_attr(&self.canonical));
        for (hreflang, href) in self.alternates.iter() {
            let _ = writeln!(
                out,
                r#"<link rel="alternate" hreflang="{}" href="{}">"#,
                escape_attr(hreflang),
                escape_attr(href)
            );
        }
        out
    }
}

pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
