//! Locale detection from request signals.
//!
//! Order: preference cookie, then `Accept-Language`, then the default locale.
//! Detection never fails; unknown or malformed values are skipped.

use super::registry::{Locale, LocaleRegistry};

/// One parsed `Accept-Language` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Lower-cased primary subtag (`en-US` becomes `en`).
    pub tag: String,
    pub quality: f32,
}

/// Parse an `Accept-Language` value into preferences ordered by descending
/// quality. Ties keep their order of appearance and `q=0` entries sort last
/// but stay selectable. A missing or unparsable quality counts as 1.0.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let range = parts.next().unwrap_or("").trim();
            if range.is_empty() {
                return None;
            }

            let quality = parts
                .filter_map(|p| {
                    let (name, value) = p.split_once('=')?;
                    name.trim().eq_ignore_ascii_case("q").then_some(value)
                })
                .next()
                .and_then(|q| q.trim().parse::<f32>().ok())
                .filter(|q| q.is_finite())
                .map(|q| q.clamp(0.0, 1.0))
                .unwrap_or(1.0);

            let primary = range.split('-').next().unwrap_or(range);
            Some(LanguagePreference {
                tag: primary.to_ascii_lowercase(),
                quality,
            })
        })
        .collect();

    // sort_by is stable, so equal qualities keep header order.
    preferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    preferences
}

/// First supported locale from an `Accept-Language` value.
pub fn negotiate<'r>(registry: &'r LocaleRegistry, header: &str) -> Option<&'r Locale> {
    parse_accept_language(header)
        .iter()
        .find_map(|pref| registry.get(&pref.tag))
}

/// Value of the cookie `name` in a raw `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key.trim() == name {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Pick a locale for a request whose path carries none.
pub fn detect_locale<'r>(
    registry: &'r LocaleRegistry,
    cookie_locale: Option<&str>,
    accept_language: Option<&str>,
) -> &'r Locale {
    if let Some(locale) = cookie_locale.and_then(|code| registry.get(code.trim())) {
        return locale;
    }

    accept_language
        .and_then(|header| negotiate(registry, header))
        .unwrap_or_else(|| registry.default_locale())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LocalesConfig;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::from_config(&LocalesConfig::default()).unwrap()
    }

    fn tags(header: &str) -> Vec<String> {
        parse_accept_language(header).into_iter().map(|p| p.tag).collect()
    }

    #[test]
    fn test_parse_orders_by_quality() {
        assert_eq!(tags("en-US,en;q=0.5,fr;q=0.3"), ["en", "en", "fr"]);
        assert_eq!(tags("fr;q=0.9,de;q=0.95"), ["de", "fr"]);
    }

    #[test]
    fn test_parse_ties_keep_header_order() {
        assert_eq!(tags("it;q=0.8,es;q=0.8,de"), ["de", "it", "es"]);
    }

    #[test]
    fn test_parse_lowercases_primary_subtag() {
        let prefs = parse_accept_language("DE-at");
        assert_eq!(prefs, vec![LanguagePreference { tag: "de".into(), quality: 1.0 }]);
    }

    #[test]
    fn test_parse_tolerates_garbage() {
        assert!(parse_accept_language("").is_empty());
        assert!(parse_accept_language(" , ;q=0.5").is_empty());
        // Unparsable quality counts as 1.0.
        assert_eq!(parse_accept_language("fr;q=abc")[0].quality, 1.0);
        assert_eq!(tags("de;q=0,fr;q=0.1"), ["fr", "de"]);
    }

    #[test]
    fn test_parse_quality_name_is_case_insensitive() {
        assert_eq!(tags("fr;Q=0.1,de;q=0.5"), ["de", "fr"]);
        assert_eq!(parse_accept_language("fr; Q = 0.25")[0].quality, 0.25);
    }

    #[test]
    fn test_negotiate_higher_quality_wins() {
        let registry = registry();
        let locale = negotiate(&registry, "fr;q=0.9,de;q=0.95").unwrap();
        assert_eq!(locale.code(), "de");
    }

    #[test]
    fn test_negotiate_skips_unsupported() {
        let registry = registry();
        assert_eq!(negotiate(&registry, "pt-BR,es;q=0.4").unwrap().code(), "es");
        assert!(negotiate(&registry, "xx,yy").is_none());
        assert!(negotiate(&registry, "*").is_none());
    }

    #[test]
    fn test_cookie_value() {
        assert_eq!(cookie_value("NEXT_LOCALE=de", "NEXT_LOCALE"), Some("de"));
        assert_eq!(cookie_value("a=1; NEXT_LOCALE=fr; b=2", "NEXT_LOCALE"), Some("fr"));
        assert_eq!(cookie_value("NEXT_LOCALE=\"it\"", "NEXT_LOCALE"), Some("it"));
        assert_eq!(cookie_value("locale=fr", "NEXT_LOCALE"), None);
        assert_eq!(cookie_value("garbage", "NEXT_LOCALE"), None);
    }

    #[test]
    fn test_detect_cookie_beats_header() {
        let registry = registry();
        assert_eq!(detect_locale(&registry, Some("de"), Some("fr")).code(), "de");
    }

    #[test]
    fn test_detect_unknown_cookie_falls_through() {
        let registry = registry();
        assert_eq!(detect_locale(&registry, Some("pt"), Some("fr")).code(), "fr");
        assert_eq!(detect_locale(&registry, Some("pt"), None).code(), "en");
    }

    #[test]
    fn test_detect_defaults() {
        let registry = registry();
        assert_eq!(detect_locale(&registry, None, None).code(), "en");
        assert_eq!(detect_locale(&registry, None, Some("xx,yy")).code(), "en");
    }

    #[test]
    fn test_detect_zero_quality_is_still_selectable() {
        let registry = registry();
        assert_eq!(detect_locale(&registry, None, Some("xx,de;q=0")).code(), "de");
        assert_eq!(detect_locale(&registry, None, Some("de;q=0,fr;q=0.1")).code(), "fr");
    }
}
