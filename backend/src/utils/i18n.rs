//! Internationalization utilities for the backend
//!
//! This module provides locale extraction from HTTP requests and
//! thread-local storage for the current locale.

use std::cell::RefCell;

// Thread-local storage for current locale
thread_local! {
    static CURRENT_LOCALE: RefCell<String> = RefCell::new("en".to_string());
}

/// Supported locales
pub const SUPPORTED_LOCALES: &[&str] = &["en", "fr", "ar"];
pub const DEFAULT_LOCALE: &str = "en";

/// Set the current locale for the current thread
pub fn set_locale(locale: &str) {
    let locale = normalize_locale(locale);
    CURRENT_LOCALE.with(|l| {
        *l.borrow_mut() = locale;
    });
}

/// Get the current locale for the current thread
pub fn get_locale() -> String {
    CURRENT_LOCALE.with(|l| l.borrow().clone())
}

/// Normalize locale string to supported format
/// Accepts: "en", "en-US", "en_US", "fr", "fr-FR", "ar", "ar-MA", etc.
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().to_lowercase();

    // Extract primary language tag
    let primary = locale
        .split(|c| c == '-' || c == '_' || c == ',')
        .next()
        .unwrap_or(DEFAULT_LOCALE);

    // Map to supported locale
    if primary.starts_with("fr") {
        "fr".to_string()
    } else if primary.starts_with("ar") {
        "ar".to_string()
    } else if primary.starts_with("en") {
        "en".to_string()
    } else {
        DEFAULT_LOCALE.to_string()
    }
}

/// Extract locale from Accept-Language header value
pub fn extract_locale_from_header(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) => normalize_locale(value),
        None => DEFAULT_LOCALE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("fr"), "fr");
        assert_eq!(normalize_locale("fr_FR"), "fr");
        assert_eq!(normalize_locale("ar-MA"), "ar");
        assert_eq!(normalize_locale("de"), "en"); // Unsupported, fallback to default
        assert_eq!(normalize_locale(""), "en");
    }

    #[test]
    fn test_set_get_locale() {
        set_locale("fr");
        assert_eq!(get_locale(), "fr");

        set_locale("ar-MA");
        assert_eq!(get_locale(), "ar");
    }

    #[test]
    fn test_extract_locale_from_header() {
        assert_eq!(extract_locale_from_header(Some("fr-FR,fr;q=0.9")), "fr");
        assert_eq!(extract_locale_from_header(None), "en");
    }
}
