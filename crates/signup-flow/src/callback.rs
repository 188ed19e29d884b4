//! Post-login callback URL sanitizer.
//!
//! Only same-origin relative paths survive; anything that could be used
//! for an open redirect is dropped silently and the flow proceeds
//! without a callback.

/// Sanitize a callback URL captured at flow entry.
///
/// Accepts only absolute paths (`/...`) for the given locale. Rejects
/// protocol-relative targets, backslashes, embedded schemes, and control
/// characters. A safe path outside the locale prefix is re-rooted under
/// it.
pub fn sanitize_callback_url(raw: &str, locale: &str) -> Option<String> {
    let raw = raw.trim();

    if raw.is_empty() || !raw.starts_with('/') {
        return None;
    }

    // Protocol-relative ("//evil.com") and scheme smuggling.
    if raw.starts_with("//") || raw.contains('\\') || raw.contains("://") {
        return None;
    }

    if raw.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return None;
    }

    let locale_prefix = format!("/{}", locale);
    if raw == locale_prefix || raw.starts_with(&format!("{}/", locale_prefix)) {
        Some(raw.to_string())
    } else {
        Some(format!("{}{}", locale_prefix, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_locale_relative_path() {
        assert_eq!(
            sanitize_callback_url("/en/account/orders", "en"),
            Some("/en/account/orders".to_string())
        );
    }

    #[test]
    fn test_reroots_path_under_locale() {
        assert_eq!(
            sanitize_callback_url("/account", "fa"),
            Some("/fa/account".to_string())
        );
    }

    #[test]
    fn test_rejects_absolute_urls() {
        assert_eq!(sanitize_callback_url("https://evil.com/", "en"), None);
        assert_eq!(sanitize_callback_url("javascript:alert(1)", "en"), None);
    }

    #[test]
    fn test_rejects_protocol_relative() {
        assert_eq!(sanitize_callback_url("//evil.com/path", "en"), None);
    }

    #[test]
    fn test_rejects_backslash_and_embedded_scheme() {
        assert_eq!(sanitize_callback_url("/\\evil.com", "en"), None);
        assert_eq!(sanitize_callback_url("/redirect?to=https://evil.com", "en"), None);
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(sanitize_callback_url("", "en"), None);
        assert_eq!(sanitize_callback_url("   ", "en"), None);
        assert_eq!(sanitize_callback_url("/a path", "en"), None);
    }

    #[test]
    fn test_locale_root_alone_is_accepted() {
        assert_eq!(sanitize_callback_url("/en", "en"), Some("/en".to_string()));
    }
}
