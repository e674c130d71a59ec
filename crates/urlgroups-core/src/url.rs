//! URL list text helpers: scheme normalization for link opening and
//! line splitting for edited text.

/// Schemes accepted as-is by [`normalize_url`] (matched ASCII case-insensitively).
const KNOWN_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Scheme prepended to URLs that carry none of [`KNOWN_SCHEMES`].
const DEFAULT_SCHEME: &str = "http://";

/// Makes a URL openable by a browser.
///
/// Surrounding whitespace is trimmed; an empty string stays empty. If the
/// result does not start with `http://`, `https://` or `ftp://`, `http://`
/// is prepended. Only used for the value handed to the browser; stored
/// URLs are never rewritten.
///
/// # Examples
///
/// - `normalize_url("example.com")` → `"http://example.com"`
/// - `normalize_url("HTTPS://x.test")` → `"HTTPS://x.test"`
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if has_known_scheme(url) {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{url}")
    }
}

fn has_known_scheme(url: &str) -> bool {
    KNOWN_SCHEMES.iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Splits edited text into a URL list: lines are trimmed, blank lines
/// dropped, order kept.
pub fn parse_url_lines(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prefixes_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "http://example.com");
        assert_eq!(normalize_url("www.x.test/a?b=c"), "http://www.x.test/a?b=c");
        assert_eq!(normalize_url("localhost:8080"), "http://localhost:8080");
    }

    #[test]
    fn normalize_keeps_known_schemes() {
        for url in ["http://a.test", "https://b.test/x", "ftp://files.test/f.iso"] {
            assert_eq!(normalize_url(url), url);
        }
        assert_eq!(normalize_url("HTTPS://Upper.test"), "HTTPS://Upper.test");
    }

    #[test]
    fn normalize_other_schemes_get_prefixed() {
        // Only the three web schemes are recognized.
        assert_eq!(normalize_url("mailto:a@b.test"), "http://mailto:a@b.test");
        assert_eq!(normalize_url("file:///tmp/x"), "http://file:///tmp/x");
    }

    #[test]
    fn normalize_trims_and_keeps_empty() {
        assert_eq!(normalize_url("  example.com \t"), "http://example.com");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("   "), "");
    }

    #[test]
    fn normalize_short_and_multibyte_input() {
        assert_eq!(normalize_url("ht"), "http://ht");
        assert_eq!(normalize_url("ü.test"), "http://ü.test");
        assert_eq!(normalize_url("httpü://x"), "http://httpü://x");
    }

    #[test]
    fn parse_lines_trims_and_drops_blanks() {
        let text = "  example.com  \n\n\t\nhttps://y.test\r\n  ftp://z.test\n";
        assert_eq!(
            parse_url_lines(text),
            vec!["example.com", "https://y.test", "ftp://z.test"]
        );
    }

    #[test]
    fn parse_lines_empty_text() {
        assert!(parse_url_lines("").is_empty());
        assert!(parse_url_lines(" \n \n").is_empty());
    }

    #[test]
    fn parse_lines_keeps_order_and_duplicates() {
        assert_eq!(parse_url_lines("b\na\nb"), vec!["b", "a", "b"]);
    }
}
