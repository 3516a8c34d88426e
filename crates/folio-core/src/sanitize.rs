//! Input sanitization and HTML escaping.

use std::sync::LazyLock;

use regex::Regex;

/// Opening or closing tag, or an unterminated tag running to end of input.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+(>|$)").unwrap());

/// Escape the five HTML-significant characters `& < > " '`.
pub fn escape_html(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#039;"),
            _ => output.push(ch),
        }
    }
    output
}

/// Strip tag-like substrings, then escape what remains.
///
/// Applied to untrusted form input before validation or storage.
pub fn sanitize(input: &str) -> String {
    let stripped = TAG_RE.replace_all(input, "");
    escape_html(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_all_five() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn escape_html_ampersand_first() {
        // An existing entity is escaped again rather than passed through.
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("Responsive Design"), "Responsive Design");
        assert_eq!(escape_html(""), "");
        assert_eq!(escape_html("café ✓"), "café ✓");
    }

    #[test]
    fn sanitize_strips_tags() {
        assert_eq!(sanitize("<b>Hello</b> world"), "Hello world");
        assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
    }

    #[test]
    fn sanitize_strips_unterminated_tag() {
        assert_eq!(sanitize("hi <img src=x onerror=alert(1)"), "hi ");
    }

    #[test]
    fn sanitize_escapes_leftovers() {
        assert_eq!(sanitize("a > b & c"), "a &gt; b &amp; c");
        assert_eq!(sanitize("O'Brien"), "O&#039;Brien");
        assert_eq!(sanitize(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn sanitize_lone_less_than() {
        // "<" followed by nothing tag-like stays and is escaped.
        assert_eq!(sanitize("1 <"), "1 &lt;");
    }
}
