use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `[label](target)`; the target may hold one level of balanced parentheses.
static INLINE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(((?:[^()]|\([^()]*\))*)\)").unwrap());

/// What a markdown link collapses to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkPreference {
    /// `[label](url)` → `label`
    Label,
    /// `[label](url)` → `url`
    Target,
    /// `[label](url)` → nothing; surrounding text is kept
    Drop,
}

/// Reduce every inline markdown link in `text` according to `pref`.
/// Links with an empty label are removed regardless of preference.
///
/// Replacement repeats until no link syntax is left, so the output is a
/// fixpoint: normalizing it again returns it unchanged.
pub fn normalize_links(text: &str, pref: LinkPreference) -> String {
    let mut current = text.to_string();
    while INLINE_LINK_RE.is_match(&current) {
        current = INLINE_LINK_RE
            .replace_all(&current, |caps: &Captures| {
                let label = caps[1].trim();
                if label.is_empty() {
                    return String::new();
                }
                match pref {
                    LinkPreference::Label => label.to_string(),
                    LinkPreference::Target => caps[2].trim().to_string(),
                    LinkPreference::Drop => String::new(),
                }
            })
            .into_owned();
    }
    current
}

/// Label-preferring normalization, trimmed. The common case for extracted fields.
pub fn clean(text: &str) -> String {
    normalize_links(text, LinkPreference::Label).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[jane@example.com](mailto:jane@example.com)", LinkPreference::Label, "jane@example.com")]
    #[case("[Site](https://jane.dev)", LinkPreference::Target, "https://jane.dev")]
    #[case("LinkedIn: [jane](https://linkedin.com/in/jane)", LinkPreference::Drop, "LinkedIn: ")]
    #[case("Built [Foo](https://foo.io) and [Bar](https://bar.io)", LinkPreference::Label, "Built Foo and Bar")]
    #[case("no links here", LinkPreference::Target, "no links here")]
    #[case("[Rust](https://en.wikipedia.org/wiki/Rust_(programming_language)) dev", LinkPreference::Label, "Rust dev")]
    #[case("[Rust](https://en.wikipedia.org/wiki/Rust_(language))", LinkPreference::Target, "https://en.wikipedia.org/wiki/Rust_(language)")]
    fn reduces_links(#[case] input: &str, #[case] pref: LinkPreference, #[case] expected: &str) {
        assert_eq!(normalize_links(input, pref), expected);
    }

    #[test]
    fn empty_link_removed() {
        assert_eq!(normalize_links("[]()", LinkPreference::Label), "");
        assert_eq!(normalize_links("see [](https://x.io) here", LinkPreference::Target), "see  here");
    }

    #[test]
    fn nested_link_fully_reduced() {
        assert_eq!(normalize_links("[[a](b)](c)", LinkPreference::Label), "a");
    }

    #[rstest]
    #[case("[[a](b)](c)")]
    #[case("[x]([y](z))")]
    #[case("[]()[]()[ok](u)")]
    #[case("[unclosed](link")]
    #[case("plain [brackets] and (parens)")]
    #[case("[a](b_(c)) and [d](e_(f)")]
    fn idempotent(#[case] input: &str) {
        for pref in [LinkPreference::Label, LinkPreference::Target, LinkPreference::Drop] {
            let once = normalize_links(input, pref);
            assert_eq!(normalize_links(&once, pref), once, "pref {pref:?} on {input:?}");
        }
    }

    #[test]
    fn clean_trims() {
        assert_eq!(clean("  [Acme](https://acme.com)  "), "Acme");
    }
}
