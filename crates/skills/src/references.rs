//! Path references in manifest body text.
//!
//! Markdown links (`[label](target)`) and inline code spans (`` `target` ``)
//! that point into `references/`, `scripts/`, or `assets/` are collected so
//! the validator can check they exist on disk.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::rules::PATH_PREFIXES;

static LINK_TARGET: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[[^\]]+\]\(([^)]+)\)").ok());

static CODE_SPAN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"`([^`]+)`").ok());

/// Collect the distinct skill-relative paths referenced from `body`.
pub fn extract_references(body: &str) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for pattern in [&*LINK_TARGET, &*CODE_SPAN].into_iter().flatten() {
        for captures in pattern.captures_iter(body) {
            if let Some(token) = captures.get(1).and_then(|m| normalize_token(m.as_str())) {
                found.insert(token);
            }
        }
    }

    found
}

/// Reduce a raw link target or code span to a relative path, or `None`
/// when it is not a checkable local reference.
pub fn normalize_token(raw: &str) -> Option<String> {
    let token = raw
        .trim()
        .trim_matches(['<', '>'])
        .trim_matches(['"', '\'', '`'])
        .trim_end_matches([',', '.', ';', ':', ')']);

    if token.is_empty() {
        return None;
    }
    // Templated placeholders and external URLs are never on disk.
    if token.contains(['{', '}']) || token.contains("://") {
        return None;
    }

    let token = token.split('#').next().unwrap_or_default();
    let token = token.split('?').next().unwrap_or_default();
    if !PATH_PREFIXES.iter().any(|prefix| token.starts_with(prefix)) {
        return None;
    }
    Some(token.to_string())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case("scripts/run.py", Some("scripts/run.py"))]
    #[case("  references/guide.md  ", Some("references/guide.md"))]
    #[case("<assets/logo.png>", Some("assets/logo.png"))]
    #[case("\"scripts/a.sh\"", Some("scripts/a.sh"))]
    #[case("'assets/x.txt'", Some("assets/x.txt"))]
    #[case("references/guide.md.", Some("references/guide.md"))]
    #[case("scripts/run.py),", Some("scripts/run.py"))]
    #[case("references/guide.md#setup", Some("references/guide.md"))]
    #[case("assets/page.html?v=2", Some("assets/page.html"))]
    #[case("references/api.md?q=1#top", Some("references/api.md"))]
    #[case("scripts/{name}.py", None)]
    #[case("https://example.com/scripts/a.py", None)]
    #[case("src/main.rs", None)]
    #[case("./scripts/run.py", None)]
    #[case("<>", None)]
    #[case("", None)]
    fn normalize(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_token(raw).as_deref(), expected);
    }

    #[test]
    fn extracts_links_and_code_spans() {
        let body = "\
See [the guide](references/guide.md) and run `scripts/run.py`.
Also [logo](<assets/logo.png>) and `pip install foo`.
External: [docs](https://example.com/references/x.md).
";
        let refs: Vec<_> = extract_references(body).into_iter().collect();
        assert_eq!(refs, vec![
            "assets/logo.png",
            "references/guide.md",
            "scripts/run.py"
        ]);
    }

    #[test]
    fn duplicates_collapse() {
        let body = "`scripts/a.py` then [again](scripts/a.py) and `scripts/a.py`";
        assert_eq!(extract_references(body).len(), 1);
    }

    #[test]
    fn empty_link_label_is_not_a_reference() {
        assert!(extract_references("[](scripts/a.py)").is_empty());
    }
}
