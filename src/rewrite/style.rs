//! Stylesheet rewrite pass.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::session::ClassRegistry;

/// `.` followed by an identifier starting with a letter.
///
/// The leading-letter requirement is the only guard against non-selector
/// contexts: `opacity: .5` is untouched because `5` is not a letter.
/// Selector position is deliberately not distinguished.
static RE_CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z][0-9A-Za-z_-]*)").unwrap());

/// Rewrite every class token in stylesheet text through the registry.
pub fn rewrite(registry: &mut ClassRegistry, source: &str) -> String {
    RE_CLASS_TOKEN
        .replace_all(source, |caps: &Captures| {
            format!(".{}", registry.resolve(&caps[1]))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> String {
        let mut reg = ClassRegistry::new("dwp-");
        rewrite(&mut reg, source)
    }

    #[test]
    fn test_selector_classes_are_prefixed() {
        assert_eq!(
            run(".feature-card { padding: 1rem; }"),
            ".dwp-feature-card { padding: 1rem; }"
        );
        assert_eq!(
            run(".menu-btn.open > .icon {}"),
            ".dwp-menu-btn.dwp-open > .dwp-icon {}"
        );
    }

    #[test]
    fn test_decimal_literals_are_untouched() {
        assert_eq!(run("opacity: .5;"), "opacity: .5;");
        assert_eq!(
            run(".fade { opacity: .5; margin: .25rem; }"),
            ".dwp-fade { opacity: .5; margin: .25rem; }"
        );
    }

    #[test]
    fn test_no_match_returns_source_unchanged() {
        let css = "body { margin: 0 }";
        assert_eq!(run(css), css);
    }

    #[test]
    fn test_registry_is_extended_by_the_pass() {
        let mut reg = ClassRegistry::new("dwp-");
        rewrite(&mut reg, ".a {} .b {} .a {}");
        assert_eq!(reg.len(), 2);
    }
}
