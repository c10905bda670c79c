//! Script rewrite pass.
//!
//! Three literal-pattern scans over the same text. Their match sets are
//! disjoint by construction (a selector literal starts with `.`, a
//! `classList` argument does not, an element id is not a selector), so the
//! passes run in a fixed order but the order does not matter.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::session::ClassRegistry;

/// A string literal whose entire content is `.` + identifier, in any of the
/// three quote styles. Mismatched quotes around the literal are not a match.
static RE_SELECTOR_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"'\.([A-Za-z][0-9A-Za-z_-]*)'|"\.([A-Za-z][0-9A-Za-z_-]*)"|`\.([A-Za-z][0-9A-Za-z_-]*)`"#,
    )
    .unwrap()
});

/// `classList.<method>('<literal>')` for the fixed method set.
///
/// Any other method name, or a non-literal argument, is left untouched -
/// an intentional completeness limitation of the literal-pattern approach.
/// Output always uses single quotes, whatever the input quoting was.
static RE_CLASSLIST_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"classList\.(add|remove|toggle|contains)\(['"`]([^'"`]+)['"`]\)"#).unwrap()
});

/// `getElementById('<id>')` with a literal argument.
static RE_ID_LOOKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"getElementById\(['"`]([^'"`]+)['"`]\)"#).unwrap());

/// Rewrite class references in script text through the registry.
pub fn rewrite(registry: &mut ClassRegistry, source: &str) -> String {
    let source = rewrite_selector_literals(registry, source);
    let source = rewrite_classlist_calls(registry, &source);
    rewrite_id_lookups(registry, &source)
}

/// Pass 1: whole-literal class selectors, quote style preserved.
fn rewrite_selector_literals(registry: &mut ClassRegistry, source: &str) -> String {
    RE_SELECTOR_LITERAL
        .replace_all(source, |caps: &Captures| {
            let (quote, name) = if let Some(m) = caps.get(1) {
                ('\'', m.as_str())
            } else if let Some(m) = caps.get(2) {
                ('"', m.as_str())
            } else {
                ('`', &caps[3])
            };
            format!("{quote}.{}{quote}", registry.resolve(name))
        })
        .into_owned()
}

/// Pass 2: class-list mutation calls with a literal argument.
fn rewrite_classlist_calls(registry: &mut ClassRegistry, source: &str) -> String {
    RE_CLASSLIST_CALL
        .replace_all(source, |caps: &Captures| {
            format!("classList.{}('{}')", &caps[1], registry.resolve(&caps[2]))
        })
        .into_owned()
}

/// Pass 3: hyphenated-id lookups treated as class lookups.
///
/// An id containing a hyphen is assumed to really be a class-like hook and
/// becomes a class-selector query; plain ids are genuine element ids and
/// stay as they are. A heuristic, not a proof.
fn rewrite_id_lookups(registry: &mut ClassRegistry, source: &str) -> String {
    RE_ID_LOOKUP
        .replace_all(source, |caps: &Captures| {
            let id = &caps[1];
            if id.contains('-') {
                format!("querySelector('.{}')", registry.resolve(id))
            } else {
                caps[0].to_string()
            }
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
    fn test_selector_literal_single_quotes() {
        assert_eq!(
            run("document.querySelector('.menu-btn')"),
            "document.querySelector('.dwp-menu-btn')"
        );
    }

    #[test]
    fn test_selector_literal_preserves_quote_style() {
        assert_eq!(run(r#"$$(".card")"#), r#"$$(".dwp-card")"#);
        assert_eq!(run("$(`.hero`)"), "$(`.dwp-hero`)");
    }

    #[test]
    fn test_selector_literal_requires_whole_content() {
        // Compound selectors are not a whole-literal match
        assert_eq!(run("$('.a .b')"), "$('.a .b')");
        // Mismatched quotes are not a match either
        assert_eq!(run(r#"'.menu-btn""#), r#"'.menu-btn""#);
    }

    #[test]
    fn test_classlist_methods_are_rewritten() {
        assert_eq!(
            run("el.classList.add('open')"),
            "el.classList.add('dwp-open')"
        );
        assert_eq!(
            run("el.classList.toggle('visible')"),
            "el.classList.toggle('dwp-visible')"
        );
        // Double-quoted input comes out single-quoted
        assert_eq!(
            run(r#"el.classList.remove("error")"#),
            "el.classList.remove('dwp-error')"
        );
    }

    #[test]
    fn test_unsupported_classlist_method_is_untouched() {
        let src = "el.classList.someOtherMethod('open')";
        assert_eq!(run(src), src);
    }

    #[test]
    fn test_non_literal_classlist_argument_is_untouched() {
        let src = "el.classList.add(stateClass)";
        assert_eq!(run(src), src);
    }

    #[test]
    fn test_hyphenated_id_becomes_class_query() {
        assert_eq!(
            run("document.getElementById('my-id')"),
            "document.querySelector('.dwp-my-id')"
        );
    }

    #[test]
    fn test_plain_id_lookup_is_untouched() {
        let src = "document.getElementById('myid')";
        assert_eq!(run(src), src);
    }

    #[test]
    fn test_no_match_returns_source_unchanged() {
        let src = "const wait = 250; setTimeout(done, wait);";
        assert_eq!(run(src), src);
    }

    #[test]
    fn test_passes_share_one_registry() {
        let mut reg = ClassRegistry::new("dwp-");
        let out = rewrite(
            &mut reg,
            "$('.open'); el.classList.add('open'); getElementById('open-panel')",
        );
        assert_eq!(
            out,
            "$('.dwp-open'); el.classList.add('dwp-open'); querySelector('.dwp-open-panel')"
        );
        assert_eq!(reg.len(), 2);
    }
}
