//! Markup rewrite pass.
//!
//! Runs once per build, on the fully assembled document, after bundling:
//! only then is the asset manifest complete, so both responsibilities of
//! this pass (class attributes and the social-preview tag) live behind the
//! session's post-bundle hook.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::manifest::AssetManifest;
use crate::session::ClassRegistry;

/// Double-quoted `class` attributes. Single-quoted attributes are a known
/// false negative of the literal-pattern approach.
static RE_CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"class="([^"]+)""#).unwrap());

/// Rewrite every `class="…"` attribute value through the registry.
///
/// The value is split on whitespace, empty tokens are dropped, and the
/// resolved tokens are rejoined with single spaces in their original order.
pub fn rewrite_classes(registry: &mut ClassRegistry, html: &str) -> String {
    RE_CLASS_ATTR
        .replace_all(html, |caps: &Captures| {
            let resolved: Vec<_> = caps[1]
                .split_whitespace()
                .map(|token| registry.resolve(token))
                .collect();
            format!(r#"class="{}""#, resolved.join(" "))
        })
        .into_owned()
}

/// Point the social-preview tag at the emitted asset.
///
/// Looks for the manifest entry whose key contains `marker` and whose kind
/// is `asset`, then replaces `content="<original>"` with the entry's final
/// URL under `base_url`. A cosmetic feature: when no entry matches, the tag
/// keeps its original content and the build carries on.
pub fn patch_asset_tag(
    html: &str,
    assets: &AssetManifest,
    base_url: &str,
    marker: &str,
    original: &str,
) -> String {
    let Some(entry) = assets.find_asset(marker) else {
        return html.to_string();
    };
    let final_url = format!("{base_url}{}", entry.key);
    html.replace(
        &format!(r#"content="{original}""#),
        &format!(r#"content="{final_url}""#),
    )
}
