//! Literal-pattern rewrite passes.
//!
//! Each pass is a regex scan over raw text, not a parse of HTML/CSS/script
//! grammar. The heuristics and their known gaps are deliberate: dynamically
//! constructed class strings, non-literal `classList` arguments and
//! single-quoted HTML attributes are never matched, and identifiers must
//! start with a letter so numeric literals like `.5` are never touched.
//!
//! # Modules
//!
//! - `style`: `.identifier` selector tokens in stylesheet text
//! - `script`: selector literals, `classList` calls, hyphenated-id lookups
//! - `markup`: `class="…"` attributes and the social-preview asset tag

pub mod markup;
pub mod script;
pub mod style;
