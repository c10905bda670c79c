//! Build session: one registry, one configuration, one build run.
//!
//! The session is the transformer's only state. It is constructed when a
//! build starts and dropped when it finishes - never a module-level
//! singleton, so a dev-server rebuild and a production build running side
//! by side cannot interfere with each other.
//!
//! # Phases
//!
//! ```text
//! Configuring -> ModuleTransforming* -> Bundled -> Done
//! ```
//!
//! Script and stylesheet modules are rewritten one by one, in whatever
//! order the surrounding pipeline walks them - order does not matter
//! because name resolution is commutative and idempotent. The markup pass
//! runs exactly once, after `seal()`, because only then is the emitted
//! asset manifest complete.

mod registry;

pub use registry::ClassRegistry;

use std::path::Path;

use thiserror::Error;

use crate::config::WrapConfig;
use crate::core::{BuildMode, ModuleKind};
use crate::manifest::AssetManifest;
use crate::rewrite::{markup, script, style};

// ============================================================================
// Phase tracking
// ============================================================================

/// Lifecycle phase of a build session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Per-module transforms may run.
    ModuleTransforming,
    /// All modules processed; waiting for the post-bundle markup pass.
    Bundled,
    /// Markup finalized; the session is spent.
    Done,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Self::ModuleTransforming => "module-transforming",
            Self::Bundled => "bundled",
            Self::Done => "done",
        }
    }
}

/// Host misuse of the two-phase contract.
///
/// Distinct from content no-matches, which are never errors: an unmatched
/// snippet is silently passed through, but calling hooks out of order is a
/// bug in the surrounding pipeline and is reported as such.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("`{hook}` called in phase `{}`, expected `{}`", .actual.name(), .expected.name())]
    PhaseOrder {
        hook: &'static str,
        expected: Phase,
        actual: Phase,
    },
}

// ============================================================================
// BuildSession
// ============================================================================

/// State for a single build run.
///
/// Owns the class registry and the resolved `(prefix, base_url, mode)`
/// configuration. Created at build start, discarded at build end; never
/// persisted, never shared across concurrent builds.
#[derive(Debug)]
pub struct BuildSession {
    registry: ClassRegistry,
    base_url: String,
    og_image_marker: String,
    og_image_source: String,
    mode: BuildMode,
    phase: Phase,
}

impl BuildSession {
    /// Create a session from resolved configuration.
    pub fn new(config: &WrapConfig, mode: BuildMode) -> Self {
        // A disabled [namespace] section behaves like an empty prefix.
        let prefix = if config.namespace.enable {
            config.namespace.prefix.as_str()
        } else {
            ""
        };
        Self {
            registry: ClassRegistry::new(prefix),
            base_url: config.site.base_url.clone(),
            og_image_marker: config.markup.og_image_marker.clone(),
            og_image_source: config.markup.og_image_source.clone(),
            mode,
            phase: Phase::ModuleTransforming,
        }
    }

    /// Whether rewrite passes run at all.
    ///
    /// Development mode and an empty prefix both mean "no prefixing":
    /// every transform becomes a pass-through.
    #[inline]
    fn active(&self) -> bool {
        self.mode.prefix_classes && !self.registry.is_inert()
    }

    pub fn mode(&self) -> BuildMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Distinct class names registered so far.
    pub fn class_count(&self) -> usize {
        self.registry.len()
    }

    /// Rewrite one script or stylesheet module during the module phase.
    ///
    /// `module_id` is only consulted for its extension-like suffix; modules
    /// that are neither scripts nor stylesheets pass through unchanged, as
    /// does everything when the session is inactive. A source with no
    /// matching pattern anywhere is a legal outcome, not an error.
    pub fn transform_module(
        &mut self,
        module_id: &str,
        source: &str,
    ) -> Result<String, SessionError> {
        self.expect_phase("transform_module", Phase::ModuleTransforming)?;

        if !self.active() {
            return Ok(source.to_string());
        }

        let rewritten = match ModuleKind::from_path(Path::new(module_id)) {
            ModuleKind::Script => script::rewrite(&mut self.registry, source),
            ModuleKind::Stylesheet => style::rewrite(&mut self.registry, source),
            ModuleKind::Markup | ModuleKind::Asset => source.to_string(),
        };
        Ok(rewritten)
    }

    /// Mark the module phase complete: the bundler has finished and the
    /// asset manifest is now authoritative.
    pub fn seal(&mut self) -> Result<(), SessionError> {
        self.expect_phase("seal", Phase::ModuleTransforming)?;
        self.phase = Phase::Bundled;
        Ok(())
    }

    /// Run the single post-bundle markup pass: class attributes, then the
    /// social-preview asset tag. Consumes the session's remaining phase.
    ///
    /// Inactive sessions return the markup untouched, and a manifest with
    /// no matching asset leaves the preview tag alone - both degrade
    /// silently rather than failing the build.
    pub fn finalize_markup(
        &mut self,
        html: &str,
        assets: &AssetManifest,
    ) -> Result<String, SessionError> {
        self.expect_phase("finalize_markup", Phase::Bundled)?;
        self.phase = Phase::Done;

        if !self.active() {
            return Ok(html.to_string());
        }

        let html = markup::rewrite_classes(&mut self.registry, html);
        Ok(markup::patch_asset_tag(
            &html,
            assets,
            &self.base_url,
            &self.og_image_marker,
            &self.og_image_source,
        ))
    }

    fn expect_phase(&self, hook: &'static str, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::PhaseOrder {
                hook,
                expected,
                actual: self.phase,
            })
        }
    }
}
