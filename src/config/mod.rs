//! Build configuration management for `capsule.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[namespace]` | Class prefix and on/off switch                   |
//! | `[paths]`     | Source / output directories, emitted assets dir  |
//! | `[markup]`    | Document file and social-preview tag settings    |
//! | `[site]`      | Base URL the page is embedded under              |
//!
//! A missing config file is not an error: every field has a default, and
//! the CLI can override the common ones (`--prefix`, `--base-url`,
//! `--output`, `--clean`).

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::cli::Cli;
use crate::debug;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing capsule.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Clean output directory before building (CLI only)
    #[serde(skip)]
    pub clean: bool,

    /// Class namespacing settings
    pub namespace: NamespaceConfig,

    /// Directory layout
    pub paths: PathsConfig,

    /// Markup post-processing settings
    pub markup: MarkupConfig,

    /// Embedding site settings
    pub site: SiteConfig,
}

impl WrapConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Reads the config file next to which the project root is anchored;
    /// falls back to defaults when the file does not exist. CLI overrides
    /// are applied on top, then the result is validated.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = &cli.config;
        let mut config: Self = if path.is_file() {
            let text =
                fs::read_to_string(path).map_err(|e| ConfigError::Io(path.clone(), e))?;
            toml::from_str(&text)?
        } else {
            debug!("config"; "`{}` not found, using defaults", path.display());
            Self::default()
        };

        config.root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides on top of file values.
    fn apply_cli(&mut self, cli: &Cli) {
        let args = cli.build_args();
        if let Some(prefix) = &args.prefix {
            self.namespace.prefix = prefix.clone();
        }
        if let Some(base_url) = &args.base_url {
            self.site.base_url = base_url.clone();
        }
        if let Some(output) = &args.output {
            self.paths.output = output.clone();
        }
        self.clean = args.clean;
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.paths.source == self.paths.output {
            return Err(ConfigError::Validation(format!(
                "paths.source and paths.output are both `{}`",
                self.paths.source.display()
            )));
        }

        // An empty prefix means "no prefixing" rather than a hard error;
        // surface it so a stray `prefix = ""` is not a silent surprise.
        if self.namespace.enable && self.namespace.prefix.is_empty() {
            crate::log!("warning"; "namespace prefix is empty, class rewriting is disabled");
        }

        // Emitted asset keys are joined directly onto the base URL.
        if !self.site.base_url.ends_with('/') {
            self.site.base_url.push('/');
        }
        Ok(())
    }

    /// Absolute-ish source directory (relative to the project root).
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.paths.source)
    }

    /// Absolute-ish output directory (relative to the project root).
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output)
    }
}

// ============================================================================
// sections
// ============================================================================

/// `[namespace]` - class prefix settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Prefix prepended to every class name, e.g. `dwp-`.
    pub prefix: String,

    /// Master switch; `false` behaves exactly like an empty prefix.
    pub enable: bool,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            prefix: "dwp-".into(),
            enable: true,
        }
    }
}

/// `[paths]` - directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Source tree, relative to the project root.
    pub source: PathBuf,

    /// Output tree, relative to the project root.
    pub output: PathBuf,

    /// Directory (inside the output tree) for content-hashed assets.
    pub assets_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: "src".into(),
            output: "dist".into(),
            assets_dir: "assets".into(),
        }
    }
}

/// `[markup]` - post-bundle document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Document file (relative to the source tree) that receives the
    /// post-bundle pass.
    pub document: String,

    /// Substring identifying the social-preview image among emitted assets.
    pub og_image_marker: String,

    /// The tag content the source document refers to the image by.
    pub og_image_source: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            document: "index.html".into(),
            og_image_marker: "og-image".into(),
            og_image_source: "./assets/og-image.png".into(),
        }
    }
}

/// `[site]` - embedding host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix emitted asset keys are joined onto.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".into(),
        }
    }
}
