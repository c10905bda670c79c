//! Build mode configuration for production/development builds.

/// Build mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMode {
    /// Whether class identifiers are rewritten with the configured prefix.
    /// Development builds keep the un-prefixed names so markup and scripts
    /// stay mutually consistent while iterating.
    pub prefix_classes: bool,

    /// Whether assets are emitted under content-hashed names and recorded
    /// in the output manifest.
    pub hash_assets: bool,
}

impl BuildMode {
    /// Production mode: prefixed classes, hashed assets, manifest emitted.
    pub const PRODUCTION: Self = Self {
        prefix_classes: true,
        hash_assets: true,
    };

    /// Development mode: everything passes through unmodified.
    pub const DEVELOPMENT: Self = Self {
        prefix_classes: false,
        hash_assets: false,
    };

    /// Check if this is development mode.
    #[inline]
    pub const fn is_dev(&self) -> bool {
        !self.prefix_classes
    }
}
