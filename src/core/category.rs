//! Module kind definitions.

use std::path::Path;

/// Kind of source module, determines which rewrite pass applies.
///
/// Classification is a file-extension suffix check, mirroring how the
/// surrounding pipeline hands modules to the transformer: it never parses
/// content to decide what a module is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    /// Script file (.js, .mjs) - literal-pattern class rewriting
    Script,
    /// Stylesheet file (.css) - selector class rewriting
    Stylesheet,
    /// Markup file (.html, .htm) - rewritten once, post-bundle
    Markup,
    /// Anything else - copied through as an asset
    Asset,
}

impl ModuleKind {
    /// Detect module kind from file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" => Self::Script,
            "css" => Self::Stylesheet,
            "html" | "htm" => Self::Markup,
            _ => Self::Asset,
        }
    }

    /// Detect module kind from file path. Extension-less files are assets.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Asset)
    }

    /// Display name for this module kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Markup => "markup",
            Self::Asset => "asset",
        }
    }

    /// Check if this kind is rewritten during the module-transform phase.
    ///
    /// Markup is deliberately excluded: it is processed exactly once after
    /// bundling, when the asset manifest is complete.
    #[inline]
    pub fn is_module_transformed(self) -> bool {
        matches!(self, Self::Script | Self::Stylesheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(ModuleKind::from_extension("js"), ModuleKind::Script);
        assert_eq!(ModuleKind::from_extension("mjs"), ModuleKind::Script);
        assert_eq!(ModuleKind::from_extension("css"), ModuleKind::Stylesheet);
        assert_eq!(ModuleKind::from_extension("HTML"), ModuleKind::Markup);
        assert_eq!(ModuleKind::from_extension("png"), ModuleKind::Asset);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            ModuleKind::from_path(&PathBuf::from("js/main.js")),
            ModuleKind::Script
        );
        assert_eq!(
            ModuleKind::from_path(&PathBuf::from("styles/site.css")),
            ModuleKind::Stylesheet
        );
        assert_eq!(
            ModuleKind::from_path(&PathBuf::from("index.html")),
            ModuleKind::Markup
        );
        assert_eq!(
            ModuleKind::from_path(&PathBuf::from("CNAME")),
            ModuleKind::Asset
        );
    }

    #[test]
    fn test_is_module_transformed() {
        assert!(ModuleKind::Script.is_module_transformed());
        assert!(ModuleKind::Stylesheet.is_module_transformed());
        assert!(!ModuleKind::Markup.is_module_transformed());
        assert!(!ModuleKind::Asset.is_module_transformed());
    }
}
