//! Build driver: the transformer's pipeline host.
//!
//! Plays the role the external bundler plays in a larger pipeline,
//! honoring the session's two-phase contract:
//!
//! 1. **Module phase** - walk the source tree; scripts and stylesheets go
//!    through `transform_module`, other files are emitted as assets under
//!    content-hashed names, building up the manifest.
//! 2. **Post-bundle phase** - with the manifest complete, the document gets
//!    its single `finalize_markup` pass and the manifest is written out.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;

use crate::config::WrapConfig;
use crate::core::{BuildMode, ModuleKind};
use crate::manifest::{AssetKind, AssetManifest, ManifestEntry};
use crate::session::BuildSession;
use crate::utils::hash;
use crate::{debug, log};

/// Build the page into the output directory.
pub fn build_page(config: &WrapConfig, mode: BuildMode) -> Result<()> {
    let start = Instant::now();

    let source_dir = config.source_dir();
    if !source_dir.is_dir() {
        bail!("source directory `{}` not found", source_dir.display());
    }

    let output_dir = config.output_dir();
    if config.clean && output_dir.exists() {
        fs::remove_dir_all(&output_dir)
            .with_context(|| format!("failed to clean `{}`", output_dir.display()))?;
    }
    fs::create_dir_all(&output_dir)?;

    let mut session = BuildSession::new(config, mode);
    let mut assets = AssetManifest::default();
    let mut document: Option<String> = None;
    let mut counts = Counts::default();

    // Module phase: dependency-walk order is irrelevant to the final
    // registry contents, but a sorted walk keeps output deterministic.
    for entry in WalkDir::new(&source_dir).sort(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let rel = path.strip_prefix(&source_dir)?.to_path_buf();
        let rel_str = rel.to_string_lossy().replace('\\', "/");

        let kind = ModuleKind::from_path(&rel);
        match kind {
            ModuleKind::Script | ModuleKind::Stylesheet => {
                let source = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                let rewritten = session.transform_module(&rel_str, &source)?;
                write_output(&output_dir, &rel, rewritten.as_bytes())?;
                assets.push(ManifestEntry::new(&rel_str, AssetKind::Chunk, &rel_str));
                debug!("build"; "{}: {}", kind.name(), rel_str);
                counts.bump(kind);
            }
            ModuleKind::Markup if rel_str == config.markup.document => {
                // Held back for the post-bundle pass.
                document = Some(
                    fs::read_to_string(&path)
                        .with_context(|| format!("failed to read `{}`", path.display()))?,
                );
            }
            ModuleKind::Markup => {
                // Secondary markup files are copied through untouched; only
                // the configured document receives the post-bundle pass.
                let bytes = fs::read(&path)?;
                write_output(&output_dir, &rel, &bytes)?;
            }
            ModuleKind::Asset => {
                let bytes = fs::read(&path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                let key = if mode.hash_assets {
                    hashed_asset_key(&config.paths.assets_dir, &rel, &bytes)
                } else {
                    rel_str.clone()
                };
                write_output(&output_dir, Path::new(&key), &bytes)?;
                assets.push(ManifestEntry::new(&key, AssetKind::Asset, &rel_str));
                debug!("build"; "asset: {} -> {}", rel_str, key);
                counts.bump(kind);
            }
        }
    }

    // The manifest is complete; module transforms are over.
    session.seal()?;

    match document {
        Some(html) => {
            let finalized = session.finalize_markup(&html, &assets)?;
            write_output(
                &output_dir,
                Path::new(&config.markup.document),
                finalized.as_bytes(),
            )?;
        }
        None => {
            log!(
                "warning";
                "document `{}` not found under `{}`",
                config.markup.document,
                source_dir.display()
            );
        }
    }

    if mode.hash_assets {
        assets.write_json(&output_dir.join("manifest.json"))?;
    }

    log!(
        "build";
        "{} scripts, {} stylesheets, {} assets, {} classes namespaced in {:.2?}",
        counts.scripts,
        counts.stylesheets,
        counts.assets,
        session.class_count(),
        start.elapsed()
    );
    Ok(())
}

#[derive(Default)]
struct Counts {
    scripts: usize,
    stylesheets: usize,
    assets: usize,
}

impl Counts {
    fn bump(&mut self, kind: ModuleKind) {
        match kind {
            ModuleKind::Script => self.scripts += 1,
            ModuleKind::Stylesheet => self.stylesheets += 1,
            ModuleKind::Asset => self.assets += 1,
            ModuleKind::Markup => {}
        }
    }
}

/// Output key for an asset: `<assets_dir>/<stem>-<fingerprint>[.<ext>]`.
fn hashed_asset_key(assets_dir: &str, rel: &Path, bytes: &[u8]) -> String {
    let fp = hash::fingerprint(bytes);
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match rel.extension() {
        Some(ext) => format!("{assets_dir}/{stem}-{fp}.{}", ext.to_string_lossy()),
        None => format!("{assets_dir}/{stem}-{fp}"),
    }
}

fn write_output(output_dir: &Path, rel: &Path, bytes: &[u8]) -> Result<()> {
    let dest = output_dir.join(rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, bytes).with_context(|| format!("failed to write `{}`", dest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HTML: &str = concat!(
        r#"<meta property="og:image" content="./assets/og-image.png">"#,
        "\n",
        r#"<div class="feature-card icon"><button class="menu-btn"></button></div>"#,
    );
    const JS: &str =
        "document.querySelector('.menu-btn').classList.add('open');\ngetElementById('my-id');";
    const CSS: &str = ".menu-btn { opacity: .5; }\n.feature-card {}";

    fn write_page(root: &Path) {
        let src = root.join("src");
        fs::create_dir_all(src.join("js")).unwrap();
        fs::write(src.join("index.html"), HTML).unwrap();
        fs::write(src.join("js/main.js"), JS).unwrap();
        fs::write(src.join("style.css"), CSS).unwrap();
        fs::write(src.join("og-image.png"), b"\x89PNG fake").unwrap();
    }

    fn config_at(root: &Path) -> WrapConfig {
        let mut config = WrapConfig::default();
        config.root = root.to_path_buf();
        config
    }

    #[test]
    fn test_production_build_round_trip() {
        let dir = TempDir::new().unwrap();
        write_page(dir.path());
        let config = config_at(dir.path());

        build_page(&config, BuildMode::PRODUCTION).unwrap();

        let dist = dir.path().join("dist");
        let js = fs::read_to_string(dist.join("js/main.js")).unwrap();
        assert_eq!(
            js,
            "document.querySelector('.dwp-menu-btn').classList.add('dwp-open');\nquerySelector('.dwp-my-id');"
        );

        let css = fs::read_to_string(dist.join("style.css")).unwrap();
        assert_eq!(css, ".dwp-menu-btn { opacity: .5; }\n.dwp-feature-card {}");

        let html = fs::read_to_string(dist.join("index.html")).unwrap();
        assert!(html.contains(r#"class="dwp-feature-card dwp-icon""#));
        assert!(html.contains(r#"class="dwp-menu-btn""#));

        // The preview tag points at the emitted, hashed asset.
        let fp = hash::fingerprint(b"\x89PNG fake");
        let key = format!("assets/og-image-{fp}.png");
        assert!(html.contains(&format!(r#"content="/{key}""#)));
        assert!(dist.join(&key).is_file());

        // Manifest records every output.
        let manifest =
            AssetManifest::from_json(&fs::read_to_string(dist.join("manifest.json")).unwrap())
                .unwrap();
        assert_eq!(manifest.find_asset("og-image").unwrap().key, key);
    }

    #[test]
    fn test_dev_build_passes_everything_through() {
        let dir = TempDir::new().unwrap();
        write_page(dir.path());
        let config = config_at(dir.path());

        build_page(&config, BuildMode::DEVELOPMENT).unwrap();

        let dist = dir.path().join("dist");
        assert_eq!(fs::read_to_string(dist.join("js/main.js")).unwrap(), JS);
        assert_eq!(fs::read_to_string(dist.join("style.css")).unwrap(), CSS);
        assert_eq!(fs::read_to_string(dist.join("index.html")).unwrap(), HTML);
        assert!(dist.join("og-image.png").is_file());
        assert!(!dist.join("manifest.json").exists());
    }

    #[test]
    fn test_missing_preview_asset_degrades_silently() {
        let dir = TempDir::new().unwrap();
        write_page(dir.path());
        fs::remove_file(dir.path().join("src/og-image.png")).unwrap();
        let config = config_at(dir.path());

        build_page(&config, BuildMode::PRODUCTION).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(html.contains(r#"content="./assets/og-image.png""#));
    }

    #[test]
    fn test_missing_source_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = config_at(dir.path());
        assert!(build_page(&config, BuildMode::PRODUCTION).is_err());
    }
}
