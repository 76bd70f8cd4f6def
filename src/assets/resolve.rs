use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use url::Url;

use crate::foundation::error::{BridgeError, BridgeResult};

/// Host-provided lookup for assets embedded in the application bundle.
pub trait EmbeddedAssets {
    /// Map an embedded asset name to a concrete resource URL, if the bundle has it.
    fn lookup(&self, name: &str) -> Option<Url>;
}

/// Lookup that never finds anything; every raw string is treated as a URI.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEmbeddedAssets;

impl EmbeddedAssets for NoEmbeddedAssets {
    fn lookup(&self, _name: &str) -> Option<Url> {
        None
    }
}

impl EmbeddedAssets for BTreeMap<String, Url> {
    fn lookup(&self, name: &str) -> Option<Url> {
        self.get(name).cloned()
    }
}

/// Embedded assets stored as plain files below a bundle directory.
#[derive(Clone, Debug)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    /// Serve assets from files below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bundle directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EmbeddedAssets for DirectoryAssets {
    fn lookup(&self, name: &str) -> Option<Url> {
        let rel = normalize_asset_name(name).ok()?;
        let path = self.root.join(rel);
        if !path.is_file() {
            return None;
        }
        let abs = std::path::absolute(&path).ok()?;
        Url::from_file_path(abs).ok()
    }
}

/// Normalize a bundle-relative asset name.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute names or
/// parent traversals (`..`).
pub(crate) fn normalize_asset_name(name: &str) -> BridgeResult<String> {
    let s = name.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BridgeError::invalid_arguments(
            "embedded asset names must be relative",
        ));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BridgeError::invalid_arguments(
                "embedded asset names must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BridgeError::invalid_arguments(
            "embedded asset name must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Turns loosely typed asset URI strings into concrete resource URLs.
///
/// Embedded assets win; anything else must already be an absolute URI or an absolute
/// filesystem path.
pub struct AssetResolver {
    embedded: Box<dyn EmbeddedAssets>,
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(NoEmbeddedAssets)
    }
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver").finish_non_exhaustive()
    }
}

impl AssetResolver {
    /// Resolver backed by the given embedded-asset lookup.
    pub fn new(embedded: impl EmbeddedAssets + 'static) -> Self {
        Self {
            embedded: Box::new(embedded),
        }
    }

    /// Resolve `raw`, returning `None` when it is neither an embedded asset nor a parseable URI.
    pub fn resolve(&self, raw: &str) -> Option<Url> {
        if raw.trim().is_empty() {
            return None;
        }
        if let Some(url) = self.embedded.lookup(raw) {
            return Some(url);
        }
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(url::ParseError::RelativeUrlWithoutBase) if Path::new(raw).is_absolute() => {
                Url::from_file_path(raw).ok()
            }
            Err(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolve.rs"]
mod tests;
