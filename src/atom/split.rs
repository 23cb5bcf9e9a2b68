//! Portage-style `name-version[-rN]` splitting

use std::sync::LazyLock;

use regex::Regex;

/// Version grammar: numeric components, an optional letter, then `_suffix` ladder tokens
static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(cvs\.)?(\d+)((\.\d+)*)([a-z]?)((_(pre|p|beta|alpha|rc)\d*)*)$")
        .expect("version grammar is a valid regex")
});

/// Package name grammar accepted by the splitter (mixed case allowed)
static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_][A-Za-z0-9+_-]*$").expect("name grammar is a valid regex")
});

static REVISION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r\d+$").expect("revision grammar is a valid regex"));

/// Revision reported when a token carries no `-rN` suffix
pub const DEFAULT_REVISION: &str = "r0";

/// Tokens of a split package string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomParts {
    pub name: String,
    pub version: String,
    pub revision: String,
}

impl AtomParts {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            revision: revision.into(),
        }
    }
}

/// Trait for splitting a package token into name, version and revision
pub trait PackageSplitter: Send + Sync {
    /// Splits `token` into its parts
    ///
    /// # Returns
    /// * `Some(AtomParts)` - if the token decomposes into exactly name, version and revision
    /// * `None` - otherwise; the caller is expected to have a fallback
    fn split(&self, token: &str) -> Option<AtomParts>;
}

/// Splitter implementing the Portage `pkgsplit` grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct PortageSplitter;

impl PackageSplitter for PortageSplitter {
    fn split(&self, token: &str) -> Option<AtomParts> {
        split_package(token)
    }
}

/// Returns true if `version` matches the version grammar (without revision)
pub fn is_valid_version(version: &str) -> bool {
    VERSION.is_match(version)
}

/// Splits `token` using the permissive name grammar
pub fn split_package(token: &str) -> Option<AtomParts> {
    let parts: Vec<&str> = token.split('-').collect();
    if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let last = parts[parts.len() - 1];
    let (version_idx, revision) = if REVISION.is_match(last) {
        (parts.len() - 2, last)
    } else {
        (parts.len() - 1, DEFAULT_REVISION)
    };

    if version_idx == 0 {
        return None;
    }

    let version = parts[version_idx];
    if !is_valid_version(version) {
        return None;
    }

    // A name ending in something version-shaped would make the split ambiguous
    let name_parts = &parts[..version_idx];
    if is_valid_version(name_parts[name_parts.len() - 1]) {
        return None;
    }

    let name = name_parts.join("-");
    if !NAME.is_match(&name) {
        return None;
    }

    Some(AtomParts::new(name, version, revision))
}
