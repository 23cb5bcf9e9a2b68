//! Mirror rewriting for well-known hosting providers
//!
//! Providers turn a plain download URL into the package manager's `mirror://`
//! form and guess the project homepage along the way.

pub mod pypi;
pub mod sourceforge;

use tracing::debug;
use url::Url;

pub use pypi::PyPiMirror;
pub use sourceforge::SourceForgeMirror;

/// URI rewritten to a mirror scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorUri {
    pub uri: String,
    pub homepage: String,
}

/// Trait for hosting providers that have a mirror scheme
pub trait MirrorResolver: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    /// Rewrites `url` if it belongs to this provider
    fn resolve(&self, url: &Url) -> Option<MirrorUri>;
}

/// Built-in providers, tried in order
pub fn providers() -> Vec<Box<dyn MirrorResolver>> {
    vec![Box::new(SourceForgeMirror), Box::new(PyPiMirror)]
}

/// Rewrites `uri` with the first provider that recognizes it
pub fn rewrite(uri: &str) -> Option<MirrorUri> {
    rewrite_with(&providers(), uri)
}

pub fn rewrite_with(providers: &[Box<dyn MirrorResolver>], uri: &str) -> Option<MirrorUri> {
    let url = Url::parse(uri)
        .inspect_err(|e| debug!("rewrite: cannot parse {}: {}", uri, e))
        .ok()?;

    providers.iter().find_map(|provider| {
        provider.resolve(&url).inspect(|mirror| {
            debug!("rewrite: {} matched {} -> {}", provider.name(), uri, mirror.uri);
        })
    })
}
