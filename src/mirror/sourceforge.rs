//! SourceForge mirror provider

use url::Url;

use crate::mirror::{MirrorResolver, MirrorUri};

const PATH_PREFIX: &str = "/sourceforge";

/// Rewrites SourceForge download URLs to `mirror://sourceforge`
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceForgeMirror;

impl MirrorResolver for SourceForgeMirror {
    fn name(&self) -> &'static str {
        "sourceforge"
    }

    fn resolve(&self, url: &Url) -> Option<MirrorUri> {
        let host = url.host_str()?;
        if !host.contains("sourceforge") && !host.ends_with("sf.net") {
            return None;
        }

        let path = url.path();
        let path = path.strip_prefix(PATH_PREFIX).unwrap_or(path);
        let project = path.split('/').nth(1).filter(|p| !p.is_empty())?;

        Some(MirrorUri {
            uri: format!("mirror://sourceforge{path}"),
            homepage: format!("http://sourceforge.net/projects/{project}/"),
        })
    }
}
