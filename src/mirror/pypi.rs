//! PyPI mirror provider

use url::Url;

use crate::mirror::{MirrorResolver, MirrorUri};

const HOSTS: [&str; 2] = ["pypi.python.org", "files.pythonhosted.org"];

/// Rewrites `/packages/source/<l>/<name>/<file>` URLs to `mirror://pypi`
#[derive(Debug, Clone, Copy, Default)]
pub struct PyPiMirror;

impl MirrorResolver for PyPiMirror {
    fn name(&self) -> &'static str {
        "pypi"
    }

    fn resolve(&self, url: &Url) -> Option<MirrorUri> {
        let host = url.host_str()?;
        if !HOSTS.contains(&host) {
            return None;
        }

        let segments: Vec<&str> = url.path_segments()?.collect();
        let [packages, source, letter, project, file] = segments.as_slice() else {
            return None;
        };
        if *packages != "packages" || *source != "source" || file.is_empty() {
            return None;
        }

        Some(MirrorUri {
            uri: format!("mirror://pypi/{letter}/{project}/{file}"),
            homepage: format!("https://pypi.org/project/{project}/"),
        })
    }
}
