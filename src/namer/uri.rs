//! URI decomposition: bare filename, archive extensions, sanitizing

use tracing::debug;

use crate::atom::split::{AtomParts, PackageSplitter};

/// Archive extensions stripped from filenames
pub const ARCHIVE_EXTENSIONS: [&str; 5] = [".zip", ".tgz", ".tar.gz", ".tar.bz2", ".tbz2"];

/// URI schemes a package source may use
const ALLOWED_SCHEMES: [&str; 4] = ["http:", "ftp:", "mirror:", "svn:"];

/// Returns the last path segment of `uri` without its archive extension
///
/// `http://somesite.com/foobar-1.0.tar.gz` -> `foobar-1.0`
pub fn filename(uri: &str) -> String {
    let path = path_of(uri);
    let last = path.rsplit('/').next().unwrap_or_default();
    strip_extension(last).to_string()
}

/// Strips the longest matching archive extension, if any
pub fn strip_extension(path: &str) -> &str {
    ARCHIVE_EXTENSIONS
        .iter()
        .filter(|ext| path.ends_with(*ext))
        .max_by_key(|ext| ext.len())
        .map_or(path, |ext| &path[..path.len() - ext.len()])
}

/// Drops query, fragment and `;params`, keeping scheme, host and path
///
/// Works on the original text, so the path is never percent-encoded and the host
/// keeps its spelling.
pub fn sanitize(uri: &str) -> String {
    let sanitized = strip_params(&uri[..query_start(uri)]);
    if sanitized.len() != uri.len() {
        debug!("sanitize: {} -> {}", uri, sanitized);
    }
    sanitized.to_string()
}

/// Replaces `filename` with `placeholder` inside the path of `uri`, leaving the host alone
pub fn substitute_filename(uri: &str, filename: &str, placeholder: &str) -> String {
    if filename.is_empty() {
        return uri.to_string();
    }
    let path_start = path_start(uri);
    let (authority, path) = uri.split_at(path_start);
    format!("{}{}", authority, path.replace(filename, placeholder))
}

/// Returns true if the URI's addressing scheme is one a package source may use
pub fn is_well_formed_uri(uri: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// Splits the URI's filename into name, version and revision
pub fn split_uri(splitter: &dyn PackageSplitter, uri: &str) -> Option<AtomParts> {
    splitter.split(&filename(uri))
}

/// Returns the split of a filename clean enough to trust directly
///
/// The scheme must be allowed and the name token lower case.
pub fn looks_like_good_filename(splitter: &dyn PackageSplitter, uri: &str) -> Option<AtomParts> {
    if !is_well_formed_uri(uri) {
        return None;
    }
    split_uri(splitter, uri).filter(|parts| is_lowercase(&parts.name))
}

/// At least one cased character and no uppercase ones
pub fn is_lowercase(value: &str) -> bool {
    value.chars().any(char::is_lowercase) && !value.chars().any(char::is_uppercase)
}

fn path_of(uri: &str) -> &str {
    let start = path_start(uri);
    &uri[start..query_start(uri).max(start)]
}

/// Byte offset of the first `?` or `#`, or the end of `uri`
fn query_start(uri: &str) -> usize {
    uri.find(['?', '#']).unwrap_or(uri.len())
}

/// Byte offset where the path begins (after `scheme://authority`)
fn path_start(uri: &str) -> usize {
    match uri.find("://") {
        Some(idx) => {
            let authority_start = idx + 3;
            uri[authority_start..]
                .find('/')
                .map_or(uri.len(), |slash| authority_start + slash)
        }
        None => 0,
    }
}

fn strip_params(path: &str) -> &str {
    let segment_start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[segment_start..].find(';') {
        Some(idx) => &path[..segment_start + idx],
        None => path,
    }
}
