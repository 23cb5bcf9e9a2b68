//! Resolution of package variables from an upstream name, version and URI

use tracing::{debug, warn};

use crate::atom::split::{AtomParts, PackageSplitter, PortageSplitter};
use crate::atom::validator::{AtomValidator, PortageAtomValidator};
use crate::config::DEFAULT_NAMESPACE;
use crate::namer::error::NamerError;
use crate::namer::types::{NormalizationResult, PackageVariables, Substitution};
use crate::namer::{name, uri, version};

const P: &str = "${P}";
const MY_P: &str = "${MY_P}";

/// Input of a single resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest<'a> {
    pub uri: &'a str,
    pub upstream_name: &'a str,
    pub upstream_version: &'a str,
    /// Caller-chosen name. Skips upstream normalization but still passes through
    /// [`Namer::normalize_name`], so `Foo` becomes `foo` with a restore rule.
    pub name: Option<&'a str>,
    /// Caller-chosen canonical version, used as-is when set
    pub version: Option<&'a str>,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(uri: &'a str, upstream_name: &'a str, upstream_version: &'a str) -> Self {
        Self {
            uri,
            upstream_name,
            upstream_version,
            name: None,
            version: None,
        }
    }

    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = Some(name).filter(|n| !n.is_empty());
        self
    }

    pub fn with_version(mut self, version: &'a str) -> Self {
        self.version = Some(version).filter(|v| !v.is_empty());
        self
    }
}

/// Naming strategy turning upstream names and versions into package variables
///
/// Every operation has a default; implementors only supply the collaborators and
/// override the steps they want to change.
pub trait Namer {
    fn validator(&self) -> &dyn AtomValidator;

    fn splitter(&self) -> &dyn PackageSplitter;

    /// Namespace (category) atoms are validated under, e.g. `dev-python`
    fn namespace(&self) -> &str;

    fn is_valid_package(&self, combined: &str) -> bool {
        self.validator()
            .is_valid_atom(&format!("={}/{}", self.namespace(), combined))
    }

    fn split_uri(&self, uri: &str) -> Option<AtomParts> {
        uri::split_uri(self.splitter(), uri)
    }

    fn normalize_name(&self, name: &str) -> NormalizationResult {
        name::normalize_name(name)
    }

    fn normalize_version(&self, version: &str) -> Result<NormalizationResult, NamerError> {
        version::normalize_version(version)
    }

    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<PackageVariables, NamerError> {
        resolve(self, request)
    }
}

/// Default namer backed by the Portage grammar
pub struct Enamer {
    validator: Box<dyn AtomValidator>,
    splitter: Box<dyn PackageSplitter>,
    namespace: String,
}

impl Enamer {
    pub fn new(namespace: &str) -> Self {
        Self::with_collaborators(
            namespace,
            Box::new(PortageAtomValidator),
            Box::new(PortageSplitter),
        )
    }

    pub fn with_collaborators(
        namespace: &str,
        validator: Box<dyn AtomValidator>,
        splitter: Box<dyn PackageSplitter>,
    ) -> Self {
        Self {
            validator,
            splitter,
            namespace: namespace.to_string(),
        }
    }
}

impl Default for Enamer {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl Namer for Enamer {
    fn validator(&self) -> &dyn AtomValidator {
        self.validator.as_ref()
    }

    fn splitter(&self) -> &dyn PackageSplitter {
        self.splitter.as_ref()
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }
}

/// Determines the package variables for `request`
///
/// Fails with [`NamerError::InvalidPackageAtom`] when no combination of upstream,
/// caller-supplied and normalized values forms a valid atom.
pub fn resolve<N: Namer + ?Sized>(
    namer: &N,
    request: &ResolveRequest<'_>,
) -> Result<PackageVariables, NamerError> {
    debug!("resolve: {:?}", request);
    let source = uri::sanitize(request.uri);
    let (up_name, up_version) = (request.upstream_name, request.upstream_version);

    let mut name = request.name.map(NormalizationResult::unchanged);
    let mut version = request.version.map(NormalizationResult::unchanged);
    let mut version_normalized = false;

    if needs_normalization(namer, up_name, up_version) {
        if version.is_none() {
            version = Some(namer.normalize_version(up_version)?);
            version_normalized = true;
        }
        if name.is_none() {
            name = Some(namer.normalize_name(up_name));
        }
    }

    let (name, mut version) = match (name, version) {
        (None, None) => {
            debug!("resolve: no name or version given, trying the URI");
            match namer.split_uri(&source) {
                Some(parts) => (
                    NormalizationResult::unchanged(parts.name),
                    NormalizationResult::unchanged(parts.version),
                ),
                None => (
                    NormalizationResult::unchanged(up_name),
                    NormalizationResult::unchanged(up_version),
                ),
            }
        }
        (Some(name), None) => (name, NormalizationResult::unchanged(up_version)),
        (None, Some(version)) => (
            NormalizationResult::unchanged(up_name.to_lowercase()),
            version,
        ),
        (Some(name), Some(version)) => (name, version),
    };

    let normalized = namer.normalize_name(&name.value);
    let mut name = name.merge(normalized);

    let mut combined = format!("{}-{}", name.value, version.value);
    let mut valid = namer.is_valid_package(&combined);
    if !valid && !version_normalized && request.version.is_none() {
        debug!("resolve: {} is invalid, retrying with normalized version", combined);
        version = namer.normalize_version(&version.value)?;
        combined = format!("{}-{}", name.value, version.value);
        valid = namer.is_valid_package(&combined);
    }
    if !valid {
        let atom = format!("={}/{}", namer.namespace(), combined);
        warn!("resolve: {} is not a valid package atom", atom);
        return Err(NamerError::InvalidPackageAtom { atom });
    }
    debug!("resolve: combined({})", combined);

    let filename = uri::filename(&source);
    let (original_combined, raw_original_combined, rewritten_uri) = if filename == combined {
        name.rules.clear();
        version.rules.clear();
        (
            String::new(),
            String::new(),
            uri::substitute_filename(&source, &filename, P),
        )
    } else {
        let rewritten = uri::substitute_filename(&source, &filename, MY_P);
        match guess_original(namer, &source, &filename, &name, &version) {
            Some(guess) => {
                name.rules = guess.name_rules;
                version.rules = guess.version_rules;
                (guess.template, filename, rewritten)
            }
            None => match fallback_original(namer, &filename, &name, &version) {
                Some((template, version_rules)) => {
                    version.rules = version_rules;
                    (template, filename, rewritten)
                }
                None => {
                    debug!("resolve: could not guess name and version from {}", filename);
                    name.rules.clear();
                    version.rules.clear();
                    (filename, String::new(), rewritten)
                }
            },
        }
    };

    let variables = PackageVariables {
        name: name.value,
        version: version.value,
        combined,
        original_combined,
        original_name_rules: name.rules,
        original_version_rules: version.rules,
        raw_original_combined,
        rewritten_uri,
    };
    debug!("resolve: {:?}", variables);
    Ok(variables)
}

/// Versions ending in `-r…` clash with the package manager's own revisions, and
/// anything the validator rejects needs rewriting too
fn needs_normalization<N: Namer + ?Sized>(namer: &N, up_name: &str, up_version: &str) -> bool {
    let tail = up_version.rsplit('-').next().unwrap_or_default();
    if tail.starts_with('r') {
        debug!("needs_normalization: {} has a -r suffix", up_version);
        return true;
    }
    if !namer.is_valid_package(&format!("{up_name}-{up_version}")) {
        debug!(
            "needs_normalization: {}-{} is not a valid package",
            up_name, up_version
        );
        return true;
    }
    false
}

/// Original-form template guessed from the filename
struct OriginalGuess {
    template: String,
    name_rules: Vec<Substitution>,
    version_rules: Vec<Substitution>,
}

/// Locates the upstream name and version tokens inside `filename` and expresses
/// the filename in terms of the canonical `name` and `version`
fn guess_original<N: Namer + ?Sized>(
    namer: &N,
    source: &str,
    filename: &str,
    name: &NormalizationResult,
    version: &NormalizationResult,
) -> Option<OriginalGuess> {
    // `_` -> `-` keeps every byte offset, so tokens found in the rewritten string
    // sit at the same place in the filename
    let parts = uri::looks_like_good_filename(namer.splitter(), source)
        .or_else(|| namer.splitter().split(filename))
        .or_else(|| namer.splitter().split(&filename.replace('_', "-")))?;
    debug!("guess_original: got name({}) version({})", parts.name, parts.version);

    let name_end = parts.name.len();
    let version_start = name_end + 1;
    let mut version_end = version_start + parts.version.len();
    // An explicit `-rN` belongs to the upstream version
    let revision = format!("-{}", parts.revision);
    if filename.get(version_end..)?.starts_with(&revision) {
        version_end += revision.len();
    }
    let original_name = filename.get(..name_end)?;
    let separator = filename.get(name_end..version_start)?;
    let original_version = filename.get(version_start..version_end)?;
    let rest = filename.get(version_end..)?;

    let (name_token, name_rules) =
        match diff_token(original_name, name, Some(namer.normalize_name(original_name))) {
            None => ("${PN}", Vec::new()),
            Some(rules) => ("${MY_PN}", rules),
        };
    let (version_token, version_rules) = match diff_token(
        original_version,
        version,
        namer.normalize_version(original_version).ok(),
    ) {
        None => ("${PV}", Vec::new()),
        Some(rules) => ("${MY_PV}", rules),
    };

    Some(OriginalGuess {
        template: format!("{name_token}{separator}{version_token}{rest}"),
        name_rules,
        version_rules,
    })
}

/// Rules turning `canonical` into `original`, or `None` when the two already agree
///
/// Prefers the rules recorded while normalizing, then a fresh normalization of
/// `original`, and restores the literal token when neither reproduces it.
fn diff_token(
    original: &str,
    canonical: &NormalizationResult,
    renormalized: Option<NormalizationResult>,
) -> Option<Vec<Substitution>> {
    if original == canonical.value {
        return None;
    }
    if canonical.has_rules() && canonical.original() == original {
        return Some(canonical.rules.clone());
    }
    match renormalized {
        Some(fresh) if reproduces(&fresh, &canonical.value, original) => Some(fresh.rules),
        _ => Some(vec![Substitution::Restore(original.to_string())]),
    }
}

/// `name-version` template for a filename the splitter cannot decompose
///
/// The recorded rules are kept only when they rebuild `filename`. Failing that, the
/// version token is whatever follows the original name and its separator, and it
/// gets fresh rules. Returns the template and the version rules to use.
fn fallback_original<N: Namer + ?Sized>(
    namer: &N,
    filename: &str,
    name: &NormalizationResult,
    version: &NormalizationResult,
) -> Option<(String, Vec<Substitution>)> {
    if !name.has_rules() && !version.has_rules() {
        return None;
    }
    let name_token = if name.has_rules() { "${MY_PN}" } else { "${PN}" };

    let original_name = name.original();
    let expanded = format!("{}-{}", original_name, version.original());
    if expanded == filename {
        let version_token = if version.has_rules() { "${MY_PV}" } else { "${PV}" };
        return Some((format!("{name_token}-{version_token}"), version.rules.clone()));
    }
    debug!("fallback_original: {} does not rebuild {}", expanded, filename);

    let rest = filename.strip_prefix(original_name.as_str())?;
    let separator = rest.chars().next().filter(|c| matches!(c, '-' | '_' | '.'))?;
    let token = &rest[separator.len_utf8()..];
    if token == version.value {
        return Some((format!("{name_token}{separator}${{PV}}"), Vec::new()));
    }
    let fresh = namer.normalize_version(token).ok()?;
    reproduces(&fresh, &version.value, token)
        .then(|| (format!("{name_token}{separator}${{MY_PV}}"), fresh.rules))
}

/// Returns true if `fresh` normalizes to `canonical` and its rules rebuild `original`
fn reproduces(fresh: &NormalizationResult, canonical: &str, original: &str) -> bool {
    fresh.value == canonical && fresh.has_rules() && fresh.original() == original
}
