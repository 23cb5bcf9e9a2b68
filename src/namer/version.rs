//! Version normalization
//!
//! Rewrites upstream version strings into the canonical suffix vocabulary:
//! - `1.0a1`, `1.0-a1` -> `1.0_alpha1`
//! - `1.0b1`, `1.0-beta1` -> `1.0_beta1`
//! - `2.0rc1`, `2.0c1` -> `2.0_rc1`
//! - `1.0dev-20091118` -> `1.0_pre20091118`
//! - `1.0-r1234` -> `1.0.1234`
//! - `1.0.dev-r1234` -> `1.0.1234`
//!
//! Every rewrite records the rules that rebuild the upstream string.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::namer::error::NamerError;
use crate::namer::types::{NormalizationResult, RevisionSuffix, SuffixKind, VersionSpec};

/// Suffix kinds in ladder order, each with its variants from most to least specific.
///
/// Every variant captures (major, upstream suffix spelling, suffix number). The first
/// match with a non-empty major walking this list wins. Bare-letter variants only
/// accept a letter that does not follow another letter, so the `a` in `beta` is never
/// read as an alpha marker.
const SUFFIX_LADDER: &[(SuffixKind, &[&str])] = &[
    (
        SuffixKind::Pre,
        &[
            r"(.*?)([._-]*dev[._-]*r?)([0-9]+)$",
            r"(.*?)([._-]*(?:pre|preview)[._-]*)([0-9]*)$",
        ],
    ),
    (
        SuffixKind::Alpha,
        &[
            r"(.*?)([._-]*(?:alpha|test)[._-]*)([0-9]*)$",
            r"(.*?[^a-z])([._-]*a[._-]*)([0-9]*)$",
            r"(.*[^a-z])(a)([0-9]*)$",
        ],
    ),
    (
        SuffixKind::Beta,
        &[
            r"(.*?)([._-]*beta[._-]*)([0-9]*)$",
            r"(.*?[^a-z])([._-]*b)([0-9]*)$",
            r"(.*[^a-z])(b)([0-9]*)$",
        ],
    ),
    (
        SuffixKind::Rc,
        &[
            r"(.*?)([._-]*rc[._-]*)([0-9]*)$",
            r"(.*?[^a-z])([._-]*c[._-]*)([0-9]*)$",
            r"(.*[^a-z])(c[._-]*)([0-9]+)$",
        ],
    ),
];

static LADDER: LazyLock<Vec<(SuffixKind, Vec<Regex>)>> = LazyLock::new(|| {
    SUFFIX_LADDER
        .iter()
        .map(|(kind, patterns)| {
            let regexes = patterns
                .iter()
                .map(|p| {
                    Regex::new(&format!("(?i)^{p}")).expect("ladder pattern is a valid regex")
                })
                .collect();
            (*kind, regexes)
        })
        .collect()
});

/// Trailing `-r1234`, `patch2`, `p3` markers
static REVISION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*?)([._-]*(?:r|patch|p)[._-]*)([0-9]+)$")
        .expect("revision pattern is a valid regex")
});

/// Suffixes carrying no ordering meaning
static BAD_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[._-]*(?:dev|devel|final|stable|snapshot)$")
        .expect("bad suffix pattern is a valid regex")
});

/// Parses an upstream version into its structured parts
pub fn classify(raw: &str) -> Result<VersionSpec, NamerError> {
    let mut spec = VersionSpec::default();
    let mut working = raw;

    if let Some(caps) = REVISION_SUFFIX
        .captures(raw)
        .filter(|caps| !group(caps, 1).is_empty())
    {
        working = group(&caps, 1);
        spec.revision = Some(RevisionSuffix {
            literal: group(&caps, 2).to_string(),
            digits: group(&caps, 3).to_string(),
        });
        debug!(
            "classify: {} has revision suffix, continuing with {}",
            raw, working
        );
    }

    if let Some((kind, caps)) = match_ladder(working) {
        if spec.revision.is_some() {
            return Err(NamerError::UnsupportedSuffixCombination {
                version: raw.to_string(),
            });
        }
        spec.major = group(&caps, 1).to_string();
        spec.suffix_kind = kind;
        spec.suffix_literal = group(&caps, 2).to_string();
        spec.suffix_value = group(&caps, 3).to_string();
    } else if let Some(m) = BAD_SUFFIX.find(working).filter(|m| m.start() > 0) {
        debug!("classify: dropping suffix {} from {}", m.as_str(), working);
        spec.major = working[..m.start()].to_string();
        spec.dropped_suffix = Some(m.as_str().to_string());
    } else {
        spec.major = working.to_string();
    }

    Ok(spec)
}

/// Converts an upstream version to a canonical one, recording how to get back
pub fn normalize_version(raw: &str) -> Result<NormalizationResult, NamerError> {
    let spec = classify(raw)?;
    let result = NormalizationResult::new(spec.canonical(), spec.inverse_rules());
    debug!(
        "normalize_version: {} -> {} ({:?})",
        raw, result.value, result.rules
    );
    Ok(result)
}

fn match_ladder(version: &str) -> Option<(SuffixKind, Captures<'_>)> {
    LADDER.iter().find_map(|(kind, regexes)| {
        regexes.iter().find_map(|regex| {
            let caps = regex.captures(version)?;
            // A suffix with nothing before it is not a suffix
            (!group(&caps, 1).is_empty()).then(|| {
                debug!("match_ladder: {} matched {}", version, regex.as_str());
                (*kind, caps)
            })
        })
    })
}

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}
