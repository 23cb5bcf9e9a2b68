//! Package name normalization

use tracing::debug;

use crate::namer::types::{NormalizationResult, Substitution};

/// Converts an upstream name to a canonical one, recording how to get back
///
/// Checks run case, then dot, then space; rules are recorded in that order.
///
/// - `Test-Me` -> `test-me`, rules `[Restore("Test-Me")]`
/// - `test.me` -> `test-me`, rules `[ReplaceAll("-", ".")]`
pub fn normalize_name(name: &str) -> NormalizationResult {
    let mut rules = Vec::new();
    let mut canonical = name.to_string();

    if canonical.chars().any(char::is_uppercase) {
        debug!("normalize_name: {} is not lower case", name);
        rules.push(Substitution::Restore(name.to_string()));
        canonical = canonical.to_lowercase();
    }

    if canonical.contains('.') {
        debug!("normalize_name: dot found in {}", name);
        rules.push(Substitution::replace_all("-", "."));
        canonical = canonical.replace('.', "-");
    }

    if canonical.contains(' ') {
        debug!("normalize_name: space found in {}", name);
        rules.push(Substitution::replace_all("-", " "));
        canonical = canonical.replace(' ', "-");
    }

    debug!("normalize_name: {} -> {} ({:?})", name, canonical, rules);
    NormalizationResult::new(canonical, rules)
}
