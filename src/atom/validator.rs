//! Package atom validation

use std::sync::LazyLock;

use regex::Regex;

use crate::atom::split::split_package;

static CATEGORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_][A-Za-z0-9+_.-]*$").expect("category grammar is a valid regex")
});

/// Canonical package names: lower case, no dots, no spaces
static STRICT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9+_][a-z0-9+_-]*$").expect("strict name grammar is a valid regex")
});

/// Version operators, longest first so `>=` wins over `>`
const OPERATORS: [&str; 6] = [">=", "<=", "=", "~", ">", "<"];

/// Trait for checking package atom syntax
#[cfg_attr(test, mockall::automock)]
pub trait AtomValidator: Send + Sync {
    /// Returns true if `atom` (e.g. `=dev-python/foo-1.0`) is syntactically valid
    fn is_valid_atom(&self, atom: &str) -> bool;
}

/// Validator for Portage atoms with the strict canonical name grammar
#[derive(Debug, Clone, Copy, Default)]
pub struct PortageAtomValidator;

impl AtomValidator for PortageAtomValidator {
    fn is_valid_atom(&self, atom: &str) -> bool {
        let (operator, rest) = split_operator(atom);

        let Some((category, package)) = rest.split_once('/') else {
            return false;
        };
        if package.contains('/') || !CATEGORY.is_match(category) {
            return false;
        }

        match operator {
            // A bare `category/name` carries no version
            None => is_strict_name(package) && split_package(package).is_none(),
            Some(op) => {
                let Some(parts) = split_package(package) else {
                    return false;
                };
                if op == "~" && package.ends_with(&format!("-{}", parts.revision)) {
                    return false;
                }
                is_strict_name(&parts.name)
            }
        }
    }
}

fn split_operator(atom: &str) -> (Option<&'static str>, &str) {
    OPERATORS
        .iter()
        .find_map(|op| atom.strip_prefix(op).map(|rest| (Some(*op), rest)))
        .unwrap_or((None, atom))
}

fn is_strict_name(name: &str) -> bool {
    STRICT_NAME.is_match(name)
}
