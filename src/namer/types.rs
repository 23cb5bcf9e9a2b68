//! Common types for name/version normalization

use serde::Serialize;

/// A rewrite rule taking a canonical value one step back towards its upstream spelling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Substitution {
    /// The exact upstream spelling. Ends a rule chain.
    Restore(String),
    /// Replace every occurrence of `from` with `to`
    ReplaceAll { from: String, to: String },
    /// Replace the first occurrence of `from` with `to`
    ReplaceFirst { from: String, to: String },
    /// Drop a trailing literal
    StripSuffix(String),
    /// Append a literal
    Append(String),
}

impl Substitution {
    pub fn replace_all(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ReplaceAll {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn replace_first(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::ReplaceFirst {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Applies this rule to `value`
    pub fn apply(&self, value: &str) -> String {
        match self {
            Self::Restore(original) => original.clone(),
            Self::ReplaceAll { from, to } => value.replace(from.as_str(), to),
            Self::ReplaceFirst { from, to } => value.replacen(from.as_str(), to, 1),
            Self::StripSuffix(suffix) => value
                .strip_suffix(suffix.as_str())
                .unwrap_or(value)
                .to_string(),
            Self::Append(suffix) => format!("{value}{suffix}"),
        }
    }

    /// Renders this rule as a shell parameter expansion over `var` (e.g. `${PV/_beta/b}`)
    pub fn expression(&self, var: &str) -> String {
        match self {
            Self::Restore(original) => original.clone(),
            Self::ReplaceAll { from, to } => format!("${{{var}//{from}/{to}}}"),
            Self::ReplaceFirst { from, to } => format!("${{{var}/{from}/{to}}}"),
            Self::StripSuffix(suffix) => format!("${{{var}%{suffix}}}"),
            Self::Append(suffix) => format!("${{{var}}}{suffix}"),
        }
    }

    pub fn is_restore(&self) -> bool {
        matches!(self, Self::Restore(_))
    }
}

/// Applies `rules` to `canonical` in recorded order
pub fn apply_all(rules: &[Substitution], canonical: &str) -> String {
    let mut value = canonical.to_string();
    for rule in rules {
        value = rule.apply(&value);
        if rule.is_restore() {
            break;
        }
    }
    value
}

/// A normalized value together with the rules that invert it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizationResult {
    pub value: String,
    pub rules: Vec<Substitution>,
}

impl NormalizationResult {
    pub fn new(value: impl Into<String>, rules: Vec<Substitution>) -> Self {
        Self {
            value: value.into(),
            rules,
        }
    }

    /// A value that needed no normalization
    pub fn unchanged(value: impl Into<String>) -> Self {
        Self::new(value, Vec::new())
    }

    /// Returns true if the value diverges from its upstream spelling
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Folds a later pass over `self.value` into this result
    ///
    /// The later value wins and its rules are appended. A later `Restore` is dropped
    /// when earlier rules exist, since it would record an already-canonical spelling.
    pub fn merge(mut self, later: NormalizationResult) -> Self {
        let had_rules = self.has_rules();
        self.rules.extend(
            later
                .rules
                .into_iter()
                .filter(|rule| !(had_rules && rule.is_restore())),
        );
        self.value = later.value;
        self
    }

    /// Rebuilds the upstream spelling
    pub fn original(&self) -> String {
        apply_all(&self.rules, &self.value)
    }
}

/// Pre-release ladder position of a version suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixKind {
    #[default]
    None,
    Pre,
    Alpha,
    Beta,
    Rc,
}

impl SuffixKind {
    /// Canonical suffix token (e.g. `_beta`)
    pub fn token(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Pre => "_pre",
            Self::Alpha => "_alpha",
            Self::Beta => "_beta",
            Self::Rc => "_rc",
        }
    }
}

/// A trailing revision marker such as `-r1234` or `patch2`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionSuffix {
    /// Upstream separator and marker, e.g. `-r`
    pub literal: String,
    pub digits: String,
}

impl RevisionSuffix {
    /// Component appended to the canonical version
    pub fn component(&self) -> String {
        format!(".{}", self.digits)
    }
}

/// Structured view of an upstream version string
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VersionSpec {
    pub major: String,
    pub suffix_kind: SuffixKind,
    /// Numeric part of the ladder suffix
    pub suffix_value: String,
    /// Upstream spelling replaced by the canonical suffix token
    pub suffix_literal: String,
    /// Suffix carrying no ordering meaning (e.g. `.dev`), dropped from the canonical form
    pub dropped_suffix: Option<String>,
    pub revision: Option<RevisionSuffix>,
}

impl VersionSpec {
    /// Canonical version string
    pub fn canonical(&self) -> String {
        let mut version = format!(
            "{}{}{}",
            self.major,
            self.suffix_kind.token(),
            self.suffix_value
        );
        if let Some(revision) = &self.revision {
            version.push_str(&revision.component());
        }
        version
    }

    /// Rules rebuilding the upstream spelling from [`VersionSpec::canonical`]
    pub fn inverse_rules(&self) -> Vec<Substitution> {
        let mut rules = Vec::new();
        if let Some(revision) = &self.revision {
            rules.push(Substitution::StripSuffix(revision.component()));
        }
        // An upstream spelling that already is the canonical token needs no rule
        if self.suffix_kind != SuffixKind::None && self.suffix_literal != self.suffix_kind.token() {
            rules.push(Substitution::replace_first(
                self.suffix_kind.token(),
                &self.suffix_literal,
            ));
        }
        if let Some(dropped) = &self.dropped_suffix {
            rules.push(Substitution::Append(dropped.clone()));
        }
        if let Some(revision) = &self.revision {
            rules.push(Substitution::Append(format!(
                "{}{}",
                revision.literal, revision.digits
            )));
        }
        rules
    }
}

/// Resolved package variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageVariables {
    /// Canonical package name (PN)
    pub name: String,
    /// Canonical package version (PV)
    pub version: String,
    /// `name-version` (P)
    pub combined: String,
    /// Template rebuilding the upstream filename (MY_P), e.g. `${MY_PN}-${PV}`
    pub original_combined: String,
    /// Rules applied to the name to get the upstream name (MY_PN)
    pub original_name_rules: Vec<Substitution>,
    /// Rules applied to the version to get the upstream version (MY_PV)
    pub original_version_rules: Vec<Substitution>,
    /// Upstream filename as found in the URI
    pub raw_original_combined: String,
    /// Source URI with the filename replaced by `${P}` or `${MY_P}`
    pub rewritten_uri: String,
}

impl PackageVariables {
    /// Upstream name rebuilt from the canonical one
    pub fn original_name(&self) -> String {
        apply_all(&self.original_name_rules, &self.name)
    }

    /// Upstream version rebuilt from the canonical one
    pub fn original_version(&self) -> String {
        apply_all(&self.original_version_rules, &self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Substitution::Restore("Test-Me".into()), "test-me", "Test-Me")]
    #[case(Substitution::replace_all("-", "."), "pkg-foo-bar", "pkg.foo.bar")]
    #[case(Substitution::replace_first("_beta", "b"), "1.0_beta1", "1.0b1")]
    #[case(Substitution::StripSuffix(".1234".into()), "1.0.1234", "1.0")]
    #[case(Substitution::StripSuffix(".99".into()), "1.0.1234", "1.0.1234")]
    #[case(Substitution::Append(".dev".into()), "1.0", "1.0.dev")]
    fn apply_rewrites_value(
        #[case] rule: Substitution,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(rule.apply(input), expected);
    }

    #[rstest]
    #[case(Substitution::replace_all("-", "."), "PN", "${PN//-/.}")]
    #[case(Substitution::replace_first("_beta", "b"), "PV", "${PV/_beta/b}")]
    #[case(Substitution::StripSuffix(".1234".into()), "PV", "${PV%.1234}")]
    #[case(Substitution::Append("-r1234".into()), "MY_PV", "${MY_PV}-r1234")]
    #[case(Substitution::Restore("PkgFoo".into()), "PN", "PkgFoo")]
    fn expression_renders_parameter_expansion(
        #[case] rule: Substitution,
        #[case] var: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(rule.expression(var), expected);
    }

    #[test]
    fn apply_all_stops_after_restore() {
        let rules = vec![
            Substitution::Restore("Test.Me-X".into()),
            Substitution::replace_all("-", "."),
        ];
        assert_eq!(apply_all(&rules, "test-me-x"), "Test.Me-X");
    }

    #[test]
    fn merge_drops_later_restore_when_rules_exist() {
        let first = NormalizationResult::new("foo-bar", vec![Substitution::replace_all("-", ".")]);
        let later = NormalizationResult::new(
            "foo-bar",
            vec![
                Substitution::Restore("foo-bar".into()),
                Substitution::replace_all("-", " "),
            ],
        );

        let merged = first.merge(later);

        assert_eq!(
            merged.rules,
            vec![
                Substitution::replace_all("-", "."),
                Substitution::replace_all("-", " "),
            ]
        );
    }

    #[test]
    fn merge_keeps_restore_on_empty_result() {
        let merged = NormalizationResult::unchanged("Foo").merge(NormalizationResult::new(
            "foo",
            vec![Substitution::Restore("Foo".into())],
        ));

        assert_eq!(merged.value, "foo");
        assert_eq!(merged.original(), "Foo");
    }

    #[test]
    fn canonical_suffix_spelling_records_no_rule() {
        let spec = VersionSpec {
            major: "1.0".into(),
            suffix_kind: SuffixKind::Rc,
            suffix_value: "1".into(),
            suffix_literal: "_rc".into(),
            ..VersionSpec::default()
        };

        assert_eq!(spec.canonical(), "1.0_rc1");
        assert!(spec.inverse_rules().is_empty());
    }

    #[test]
    fn version_spec_canonical_and_inverse_round_trip() {
        let spec = VersionSpec {
            major: "1.0".into(),
            dropped_suffix: Some(".dev".into()),
            revision: Some(RevisionSuffix {
                literal: "-r".into(),
                digits: "1234".into(),
            }),
            ..VersionSpec::default()
        };

        assert_eq!(spec.canonical(), "1.0.1234");
        assert_eq!(
            apply_all(&spec.inverse_rules(), &spec.canonical()),
            "1.0.dev-r1234"
        );
    }
}
