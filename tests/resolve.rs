use atom_namer::namer::types::apply_all;
use atom_namer::{Enamer, Namer, NamerError, ResolveRequest, Substitution};
use rstest::rstest;

fn resolve(uri: &str, name: &str, version: &str) -> atom_namer::PackageVariables {
    Enamer::default()
        .resolve(&ResolveRequest::new(uri, name, version))
        .unwrap()
}

#[test]
fn clean_filename_needs_no_original_form() {
    let vars = resolve("http://host/foobar-1.0.tar.gz", "foobar", "1.0");

    assert_eq!(vars.name, "foobar");
    assert_eq!(vars.version, "1.0");
    assert_eq!(vars.combined, "foobar-1.0");
    assert!(vars.original_name_rules.is_empty());
    assert!(vars.original_version_rules.is_empty());
    assert_eq!(vars.original_combined, "");
    assert_eq!(vars.raw_original_combined, "");
    assert_eq!(vars.rewritten_uri, "http://host/${P}.tar.gz");
}

#[test]
fn query_string_is_dropped_from_source_uri() {
    let vars = resolve(
        "http://host/dist/foobar-1.0.tbz2?modtime=1182702645&big_mirror=0",
        "foobar",
        "1.0",
    );

    assert_eq!(vars.rewritten_uri, "http://host/dist/${P}.tbz2");
}

#[test]
fn dotted_name_with_beta_version() {
    let vars = resolve("http://www.foo.com/pkg.foo-1.0b1.tbz2", "pkg.foo", "1.0b1");

    assert_eq!(vars.name, "pkg-foo");
    assert_eq!(vars.version, "1.0_beta1");
    assert_eq!(vars.combined, "pkg-foo-1.0_beta1");
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::replace_all("-", ".")]
    );
    assert_eq!(
        vars.original_version_rules,
        vec![Substitution::replace_first("_beta", "b")]
    );
    assert_eq!(vars.original_version_rules[0].expression("PV"), "${PV/_beta/b}");
    assert_eq!(vars.original_combined, "${MY_PN}-${MY_PV}");
    assert_eq!(vars.raw_original_combined, "pkg.foo-1.0b1");
    assert_eq!(vars.rewritten_uri, "http://www.foo.com/${MY_P}.tbz2");
    assert_eq!(vars.original_name(), "pkg.foo");
    assert_eq!(vars.original_version(), "1.0b1");
}

#[test]
fn mixed_case_name_is_restored() {
    let vars = resolve("http://www.foo.com/PkgFoo-1.0.tbz2", "PkgFoo", "1.0");

    assert_eq!(vars.name, "pkgfoo");
    assert_eq!(vars.combined, "pkgfoo-1.0");
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::Restore("PkgFoo".into())]
    );
    assert_eq!(vars.original_combined, "${MY_PN}-${PV}");
    assert_eq!(vars.raw_original_combined, "PkgFoo-1.0");
    assert_eq!(vars.rewritten_uri, "http://www.foo.com/${MY_P}.tbz2");
}

#[test]
fn underscore_separator_is_kept_in_template() {
    let vars = resolve("http://www.foo.com/pkgfoo_1.0.tbz2", "pkgfoo", "1.0");

    assert_eq!(vars.combined, "pkgfoo-1.0");
    assert!(vars.original_name_rules.is_empty());
    assert!(vars.original_version_rules.is_empty());
    assert_eq!(vars.original_combined, "${PN}_${PV}");
    assert_eq!(vars.raw_original_combined, "pkgfoo_1.0");
    assert_eq!(vars.rewritten_uri, "http://www.foo.com/${MY_P}.tbz2");
}

#[test]
fn upper_case_name_with_underscore_separator() {
    let vars = resolve("http://www.foo.com/PKGFOO_1.0.tbz2", "PKGFOO", "1.0");

    assert_eq!(vars.name, "pkgfoo");
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::Restore("PKGFOO".into())]
    );
    assert_eq!(vars.original_combined, "${MY_PN}_${PV}");
    assert_eq!(vars.raw_original_combined, "PKGFOO_1.0");
}

#[test]
fn hyphenated_name_with_ladder_version_in_filename() {
    let vars = resolve(
        "http://www.foo.com/pkg-foo-1.0_beta1.tbz2",
        "pkg-foo",
        "1.0_beta1",
    );

    assert_eq!(vars.name, "pkg-foo");
    assert_eq!(vars.version, "1.0_beta1");
    assert_eq!(vars.original_combined, "");
    assert_eq!(vars.rewritten_uri, "http://www.foo.com/${P}.tbz2");
}

#[test]
fn revision_suffix_becomes_version_component() {
    let vars = resolve("http://host/foo-1.0-r1234.tar.gz", "foo", "1.0-r1234");

    assert_eq!(vars.version, "1.0.1234");
    assert_eq!(vars.combined, "foo-1.0.1234");
    assert_eq!(vars.original_version(), "1.0-r1234");
    assert_eq!(vars.original_combined, "${PN}-${MY_PV}");
    assert_eq!(vars.raw_original_combined, "foo-1.0-r1234");
}

#[test]
fn dev_revision_round_trips() {
    let vars = resolve(
        "http://host/foo-1.0.dev-r1234.tar.gz",
        "foo",
        "1.0.dev-r1234",
    );

    assert_eq!(vars.version, "1.0.1234");
    assert_eq!(
        apply_all(&vars.original_version_rules, &vars.version),
        "1.0.dev-r1234"
    );
}

#[rstest]
#[case("http://host/foo-1.0a1.tar.gz", "1.0a1", "1.0_alpha1")]
#[case("http://host/foo-1.0-b2.tar.gz", "1.0-b2", "1.0_beta2")]
#[case("http://host/foo-2.0rc1.tar.gz", "2.0rc1", "2.0_rc1")]
#[case("http://host/foo-1.0dev-20091118.tar.gz", "1.0dev-20091118", "1.0_pre20091118")]
#[case("http://host/foo-1.0-final.tar.gz", "1.0-final", "1.0")]
fn upstream_versions_are_canonicalized(
    #[case] uri: &str,
    #[case] upstream: &str,
    #[case] canonical: &str,
) {
    let vars = resolve(uri, "foo", upstream);

    assert_eq!(vars.version, canonical);
    assert_eq!(vars.original_version(), upstream);
    assert_eq!(vars.rewritten_uri, "http://host/${MY_P}.tar.gz");
}

#[test]
fn caller_name_overrides_upstream() {
    let vars = Enamer::default()
        .resolve(
            &ResolveRequest::new("http://host/Foo-1.0.tar.gz", "Foo", "1.0").with_name("bar"),
        )
        .unwrap();

    assert_eq!(vars.name, "bar");
    assert_eq!(vars.version, "1.0");
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::Restore("Foo".into())]
    );
    assert_eq!(vars.original_combined, "${MY_PN}-${PV}");
}

#[test]
fn caller_version_only_lowercases_upstream_name() {
    let vars = Enamer::default()
        .resolve(
            &ResolveRequest::new("http://host/Foo-1.0b1.tar.gz", "Foo", "1.0b1")
                .with_version("1.0_beta1"),
        )
        .unwrap();

    assert_eq!(vars.combined, "foo-1.0_beta1");
}

#[test]
fn symbol_only_name_is_fatal() {
    let result =
        Enamer::default().resolve(&ResolveRequest::new("http://host/download", "!!!", "1.0"));

    assert_eq!(
        result,
        Err(NamerError::InvalidPackageAtom {
            atom: "=dev-python/!!!-1.0".to_string()
        })
    );
}

#[test]
fn revision_and_ladder_suffix_together_is_rejected() {
    let result = Enamer::default().resolve(&ResolveRequest::new(
        "http://host/foo-1.0b1-r5.tar.gz",
        "foo",
        "1.0b1-r5",
    ));

    assert_eq!(
        result,
        Err(NamerError::UnsupportedSuffixCombination {
            version: "1.0b1-r5".to_string()
        })
    );
}

#[test]
fn namespace_is_used_in_error() {
    let result =
        Enamer::new("dev-lang").resolve(&ResolveRequest::new("http://host/x", "a b!", "?"));

    assert!(matches!(
        result,
        Err(NamerError::InvalidPackageAtom { atom }) if atom.starts_with("=dev-lang/")
    ));
}

#[test]
fn caller_name_still_goes_through_name_normalization() {
    let vars = Enamer::default()
        .resolve(
            &ResolveRequest::new("http://host/Foo-1.0.tar.gz", "Foo", "1.0").with_name("Foo"),
        )
        .unwrap();

    assert_eq!(vars.name, "foo");
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::Restore("Foo".into())]
    );
}

#[test]
fn uri_spelling_wins_over_upstream_version_spelling() {
    let vars = resolve("http://host/foo-1.0rc1.tar.gz", "foo", "1.0-rc1");

    assert_eq!(vars.version, "1.0_rc1");
    assert_eq!(vars.raw_original_combined, "foo-1.0rc1");
    assert_eq!(vars.original_combined, "${PN}-${MY_PV}");
    assert_eq!(vars.original_version(), "1.0rc1");
}

#[test]
fn unrebuildable_filename_is_kept_literally() {
    let vars = resolve("http://host/foo-latest.tar.gz", "foo", "1.0-rc1");

    assert_eq!(vars.version, "1.0_rc1");
    assert!(vars.original_name_rules.is_empty());
    assert!(vars.original_version_rules.is_empty());
    assert_eq!(vars.original_combined, "foo-latest");
    assert_eq!(vars.raw_original_combined, "");
    assert_eq!(vars.rewritten_uri, "http://host/${MY_P}.tar.gz");
}

#[test]
fn canonical_version_with_unclean_name_needs_no_version_rule() {
    let vars = resolve("http://host/Foo-1.0_rc1.tar.gz", "Foo", "1.0_rc1");

    assert_eq!(vars.version, "1.0_rc1");
    assert!(vars.original_version_rules.is_empty());
    assert_eq!(
        vars.original_name_rules,
        vec![Substitution::Restore("Foo".into())]
    );
    assert_eq!(vars.original_combined, "${MY_PN}-${PV}");
    assert_eq!(vars.raw_original_combined, "Foo-1.0_rc1");
}

#[test]
fn space_in_filename_survives_sanitizing() {
    let vars = resolve("http://host/My Pkg-1.0.tar.gz", "My Pkg", "1.0");

    assert_eq!(vars.name, "my-pkg");
    assert_eq!(vars.raw_original_combined, "My Pkg-1.0");
    assert_eq!(vars.original_name(), "My Pkg");
    assert_eq!(vars.original_combined, "${MY_PN}-${PV}");
    assert_eq!(vars.rewritten_uri, "http://host/${MY_P}.tar.gz");
}
