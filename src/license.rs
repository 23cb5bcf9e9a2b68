//! Trove license classifier to package license mapping

/// Last classifier segment -> package manager license name
const KNOWN_LICENSES: &[(&str, &str)] = &[
    ("Aladdin Free Public License (AFPL)", "Aladdin"),
    ("Academic Free License (AFL)", "AFL-3.0"),
    ("Apache Software License", "Apache-2.0"),
    ("Apple Public Source License", "Apple"),
    ("Artistic License", "Artistic-2"),
    ("BSD License", "BSD-2"),
    ("Common Public License", "CPL-1.0"),
    ("GNU Free Documentation License (FDL)", "FDL-3"),
    ("GNU General Public License (GPL)", "GPL-2"),
    ("GNU Library or Lesser General Public License (LGPL)", "LGPL-2.1"),
    ("IBM Public License", "IBM"),
    ("Intel Open Source License", "Intel"),
    ("MIT License", "MIT"),
    ("Mozilla Public License 1.0 (MPL)", "MPL"),
    ("Mozilla Public License 1.1 (MPL 1.1)", "MPL-1.1"),
    ("Nethack General Public License", "nethack"),
    ("Open Group Test Suite License", "OGTSL"),
    ("Python License (CNRI Python License)", "PYTHON"),
    ("Python Software Foundation License", "PSF-2.4"),
    ("Qt Public License (QPL)", "QPL"),
    ("Sleepycat License", "DB"),
    ("Sun Public License", "SPL"),
    ("University of Illinois/NCSA Open Source License", "ncsa-1.3"),
    ("W3C License", "WC3"),
    ("zlib/libpng License", "ZLIB"),
    ("Zope Public License", "ZPL"),
    ("Public Domain", "public-domain"),
];

/// Maps a classifier such as `License :: OSI Approved :: BSD License` to a license
/// name, or "" when unknown
pub fn convert(classifier: &str) -> &'static str {
    let last = classifier.rsplit(":: ").next().unwrap_or_default();
    KNOWN_LICENSES
        .iter()
        .find(|(known, _)| *known == last)
        .map_or("", |(_, license)| *license)
}
