use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamerError {
    #[error("{atom} is not a valid package atom; could not determine name and/or version")]
    InvalidPackageAtom { atom: String },

    #[error("version {version} carries both a revision suffix and a pre-release suffix")]
    UnsupportedSuffixCombination { version: String },
}
