// Naming layer
// - uri.rs: filename extraction, extension stripping, URI sanitizing
// - name.rs: package name normalization
// - version.rs: version suffix classification and rewriting
// - resolver.rs: Namer trait and package variable resolution
// - types.rs: Common types (Substitution, NormalizationResult, PackageVariables)
// - error.rs: NamerError

pub mod error;
pub mod name;
pub mod resolver;
pub mod types;
pub mod uri;
pub mod version;

pub use error::NamerError;
pub use resolver::{Enamer, Namer, ResolveRequest};
pub use types::{
    NormalizationResult, PackageVariables, RevisionSuffix, Substitution, SuffixKind, VersionSpec,
};
