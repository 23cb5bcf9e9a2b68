// Package atom grammar layer
// - split.rs: name/version/revision splitting (PackageSplitter)
// - validator.rs: atom syntax checks (AtomValidator)

pub mod split;
pub mod validator;

pub use split::{AtomParts, PackageSplitter, PortageSplitter};
pub use validator::{AtomValidator, PortageAtomValidator};
