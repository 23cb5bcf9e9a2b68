pub mod atom;
pub mod config;
pub mod license;
pub mod log;
pub mod mirror;
pub mod namer;

pub use namer::{Enamer, Namer, NamerError, PackageVariables, ResolveRequest, Substitution};
