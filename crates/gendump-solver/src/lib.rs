//! Generic argument resolution over a category tree.
//!
//! This crate holds the decision logic of gendump:
//!
//! - **`TypeRegistry`**: the capability interface every type question goes
//!   through (support, validity, candidates, instantiation, encoding)
//! - **`CategoryTree`**: the read-only hierarchy the catalog is filed under
//! - **`ResolutionEngine`**: flattening, prioritizing and argument selection
//! - **`ArtifactAssembler`**: the funny string and the type dump
//!
//! The crate never implements a registry itself; `gendump-catalog` provides
//! one backed by static tables.
pub mod artifacts;
pub mod category;
pub mod registry;
pub mod resolve;
pub mod types;

pub use artifacts::{Artifact, ArtifactAssembler, ArtifactOptions, argument_name};
pub use category::{CategoryNode, CategoryTree, flatten_category};
pub use registry::{
    InstantiationError, RegistryError, SetupError, TypeRegistry, require_placeholders,
};
pub use resolve::{
    ArgumentSource, ChosenArgument, PassReport, ResolutionEngine, ResolutionPolicy,
    ResolvedEntry, ValidCandidate,
};
pub use types::{FlatEntry, Placeholders, TypeId};

// Shared registry double for the unit tests of every module.
#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
