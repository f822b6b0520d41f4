//! Static-table type registry.
//!
//! Provides [`StaticRegistry`], a [`gendump_solver::TypeRegistry`] whose
//! types, constraints and candidate lists are declared in a JSON catalog:
//!
//! - `model`: the serde schema of catalog files
//! - `load`: parsing, reference resolution and validation
//! - `intern`: stable ids for definitions and closed instantiations
//! - `registry`: the registry queries themselves

pub mod intern;
pub mod load;
pub mod model;
pub mod registry;

pub use load::{CatalogError, build_registry, load_catalog, parse_catalog};
pub use model::{CatalogFile, Constraint, TypeKind};
pub use registry::{Definition, DefinitionFlags, Parameter, StaticRegistry};
