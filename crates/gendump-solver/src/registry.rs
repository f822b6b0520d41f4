//! The registry capability interface.
//!
//! The resolution engine makes every type decision through [`TypeRegistry`].
//! Implementations may be backed by static tables, a compiled registry or a
//! runtime plugin; the engine only relies on the contract below:
//!
//! | Operation | Contract |
//! |-----------|----------|
//! | `is_supported` | pure, never fails |
//! | `is_valid_generic_instantiation` | pure, may fail for malformed input |
//! | `common_candidates` | ordered, first entry has the highest priority |
//! | `instantiate` | fallible replacement for throwing instantiation |
//! | `encode` | canonical string for a closed type |
//!
//! Repeated queries for the same type may recompute; the engine does not
//! memoize anything.

use crate::types::{Placeholders, TypeId};
use std::fmt;

pub trait TypeRegistry {
    /// Short type name. The engine orders entries by its length.
    fn name(&self, ty: TypeId) -> String;

    /// Fully qualified name, used as the head of a type dump line.
    fn full_name(&self, ty: TypeId) -> String;

    /// Number of unbound type parameters (0 = closed).
    fn arity(&self, ty: TypeId) -> usize;

    fn is_open_generic(&self, ty: TypeId) -> bool {
        self.arity(ty) > 0
    }

    /// The structural reference placeholder, if the registry provides one.
    fn structural_reference(&self) -> Option<TypeId>;

    /// The primitive numeric placeholder, if the registry provides one.
    fn primitive_numeric(&self) -> Option<TypeId>;

    fn is_supported(&self, ty: TypeId) -> bool;

    fn is_valid_generic_instantiation(&self, ty: TypeId, strict: bool)
    -> Result<bool, RegistryError>;

    /// Ranked closed instantiations of `open` worth trying as arguments.
    fn common_candidates(&self, open: TypeId) -> Vec<TypeId>;

    /// Close `open` over a single `argument`.
    fn instantiate(&self, open: TypeId, argument: TypeId) -> Result<TypeId, InstantiationError>;

    fn encode(&self, ty: TypeId) -> String;
}

/// Resolve both placeholders or report which capability is missing.
pub fn require_placeholders<R: TypeRegistry + ?Sized>(
    registry: &R,
) -> Result<Placeholders, SetupError> {
    let structural_reference = registry
        .structural_reference()
        .ok_or(SetupError::MissingCapability("structural reference placeholder"))?;
    let primitive_numeric = registry
        .primitive_numeric()
        .ok_or(SetupError::MissingCapability("primitive numeric placeholder"))?;
    Ok(Placeholders {
        structural_reference,
        primitive_numeric,
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Failure while building a closed instantiation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstantiationError {
    /// The target has no type parameters.
    NotGeneric { ty: String },
    /// The target expects a different number of arguments.
    ArityMismatch {
        ty: String,
        expected: usize,
        found: usize,
    },
    /// The argument itself still has unbound parameters.
    OpenArgument { argument: String },
    /// The argument violates a hard constraint of the parameter.
    ConstraintViolation {
        ty: String,
        parameter: String,
        argument: String,
        constraint: &'static str,
    },
    /// The registry does not know one of the handles.
    UnknownType(TypeId),
}

impl fmt::Display for InstantiationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotGeneric { ty } => write!(f, "'{ty}' is not a generic type definition"),
            Self::ArityMismatch {
                ty,
                expected,
                found,
            } => write!(
                f,
                "'{ty}' expects {expected} type argument(s) but {found} were supplied"
            ),
            Self::OpenArgument { argument } => {
                write!(f, "argument '{argument}' has unbound type parameters")
            }
            Self::ConstraintViolation {
                ty,
                parameter,
                argument,
                constraint,
            } => write!(
                f,
                "'{argument}' violates the {constraint} constraint of '{parameter}' on '{ty}'"
            ),
            Self::UnknownType(id) => write!(f, "unknown type {id}"),
        }
    }
}

impl std::error::Error for InstantiationError {}

/// Failure raised by a registry query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A validity query was made against an open definition.
    OpenDefinition { ty: String },
    UnknownType(TypeId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenDefinition { ty } => {
                write!(f, "'{ty}' is an open definition and cannot be validated")
            }
            Self::UnknownType(id) => write!(f, "unknown type {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Unrecoverable setup failure. Aborts the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    MissingCapability(&'static str),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCapability(what) => {
                write!(f, "type registry does not provide a {what}")
            }
        }
    }
}

impl std::error::Error for SetupError {}
