//! Core handles shared by the registry, the category tree and the engine.

use std::fmt;

// =============================================================================
// TypeId - Opaque Type Handle
// =============================================================================

/// Opaque handle to a type known to a [`TypeRegistry`](crate::TypeRegistry).
///
/// The solver never looks inside a `TypeId`. Names, arity and parameter
/// lists are only reachable through the registry that issued the handle, so
/// two registries may reuse the same numeric ids for unrelated types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two privileged argument types tried before any registry candidate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placeholders {
    /// Generic "node/slot" reference argument.
    pub structural_reference: TypeId,
    /// Generic scalar argument.
    pub primitive_numeric: TypeId,
}

/// One entry of a flattened category: a type and whether it is open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlatEntry {
    pub ty: TypeId,
    pub is_open_generic: bool,
}

impl FlatEntry {
    pub const fn new(ty: TypeId, is_open_generic: bool) -> Self {
        Self {
            ty,
            is_open_generic,
        }
    }
}
