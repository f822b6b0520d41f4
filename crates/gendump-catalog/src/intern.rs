//! Type interning.
//!
//! Every definition and every closed instantiation gets exactly one
//! `TypeId`. Instantiating the same definition with the same arguments twice
//! returns the same id, which is what lets the engine compare candidates by
//! id.

use gendump_solver::TypeId;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::RefCell;

pub type TypeArgs = SmallVec<[TypeId; 2]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    /// A declared catalog type, by declaration index.
    Definition(u32),
    /// A definition closed over `args`.
    Instance { definition: TypeId, args: TypeArgs },
}

#[derive(Debug, Default)]
pub struct TypeInterner {
    types: RefCell<Vec<TypeData>>,
    ids: RefCell<FxHashMap<TypeData, TypeId>>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self.ids.borrow().get(&data) {
            return id;
        }
        let mut types = self.types.borrow_mut();
        let id = TypeId(types.len() as u32);
        types.push(data.clone());
        self.ids.borrow_mut().insert(data, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.borrow().get(id.index()).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
