//! In-memory `TypeRegistry` double shared by the solver unit tests.

use crate::registry::{InstantiationError, RegistryError, TypeRegistry};
use crate::types::TypeId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cell::RefCell;

/// Namespace every mock type is encoded under.
pub const MOCK_PREFIX: &str = "[Mock]Nodes.";

#[derive(Clone, Debug)]
struct MockType {
    name: String,
    arity: usize,
    /// `(definition, argument)` for closed instantiations.
    instance_of: Option<(TypeId, TypeId)>,
}

#[derive(Default)]
pub struct MockRegistry {
    types: RefCell<Vec<MockType>>,
    instances: RefCell<FxHashMap<(TypeId, TypeId), TypeId>>,
    candidates: FxHashMap<TypeId, Vec<TypeId>>,
    structural_reference: Option<TypeId>,
    primitive_numeric: Option<TypeId>,
    unsupported: FxHashSet<TypeId>,
    invalid: FxHashSet<TypeId>,
    failing_validity: FxHashSet<TypeId>,
    failing_instantiation: FxHashSet<(TypeId, TypeId)>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `Ref` and `Num` placeholders already declared.
    pub fn with_placeholders() -> (Self, TypeId, TypeId) {
        let mut registry = Self::new();
        let reference = registry.closed("Ref");
        let numeric = registry.closed("Num");
        registry.structural_reference = Some(reference);
        registry.primitive_numeric = Some(numeric);
        (registry, reference, numeric)
    }

    fn push(&self, ty: MockType) -> TypeId {
        let mut types = self.types.borrow_mut();
        types.push(ty);
        TypeId((types.len() - 1) as u32)
    }

    pub fn closed(&mut self, name: &str) -> TypeId {
        self.push(MockType {
            name: name.to_string(),
            arity: 0,
            instance_of: None,
        })
    }

    pub fn open(&mut self, name: &str) -> TypeId {
        self.push(MockType {
            name: name.to_string(),
            arity: 1,
            instance_of: None,
        })
    }

    pub fn open_with_arity(&mut self, name: &str, arity: usize) -> TypeId {
        self.push(MockType {
            name: name.to_string(),
            arity,
            instance_of: None,
        })
    }

    /// Intern `open<argument>` without any checks.
    pub fn instance(&self, open: TypeId, argument: TypeId) -> TypeId {
        if let Some(&ty) = self.instances.borrow().get(&(open, argument)) {
            return ty;
        }
        let name = self.types.borrow()[open.index()].name.clone();
        let ty = self.push(MockType {
            name,
            arity: 0,
            instance_of: Some((open, argument)),
        });
        self.instances.borrow_mut().insert((open, argument), ty);
        ty
    }

    pub fn set_candidates(&mut self, open: TypeId, arguments: &[TypeId]) -> Vec<TypeId> {
        let list: Vec<TypeId> = arguments.iter().map(|&a| self.instance(open, a)).collect();
        self.candidates.insert(open, list.clone());
        list
    }

    pub fn set_candidate_list(&mut self, open: TypeId, list: Vec<TypeId>) {
        self.candidates.insert(open, list);
    }

    pub fn mark_unsupported(&mut self, ty: TypeId) {
        self.unsupported.insert(ty);
    }

    pub fn mark_invalid(&mut self, ty: TypeId) {
        self.invalid.insert(ty);
    }

    pub fn mark_validity_error(&mut self, ty: TypeId) {
        self.failing_validity.insert(ty);
    }

    pub fn fail_instantiation(&mut self, open: TypeId, argument: TypeId) {
        self.failing_instantiation.insert((open, argument));
    }

    pub fn clear_placeholders(&mut self) {
        self.structural_reference = None;
        self.primitive_numeric = None;
    }

    pub fn clear_primitive_numeric(&mut self) {
        self.primitive_numeric = None;
    }

    fn get(&self, ty: TypeId) -> MockType {
        self.types.borrow()[ty.index()].clone()
    }
}

impl TypeRegistry for MockRegistry {
    fn name(&self, ty: TypeId) -> String {
        let t = self.get(ty);
        if t.arity > 0 && t.instance_of.is_none() {
            format!("{}`{}", t.name, t.arity)
        } else {
            t.name
        }
    }

    fn full_name(&self, ty: TypeId) -> String {
        let t = self.get(ty);
        match t.instance_of {
            Some((_, arg)) => format!("{}<{}>", t.name, self.get(arg).name),
            None if t.arity > 0 => format!("{}<T>", t.name),
            None => t.name,
        }
    }

    fn arity(&self, ty: TypeId) -> usize {
        let t = self.get(ty);
        if t.instance_of.is_some() { 0 } else { t.arity }
    }

    fn structural_reference(&self) -> Option<TypeId> {
        self.structural_reference
    }

    fn primitive_numeric(&self) -> Option<TypeId> {
        self.primitive_numeric
    }

    fn is_supported(&self, ty: TypeId) -> bool {
        !self.unsupported.contains(&ty)
    }

    fn is_valid_generic_instantiation(
        &self,
        ty: TypeId,
        _strict: bool,
    ) -> Result<bool, RegistryError> {
        if self.failing_validity.contains(&ty) || self.arity(ty) > 0 {
            return Err(RegistryError::OpenDefinition {
                ty: self.full_name(ty),
            });
        }
        Ok(!self.invalid.contains(&ty))
    }

    fn common_candidates(&self, open: TypeId) -> Vec<TypeId> {
        self.candidates.get(&open).cloned().unwrap_or_default()
    }

    fn instantiate(&self, open: TypeId, argument: TypeId) -> Result<TypeId, InstantiationError> {
        let arity = self.arity(open);
        if arity == 0 {
            return Err(InstantiationError::NotGeneric {
                ty: self.full_name(open),
            });
        }
        if arity != 1 {
            return Err(InstantiationError::ArityMismatch {
                ty: self.full_name(open),
                expected: arity,
                found: 1,
            });
        }
        if self.failing_instantiation.contains(&(open, argument)) {
            return Err(InstantiationError::ConstraintViolation {
                ty: self.full_name(open),
                parameter: "T".to_string(),
                argument: self.full_name(argument),
                constraint: "value",
            });
        }
        Ok(self.instance(open, argument))
    }

    fn encode(&self, ty: TypeId) -> String {
        format!("{MOCK_PREFIX}{}", self.full_name(ty))
    }
}
