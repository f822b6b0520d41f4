//! `TypeRegistry` backed by static type tables.
//!
//! Definitions come from a catalog file (see [`crate::load`]). Closed
//! instantiations are built on demand and interned, so the registry can be
//! queried through `&self` while still handing out stable ids.
//!
//! ## Name formats
//!
//! | Query | Definition `ValueAdd<T>` | Instance over `float` |
//! |-------|--------------------------|-----------------------|
//! | `name` | ``ValueAdd`1`` | ``ValueAdd`1`` |
//! | `full_name` | `Ns.ValueAdd<T>` | `Ns.ValueAdd<System.Single>` |
//! | `encode` | `[Asm]Ns.ValueAdd<T>` | `[Asm]Ns.ValueAdd<float>` |
//!
//! Arguments are encoded by alias when the argument type declares one.

use crate::intern::{TypeArgs, TypeData, TypeInterner};
use crate::model::{Constraint, TypeKind, qualify};
use bitflags::bitflags;
use gendump_solver::{
    CategoryTree, InstantiationError, RegistryError, TypeId, TypeRegistry,
};
use rustc_hash::FxHashMap;
use tracing::debug;

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DefinitionFlags: u8 {
        const SUPPORTED = 1 << 0;
        const VALUE_TYPE = 1 << 1;
    }
}

#[derive(Clone, Debug)]
pub struct Parameter {
    pub name: String,
    pub constraint: Constraint,
    /// Arguments accepted by the validity check. `None` accepts anything.
    pub allowed: Option<Vec<TypeId>>,
}

#[derive(Clone, Debug)]
pub struct Definition {
    pub name: String,
    pub namespace: String,
    pub assembly: String,
    pub alias: Option<String>,
    pub category: Option<String>,
    pub flags: DefinitionFlags,
    pub parameters: Vec<Parameter>,
    /// Candidate argument lists, highest priority first.
    pub common_arguments: Vec<TypeArgs>,
}

impl Definition {
    pub fn kind(&self) -> TypeKind {
        if self.flags.contains(DefinitionFlags::VALUE_TYPE) {
            TypeKind::Value
        } else {
            TypeKind::Reference
        }
    }

    pub fn is_generic(&self) -> bool {
        !self.parameters.is_empty()
    }

    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }
}

#[derive(Debug, Default)]
pub struct StaticRegistry {
    pub(crate) definitions: Vec<Definition>,
    pub(crate) interner: TypeInterner,
    pub(crate) by_name: FxHashMap<String, TypeId>,
    pub(crate) structural_reference: Option<TypeId>,
    pub(crate) primitive_numeric: Option<TypeId>,
}

impl StaticRegistry {
    /// Every declared type, in catalog order.
    pub fn catalog(&self) -> Vec<TypeId> {
        (0..self.definitions.len() as u32).map(TypeId).collect()
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    pub fn definition(&self, ty: TypeId) -> Option<&Definition> {
        match self.interner.lookup(ty)? {
            TypeData::Definition(index) => self.definitions.get(index as usize),
            TypeData::Instance { definition, .. } => self.definition(definition),
        }
    }

    /// Arguments of a closed instantiation; empty for definitions.
    pub fn arguments(&self, ty: TypeId) -> TypeArgs {
        match self.interner.lookup(ty) {
            Some(TypeData::Instance { args, .. }) => args,
            _ => TypeArgs::new(),
        }
    }

    /// File every categorized definition into a tree.
    pub fn category_tree(&self) -> CategoryTree {
        CategoryTree::build(
            self.definitions
                .iter()
                .enumerate()
                .filter_map(|(i, def)| Some((def.category.as_deref()?, TypeId(i as u32)))),
        )
    }

    /// Number of interned types, instances included.
    #[cfg(test)]
    pub(crate) fn interned_len(&self) -> usize {
        self.interner.len()
    }

    /// Close `open` over `args`, enforcing arity and hard constraints.
    pub fn instantiate_with(
        &self,
        open: TypeId,
        args: &[TypeId],
    ) -> Result<TypeId, InstantiationError> {
        let definition = match self.interner.lookup(open) {
            Some(TypeData::Definition(index)) => &self.definitions[index as usize],
            Some(TypeData::Instance { .. }) => {
                return Err(InstantiationError::NotGeneric {
                    ty: self.full_name(open),
                });
            }
            None => return Err(InstantiationError::UnknownType(open)),
        };
        if !definition.is_generic() {
            return Err(InstantiationError::NotGeneric {
                ty: self.full_name(open),
            });
        }
        if definition.parameters.len() != args.len() {
            return Err(InstantiationError::ArityMismatch {
                ty: self.full_name(open),
                expected: definition.parameters.len(),
                found: args.len(),
            });
        }
        for (parameter, &arg) in definition.parameters.iter().zip(args) {
            let arg_def = self
                .definition(arg)
                .ok_or(InstantiationError::UnknownType(arg))?;
            if self.arity(arg) > 0 {
                return Err(InstantiationError::OpenArgument {
                    argument: self.full_name(arg),
                });
            }
            if !parameter.constraint.admits(arg_def.kind()) {
                return Err(InstantiationError::ConstraintViolation {
                    ty: self.full_name(open),
                    parameter: parameter.name.clone(),
                    argument: self.full_name(arg),
                    constraint: parameter.constraint.as_str(),
                });
            }
        }
        Ok(self.interner.intern(TypeData::Instance {
            definition: open,
            args: args.iter().copied().collect(),
        }))
    }

    fn argument_list(&self, ty: TypeId, render: impl Fn(TypeId) -> String) -> String {
        self.arguments(ty)
            .iter()
            .map(|&arg| render(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn parameter_list(definition: &Definition) -> String {
        definition
            .parameters
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn encode_argument(&self, ty: TypeId) -> String {
        match self.definition(ty) {
            Some(Definition {
                alias: Some(alias), ..
            }) if self.arguments(ty).is_empty() => alias.clone(),
            _ => self.encode(ty),
        }
    }
}

impl TypeRegistry for StaticRegistry {
    fn name(&self, ty: TypeId) -> String {
        match self.definition(ty) {
            Some(def) if def.is_generic() => format!("{}`{}", def.name, def.parameters.len()),
            Some(def) => def.name.clone(),
            None => ty.to_string(),
        }
    }

    fn full_name(&self, ty: TypeId) -> String {
        let Some(def) = self.definition(ty) else {
            return ty.to_string();
        };
        let base = def.qualified_name();
        if !def.is_generic() {
            return base;
        }
        match self.interner.lookup(ty) {
            Some(TypeData::Instance { .. }) => {
                format!("{base}<{}>", self.argument_list(ty, |a| self.full_name(a)))
            }
            _ => format!("{base}<{}>", Self::parameter_list(def)),
        }
    }

    fn arity(&self, ty: TypeId) -> usize {
        match self.interner.lookup(ty) {
            Some(TypeData::Definition(index)) => self.definitions[index as usize].parameters.len(),
            _ => 0,
        }
    }

    fn structural_reference(&self) -> Option<TypeId> {
        self.structural_reference
    }

    fn primitive_numeric(&self) -> Option<TypeId> {
        self.primitive_numeric
    }

    fn is_supported(&self, ty: TypeId) -> bool {
        let Some(def) = self.definition(ty) else {
            return false;
        };
        def.flags.contains(DefinitionFlags::SUPPORTED)
            && self.arguments(ty).iter().all(|&arg| self.is_supported(arg))
    }

    fn is_valid_generic_instantiation(
        &self,
        ty: TypeId,
        strict: bool,
    ) -> Result<bool, RegistryError> {
        let (definition, args) = match self.interner.lookup(ty) {
            Some(TypeData::Definition(index)) => {
                let def = &self.definitions[index as usize];
                if def.is_generic() {
                    return Err(RegistryError::OpenDefinition {
                        ty: self.full_name(ty),
                    });
                }
                return Ok(true);
            }
            Some(TypeData::Instance { definition, args }) => (definition, args),
            None => return Err(RegistryError::UnknownType(ty)),
        };
        let Some(def) = self.definition(definition) else {
            return Err(RegistryError::UnknownType(definition));
        };

        for (parameter, &arg) in def.parameters.iter().zip(&args) {
            if let Some(allowed) = &parameter.allowed
                && !allowed.contains(&arg)
            {
                return Ok(false);
            }
            if !self.arguments(arg).is_empty() {
                // Nested instantiations are only accepted by the lenient check.
                if strict || !self.is_valid_generic_instantiation(arg, strict)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn common_candidates(&self, open: TypeId) -> Vec<TypeId> {
        let Some(def) = self.definition(open) else {
            return Vec::new();
        };
        def.common_arguments
            .iter()
            .filter_map(|args| match self.instantiate_with(open, args) {
                Ok(ty) => Some(ty),
                Err(err) => {
                    debug!(ty = %self.full_name(open), error = %err, "dropping common argument list");
                    None
                }
            })
            .collect()
    }

    fn instantiate(&self, open: TypeId, argument: TypeId) -> Result<TypeId, InstantiationError> {
        self.instantiate_with(open, &[argument])
    }

    fn encode(&self, ty: TypeId) -> String {
        let Some(def) = self.definition(ty) else {
            return ty.to_string();
        };
        let base = format!("[{}]{}", def.assembly, def.qualified_name());
        if !def.is_generic() {
            return base;
        }
        match self.interner.lookup(ty) {
            Some(TypeData::Instance { .. }) => {
                format!(
                    "{base}<{}>",
                    self.argument_list(ty, |a| self.encode_argument(a))
                )
            }
            _ => format!("{base}<{}>", Self::parameter_list(def)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
