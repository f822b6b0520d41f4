//! Catalog loading and validation.
//!
//! Loading happens in two passes over the declarations:
//! 1. Intern every definition so that declaration `i` gets `TypeId(i)`
//! 2. Resolve names referenced by placeholders, `allowed` lists and
//!    `commonArguments` against the interned definitions
//!
//! Any dangling reference is a load error. The catalog is never partially
//! accepted.

use crate::intern::{TypeArgs, TypeData, TypeInterner};
use crate::model::{CatalogFile, TypeDecl, TypeKind};
use crate::registry::{Definition, DefinitionFlags, Parameter, StaticRegistry};
use gendump_common::limits::{CATEGORY_SEPARATOR, MAX_CATEGORY_DEPTH};
use gendump_solver::TypeId;
use rustc_hash::FxHashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
pub enum CatalogError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    DuplicateType(String),
    UnknownType {
        referenced_by: String,
        name: String,
    },
    GenericPlaceholder(String),
    CategoryTooDeep {
        ty: String,
        depth: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "failed to parse catalog: {err}"),
            Self::DuplicateType(name) => write!(f, "type '{name}' is declared more than once"),
            Self::UnknownType {
                referenced_by,
                name,
            } => write!(f, "'{referenced_by}' references unknown type '{name}'"),
            Self::GenericPlaceholder(name) => {
                write!(f, "placeholder '{name}' must not be a generic definition")
            }
            Self::CategoryTooDeep { ty, depth } => write!(
                f,
                "category of '{ty}' is {depth} levels deep (limit {MAX_CATEGORY_DEPTH})"
            ),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Read and build a registry from a catalog file.
pub fn load_catalog(path: &Path) -> Result<StaticRegistry, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry = parse_catalog(&source)?;
    info!(
        path = %path.display(),
        types = registry.definitions.len(),
        "catalog loaded"
    );
    Ok(registry)
}

pub fn parse_catalog(source: &str) -> Result<StaticRegistry, CatalogError> {
    let file: CatalogFile = serde_json::from_str(source).map_err(CatalogError::Parse)?;
    build_registry(file)
}

pub fn build_registry(file: CatalogFile) -> Result<StaticRegistry, CatalogError> {
    let interner = TypeInterner::new();
    let mut by_name = FxHashMap::default();

    for (index, decl) in file.types.iter().enumerate() {
        let qualified = decl.qualified_name();
        check_category_depth(decl, &qualified)?;
        let id = interner.intern(TypeData::Definition(index as u32));
        if by_name.insert(qualified.clone(), id).is_some() {
            return Err(CatalogError::DuplicateType(qualified));
        }
    }

    let resolve = |owner: &str, name: &str| -> Result<TypeId, CatalogError> {
        by_name
            .get(name)
            .copied()
            .ok_or_else(|| CatalogError::UnknownType {
                referenced_by: owner.to_string(),
                name: name.to_string(),
            })
    };

    let mut definitions = Vec::with_capacity(file.types.len());
    for decl in &file.types {
        let owner = decl.qualified_name();
        let parameters = decl
            .parameters
            .iter()
            .map(|p| -> Result<Parameter, CatalogError> {
                let allowed = match &p.allowed {
                    Some(names) => Some(
                        names
                            .iter()
                            .map(|n| resolve(&owner, n))
                            .collect::<Result<Vec<_>, _>>()?,
                    ),
                    None => None,
                };
                Ok(Parameter {
                    name: p.name.clone(),
                    constraint: p.constraint,
                    allowed,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let common_arguments = decl
            .common_arguments
            .iter()
            .map(|list| {
                list.0
                    .iter()
                    .map(|n| resolve(&owner, n))
                    .collect::<Result<TypeArgs, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        definitions.push(Definition {
            name: decl.name.clone(),
            namespace: decl.namespace.clone(),
            assembly: decl.assembly.clone(),
            alias: decl.alias.clone(),
            category: decl.category.clone(),
            flags: flags_of(decl),
            parameters,
            common_arguments,
        });
    }

    let placeholder = |name: Option<&str>| -> Result<Option<TypeId>, CatalogError> {
        let Some(name) = name else {
            return Ok(None);
        };
        let id = resolve("placeholders", name)?;
        if definitions[id.index()].is_generic() {
            return Err(CatalogError::GenericPlaceholder(name.to_string()));
        }
        Ok(Some(id))
    };
    let decl = file.placeholders.unwrap_or_default();
    let structural_reference = placeholder(decl.structural_reference.as_deref())?;
    let primitive_numeric = placeholder(decl.primitive_numeric.as_deref())?;
    debug!(
        ?structural_reference,
        ?primitive_numeric,
        "placeholders resolved"
    );

    Ok(StaticRegistry {
        definitions,
        interner,
        by_name,
        structural_reference,
        primitive_numeric,
    })
}

fn flags_of(decl: &TypeDecl) -> DefinitionFlags {
    let mut flags = DefinitionFlags::empty();
    if decl.supported {
        flags |= DefinitionFlags::SUPPORTED;
    }
    if decl.kind == TypeKind::Value {
        flags |= DefinitionFlags::VALUE_TYPE;
    }
    flags
}

fn check_category_depth(decl: &TypeDecl, qualified: &str) -> Result<(), CatalogError> {
    let Some(category) = &decl.category else {
        return Ok(());
    };
    let depth = category
        .split(CATEGORY_SEPARATOR)
        .filter(|s| !s.is_empty())
        .count();
    if depth > MAX_CATEGORY_DEPTH {
        return Err(CatalogError::CategoryTooDeep {
            ty: qualified.to_string(),
            depth,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/load_tests.rs"]
mod tests;
