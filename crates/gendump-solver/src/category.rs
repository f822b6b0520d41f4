//! Category tree and traversal.
//!
//! A [`CategoryTree`] files every catalog type under exactly one slash
//! delimited path. It is built once and only read afterwards.
//!
//! Flattening is post-order by branch and pre-order by leaf: all child
//! categories are emitted first (depth-first, in child order), then the
//! node's own elements. Without a root the whole catalog is classified with
//! no grouping at all.

use crate::registry::TypeRegistry;
use crate::types::{FlatEntry, TypeId};
use gendump_common::limits::CATEGORY_SEPARATOR;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{trace, warn};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryNode {
    name: String,
    children: IndexMap<String, CategoryNode>,
    elements: Vec<TypeId>,
}

impl CategoryNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: IndexMap::new(),
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child categories in first-seen order.
    pub fn subcategories(&self) -> impl Iterator<Item = &CategoryNode> {
        self.children.values()
    }

    /// Types filed directly under this node.
    pub fn elements(&self) -> &[TypeId] {
        &self.elements
    }

    /// Number of types in this node and all of its descendants.
    pub fn len(&self) -> usize {
        self.elements.len() + self.children.values().map(CategoryNode::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve a slash delimited path relative to this node.
    ///
    /// Empty segments are ignored, so `""` and `"/"` both name this node.
    pub fn subcategory(&self, path: &str) -> Option<&CategoryNode> {
        let mut node = self;
        for segment in path_segments(path) {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    fn child_mut(&mut self, segment: &str) -> &mut CategoryNode {
        self.children
            .entry(segment.to_string())
            .or_insert_with(|| CategoryNode::new(segment))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTree {
    root: CategoryNode,
}

impl CategoryTree {
    /// Build a tree from `(path, type)` pairs.
    ///
    /// Intermediate categories are created on demand. A type filed twice keeps
    /// its first placement; the repeat is dropped with a warning.
    pub fn build<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, TypeId)>,
        P: AsRef<str>,
    {
        let mut root = CategoryNode::new("");
        let mut seen = FxHashSet::default();

        for (path, ty) in entries {
            let path = path.as_ref();
            if !seen.insert(ty) {
                warn!(%ty, path, "type already filed in another category, ignoring");
                continue;
            }
            let mut node = &mut root;
            for segment in path_segments(path) {
                node = node.child_mut(segment);
            }
            node.elements.push(ty);
        }

        Self { root }
    }

    pub fn root(&self) -> &CategoryNode {
        &self.root
    }

    pub fn subcategory(&self, path: &str) -> Option<&CategoryNode> {
        self.root.subcategory(path)
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(CATEGORY_SEPARATOR).filter(|s| !s.is_empty())
}

// =============================================================================
// Traversal
// =============================================================================

/// Flatten `root` into `(type, is_open_generic)` entries.
///
/// With `root == None` every type of `catalog` is classified by its own
/// arity, in catalog order. Never fails.
pub fn flatten_category<R: TypeRegistry + ?Sized>(
    root: Option<&CategoryNode>,
    catalog: &[TypeId],
    registry: &R,
) -> Vec<FlatEntry> {
    match root {
        Some(node) => {
            let mut out = Vec::with_capacity(node.len());
            flatten_into(node, registry, &mut out);
            out
        }
        None => catalog
            .iter()
            .map(|&ty| FlatEntry::new(ty, registry.is_open_generic(ty)))
            .collect(),
    }
}

fn flatten_into<R: TypeRegistry + ?Sized>(
    node: &CategoryNode,
    registry: &R,
    out: &mut Vec<FlatEntry>,
) {
    trace!(category = node.name(), "flattening category");
    for child in node.subcategories() {
        flatten_into(child, registry, out);
    }
    out.extend(
        node.elements
            .iter()
            .map(|&ty| FlatEntry::new(ty, registry.is_open_generic(ty))),
    );
}

#[cfg(test)]
#[path = "../tests/category_tests.rs"]
mod tests;
