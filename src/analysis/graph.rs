// Type relationship graph
//
// Nodes are declared types keyed by name; edges are inheritance
// (base -> derived) and usage (referrer -> referenced). Everything is kept in
// ordered collections so iteration order is lexicographic, never discovery
// order.

use crate::error::{Error, Result};
use crate::parser::TypeKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// A vertex of the type graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeKind,
    /// Header the type was (last) declared in
    pub origin: PathBuf,
}

/// `derived` lists `base` among its direct bases
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InheritanceEdge {
    pub base: String,
    pub derived: String,
}

/// `from` mentions `to` in its body without inheriting from it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UsageEdge {
    pub from: String,
    pub to: String,
}

impl InheritanceEdge {
    pub fn new(base: impl Into<String>, derived: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            derived: derived.into(),
        }
    }
}

impl UsageEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Relationship data extracted from one declaration site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedType {
    pub name: String,
    pub kind: TypeKind,
    pub origin: PathBuf,
    /// Direct base names as written (last `::` segment)
    pub bases: BTreeSet<String>,
    /// Other known type names mentioned in the body
    pub uses: BTreeSet<String>,
}

/// The finished graph handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    /// One node per distinct name, sorted by name
    pub nodes: Vec<TypeNode>,
    pub inheritance: BTreeSet<InheritanceEdge>,
    pub usage: BTreeSet<UsageEdge>,
}

impl TypeGraph {
    /// Look up a node by type name
    pub fn get_node(&self, name: &str) -> Option<&TypeNode> {
        self.nodes
            .binary_search_by(|node| node.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.nodes[idx])
    }

    /// Direct bases of `name` that are themselves nodes
    pub fn bases_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.inheritance
            .iter()
            .filter(move |edge| edge.derived == name)
            .map(|edge| edge.base.as_str())
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.nodes.len(),
            classes: self.nodes.iter().filter(|n| n.kind == TypeKind::Class).count(),
            structs: self.nodes.iter().filter(|n| n.kind == TypeKind::Struct).count(),
            inheritance_edges: self.inheritance.len(),
            usage_edges: self.usage.len(),
        }
    }
}

/// Statistics about the type graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub classes: usize,
    pub structs: usize,
    pub inheritance_edges: usize,
    pub usage_edges: usize,
}

/// Aggregate extracted declarations into the final graph.
///
/// Same-named declarations share one node; the last one seen supplies its
/// kind and origin. Edges only connect known nodes, and a usage is dropped
/// when the referenced type is already a base of the declaring site.
pub fn build_relationships(types: &[ExtractedType]) -> Result<TypeGraph> {
    if types.is_empty() {
        return Err(Error::NoDeclarations);
    }

    let mut nodes: BTreeMap<&str, TypeNode> = BTreeMap::new();
    for ty in types {
        nodes.insert(
            ty.name.as_str(),
            TypeNode {
                name: ty.name.clone(),
                kind: ty.kind,
                origin: ty.origin.clone(),
            },
        );
    }

    let mut inheritance = BTreeSet::new();
    let mut usage = BTreeSet::new();

    for ty in types {
        for base in &ty.bases {
            if nodes.contains_key(base.as_str()) {
                inheritance.insert(InheritanceEdge::new(base.as_str(), ty.name.as_str()));
            }
        }
        for used in &ty.uses {
            if nodes.contains_key(used.as_str()) && !ty.bases.contains(used) {
                usage.insert(UsageEdge::new(ty.name.as_str(), used.as_str()));
            }
        }
    }

    Ok(TypeGraph {
        nodes: nodes.into_values().collect(),
        inheritance,
        usage,
    })
}
