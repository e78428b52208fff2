// Types extracted from C/C++ header text
//
// A header is read once into a SourceUnit; every brace-bodied `class` or
// `struct` found in it becomes a DeclarationSite.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One header file: its path and raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    pub path: PathBuf,
    pub content: String,
}

impl SourceUnit {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Decode raw file bytes, replacing invalid UTF-8 rather than failing
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        Self::new(path, String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Keyword that introduced a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
}

impl TypeKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "class" => Some(TypeKind::Class),
            "struct" => Some(TypeKind::Struct),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A brace-bodied `class`/`struct` declaration found in a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSite {
    /// Declared type name
    pub name: String,
    /// `class` or `struct`
    pub kind: TypeKind,
    /// Path of the header the declaration was found in
    pub origin: PathBuf,
    /// Raw text between the name and the opening brace
    pub base_clause: String,
    /// Raw text strictly between the matching braces
    pub body: String,
    /// Byte offset of the opening brace in the header text
    pub body_start: usize,
}
