//! Hardware types referenced by graph nodes.
//!
//! A [`Type`] is immutable once created and shared between nodes through
//! `Rc`. Every graph owns a [`TypeTable`] that hands out the built-in types
//! and any named types declared while building the graph.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::error::{GraphError, Result};

/// Shape of the data carried by a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// A single wire
    Bit,
    /// Elaboration-time boolean
    Boolean,
    /// Elaboration-time integer
    Integer,
    /// Elaboration-time string
    String,
    /// Bit vector of fixed width
    Vector { width: u32 },
}

impl TypeKind {
    /// Parse a type kind keyword. Vectors need a width and are handled by the caller.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "bit" => Some(Self::Bit),
            "boolean" | "bool" => Some(Self::Boolean),
            "integer" | "int" => Some(Self::Integer),
            "string" | "str" => Some(Self::String),
            _ => None,
        }
    }
}

/// A named, immutable hardware type.
#[derive(Debug, PartialEq, Eq)]
pub struct Type {
    name: String,
    kind: TypeKind,
}

impl Type {
    /// Create a new shared type.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Number of wires this type occupies, if it is synthesizable.
    pub fn width(&self) -> Option<u32> {
        match self.kind {
            TypeKind::Bit | TypeKind::Boolean => Some(1),
            TypeKind::Vector { width } => Some(width),
            TypeKind::Integer | TypeKind::String => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.name)
    }
}

/// Built-in type names, reserved in every table.
pub const BUILTIN_TYPES: [&str; 4] = ["bit", "boolean", "integer", "string"];

/// Per-graph registry of types.
#[derive(Debug, Default)]
pub struct TypeTable {
    bit: OnceCell<Rc<Type>>,
    boolean: OnceCell<Rc<Type>>,
    integer: OnceCell<Rc<Type>>,
    string: OnceCell<Rc<Type>>,
    named: HashMap<String, Rc<Type>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bit(&self) -> Rc<Type> {
        self.bit.get_or_init(|| Type::new("bit", TypeKind::Bit)).clone()
    }

    pub fn boolean(&self) -> Rc<Type> {
        self.boolean
            .get_or_init(|| Type::new("boolean", TypeKind::Boolean))
            .clone()
    }

    pub fn integer(&self) -> Rc<Type> {
        self.integer
            .get_or_init(|| Type::new("integer", TypeKind::Integer))
            .clone()
    }

    pub fn string(&self) -> Rc<Type> {
        self.string
            .get_or_init(|| Type::new("string", TypeKind::String))
            .clone()
    }

    /// Declare a new named type.
    pub fn define(&mut self, name: impl Into<String>, kind: TypeKind) -> Result<Rc<Type>> {
        let name = name.into();
        if BUILTIN_TYPES.contains(&name.as_str()) || self.named.contains_key(&name) {
            return Err(GraphError::DuplicateType { name });
        }
        let ty = Type::new(name.clone(), kind);
        self.named.insert(name, ty.clone());
        Ok(ty)
    }

    /// Look up a type by name, built-ins first.
    pub fn get(&self, name: &str) -> Option<Rc<Type>> {
        match name {
            "bit" => Some(self.bit()),
            "boolean" => Some(self.boolean()),
            "integer" => Some(self.integer()),
            "string" => Some(self.string()),
            _ => self.named.get(name).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_shared() {
        let table = TypeTable::new();
        assert!(Rc::ptr_eq(&table.integer(), &table.integer()));
        assert!(Rc::ptr_eq(&table.bit(), &table.get("bit").unwrap()));
        assert!(!Rc::ptr_eq(&table.bit(), &table.boolean()));
    }

    #[test]
    fn test_define_named_type() {
        let mut table = TypeTable::new();
        let byte = table.define("byte", TypeKind::Vector { width: 8 }).unwrap();
        assert_eq!(byte.width(), Some(8));
        assert!(Rc::ptr_eq(&byte, &table.get("byte").unwrap()));
        assert!(table.get("word").is_none());
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut table = TypeTable::new();
        table.define("byte", TypeKind::Vector { width: 8 }).unwrap();
        assert!(matches!(
            table.define("byte", TypeKind::Bit),
            Err(GraphError::DuplicateType { .. })
        ));
        assert!(matches!(
            table.define("integer", TypeKind::Integer),
            Err(GraphError::DuplicateType { .. })
        ));
    }
}
