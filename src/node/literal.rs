//! Constant nodes.

use std::fmt;

use super::output::MultiOutputNode;
use crate::error::{GraphError, Result};

/// Storage kind of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Bool,
    Int,
    String,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Bool => write!(f, "bool"),
            StorageKind::Int => write!(f, "int"),
            StorageKind::String => write!(f, "string"),
        }
    }
}

/// The value held by a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl LiteralValue {
    /// Get the storage kind of this value.
    pub fn kind(&self) -> StorageKind {
        match self {
            LiteralValue::Bool(_) => StorageKind::Bool,
            LiteralValue::Int(_) => StorageKind::Int,
            LiteralValue::Str(_) => StorageKind::String,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Bits render as 1/0 in generated output
            LiteralValue::Bool(b) => write!(f, "{}", u8::from(*b)),
            LiteralValue::Int(i) => write!(f, "{}", i),
            LiteralValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        LiteralValue::Bool(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        LiteralValue::Int(value)
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        LiteralValue::Str(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        LiteralValue::Str(value.to_string())
    }
}

/// Rust types that can be extracted from a literal with [`Literal::raw_value`].
pub trait RawValue: Sized {
    const KIND: StorageKind;

    fn extract(value: &LiteralValue) -> Option<Self>;
}

impl RawValue for bool {
    const KIND: StorageKind = StorageKind::Bool;

    fn extract(value: &LiteralValue) -> Option<Self> {
        match value {
            LiteralValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl RawValue for i64 {
    const KIND: StorageKind = StorageKind::Int;

    fn extract(value: &LiteralValue) -> Option<Self> {
        match value {
            LiteralValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl RawValue for String {
    const KIND: StorageKind = StorageKind::String;

    fn extract(value: &LiteralValue) -> Option<Self> {
        match value {
            LiteralValue::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

/// An immutable constant. Literals drive other nodes but are never driven.
#[derive(Debug)]
pub struct Literal {
    outputs: MultiOutputNode,
    value: LiteralValue,
}

impl Literal {
    pub(crate) fn new(value: LiteralValue) -> Self {
        Self {
            outputs: MultiOutputNode::new(),
            value,
        }
    }

    /// Get the constant value.
    pub fn value(&self) -> &LiteralValue {
        &self.value
    }

    /// Get the storage kind of the value.
    pub fn storage_kind(&self) -> StorageKind {
        self.value.kind()
    }

    /// Extract the value as `T`, failing if `T` doesn't match the storage kind.
    pub fn raw_value<T: RawValue>(&self) -> Result<T> {
        T::extract(&self.value).ok_or(GraphError::LiteralKindMismatch {
            expected: T::KIND,
            actual: self.storage_kind(),
        })
    }

    pub(crate) fn outputs(&self) -> &MultiOutputNode {
        &self.outputs
    }

    pub(crate) fn outputs_mut(&mut self) -> &mut MultiOutputNode {
        &mut self.outputs
    }

    pub(crate) fn detached(&self) -> Self {
        Self::new(self.value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_values() {
        assert_eq!(LiteralValue::Int(-3).to_string(), "-3");
        assert_eq!(LiteralValue::from("hi").to_string(), "hi");
        assert_eq!(LiteralValue::Bool(true).to_string(), "1");
        assert_eq!(LiteralValue::Bool(false).to_string(), "0");
    }

    #[test]
    fn test_raw_value() {
        let lit = Literal::new(LiteralValue::Int(7));
        assert_eq!(lit.storage_kind(), StorageKind::Int);
        assert_eq!(lit.raw_value::<i64>().unwrap(), 7);

        let lit = Literal::new("hi".into());
        assert_eq!(lit.raw_value::<String>().unwrap(), "hi");

        let lit = Literal::new(true.into());
        assert!(lit.raw_value::<bool>().unwrap());
    }

    #[test]
    fn test_raw_value_wrong_kind() {
        let lit = Literal::new(LiteralValue::Int(7));
        match lit.raw_value::<String>() {
            Err(GraphError::LiteralKindMismatch { expected, actual }) => {
                assert_eq!(expected, StorageKind::String);
                assert_eq!(actual, StorageKind::Int);
            }
            other => panic!("expected kind mismatch, got {:?}", other),
        }
    }
}
