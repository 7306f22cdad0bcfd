//! Symbol table: exported names and their raw, unresolved targets.
//!
//! Target indices decoded here are deliberately left unresolved so this
//! stage can be validated independently of the code section layout;
//! resolution happens in [`crate::resolve`].

use std::fmt;

use indexmap::IndexMap;

use crate::cursor::Cursor;
use crate::error::LoadError;

/// Symbol namespace. Procedure names and data names never collide across
/// namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    Procedure,
    Data,
}

impl Namespace {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Namespace::Procedure),
            1 => Some(Namespace::Data),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            Namespace::Procedure => 0,
            Namespace::Data => 1,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::Procedure => write!(f, "procedure"),
            Namespace::Data => write!(f, "data"),
        }
    }
}

/// What a symbol claims its target is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Procedure,
    Data,
    Type,
}

impl SymbolKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SymbolKind::Procedure),
            1 => Some(SymbolKind::Data),
            2 => Some(SymbolKind::Type),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        match self {
            SymbolKind::Procedure => 0,
            SymbolKind::Data => 1,
            SymbolKind::Type => 2,
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Procedure => write!(f, "procedure"),
            SymbolKind::Data => write!(f, "data"),
            SymbolKind::Type => write!(f, "type"),
        }
    }
}

/// A symbol as decoded from the file; `target_index` is not yet resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSymbol {
    pub namespace: Namespace,
    pub name: String,
    pub kind: SymbolKind,
    pub target_index: u32,
}

/// The decoded symbol table prior to resolution.
#[derive(Debug, Default)]
pub struct RawSymbolTable {
    /// Symbols in file order.
    pub symbols: Vec<RawSymbol>,
    /// (namespace, name) -> index into `symbols`, insertion-ordered.
    pub by_name: IndexMap<(Namespace, String), u32>,
}

/// Decode `count` symbols, rejecting duplicate (namespace, name) pairs.
pub fn read_symbols(cursor: &mut Cursor<'_>, count: u32) -> Result<RawSymbolTable, LoadError> {
    let mut table = RawSymbolTable {
        symbols: Vec::with_capacity(count as usize),
        by_name: IndexMap::with_capacity(count as usize),
    };

    for index in 0..count {
        let namespace_byte = cursor.read_tag()?;
        let namespace = Namespace::from_byte(namespace_byte).ok_or_else(|| {
            LoadError::SymbolKindMismatch {
                index,
                detail: format!("unknown namespace tag {namespace_byte:#04x}"),
            }
        })?;

        let name = cursor.read_length_prefixed_str()?.to_owned();

        let kind_byte = cursor.read_tag()?;
        let kind =
            SymbolKind::from_byte(kind_byte).ok_or_else(|| LoadError::SymbolKindMismatch {
                index,
                detail: format!("unknown kind tag {kind_byte:#04x}"),
            })?;

        let target_index = cursor.read_u32()?;

        if table.by_name.contains_key(&(namespace, name.clone())) {
            return Err(LoadError::DuplicateSymbol {
                index,
                namespace,
                name,
            });
        }
        table.by_name.insert((namespace, name.clone()), index);
        table.symbols.push(RawSymbol {
            namespace,
            name,
            kind,
            target_index,
        });
    }

    Ok(table)
}
