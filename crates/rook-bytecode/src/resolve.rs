//! Reference resolution: raw indices become typed, bounds-checked handles.
//!
//! This is the single point where cross-cutting consistency between the
//! constant pool, symbol table, and code section is enforced; the section
//! loaders stay independent of one another.

use indexmap::IndexMap;

use crate::code::CodeSection;
use crate::error::LoadError;
use crate::pool::Constant;
use crate::symbols::{Namespace, RawSymbolTable, SymbolKind};

/// A resolved symbol target: a direct handle into the module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolTarget {
    /// Index into the module's procedures.
    Procedure(u32),
    /// Index into the module's constant pool.
    Constant(u32),
}

/// A fully resolved exported symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub namespace: Namespace,
    pub name: String,
    pub kind: SymbolKind,
    pub target: SymbolTarget,
}

/// Resolver output, consumed by the module assembler.
#[derive(Debug, Default)]
pub struct ResolvedSymbols {
    pub symbols: Vec<Symbol>,
    pub by_name: IndexMap<(Namespace, String), u32>,
}

/// Resolve every raw cross-reference against the decoded sections.
///
/// Also attaches debug names: a procedure exported under a procedure-namespace
/// symbol inherits that symbol's name (first export wins).
pub fn resolve(
    raw: RawSymbolTable,
    pool: &[Constant],
    code: &mut CodeSection,
) -> Result<ResolvedSymbols, LoadError> {
    // Nested constant references were checked against earlier entries at
    // decode time; re-walk them against the final pool so every
    // cross-reference check lives in this pass.
    for (index, constant) in pool.iter().enumerate() {
        if let Constant::Ref(target) = constant
            && *target as usize >= index
        {
            return Err(LoadError::IndexOutOfRange {
                what: "constant",
                found: *target,
                limit: index as u32,
            });
        }
    }

    let mut symbols = Vec::with_capacity(raw.symbols.len());
    for (index, sym) in raw.symbols.into_iter().enumerate() {
        let index = index as u32;
        let target = match (sym.namespace, sym.kind) {
            (Namespace::Procedure, SymbolKind::Procedure) => {
                let limit = code.procedures.len() as u32;
                if sym.target_index >= limit {
                    return Err(LoadError::IndexOutOfRange {
                        what: "procedure",
                        found: sym.target_index,
                        limit,
                    });
                }
                let procedure = &mut code.procedures[sym.target_index as usize];
                if procedure.name.is_none() {
                    procedure.name = Some(sym.name.clone());
                }
                SymbolTarget::Procedure(sym.target_index)
            }
            (Namespace::Data, SymbolKind::Data | SymbolKind::Type) => {
                let limit = pool.len() as u32;
                if sym.target_index >= limit {
                    return Err(LoadError::IndexOutOfRange {
                        what: "constant",
                        found: sym.target_index,
                        limit,
                    });
                }
                SymbolTarget::Constant(sym.target_index)
            }
            (namespace, kind) => {
                return Err(LoadError::SymbolKindMismatch {
                    index,
                    detail: format!("{kind} symbol '{}' in {namespace} namespace", sym.name),
                });
            }
        };

        symbols.push(Symbol {
            namespace: sym.namespace,
            name: sym.name,
            kind: sym.kind,
            target,
        });
    }

    Ok(ResolvedSymbols {
        symbols,
        by_name: raw.by_name,
    })
}
