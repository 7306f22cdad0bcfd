//! The assembled module.
//!
//! A [`Module`] is immutable once assembled and safe for the VM to execute
//! without further checking: every index it contains was bounds-validated
//! during load.

use std::path::Path;

use indexmap::IndexMap;

use crate::code::{CodeSection, Procedure};
use crate::constants::MAGIC;
use crate::error::LoadError;
use crate::header::Header;
use crate::loader::Loader;
use crate::pool::Constant;
use crate::resolve::{ResolvedSymbols, Symbol, SymbolTarget};
use crate::symbols::Namespace;

/// A fully loaded, immutable unit of executable bytecode plus its metadata.
#[derive(Debug)]
pub struct Module {
    version: u16,
    /// Source file identity, when loaded from a path.
    source: Option<String>,
    constants: Vec<Constant>,
    symbols: Vec<Symbol>,
    by_name: IndexMap<(Namespace, String), u32>,
    procedures: Vec<Procedure>,
    code: Vec<u8>,
}

impl Module {
    /// Load a module from a byte buffer using the default loader.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        Loader::default().load_bytes(bytes)
    }

    /// Load a module from a file path using the default loader.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Loader::default().load_path(path)
    }

    /// Compose resolved sections into a module, verifying whole-module
    /// invariants first. Only the loader constructs modules.
    pub(crate) fn assemble(
        version: u16,
        source: Option<String>,
        constants: Vec<Constant>,
        resolved: ResolvedSymbols,
        code: CodeSection,
    ) -> Result<Self, LoadError> {
        verify(&constants, &resolved.symbols, &code)?;
        Ok(Self {
            version,
            source,
            constants,
            symbols: resolved.symbols,
            by_name: resolved.by_name,
            procedures: code.procedures,
            code: code.buffer,
        })
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn procedures(&self) -> &[Procedure] {
        &self.procedures
    }

    /// Instruction bytes of a procedure.
    ///
    /// # Panics
    /// Panics if `index` is out of range; procedure indices handed out by
    /// this module are always valid.
    pub fn procedure_code(&self, index: u32) -> &[u8] {
        let procedure = &self.procedures[index as usize];
        &self.code[procedure.code.clone()]
    }

    /// Look up an exported symbol by (namespace, name).
    pub fn symbol(&self, namespace: Namespace, name: &str) -> Result<&Symbol, LoadError> {
        self.by_name
            .get(&(namespace, name.to_owned()))
            .map(|&index| &self.symbols[index as usize])
            .ok_or_else(|| LoadError::UnresolvedSymbol {
                namespace,
                name: name.to_owned(),
            })
    }

    /// Look up a procedure through its exported name.
    pub fn procedure_by_name(&self, name: &str) -> Result<(u32, &Procedure), LoadError> {
        let symbol = self.symbol(Namespace::Procedure, name)?;
        let SymbolTarget::Procedure(index) = symbol.target else {
            // Unreachable after resolution, but stay total.
            return Err(LoadError::UnresolvedSymbol {
                namespace: Namespace::Procedure,
                name: name.to_owned(),
            });
        };
        Ok((index, &self.procedures[index as usize]))
    }

    /// Re-encode the module in the container layout.
    ///
    /// Loading the result yields a module equivalent to this one.
    pub fn to_bytes(&self) -> Vec<u8> {
        let header = Header {
            magic: MAGIC,
            version: self.version,
            procedure_count: self.procedures.len() as u32,
            constant_count: self.constants.len() as u32,
            symbol_count: self.symbols.len() as u32,
        };
        let mut out = header.to_bytes().to_vec();

        for constant in &self.constants {
            out.push(constant.tag());
            match constant {
                Constant::Int(v) => out.extend_from_slice(&(*v as u64).to_le_bytes()),
                Constant::Float(v) => out.extend_from_slice(&v.to_bits().to_le_bytes()),
                Constant::Str(s) => {
                    out.extend_from_slice(&(s.len() as u32).to_le_bytes());
                    out.extend_from_slice(s.as_bytes());
                }
                Constant::Ref(target) => out.extend_from_slice(&target.to_le_bytes()),
            }
        }

        for symbol in &self.symbols {
            out.push(symbol.namespace.to_byte());
            out.extend_from_slice(&(symbol.name.len() as u32).to_le_bytes());
            out.extend_from_slice(symbol.name.as_bytes());
            out.push(symbol.kind.to_byte());
            let target = match symbol.target {
                SymbolTarget::Procedure(index) | SymbolTarget::Constant(index) => index,
            };
            out.extend_from_slice(&target.to_le_bytes());
        }

        for procedure in &self.procedures {
            out.extend_from_slice(&procedure.arity.to_le_bytes());
            out.extend_from_slice(&procedure.local_slots.to_le_bytes());
            let code = &self.code[procedure.code.clone()];
            out.extend_from_slice(&(code.len() as u32).to_le_bytes());
            out.extend_from_slice(code);
        }

        out
    }
}

/// Whole-module invariants, checked once before the module is released:
/// symbol targets exist, procedure ranges tile the code buffer exactly
/// (no overlap, no gap), and nothing dangles.
fn verify(constants: &[Constant], symbols: &[Symbol], code: &CodeSection) -> Result<(), LoadError> {
    for symbol in symbols {
        let (what, found, limit) = match symbol.target {
            SymbolTarget::Procedure(index) => {
                ("procedure", index, code.procedures.len() as u32)
            }
            SymbolTarget::Constant(index) => ("constant", index, constants.len() as u32),
        };
        if found >= limit {
            return Err(LoadError::IndexOutOfRange { what, found, limit });
        }
    }

    let mut end = 0usize;
    for procedure in &code.procedures {
        if procedure.code.start != end || procedure.code.end > code.buffer.len() {
            return Err(LoadError::IndexOutOfRange {
                what: "code byte",
                found: procedure.code.start as u32,
                limit: end as u32,
            });
        }
        end = procedure.code.end;
    }
    if end != code.buffer.len() {
        return Err(LoadError::IndexOutOfRange {
            what: "code byte",
            found: end as u32,
            limit: code.buffer.len() as u32,
        });
    }

    Ok(())
}

/// Module equivalence: same constants, same symbols, same procedure metadata
/// and instruction bytes. Version and source identity are not part of it.
impl PartialEq for Module {
    fn eq(&self, other: &Self) -> bool {
        if self.constants != other.constants || self.symbols != other.symbols {
            return false;
        }
        if self.procedures.len() != other.procedures.len() {
            return false;
        }
        self.procedures
            .iter()
            .zip(&other.procedures)
            .all(|(a, b)| {
                a.arity == b.arity
                    && a.local_slots == b.local_slots
                    && a.name == b.name
                    && self.code[a.code.clone()] == other.code[b.code.clone()]
            })
    }
}
