//! Byte-level fixtures shared across loader tests.

use crate::constants::MAGIC;
use crate::symbols::{Namespace, SymbolKind};

/// Builds module files byte-by-byte, in the container layout.
///
/// Unlike [`crate::module::Module::to_bytes`] this writes whatever it is
/// told to, valid or not, so tests can produce corrupt files.
pub struct ModuleBuilder {
    magic: u32,
    version: u16,
    constants: Vec<u8>,
    constant_count: u32,
    symbols: Vec<u8>,
    symbol_count: u32,
    procedures: Vec<u8>,
    procedure_count: u32,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self {
            magic: MAGIC,
            version: 1,
            constants: Vec::new(),
            constant_count: 0,
            symbols: Vec::new(),
            symbol_count: 0,
            procedures: Vec::new(),
            procedure_count: 0,
        }
    }

    pub fn version(mut self, version: u16) -> Self {
        self.version = version;
        self
    }

    pub fn magic(mut self, magic: u32) -> Self {
        self.magic = magic;
        self
    }

    pub fn int(mut self, value: i64) -> Self {
        self.constants.push(crate::constants::TAG_INT);
        self.constants
            .extend_from_slice(&(value as u64).to_le_bytes());
        self.constant_count += 1;
        self
    }

    pub fn float(mut self, value: f64) -> Self {
        self.constants.push(crate::constants::TAG_FLOAT);
        self.constants
            .extend_from_slice(&value.to_bits().to_le_bytes());
        self.constant_count += 1;
        self
    }

    pub fn string(mut self, value: &str) -> Self {
        self.constants.push(crate::constants::TAG_STRING);
        self.constants
            .extend_from_slice(&(value.len() as u32).to_le_bytes());
        self.constants.extend_from_slice(value.as_bytes());
        self.constant_count += 1;
        self
    }

    pub fn const_ref(mut self, target: u32) -> Self {
        self.constants.push(crate::constants::TAG_REF);
        self.constants.extend_from_slice(&target.to_le_bytes());
        self.constant_count += 1;
        self
    }

    pub fn symbol(mut self, namespace: Namespace, name: &str, kind: SymbolKind, target: u32) -> Self {
        self.symbols.push(namespace.to_byte());
        self.symbols
            .extend_from_slice(&(name.len() as u32).to_le_bytes());
        self.symbols.extend_from_slice(name.as_bytes());
        self.symbols.push(kind.to_byte());
        self.symbols.extend_from_slice(&target.to_le_bytes());
        self.symbol_count += 1;
        self
    }

    pub fn procedure(mut self, arity: u16, local_slots: u16, code: &[u8]) -> Self {
        self.procedures.extend_from_slice(&arity.to_le_bytes());
        self.procedures.extend_from_slice(&local_slots.to_le_bytes());
        self.procedures
            .extend_from_slice(&(code.len() as u32).to_le_bytes());
        self.procedures.extend_from_slice(code);
        self.procedure_count += 1;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.magic.to_le_bytes());
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.procedure_count.to_le_bytes());
        bytes.extend_from_slice(&self.constant_count.to_le_bytes());
        bytes.extend_from_slice(&self.symbol_count.to_le_bytes());
        bytes.extend_from_slice(&self.constants);
        bytes.extend_from_slice(&self.symbols);
        bytes.extend_from_slice(&self.procedures);
        bytes
    }
}

/// Stand-in single-byte return instruction; the loader never decodes it.
pub const RETURN_BYTE: u8 = 0x01;

/// Minimal valid file: one arity-0 procedure exported as "main".
pub fn minimal_main_module() -> Vec<u8> {
    ModuleBuilder::new()
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 0)
        .procedure(0, 1, &[RETURN_BYTE])
        .build()
}

/// A module exercising every constant variant, both namespaces, and an
/// unexported procedure.
pub fn rich_module() -> Vec<u8> {
    ModuleBuilder::new()
        .int(42)
        .float(1.5)
        .string("hello")
        .const_ref(2)
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 0)
        .symbol(Namespace::Data, "greeting", SymbolKind::Data, 2)
        .procedure(0, 1, &[RETURN_BYTE])
        .procedure(2, 3, &[0x02, RETURN_BYTE])
        .build()
}
