//! Code section: per-procedure metadata plus raw instruction bytes.
//!
//! Instruction bytes are opaque to the loader. Each procedure's bytes are
//! copied into one shared buffer owned by the module; the procedure keeps a
//! range into it. Individual opcodes are never decoded here.

use std::ops::Range;

use crate::cursor::Cursor;
use crate::error::LoadError;

/// Procedure metadata and its slice of the shared code buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Procedure {
    /// Number of arguments. Argument slots are a prefix of the locals.
    pub arity: u16,
    /// Total local variable slots, including argument slots.
    pub local_slots: u16,
    /// Instruction byte range within the module's code buffer.
    pub code: Range<usize>,
    /// Debug name, attached during resolution from an exporting symbol.
    pub name: Option<String>,
}

/// Output of the code section loader.
#[derive(Debug, Default)]
pub struct CodeSection {
    pub procedures: Vec<Procedure>,
    /// All instruction bytes, one contiguous buffer; procedures slice into it.
    pub buffer: Vec<u8>,
}

/// Decode `count` procedures from the cursor.
pub fn read_code(cursor: &mut Cursor<'_>, count: u32) -> Result<CodeSection, LoadError> {
    let mut section = CodeSection {
        procedures: Vec::with_capacity(count as usize),
        buffer: Vec::new(),
    };

    for index in 0..count {
        let arity = cursor.read_u16()?;
        let local_slots = cursor.read_u16()?;
        if arity > local_slots {
            return Err(LoadError::InvalidArity {
                index,
                arity,
                local_slots,
            });
        }

        let bytes = cursor.read_length_prefixed_bytes()?;
        if bytes.is_empty() {
            // Every procedure must carry at least a return instruction.
            return Err(LoadError::EmptyProcedureBody { index });
        }

        let start = section.buffer.len();
        section.buffer.extend_from_slice(bytes);
        section.procedures.push(Procedure {
            arity,
            local_slots,
            code: start..section.buffer.len(),
            name: None,
        });
    }

    Ok(section)
}
