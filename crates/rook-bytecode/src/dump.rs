//! Human-readable module listing.
//!
//! Output is deterministic: entries print in index order, and symbol order
//! is file order. Consumed by the CLI `dump` command and snapshot tests.

use std::fmt::Write;

use crate::module::Module;
use crate::pool::Constant;
use crate::resolve::SymbolTarget;

/// Render a loaded module as a text listing.
pub fn dump(module: &Module) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "module version {}", module.version());

    let _ = writeln!(out, "constants ({}):", module.constants().len());
    for (index, constant) in module.constants().iter().enumerate() {
        let _ = match constant {
            Constant::Int(v) => writeln!(out, "  {index}: int {v}"),
            Constant::Float(v) => writeln!(out, "  {index}: float {v}"),
            Constant::Str(s) => writeln!(out, "  {index}: str {s:?}"),
            Constant::Ref(target) => writeln!(out, "  {index}: ref -> {target}"),
        };
    }

    let _ = writeln!(out, "symbols ({}):", module.symbols().len());
    for (index, symbol) in module.symbols().iter().enumerate() {
        let target = match symbol.target {
            SymbolTarget::Procedure(i) => format!("proc {i}"),
            SymbolTarget::Constant(i) => format!("const {i}"),
        };
        let _ = writeln!(
            out,
            "  {index}: {} '{}' ({}) -> {target}",
            symbol.namespace, symbol.name, symbol.kind
        );
    }

    let _ = writeln!(out, "procedures ({}):", module.procedures().len());
    for (index, procedure) in module.procedures().iter().enumerate() {
        let name = procedure.name.as_deref().unwrap_or("<anon>");
        let _ = writeln!(
            out,
            "  {index}: {name} arity {} locals {} code {} bytes",
            procedure.arity,
            procedure.local_slots,
            procedure.code.len()
        );
    }

    out
}
