//! Rook bytecode container format and module loader.
//!
//! Decodes an untrusted `.rkm` module file into a fully resolved, immutable
//! [`Module`] the VM can execute without further checking. The pipeline runs
//! strictly forward over an in-memory buffer:
//!
//! ```text
//! Cursor → Header → {Constants, Symbols} → Code → Resolve → Assemble
//! ```
//!
//! On any validation failure the partially built module is discarded in its
//! entirety; callers receive either a complete, internally consistent
//! [`Module`] or a [`LoadError`], never an intermediate state.
//!
//! # Example
//!
//! ```no_run
//! use rook_bytecode::Module;
//!
//! let module = Module::from_path("app.rkm")?;
//! let (index, main) = module.procedure_by_name("main")?;
//! assert_eq!(main.arity, 0);
//! let code = module.procedure_code(index);
//! # Ok::<(), rook_bytecode::LoadError>(())
//! ```

pub mod code;
pub mod constants;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod header;
pub mod interner;
pub mod loader;
pub mod module;
pub mod pool;
pub mod resolve;
pub mod symbols;

// Re-export commonly used items at crate root
pub use code::Procedure;
pub use constants::{MAGIC, VERSION_MAX, VERSION_MIN};
pub use cursor::Cursor;
pub use dump::dump;
pub use error::LoadError;
pub use header::Header;
pub use interner::StringCache;
pub use loader::{Loader, LoaderConfig, Stage};
pub use module::Module;
pub use pool::Constant;
pub use resolve::{Symbol, SymbolTarget};
pub use symbols::{Namespace, RawSymbol, SymbolKind};

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
mod loader_tests;
