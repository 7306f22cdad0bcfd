//! Staged load pipeline.
//!
//! Stages run strictly forward: Header → Constants → Symbols → Code →
//! Resolve → Assemble. Any stage error aborts the load; no stage is
//! re-entered and no partial module is observable outside the loader.

use std::fmt;
use std::path::Path;

use crate::code;
use crate::cursor::Cursor;
use crate::error::LoadError;
use crate::header::Header;
use crate::interner::StringCache;
use crate::module::Module;
use crate::pool;
use crate::resolve;
use crate::symbols;

/// A pipeline stage, reported to the progress sink before it runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Header,
    Constants,
    Symbols,
    Code,
    Resolve,
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Header => "header",
            Stage::Constants => "constants",
            Stage::Symbols => "symbols",
            Stage::Code => "code",
            Stage::Resolve => "resolve",
            Stage::Assemble => "assemble",
        };
        write!(f, "{name}")
    }
}

/// Loader configuration, fixed for the loader's lifetime.
#[derive(Clone, Copy, Debug)]
pub struct LoaderConfig {
    /// Expected magic constant.
    pub magic: u32,
    /// Lowest accepted format version.
    pub min_version: u16,
    /// Highest accepted format version.
    pub max_version: u16,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            magic: crate::constants::MAGIC,
            min_version: crate::constants::VERSION_MIN,
            max_version: crate::constants::VERSION_MAX,
        }
    }
}

type ProgressSink = Box<dyn Fn(Stage) + Send + Sync>;

/// Drives the load pipeline over an in-memory buffer.
///
/// Loading is synchronous and single-threaded; independent loaders on
/// independent buffers may run concurrently. The only shared state is an
/// optional [`StringCache`], which is internally synchronized.
#[derive(Default)]
pub struct Loader {
    config: LoaderConfig,
    cache: Option<StringCache>,
    progress: Option<ProgressSink>,
}

impl Loader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            cache: None,
            progress: None,
        }
    }

    /// Share a string interning cache across loads.
    pub fn with_cache(mut self, cache: StringCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Install a progress sink, called once per stage in order.
    pub fn with_progress(mut self, sink: impl Fn(Stage) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(sink));
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read a file and load it as a module. IO failures surface verbatim
    /// as [`LoadError::Io`].
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Module, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.load(&bytes, Some(path.to_string_lossy().into_owned()))
    }

    /// Load a module from an in-memory buffer.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Module, LoadError> {
        self.load(bytes, None)
    }

    fn load(&self, bytes: &[u8], source: Option<String>) -> Result<Module, LoadError> {
        let mut cursor = Cursor::new(bytes);

        self.enter(Stage::Header);
        let header = Header::read(&mut cursor, &self.config)?;

        self.enter(Stage::Constants);
        let constants = pool::read_pool(&mut cursor, header.constant_count, self.cache.as_ref())?;

        self.enter(Stage::Symbols);
        let raw_symbols = symbols::read_symbols(&mut cursor, header.symbol_count)?;

        self.enter(Stage::Code);
        let mut code = code::read_code(&mut cursor, header.procedure_count)?;

        self.enter(Stage::Resolve);
        let resolved = resolve::resolve(raw_symbols, &constants, &mut code)?;

        self.enter(Stage::Assemble);
        if !cursor.is_at_end() {
            return Err(LoadError::MalformedHeader {
                detail: format!(
                    "{} trailing bytes after code section",
                    cursor.remaining()
                ),
            });
        }
        Module::assemble(header.version, source, constants, resolved, code)
    }

    fn enter(&self, stage: Stage) {
        if let Some(sink) = &self.progress {
            sink(stage);
        }
    }
}
