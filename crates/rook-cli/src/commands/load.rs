use std::path::{Path, PathBuf};

use rook_bytecode::{LoadError, Loader, LoaderConfig, Module};

pub struct LoadArgs {
    pub module_path: PathBuf,
    pub verbose: bool,
}

pub fn run(args: LoadArgs) {
    let module = match load_module(&args.module_path, args.verbose) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "loaded {}: {} procedures, {} constants, {} symbols",
        args.module_path.display(),
        module.procedures().len(),
        module.constants().len(),
        module.symbols().len(),
    );
}

/// Load a module from disk, reporting stages on stderr when verbose.
pub(crate) fn load_module(path: &Path, verbose: bool) -> Result<Module, LoadError> {
    let mut loader = Loader::new(LoaderConfig::default());
    if verbose {
        loader = loader.with_progress(|stage| eprintln!("load: {stage}"));
    }
    loader.load_path(path)
}
