//! End-to-end tests for the load pipeline.

use std::sync::{Arc, Mutex};

use crate::constants::VERSION_MAX;
use crate::error::LoadError;
use crate::interner::StringCache;
use crate::loader::{Loader, LoaderConfig, Stage};
use crate::module::Module;
use crate::pool::Constant;
use crate::symbols::{Namespace, SymbolKind};
use crate::test_fixtures::{minimal_main_module, rich_module, ModuleBuilder, RETURN_BYTE};

/// Loader that records which stages ran, in order.
fn recording_loader() -> (Loader, Arc<Mutex<Vec<Stage>>>) {
    let stages = Arc::new(Mutex::new(Vec::new()));
    let sink_stages = Arc::clone(&stages);
    let loader = Loader::new(LoaderConfig::default())
        .with_progress(move |stage| sink_stages.lock().unwrap().push(stage));
    (loader, stages)
}

#[test]
fn minimal_main_module_loads() {
    let module = Module::from_bytes(&minimal_main_module()).unwrap();

    assert_eq!(module.procedures().len(), 1);
    assert_eq!(module.constants().len(), 0);
    assert_eq!(module.symbols().len(), 1);

    let (index, main) = module.procedure_by_name("main").unwrap();
    assert_eq!(index, 0);
    assert_eq!(main.arity, 0);
    assert_eq!(main.local_slots, 1);
    assert_eq!(main.name.as_deref(), Some("main"));
    assert_eq!(module.procedure_code(index), &[RETURN_BYTE]);
}

#[test]
fn stages_run_in_order() {
    let (loader, stages) = recording_loader();
    loader.load_bytes(&minimal_main_module()).unwrap();

    assert_eq!(
        *stages.lock().unwrap(),
        vec![
            Stage::Header,
            Stage::Constants,
            Stage::Symbols,
            Stage::Code,
            Stage::Resolve,
            Stage::Assemble,
        ]
    );
}

#[test]
fn unsupported_version_stops_at_header() {
    let bytes = ModuleBuilder::new()
        .version(VERSION_MAX + 1)
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 0)
        .procedure(0, 1, &[RETURN_BYTE])
        .build();

    let (loader, stages) = recording_loader();
    let err = loader.load_bytes(&bytes).unwrap_err();

    assert!(matches!(err, LoadError::UnsupportedVersion { found, .. } if found == VERSION_MAX + 1));
    // Constants/symbols/code must never have been entered.
    assert_eq!(*stages.lock().unwrap(), vec![Stage::Header]);
}

#[test]
fn corrupt_magic_fails_before_anything_else() {
    let mut bytes = minimal_main_module();
    bytes[0] ^= 0xFF;

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, LoadError::BadMagic { .. }));
}

#[test]
fn truncation_at_every_offset_fails_cleanly() {
    let bytes = rich_module();
    for len in 0..bytes.len() {
        let result = Module::from_bytes(&bytes[..len]);
        assert!(result.is_err(), "prefix of {len} bytes must not load");
    }
    // The untruncated file still loads.
    Module::from_bytes(&bytes).unwrap();
}

#[test]
fn duplicate_symbol_rejected() {
    let bytes = ModuleBuilder::new()
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 0)
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 0)
        .procedure(0, 1, &[RETURN_BYTE])
        .build();

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateSymbol { index: 1, .. }));
}

#[test]
fn symbol_target_out_of_range_rejected() {
    let bytes = ModuleBuilder::new()
        .symbol(Namespace::Procedure, "main", SymbolKind::Procedure, 9)
        .procedure(0, 1, &[RETURN_BYTE])
        .build();

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(
        err,
        LoadError::IndexOutOfRange {
            what: "procedure",
            found: 9,
            limit: 1
        }
    ));
}

#[test]
fn round_trip_preserves_module_equivalence() {
    let bytes = rich_module();
    let module = Module::from_bytes(&bytes).unwrap();

    let reencoded = module.to_bytes();
    assert_eq!(reencoded, bytes);

    let reloaded = Module::from_bytes(&reencoded).unwrap();
    assert_eq!(reloaded, module);
}

#[test]
fn trailing_bytes_rejected() {
    let mut bytes = minimal_main_module();
    bytes.push(0xAB);

    let err = Module::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, LoadError::MalformedHeader { .. }));
}

#[test]
fn shared_cache_interns_across_loads() {
    let cache = StringCache::new();
    let loader = Loader::new(LoaderConfig::default()).with_cache(cache.clone());
    let bytes = ModuleBuilder::new().string("shared").build();

    let first = loader.load_bytes(&bytes).unwrap();
    let second = loader.load_bytes(&bytes).unwrap();

    let (Constant::Str(a), Constant::Str(b)) = (&first.constants()[0], &second.constants()[0])
    else {
        panic!("expected string constants");
    };
    assert!(Arc::ptr_eq(a, b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn lookup_of_unknown_symbol_is_unresolved() {
    let module = Module::from_bytes(&minimal_main_module()).unwrap();

    let err = module.symbol(Namespace::Data, "missing").unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnresolvedSymbol {
            namespace: Namespace::Data,
            ..
        }
    ));
    // Same name, wrong namespace: namespaces are distinct.
    assert!(module.symbol(Namespace::Data, "main").is_err());
    assert!(module.symbol(Namespace::Procedure, "main").is_ok());
}

#[test]
fn load_path_reads_file() {
    use std::io::Write;

    let bytes = minimal_main_module();
    let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
    tmpfile.write_all(&bytes).unwrap();
    tmpfile.flush().unwrap();

    let module = Module::from_path(tmpfile.path()).unwrap();
    assert!(module.source().is_some());
    assert!(module.procedure_by_name("main").is_ok());
}

#[test]
fn load_path_surfaces_io_error() {
    let err = Module::from_path("/nonexistent/definitely/missing.rkm").unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn custom_config_overrides_magic_and_versions() {
    let config = LoaderConfig {
        magic: 0xDEAD_BEEF,
        min_version: 3,
        max_version: 4,
    };
    let loader = Loader::new(config);

    let bytes = ModuleBuilder::new()
        .magic(0xDEAD_BEEF)
        .version(3)
        .procedure(0, 0, &[RETURN_BYTE])
        .build();
    loader.load_bytes(&bytes).unwrap();

    // The default magic is now the wrong one.
    let err = loader.load_bytes(&minimal_main_module()).unwrap_err();
    assert!(matches!(err, LoadError::BadMagic { .. }));
}
