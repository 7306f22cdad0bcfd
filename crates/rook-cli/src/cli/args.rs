//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Module file to load (positional, required).
pub fn module_path_arg() -> Arg {
    Arg::new("module_path")
        .value_name("MODULE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Compiled module file (.rkm)")
}

/// Report load stages on stderr (-v/--verbose).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("Report each load stage on stderr")
}

/// Emit JSON instead of the text listing (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Emit a JSON summary instead of the text listing")
}
