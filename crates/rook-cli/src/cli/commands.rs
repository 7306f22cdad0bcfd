//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("rook")
        .about("Rook bytecode runtime")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(load_command())
        .subcommand(dump_command())
}

/// Load and validate a module file.
pub fn load_command() -> Command {
    Command::new("load")
        .about("Load and validate a module file")
        .arg(module_path_arg())
        .arg(verbose_arg())
}

/// Print a module listing.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print the contents of a module file")
        .arg(module_path_arg())
        .arg(verbose_arg())
        .arg(json_arg())
}
