//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::dump::DumpArgs;
use crate::commands::load::LoadArgs;

pub struct LoadParams {
    pub module_path: PathBuf,
    pub verbose: bool,
}

impl LoadParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m
                .get_one::<PathBuf>("module_path")
                .cloned()
                .expect("MODULE is required"),
            verbose: m.get_flag("verbose"),
        }
    }
}

impl From<LoadParams> for LoadArgs {
    fn from(p: LoadParams) -> Self {
        Self {
            module_path: p.module_path,
            verbose: p.verbose,
        }
    }
}

pub struct DumpParams {
    pub module_path: PathBuf,
    pub verbose: bool,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            module_path: m
                .get_one::<PathBuf>("module_path")
                .cloned()
                .expect("MODULE is required"),
            verbose: m.get_flag("verbose"),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            module_path: p.module_path,
            verbose: p.verbose,
            json: p.json,
        }
    }
}
