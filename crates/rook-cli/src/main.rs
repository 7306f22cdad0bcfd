mod cli;
mod commands;

use cli::{DumpParams, LoadParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("load", m)) => {
            let params = LoadParams::from_matches(m);
            commands::load::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
