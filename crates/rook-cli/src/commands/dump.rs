use std::path::PathBuf;

use rook_bytecode::{Constant, Module, SymbolTarget, dump};
use serde::Serialize;

pub struct DumpArgs {
    pub module_path: PathBuf,
    pub verbose: bool,
    pub json: bool,
}

pub fn run(args: DumpArgs) {
    let module = match super::load::load_module(&args.module_path, args.verbose) {
        Ok(module) => module,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if args.json {
        let summary = ModuleSummary::from_module(&module);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", dump(&module));
    }
}

#[derive(Serialize)]
struct ModuleSummary {
    version: u16,
    source: Option<String>,
    constants: Vec<ConstantSummary>,
    symbols: Vec<SymbolSummary>,
    procedures: Vec<ProcedureSummary>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ConstantSummary {
    Int { value: i64 },
    Float { value: f64 },
    Str { value: String },
    Ref { target: u32 },
}

#[derive(Serialize)]
struct SymbolSummary {
    namespace: String,
    name: String,
    kind: String,
    target: TargetSummary,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TargetSummary {
    Procedure { index: u32 },
    Constant { index: u32 },
}

#[derive(Serialize)]
struct ProcedureSummary {
    name: Option<String>,
    arity: u16,
    local_slots: u16,
    code_len: usize,
}

impl ModuleSummary {
    fn from_module(module: &Module) -> Self {
        let constants = module
            .constants()
            .iter()
            .map(|c| match c {
                Constant::Int(v) => ConstantSummary::Int { value: *v },
                Constant::Float(v) => ConstantSummary::Float { value: *v },
                Constant::Str(s) => ConstantSummary::Str {
                    value: s.to_string(),
                },
                Constant::Ref(target) => ConstantSummary::Ref { target: *target },
            })
            .collect();

        let symbols = module
            .symbols()
            .iter()
            .map(|s| SymbolSummary {
                namespace: s.namespace.to_string(),
                name: s.name.clone(),
                kind: s.kind.to_string(),
                target: match s.target {
                    SymbolTarget::Procedure(index) => TargetSummary::Procedure { index },
                    SymbolTarget::Constant(index) => TargetSummary::Constant { index },
                },
            })
            .collect();

        let procedures = module
            .procedures()
            .iter()
            .map(|p| ProcedureSummary {
                name: p.name.clone(),
                arity: p.arity,
                local_slots: p.local_slots,
                code_len: p.code.len(),
            })
            .collect();

        Self {
            version: module.version(),
            source: module.source().map(str::to_owned),
            constants,
            symbols,
            procedures,
        }
    }
}
