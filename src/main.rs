//! neocast: translate a decoded source module into a NEO VM image.
//!
//! Usage: `neocast <input> [-o out.avm] [--target 2.9.0] [--strict] [--disasm]
//! [--tokens] [--stats] [--debug-map] [--abi] [-v]`

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use neocast::bytecode::dialect::DEFAULT_TARGET;
use neocast::bytecode::disasm::{print_module, print_stats};
use neocast::driver::{self, SideFiles};
use neocast::frontend::token_dumper::TokenDumper;
use neocast::{CompileOptions, Compiler};

#[derive(Parser, Debug)]
#[command(name = "neocast")]
#[command(about = "Translate Python bytecode modules into NEO VM images")]
struct Args {
    /// Source module (`.json`, anything else is read as postcard)
    input: PathBuf,

    /// Output image; defaults to the input with an `.avm` extension
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Target VM version
    #[arg(long, default_value = DEFAULT_TARGET)]
    target: String,

    /// Entry method, overriding the module's own
    #[arg(long)]
    entry: Option<String>,

    /// Fail if any instruction had to be skipped
    #[arg(long)]
    strict: bool,

    /// Print the disassembled image
    #[arg(long)]
    disasm: bool,

    /// Print every method's token stream with addresses
    #[arg(long)]
    tokens: bool,

    /// Disable colors in --tokens output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Print opcode statistics
    #[arg(long)]
    stats: bool,

    /// Write `<output>.debug.json`
    #[arg(long = "debug-map")]
    debug_map: bool,

    /// Write `<output>.abi.json`
    #[arg(long)]
    abi: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let source = driver::load_module(&args.input)?;

    let compiler = Compiler::new(CompileOptions {
        target: args.target.clone(),
        entry: args.entry.clone(),
        strict: args.strict,
    })?;
    let module = compiler.compile_module(&source)?;

    for warning in &module.warnings {
        eprintln!("warning: {}", warning);
    }
    if module.has_warnings() {
        warn!(count = module.warnings.len(), "image is best-effort");
    }

    let catalog = compiler.dialect().catalog;
    if args.tokens {
        let mut dumper = TokenDumper::new().pretty();
        if args.no_color {
            dumper = dumper.no_color();
        }
        dumper.dump(&module);
    }
    if args.disasm {
        print_module(catalog, &module);
    }
    if args.stats {
        print_stats(catalog, &module);
    }

    let out = args
        .output
        .clone()
        .unwrap_or_else(|| driver::default_output(&args.input));
    let written = driver::write_artifacts(
        &module,
        &out,
        SideFiles {
            debug_map: args.debug_map,
            abi: args.abi,
        },
    )?;

    println!(
        "{} -> {} ({} bytes, {} methods, {})",
        args.input.display(),
        written.image.display(),
        module.image.len(),
        module.methods.len(),
        module.dialect
    );
    Ok(())
}
