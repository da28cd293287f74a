//! colhash CLI - Columnar Hashing and Geospatial Encoding
//!
//! Runs one registered operation over values given on the command line,
//! in a file, or on stdin.

use clap::Parser;
use colhash::config::{parse_count, CliArgs, Commands, EngineConfig, OutputFormat, RunArgs};
use colhash::error::{ColHashError, Result};
use colhash::input::{self, InputOptions};
use colhash::registry::{Kwargs, OperationRegistry};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Initialize logging; RUST_LOG wins over -v
    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = EngineConfig::from_cli(&args).map_err(ColHashError::Config)?;
    let registry = OperationRegistry::new(&config)?;

    match &args.command {
        Commands::Run(run_args) => cmd_run(&registry, run_args),
        Commands::List { format } => cmd_list(&registry, *format),
        Commands::Benchmark { rows } => cmd_benchmark(&registry, &config, rows),
    }
}

fn cmd_run(registry: &OperationRegistry, args: &RunArgs) -> Result<()> {
    let kwargs = Kwargs {
        seed: if args.null_seed {
            Some(None)
        } else {
            args.seed.map(Some)
        },
        length: args.length.map(Some),
    };

    let plan = registry.plan(&args.operation, &kwargs)?;

    let lines = input::read_values(&args.values, args.input.as_deref())?;
    let options = InputOptions {
        binary: args.binary,
        null_marker: args.null_marker.clone(),
    };
    let column = input::build_column(plan.operation(), &lines, &options)?;

    let output = plan
        .execute(&[column])
        .map_err(|e| e.with_context(args.operation.as_str()))?;

    let rendered = input::render(&output, args.format)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_list(registry: &OperationRegistry, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let operations: Vec<_> = registry
                .operations()
                .map(|(name, op)| {
                    serde_json::json!({
                        "name": name,
                        "input": op.input_types(),
                        "output": op.output_type(),
                        "seed": op.takes_seed(),
                        "length": op.takes_length(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&operations)?);
        }
        OutputFormat::Text => {
            println!("{:<18} {:<14} {:<10} Parameters", "Operation", "Input", "Output");
            for (name, op) in registry.operations() {
                let input = op
                    .input_types()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("|");
                let params = match (op.takes_seed(), op.takes_length()) {
                    (true, _) => "seed",
                    (_, true) => "length",
                    _ => "-",
                };
                println!(
                    "{:<18} {:<14} {:<10} {}",
                    name,
                    input,
                    op.output_type().to_string(),
                    params
                );
            }
        }
    }

    Ok(())
}

fn cmd_benchmark(registry: &OperationRegistry, config: &EngineConfig, rows: &str) -> Result<()> {
    let rows = parse_count(rows).map_err(ColHashError::Config)? as usize;

    println!("=== colhash Benchmark ===");
    println!("Rows:    {}", rows);
    println!("Threads: {}\n", config.effective_threads());

    let results = registry.benchmark(rows)?;

    println!("{:<18} {:>12} {:>16}", "Operation", "Duration", "Rows/s");
    for result in &results {
        println!(
            "{:<18} {:>12.2?} {:>16.0}",
            result.operation, result.duration, result.rows_per_sec
        );
    }

    Ok(())
}
