//! Configuration settings for colhash
//!
//! Defines the CLI arguments, the engine settings derived from them,
//! and their defaults.

use crate::dispatch::{DEFAULT_CHUNK_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// colhash - columnar hashing and geospatial encoding
#[derive(Parser, Debug, Clone)]
#[command(name = "colhash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hash and geo-encode columns of values")]
#[command(long_about = r#"
colhash applies one named operation element-wise to a column of values.

Operations:
  - Digests rendered as hex (sha1, md5, blake3, sha2_*, sha3_*, sha3_shake*)
  - Fast non-cryptographic hashes (wyhash, murmur*, xxhash*, xxh3_*)
  - Name-based UUIDv5 (uuid5_dns, uuid5_url, uuid5_oid, uuid5_x500)
  - Geohash encode/decode/neighbors and H3 cell encoding

Examples:
  colhash run sha2_256 hello_world
  colhash run xxhash32 --seed 42 --input values.txt
  colhash run ghash_encode --length 5 -- "-120.6623,35.3003"
  colhash list
  colhash benchmark --rows 1M
"#)]
pub struct CliArgs {
    /// Number of worker threads (0 = rayon default)
    #[arg(short = 't', long, default_value = "0", value_name = "NUM", global = true)]
    pub threads: usize,

    /// Rows per dispatch chunk (e.g., 64K)
    #[arg(long, default_value = "64K", value_name = "ROWS", global = true)]
    pub chunk_size: String,

    /// Row count at which processing goes parallel (e.g., 16K)
    #[arg(long, default_value = "16K", value_name = "ROWS", global = true)]
    pub parallel_threshold: String,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an operation over a column of values
    #[command(name = "run")]
    Run(RunArgs),

    /// List registered operations and their output types
    #[command(name = "list")]
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Measure throughput of every operation
    #[command(name = "benchmark")]
    Benchmark {
        /// Rows per operation (e.g., 1M)
        #[arg(long, default_value = "1M", value_name = "ROWS")]
        rows: String,
    },
}

/// Arguments of the `run` subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct RunArgs {
    /// Operation name (see `colhash list`)
    #[arg(value_name = "OPERATION")]
    pub operation: String,

    /// Input values; coordinates are written `lon,lat`
    #[arg(value_name = "VALUES")]
    pub values: Vec<String>,

    /// Read values from a file, one per line (`-` for stdin)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Treat values as hex-encoded bytes
    #[arg(long)]
    pub binary: bool,

    /// Seed for seeded hashes
    #[arg(long, value_name = "SEED", conflicts_with = "null_seed")]
    pub seed: Option<u64>,

    /// Pass the seed slot explicitly as null
    #[arg(long)]
    pub null_seed: bool,

    /// Output length / geohash precision / H3 resolution
    #[arg(short = 'l', long, value_name = "N")]
    pub length: Option<i64>,

    /// Input value that stands for null
    #[arg(long, value_name = "TEXT")]
    pub null_marker: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One row per line, `null` for nulls
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Worker threads (0 = rayon global pool)
    pub threads: usize,
    /// Rows per chunk
    pub chunk_size: usize,
    /// Row count at which dispatch goes parallel
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let chunk_size = parse_count(&args.chunk_size)
            .map_err(|e| format!("Invalid chunk size: {}", e))? as usize;
        if chunk_size == 0 {
            return Err("Invalid chunk size: must be positive".to_string());
        }

        let parallel_threshold = parse_count(&args.parallel_threshold)
            .map_err(|e| format!("Invalid parallel threshold: {}", e))?
            as usize;

        Ok(Self {
            threads: args.threads,
            chunk_size,
            parallel_threshold,
        })
    }

    /// Threads that will actually run
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }
}

/// Parse a human-readable count (`1024`, `64K`, `8M`, `1.5G`)
pub fn parse_count(count: &str) -> Result<u64, String> {
    let count = count.trim().to_uppercase();

    if count.is_empty() {
        return Err("Empty count string".to_string());
    }

    let (num_str, multiplier) = if let Some(num) = count.strip_suffix('G') {
        (num, 1024u64 * 1024 * 1024)
    } else if let Some(num) = count.strip_suffix('M') {
        (num, 1024u64 * 1024)
    } else if let Some(num) = count.strip_suffix('K') {
        (num, 1024u64)
    } else {
        (count.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    if num < 0.0 || !num.is_finite() {
        return Err(format!("Invalid number: {}", num_str));
    }

    Ok((num * multiplier as f64) as u64)
}
