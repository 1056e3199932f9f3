/// tydec command-line tool: decode typed values out of binary files.
///
/// # Command overview
///
/// ```text
/// tydec <COMMAND> [OPTIONS]
///
/// Commands:
///   read    Decode a sequence of typed fields from a file
///   dump    Hex dump a byte range of a file
///   help    Print help information
///
/// Global options:
///   --log-level <LEVEL>   trace | debug | info | warn | error (default: warn)
///   -h, --help            Print help
///   -V, --version         Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                      |
/// |------|----------------------------------------------|
/// | 0    | Success                                      |
/// | 1    | Error (I/O failure, short read, bad spec...) |
///
/// Decoded output goes to stdout; errors and logs go to stderr.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_dump;
mod cmd_read;
mod field;

// ── CLI root ──────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "tydec", version, about = "Typed binary decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode a sequence of typed fields from a file.
    Read(ReadArgs),
    /// Hex dump a byte range of a file.
    Dump(DumpArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `tydec read`.
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ Flag         │ Values / default                                   │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ --at         │ starting byte offset (default 0)                   │
/// │ --endian     │ little | big | auto (default)                      │
/// │ --signed     │ legacy (default) | resolved                        │
/// │ --max-string │ cap for NUL-terminated strings (none = unbounded)  │
/// │ --json       │ print a JSON array instead of one line per field   │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
///
/// Example: `tydec read header.bin --endian big u32 u16 str:8 time bits:1`
#[derive(clap::Args)]
pub struct ReadArgs {
    /// File to decode.
    pub file: PathBuf,

    /// Field specs, decoded in order (see `field.rs` for the grammar).
    #[arg(required = true)]
    pub fields: Vec<String>,

    /// Byte offset to start decoding at.
    #[arg(long, default_value_t = 0)]
    pub at: u64,

    /// Default byte order: `little`, `big`, or `auto` (host order).
    #[arg(long, default_value = "auto")]
    pub endian: String,

    /// Signed integer byte order rule: `legacy` or `resolved`.
    #[arg(long, default_value = "legacy")]
    pub signed: String,

    /// Maximum length of a NUL-terminated string.
    #[arg(long)]
    pub max_string: Option<usize>,

    /// Emit JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tydec dump`.
///
/// The range is cut out with a decoder slice, so a `--len` that runs past
/// the end of the file is reported as a short read.
#[derive(clap::Args)]
pub struct DumpArgs {
    /// File to dump.
    pub file: PathBuf,

    /// Byte offset to start at.
    #[arg(long, default_value_t = 0)]
    pub at: u64,

    /// Number of bytes to dump (default: everything after `--at`).
    #[arg(long)]
    pub len: Option<usize>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Read(args) => cmd_read::run(&args),
        Commands::Dump(args) => cmd_dump::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
