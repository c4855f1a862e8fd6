//! ordkey CLI
//!
//! Command-line tools for building and inspecting order-preserving keys.
//!
//! # Commands
//!
//! - `encode` - Build the encoded key for a tuple of values
//! - `decode` - Decode an encoded key back into its tuple
//! - `successor` - Compute the least greater key
//! - `range` - Describe a scan range over encoded keys

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// ordkey command-line key tools.
#[derive(Parser)]
#[command(name = "ordkey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Key schema as `name:type[?],...` (key columns first)
    #[arg(global = true, short, long)]
    schema: Option<String>,

    /// Number of leading key columns (defaults to all columns)
    #[arg(global = true, short, long)]
    key_columns: Option<usize>,

    /// Cap on decode scratch memory in bytes
    #[arg(global = true, long)]
    arena_limit: Option<usize>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the encoded key for a tuple of values
    Encode {
        /// One literal per leading key column (binary as 0x-prefixed hex)
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Decode an encoded key (hex) back into its tuple
    Decode {
        /// Encoded key as hex
        hex: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compute the least greater key of an encoded key (hex)
    Successor {
        /// Encoded key as hex
        hex: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Describe a scan range over encoded keys
    Range {
        /// Inclusive lower bound, one literal per leading key column
        #[arg(short, long, num_args = 1.., allow_negative_numbers = true)]
        lower: Vec<String>,

        /// Inclusive upper bound, one literal per leading key column
        #[arg(short, long, num_args = 1.., allow_negative_numbers = true)]
        upper: Vec<String>,

        /// Treat the lower bound as exclusive (scan from its successor)
        #[arg(short, long)]
        exclusive_lower: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = commands::KeyOptions {
        schema: cli.schema,
        key_columns: cli.key_columns,
        arena_limit: cli.arena_limit,
    };

    match cli.command {
        Commands::Encode { values, format } => {
            commands::encode::run(&options, &values, &format)?;
        }
        Commands::Decode { hex, format } => {
            commands::decode::run(&options, &hex, &format)?;
        }
        Commands::Successor { hex, format } => {
            commands::successor::run(&options, &hex, &format)?;
        }
        Commands::Range {
            lower,
            upper,
            exclusive_lower,
            format,
        } => {
            commands::range::run(&options, &lower, &upper, exclusive_lower, &format)?;
        }
        Commands::Version => {
            println!("ordkey CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("ordkey core v{}", ordkey_core::VERSION);
        }
    }

    Ok(())
}
