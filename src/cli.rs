use clap::{Parser, Subcommand};
use pixelpolicy::flat::SchemaKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixelpolicy")]
#[command(author, version, about = "Image transformation policy codec tool")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the flat attribute paths available at a depth
    Schema {
        /// Tagged union to describe (transformation, transformation-restricted,
        /// image, shape); the whole policy if omitted
        #[arg(long)]
        kind: Option<SchemaKind>,

        /// Nesting depth (defaults to the configured max depth)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Print only the number of leaf paths
        #[arg(long)]
        count: bool,
    },

    /// Decode a flat attribute bag (JSON object) into a policy document
    DecodeFlat {
        /// Bag file to read
        #[arg(required = true)]
        bag: PathBuf,
    },

    /// Encode a policy document into a flat attribute bag
    EncodeFlat {
        /// Policy document to read
        #[arg(required = true)]
        policy: PathBuf,
    },

    /// Compare two policy documents structurally
    ///
    /// Exits 0 when equivalent, 1 when different, 2 when either document
    /// cannot be decoded.
    Diff {
        #[arg(required = true)]
        left: PathBuf,

        #[arg(required = true)]
        right: PathBuf,
    },

    /// Validate configuration file
    ValidateConfig {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
