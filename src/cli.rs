use clap::{Parser, Subcommand};
use hls_edge_manifest::PrimaryOrder;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hls-edge")]
#[command(author, version, about = "Device-aware HLS master playlist proxy")]
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
    /// Start the edge proxy
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Origin base URL (overrides config)
        #[arg(long)]
        origin: Option<String>,
    },

    /// Rewrite a local master playlist and print it
    Rewrite {
        /// Playlist file to rewrite
        #[arg(required = true)]
        file: PathBuf,

        /// Screen width of the simulated device
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Screen height of the simulated device
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Simulate a desktop browser
        #[arg(long)]
        desktop: bool,

        /// Operating system name (e.g. iOS, Android)
        #[arg(long)]
        os: Option<String>,

        /// Major OS version
        #[arg(long)]
        os_version: Option<u32>,

        /// Device release year
        #[arg(long)]
        release_year: Option<u32>,

        /// Use this order instead of deciding from the device (highest, lowest, middle, capped)
        #[arg(long)]
        order: Option<PrimaryOrder>,

        /// Drop variants larger than this dimension (only with --order)
        #[arg(long, requires = "order")]
        cap: Option<u32>,
    },

    /// Look up a user agent with the configured device service
    Resolve {
        /// User-agent string to classify
        user_agent: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
