use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "dashstore", bin_name = "dashstore", version = get_version())]
#[command(about = "Inspect and edit a local-first dashboard document store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the durable <key>.json files
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Do not read or write the durable tier
    #[arg(long, global = true)]
    pub no_durable: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the document stored under one or more keys
    Get {
        /// Keys to read (e.g. todos dashboard-data)
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,

        /// JSON document to print when a key is not stored
        #[arg(short, long, value_name = "JSON")]
        default: Option<String>,
    },

    /// Replace the document stored under a key
    Set {
        key: String,

        /// JSON document; read from stdin when omitted or "-"
        value: Option<String>,

        /// Skip shape validation for registered keys
        #[arg(long)]
        force: bool,
    },

    /// Remove one or more keys from both tiers
    #[command(alias = "rm")]
    Remove {
        #[arg(required = true, num_args = 1..)]
        keys: Vec<String>,
    },

    /// Remove every key from both tiers
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List stored keys
    #[command(alias = "ls")]
    List,

    /// Check both tiers for corrupt, mismatched or stale documents
    Check {
        /// Repair what can be repaired
        #[arg(long)]
        fix: bool,
    },

    /// Write every document as one JSON object
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Load documents from an export bundle
    Import {
        /// Bundle file, or "-" for stdin
        file: PathBuf,

        /// Skip shape validation for registered keys
        #[arg(long)]
        force: bool,
    },

    /// Print where keys are stored
    Path {
        /// Keys (all stored keys when omitted)
        keys: Vec<String>,
    },

    /// Show the effective configuration
    Config {
        /// Print a commented dashstore.toml instead
        #[arg(long)]
        template: bool,
    },
}
