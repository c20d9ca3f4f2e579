pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

/// Encrypt and decrypt text, files and whole directories.
#[derive(Parser, Debug)]
#[command(name = "encryptz", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors and payloads
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print the result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to alternative config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt text, files or a directory
    Encrypt(OperationArgs),

    /// Decrypt text, files or a directory
    Decrypt(OperationArgs),

    /// List supported algorithms and their envelope formats
    Algorithms,
}

/// Input selection and options shared by `encrypt` and `decrypt`.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["text", "file", "directory"])
))]
pub struct OperationArgs {
    /// Text to encrypt, or base64 produced by `encrypt --text`
    #[arg(short, long)]
    pub text: Option<String>,

    /// File to process. Repeat for several files; a directory is processed recursively
    #[arg(short, long)]
    pub file: Vec<PathBuf>,

    /// Directory to process recursively
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Algorithm: aes, chacha20 or rsa (default from config, else aes)
    #[arg(short, long)]
    pub algorithm: Option<String>,

    /// Password for aes/chacha20. Prompted for when omitted on a terminal
    #[arg(short, long, env = "ENCRYPTZ_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output file, or output directory for directories and multiple files
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
