mod outline;
mod tokens;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fanls",
    version,
    about = "A language server for the Fantom programming language",
    long_about = "fanls provides syntax highlighting, code outline, hover documentation, \
                  completion, formatting, and linting for Fantom source files over the \
                  Language Server Protocol. The tokens and outline subcommands expose the \
                  same pipeline on a single file for inspection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the Language Server Protocol server on stdio
    Lsp,
    /// Tokenize a Fantom source file and print its semantic tokens
    Tokens {
        /// Path to the .fan file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the code outline of a Fantom source file
    Outline {
        /// Path to the .fan file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // The LSP owns stdout for the protocol, so its logs go to files only.
    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let _guard = fanls_core::logging::init_logging(component);

    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Lsp => {
            rt.block_on(fanls_lsp::run_server());
            Ok(())
        }
        Commands::Tokens { file } => tokens::run(file),
        Commands::Outline { file } => outline::run(file),
    }
}
