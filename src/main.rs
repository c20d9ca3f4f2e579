mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;

use cli::context::RunContext;
use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    cli::logging::init(args.verbose);

    let result = RunContext::load(args.quiet, args.json, args.config.as_deref()).and_then(|ctx| {
        match &args.command {
            Commands::Encrypt(op) => cli::commands::encrypt::execute(op, &ctx),
            Commands::Decrypt(op) => cli::commands::decrypt::execute(op, &ctx),
            Commands::Algorithms => cli::commands::algorithms::execute(&ctx),
        }
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            cli::output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    }
}
