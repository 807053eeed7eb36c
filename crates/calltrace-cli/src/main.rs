//! calltrace CLI
//!
//! Command-line front end for the calltrace wrappers

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "calltrace")]
#[command(about = "calltrace - logged and timed function calls", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the demo call `test_func(a, b=b)` through the timer and logger
    Demo(commands::demo::DemoArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo(args) => commands::demo::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
