//! Poolhand CLI - provision cloud VMs and register them as pipeline agents

use clap::Parser;

use poolhand::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
