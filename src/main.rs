//! Cookbook CLI: recipe registry and recursive summary server.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cookbook",
    version,
    about = "Recipe and ingredient registry with recursive cook-time and ingredient resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: cookbook::cli::Commands,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cookbook::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
