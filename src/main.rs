mod analysis;
mod batch;
mod cli;
mod cover;
mod prompt;
mod scan;
mod tags;
#[cfg(test)]
mod testutil;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    cli::main()
}
