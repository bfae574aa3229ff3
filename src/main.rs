use clap::Parser;
use legal_case_explorer::cli::{self, Cli};
use legal_case_explorer::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    cli::run(Cli::parse()).await
}
