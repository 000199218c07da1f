use clap::Parser;
use weather_bucket_stats::cli::{run, Cli};
use weather_bucket_stats::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
