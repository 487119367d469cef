// Wing Analyst - terminal entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wing_analyst::app::App;

#[derive(Parser)]
#[command(name = "wing-analyst")]
#[command(about = "L'IA t'aide à choisir ta prochaine voile !", version)]
struct Cli {
    /// Verbose logging (equivalent to RUST_LOG=debug)
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    App::from_env().run().await
}
