use causal::{Chain, ResultExt};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const CAUSE: DemoError = DemoError("cause");
const PARENT: DemoError = DemoError("parent");
const GRANDPARENT: DemoError = DemoError("grandparent");

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
struct DemoError(&'static str);

#[derive(Parser)]
#[command(version, about = "Builds a three level error chain and inspects it", long_about = None)]
struct Cli {
    /// Context attached right above the root cause
    #[arg(long, short, default_value = "something bad happened")]
    message: String,

    /// Log every link of the chain
    #[arg(long, short)]
    verbose: bool,
}

fn generate_cause_error(message: &str) -> Result<(), Chain> {
    Err(Chain::with_message(CAUSE, message))
}

fn generate_parent_error(message: &str) -> Result<(), Chain> {
    generate_cause_error(message).wrap_err(PARENT)
}

fn generate_error(message: &str) -> Result<(), Chain> {
    generate_parent_error(message).wrap_err(GRANDPARENT)
}

fn init_logging(verbose: bool) -> Result<(), String> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let Err(err) = generate_error(&cli.message) else {
        return Err("Expected the demo chain to fail".to_owned());
    };
    println!("{err}");

    for (depth, link) in err.links().enumerate() {
        debug!(depth, %link, "chain link");
    }

    for known in [CAUSE, PARENT, GRANDPARENT] {
        if err.is(&known) {
            println!("{known}");
        }
    }

    info!(root_cause = %err.root_cause(), "inspected chain");
    Ok(())
}
