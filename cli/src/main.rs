mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, sweep};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = commands.to_config()?;
    sweep::sweep(Arc::new(cfg)).await
}
