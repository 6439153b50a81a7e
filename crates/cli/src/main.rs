use std::io;

use anyhow::Context;

use stockroom_cli::{App, Prompter};
use stockroom_infra::{FlatFileSource, StockroomConfig};

fn main() -> anyhow::Result<()> {
    let mut config = StockroomConfig::from_env().context("invalid configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_inventory_path(path);
    }

    stockroom_observability::init(&config.logging);
    tracing::debug!(path = %config.inventory_path.display(), "starting");

    let source = FlatFileSource::new(&config.inventory_path).with_malformed_policy(config.on_malformed);
    let prompter = Prompter::new(io::stdin().lock(), io::stdout());

    let mut app = App::open(source, prompter)?;
    app.run().context("terminal session failed")?;
    Ok(())
}
