use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use truenas_unlock::api::TrueNasClient;
use truenas_unlock::cancel::CancelSignal;
use truenas_unlock::cli::Cli;
use truenas_unlock::config::{find_config_file, Config, EXAMPLE_CONFIG};
use truenas_unlock::logging;
use truenas_unlock::output::{ConsoleSink, OutputSink, UnlockEvent};
use truenas_unlock::scheduler::PollScheduler;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();

    let Some(path) = find_config_file(cli.config.as_deref()) else {
        error!("No configuration file found");
        eprintln!("Config not found. Create config.yaml:\n\n{EXAMPLE_CONFIG}");
        std::process::exit(1);
    };

    let config = Config::from_path(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let config = Arc::new(config);

    let sink = ConsoleSink;
    sink.emit(UnlockEvent::ConfigLoaded { path });

    let client = TrueNasClient::new(config.clone()).context("failed to build HTTP client")?;

    let scheduler = if cli.daemon {
        PollScheduler::daemon(cli.interval())
    } else {
        PollScheduler::once()
    }
    .dry_run(cli.dry_run);

    let cancel = CancelSignal::new();
    if scheduler.handles_interrupt() {
        cancel.cancel_on_ctrl_c();
    }

    let passes = scheduler.run(&config, &client, &sink, &cancel).await;
    info!("Finished after {passes} pass(es)");

    Ok(())
}
