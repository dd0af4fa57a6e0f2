use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_POLL_INTERVAL_SECS;

#[derive(Parser, Debug)]
#[command(
    name = "truenas-unlock",
    version,
    about = "Unlock encrypted TrueNAS ZFS datasets"
)]
pub struct Cli {
    /// Config file (YAML, JSON or TOML). Searched for when omitted.
    #[arg(short, long, env = "TRUENAS_UNLOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// List the configured datasets without contacting the appliance.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Keep running, polling every `--interval` seconds.
    #[arg(short, long)]
    pub daemon: bool,

    /// Seconds between passes in daemon mode.
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,
}

impl Cli {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}
