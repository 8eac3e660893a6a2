pub mod narrate;
pub mod summary;

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use hoptale_common::config::{Config, Destination, HostingProvider};
use hoptale_common::trace::Trace;
use tracing::info;

#[derive(Parser)]
#[command(name = "hoptale")]
#[command(about = "Tells the story of a traceroute.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Narrate the journey recorded in a trace file
    #[command(alias = "n")]
    Narrate {
        trace: PathBuf,
        #[command(flatten)]
        hosting: HostingArgs,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Summarize the autonomous systems a trace passed through
    #[command(alias = "s")]
    Summary {
        trace: PathBuf,
        #[command(flatten)]
        hosting: HostingArgs,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct HostingArgs {
    /// ASN of the hosting provider in front of the server
    #[arg(long, default_value_t = HostingProvider::HETZNER_ASN)]
    pub hosting_asn: u32,
    /// Display name of the hosting provider
    #[arg(long, default_value = "Hetzner")]
    pub hosting_name: String,
}

#[derive(Args)]
pub struct ServerArgs {
    /// Public IP of the destination server
    #[arg(long)]
    pub server_ip: IpAddr,
    /// Hostname of the destination server
    #[arg(long)]
    pub server_host: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl HostingArgs {
    pub fn provider(&self) -> HostingProvider {
        HostingProvider::new(self.hosting_asn, self.hosting_name.clone())
    }
}

impl ServerArgs {
    pub fn config(&self, hosting: &HostingArgs) -> Config {
        Config::new(
            hosting.provider(),
            Destination::new(self.server_ip, self.server_host.clone()),
        )
    }
}

/// Reads a completed trace from a JSON file.
pub fn load_trace(path: &Path) -> anyhow::Result<Trace> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace file {}", path.display()))?;
    let trace: Trace = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid trace", path.display()))?;

    info!("loaded {} hops from {}", trace.hops.len(), path.display());
    Ok(trace)
}
