//! `gns-resolve`: a command-line client for the GNS recursive resolver.

mod bootstrap;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use gns_application::{LookupMode, LookupOptions, Resolver};
use gns_domain::config::CliOverrides;
use gns_domain::{TypeList, ZonePublic};
use gns_infrastructure::build_collaborators;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "gns-resolve")]
#[command(version = "0.1.0")]
#[command(about = "Resolves a name against the GNU Name System")]
struct Cli {
    /// Name to resolve, e.g. "www.example"
    name: String,

    /// Record type to request (A, AAAA, TXT, ...); defaults to ANY
    #[arg(short = 't', long)]
    r#type: Option<String>,

    /// Path to the resolver configuration file
    #[arg(short = 'c', long, default_value = "gns.toml")]
    config: PathBuf,

    /// Skip the DHT and only consult the local namecache
    #[arg(long)]
    no_dht: bool,

    /// Override the namecache collaborator's Unix socket path
    #[arg(long)]
    namecache_endpoint: Option<String>,

    /// Override the DHT collaborator's Unix socket path
    #[arg(long)]
    dht_endpoint: Option<String>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        namecache_endpoint: cli.namecache_endpoint.clone(),
        dht_endpoint: cli.dht_endpoint.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(&cli.config, overrides)?;
    bootstrap::init_logging(&config);

    let requested_types = match &cli.r#type {
        Some(t) => TypeList::Only(vec![t.parse().map_err(anyhow::Error::msg)?]),
        None => TypeList::Any,
    };

    let root_zones: HashMap<String, ZonePublic> = config
        .root_zones
        .zones
        .iter()
        .filter_map(|(label, ztld)| ZonePublic::from_ztld(ztld).ok().map(|z| (label.clone(), z)))
        .collect();

    let collaborators = build_collaborators(&config);
    let resolver = Resolver::new(
        collaborators.namecache,
        collaborators.dht,
        collaborators.revocation,
        collaborators.dns,
        root_zones,
        config.dht.replication_level,
    );

    let options = LookupOptions {
        mode: if cli.no_dht {
            LookupMode::NoDht
        } else {
            LookupMode::Default
        },
        demultiplex_everywhere: false,
    };

    let result = resolver
        .resolve(&cli.name, None, requested_types, options, CancellationToken::new())
        .await?;

    if result.is_empty() {
        println!("no records found for {}", cli.name);
    } else {
        for record in &result.records {
            println!("{}\t{}\t{:?}", record.record_type, record.expire, record.data);
        }
    }

    Ok(())
}
