//! launchpad - scripts for the bonding-curve launch program
//!
//! Commands:
//! - `launchpad configure` - write the global configuration
//! - `launchpad nominate-authority <KEY>` / `launchpad accept-authority` - authority handoff
//! - `launchpad launch` - create a token and its bonding curve
//! - `launchpad swap` / `launchpad withdraw` - trade against or drain a curve
//! - `launchpad listen` - wait for program events
//! - `launchpad show-config` / `launchpad show-curve` - read program accounts

use std::{fs, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use launchpad_sdk::{
    accounts::{AmountConfig, ConfigParameters},
    common::{Cluster, LaunchpadConfig},
    constants::trade::listen::DEFAULT_LISTEN_TIMEOUT_SECS,
    streaming::{self, FeedMode, MatchedEvent, ProgramRecord, RecordKind},
    trading::{LaunchParams, SwapDirection, SwapParams},
    LaunchpadClient,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};

#[derive(Parser)]
#[command(name = "launchpad")]
#[command(about = "Drive the bonding-curve launch program")]
struct Cli {
    /// `main` selects mainnet endpoints, anything else devnet
    #[arg(long, env = "ENV", global = true)]
    env: Option<String>,

    /// JSON file with a full client configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, env = "RPC_URL", global = true)]
    rpc_url: Option<String>,

    #[arg(long, env = "WS_URL", global = true)]
    ws_url: Option<String>,

    #[arg(long, env = "PROGRAM_ID", global = true)]
    program_id: Option<Pubkey>,

    /// Payer keypair file
    #[arg(long, env = "KEYPAIR", global = true, default_value = "~/.config/solana/id.json")]
    keypair: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the global configuration, starting from the deployment defaults
    Configure(ConfigOverrides),
    /// Nominate a new authority (current authority only)
    NominateAuthority { new_authority: Pubkey },
    /// Accept a pending nomination (nominee only)
    AcceptAuthority,
    /// Launch a token with a fresh mint
    Launch {
        #[arg(long, default_value_t = 6)]
        decimals: u8,
        #[arg(long, default_value_t = 1_000_000)]
        supply: u64,
        #[arg(long, default_value_t = 1_000_000)]
        reserve_lamports: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        uri: String,
    },
    /// Buy or sell against a bonding curve
    Swap {
        mint: Pubkey,
        amount: u64,
        /// buy | sell
        direction: SwapDirection,
        #[arg(long, default_value_t = 0)]
        min_out: u64,
        /// Unix timestamp; defaults to now + the deadline window
        #[arg(long)]
        deadline: Option<i64>,
    },
    /// Withdraw the reserves of a completed curve
    Withdraw { mint: Pubkey },
    /// Wait for a program event
    Listen {
        /// complete | config | bonding-curve
        #[arg(long, default_value = "complete")]
        kind: RecordKind,
        #[arg(long, default_value_t = DEFAULT_LISTEN_TIMEOUT_SECS)]
        timeout_secs: u64,
        /// Print every match until interrupted
        #[arg(long)]
        forever: bool,
        /// Subscribe to transaction logs instead of program accounts
        #[arg(long)]
        logs: bool,
        /// One JSON object per line
        #[arg(long)]
        json: bool,
    },
    /// Print the global configuration
    ShowConfig,
    /// Print the bonding curve of a mint
    ShowCurve { mint: Pubkey },
}

/// Fields left unset keep the deployment defaults.
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    #[arg(long)]
    pending_authority: Option<Pubkey>,
    #[arg(long)]
    team_wallet: Option<Pubkey>,
    #[arg(long)]
    dev_wallet: Option<Pubkey>,
    /// Percent of supply seeded into each curve
    #[arg(long)]
    init_bonding_curve: Option<f64>,
    #[arg(long)]
    platform_buy_fee: Option<u128>,
    #[arg(long)]
    platform_sell_fee: Option<u128>,
    #[arg(long)]
    trading_fee_bps: Option<u16>,
    #[arg(long)]
    dev_fee_share_bps: Option<u16>,
    #[arg(long)]
    dev_fee_enabled: Option<bool>,
    #[arg(long)]
    curve_limit: Option<u64>,
    /// MIN:MAX (either side may be empty) or a comma-separated list
    #[arg(long)]
    lamport_range: Option<AmountConfig<u64>>,
    #[arg(long)]
    supply_range: Option<AmountConfig<u64>>,
    #[arg(long)]
    decimals_range: Option<AmountConfig<u8>>,
}

impl ConfigOverrides {
    fn apply(self, mut config: ConfigParameters) -> ConfigParameters {
        if let Some(key) = self.pending_authority {
            config.pending_authority = key;
        }
        if let Some(wallet) = self.team_wallet {
            config.team_wallet = wallet;
        }
        if let Some(wallet) = self.dev_wallet {
            config.dev_wallet = wallet;
        }
        if let Some(share) = self.init_bonding_curve {
            config.init_bonding_curve = share;
        }
        if let Some(fee) = self.platform_buy_fee {
            config.platform_buy_fee = fee;
        }
        if let Some(fee) = self.platform_sell_fee {
            config.platform_sell_fee = fee;
        }
        if let Some(bps) = self.trading_fee_bps {
            config.trading_fee_bps = bps;
        }
        if let Some(bps) = self.dev_fee_share_bps {
            config.dev_fee_share_bps = bps;
        }
        if let Some(enabled) = self.dev_fee_enabled {
            config.dev_fee_enabled = enabled;
        }
        if let Some(limit) = self.curve_limit {
            config.curve_limit = limit;
        }
        if let Some(range) = self.lamport_range {
            config.lamport_amount_config = range;
        }
        if let Some(range) = self.supply_range {
            config.token_supply_config = range;
        }
        if let Some(range) = self.decimals_range {
            config.token_decimals_config = range;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let payer = Arc::new(load_keypair(&cli.keypair)?);
    log::info!("payer {} on {} (program {})", payer.pubkey(), config.rpc_url, config.program_id);
    let client = LaunchpadClient::new(payer.clone(), config);

    match cli.command {
        Commands::Configure(overrides) => {
            let new_config = overrides.apply(ConfigParameters::new(payer.pubkey()));
            let signature = client.configure(new_config).await?;
            println!("configure: {signature}");
        }
        Commands::NominateAuthority { new_authority } => {
            let signature = client.nominate_authority(new_authority).await?;
            println!("nominate_authority: {signature}");
        }
        Commands::AcceptAuthority => {
            let signature = client.accept_authority().await?;
            println!("accept_authority: {signature}");
        }
        Commands::Launch { decimals, supply, reserve_lamports, name, symbol, uri } => {
            let params = LaunchParams { decimals, token_supply: supply, reserve_lamports, name, symbol, uri };
            let outcome = client.launch(params).await?;
            println!("launch: {} mint {}", outcome.signature, outcome.mint);
        }
        Commands::Swap { mint, amount, direction, min_out, deadline } => {
            let params = SwapParams { mint, amount, direction, minimum_receive_amount: min_out, deadline };
            let signature = client.swap(params).await?;
            println!("swap: {signature}");
        }
        Commands::Withdraw { mint } => {
            let signature = client.withdraw(mint).await?;
            println!("withdraw: {signature}");
        }
        Commands::Listen { kind, timeout_secs, forever, logs, json } => {
            let mode = if logs { FeedMode::Logs } else { FeedMode::ProgramAccounts };
            let feed = client.feed(mode);
            println!("Listening for {kind} on program {} (Ctrl+C to stop)", client.program_id());
            if forever {
                let seen = streaming::watch(&feed, client.program_id(), kind, ctrl_c(), |event| {
                    print_event(event, json)
                })
                .await?;
                println!("stopped after {seen} event(s)");
            } else {
                let event = client
                    .listen_for(&feed, kind, Duration::from_secs(timeout_secs), ctrl_c())
                    .await?;
                print_event(&event, json);
            }
        }
        Commands::ShowConfig => {
            let config = client.fetch_config().await?;
            println!("{:#}", ProgramRecord::Config(config).to_json());
        }
        Commands::ShowCurve { mint } => {
            let curve = client.fetch_bonding_curve(&mint).await?;
            println!("{:#}", ProgramRecord::BondingCurve(curve).to_json());
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<LaunchpadConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => LaunchpadConfig::for_cluster(Cluster::from_env_value(cli.env.as_deref())),
    };
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(url) = &cli.ws_url {
        config.ws_url = url.clone();
    }
    if let Some(program_id) = cli.program_id {
        config.program_id = program_id;
    }
    Ok(config)
}

fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded = match (path.strip_prefix("~/"), std::env::var("HOME")) {
        (Some(rest), Ok(home)) => format!("{home}/{rest}"),
        _ => path.to_string(),
    };
    read_keypair_file(&expanded).map_err(|e| anyhow!("reading keypair {expanded}: {e}"))
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    println!("Stopping event listener...");
}

fn print_event(event: &MatchedEvent, json: bool) {
    if json {
        let line = serde_json::json!({
            "kind": event.record.kind().to_string(),
            "slot": event.slot,
            "origin": event.origin.to_string(),
            "data": event.record.to_json(),
        });
        println!("{line}");
    } else {
        println!("=== {} Received ===", event.record.kind());
        println!("Event data: {:#}", event.record.to_json());
        println!("Slot: {}", event.slot);
        println!("Origin: {}", event.origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configure_overrides(args: &[&str]) -> ConfigOverrides {
        let mut argv = vec!["launchpad", "configure"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Configure(overrides) => overrides,
            _ => panic!("expected configure"),
        }
    }

    #[test]
    fn test_configure_flags_override_defaults() {
        let authority = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let nominee_arg = nominee.to_string();
        let overrides = configure_overrides(&[
            "--pending-authority",
            &nominee_arg,
            "--init-bonding-curve",
            "25",
            "--platform-sell-fee",
            "3",
            "--dev-fee-enabled",
            "false",
            "--decimals-range",
            ":9",
            "--supply-range",
            "1000,2000",
        ]);

        let config = overrides.apply(ConfigParameters::new(authority));
        assert_eq!(config.pending_authority, nominee);
        assert_eq!(config.init_bonding_curve, 25.0);
        assert_eq!(config.platform_sell_fee, 3);
        assert_eq!(config.platform_buy_fee, 0);
        assert!(!config.dev_fee_enabled);
        assert_eq!(config.token_decimals_config, AmountConfig::Range { min: None, max: Some(9) });
        assert_eq!(config.token_supply_config, AmountConfig::Enum(vec![1000, 2000]));
        assert_eq!(config.team_wallet, authority);
    }

    #[test]
    fn test_configure_rejects_malformed_range() {
        let parsed = Cli::try_parse_from(["launchpad", "configure", "--decimals-range", "6-9"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let authority = Pubkey::new_unique();
        let config = configure_overrides(&[]).apply(ConfigParameters::new(authority));
        assert_eq!(config, ConfigParameters::new(authority));
    }
}
