//! curve-inspect - offline inspection tool for the bonding curve program
//!
//! Derives addresses, decodes raw account bytes and quotes curve prices.
//! Nothing here talks to a cluster; fetch account data with your own tools
//! and pass it in as a file, base64 or base58 string.

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

// Use the library crate
use bonding_curve_client::cli::commands::{self, AccountSource, QuoteSource};
use bonding_curve_client::config::Config;

/// Bonding curve inspection tool
#[derive(Parser)]
#[command(name = "curve-inspect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive every program address for a mint
    Addresses {
        /// Token mint address
        #[arg(long)]
        mint: String,

        /// Trader whose token account to derive
        #[arg(long)]
        user: Option<String>,

        /// Allocation wallet (repeatable)
        #[arg(long = "wallet")]
        wallets: Vec<String>,

        /// Launchpad buyer whose record to derive
        #[arg(long)]
        buyer: Option<String>,

        /// Launch authority whose launchpad signer to derive
        #[arg(long)]
        authority: Option<String>,
    },

    /// Decode raw account data
    #[command(group(ArgGroup::new("source").required(true).args(["file", "base64", "base58"])))]
    Decode {
        /// Expected account kind (detected from the discriminator if omitted)
        #[arg(long)]
        kind: Option<String>,

        /// File holding raw account bytes
        #[arg(long)]
        file: Option<PathBuf>,

        /// Account bytes as base64
        #[arg(long)]
        base64: Option<String>,

        /// Account bytes as base58
        #[arg(long)]
        base58: Option<String>,
    },

    /// Quote buys against a curve
    #[command(group(ArgGroup::new("params").args(["curve", "config_account"]).required(true)))]
    Quote {
        /// Curve type: linear or quadratic
        #[arg(long, requires_all = ["reserve_ratio", "supply"])]
        curve: Option<String>,

        /// Reserve ratio in basis points
        #[arg(long)]
        reserve_ratio: Option<u16>,

        /// Current token supply (smallest units)
        #[arg(long)]
        supply: Option<u64>,

        /// File holding a raw CurveConfiguration account
        #[arg(long, requires = "curve_account")]
        config_account: Option<PathBuf>,

        /// File holding a raw BondingCurve account
        #[arg(long)]
        curve_account: Option<PathBuf>,

        /// Buy amount in token smallest units (repeatable, defaults from config)
        #[arg(long = "amount")]
        amounts: Vec<u64>,
    },

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bonding_curve_client=info".parse()?),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Addresses {
            mint,
            user,
            wallets,
            buyer,
            authority,
        } => commands::addresses(
            &config,
            &mint,
            user.as_deref(),
            &wallets,
            buyer.as_deref(),
            authority.as_deref(),
        ),
        Commands::Decode {
            kind,
            file,
            base64,
            base58,
        } => {
            let source = match (&file, &base64, &base58) {
                (Some(path), _, _) => AccountSource::File(path),
                (None, Some(data), _) => AccountSource::Base64(data),
                (None, None, Some(data)) => AccountSource::Base58(data),
                (None, None, None) => {
                    anyhow::bail!("one of --file, --base64 or --base58 is required")
                }
            };
            commands::decode(&config, kind.as_deref(), source)
        }
        Commands::Quote {
            curve,
            reserve_ratio,
            supply,
            config_account,
            curve_account,
            amounts,
        } => {
            let source = match (&curve, &config_account, &curve_account) {
                (Some(curve), _, _) => QuoteSource::Explicit {
                    curve,
                    reserve_ratio: reserve_ratio.unwrap_or_default(),
                    supply: supply.unwrap_or_default(),
                },
                (None, Some(config_account), Some(curve_account)) => QuoteSource::Accounts {
                    config_account,
                    curve_account,
                },
                _ => anyhow::bail!(
                    "pass --curve/--reserve-ratio/--supply or --config-account/--curve-account"
                ),
            };
            commands::quote(&config, source, &amounts)
        }
        Commands::Config => commands::show_config(&config),
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
