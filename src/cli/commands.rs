//! CLI command implementations

use anyhow::{Context, Result};
use base64::Engine;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::config::Config;
use crate::curve::accounts::{
    decode_account, decode_any, AccountRecord, BondingCurveState, BondingCurveType,
    CurveConfiguration, ProgramAccount,
};
use crate::curve::allocation::Allocation;
use crate::curve::fees::{effective_fee, split_fee};
use crate::curve::launchpad::FairLaunchData;
use crate::curve::pda::{self, AllocationAddresses, FairLaunchAddresses, PoolAddresses};
use crate::curve::price::{
    lamports_to_sol, max_cost_with_slippage, tokens_to_human, CurveParams,
};
use crate::curve::program::AccountKind;

/// Where raw account bytes come from
pub enum AccountSource<'a> {
    File(&'a Path),
    Base64(&'a str),
    /// RPC `base58` encoding, only served for small accounts
    Base58(&'a str),
}

/// Where curve parameters and supply come from for a quote
pub enum QuoteSource<'a> {
    Explicit {
        curve: &'a str,
        reserve_ratio: u16,
        supply: u64,
    },
    Accounts {
        config_account: &'a Path,
        curve_account: &'a Path,
    },
}

fn parse_pubkey(value: &str, what: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).with_context(|| format!("Invalid {} address: {}", what, value))
}

fn read_account_bytes(source: &AccountSource<'_>) -> Result<Vec<u8>> {
    match source {
        AccountSource::File(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read account file {}", path.display())),
        AccountSource::Base64(data) => base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .context("Account data is not valid base64"),
        AccountSource::Base58(data) => bs58::decode(data.trim())
            .into_vec()
            .context("Account data is not valid base58"),
    }
}

/// Print every address derived for a mint as JSON
pub fn addresses(
    config: &Config,
    mint: &str,
    user: Option<&str>,
    wallets: &[String],
    buyer: Option<&str>,
    authority: Option<&str>,
) -> Result<()> {
    let program_id = config.program_id()?;
    let token_program = config.token_program_id();
    let mint = parse_pubkey(mint, "mint")?;

    let mut output = json!({
        "program_id": program_id.to_string(),
        "token_program": token_program.to_string(),
        "mint": mint.to_string(),
    });

    let curve_configuration = pda::curve_configuration(&program_id, &mint)?;
    let bonding_curve = pda::bonding_curve(&program_id, &mint)?;
    let sol_vault = pda::sol_vault(&program_id, &mint)?;
    output["pool"] = json!({
        "curve_configuration": curve_configuration.address.to_string(),
        "curve_configuration_bump": curve_configuration.bump,
        "bonding_curve": bonding_curve.address.to_string(),
        "bonding_curve_bump": bonding_curve.bump,
        "sol_vault": sol_vault.address.to_string(),
        "sol_vault_bump": sol_vault.bump,
        "pool_token_account": pda::associated_token_address(
            &bonding_curve.address,
            &mint,
            &token_program,
        )
        .to_string(),
    });

    if let Some(user) = user {
        let user = parse_pubkey(user, "user")?;
        let pool = PoolAddresses::derive(&program_id, &user, &mint, &token_program)?;
        output["pool"]["user_token_account"] = json!(pool.user_token_account.to_string());
    }

    let launch = FairLaunchAddresses::derive(&program_id, &mint, &token_program)?;
    let whitelist = pda::whitelist_data(&program_id, &mint)?;
    output["launchpad"] = json!({
        "fair_launch_data": launch.fair_launch_data.address.to_string(),
        "contribution_vault": launch.contribution_vault.address.to_string(),
        "launchpad_token_account": launch.launchpad_token_account.to_string(),
        "whitelist_data": whitelist.address.to_string(),
    });

    if let Some(buyer) = buyer {
        let buyer = parse_pubkey(buyer, "buyer")?;
        output["launchpad"]["fair_launch_buyer"] = json!(
            pda::buyer(&program_id, &launch.fair_launch_data.address, &buyer)?
                .address
                .to_string()
        );
        output["launchpad"]["whitelist_buyer"] =
            json!(pda::buyer(&program_id, &whitelist.address, &buyer)?.address.to_string());
    }

    if let Some(authority) = authority {
        let authority = parse_pubkey(authority, "authority")?;
        let derived = pda::launchpad_authority(&program_id, &authority)?;
        output["launchpad"]["launchpad_authority"] = json!(derived.address.to_string());
        output["launchpad"]["launchpad_authority_bump"] = json!(derived.bump);
    }

    let mut allocations = Vec::with_capacity(wallets.len());
    for wallet in wallets {
        let wallet = parse_pubkey(wallet, "wallet")?;
        let derived = AllocationAddresses::derive(&program_id, &wallet, &mint, &token_program)?;
        allocations.push(json!({
            "wallet": derived.wallet.to_string(),
            "allocation": derived.allocation.address.to_string(),
            "allocation_bump": derived.allocation.bump,
            "allocation_vault": derived.allocation_vault.to_string(),
            "wallet_token_account": derived.wallet_token_account.to_string(),
        }));
    }
    if !allocations.is_empty() {
        output["allocations"] = json!(allocations);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Decode one account and print it with its derived fields
pub fn decode(config: &Config, kind: Option<&str>, source: AccountSource<'_>) -> Result<()> {
    let data = read_account_bytes(&source)?;
    debug!(len = data.len(), "Read account data");

    let account = match kind {
        Some(kind) => {
            let kind = AccountKind::from_str(kind)?;
            decode_account(&data, kind)?
        }
        None => decode_any(&data)?,
    };

    println!("\n=== {} ({} bytes) ===\n", account.kind(), data.len());
    let now = chrono::Utc::now().timestamp();

    match &account {
        ProgramAccount::CurveConfiguration(curve_config) => {
            println!("{:#?}", curve_config);
            print_configuration_summary(curve_config);
        }
        ProgramAccount::BondingCurve(curve) => {
            println!("{:#?}", curve);
            let program_id = config.program_id()?;
            println!("\nBump matches derivation: {}", curve.verify_bump(&program_id)?);
        }
        ProgramAccount::Allocation(allocation) => {
            println!("{:#?}", allocation);
            print_allocation_summary(allocation, now)?;
        }
        ProgramAccount::FairLaunch(launch) => {
            println!("{:#?}", launch);
            print_fair_launch_summary(launch, now)?;
        }
        ProgramAccount::Whitelist(list) => {
            println!("{:#?}", list);
            println!("\nWhitelisted: {}", list.whitelisted_users.len());
            println!("Buyers: {}", list.buyers.len());
            println!("Remaining tokens: {}", list.remaining_tokens());
            println!("Sale active: {}", list.is_active(now));
            println!("Whitelist open: {}", list.is_whitelist_open(now));
        }
        ProgramAccount::Buyer(buyer) => {
            println!("{:#?}", buyer);
        }
    }

    Ok(())
}

fn print_configuration_summary(config: &CurveConfiguration) {
    let total_shares = config.total_fee_shares();
    if total_shares != 10_000 {
        warn!(
            total_shares,
            "Fee recipient shares do not sum to 10000 basis points"
        );
    }

    println!("\nCurve: {} (reserve ratio {} bps)", config.bonding_curve_type, config.reserve_ratio);
    println!(
        "Target liquidity: {} SOL",
        lamports_to_sol(config.target_liquidity)
    );
    println!(
        "Fees: {} bps ({})",
        config.fee_percentage,
        if config.fees_enabled { "enabled" } else { "disabled" }
    );
    println!("Fee shares: {} / 10000 bps", total_shares);
}

fn print_allocation_summary(allocation: &Allocation, now: i64) -> Result<()> {
    println!("\nUnclaimed: {}", allocation.unclaimed_tokens()?);
    match allocation.claim_progress_pct() {
        Ok(pct) => println!("Claimed: {:.2}%", pct.to_f64()),
        Err(e) => println!("Claimed: n/a ({})", e),
    }
    println!("Fully claimed: {}", allocation.is_fully_claimed());

    if let Some(vesting) = &allocation.vesting {
        let fmt_time = |t: Option<chrono::DateTime<chrono::Utc>>| {
            t.map(|t| t.to_rfc3339()).unwrap_or_else(|| "out of range".to_string())
        };
        println!("Cliff ends: {}", fmt_time(vesting.cliff_end_datetime()));
        println!("Vesting ends: {}", fmt_time(vesting.vesting_end_datetime()));
        println!(
            "Vested now: {}",
            vesting.vested_amount(allocation.total_tokens, now)?
        );
    }
    println!("Claimable now: {}", allocation.claimable_at(now)?);
    Ok(())
}

fn print_fair_launch_summary(launch: &FairLaunchData, now: i64) -> Result<()> {
    println!(
        "\nRaised: {} / {} SOL (soft cap {} SOL)",
        lamports_to_sol(launch.total_raised),
        lamports_to_sol(launch.hard_cap),
        lamports_to_sol(launch.soft_cap)
    );
    println!("Accepting contributions: {}", launch.is_active(now));
    println!("Distribution allowed: {}", launch.can_distribute(now)?);
    println!("Refunds allowed: {}", launch.can_refund(now));
    Ok(())
}

fn read_record<T: AccountRecord>(path: &Path) -> Result<T> {
    let data = read_account_bytes(&AccountSource::File(path))?;
    T::decode(&data).with_context(|| format!("Failed to decode {}", path.display()))
}

/// Quote buys against a curve
pub fn quote(config: &Config, source: QuoteSource<'_>, amounts: &[u64]) -> Result<()> {
    let amounts = if amounts.is_empty() {
        config.pricing.quote_amounts.as_slice()
    } else {
        amounts
    };

    let (params, supply, curve_config) = match source {
        QuoteSource::Explicit {
            curve,
            reserve_ratio,
            supply,
        } => {
            let curve_type = BondingCurveType::from_str(curve)?;
            (CurveParams::new(curve_type, reserve_ratio)?, supply, None)
        }
        QuoteSource::Accounts {
            config_account,
            curve_account,
        } => {
            let curve_config: CurveConfiguration = read_record(config_account)?;
            let curve: BondingCurveState = read_record(curve_account)?;
            println!(
                "Liquidity progress: {:.2}%",
                curve.liquidity_progress(&curve_config)?.to_f64() * 100.0
            );
            (curve_config.curve_params()?, curve.total_supply, Some(curve_config))
        }
    };

    let decimals = config.pricing.token_decimals;
    println!(
        "\n=== QUOTES ({} curve, r = {} bps) ===\n",
        params.curve_type(),
        params.reserve_ratio()
    );
    println!("Supply: {} ({} tokens)", supply, tokens_to_human(supply, decimals));
    println!("Spot price: {}", params.price(supply)?);
    println!("Next price: {}", params.next_price(supply)?);
    println!("Market cap: {}", params.market_cap(supply)?);

    for &amount in amounts {
        println!("\nBuy {} ({} tokens):", amount, tokens_to_human(amount, decimals));
        let quote = match params.quote_buy(supply, amount) {
            Ok(quote) => quote,
            Err(e) => {
                println!("  unavailable: {}", e);
                continue;
            }
        };

        let cost = quote.cost_lamports()?;
        println!("  Cost: {} lamports ({} SOL)", cost, lamports_to_sol(cost));
        println!("  Average price: {}", quote.average_price);
        println!("  Price impact: {:.4}%", quote.price_impact_pct.to_f64());
        println!("  Price after: {}", quote.price_after);
        println!(
            "  Max cost at {}bps slippage: {} lamports",
            config.pricing.slippage_bps,
            max_cost_with_slippage(cost, config.pricing.slippage_bps)?
        );

        if let Some(curve_config) = &curve_config {
            let fee = effective_fee(curve_config, cost)?;
            println!("  Fee: {} lamports", fee);
            if curve_config.total_fee_shares() == 10_000 {
                for split in split_fee(curve_config, fee)? {
                    println!("    {} ({} bps): {}", split.address, split.share, split.amount);
                }
            }
        }
    }

    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.summary());
    Ok(())
}
