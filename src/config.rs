//! Configuration loading and validation
//!
//! Only the inspection binary reads configuration. Library functions take
//! the program id and every other parameter explicitly.

use anyhow::{Context, Result};
use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

use crate::curve::program::{DEFAULT_PROGRAM_ID_STR, TOKEN_2022_PROGRAM_ID};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub program: ProgramConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgramConfig {
    /// Bonding curve program id (base58)
    #[serde(default = "default_program_id")]
    pub program_id: String,

    /// Token program that owns the curve's mints
    #[serde(default)]
    pub token_program: TokenProgram,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: default_program_id(),
            token_program: TokenProgram::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenProgram {
    #[default]
    SplToken,
    #[serde(rename = "token_2022")]
    Token2022,
}

impl TokenProgram {
    pub fn id(&self) -> Pubkey {
        match self {
            TokenProgram::SplToken => spl_token::id(),
            TokenProgram::Token2022 => *TOKEN_2022_PROGRAM_ID,
        }
    }
}

impl std::fmt::Display for TokenProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenProgram::SplToken => write!(f, "spl_token"),
            TokenProgram::Token2022 => write!(f, "token_2022"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    /// Tolerance applied to quoted costs and outputs
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u16,

    /// Buy sizes (token smallest units) quoted when none are given
    #[serde(default = "default_quote_amounts")]
    pub quote_amounts: Vec<u64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            token_decimals: default_token_decimals(),
            slippage_bps: default_slippage_bps(),
            quote_amounts: default_quote_amounts(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix CURVE_)
            .add_source(
                config::Environment::with_prefix("CURVE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("pricing.quote_amounts")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.program_id()?;

        if self.pricing.slippage_bps > 10000 {
            anyhow::bail!("slippage_bps cannot exceed 10000 (100%)");
        }

        // 10^20 no longer fits in a u64
        if self.pricing.token_decimals > 19 {
            anyhow::bail!(
                "token_decimals must be at most 19, got {}",
                self.pricing.token_decimals
            );
        }

        if self.pricing.quote_amounts.is_empty() {
            anyhow::bail!("quote_amounts must not be empty");
        }
        if self.pricing.quote_amounts.contains(&0) {
            anyhow::bail!("quote_amounts must all be positive");
        }

        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program.program_id)
            .with_context(|| format!("Invalid program_id: {}", self.program.program_id))
    }

    pub fn token_program_id(&self) -> Pubkey {
        self.program.token_program.id()
    }

    /// Configuration summary for display
    pub fn summary(&self) -> String {
        format!(
            r#"Configuration:
  Program:
    program_id: {}
    token_program: {} ({})
  Pricing:
    token_decimals: {}
    slippage: {}bps
    quote_amounts: {:?}
"#,
            self.program.program_id,
            self.program.token_program,
            self.token_program_id(),
            self.pricing.token_decimals,
            self.pricing.slippage_bps,
            self.pricing.quote_amounts,
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: ProgramConfig::default(),
            pricing: PricingConfig::default(),
        }
    }
}

// Default value functions
fn default_program_id() -> String {
    DEFAULT_PROGRAM_ID_STR.to_string()
}

fn default_token_decimals() -> u8 {
    9
}

fn default_slippage_bps() -> u16 {
    100
}

fn default_quote_amounts() -> Vec<u64> {
    vec![1_000_000_000, 10_000_000_000, 100_000_000_000]
}
