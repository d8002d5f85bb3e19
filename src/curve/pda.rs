//! Program-derived address derivation
//!
//! Addresses are derived with the ledger's own scheme: seeds, then a bump
//! byte scanned from 255 downward, hashed with the program id until the
//! result lies off the ed25519 curve. The first such bump is canonical.

use solana_sdk::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};
use tracing::trace;

use super::program::SEEDS;
use crate::error::{Error, Result};

/// A derived address and the canonical bump that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DerivedAddress {
    pub address: Pubkey,
    pub bump: u8,
}

/// Derive the canonical program address for `seeds` under `program_id`
///
/// The bump occupies one of the ledger's seed slots, so at most
/// `MAX_SEEDS - 1` caller seeds are accepted.
pub fn derive_address(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<DerivedAddress> {
    validate_seeds(seeds)?;

    let (address, bump) = Pubkey::try_find_program_address(seeds, program_id).ok_or_else(|| {
        Error::DerivationExhausted {
            program_id: program_id.to_string(),
            seeds: seeds.len(),
        }
    })?;

    trace!("Derived {} (bump {}) under {}", address, bump, program_id);
    Ok(DerivedAddress { address, bump })
}

/// Check that `derived` is exactly what `seeds` produce under `program_id`
pub fn verify_address(
    program_id: &Pubkey,
    seeds: &[&[u8]],
    derived: &DerivedAddress,
) -> Result<bool> {
    validate_seeds(seeds)?;

    let bump = [derived.bump];
    let mut with_bump: Vec<&[u8]> = seeds.to_vec();
    with_bump.push(&bump);

    match Pubkey::create_program_address(&with_bump, program_id) {
        Ok(address) => Ok(address == derived.address),
        // Bump lands on-curve: not a valid program address at all
        Err(_) => Ok(false),
    }
}

fn validate_seeds(seeds: &[&[u8]]) -> Result<()> {
    if seeds.len() >= MAX_SEEDS {
        return Err(Error::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed alongside the bump",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }

    if let Some((idx, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(Error::InvalidSeeds(format!(
            "seed {} is {} bytes, max is {}",
            idx,
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    Ok(())
}

/// Curve configuration account for a mint
pub fn curve_configuration(program_id: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::CURVE_CONFIGURATION, mint.as_ref()])
}

/// Bonding curve state account for a mint
pub fn bonding_curve(program_id: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::BONDING_CURVE, mint.as_ref()])
}

/// Native SOL reserve vault for a mint
pub fn sol_vault(program_id: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::SOL_VAULT, mint.as_ref()])
}

/// Allocation record for a wallet's grant of `mint`
pub fn allocation(program_id: &Pubkey, wallet: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(
        program_id,
        &[SEEDS::ALLOCATION, wallet.as_ref(), mint.as_ref()],
    )
}

/// Launchpad signing authority for a launch authority
pub fn launchpad_authority(program_id: &Pubkey, authority: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::LAUNCHPAD, authority.as_ref()])
}

/// Whitelist launch data for a mint
pub fn whitelist_data(program_id: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::WHITELIST_DATA, mint.as_ref()])
}

/// Fair launch data for a mint
pub fn fair_launch_data(program_id: &Pubkey, mint: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::FAIR_LAUNCH_DATA, mint.as_ref()])
}

/// SOL contribution vault owned by a fair launch
pub fn contribution_vault(program_id: &Pubkey, fair_launch: &Pubkey) -> Result<DerivedAddress> {
    derive_address(program_id, &[SEEDS::CONTRIBUTION_VAULT, fair_launch.as_ref()])
}

/// Per-buyer record under a fair launch or whitelist launch
pub fn buyer(program_id: &Pubkey, launch_data: &Pubkey, buyer: &Pubkey) -> Result<DerivedAddress> {
    derive_address(
        program_id,
        &[SEEDS::BUYER, launch_data.as_ref(), buyer.as_ref()],
    )
}

/// Derive associated token account address under the given token program
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Pubkey {
    spl_associated_token_account::get_associated_token_address_with_program_id(
        owner,
        mint,
        token_program,
    )
}

/// Every address a buy or sell against one pool touches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolAddresses {
    pub curve_configuration: Pubkey,
    pub bonding_curve: DerivedAddress,
    pub sol_vault: DerivedAddress,
    /// Bonding curve's token account for the mint
    pub pool_token_account: Pubkey,
    /// User's token account for the mint
    pub user_token_account: Pubkey,
}

impl PoolAddresses {
    pub fn derive(
        program_id: &Pubkey,
        user: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Self> {
        let curve_configuration = curve_configuration(program_id, mint)?.address;
        let bonding_curve = bonding_curve(program_id, mint)?;
        let sol_vault = sol_vault(program_id, mint)?;

        Ok(Self {
            curve_configuration,
            bonding_curve,
            sol_vault,
            pool_token_account: associated_token_address(
                &bonding_curve.address,
                mint,
                token_program,
            ),
            user_token_account: associated_token_address(user, mint, token_program),
        })
    }
}

/// Allocation record plus the token accounts a claim moves tokens between
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationAddresses {
    pub wallet: Pubkey,
    pub allocation: DerivedAddress,
    pub allocation_vault: Pubkey,
    pub wallet_token_account: Pubkey,
}

impl AllocationAddresses {
    pub fn derive(
        program_id: &Pubkey,
        wallet: &Pubkey,
        mint: &Pubkey,
        token_program: &Pubkey,
    ) -> Result<Self> {
        let allocation = allocation(program_id, wallet, mint)?;

        Ok(Self {
            wallet: *wallet,
            allocation,
            allocation_vault: associated_token_address(&allocation.address, mint, token_program),
            wallet_token_account: associated_token_address(wallet, mint, token_program),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairLaunchAddresses {
    pub fair_launch_data: DerivedAddress,
    pub contribution_vault: DerivedAddress,
    pub launchpad_token_account: Pubkey,
}

impl FairLaunchAddresses {
    pub fn derive(program_id: &Pubkey, mint: &Pubkey, token_program: &Pubkey) -> Result<Self> {
        let fair_launch_data = fair_launch_data(program_id, mint)?;
        let contribution_vault = contribution_vault(program_id, &fair_launch_data.address)?;

        Ok(Self {
            fair_launch_data,
            contribution_vault,
            launchpad_token_account: associated_token_address(
                &fair_launch_data.address,
                mint,
                token_program,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::program::{DEFAULT_PROGRAM_ID, TOKEN_2022_PROGRAM_ID};

    #[test]
    fn test_derivation_is_deterministic() {
        let mint = Pubkey::new_unique();
        let first = bonding_curve(&DEFAULT_PROGRAM_ID, &mint).unwrap();
        let second = bonding_curve(&DEFAULT_PROGRAM_ID, &mint).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_derived_address_is_off_curve() {
        let mint = Pubkey::new_unique();
        let derived = sol_vault(&DEFAULT_PROGRAM_ID, &mint).unwrap();
        assert!(!derived.address.is_on_curve());
        assert!(verify_address(
            &DEFAULT_PROGRAM_ID,
            &[SEEDS::SOL_VAULT, mint.as_ref()],
            &derived
        )
        .unwrap());
    }

    #[test]
    fn test_bump_is_canonical() {
        // Every bump above the canonical one must land on-curve
        let mint = Pubkey::new_unique();
        let derived = curve_configuration(&DEFAULT_PROGRAM_ID, &mint).unwrap();

        for bump in (derived.bump as u16 + 1)..=255 {
            let bump = [bump as u8];
            let seeds: [&[u8]; 3] = [SEEDS::CURVE_CONFIGURATION, mint.as_ref(), &bump];
            assert!(Pubkey::create_program_address(&seeds, &DEFAULT_PROGRAM_ID).is_err());
        }
    }

    #[test]
    fn test_matches_ledger_derivation() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let derived = allocation(&DEFAULT_PROGRAM_ID, &wallet, &mint).unwrap();
        let (expected, bump) = Pubkey::find_program_address(
            &[b"allocation", wallet.as_ref(), mint.as_ref()],
            &DEFAULT_PROGRAM_ID,
        );
        assert_eq!(derived.address, expected);
        assert_eq!(derived.bump, bump);
    }

    #[test]
    fn test_launchpad_authority() {
        let authority = Pubkey::new_unique();
        let derived = launchpad_authority(&DEFAULT_PROGRAM_ID, &authority).unwrap();
        let (expected, bump) = Pubkey::find_program_address(
            &[SEEDS::LAUNCHPAD, authority.as_ref()],
            &DEFAULT_PROGRAM_ID,
        );
        assert_eq!(derived.address, expected);
        assert_eq!(derived.bump, bump);
        assert_ne!(
            derived.address,
            launchpad_authority(&DEFAULT_PROGRAM_ID, &Pubkey::new_unique())
                .unwrap()
                .address
        );
    }

    #[test]
    fn test_program_id_changes_address() {
        let mint = Pubkey::new_unique();
        let other_program = Pubkey::new_unique();
        assert_ne!(
            bonding_curve(&DEFAULT_PROGRAM_ID, &mint).unwrap().address,
            bonding_curve(&other_program, &mint).unwrap().address
        );
    }

    #[test]
    fn test_seed_order_matters() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        assert_ne!(
            buyer(&DEFAULT_PROGRAM_ID, &a, &b).unwrap(),
            buyer(&DEFAULT_PROGRAM_ID, &b, &a).unwrap()
        );
    }

    #[test]
    fn test_rejects_oversized_seed() {
        let long_seed = [7u8; 33];
        let err = derive_address(&DEFAULT_PROGRAM_ID, &[&long_seed]).unwrap_err();
        assert!(matches!(err, Error::InvalidSeeds(_)));
    }

    #[test]
    fn test_rejects_too_many_seeds() {
        let seed: &[u8] = b"s";
        let seeds = vec![seed; MAX_SEEDS];
        let err = derive_address(&DEFAULT_PROGRAM_ID, &seeds).unwrap_err();
        assert!(matches!(err, Error::InvalidSeeds(_)));
    }

    #[test]
    fn test_verify_rejects_wrong_bump() {
        let mint = Pubkey::new_unique();
        let derived = bonding_curve(&DEFAULT_PROGRAM_ID, &mint).unwrap();
        let tampered = DerivedAddress {
            address: derived.address,
            bump: derived.bump.wrapping_sub(1),
        };
        assert!(!verify_address(
            &DEFAULT_PROGRAM_ID,
            &[SEEDS::BONDING_CURVE, mint.as_ref()],
            &tampered
        )
        .unwrap());
    }

    #[test]
    fn test_pool_addresses() {
        let user = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let token_program = spl_token::id();
        let pool = PoolAddresses::derive(&DEFAULT_PROGRAM_ID, &user, &mint, &token_program).unwrap();

        assert_eq!(
            pool.pool_token_account,
            spl_associated_token_account::get_associated_token_address(
                &pool.bonding_curve.address,
                &mint
            )
        );
        assert_eq!(
            pool.user_token_account,
            spl_associated_token_account::get_associated_token_address(&user, &mint)
        );
        assert_ne!(pool.curve_configuration, pool.bonding_curve.address);
        assert_ne!(pool.sol_vault.address, pool.bonding_curve.address);
    }

    #[test]
    fn test_token_program_changes_ata() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_ne!(
            associated_token_address(&owner, &mint, &spl_token::id()),
            associated_token_address(&owner, &mint, &TOKEN_2022_PROGRAM_ID)
        );
    }

    #[test]
    fn test_fair_launch_addresses() {
        let mint = Pubkey::new_unique();
        let addrs =
            FairLaunchAddresses::derive(&DEFAULT_PROGRAM_ID, &mint, &spl_token::id()).unwrap();
        assert_eq!(
            addrs.contribution_vault,
            contribution_vault(&DEFAULT_PROGRAM_ID, &addrs.fair_launch_data.address).unwrap()
        );
    }

    #[test]
    fn test_allocation_addresses() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let addrs =
            AllocationAddresses::derive(&DEFAULT_PROGRAM_ID, &wallet, &mint, &spl_token::id())
                .unwrap();
        assert_eq!(addrs.wallet, wallet);
        assert_eq!(
            addrs.allocation_vault,
            associated_token_address(&addrs.allocation.address, &mint, &spl_token::id())
        );
    }
}
