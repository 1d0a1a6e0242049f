//! Global configuration account of the launch program
//!
//! The layout mirrors the on-chain `Config` account byte for byte: an 8-byte
//! Anchor discriminator followed by the borsh encoding of [`ConfigParameters`].
//!
//! # Fields
//!
//! - `authority`: admin allowed to reconfigure the program
//! - `pending_authority`: nominee of a two-step authority handoff
//! - `team_wallet` / `dev_wallet`: fee recipients
//! - `init_bonding_curve`: share of supply (percent) seeded into the curve
//! - `platform_buy_fee` / `platform_sell_fee`: platform fee percentages
//! - `trading_fee_bps` / `dev_fee_share_bps` / `dev_fee_enabled`: trading fee split
//! - `curve_limit`: lamports that complete a bonding curve
//! - `lamport_amount_config` / `token_supply_config` / `token_decimals_config`:
//!   constraints applied to future launches

use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::launchpad::{
        discriminators::CONFIG_ACCOUNT,
        limits::{
            MAX_BASIS_POINTS, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_TOKEN_DECIMALS,
            MAX_URI_LENGTH,
        },
    },
    error::{ClientError, ClientResult},
    trading::core::params::LaunchParams,
};

/// Constraint on an amount accepted by the program.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum AmountConfig<T> {
    Range { min: Option<T>, max: Option<T> },
    Enum(Vec<T>),
}

impl<T> AmountConfig<T>
where
    T: PartialOrd + Copy + Debug + Display,
{
    pub fn range(min: T, max: T) -> Self {
        Self::Range { min: Some(min), max: Some(max) }
    }

    /// Checks the constraint itself: `min <= max` and a non-empty option list.
    pub fn check_well_formed(&self, field: &str) -> ClientResult<()> {
        match self {
            Self::Range { min: Some(min), max: Some(max) } if min > max => {
                Err(ClientError::validation(format!("{field}: min {min} is greater than max {max}")))
            }
            Self::Enum(options) if options.is_empty() => {
                Err(ClientError::validation(format!("{field}: option list is empty")))
            }
            _ => Ok(()),
        }
    }

    /// Checks a value against the constraint, the same way the program does.
    pub fn validate(&self, field: &str, value: T) -> ClientResult<()> {
        match self {
            Self::Range { min, max } => {
                if let Some(min) = min {
                    if value < *min {
                        return Err(ClientError::validation(format!(
                            "{field} {value} too small, expected at least {min}"
                        )));
                    }
                }
                if let Some(max) = max {
                    if value > *max {
                        return Err(ClientError::validation(format!(
                            "{field} {value} too large, expected at most {max}"
                        )));
                    }
                }
                Ok(())
            }
            Self::Enum(options) => {
                if options.contains(&value) {
                    Ok(())
                } else {
                    Err(ClientError::validation(format!(
                        "invalid {field} {value}, expected one of: {options:?}"
                    )))
                }
            }
        }
    }

    /// Largest value the constraint can admit, if bounded.
    pub fn upper_bound(&self) -> Option<T> {
        match self {
            Self::Range { max, .. } => *max,
            Self::Enum(options) => {
                options.iter().copied().reduce(|a, b| if a >= b { a } else { b })
            }
        }
    }
}

/// `MIN:MAX` (either bound may be empty) or a comma-separated option list.
impl<T> FromStr for AmountConfig<T>
where
    T: FromStr,
    T::Err: Display,
{
    type Err = ClientError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parse = |value: &str| {
            value
                .trim()
                .parse::<T>()
                .map_err(|e| ClientError::validation(format!("amount `{value}` in `{raw}`: {e}")))
        };
        let bound = |value: &str| {
            if value.trim().is_empty() {
                Ok(None)
            } else {
                parse(value).map(Some)
            }
        };

        if let Some((min, max)) = raw.split_once(':') {
            return Ok(Self::Range { min: bound(min)?, max: bound(max)? });
        }
        if raw.trim().is_empty() {
            return Err(ClientError::validation("empty amount constraint"));
        }
        let options = raw.split(',').map(&parse).collect::<ClientResult<Vec<_>>>()?;
        Ok(Self::Enum(options))
    }
}

/// Represents the global configuration record of the launch program
#[derive(Debug, Clone, PartialEq, BorshSerialize, BorshDeserialize)]
pub struct ConfigParameters {
    pub authority: Pubkey,
    /// `Pubkey::default()` (or the authority itself) when no handoff is pending
    pub pending_authority: Pubkey,
    pub team_wallet: Pubkey,
    pub dev_wallet: Pubkey,
    pub init_bonding_curve: f64,
    pub platform_buy_fee: u128,
    pub platform_sell_fee: u128,
    pub trading_fee_bps: u16,
    pub dev_fee_share_bps: u16,
    pub dev_fee_enabled: bool,
    pub curve_limit: u64,
    pub lamport_amount_config: AmountConfig<u64>,
    pub token_supply_config: AmountConfig<u64>,
    pub token_decimals_config: AmountConfig<u8>,
}

impl ConfigParameters {
    /// Configuration used by the deployment scripts: every wallet points at
    /// `authority`, 10% of supply seeds the curve, 1% trading fee split 50/50
    /// with the dev wallet.
    pub fn new(authority: Pubkey) -> Self {
        Self {
            authority,
            pending_authority: authority,
            team_wallet: authority,
            dev_wallet: authority,
            init_bonding_curve: 10.0,
            platform_buy_fee: 0,
            platform_sell_fee: 0,
            trading_fee_bps: 100,
            dev_fee_share_bps: 5_000,
            dev_fee_enabled: true,
            curve_limit: 100,
            lamport_amount_config: AmountConfig::range(1_000_000, 1_000_000_000),
            token_supply_config: AmountConfig::range(1_000_000, 1_000_000_000),
            token_decimals_config: AmountConfig::range(6, 9),
        }
    }

    /// The nominee of an in-flight handoff, if any.
    pub fn pending(&self) -> Option<Pubkey> {
        if self.pending_authority == Pubkey::default() || self.pending_authority == self.authority {
            None
        } else {
            Some(self.pending_authority)
        }
    }

    /// Rejects configurations the program would accept but that could never
    /// admit a launch, or that carry out-of-range fee fields.
    pub fn validate(&self) -> ClientResult<()> {
        self.lamport_amount_config.check_well_formed("lamport amount")?;
        self.token_supply_config.check_well_formed("token supply")?;
        self.token_decimals_config.check_well_formed("token decimals")?;

        match self.token_decimals_config.upper_bound() {
            Some(max) if max > MAX_TOKEN_DECIMALS => {
                return Err(ClientError::validation(format!(
                    "token decimals: {max} exceeds protocol maximum {MAX_TOKEN_DECIMALS}"
                )));
            }
            _ => {}
        }

        check_basis_points("trading fee", self.trading_fee_bps)?;
        check_basis_points("dev fee share", self.dev_fee_share_bps)?;

        if !self.init_bonding_curve.is_finite()
            || self.init_bonding_curve <= 0.0
            || self.init_bonding_curve > 100.0
        {
            return Err(ClientError::validation(format!(
                "initial bonding curve share {} must be within (0, 100]",
                self.init_bonding_curve
            )));
        }
        if self.curve_limit == 0 {
            return Err(ClientError::validation("curve limit must be positive"));
        }
        Ok(())
    }

    /// Checks launch parameters against the configured constraints.
    pub fn validate_launch(&self, params: &LaunchParams) -> ClientResult<()> {
        if params.decimals > MAX_TOKEN_DECIMALS {
            return Err(ClientError::validation(format!(
                "decimals {} exceeds protocol maximum {MAX_TOKEN_DECIMALS}",
                params.decimals
            )));
        }
        self.token_decimals_config.validate("decimals", params.decimals)?;
        self.token_supply_config.validate("token supply", params.token_supply)?;
        self.lamport_amount_config.validate("reserve lamports", params.reserve_lamports)?;

        check_text("name", &params.name, MAX_NAME_LENGTH)?;
        check_text("symbol", &params.symbol, MAX_SYMBOL_LENGTH)?;
        check_text("uri", &params.uri, MAX_URI_LENGTH)
    }

    pub fn try_from_account_data(data: &[u8]) -> ClientResult<Self> {
        if data.len() < 8 || data[..8] != CONFIG_ACCOUNT {
            return Err(ClientError::Decode("not a config account".to_string()));
        }
        let mut body = &data[8..];
        Self::deserialize(&mut body)
            .map_err(|e| ClientError::Decode(format!("config account: {e}")))
    }

    pub fn to_account_data(&self) -> ClientResult<Vec<u8>> {
        let mut data = CONFIG_ACCOUNT.to_vec();
        self.serialize(&mut data)
            .map_err(|e| ClientError::validation(format!("config encoding: {e}")))?;
        Ok(data)
    }
}

fn check_basis_points(field: &str, value: u16) -> ClientResult<()> {
    if value > MAX_BASIS_POINTS {
        return Err(ClientError::validation(format!(
            "{field}: {value} bps exceeds {MAX_BASIS_POINTS}"
        )));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, max_len: usize) -> ClientResult<()> {
    if value.is_empty() {
        return Err(ClientError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(ClientError::validation(format!(
            "{field} is {} bytes, at most {max_len} allowed",
            value.len()
        )));
    }
    Ok(())
}
