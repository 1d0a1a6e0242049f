use std::{fmt, str::FromStr};

use base64::{engine::general_purpose, Engine};
use borsh::{BorshDeserialize, BorshSerialize};
use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;

use crate::{
    accounts::{BondingCurveState, ConfigParameters},
    constants::launchpad::discriminators::{BONDING_CURVE_ACCOUNT, COMPLETE_EVENT, CONFIG_ACCOUNT},
    error::{ClientError, ClientResult},
};

pub const PROGRAM_DATA: &str = "Program data: ";

/// 曲线完成事件
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct CompleteEvent {
    pub user: Pubkey,
    pub mint: Pubkey,
    pub bonding_curve: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Complete,
    Config,
    BondingCurve,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Complete => write!(f, "CompleteEvent"),
            RecordKind::Config => write!(f, "Config"),
            RecordKind::BondingCurve => write!(f, "BondingCurve"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "complete" | "completeevent" => Ok(RecordKind::Complete),
            "config" => Ok(RecordKind::Config),
            "bondingcurve" => Ok(RecordKind::BondingCurve),
            _ => Err(ClientError::validation(format!("unknown record kind: {s}"))),
        }
    }
}

/// Everything the program emits that the listener knows how to decode.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramRecord {
    Complete(CompleteEvent),
    Config(ConfigParameters),
    BondingCurve(BondingCurveState),
}

impl ProgramRecord {
    /// Decodes a discriminator-prefixed payload.
    pub fn decode(data: &[u8]) -> ClientResult<Self> {
        if data.len() < 8 {
            return Err(ClientError::Decode(format!("payload too short: {} bytes", data.len())));
        }
        let discriminator: [u8; 8] = data[..8]
            .try_into()
            .map_err(|_| ClientError::Decode("payload too short".to_string()))?;
        match discriminator {
            COMPLETE_EVENT => {
                let mut body = &data[8..];
                CompleteEvent::deserialize(&mut body)
                    .map(ProgramRecord::Complete)
                    .map_err(|e| ClientError::Decode(format!("CompleteEvent: {e}")))
            }
            CONFIG_ACCOUNT => ConfigParameters::try_from_account_data(data).map(ProgramRecord::Config),
            BONDING_CURVE_ACCOUNT => {
                BondingCurveState::try_from_account_data(data).map(ProgramRecord::BondingCurve)
            }
            other => Err(ClientError::Decode(format!("unknown discriminator {other:?}"))),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            ProgramRecord::Complete(_) => RecordKind::Complete,
            ProgramRecord::Config(_) => RecordKind::Config,
            ProgramRecord::BondingCurve(_) => RecordKind::BondingCurve,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            ProgramRecord::Complete(event) => json!({
                "user": event.user.to_string(),
                "mint": event.mint.to_string(),
                "bondingCurve": event.bonding_curve.to_string(),
            }),
            ProgramRecord::Config(config) => json!({
                "authority": config.authority.to_string(),
                "pendingAuthority": config.pending().map(|k| k.to_string()),
                "teamWallet": config.team_wallet.to_string(),
                "devWallet": config.dev_wallet.to_string(),
                "initBondingCurve": config.init_bonding_curve,
                "platformBuyFee": config.platform_buy_fee.to_string(),
                "platformSellFee": config.platform_sell_fee.to_string(),
                "tradingFeeBps": config.trading_fee_bps,
                "devFeeShareBps": config.dev_fee_share_bps,
                "devFeeEnabled": config.dev_fee_enabled,
                "curveLimit": config.curve_limit,
                "lamportAmountConfig": format!("{:?}", config.lamport_amount_config),
                "tokenSupplyConfig": format!("{:?}", config.token_supply_config),
                "tokenDecimalsConfig": format!("{:?}", config.token_decimals_config),
            }),
            ProgramRecord::BondingCurve(curve) => json!({
                "tokenMint": curve.token_mint.to_string(),
                "creator": curve.creator.to_string(),
                "initLamport": curve.init_lamport,
                "reserveLamport": curve.reserve_lamport,
                "reserveToken": curve.reserve_token,
                "curveLimit": curve.curve_limit,
                "isCompleted": curve.is_completed,
            }),
        }
    }
}

/// 解析日志中的 `Program data:` 负载
///
/// Lines that are not valid base64 are skipped.
pub fn decode_log_payloads(logs: &[String]) -> Vec<Vec<u8>> {
    logs.iter()
        .filter_map(|log| log.strip_prefix(PROGRAM_DATA))
        .filter_map(|payload| general_purpose::STANDARD.decode(payload.trim()).ok())
        .collect()
}
