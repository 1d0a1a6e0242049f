pub mod accounts;
pub mod common;
pub mod constants;
pub mod error;
pub mod instruction;
pub mod streaming;
pub mod trading;
pub mod transport;

#[cfg(test)]
mod testing;

use std::{future::Future, sync::Arc, time::Duration};

use accounts::{AuthorityHandoff, BondingCurveState, ConfigParameters};
use common::LaunchpadConfig;
use constants::trade::trade::MAX_DEADLINE_WINDOW_SECS;
use error::{ClientError, ClientResult};
use instruction::launchpad::{
    AcceptAuthorityArgs, ConfigureArgs, LaunchArgs, NominateAuthorityArgs, SwapArgs, WithdrawArgs,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};
use streaming::{FeedMode, MatchedEvent, NotificationFeed, PubsubFeed, RecordKind};
use trading::{
    core::params::deadline_from,
    launchpad::pda::{get_bonding_curve_pda, get_config_pda},
    InstructionOrchestrator, LaunchParams, RoleInputs, RpcTransport, SwapParams,
};
use transport::SolRpcTransport;

/// Result of a successful launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchOutcome {
    pub signature: Signature,
    pub mint: Pubkey,
}

/// Client for the bonding-curve launch program.
///
/// Every operation signs with `payer`. Operations that depend on the global
/// configuration fetch it first; nothing is locked between that read and the
/// submission, so a concurrent change surfaces as [`ClientError::Rejected`].
#[derive(Clone)]
pub struct LaunchpadClient {
    pub payer: Arc<Keypair>,
    transport: Arc<dyn RpcTransport>,
    config: LaunchpadConfig,
    orchestrator: InstructionOrchestrator,
}

impl LaunchpadClient {
    /// Client over the RPC endpoint in `config`.
    pub fn new(payer: Arc<Keypair>, config: LaunchpadConfig) -> Self {
        let transport = Arc::new(SolRpcTransport::from_url(config.rpc_url.clone(), config.commitment));
        Self::with_transport(payer, config, transport)
    }

    pub fn with_transport(payer: Arc<Keypair>, config: LaunchpadConfig, transport: Arc<dyn RpcTransport>) -> Self {
        let orchestrator = InstructionOrchestrator::new(config.program_id, transport.clone(), config.priority_fee);
        Self { payer, transport, config, orchestrator }
    }

    pub fn program_id(&self) -> Pubkey {
        self.config.program_id
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    /// Reads the global configuration account.
    pub async fn fetch_config(&self) -> ClientResult<ConfigParameters> {
        let address = get_config_pda(&self.config.program_id)?.address;
        match self.transport.account_data(&address).await? {
            Some(data) => ConfigParameters::try_from_account_data(&data),
            None => Err(ClientError::AccountNotFound(address)),
        }
    }

    /// Reads the bonding curve of `mint`.
    pub async fn fetch_bonding_curve(&self, mint: &Pubkey) -> ClientResult<BondingCurveState> {
        let address = get_bonding_curve_pda(&self.config.program_id, mint)?.address;
        match self.transport.account_data(&address).await? {
            Some(data) => BondingCurveState::try_from_account_data(&data),
            None => Err(ClientError::AccountNotFound(address)),
        }
    }

    /// Writes the global configuration. Invalid parameters are rejected
    /// before any network call.
    pub async fn configure(&self, new_config: ConfigParameters) -> ClientResult<Signature> {
        new_config.validate()?;
        let inputs = RoleInputs::new().with("payer", self.payer.pubkey());
        self.orchestrator
            .execute(&ConfigureArgs { new_config }, &inputs, &[self.payer.as_ref()])
            .await
    }

    /// First step of an authority handoff; the payer must be the current authority.
    pub async fn nominate_authority(&self, new_authority: Pubkey) -> ClientResult<Signature> {
        let current = self.fetch_config().await?;
        AuthorityHandoff::from_config(&current).check_nominate(&self.payer.pubkey())?;
        let inputs = RoleInputs::new().with("admin", self.payer.pubkey());
        self.orchestrator
            .execute(&NominateAuthorityArgs { new_admin: new_authority }, &inputs, &[self.payer.as_ref()])
            .await
    }

    /// Second step of an authority handoff; the payer must be the nominee.
    pub async fn accept_authority(&self) -> ClientResult<Signature> {
        let current = self.fetch_config().await?;
        AuthorityHandoff::from_config(&current).check_accept(&self.payer.pubkey())?;
        let inputs = RoleInputs::new().with("newAdmin", self.payer.pubkey());
        self.orchestrator.execute(&AcceptAuthorityArgs, &inputs, &[self.payer.as_ref()]).await
    }

    /// Launches a token under a freshly generated mint keypair.
    pub async fn launch(&self, params: LaunchParams) -> ClientResult<LaunchOutcome> {
        let mint = Keypair::new();
        self.launch_with_mint(params, &mint).await
    }

    pub async fn launch_with_mint(&self, params: LaunchParams, mint: &Keypair) -> ClientResult<LaunchOutcome> {
        let current = self.fetch_config().await?;
        current.validate_launch(&params)?;

        let inputs = RoleInputs::new()
            .with("creator", self.payer.pubkey())
            .with("token", mint.pubkey())
            .with("teamWallet", current.team_wallet);
        let signature = self
            .orchestrator
            .execute(&LaunchArgs::from(&params), &inputs, &[self.payer.as_ref(), mint])
            .await?;
        Ok(LaunchOutcome { signature, mint: mint.pubkey() })
    }

    /// Trades against the bonding curve of `params.mint`.
    pub async fn swap(&self, params: SwapParams) -> ClientResult<Signature> {
        params.validate()?;
        let now = chrono::Utc::now().timestamp();
        let deadline = match params.deadline {
            Some(deadline) if deadline <= now => {
                return Err(ClientError::validation(format!("deadline {deadline} is not in the future")));
            }
            Some(deadline) => deadline,
            None => {
                let window = self.config.deadline_window_secs;
                if window <= 0 || window > MAX_DEADLINE_WINDOW_SECS {
                    return Err(ClientError::validation(format!(
                        "deadline window {window}s must be within (0, {MAX_DEADLINE_WINDOW_SECS}]"
                    )));
                }
                deadline_from(now, window)
            }
        };

        let current = self.fetch_config().await?;
        let inputs = RoleInputs::new()
            .with("user", self.payer.pubkey())
            .with("tokenMint", params.mint)
            .with("teamWallet", current.team_wallet)
            .with("devWallet", current.dev_wallet);
        let args = SwapArgs {
            amount: params.amount,
            direction: params.direction,
            minimum_receive_amount: params.minimum_receive_amount,
            deadline,
        };
        self.orchestrator.execute(&args, &inputs, &[self.payer.as_ref()]).await
    }

    /// Moves a completed curve's reserves to the authority.
    pub async fn withdraw(&self, mint: Pubkey) -> ClientResult<Signature> {
        let inputs = RoleInputs::new().with("admin", self.payer.pubkey()).with("tokenMint", mint);
        self.orchestrator.execute(&WithdrawArgs, &inputs, &[self.payer.as_ref()]).await
    }

    /// WebSocket feed at the configured endpoint and listen commitment.
    pub fn feed(&self, mode: FeedMode) -> PubsubFeed {
        PubsubFeed::new(self.config.ws_url.clone(), self.config.listen_commitment, mode)
    }

    pub async fn listen_for<C>(
        &self,
        feed: &dyn NotificationFeed,
        kind: RecordKind,
        timeout: Duration,
        cancel: C,
    ) -> ClientResult<MatchedEvent>
    where
        C: Future<Output = ()>,
    {
        streaming::listen_for(feed, self.config.program_id, kind, timeout, cancel).await
    }
}
