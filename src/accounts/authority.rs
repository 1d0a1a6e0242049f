use solana_sdk::pubkey::Pubkey;

use crate::{
    accounts::config::ConfigParameters,
    error::{ClientError, ClientResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffState {
    Idle,
    Pending(Pubkey),
}

/// Two-step authority transfer: the current authority nominates, the nominee
/// accepts. A new nomination overwrites a pending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityHandoff {
    authority: Pubkey,
    pending: Option<Pubkey>,
}

impl AuthorityHandoff {
    pub fn new(authority: Pubkey) -> Self {
        Self { authority, pending: None }
    }

    pub fn from_config(config: &ConfigParameters) -> Self {
        Self { authority: config.authority, pending: config.pending() }
    }

    pub fn authority(&self) -> Pubkey {
        self.authority
    }

    pub fn state(&self) -> HandoffState {
        match self.pending {
            Some(pending) => HandoffState::Pending(pending),
            None => HandoffState::Idle,
        }
    }

    pub fn check_nominate(&self, caller: &Pubkey) -> ClientResult<()> {
        if *caller != self.authority {
            return Err(ClientError::validation(format!(
                "{caller} is not the current authority {}",
                self.authority
            )));
        }
        Ok(())
    }

    pub fn check_accept(&self, caller: &Pubkey) -> ClientResult<()> {
        match self.pending {
            Some(pending) if pending == *caller => Ok(()),
            Some(pending) => Err(ClientError::validation(format!(
                "{caller} is not the pending authority {pending}"
            ))),
            None => Err(ClientError::validation("no authority handoff is pending")),
        }
    }

    /// idle | pending -> pending(new_authority)
    pub fn nominate(&mut self, caller: &Pubkey, new_authority: Pubkey) -> ClientResult<()> {
        self.check_nominate(caller)?;
        self.pending = Some(new_authority);
        Ok(())
    }

    /// pending(caller) -> idle, with `caller` as the new authority
    pub fn accept(&mut self, caller: &Pubkey) -> ClientResult<()> {
        self.check_accept(caller)?;
        self.authority = *caller;
        self.pending = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominate_then_accept() {
        let admin = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut handoff = AuthorityHandoff::new(admin);
        assert_eq!(handoff.state(), HandoffState::Idle);

        handoff.nominate(&admin, nominee).unwrap();
        assert_eq!(handoff.state(), HandoffState::Pending(nominee));
        assert_eq!(handoff.authority(), admin);

        handoff.accept(&nominee).unwrap();
        assert_eq!(handoff.state(), HandoffState::Idle);
        assert_eq!(handoff.authority(), nominee);
    }

    #[test]
    fn test_accept_by_stranger_leaves_state_unchanged() {
        let admin = Pubkey::new_unique();
        let nominee = Pubkey::new_unique();
        let mut handoff = AuthorityHandoff::new(admin);
        handoff.nominate(&admin, nominee).unwrap();
        let before = handoff.clone();

        assert!(handoff.accept(&Pubkey::new_unique()).is_err());
        assert!(handoff.accept(&admin).is_err());
        assert_eq!(handoff, before);
    }

    #[test]
    fn test_only_authority_nominates_and_renomination_overwrites() {
        let admin = Pubkey::new_unique();
        let first = Pubkey::new_unique();
        let second = Pubkey::new_unique();
        let mut handoff = AuthorityHandoff::new(admin);

        assert!(handoff.nominate(&first, second).is_err());
        assert_eq!(handoff.state(), HandoffState::Idle);

        handoff.nominate(&admin, first).unwrap();
        handoff.nominate(&admin, second).unwrap();
        assert_eq!(handoff.state(), HandoffState::Pending(second));
        assert!(handoff.accept(&first).is_err());
    }

    #[test]
    fn test_accept_without_nomination() {
        let admin = Pubkey::new_unique();
        let mut handoff = AuthorityHandoff::new(admin);
        assert!(handoff.accept(&admin).is_err());
    }

    #[test]
    fn test_from_config_treats_self_nomination_as_idle() {
        let admin = Pubkey::new_unique();
        let mut config = ConfigParameters::new(admin);
        assert_eq!(AuthorityHandoff::from_config(&config).state(), HandoffState::Idle);

        let nominee = Pubkey::new_unique();
        config.pending_authority = nominee;
        assert_eq!(
            AuthorityHandoff::from_config(&config).state(),
            HandoffState::Pending(nominee)
        );
    }
}
