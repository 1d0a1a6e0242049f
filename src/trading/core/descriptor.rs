//! Operation descriptors and account-role resolution
//!
//! Every instruction of the launch program is described once: its name,
//! discriminator and the ordered list of account roles it expects. A role
//! either points at a well-known constant, is supplied by the caller, or is
//! derived from other roles through a seed scheme. [`AccountRoleMap::resolve`]
//! turns a descriptor plus caller inputs into concrete account metas.

use std::collections::HashMap;

use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey, signer::Signer};

use crate::{
    constants::launchpad::accounts::READ_ONLY_ACCOUNTS,
    error::{ClientError, ClientResult},
    trading::launchpad::pda::{
        get_associated_token_pda, get_bonding_curve_pda, get_config_pda, get_global_vault_pda,
        get_metadata_pda,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    Writable,
    /// Writable and must sign the transaction
    Signer,
}

impl AccessMode {
    pub fn is_writable(self) -> bool {
        !matches!(self, AccessMode::ReadOnly)
    }

    pub fn is_signer(self) -> bool {
        matches!(self, AccessMode::Signer)
    }
}

/// Seed schemes for derived roles. Role names refer to other roles of the
/// same descriptor (or caller inputs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedScheme {
    /// `["config"]`
    Config,
    /// `["global"]`
    GlobalVault,
    /// `["bonding_curve", mint]`
    BondingCurve { mint: &'static str },
    /// `["metadata", metadata program, mint]` under the metadata program
    Metadata { mint: &'static str },
    /// `[wallet, token program, mint]` under the associated token program
    AssociatedToken { wallet: &'static str, mint: &'static str },
}

impl SeedScheme {
    fn dependencies(&self) -> Vec<&'static str> {
        match *self {
            SeedScheme::Config | SeedScheme::GlobalVault => vec![],
            SeedScheme::BondingCurve { mint } | SeedScheme::Metadata { mint } => vec![mint],
            SeedScheme::AssociatedToken { wallet, mint } => vec![wallet, mint],
        }
    }

    fn derive(&self, program_id: &Pubkey, known: &HashMap<&'static str, Pubkey>) -> ClientResult<Option<Pubkey>> {
        let lookup = |role: &str| known.get(role).copied();
        let derived = match *self {
            SeedScheme::Config => get_config_pda(program_id)?,
            SeedScheme::GlobalVault => get_global_vault_pda(program_id)?,
            SeedScheme::BondingCurve { mint } => match lookup(mint) {
                Some(mint) => get_bonding_curve_pda(program_id, &mint)?,
                None => return Ok(None),
            },
            SeedScheme::Metadata { mint } => match lookup(mint) {
                Some(mint) => get_metadata_pda(&mint)?,
                None => return Ok(None),
            },
            SeedScheme::AssociatedToken { wallet, mint } => match (lookup(wallet), lookup(mint)) {
                (Some(wallet), Some(mint)) => get_associated_token_pda(&wallet, &mint)?,
                _ => return Ok(None),
            },
        };
        Ok(Some(derived.address))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    Constant(Pubkey),
    /// Supplied by the caller under the role's name
    Input,
    Derived(SeedScheme),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: &'static str,
    pub access: AccessMode,
    pub source: RoleSource,
}

impl RoleSpec {
    pub const fn input(name: &'static str, access: AccessMode) -> Self {
        Self { name, access, source: RoleSource::Input }
    }

    pub const fn constant(name: &'static str, address: Pubkey) -> Self {
        Self { name, access: AccessMode::ReadOnly, source: RoleSource::Constant(address) }
    }

    pub const fn derived(name: &'static str, access: AccessMode, scheme: SeedScheme) -> Self {
        Self { name, access, source: RoleSource::Derived(scheme) }
    }
}

/// Everything needed to wire one program instruction.
#[derive(Debug)]
pub struct OperationDescriptor {
    pub name: &'static str,
    pub discriminator: [u8; 8],
    /// In instruction account order
    pub roles: &'static [RoleSpec],
}

/// Caller-supplied addresses keyed by role name.
#[derive(Debug, Clone, Default)]
pub struct RoleInputs {
    inputs: HashMap<&'static str, Pubkey>,
}

impl RoleInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, role: &'static str, address: Pubkey) -> Self {
        self.inputs.insert(role, address);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRole {
    pub name: &'static str,
    pub address: Pubkey,
    pub access: AccessMode,
}

/// Concrete accounts of one operation, in instruction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRoleMap {
    operation: &'static str,
    roles: Vec<ResolvedRole>,
}

impl AccountRoleMap {
    /// Resolves every role of `descriptor`. Derived roles may depend on
    /// inputs, constants or other derived roles in any order; resolution
    /// repeats until no role is left or no progress is made.
    pub fn resolve(
        descriptor: &OperationDescriptor,
        program_id: &Pubkey,
        inputs: &RoleInputs,
    ) -> ClientResult<Self> {
        let mut known: HashMap<&'static str, Pubkey> = HashMap::new();
        for role in descriptor.roles {
            match role.source {
                RoleSource::Constant(address) => {
                    known.insert(role.name, address);
                }
                RoleSource::Input => match inputs.inputs.get(role.name) {
                    Some(address) => {
                        known.insert(role.name, *address);
                    }
                    None => {
                        return Err(ClientError::malformed(
                            descriptor.name,
                            format!("missing input for role `{}`", role.name),
                        ));
                    }
                },
                RoleSource::Derived(_) => {}
            }
        }

        let mut pending: Vec<(&'static str, SeedScheme)> = descriptor
            .roles
            .iter()
            .filter_map(|role| match role.source {
                RoleSource::Derived(scheme) => Some((role.name, scheme)),
                _ => None,
            })
            .collect();
        while !pending.is_empty() {
            let mut unresolved = Vec::with_capacity(pending.len());
            for (name, scheme) in pending.iter().copied() {
                match scheme.derive(program_id, &known)? {
                    Some(address) => {
                        known.insert(name, address);
                    }
                    None => unresolved.push((name, scheme)),
                }
            }
            if unresolved.len() == pending.len() {
                let missing: Vec<String> = unresolved
                    .iter()
                    .map(|(name, scheme)| format!("`{name}` needs {:?}", scheme.dependencies()))
                    .collect();
                return Err(ClientError::malformed(
                    descriptor.name,
                    format!("unresolvable roles: {}", missing.join(", ")),
                ));
            }
            pending = unresolved;
        }

        let roles = descriptor
            .roles
            .iter()
            .map(|role| {
                known
                    .get(role.name)
                    .map(|address| ResolvedRole { name: role.name, address: *address, access: role.access })
                    .ok_or_else(|| ClientError::malformed(descriptor.name, format!("role `{}` unresolved", role.name)))
            })
            .collect::<ClientResult<Vec<_>>>()?;
        Ok(Self { operation: descriptor.name, roles })
    }

    /// Builds a map directly, bypassing resolution.
    pub fn from_roles(operation: &'static str, roles: Vec<ResolvedRole>) -> Self {
        Self { operation, roles }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn roles(&self) -> &[ResolvedRole] {
        &self.roles
    }

    pub fn get(&self, role: &str) -> Option<&ResolvedRole> {
        self.roles.iter().find(|r| r.name == role)
    }

    pub fn address(&self, role: &str) -> ClientResult<Pubkey> {
        self.get(role)
            .map(|r| r.address)
            .ok_or_else(|| ClientError::malformed(self.operation, format!("unknown role `{role}`")))
    }

    /// Checks the map against the descriptor and the signers that will sign.
    ///
    /// - every descriptor role is present, in order, with the declared access
    /// - no writable role points at a program, sysvar or mint that is read-only
    /// - every signer role is backed by exactly one supplied signer
    /// - every supplied signer backs some signer role
    pub fn validate(&self, descriptor: &OperationDescriptor, signers: &[&dyn Signer]) -> ClientResult<()> {
        if self.operation != descriptor.name {
            return Err(ClientError::malformed(
                descriptor.name,
                format!("role map was resolved for `{}`", self.operation),
            ));
        }
        if self.roles.len() != descriptor.roles.len() {
            return Err(ClientError::malformed(
                descriptor.name,
                format!("expected {} roles, got {}", descriptor.roles.len(), self.roles.len()),
            ));
        }
        for (expected, role) in descriptor.roles.iter().zip(&self.roles) {
            if expected.name != role.name || expected.access != role.access {
                return Err(ClientError::malformed(
                    descriptor.name,
                    format!("role `{}` does not match descriptor role `{}`", role.name, expected.name),
                ));
            }
            if role.access.is_writable() && READ_ONLY_ACCOUNTS.contains(&role.address) {
                return Err(ClientError::malformed(
                    descriptor.name,
                    format!("writable role `{}` points at read-only account {}", role.name, role.address),
                ));
            }
        }

        let signer_keys: Vec<Pubkey> = signers.iter().map(|s| s.pubkey()).collect();
        for role in self.roles.iter().filter(|r| r.access.is_signer()) {
            match signer_keys.iter().filter(|k| **k == role.address).count() {
                0 => {
                    return Err(ClientError::validation(format!(
                        "missing required signer {} for role `{}` of `{}`",
                        role.address, role.name, descriptor.name
                    )));
                }
                1 => {}
                _ => {
                    return Err(ClientError::malformed(
                        descriptor.name,
                        format!("signer {} supplied more than once", role.address),
                    ));
                }
            }
        }
        if let Some(extra) = signer_keys
            .iter()
            .find(|k| !self.roles.iter().any(|r| r.access.is_signer() && r.address == **k))
        {
            return Err(ClientError::malformed(
                descriptor.name,
                format!("signer {extra} does not back any signer role"),
            ));
        }
        Ok(())
    }

    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        self.roles
            .iter()
            .map(|role| match role.access {
                AccessMode::ReadOnly => AccountMeta::new_readonly(role.address, false),
                AccessMode::Writable => AccountMeta::new(role.address, false),
                AccessMode::Signer => AccountMeta::new(role.address, true),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::launchpad::accounts::{LAUNCHPAD_PROGRAM, NATIVE_MINT, SYSTEM_PROGRAM};
    use solana_sdk::signature::Keypair;

    static ROLES: &[RoleSpec] = &[
        // depends on a role declared after it
        RoleSpec::derived(
            "userAta",
            AccessMode::Writable,
            SeedScheme::AssociatedToken { wallet: "user", mint: "mint" },
        ),
        RoleSpec::derived("vault", AccessMode::Writable, SeedScheme::GlobalVault),
        RoleSpec::derived(
            "vaultWsol",
            AccessMode::Writable,
            SeedScheme::AssociatedToken { wallet: "vault", mint: "nativeMint" },
        ),
        RoleSpec::input("user", AccessMode::Signer),
        RoleSpec::input("mint", AccessMode::ReadOnly),
        RoleSpec::constant("nativeMint", NATIVE_MINT),
        RoleSpec::constant("systemProgram", SYSTEM_PROGRAM),
    ];

    static DESCRIPTOR: OperationDescriptor =
        OperationDescriptor { name: "test", discriminator: [0; 8], roles: ROLES };

    #[test]
    fn test_resolves_out_of_order_dependencies() {
        let user = Keypair::new();
        let mint = Pubkey::new_unique();
        let inputs = RoleInputs::new().with("user", user.pubkey()).with("mint", mint);
        let map = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap();

        let vault = get_global_vault_pda(&LAUNCHPAD_PROGRAM).unwrap().address;
        assert_eq!(
            map.address("userAta").unwrap(),
            get_associated_token_pda(&user.pubkey(), &mint).unwrap().address
        );
        assert_eq!(
            map.address("vaultWsol").unwrap(),
            get_associated_token_pda(&vault, &NATIVE_MINT).unwrap().address
        );

        let names: Vec<_> = map.roles().iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["userAta", "vault", "vaultWsol", "user", "mint", "nativeMint", "systemProgram"]);

        let metas = map.to_account_metas();
        assert!(metas[3].is_signer && metas[3].is_writable);
        assert!(!metas[4].is_writable);
        assert!(map.validate(&DESCRIPTOR, &[&user]).is_ok());
    }

    #[test]
    fn test_missing_input_is_malformed() {
        let inputs = RoleInputs::new().with("user", Pubkey::new_unique());
        let err = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap_err();
        assert!(matches!(err, ClientError::MalformedAccounts { .. }));
    }

    #[test]
    fn test_missing_signer_is_validation_error() {
        let user = Keypair::new();
        let inputs = RoleInputs::new().with("user", user.pubkey()).with("mint", Pubkey::new_unique());
        let map = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap();
        let stranger = Keypair::new();

        assert!(matches!(map.validate(&DESCRIPTOR, &[]), Err(ClientError::Validation(_))));
        assert!(matches!(
            map.validate(&DESCRIPTOR, &[&user, &stranger]),
            Err(ClientError::MalformedAccounts { .. })
        ));
    }

    #[test]
    fn test_writable_role_on_read_only_account_rejected() {
        let user = Keypair::new();
        let inputs = RoleInputs::new().with("user", user.pubkey()).with("mint", Pubkey::new_unique());
        let map = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap();

        let mut roles = map.roles().to_vec();
        roles[1].address = SYSTEM_PROGRAM;
        let tampered = AccountRoleMap::from_roles("test", roles);
        let err = tampered.validate(&DESCRIPTOR, &[&user]).unwrap_err();
        assert!(matches!(err, ClientError::MalformedAccounts { ref reason, .. } if reason.contains("vault")));
    }

    #[test]
    fn test_map_for_other_operation_rejected() {
        let user = Keypair::new();
        let inputs = RoleInputs::new().with("user", user.pubkey()).with("mint", Pubkey::new_unique());
        let map = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap();
        let relabeled = AccountRoleMap::from_roles("other", map.roles().to_vec());
        assert!(relabeled.validate(&DESCRIPTOR, &[&user]).is_err());
    }

    #[test]
    fn test_duplicate_signer_rejected() {
        let user = Keypair::new();
        let inputs = RoleInputs::new().with("user", user.pubkey()).with("mint", Pubkey::new_unique());
        let map = AccountRoleMap::resolve(&DESCRIPTOR, &LAUNCHPAD_PROGRAM, &inputs).unwrap();
        assert!(matches!(
            map.validate(&DESCRIPTOR, &[&user, &user]),
            Err(ClientError::MalformedAccounts { .. })
        ));
    }
}
