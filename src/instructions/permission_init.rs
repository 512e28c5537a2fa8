use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

pub struct PermissionInitAccounts {
    pub permission: Pubkey,
    pub authority: Pubkey,
    pub granter: Pubkey,
    pub grantee: Pubkey,
    pub payer: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for PermissionInitAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.permission, false),
            AccountMeta::new_readonly(self.authority, false),
            AccountMeta::new_readonly(self.granter, false),
            AccountMeta::new_readonly(self.grantee, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

/// The permission bump is derived on chain.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PermissionInitParams {}

impl Discriminator for PermissionInitParams {
    const DISCRIMINATOR: [u8; 8] = [177, 116, 201, 233, 16, 2, 11, 179];
}

impl InstructionData for PermissionInitParams {}
