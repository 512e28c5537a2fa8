use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

use crate::codec::NAME_LEN;

pub struct JobInitAccounts {
    /// Fresh keypair address; signs the transaction
    pub job: Pubkey,
    pub authority: Pubkey,
    pub program_state: Pubkey,
    pub payer: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for JobInitAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.job, true),
            AccountMeta::new_readonly(self.authority, false),
            AccountMeta::new_readonly(self.program_state, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct JobInitParams {
    pub name: [u8; NAME_LEN],
    pub expiration: i64,
    pub state_bump: u8,
    /// Length-delimited `OracleJob` protobuf
    pub data: Vec<u8>,
}

impl Discriminator for JobInitParams {
    const DISCRIMINATOR: [u8; 8] = [101, 86, 105, 192, 34, 201, 147, 159];
}

impl InstructionData for JobInitParams {}
