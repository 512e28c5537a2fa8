use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

pub struct LeaseInitAccounts {
    pub lease: Pubkey,
    pub queue: Pubkey,
    pub aggregator: Pubkey,
    /// Token account the initial load is drawn from
    pub funder: Pubkey,
    pub payer: Pubkey,
    pub system_program: Pubkey,
    pub token_program: Pubkey,
    /// Authority over `funder`
    pub owner: Pubkey,
    /// Lease's own token account for the program mint
    pub escrow: Pubkey,
    pub program_state: Pubkey,
    pub mint: Pubkey,
}

impl ToAccountMetas for LeaseInitAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.lease, false),
            AccountMeta::new(self.queue, false),
            AccountMeta::new_readonly(self.aggregator, false),
            AccountMeta::new(self.funder, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new(self.owner, true),
            AccountMeta::new(self.escrow, false),
            AccountMeta::new_readonly(self.program_state, false),
            AccountMeta::new_readonly(self.mint, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct LeaseInitParams {
    pub load_amount: u64,
    pub withdraw_authority: Pubkey,
    pub lease_bump: u8,
    pub state_bump: u8,
    /// One bump per job wallet; empty while the aggregator has no jobs
    pub wallet_bumps: Vec<u8>,
}

impl Discriminator for LeaseInitParams {
    const DISCRIMINATOR: [u8; 8] = [168, 190, 157, 252, 159, 226, 241, 89];
}

impl InstructionData for LeaseInitParams {}
