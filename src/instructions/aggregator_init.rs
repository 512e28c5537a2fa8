use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

use crate::codec::NAME_LEN;

pub struct AggregatorInitAccounts {
    /// Pre-allocated, owned by the program, signs the transaction
    pub aggregator: Pubkey,
    pub authority: Pubkey,
    pub queue: Pubkey,
    pub program_state: Pubkey,
}

impl ToAccountMetas for AggregatorInitAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.aggregator, false),
            AccountMeta::new_readonly(self.authority, false),
            AccountMeta::new_readonly(self.queue, false),
            AccountMeta::new_readonly(self.program_state, false),
        ]
    }
}

/// The program's decimal: `mantissa * 10^-scale`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BorshDecimal {
    pub mantissa: i128,
    pub scale: u32,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AggregatorInitParams {
    pub name: [u8; NAME_LEN],
    pub metadata: [u8; 128],
    pub batch_size: u32,
    pub min_oracle_results: u32,
    pub min_job_results: u32,
    pub min_update_delay_seconds: u32,
    pub start_after: i64,
    pub variance_threshold: BorshDecimal,
    pub force_report_period: i64,
    pub expiration: i64,
    pub state_bump: u8,
    pub disable_crank: bool,
}

impl AggregatorInitParams {
    pub fn new(
        name: [u8; NAME_LEN],
        batch_size: u32,
        min_oracle_results: u32,
        min_job_results: u32,
        min_update_delay_seconds: u32,
        state_bump: u8,
    ) -> Self {
        Self {
            name,
            metadata: [0u8; 128],
            batch_size,
            min_oracle_results,
            min_job_results,
            min_update_delay_seconds,
            start_after: 0,
            variance_threshold: BorshDecimal::default(),
            force_report_period: 0,
            expiration: 0,
            state_bump,
            disable_crank: false,
        }
    }
}

impl Discriminator for AggregatorInitParams {
    const DISCRIMINATOR: [u8; 8] = [200, 41, 88, 11, 36, 21, 181, 110];
}

impl InstructionData for AggregatorInitParams {}
