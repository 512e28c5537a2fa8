use anchor_lang::prelude::*;
use anchor_lang::{Discriminator, InstructionData};

pub struct AggregatorAddJobAccounts {
    pub aggregator: Pubkey,
    pub authority: Pubkey,
    pub job: Pubkey,
}

impl ToAccountMetas for AggregatorAddJobAccounts {
    fn to_account_metas(&self, _is_signer: Option<bool>) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.aggregator, false),
            AccountMeta::new_readonly(self.authority, true),
            AccountMeta::new(self.job, false),
        ]
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregatorAddJobParams {
    pub weight: Option<u8>,
}

impl Discriminator for AggregatorAddJobParams {
    const DISCRIMINATOR: [u8; 8] = [132, 30, 35, 51, 115, 142, 186, 10];
}

impl InstructionData for AggregatorAddJobParams {}
