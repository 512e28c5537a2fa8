//! Instruction builders for the Switchboard V2 oracle program.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::InstructionData;

pub mod aggregator_init;

pub use aggregator_init::*;

pub mod permission_init;

pub use permission_init::*;

pub mod lease_init;

pub use lease_init::*;

pub mod job_init;

pub use job_init::*;

pub mod aggregator_add_job;

pub use aggregator_add_job::*;

/// Switchboard V2 program, on devnet and mainnet-beta alike.
pub const SWITCHBOARD_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("SW1TCH7qEPTdLsDHRgPuMQjbQxKdH2aBStViMFnt64f");

pub const STATE_SEED: &[u8] = b"STATE";
pub const PERMISSION_SEED: &[u8] = b"PermissionAccountData";
pub const LEASE_SEED: &[u8] = b"LeaseAccountData";

pub fn program_state_address(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STATE_SEED], program_id)
}

pub fn permission_address(
    program_id: &Pubkey,
    authority: &Pubkey,
    granter: &Pubkey,
    grantee: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PERMISSION_SEED, authority.as_ref(), granter.as_ref(), grantee.as_ref()],
        program_id,
    )
}

pub fn lease_address(program_id: &Pubkey, queue: &Pubkey, aggregator: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[LEASE_SEED, queue.as_ref(), aggregator.as_ref()], program_id)
}

/// Pairs an account list with its instruction data.
pub fn instruction<A, D>(program_id: &Pubkey, accounts: &A, data: &D) -> Instruction
where
    A: ToAccountMetas,
    D: InstructionData,
{
    Instruction {
        program_id: *program_id,
        accounts: accounts.to_account_metas(None),
        data: data.data(),
    }
}

#[cfg(test)]
mod tests {
    use anchor_lang::solana_program::hash::hash;
    use anchor_lang::Discriminator;

    use super::*;

    fn sighash(name: &str) -> [u8; 8] {
        let mut out = [0u8; 8];
        out.copy_from_slice(&hash(format!("global:{name}").as_bytes()).to_bytes()[..8]);
        out
    }

    #[test]
    fn discriminators_match_instruction_names() {
        assert_eq!(AggregatorInitParams::discriminator(), sighash("aggregator_init"));
        assert_eq!(PermissionInitParams::discriminator(), sighash("permission_init"));
        assert_eq!(LeaseInitParams::discriminator(), sighash("lease_init"));
        assert_eq!(JobInitParams::discriminator(), sighash("job_init"));
        assert_eq!(AggregatorAddJobParams::discriminator(), sighash("aggregator_add_job"));
    }

    #[test]
    fn addresses_are_deterministic() {
        let (queue, aggregator) = (Pubkey::new_unique(), Pubkey::new_unique());
        assert_eq!(
            lease_address(&SWITCHBOARD_PROGRAM_ID, &queue, &aggregator),
            lease_address(&SWITCHBOARD_PROGRAM_ID, &queue, &aggregator)
        );
        assert_ne!(
            lease_address(&SWITCHBOARD_PROGRAM_ID, &queue, &aggregator).0,
            lease_address(&SWITCHBOARD_PROGRAM_ID, &aggregator, &queue).0
        );
    }
}
