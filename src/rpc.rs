//! [`Ledger`] over a Solana JSON-RPC endpoint.

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::system_instruction;
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use tracing::debug;

use crate::error::LedgerError;
use crate::instructions::{
    instruction, lease_address, permission_address, program_state_address, AggregatorAddJobAccounts,
    AggregatorAddJobParams, AggregatorInitAccounts, AggregatorInitParams, JobInitAccounts,
    JobInitParams, LeaseInitAccounts, LeaseInitParams, PermissionInitAccounts, PermissionInitParams,
};
use crate::ledger::{AggregatorInit, CreatedPermission, JobInit, LeaseInit, Ledger, PermissionInit};
use crate::state::{AggregatorData, PermissionData, ProgramStateData, AGGREGATOR_ACCOUNT_SIZE};

pub struct SwitchboardRpc {
    client: RpcClient,
    payer: Keypair,
    program_id: Pubkey,
}

impl SwitchboardRpc {
    /// Connects at `finalized` commitment; `payer` signs and pays for every transaction.
    pub fn new(rpc_url: String, payer: Keypair, program_id: Pubkey) -> Self {
        Self {
            client: RpcClient::new_with_commitment(rpc_url, CommitmentConfig::finalized()),
            payer,
            program_id,
        }
    }

    async fn send(
        &self,
        instructions: &[Instruction],
        extra_signers: &[&Keypair],
    ) -> Result<Signature, LedgerError> {
        let blockhash = self.client.get_latest_blockhash().await?;
        let mut signers: Vec<&Keypair> = vec![&self.payer];
        signers.extend_from_slice(extra_signers);
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&self.payer.pubkey()),
            signers.as_slice(),
            blockhash,
        );
        let signature = self.client.send_and_confirm_transaction(&tx).await?;
        debug!(%signature, "transaction confirmed");
        Ok(signature)
    }

    async fn fetch_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError> {
        Ok(self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await?
            .value)
    }

    /// Fetches an account the oracle program must own.
    async fn fetch_program_account(&self, address: &Pubkey) -> Result<Account, LedgerError> {
        let account = self
            .fetch_account(address)
            .await?
            .ok_or(LedgerError::AccountNotFound(*address))?;
        if account.owner != self.program_id {
            return Err(LedgerError::InvalidAccountData {
                address: *address,
                reason: format!("owned by {}, expected {}", account.owner, self.program_id),
            });
        }
        Ok(account)
    }
}

#[async_trait]
impl Ledger for SwitchboardRpc {
    fn authority(&self) -> Pubkey {
        self.payer.pubkey()
    }

    async fn create_aggregator(&self, params: &AggregatorInit) -> Result<Pubkey, LedgerError> {
        let aggregator = Keypair::new();
        let (program_state, state_bump) = program_state_address(&self.program_id);
        let lamports = self
            .client
            .get_minimum_balance_for_rent_exemption(AGGREGATOR_ACCOUNT_SIZE)
            .await?;

        let allocate = system_instruction::create_account(
            &self.payer.pubkey(),
            &aggregator.pubkey(),
            lamports,
            AGGREGATOR_ACCOUNT_SIZE as u64,
            &self.program_id,
        );
        let init = instruction(
            &self.program_id,
            &AggregatorInitAccounts {
                aggregator: aggregator.pubkey(),
                authority: params.authority,
                queue: params.queue,
                program_state,
            },
            &AggregatorInitParams::new(
                params.name,
                params.batch_size,
                params.min_oracle_results,
                params.min_job_results,
                params.min_update_delay_seconds,
                state_bump,
            ),
        );
        self.send(&[allocate, init], &[&aggregator]).await?;
        Ok(aggregator.pubkey())
    }

    async fn create_permission(
        &self,
        params: &PermissionInit,
    ) -> Result<CreatedPermission, LedgerError> {
        let (permission, _) = permission_address(
            &self.program_id,
            &params.authority,
            &params.granter,
            &params.grantee,
        );
        let ix = instruction(
            &self.program_id,
            &PermissionInitAccounts {
                permission,
                authority: params.authority,
                granter: params.granter,
                grantee: params.grantee,
                payer: self.payer.pubkey(),
                system_program: system_program::ID,
            },
            &PermissionInitParams {},
        );
        self.send(&[ix], &[]).await?;
        let data = self.load_permission_data(&permission).await?;
        Ok(CreatedPermission {
            public_key: permission,
            data,
        })
    }

    async fn resolve_mint(&self) -> Result<Pubkey, LedgerError> {
        let (program_state, _) = program_state_address(&self.program_id);
        let account = self.fetch_program_account(&program_state).await?;
        Ok(ProgramStateData::decode(&program_state, &account.data)?.token_mint)
    }

    async fn ensure_token_account(
        &self,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey, LedgerError> {
        let token_account = get_associated_token_address(owner, mint);
        if self.fetch_account(&token_account).await?.is_none() {
            let ix = create_associated_token_account_idempotent(
                &self.payer.pubkey(),
                owner,
                mint,
                &anchor_spl::token::ID,
            );
            self.send(&[ix], &[]).await?;
            debug!(%token_account, %owner, "created token account");
        }
        Ok(token_account)
    }

    async fn create_lease(&self, params: &LeaseInit) -> Result<Pubkey, LedgerError> {
        let (lease, lease_bump) =
            lease_address(&self.program_id, &params.queue, &params.aggregator);
        let (program_state, state_bump) = program_state_address(&self.program_id);
        let escrow = get_associated_token_address(&lease, &params.mint);

        let create_escrow = create_associated_token_account_idempotent(
            &self.payer.pubkey(),
            &lease,
            &params.mint,
            &anchor_spl::token::ID,
        );
        let init = instruction(
            &self.program_id,
            &LeaseInitAccounts {
                lease,
                queue: params.queue,
                aggregator: params.aggregator,
                funder: params.funder,
                payer: self.payer.pubkey(),
                system_program: system_program::ID,
                token_program: anchor_spl::token::ID,
                owner: self.payer.pubkey(),
                escrow,
                program_state,
                mint: params.mint,
            },
            &LeaseInitParams {
                load_amount: params.load_amount,
                withdraw_authority: self.payer.pubkey(),
                lease_bump,
                state_bump,
                wallet_bumps: Vec::new(),
            },
        );
        self.send(&[create_escrow, init], &[]).await?;
        Ok(lease)
    }

    async fn create_job(
        &self,
        params: &JobInit,
        identity: &Keypair,
    ) -> Result<Pubkey, LedgerError> {
        let (program_state, state_bump) = program_state_address(&self.program_id);
        let ix = instruction(
            &self.program_id,
            &JobInitAccounts {
                job: identity.pubkey(),
                authority: self.payer.pubkey(),
                program_state,
                payer: self.payer.pubkey(),
                system_program: system_program::ID,
            },
            &JobInitParams {
                name: params.name,
                expiration: 0,
                state_bump,
                data: params.data.clone(),
            },
        );
        self.send(&[ix], &[identity]).await?;
        Ok(identity.pubkey())
    }

    async fn add_job(&self, aggregator: &Pubkey, job: &Pubkey) -> Result<(), LedgerError> {
        let ix = instruction(
            &self.program_id,
            &AggregatorAddJobAccounts {
                aggregator: *aggregator,
                authority: self.payer.pubkey(),
                job: *job,
            },
            &AggregatorAddJobParams { weight: None },
        );
        self.send(&[ix], &[]).await?;
        Ok(())
    }

    async fn load_aggregator_data(
        &self,
        aggregator: &Pubkey,
    ) -> Result<AggregatorData, LedgerError> {
        let account = self.fetch_program_account(aggregator).await?;
        AggregatorData::decode(aggregator, &account.data)
    }

    async fn load_permission_data(
        &self,
        permission: &Pubkey,
    ) -> Result<PermissionData, LedgerError> {
        let account = self.fetch_program_account(permission).await?;
        PermissionData::decode(permission, &account.data)
    }
}
