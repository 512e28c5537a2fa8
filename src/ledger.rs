//! The ledger operations the provisioner depends on.
//!
//! [`crate::rpc::SwitchboardRpc`] implements them against a live cluster; the
//! integration tests drive the provisioner through an in-memory ledger.

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use solana_sdk::signature::Keypair;

use crate::codec::NAME_LEN;
use crate::error::LedgerError;
use crate::state::{AggregatorData, PermissionData};

/// Handle to the oracle queue that new aggregators report to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleQueueAccount {
    pub public_key: Pubkey,
}

impl OracleQueueAccount {
    pub fn new(public_key: Pubkey) -> Self {
        Self { public_key }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorInit {
    pub name: [u8; NAME_LEN],
    pub batch_size: u32,
    pub min_oracle_results: u32,
    pub min_job_results: u32,
    pub min_update_delay_seconds: u32,
    pub queue: Pubkey,
    pub authority: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionInit {
    pub authority: Pubkey,
    pub granter: Pubkey,
    pub grantee: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPermission {
    pub public_key: Pubkey,
    pub data: PermissionData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseInit {
    pub load_amount: u64,
    pub funder: Pubkey,
    pub mint: Pubkey,
    pub queue: Pubkey,
    pub aggregator: Pubkey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInit {
    pub name: [u8; NAME_LEN],
    pub data: Vec<u8>,
}

#[async_trait]
pub trait Ledger: Send + Sync {
    /// The wallet that pays for and holds authority over created accounts.
    fn authority(&self) -> Pubkey;

    async fn create_aggregator(&self, params: &AggregatorInit) -> Result<Pubkey, LedgerError>;

    async fn create_permission(
        &self,
        params: &PermissionInit,
    ) -> Result<CreatedPermission, LedgerError>;

    /// Mint of the token that funds leases.
    async fn resolve_mint(&self) -> Result<Pubkey, LedgerError>;

    /// Token account of `owner` for `mint`, created when it does not exist yet.
    async fn ensure_token_account(&self, mint: &Pubkey, owner: &Pubkey)
        -> Result<Pubkey, LedgerError>;

    async fn create_lease(&self, params: &LeaseInit) -> Result<Pubkey, LedgerError>;

    /// Creates a job account at `identity`'s address.
    async fn create_job(&self, params: &JobInit, identity: &Keypair) -> Result<Pubkey, LedgerError>;

    async fn add_job(&self, aggregator: &Pubkey, job: &Pubkey) -> Result<(), LedgerError>;

    async fn load_aggregator_data(&self, aggregator: &Pubkey)
        -> Result<AggregatorData, LedgerError>;

    async fn load_permission_data(&self, permission: &Pubkey)
        -> Result<PermissionData, LedgerError>;
}
