use std::fmt;
use std::path::PathBuf;

use anchor_lang::prelude::Pubkey;
use solana_client::client_error::ClientError;
use thiserror::Error;

use crate::oracle_job::JobEncodeError;

/// Failures reading or writing schema files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("input file does not exist {}", path.display())]
    DefinitionNotFound { path: PathBuf },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize aggregator schema")]
    Serialize(#[source] serde_json::Error),
    #[error("overwrite prompt failed")]
    Prompt(#[from] dialoguer::Error),
}

/// Failures reported by a ledger client.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Rpc(Box<ClientError>),
    #[error("account {0} does not exist")]
    AccountNotFound(Pubkey),
    #[error("account {address} holds unexpected data: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },
    #[error("{0}")]
    Rejected(String),
}

impl From<ClientError> for LedgerError {
    fn from(err: ClientError) -> Self {
        LedgerError::Rpc(Box::new(err))
    }
}

/// The provisioning step that was running when a ledger call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    CreateAggregator,
    CreatePermission,
    ResolveTokenMint,
    EnsureTokenAccount,
    CreateLease,
    CreateJob(String),
    AddJob(String),
    LoadAggregator,
    LoadPermission,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::CreateAggregator => f.write_str("create aggregator"),
            Step::CreatePermission => f.write_str("create permission"),
            Step::ResolveTokenMint => f.write_str("resolve token mint"),
            Step::EnsureTokenAccount => f.write_str("create funding token account"),
            Step::CreateLease => f.write_str("create lease"),
            Step::CreateJob(name) => write!(f, "create job '{name}'"),
            Step::AddJob(name) => write!(f, "add job '{name}' to aggregator"),
            Step::LoadAggregator => f.write_str("load aggregator data"),
            Step::LoadPermission => f.write_str("load permission data"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("no aggregator jobs defined")]
    NoJobs,
    #[error("job '{name}' cannot be encoded")]
    InvalidJob {
        name: String,
        #[source]
        source: JobEncodeError,
    },
    #[error("failed to read Aggregator publicKey")]
    MissingAggregatorKey,
    #[error("job {job} is not attached to aggregator {aggregator}")]
    JobNotAttached { job: Pubkey, aggregator: Pubkey },
    #[error("failed to {step}")]
    Ledger {
        step: Step,
        #[source]
        source: LedgerError,
    },
}

impl ProvisionError {
    /// The step that failed, when the failure came from the ledger.
    pub fn step(&self) -> Option<&Step> {
        match self {
            ProvisionError::Ledger { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Tags a ledger result with the step it belongs to.
pub(crate) trait StepContext<T> {
    fn during(self, step: Step) -> Result<T, ProvisionError>;
}

impl<T> StepContext<T> for Result<T, LedgerError> {
    fn during(self, step: Step) -> Result<T, ProvisionError> {
        self.map_err(|source| ProvisionError::Ledger { step, source })
    }
}
