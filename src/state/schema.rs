use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;

/// An aggregator definition as read from disk, or the provisioned result
/// written back out. A definition carries `name` and `jobs`; provisioning
/// fills in every address along with the ledger-resolved settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub public_key: Option<Pubkey>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::secret_key_option")]
    pub secret_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_required_oracle_results: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_required_job_results: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_update_delay_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<PermissionSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lease: Option<LeaseSchema>,
    pub jobs: Vec<JobSchema>,
    /// Fields this crate does not interpret, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Definitions and results share one shape.
pub type AggregatorDefinition = AggregatorSchema;

impl AggregatorSchema {
    pub fn new(name: impl Into<String>, jobs: Vec<JobSchema>) -> Self {
        Self {
            name: name.into(),
            public_key: None,
            secret_key: None,
            batch_size: None,
            min_required_oracle_results: None,
            min_required_job_results: None,
            min_update_delay_seconds: None,
            permission: None,
            lease: None,
            jobs,
            extra: Map::new(),
        }
    }

    /// True once the aggregator and everything it depends on exist on chain.
    pub fn is_provisioned(&self) -> bool {
        self.public_key.is_some() && self.permission.is_some() && self.lease.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub public_key: Option<Pubkey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    pub queue_permission: String,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub granter: Option<Pubkey>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub grantee: Option<Pubkey>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub public_key: Option<Pubkey>,
}

/// One data-fetch job. `tasks` is kept as raw JSON so a schema round-trips
/// untouched; it is only interpreted when encoded for the oracle program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::pubkey_option")]
    pub public_key: Option<Pubkey>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "codec::secret_key_option")]
    pub secret_key: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobSchema {
    pub fn new(name: impl Into<String>, tasks: Vec<Value>) -> Self {
        Self {
            name: Some(name.into()),
            tasks: Some(tasks),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}
