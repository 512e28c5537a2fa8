//! Provisions a Switchboard V2 data feed from a JSON definition.
//!
//! [`provisioner::create_aggregator_from_definition`] creates the aggregator,
//! its queue permission, a lease and every job, then returns the schema as the
//! oracle program stored it. [`store`] reads definitions and writes results.

pub mod codec;
pub mod config;
pub mod error;
pub mod instructions;
pub mod ledger;
pub mod oracle_job;
pub mod provisioner;
pub mod rpc;
pub mod state;
pub mod store;

pub use error::{LedgerError, ProvisionError, Step, StoreError};
pub use ledger::{Ledger, OracleQueueAccount};
pub use provisioner::create_aggregator_from_definition;
pub use rpc::SwitchboardRpc;
pub use state::{AggregatorDefinition, AggregatorSchema, JobSchema, LeaseSchema, PermissionSchema};
pub use store::{load_aggregator_definition, save_aggregator_schema};
