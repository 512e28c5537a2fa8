//! Creates an aggregator and everything it depends on, in dependency order:
//! aggregator, permission, funding token account, lease, jobs. The result is
//! then re-read from the ledger so the returned schema reflects what the
//! program actually stored rather than what was requested.
//!
//! A failure part way through leaves the accounts created so far on chain.
//! Nothing is retried or rolled back.

use anchor_lang::prelude::Pubkey;
use solana_sdk::signature::Keypair;
use tracing::info;

use crate::codec::{to_name_buffer, to_permission_string, to_utf8};
use crate::error::{ProvisionError, Step, StepContext};
use crate::ledger::{AggregatorInit, JobInit, LeaseInit, Ledger, OracleQueueAccount, PermissionInit};
use crate::oracle_job::encode_job_data;
use crate::state::{AggregatorSchema, JobSchema, LeaseSchema, PermissionSchema};

pub const DEFAULT_BATCH_SIZE: u32 = 1;
pub const DEFAULT_MIN_ORACLE_RESULTS: u32 = 1;
pub const DEFAULT_MIN_JOB_RESULTS: u32 = 1;
pub const DEFAULT_MIN_UPDATE_DELAY_SECONDS: u32 = 10;

/// A job that passed validation and is ready to be created.
struct PreparedJob<'a> {
    schema: &'a JobSchema,
    data: Vec<u8>,
}

/// Rejects a definition that cannot be provisioned. Runs before any ledger
/// call so bad input never leaves partial state behind.
fn prepare_jobs(definition: &AggregatorSchema) -> Result<Vec<PreparedJob<'_>>, ProvisionError> {
    if definition.jobs.is_empty() {
        return Err(ProvisionError::NoJobs);
    }
    definition
        .jobs
        .iter()
        .map(|job| {
            let tasks = job.tasks.as_deref().unwrap_or_default();
            encode_job_data(tasks)
                .map(|data| PreparedJob { schema: job, data })
                .map_err(|source| ProvisionError::InvalidJob {
                    name: job.display_name().to_string(),
                    source,
                })
        })
        .collect()
}

fn aggregator_init(
    definition: &AggregatorSchema,
    queue: &OracleQueueAccount,
    authority: Pubkey,
) -> AggregatorInit {
    AggregatorInit {
        name: to_name_buffer(&definition.name),
        batch_size: definition.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        min_oracle_results: definition
            .min_required_oracle_results
            .unwrap_or(DEFAULT_MIN_ORACLE_RESULTS),
        min_job_results: definition
            .min_required_job_results
            .unwrap_or(DEFAULT_MIN_JOB_RESULTS),
        min_update_delay_seconds: definition
            .min_update_delay_seconds
            .unwrap_or(DEFAULT_MIN_UPDATE_DELAY_SECONDS),
        queue: queue.public_key,
        authority,
    }
}

pub async fn create_aggregator_from_definition<L: Ledger + ?Sized>(
    ledger: &L,
    definition: &AggregatorSchema,
    queue: &OracleQueueAccount,
) -> Result<AggregatorSchema, ProvisionError> {
    let jobs = prepare_jobs(definition)?;
    let authority = ledger.authority();
    let feed_name = &definition.name;

    // Aggregator
    let aggregator = ledger
        .create_aggregator(&aggregator_init(definition, queue, authority))
        .await
        .during(Step::CreateAggregator)?;
    if aggregator == Pubkey::default() {
        return Err(ProvisionError::MissingAggregatorKey);
    }
    info!(%aggregator, "Aggregator ({feed_name})");

    // Permission
    let permission = ledger
        .create_permission(&PermissionInit {
            authority,
            granter: queue.public_key,
            grantee: aggregator,
        })
        .await
        .during(Step::CreatePermission)?;
    info!(
        permission = %permission.public_key,
        queue_permission = to_permission_string(permission.data.permissions),
        "  Permission"
    );

    // Lease, funded from the authority's token account
    let mint = ledger.resolve_mint().await.during(Step::ResolveTokenMint)?;
    let funder = ledger
        .ensure_token_account(&mint, &authority)
        .await
        .during(Step::EnsureTokenAccount)?;
    let lease = ledger
        .create_lease(&LeaseInit {
            load_amount: 0,
            funder,
            mint,
            queue: queue.public_key,
            aggregator,
        })
        .await
        .during(Step::CreateLease)?;
    info!(%lease, "  Lease");

    // Jobs
    let mut job_schemas = Vec::with_capacity(jobs.len());
    for PreparedJob { schema, data } in jobs {
        let name = schema.display_name().to_string();
        // The secret exists only here; it has to land in the schema now.
        let job_keypair = Keypair::new();
        let job = ledger
            .create_job(
                &JobInit {
                    name: to_name_buffer(schema.name.as_deref().unwrap_or_default()),
                    data,
                },
                &job_keypair,
            )
            .await
            .during(Step::CreateJob(name.clone()))?;
        info!(%job, "  Job ({name})");
        ledger
            .add_job(&aggregator, &job)
            .await
            .during(Step::AddJob(name))?;
        job_schemas.push(JobSchema {
            name: schema.name.clone(),
            public_key: Some(job),
            secret_key: Some(job_keypair.to_bytes().to_vec()),
            tasks: schema.tasks.clone(),
            extra: schema.extra.clone(),
        });
    }

    // Reconcile against what the program stored
    let aggregator_data = ledger
        .load_aggregator_data(&aggregator)
        .await
        .during(Step::LoadAggregator)?;
    let permission_data = ledger
        .load_permission_data(&permission.public_key)
        .await
        .during(Step::LoadPermission)?;

    for job in job_schemas.iter().filter_map(|job| job.public_key) {
        if !aggregator_data.job_pubkeys.contains(&job) {
            return Err(ProvisionError::JobNotAttached { job, aggregator });
        }
    }

    Ok(AggregatorSchema {
        name: to_utf8(&aggregator_data.name),
        public_key: Some(aggregator),
        batch_size: Some(aggregator_data.batch_size),
        min_required_oracle_results: Some(aggregator_data.min_oracle_results),
        min_required_job_results: Some(aggregator_data.min_job_results),
        min_update_delay_seconds: Some(aggregator_data.min_update_delay_seconds),
        permission: Some(PermissionSchema {
            name: None,
            public_key: Some(permission.public_key),
            expiration: Some(permission_data.expiration),
            queue_permission: to_permission_string(permission_data.permissions).to_string(),
            granter: Some(permission_data.granter),
            grantee: Some(permission_data.grantee),
        }),
        lease: Some(LeaseSchema {
            name: None,
            public_key: Some(lease),
        }),
        jobs: job_schemas,
        ..definition.clone()
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_settings_fall_back_to_defaults() {
        let definition = AggregatorSchema::new("BTC/USD", vec![]);
        let queue = OracleQueueAccount::new(Pubkey::new_unique());
        let authority = Pubkey::new_unique();
        let init = aggregator_init(&definition, &queue, authority);

        assert_eq!(to_utf8(&init.name), "BTC/USD");
        assert_eq!(init.batch_size, 1);
        assert_eq!(init.min_oracle_results, 1);
        assert_eq!(init.min_job_results, 1);
        assert_eq!(init.min_update_delay_seconds, 10);
        assert_eq!(init.queue, queue.public_key);
        assert_eq!(init.authority, authority);
    }

    #[test]
    fn explicit_settings_are_requested() {
        let mut definition = AggregatorSchema::new("BTC/USD", vec![]);
        definition.batch_size = Some(4);
        definition.min_required_oracle_results = Some(3);
        definition.min_required_job_results = Some(2);
        definition.min_update_delay_seconds = Some(60);
        let queue = OracleQueueAccount::new(Pubkey::new_unique());
        let init = aggregator_init(&definition, &queue, Pubkey::new_unique());

        assert_eq!(
            (
                init.batch_size,
                init.min_oracle_results,
                init.min_job_results,
                init.min_update_delay_seconds
            ),
            (4, 3, 2, 60)
        );
    }

    #[test]
    fn jobs_without_tasks_are_rejected() {
        let definition = AggregatorSchema::new(
            "BTC/USD",
            vec![
                JobSchema::new("ok", vec![json!({ "httpTask": { "url": "https://a" } })]),
                JobSchema { name: Some("empty".to_string()), ..JobSchema::default() },
            ],
        );
        match prepare_jobs(&definition) {
            Err(ProvisionError::InvalidJob { name, .. }) => assert_eq!(name, "empty"),
            Err(other) => panic!("Expected InvalidJob, got {other:?}"),
            Ok(_) => panic!("Expected InvalidJob"),
        }
    }
}
