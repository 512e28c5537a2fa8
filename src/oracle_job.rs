//! Binary encoding of a job's task list.
//!
//! The oracle program stores a job as a length-delimited `OracleJob` protobuf
//! message. Definitions write tasks in the program's JSON vocabulary
//! (`{"httpTask": {"url": ...}}`); each one is read straight into the
//! generated `Task` type and the assembled job is encoded as-is.

use prost::Message;
use serde::Deserialize;
use serde_json::Value;
use switchboard_protos::oracle_job::oracle_job::Task;
use switchboard_protos::OracleJob;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobEncodeError {
    #[error("job has no tasks")]
    NoTasks,
    #[error("task {index} is not a valid oracle task")]
    InvalidTask {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a JSON task list into an [`OracleJob`].
pub fn parse_oracle_job(tasks: &[Value]) -> Result<OracleJob, JobEncodeError> {
    if tasks.is_empty() {
        return Err(JobEncodeError::NoTasks);
    }
    let tasks = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            Task::deserialize(task).map_err(|source| JobEncodeError::InvalidTask { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(OracleJob {
        tasks,
        weight: None,
    })
}

/// Encodes a JSON task list as the program's length-delimited job data.
pub fn encode_job_data(tasks: &[Value]) -> Result<Vec<u8>, JobEncodeError> {
    parse_oracle_job(tasks).map(|job| job.encode_length_delimited_to_vec())
}
