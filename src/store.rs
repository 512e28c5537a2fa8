use std::fs;
use std::path::Path;

use dialoguer::{console::Term, Confirm};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::state::AggregatorSchema;

/// Decides whether an existing schema file may be replaced.
pub trait OverwritePrompt {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool, StoreError>;
}

/// Asks on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl OverwritePrompt for TerminalPrompt {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool, StoreError> {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "{} already exists. Do you want to overwrite this file?",
                path.display()
            ))
            .default(false)
            .interact_on(&Term::stderr())?;
        Ok(confirmed)
    }
}

/// Answers every prompt the same way, for headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl OverwritePrompt for FixedAnswer {
    fn confirm_overwrite(&self, _path: &Path) -> Result<bool, StoreError> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Written,
    Skipped,
}

/// Loads an aggregator definition.
///
/// A missing file is an error. A file that exists but does not parse as a
/// schema yields `Ok(None)`, leaving it to the caller to decide how to react.
pub fn load_aggregator_definition(path: &Path) -> Result<Option<AggregatorSchema>, StoreError> {
    if !path.exists() {
        return Err(StoreError::DefinitionNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&text) {
        Ok(definition) => Ok(Some(definition)),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "aggregator definition did not parse");
            Ok(None)
        }
    }
}

/// Writes `schema` to `path` as pretty-printed JSON, replacing any prior
/// content. An existing file is only replaced when `force` is set or the
/// prompt agrees; a declined prompt leaves the file alone.
pub fn save_aggregator_schema(
    schema: &AggregatorSchema,
    path: &Path,
    force: bool,
    prompt: &dyn OverwritePrompt,
) -> Result<SaveOutcome, StoreError> {
    if !force && path.exists() && !prompt.confirm_overwrite(path)? {
        info!(path = %path.display(), "Aggregator Schema: already existed, skipping");
        return Ok(SaveOutcome::Skipped);
    }
    let text = serde_json::to_string_pretty(schema).map_err(StoreError::Serialize)?;
    fs::write(path, text).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "Aggregator Schema: saved");
    Ok(SaveOutcome::Written)
}
