// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, ResultError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ResultError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_names(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(ResultError::ConfigError(
            "config must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, task) in cfg.task.iter().enumerate() {
        if task.name.trim().is_empty() {
            return Err(ResultError::ConfigError(format!(
                "task #{} has an empty `name`",
                idx + 1
            )));
        }
        if task.kind.trim().is_empty() {
            return Err(ResultError::ConfigError(format!(
                "task '{}' has an empty `kind`",
                task.name
            )));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(ResultError::ConfigError(format!(
                "duplicate task name '{}'",
                task.name
            )));
        }
    }
    Ok(())
}
