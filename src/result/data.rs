// src/result/data.rs

//! The plain result-data value object.
//!
//! [`ResultData`] stores what a finished task produced: an exit code, a
//! message, an ordered bag of structured values, and (optionally) how long
//! the task took. It knows nothing about tasks or printers; that binding
//! lives in [`super::lifecycle`].

use std::time::Duration;

use serde_json::Value;

/// Exit code of a successful task.
pub const EXITCODE_OK: i32 = 0;

/// Generic failure code used when no more specific code is available.
pub const EXITCODE_ERROR: i32 = 1;

/// The user aborted the task (e.g. declined a confirmation).
pub const EXITCODE_USER_CANCEL: i32 = 2;

/// Bag key set once a printer has rendered the result.
pub const ALREADY_PRINTED_KEY: &str = "already-printed";

/// Bag key holding captured task output.
pub const OUTPUT_KEY: &str = "output";

/// Ordered mapping of structured auxiliary output.
///
/// Insertion order is preserved (`serde_json` is built with
/// `preserve_order`).
pub type DataBag = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    exit_code: i32,
    message: String,
    data: DataBag,
    execution_time: Option<Duration>,
}

impl ResultData {
    pub fn new(exit_code: i32, message: impl Into<String>, data: DataBag) -> Self {
        Self {
            exit_code,
            message: message.into(),
            data,
            execution_time: None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True iff the exit code equals [`EXITCODE_OK`].
    pub fn was_successful(&self) -> bool {
        self.exit_code == EXITCODE_OK
    }

    pub fn was_cancelled(&self) -> bool {
        self.exit_code == EXITCODE_USER_CANCEL
    }

    /// Read-only view of the data bag.
    pub fn data(&self) -> &DataBag {
        &self.data
    }

    /// Defensive copy of the data bag.
    pub fn array_copy(&self) -> DataBag {
        self.data.clone()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Add (or overwrite) a bag entry. Entries are never removed, and a set
    /// `already-printed` marker is never overwritten.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if key == ALREADY_PRINTED_KEY && self.already_printed() {
            return;
        }
        self.data.insert(key, value.into());
    }

    pub fn execution_time(&self) -> Option<Duration> {
        self.execution_time
    }

    /// Record the execution time unless one is already present.
    pub fn set_execution_time(&mut self, elapsed: Duration) {
        if self.execution_time.is_none() {
            self.execution_time = Some(elapsed);
        }
    }

    pub fn already_printed(&self) -> bool {
        matches!(self.data.get(ALREADY_PRINTED_KEY), Some(Value::Bool(true)))
    }

    /// Mark the result as rendered. There is deliberately no way to unset it.
    pub fn set_already_printed(&mut self) {
        self.data
            .insert(ALREADY_PRINTED_KEY.to_string(), Value::Bool(true));
    }

    /// Captured output, if the task stored any under `output`.
    pub fn output_data(&self) -> Option<&str> {
        self.data.get(OUTPUT_KEY).and_then(Value::as_str)
    }

    /// Fold another result's data into this one.
    ///
    /// Keys from `other` overwrite existing keys; messages are joined with a
    /// newline. The exit code and execution time are left untouched. A
    /// printed marker on either side stays set.
    pub fn merge(&mut self, other: &ResultData) {
        let printed = self.already_printed();
        for (key, value) in other.data.iter() {
            self.data.insert(key.clone(), value.clone());
        }
        if printed {
            self.set_already_printed();
        }

        if !other.message.is_empty() {
            if self.message.is_empty() {
                self.message = other.message.clone();
            } else {
                self.message.push('\n');
                self.message.push_str(&other.message);
            }
        }
    }
}
