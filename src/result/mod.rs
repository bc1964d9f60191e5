// src/result/mod.rs

//! Task results.
//!
//! - [`data`] is the plain value object (exit code, message, data bag,
//!   execution time).
//! - [`lifecycle`] binds it to the producing task and provides the
//!   classification constructors, logging context and task cloning.
//! - [`policy`] holds the explicit reporting step and the stop-on-fail
//!   policy.

pub mod data;
pub mod lifecycle;
pub mod policy;

pub use data::{
    ALREADY_PRINTED_KEY, DataBag, EXITCODE_ERROR, EXITCODE_OK, EXITCODE_USER_CANCEL, OUTPUT_KEY,
    ResultData,
};
pub use lifecycle::TaskResult;
pub use policy::{ExecutionContext, Outcome};
