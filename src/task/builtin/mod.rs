// src/task/builtin/mod.rs

//! Task kinds shipped with the crate.

pub mod exec;
pub mod require;
pub mod simple;

pub use exec::{ExecConfig, ExecTask};
pub use require::{RequireConfig, RequireTask};
pub use simple::{EchoConfig, EchoTask, FailConfig, FailTask};
