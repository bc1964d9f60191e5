#![allow(dead_code)]

use taskresult::config::{ConfigFile, ConfigSection, RawConfigFile, TaskConfig};
use taskresult::task::TaskArgs;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                task: Vec::new(),
            },
        }
    }

    pub fn with_task(mut self, task: TaskConfig) -> Self {
        self.config.task.push(task);
        self
    }

    pub fn stop_on_fail(mut self, val: bool) -> Self {
        self.config.config.stop_on_fail = val;
        self
    }

    pub fn print_results(mut self, val: bool) -> Self {
        self.config.config.print_results = val;
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `TaskConfig`.
pub struct TaskConfigBuilder {
    task: TaskConfig,
}

impl TaskConfigBuilder {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            task: TaskConfig {
                name: name.to_string(),
                kind: kind.to_string(),
                args: TaskArgs::new(),
            },
        }
    }

    /// `exec` task running `cmd`.
    pub fn exec(name: &str, cmd: &str) -> Self {
        Self::new(name, "exec").arg("cmd", cmd)
    }

    /// `echo` task with a message.
    pub fn echo(name: &str, message: &str) -> Self {
        Self::new(name, "echo").arg("message", message)
    }

    /// `fail` task with a message and explicit code.
    pub fn fail(name: &str, message: &str, code: i64) -> Self {
        Self::new(name, "fail").arg("message", message).arg("code", code)
    }

    pub fn arg(mut self, key: &str, value: impl Into<toml::Value>) -> Self {
        self.task.args.insert(key.to_string(), value.into());
        self
    }

    pub fn build(self) -> TaskConfig {
        self.task
    }
}
