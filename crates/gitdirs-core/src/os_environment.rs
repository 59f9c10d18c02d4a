// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::env;

/// Read-only view of the process environment. All discovery code goes
/// through this trait so tests can substitute their own variables without
/// mutating process-wide state.
pub trait Environment: Send + Sync {
    fn get_env_var(&self, key: &str) -> Option<String>;
}

pub struct EnvironmentApi {}

impl EnvironmentApi {
    pub fn new() -> Self {
        EnvironmentApi {}
    }
}

impl Default for EnvironmentApi {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for EnvironmentApi {
    fn get_env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
