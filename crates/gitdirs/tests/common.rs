// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use gitdirs_core::os_environment::Environment;
use std::collections::HashMap;

pub struct MockEnvironment {
    env_vars: HashMap<String, String>,
}

#[allow(dead_code)]
impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            env_vars: HashMap::new(),
        }
    }

    pub fn with_env_var(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for MockEnvironment {
    fn get_env_var(&self, key: &str) -> Option<String> {
        self.env_vars.get(key).cloned()
    }
}
