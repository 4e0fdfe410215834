// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to environment-variable style configuration. `SystemEnvironment` reads the process
//! environment; `MapEnvironment` holds fixed values for tests and embedding hosts.

mod map;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// A value that is set but blank is treated as unset.
    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn blank_values_are_unset() {
        let env = MapEnvironment::from([("A", "  "), ("B", "/tmp")]);

        assert_eq!(env.get_non_empty("A"), None);
        assert_eq!(env.get_non_empty("B").as_deref(), Some("/tmp"));
        assert_eq!(env.get_non_empty("C"), None);
    }
}
