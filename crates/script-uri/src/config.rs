// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use script_env::Environment;
use url::Url;

use crate::error::BaseUriError;

/// Overrides the directory used to absolutize relative source URIs.
pub const BASE_DIR_ENV: &str = "SCRIPT_URI_BASE_DIR";

#[derive(Debug, Clone, Default)]
pub struct TransformConfig {
    /// Directory relative source URIs are resolved against. `None` means the process's
    /// working directory at the time of resolution.
    pub base_dir: Option<PathBuf>,
}

impl TransformConfig {
    pub fn from_env(env: &dyn Environment) -> Self {
        Self {
            base_dir: env.get_non_empty(BASE_DIR_ENV).map(PathBuf::from),
        }
    }

    /// The directory URI (with a trailing slash) that relative URIs are joined onto.
    pub fn base_uri(&self) -> Result<Url, BaseUriError> {
        let dir = match &self.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => std::env::current_dir()?.join(dir),
            None => std::env::current_dir()?,
        };

        Url::from_directory_path(&dir).map_err(|_| BaseUriError::NotADirectoryPath(dir))
    }
}
