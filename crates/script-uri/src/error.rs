// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use script_ast::AstError;
use thiserror::Error;

/// Failures that indicate the host invoked a transformation incorrectly.
///
/// Problems with the user's source never end up here; those are reported as diagnostics.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Internal error: expecting [annotation, annotated node] but got: [{0}]")]
    MalformedSite(String),

    #[error("{0}")]
    Ast(#[from] AstError),
}

#[derive(Error, Debug)]
pub enum BaseUriError {
    #[error("unable to read the working directory: {0}")]
    WorkingDirectory(#[from] std::io::Error),

    #[error("'{}' cannot be used as a base URI", .0.display())]
    NotADirectoryPath(PathBuf),
}
