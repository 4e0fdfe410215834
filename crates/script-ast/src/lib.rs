// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The host-side source tree that annotation transformations operate on.
//!
//! Nodes live in a single arena owned by a [`SourceUnit`] and refer to each other through
//! [`NodeId`]s. Transformations never hold references into the tree across invocations; they
//! receive node ids and mutate the tree only through the operations `SourceUnit` exposes.

pub mod ast_types;
pub mod error;
pub mod source_unit;

pub use ast_types::NodeId;
pub use error::AstError;
pub use source_unit::{SourceLocation, SourceUnit};
