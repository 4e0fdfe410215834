// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use codemap_diagnostic::Diagnostic;
use script_ast::{NodeId, SourceUnit};

use crate::error::TransformError;

/// Compiler phases a transformation can be scheduled in, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompilePhase {
    Conversion,
    SemanticAnalysis,
    Canonicalization,
}

/// What happened to one annotation site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiteOutcome {
    /// The annotation belongs to some other transformation
    Skipped,
    /// The initializer slot now holds the synthesized expression with this id
    Rewritten(NodeId),
    /// A diagnostic was recorded and the tree left untouched
    Reported,
}

/// An annotation-triggered rewrite of a [`SourceUnit`].
///
/// The host calls `visit` once per `[annotation, annotated node]` pair it finds. Problems in
/// user code are pushed to `errors`; an `Err` return means the host broke the calling
/// contract and compilation cannot sensibly continue.
pub trait AstTransformation {
    fn phase(&self) -> CompilePhase;

    fn visit(
        &self,
        nodes: &[NodeId],
        unit: &mut SourceUnit,
        errors: &mut Vec<Diagnostic>,
    ) -> Result<SiteOutcome, TransformError>;
}
