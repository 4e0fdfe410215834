// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `@ScriptURI` transformation.
//!
//! Placed on an uninitialized declaration or field, the annotation gives it an initializer
//! holding the URI of the source being compiled:
//!
//! ```text
//! @ScriptURI def uri        // becomes  def uri = URI.create("file:/.../a.src")
//! ```
//!
//! Relative source URIs are resolved against the working directory unless the annotation
//! says `@ScriptURI(allowRelative = true)`.

use codemap_diagnostic::Diagnostic;
use script_ast::{
    NodeId, SourceUnit,
    ast_types::{AstAnnotation, AstExpr, AstNode},
};
use script_env::SystemEnvironment;

use crate::{
    config::TransformConfig,
    diagnostics::{self, TARGET_ERROR_CODE},
    error::TransformError,
    transformation::{AstTransformation, CompilePhase, SiteOutcome},
    util,
};

pub mod resolver;
pub mod rewriter;

use resolver::{DeclarationTarget, ScriptUriFlags};

pub const MY_TYPE_NAME: &str = "@ScriptURI";
pub const ALLOW_RELATIVE: &str = "allowRelative";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationTarget {
    Declaration,
    Field,
}

pub struct AnnotationSpec {
    /// Simple and qualified names the annotation may be written with
    pub names: &'static [&'static str],
    pub targets: &'static [AnnotationTarget],
}

pub const SCRIPT_URI_SPEC: AnnotationSpec = AnnotationSpec {
    names: &["ScriptURI", "groovy.transform.ScriptURI"],
    targets: &[AnnotationTarget::Declaration, AnnotationTarget::Field],
};

impl ScriptUriFlags {
    /// Only a literal `true` enables `allowRelative`; any other value leaves the default.
    pub fn from_annotation(annotation: &AstAnnotation) -> Self {
        Self {
            allow_relative: annotation
                .member(ALLOW_RELATIVE)
                .is_some_and(|value| matches!(value, AstExpr::BooleanLiteral(true, _))),
        }
    }
}

pub struct ScriptUriTransformation {
    config: TransformConfig,
}

impl Default for ScriptUriTransformation {
    /// Configured from the process environment.
    fn default() -> Self {
        Self::new(TransformConfig::from_env(&SystemEnvironment))
    }
}

impl ScriptUriTransformation {
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    fn is_mine(annotation: &AstAnnotation) -> bool {
        SCRIPT_URI_SPEC.names.contains(&annotation.name.as_str())
    }
}

impl AstTransformation for ScriptUriTransformation {
    fn phase(&self) -> CompilePhase {
        CompilePhase::SemanticAnalysis
    }

    fn visit(
        &self,
        nodes: &[NodeId],
        unit: &mut SourceUnit,
        errors: &mut Vec<Diagnostic>,
    ) -> Result<SiteOutcome, TransformError> {
        let (annotation, annotated) = site(nodes, unit)?;

        if !Self::is_mine(annotation) {
            return Ok(SiteOutcome::Skipped);
        }

        let flags = ScriptUriFlags::from_annotation(annotation);
        let Some(target) = DeclarationTarget::classify(nodes[1], annotated) else {
            errors.push(wrong_target(annotated));
            return Ok(SiteOutcome::Reported);
        };

        tracing::debug!(unit = %unit.name, ?target, ?flags, "Dispatching {MY_TYPE_NAME}");

        let outcome = resolver::validate_and_resolve(target, flags, unit, &self.config);
        rewriter::apply(target, outcome, unit, errors)
    }
}

/// Check the host handed us exactly `[annotation, annotated node]`.
fn site<'a>(
    nodes: &[NodeId],
    unit: &'a SourceUnit,
) -> Result<(&'a AstAnnotation, &'a AstNode), TransformError> {
    match nodes {
        [annotation, annotated] => match (unit.get(*annotation), unit.get(*annotated)) {
            (Some(AstNode::Annotation(annotation)), Some(annotated))
                if annotated.is_annotated() =>
            {
                Ok((annotation, annotated))
            }
            _ => Err(malformed_site(nodes, unit)),
        },
        _ => Err(malformed_site(nodes, unit)),
    }
}

fn malformed_site(nodes: &[NodeId], unit: &SourceUnit) -> TransformError {
    let kinds = nodes
        .iter()
        .map(|id| unit.get(*id).map_or("<unknown node>", |node| node.kind()))
        .collect::<Vec<_>>();
    TransformError::MalformedSite(kinds.join(", "))
}

fn wrong_target(node: &AstNode) -> Diagnostic {
    let targets = SCRIPT_URI_SPEC
        .targets
        .iter()
        .map(|t| format!("{t:?}").to_lowercase())
        .collect::<Vec<_>>();

    diagnostics::error(
        format!("Expected to find the annotation {MY_TYPE_NAME} on a declaration statement."),
        TARGET_ERROR_CODE,
        node.span(),
        Some(format!(
            "only applies to targets: {}",
            util::join_words(&targets, "or")
        )),
    )
}
