// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use codemap::Span;
use codemap_diagnostic::Diagnostic;
use script_ast::{
    SourceUnit,
    ast_types::{AstExpr, StaticCall},
};

use crate::{error::TransformError, transformation::SiteOutcome};

use super::{
    MY_TYPE_NAME,
    resolver::{DeclarationTarget, ScriptUri},
};

pub const URI_TYPE: &str = "URI";
pub const URI_FACTORY: &str = "create";

/// `URI.create("<uri>")`, positioned at `span`.
pub fn uri_expression(uri: &ScriptUri, span: Span) -> AstExpr {
    AstExpr::StaticCall(StaticCall {
        owner: URI_TYPE.to_string(),
        method: URI_FACTORY.to_string(),
        arguments: vec![AstExpr::StringLiteral(uri.to_string(), span)],
        span,
    })
}

/// Either install the URI initializer or record why it could not be computed.
pub fn apply(
    target: DeclarationTarget,
    outcome: Result<ScriptUri, Diagnostic>,
    unit: &mut SourceUnit,
    errors: &mut Vec<Diagnostic>,
) -> Result<SiteOutcome, TransformError> {
    match outcome {
        Ok(uri) => {
            let expr = uri_expression(&uri, target.span());
            let expr_id = unit.replace_initializer(target.id(), expr)?;
            tracing::debug!(unit = %unit.name, %uri, "Installed source URI initializer");
            Ok(SiteOutcome::Rewritten(expr_id))
        }
        Err(diagnostic) => {
            tracing::debug!(
                unit = %unit.name,
                message = %diagnostic.message,
                "Rejected {MY_TYPE_NAME} site"
            );
            errors.push(diagnostic);
            Ok(SiteOutcome::Reported)
        }
    }
}
