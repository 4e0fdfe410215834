// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fmt::{Display, Formatter},
    path::{Component, Path},
};

use codemap::Span;
use codemap_diagnostic::Diagnostic;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use script_ast::{NodeId, SourceLocation, SourceUnit, ast_types::AstNode};
use url::{ParseError, Url};

use crate::{
    config::TransformConfig,
    diagnostics::{self, USAGE_ERROR_CODE},
};

use super::MY_TYPE_NAME;

/// Characters escaped in a path segment. `:` is included so a leading segment never reads as
/// a scheme.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b':')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The two shapes `@ScriptURI` may legally decorate, with what the validator needs to know
/// about each.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclarationTarget {
    SingleVariableDeclaration {
        id: NodeId,
        span: Span,
        multiple_assignment: bool,
        has_initializer: bool,
    },
    UninitializedField {
        id: NodeId,
        span: Span,
        has_initializer: bool,
    },
}

impl DeclarationTarget {
    /// `None` for nodes that are neither a declaration nor a field.
    pub fn classify(id: NodeId, node: &AstNode) -> Option<Self> {
        match node {
            AstNode::Declaration(d) => Some(Self::SingleVariableDeclaration {
                id,
                span: d.span,
                multiple_assignment: d.is_multiple_assignment(),
                has_initializer: d.initializer.is_some(),
            }),
            AstNode::Field(f) => Some(Self::UninitializedField {
                id,
                span: f.span,
                has_initializer: f.initializer.is_some(),
            }),
            AstNode::Annotation(_) | AstNode::Method(_) | AstNode::Class(_) | AstNode::Expr(_) => {
                None
            }
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Self::SingleVariableDeclaration { id, .. } | Self::UninitializedField { id, .. } => {
                *id
            }
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::SingleVariableDeclaration { span, .. }
            | Self::UninitializedField { span, .. } => *span,
        }
    }

    /// What the source is called in messages about this target.
    fn source_kind(&self) -> &'static str {
        match self {
            Self::SingleVariableDeclaration { .. } => "script",
            Self::UninitializedField { .. } => "class",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptUriFlags {
    pub allow_relative: bool,
}

/// A URI reference for a source unit, either absolute (has a scheme) or relative.
///
/// The string form is kept exactly as given; only resolution against a base produces a
/// normalized string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptUri {
    uri: String,
    absolute: bool,
}

impl ScriptUri {
    pub fn parse(uri: &str) -> Result<Self, ParseError> {
        match Url::parse(uri) {
            Ok(_) => Ok(Self {
                uri: uri.to_string(),
                absolute: true,
            }),
            Err(ParseError::RelativeUrlWithoutBase) => Ok(Self {
                uri: uri.to_string(),
                absolute: false,
            }),
            Err(e) => Err(e),
        }
    }

    /// The URI of a file on disk. Absolute paths become `file:` URIs; relative paths become
    /// relative references with `/` separators and percent-encoded segments.
    pub fn from_path(path: &Path) -> Option<Self> {
        if path.is_absolute() {
            return Url::from_file_path(path).ok().map(|url| Self {
                uri: url.to_string(),
                absolute: true,
            });
        }

        let segments = path
            .components()
            .map(|component| match component {
                Component::Normal(segment) => segment
                    .to_str()
                    .map(|s| utf8_percent_encode(s, PATH_SEGMENT).to_string()),
                Component::CurDir => Some(".".to_string()),
                Component::ParentDir => Some("..".to_string()),
                Component::RootDir | Component::Prefix(_) => None,
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            uri: segments.join("/"),
            absolute: false,
        })
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn resolve_against(&self, base: &Url) -> Result<Self, ParseError> {
        let resolved = base.join(&self.uri)?;
        Ok(Self {
            uri: resolved.to_string(),
            absolute: true,
        })
    }
}

impl Display for ScriptUri {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Check that `target` can receive a URI initializer and compute that URI.
///
/// Rules apply in order and the first failure wins: destructuring declarations, then an
/// already-present initializer, then URI resolution. Nothing is mutated.
pub fn validate_and_resolve(
    target: DeclarationTarget,
    flags: ScriptUriFlags,
    unit: &SourceUnit,
    config: &TransformConfig,
) -> Result<ScriptUri, Diagnostic> {
    match target {
        DeclarationTarget::SingleVariableDeclaration {
            multiple_assignment: true,
            ..
        } => {
            return Err(diagnostics::error(
                format!(
                    "Annotation {MY_TYPE_NAME} not supported with multiple assignment notation."
                ),
                USAGE_ERROR_CODE,
                target.span(),
                None,
            ));
        }
        DeclarationTarget::SingleVariableDeclaration {
            has_initializer: true,
            ..
        }
        | DeclarationTarget::UninitializedField {
            has_initializer: true,
            ..
        } => {
            return Err(diagnostics::error(
                format!("Annotation {MY_TYPE_NAME} not supported with variable assignment."),
                USAGE_ERROR_CODE,
                target.span(),
                Some("remove the initializer".to_string()),
            ));
        }
        DeclarationTarget::SingleVariableDeclaration { .. }
        | DeclarationTarget::UninitializedField { .. } => {}
    }

    source_uri(unit, flags, config).map_err(|reason| {
        diagnostics::error(
            format!(
                "Annotation {MY_TYPE_NAME} was unable to get the URI for the source of this {}!",
                target.source_kind()
            ),
            USAGE_ERROR_CODE,
            target.span(),
            Some(reason),
        )
    })
}

/// The URI of the unit's recorded location, absolutized unless relative URIs are allowed.
/// The error is a short reason suitable for a diagnostic label.
pub fn source_uri(
    unit: &SourceUnit,
    flags: ScriptUriFlags,
    config: &TransformConfig,
) -> Result<ScriptUri, String> {
    let uri = match unit.location() {
        None => return Err(format!("no source location is known for '{}'", unit.name)),
        Some(SourceLocation::Uri(uri)) => {
            ScriptUri::parse(uri).map_err(|e| format!("'{uri}' is not a valid URI: {e}"))?
        }
        Some(SourceLocation::Path(path)) => ScriptUri::from_path(path)
            .ok_or_else(|| format!("'{}' cannot be expressed as a URI", path.display()))?,
    };

    if uri.is_absolute() || flags.allow_relative {
        return Ok(uri);
    }

    // Best effort: treat the relative URI as a path under the working directory. Sources
    // that are not files may not end up with a meaningful URI.
    let base = config.base_uri().map_err(|e| {
        tracing::warn!(unit = %unit.name, "Cannot absolutize source URI: {e}");
        e.to_string()
    })?;

    tracing::debug!(unit = %unit.name, %uri, %base, "Resolving relative source URI");

    uri.resolve_against(&base)
        .map_err(|e| format!("'{uri}' cannot be resolved against '{base}': {e}"))
}
