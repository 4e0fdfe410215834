// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use codemap::{CodeMap, Span};
use codemap_diagnostic::{ColorConfig, Diagnostic, Emitter, Level, SpanLabel, SpanStyle};

/// Error for the annotation being placed on a node it cannot apply to.
pub const TARGET_ERROR_CODE: &str = "A000";
/// Error for an otherwise well-placed annotation that cannot be honored.
pub const USAGE_ERROR_CODE: &str = "C000";

pub(crate) fn error(
    message: String,
    code: &str,
    span: Span,
    label: Option<String>,
) -> Diagnostic {
    Diagnostic {
        level: Level::Error,
        message,
        code: Some(code.to_string()),
        spans: vec![SpanLabel {
            span,
            style: SpanStyle::Primary,
            label,
        }],
    }
}

/// Source coordinates of a diagnostic's primary span. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticSpan {
    pub file: String,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

pub fn diagnostic_span(diagnostic: &Diagnostic, codemap: &CodeMap) -> Option<DiagnosticSpan> {
    let primary = diagnostic
        .spans
        .iter()
        .find(|label| matches!(label.style, SpanStyle::Primary))?;
    let loc = codemap.look_up_span(primary.span);

    Some(DiagnosticSpan {
        file: loc.file.name().to_string(),
        start_line: loc.begin.line + 1,
        start_col: loc.begin.column + 1,
        end_line: loc.end.line + 1,
        end_col: loc.end.column + 1,
    })
}

pub fn emit_diagnostics(diagnostics: &[Diagnostic], codemap: &CodeMap) {
    let mut emitter = Emitter::stderr(ColorConfig::Auto, Some(codemap));
    emitter.emit(diagnostics);
}

/// Render diagnostics the way [`emit_diagnostics`] would, without colors.
pub fn render_diagnostics(diagnostics: &[Diagnostic], codemap: &CodeMap) -> String {
    let mut out = Vec::new();
    {
        let mut emitter = Emitter::vec(&mut out, Some(codemap));
        emitter.emit(diagnostics);
    }
    String::from_utf8_lossy(&out).into_owned()
}
