// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use codemap_diagnostic::Diagnostic;
use script_ast::SourceUnit;

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod script_uri;
pub mod transformation;
mod util;

#[cfg(test)]
mod test_support;

pub use config::TransformConfig;
pub use diagnostics::{DiagnosticSpan, diagnostic_span, emit_diagnostics, render_diagnostics};
pub use error::TransformError;
pub use script_uri::ScriptUriTransformation;
pub use transformation::{AstTransformation, CompilePhase, SiteOutcome};

/// Run every transformation scheduled for `phase` over each annotation site of `unit`.
///
/// User errors accumulate in `errors` and never stop the run, so one bad site does not hide
/// problems at the others. Only a host contract violation ends the run early.
pub fn run(
    phase: CompilePhase,
    transformations: &[Box<dyn AstTransformation>],
    unit: &mut SourceUnit,
    errors: &mut Vec<Diagnostic>,
) -> Result<Vec<SiteOutcome>, TransformError> {
    let active = transformations
        .iter()
        .filter(|t| t.phase() == phase)
        .collect::<Vec<_>>();

    let mut outcomes = vec![];

    for site in unit.annotation_sites() {
        for transformation in active.iter() {
            match transformation.visit(&site, unit, errors)? {
                SiteOutcome::Skipped => {}
                outcome => outcomes.push(outcome),
            }
        }
    }

    tracing::debug!(
        unit = %unit.name,
        sites = outcomes.len(),
        errors = errors.len(),
        "Applied {phase:?} transformations"
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use script_ast::{
        NodeId, SourceLocation,
        ast_types::{AstAnnotationParams, AstClass, AstExpr, AstNode},
    };

    use super::*;
    use crate::test_support::{TestSource, annotation, declaration, field, number};
    use multiplatform_test::multiplatform_test;

    const SRC: &str = r#"@ScriptURI def first
@ScriptURI def (a, b) = pair
class Holder {
  @ScriptURI def second
  @ScriptURI def third = 5
}
"#;

    fn transformations() -> Vec<Box<dyn AstTransformation>> {
        vec![Box::new(ScriptUriTransformation::default())]
    }

    /// `SRC` as a unit, returning the ids of `first`, the destructuring declaration,
    /// `second` and `third`.
    fn build(source: &TestSource, location: Option<SourceLocation>) -> (SourceUnit, [NodeId; 4]) {
        let mut unit = source.unit(location);

        let ann = annotation(&mut unit, source, "ScriptURI", AstAnnotationParams::None);
        let first = unit.add_statement(declaration(
            source,
            &["first"],
            vec![ann],
            None,
            source.span_of("def first"),
        ));

        let ann = annotation(&mut unit, source, "ScriptURI", AstAnnotationParams::None);
        let pair = unit.add_node(AstNode::Expr(AstExpr::Variable(source.identifier("pair"))));
        let multi = unit.add_statement(declaration(
            source,
            &["a", "b"],
            vec![ann],
            Some(pair),
            source.span_of("def (a, b) = pair"),
        ));

        let ann = annotation(&mut unit, source, "ScriptURI", AstAnnotationParams::None);
        let second = unit.add_node(field(
            source,
            "second",
            vec![ann],
            None,
            source.span_of("def second"),
        ));

        let ann = annotation(&mut unit, source, "ScriptURI", AstAnnotationParams::None);
        let five = number(&mut unit, source, 5, "5");
        let third = unit.add_node(field(
            source,
            "third",
            vec![ann],
            Some(five),
            source.span_of("def third = 5"),
        ));

        unit.add_class(AstClass {
            name: source.identifier("Holder"),
            annotations: vec![],
            fields: vec![second, third],
            methods: vec![],
            span: source.span_of("class Holder"),
        });

        (unit, [first, multi, second, third])
    }

    fn rendered_locations(errors: &[Diagnostic], source: &TestSource) -> String {
        errors
            .iter()
            .map(|d| {
                let span = diagnostic_span(d, &source.codemap).unwrap();
                format!("{}:{}:{} {}", span.file, span.start_line, span.start_col, d.message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[multiplatform_test]
    fn every_site_is_processed() {
        let source = TestSource::new("a.src", SRC);
        let (mut unit, [first, multi, second, third]) = build(
            &source,
            Some(SourceLocation::Uri("file:/tmp/a.src".to_string())),
        );
        let mut errors = vec![];

        let outcomes = run(
            CompilePhase::SemanticAnalysis,
            &transformations(),
            &mut unit,
            &mut errors,
        )
        .unwrap();

        assert_eq!(outcomes.len(), 4);
        assert!(matches!(outcomes[0], SiteOutcome::Rewritten(_)));
        assert_eq!(outcomes[1], SiteOutcome::Reported);
        assert!(matches!(outcomes[2], SiteOutcome::Rewritten(_)));
        assert_eq!(outcomes[3], SiteOutcome::Reported);

        for id in [first, second] {
            let Some(AstExpr::StaticCall(call)) = unit.initializer(id).unwrap() else {
                panic!("expected a URI initializer");
            };
            assert_eq!(call.to_string(), r#"URI.create("file:/tmp/a.src")"#);
        }
        assert!(matches!(
            unit.initializer(multi).unwrap(),
            Some(AstExpr::Variable(_))
        ));
        assert!(matches!(
            unit.initializer(third).unwrap(),
            Some(AstExpr::NumberLiteral(5, _))
        ));

        insta::assert_snapshot!(rendered_locations(&errors, &source), @r"
        a.src:2:12 Annotation @ScriptURI not supported with multiple assignment notation.
        a.src:5:14 Annotation @ScriptURI not supported with variable assignment.
        ");
    }

    #[multiplatform_test]
    fn unresolvable_source_reports_each_site() {
        let source = TestSource::new("a.src", SRC);
        let (mut unit, [first, _, second, _]) = build(&source, None);
        let mut errors = vec![];

        run(
            CompilePhase::SemanticAnalysis,
            &transformations(),
            &mut unit,
            &mut errors,
        )
        .unwrap();

        assert_eq!(unit.initializer(first).unwrap(), None);
        assert_eq!(unit.initializer(second).unwrap(), None);

        insta::assert_snapshot!(rendered_locations(&errors, &source), @r"
        a.src:1:12 Annotation @ScriptURI was unable to get the URI for the source of this script!
        a.src:2:12 Annotation @ScriptURI not supported with multiple assignment notation.
        a.src:4:14 Annotation @ScriptURI was unable to get the URI for the source of this class!
        a.src:5:14 Annotation @ScriptURI not supported with variable assignment.
        ");
    }

    #[multiplatform_test]
    fn other_phases_do_nothing() {
        let source = TestSource::new("a.src", SRC);
        let (mut unit, [first, ..]) = build(
            &source,
            Some(SourceLocation::Uri("file:/tmp/a.src".to_string())),
        );
        let mut errors = vec![];

        let outcomes = run(
            CompilePhase::Conversion,
            &transformations(),
            &mut unit,
            &mut errors,
        )
        .unwrap();

        assert!(outcomes.is_empty());
        assert!(errors.is_empty());
        assert_eq!(unit.initializer(first).unwrap(), None);
    }
}
