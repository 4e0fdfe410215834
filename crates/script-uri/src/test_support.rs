// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use codemap::{CodeMap, File, Span};
use script_ast::{
    NodeId, SourceLocation, SourceUnit,
    ast_types::{
        AstAnnotation, AstAnnotationParams, AstDeclaration, AstExpr, AstField, AstNode,
        DeclarationLhs, Identifier,
    },
};

/// Source text registered in a `CodeMap`, so tests can anchor nodes at real positions.
pub struct TestSource {
    pub codemap: CodeMap,
    file: Arc<File>,
}

impl TestSource {
    pub fn new(name: &str, src: &str) -> Self {
        let mut codemap = CodeMap::new();
        let file = codemap.add_file(name.to_string(), src.to_string());
        Self { codemap, file }
    }

    pub fn unit(&self, location: Option<SourceLocation>) -> SourceUnit {
        SourceUnit::new(self.file.name(), location)
    }

    /// Span of the first occurrence of `needle`.
    pub fn span_of(&self, needle: &str) -> Span {
        let start = self
            .file
            .source()
            .find(needle)
            .unwrap_or_else(|| panic!("`{needle}` not found in test source"));
        self.file
            .span
            .subspan(start as u64, (start + needle.len()) as u64)
    }

    pub fn identifier(&self, name: &str) -> Identifier {
        Identifier(name.to_string(), self.span_of(name))
    }
}

pub fn annotation(
    unit: &mut SourceUnit,
    source: &TestSource,
    name: &str,
    params: AstAnnotationParams,
) -> NodeId {
    unit.add_node(AstNode::Annotation(AstAnnotation {
        name: name.to_string(),
        params,
        span: source.span_of(&format!("@{name}")),
    }))
}

/// A declaration of `names`; more than one name makes it a destructuring declaration.
pub fn declaration(
    source: &TestSource,
    names: &[&str],
    annotations: Vec<NodeId>,
    initializer: Option<NodeId>,
    span: Span,
) -> AstNode {
    let lhs = match names {
        [name] => DeclarationLhs::Single(source.identifier(name)),
        _ => DeclarationLhs::Multiple(names.iter().map(|n| source.identifier(n)).collect()),
    };

    AstNode::Declaration(AstDeclaration {
        lhs,
        typ: None,
        annotations,
        initializer,
        span,
    })
}

pub fn field(
    source: &TestSource,
    name: &str,
    annotations: Vec<NodeId>,
    initializer: Option<NodeId>,
    span: Span,
) -> AstNode {
    AstNode::Field(AstField {
        name: source.identifier(name),
        typ: None,
        annotations,
        initializer,
        span,
    })
}

pub fn number(unit: &mut SourceUnit, source: &TestSource, value: i64, text: &str) -> NodeId {
    unit.add_node(AstNode::Expr(AstExpr::NumberLiteral(
        value,
        source.span_of(text),
    )))
}
