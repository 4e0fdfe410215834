// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use codemap::{CodeMap, Span};
use serde::{Deserialize, Serialize};
use typed_generational_arena::{Arena, IgnoreGeneration, Index};

pub type NodeArena = Arena<AstNode, usize, IgnoreGeneration>;
pub type NodeId = Index<AstNode, usize, IgnoreGeneration>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AstNode {
    Annotation(AstAnnotation),
    Declaration(AstDeclaration),
    Field(AstField),
    Method(AstMethod),
    Class(AstClass),
    Expr(AstExpr),
}

impl AstNode {
    pub fn span(&self) -> Span {
        match self {
            AstNode::Annotation(a) => a.span,
            AstNode::Declaration(d) => d.span,
            AstNode::Field(f) => f.span,
            AstNode::Method(m) => m.span,
            AstNode::Class(c) => c.span,
            AstNode::Expr(e) => e.span(),
        }
    }

    /// Short name of the node kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AstNode::Annotation(_) => "annotation",
            AstNode::Declaration(_) => "declaration",
            AstNode::Field(_) => "field",
            AstNode::Method(_) => "method",
            AstNode::Class(_) => "class",
            AstNode::Expr(_) => "expression",
        }
    }

    /// Annotations attached to this node. `None` for nodes that cannot carry annotations.
    pub fn annotations(&self) -> Option<&[NodeId]> {
        match self {
            AstNode::Declaration(d) => Some(&d.annotations),
            AstNode::Field(f) => Some(&f.annotations),
            AstNode::Method(m) => Some(&m.annotations),
            AstNode::Class(c) => Some(&c.annotations),
            AstNode::Annotation(_) | AstNode::Expr(_) => None,
        }
    }

    pub fn is_annotated(&self) -> bool {
        self.annotations().is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AstAnnotation {
    pub name: String,
    pub params: AstAnnotationParams,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

impl AstAnnotation {
    /// The value of a named member (e.g. `allowRelative` in `@ScriptURI(allowRelative = true)`).
    pub fn member(&self, name: &str) -> Option<&AstExpr> {
        match &self.params {
            AstAnnotationParams::Map(params, _) => params.get(name),
            AstAnnotationParams::None | AstAnnotationParams::Single(..) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AstAnnotationParams {
    /// No parameters (e.g. `@ScriptURI`)
    None,
    /// Single parameter (e.g. `@Field("x")`)
    Single(
        AstExpr,
        #[serde(skip_serializing)]
        #[serde(skip_deserializing)]
        #[serde(default = "default_span")]
        Span,
    ),
    /// Named parameters (e.g. `@ScriptURI(allowRelative = true)`)
    Map(
        HashMap<String, AstExpr>,
        #[serde(skip_serializing)]
        #[serde(skip_deserializing)]
        HashMap<String, Vec<Span>>,
    ),
}

/// A local or script-scope declaration such as `def uri` or `def (a, b) = pair`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AstDeclaration {
    pub lhs: DeclarationLhs,
    pub typ: Option<String>,
    pub annotations: Vec<NodeId>,
    /// `None` until something is assigned
    pub initializer: Option<NodeId>,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

impl AstDeclaration {
    pub fn is_multiple_assignment(&self) -> bool {
        matches!(self.lhs, DeclarationLhs::Multiple(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum DeclarationLhs {
    Single(Identifier),
    /// Destructuring form, e.g. `(a, b)`
    Multiple(Vec<Identifier>),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AstField {
    pub name: Identifier,
    pub typ: Option<String>,
    pub annotations: Vec<NodeId>,
    pub initializer: Option<NodeId>,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AstMethod {
    pub name: Identifier,
    pub annotations: Vec<NodeId>,
    pub body: Vec<NodeId>,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AstClass {
    pub name: Identifier,
    pub annotations: Vec<NodeId>,
    pub fields: Vec<NodeId>,
    pub methods: Vec<NodeId>,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AstExpr {
    StringLiteral(
        String,
        #[serde(skip_serializing)]
        #[serde(skip_deserializing)]
        #[serde(default = "default_span")]
        Span,
    ),
    BooleanLiteral(
        bool,
        #[serde(skip_serializing)]
        #[serde(skip_deserializing)]
        #[serde(default = "default_span")]
        Span,
    ),
    NumberLiteral(
        i64,
        #[serde(skip_serializing)]
        #[serde(skip_deserializing)]
        #[serde(default = "default_span")]
        Span,
    ),
    Variable(Identifier),
    StaticCall(StaticCall),
}

impl AstExpr {
    pub fn span(&self) -> Span {
        match self {
            AstExpr::StringLiteral(_, s) => *s,
            AstExpr::BooleanLiteral(_, s) => *s,
            AstExpr::NumberLiteral(_, s) => *s,
            AstExpr::Variable(Identifier(_, s)) => *s,
            AstExpr::StaticCall(call) => call.span,
        }
    }
}

/// A call such as `URI.create("file:/tmp/a.src")`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaticCall {
    pub owner: String,
    pub method: String,
    pub arguments: Vec<AstExpr>,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub span: Span,
}

impl Display for StaticCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}(", self.owner, self.method)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match arg {
                AstExpr::StringLiteral(s, _) => write!(f, "{s:?}")?,
                AstExpr::BooleanLiteral(b, _) => write!(f, "{b}")?,
                AstExpr::NumberLiteral(n, _) => write!(f, "{n}")?,
                AstExpr::Variable(Identifier(name, _)) => f.write_str(name)?,
                AstExpr::StaticCall(call) => write!(f, "{call}")?,
            }
        }
        f.write_str(")")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identifier(
    pub String,
    #[serde(skip_serializing)]
    #[serde(skip_deserializing)]
    #[serde(default = "default_span")]
    pub Span,
);

pub fn default_span() -> Span {
    let mut tmp_codemap = CodeMap::new();
    tmp_codemap
        .add_file("".to_string(), "".to_string())
        .span
        .subspan(0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplatform_test::multiplatform_test;

    #[multiplatform_test]
    fn static_call_display() {
        let call = StaticCall {
            owner: "URI".to_string(),
            method: "create".to_string(),
            arguments: vec![AstExpr::StringLiteral(
                "file:/tmp/a.src".to_string(),
                default_span(),
            )],
            span: default_span(),
        };

        assert_eq!(call.to_string(), r#"URI.create("file:/tmp/a.src")"#);
    }

    #[multiplatform_test]
    fn spans_are_not_serialized() {
        let expr = AstExpr::StringLiteral("x".to_string(), default_span());

        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            serde_json::json!({ "StringLiteral": ["x"] })
        );
    }
}
