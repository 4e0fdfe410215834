// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use crate::{
    ast_types::{AstClass, AstExpr, AstNode, NodeArena, NodeId},
    error::AstError,
};

/// Where the source of a unit came from, as recorded by whoever loaded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// An already-formed URI, possibly relative (e.g. `file:/tmp/a.src` or `scripts/a.src`)
    Uri(String),
    /// A filesystem path, possibly relative to the working directory
    Path(PathBuf),
}

/// One script or class file being compiled.
///
/// Top-level script statements and classes are kept in source order so that
/// [`SourceUnit::annotation_sites`] reports sites in the order they were written.
#[derive(Debug)]
pub struct SourceUnit {
    pub name: String,
    location: Option<SourceLocation>,
    nodes: NodeArena,
    statements: Vec<NodeId>,
    classes: Vec<NodeId>,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            name: name.into(),
            location,
            nodes: NodeArena::new(),
            statements: vec![],
            classes: vec![],
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    /// Add a node without attaching it anywhere. Used for children (annotations, fields,
    /// initializers) that a parent node will refer to by id.
    pub fn add_node(&mut self, node: AstNode) -> NodeId {
        self.nodes.insert(node)
    }

    /// Add a top-level script statement.
    pub fn add_statement(&mut self, node: AstNode) -> NodeId {
        let id = self.nodes.insert(node);
        self.statements.push(id);
        id
    }

    pub fn add_class(&mut self, class: AstClass) -> NodeId {
        let id = self.nodes.insert(AstNode::Class(class));
        self.classes.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id)
    }

    pub fn node(&self, id: NodeId) -> Result<&AstNode, AstError> {
        self.nodes.get(id).ok_or(AstError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The expression currently held in the initializer slot of a declaration or field.
    pub fn initializer(&self, id: NodeId) -> Result<Option<&AstExpr>, AstError> {
        let slot = match self.node(id)? {
            AstNode::Declaration(d) => d.initializer,
            AstNode::Field(f) => f.initializer,
            other => return Err(AstError::NoInitializerSlot(id, other.kind())),
        };

        Ok(slot.and_then(|expr_id| match self.nodes.get(expr_id) {
            Some(AstNode::Expr(expr)) => Some(expr),
            _ => None,
        }))
    }

    /// Install `expr` into the empty initializer slot of a declaration or field.
    ///
    /// This is the only way to fill a slot after construction. An occupied slot is never
    /// overwritten, and on error the tree is left exactly as it was.
    pub fn replace_initializer(&mut self, id: NodeId, expr: AstExpr) -> Result<NodeId, AstError> {
        match self.node(id)? {
            AstNode::Declaration(d) if d.initializer.is_some() => {
                return Err(AstError::SlotOccupied(id));
            }
            AstNode::Field(f) if f.initializer.is_some() => {
                return Err(AstError::SlotOccupied(id));
            }
            AstNode::Declaration(_) | AstNode::Field(_) => {}
            other => return Err(AstError::NoInitializerSlot(id, other.kind())),
        }

        let expr_id = self.nodes.insert(AstNode::Expr(expr));

        match self.nodes.get_mut(id) {
            Some(AstNode::Declaration(d)) => d.initializer = Some(expr_id),
            Some(AstNode::Field(f)) => f.initializer = Some(expr_id),
            _ => unreachable!("slot kind checked above"),
        }

        Ok(expr_id)
    }

    /// All `[annotation, annotated node]` pairs in the unit, in source order.
    ///
    /// Walks script statements (including method bodies) and classes along with their
    /// fields and methods.
    pub fn annotation_sites(&self) -> Vec<[NodeId; 2]> {
        let mut sites = vec![];

        for id in self.statements.iter().chain(self.classes.iter()) {
            self.collect_sites(*id, &mut sites);
        }

        sites
    }

    fn collect_sites(&self, id: NodeId, sites: &mut Vec<[NodeId; 2]>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        if let Some(annotations) = node.annotations() {
            sites.extend(annotations.iter().map(|annotation| [*annotation, id]));
        }

        match node {
            AstNode::Method(m) => {
                for stmt in &m.body {
                    self.collect_sites(*stmt, sites);
                }
            }
            AstNode::Class(c) => {
                for member in c.fields.iter().chain(c.methods.iter()) {
                    self.collect_sites(*member, sites);
                }
            }
            AstNode::Annotation(_)
            | AstNode::Declaration(_)
            | AstNode::Field(_)
            | AstNode::Expr(_) => {}
        }
    }
}
