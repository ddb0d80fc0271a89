//! Expression Visitor
//!
//! One method per node type. `ExprNode::visit` selects on the node, the
//! visitor selects on the operation, so new operations are added as new
//! visitors without touching the node types.

use super::ast::{Add, Literal, Mult, Negate};

/// Visitor pattern for expression traversal
pub trait ExprVisitor {
    type Result;

    fn visit_literal(&mut self, ast: &Literal) -> Self::Result;
    fn visit_negate(&mut self, ast: &Negate) -> Self::Result;
    fn visit_add(&mut self, ast: &Add) -> Self::Result;
    fn visit_mult(&mut self, ast: &Mult) -> Self::Result;
}
