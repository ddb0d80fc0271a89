//! Expression AST
//!
//! Immutable syntax tree nodes. Each node owns its children, so subtrees are
//! never shared and a cycle cannot be built.

use log::trace;
use serde::{Deserialize, Serialize};

use super::operations::{NegativeConstantNormalizer, ZeroLiteralVisitor};
use super::serializer::serialize;
use super::visitor::ExprVisitor;
use crate::error::Result;
use crate::value::{AddDispatch, Value};

/// Base trait for all expression nodes
pub trait ExprNode {
    /// Reduce the subtree to a value. Eager and unmemoized.
    fn evaluate(&self) -> Result<Value>;
    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result;
}

/// Main expression enum containing all node types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Expr {
    Literal(Literal),
    Negate(Negate),
    Add(Add),
    Mult(Mult),
}

/// Already-known value embedded in the tree (e.g., `3`, `1/2`, `"x"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub value: Value,
}

/// Arithmetic negation (e.g., `-(e)`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Negate {
    pub operand: Box<Expr>,
}

/// Addition (e.g., `(a + b)`), dispatched on both operand values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Add {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Multiplication (e.g., `(a * b)`), numeric operands only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mult {
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Literal { value }
    }
}

impl Negate {
    pub fn new(operand: Expr) -> Self {
        Negate {
            operand: Box::new(operand),
        }
    }
}

impl Add {
    pub fn new(left: Expr, right: Expr) -> Self {
        Add {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Mult {
    pub fn new(left: Expr, right: Expr) -> Self {
        Mult {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl ExprNode for Literal {
    fn evaluate(&self) -> Result<Value> {
        Ok(self.value.clone())
    }

    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result {
        visitor.visit_literal(self)
    }
}

impl ExprNode for Negate {
    fn evaluate(&self) -> Result<Value> {
        // Strings fail with TypeMismatch inside negate
        self.operand.evaluate()?.negate()
    }

    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result {
        visitor.visit_negate(self)
    }
}

impl ExprNode for Add {
    fn evaluate(&self) -> Result<Value> {
        let left = self.left.evaluate()?;
        let right = self.right.evaluate()?;
        // Left operand is the dispatch receiver
        left.combine_add(&right)
    }

    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result {
        visitor.visit_add(self)
    }
}

impl ExprNode for Mult {
    fn evaluate(&self) -> Result<Value> {
        let left = self.left.evaluate()?;
        let right = self.right.evaluate()?;
        left.combine_mult(&right)
    }

    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result {
        visitor.visit_mult(self)
    }
}

impl ExprNode for Expr {
    fn evaluate(&self) -> Result<Value> {
        trace!("evaluate {}", self.node_name());
        match self {
            Expr::Literal(e) => e.evaluate(),
            Expr::Negate(e) => e.evaluate(),
            Expr::Add(e) => e.evaluate(),
            Expr::Mult(e) => e.evaluate(),
        }
    }

    fn visit<V: ExprVisitor>(&self, visitor: &mut V) -> V::Result {
        match self {
            Expr::Literal(e) => e.visit(visitor),
            Expr::Negate(e) => e.visit(visitor),
            Expr::Add(e) => e.visit(visitor),
            Expr::Mult(e) => e.visit(visitor),
        }
    }
}

// Helper constructors
impl Expr {
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(Literal::new(value.into()))
    }

    pub fn int(i: i64) -> Self {
        Expr::literal(Value::int(i))
    }

    pub fn string(s: impl Into<String>) -> Self {
        Expr::literal(Value::string(s))
    }

    pub fn rational(numerator: i64, denominator: i64) -> Result<Self> {
        Value::rational(numerator, denominator).map(Expr::literal)
    }

    pub fn negate(operand: Expr) -> Self {
        Expr::Negate(Negate::new(operand))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::Add(Add::new(left, right))
    }

    pub fn mult(left: Expr, right: Expr) -> Self {
        Expr::Mult(Mult::new(left, right))
    }

    pub fn node_name(&self) -> &'static str {
        match self {
            Expr::Literal(_) => "Literal",
            Expr::Negate(_) => "Negate",
            Expr::Add(_) => "Add",
            Expr::Mult(_) => "Mult",
        }
    }

    /// Fully parenthesized infix text, e.g. `(3 + -(2))`.
    pub fn render(&self) -> String {
        serialize(self)
    }

    pub fn contains_zero_literal(&self) -> bool {
        self.visit(&mut ZeroLiteralVisitor)
    }

    /// New tree with every negative numeric literal rewritten as
    /// `Negate(Literal(|v|))`. The receiver is left untouched.
    pub fn normalize_negative_constants(&self) -> Expr {
        self.visit(&mut NegativeConstantNormalizer)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::literal(value)
    }
}
