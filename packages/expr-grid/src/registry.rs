//! Add Registry
//!
//! Open alternative to the compiled double dispatch: addition handlers keyed
//! by the pair of operand kinds, populated at startup. A pair without a
//! handler fails with `UnhandledCombination` on first use.

use std::collections::HashMap;

use log::debug;

use crate::error::{EvalError, Result};
use crate::expression::{Add, Expr, ExprNode, ExprVisitor, Literal, Mult, Negate};
use crate::value::{AddDispatch, Value, ValueKind};

/// Handler for one (left, right) pair of value kinds
pub type AddHandler = fn(&Value, &Value) -> Result<Value>;

fn dispatch_add(left: &Value, right: &Value) -> Result<Value> {
    left.combine_add(right)
}

#[derive(Clone, Default)]
pub struct AddRegistry {
    handlers: HashMap<(ValueKind, ValueKind), AddHandler>,
}

impl AddRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// All nine pairs, each delegating to the compiled double dispatch.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for left in ValueKind::ALL {
            for right in ValueKind::ALL {
                registry.register(left, right, dispatch_add);
            }
        }
        registry
    }

    /// Install a handler, returning the one it replaced.
    pub fn register(
        &mut self,
        left: ValueKind,
        right: ValueKind,
        handler: AddHandler,
    ) -> Option<AddHandler> {
        self.handlers.insert((left, right), handler)
    }

    pub fn with(mut self, left: ValueKind, right: ValueKind, handler: AddHandler) -> Self {
        self.register(left, right, handler);
        self
    }

    pub fn combine(&self, left: &Value, right: &Value) -> Result<Value> {
        let key = (left.kind(), right.kind());
        match self.handlers.get(&key) {
            Some(handler) => handler(left, right),
            None => {
                debug!("no add handler for {} + {}", key.0, key.1);
                Err(EvalError::UnhandledCombination {
                    left: key.0,
                    right: key.1,
                })
            }
        }
    }

    /// Pairs with no handler, in kind order.
    pub fn missing_pairs(&self) -> Vec<(ValueKind, ValueKind)> {
        ValueKind::ALL
            .iter()
            .flat_map(|&l| ValueKind::ALL.iter().map(move |&r| (l, r)))
            .filter(|key| !self.handlers.contains_key(key))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_pairs().is_empty()
    }

    /// Evaluate a tree, resolving every `Add` through this registry.
    pub fn evaluate(&self, ast: &Expr) -> Result<Value> {
        ast.visit(&mut RegistryEvaluator { registry: self })
    }
}

/// Evaluator whose addition goes through an `AddRegistry`
struct RegistryEvaluator<'a> {
    registry: &'a AddRegistry,
}

impl ExprVisitor for RegistryEvaluator<'_> {
    type Result = Result<Value>;

    fn visit_literal(&mut self, ast: &Literal) -> Result<Value> {
        Ok(ast.value.clone())
    }

    fn visit_negate(&mut self, ast: &Negate) -> Result<Value> {
        ast.operand.visit(self)?.negate()
    }

    fn visit_add(&mut self, ast: &Add) -> Result<Value> {
        let left = ast.left.visit(self)?;
        let right = ast.right.visit(self)?;
        self.registry.combine(&left, &right)
    }

    fn visit_mult(&mut self, ast: &Mult) -> Result<Value> {
        let left = ast.left.visit(self)?;
        let right = ast.right.visit(self)?;
        left.combine_mult(&right)
    }
}
