//! expr-grid
//!
//! A small expression evaluator over integers, rationals and strings, where
//! addition between two values is resolved by double dispatch and the
//! operations over the tree are visitors.
#![deny(clippy::all)]

pub mod chars;
pub mod error;
pub mod expression;
pub mod registry;
pub mod samples;
pub mod value;

// Re-exports
pub use error::{EvalError, ParseError, Result};
pub use expression::{parse, serialize, Expr, ExprNode, ExprVisitor};
pub use registry::AddRegistry;
pub use value::{AddDispatch, IntValue, RationalValue, StringValue, Value, ValueKind};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_trees_and_values_are_shareable() {
        assert_send_sync::<Value>();
        assert_send_sync::<Expr>();
    }

    #[test]
    fn test_parse_evaluate_render() {
        let expr = parse("3 + -(2)").unwrap();
        assert_eq!(expr.render(), "(3 + -(2))");
        assert_eq!(expr.evaluate(), Ok(Value::int(1)));
    }
}
