//! Tree Operations
//!
//! Read-only queries and rewrites over an expression, one visitor per
//! operation

use super::ast::*;
use super::visitor::ExprVisitor;

/// True iff any reachable literal holds a zero value
pub struct ZeroLiteralVisitor;

impl ExprVisitor for ZeroLiteralVisitor {
    type Result = bool;

    fn visit_literal(&mut self, ast: &Literal) -> bool {
        ast.value.is_zero()
    }

    fn visit_negate(&mut self, ast: &Negate) -> bool {
        ast.operand.visit(self)
    }

    fn visit_add(&mut self, ast: &Add) -> bool {
        ast.left.visit(self) || ast.right.visit(self)
    }

    fn visit_mult(&mut self, ast: &Mult) -> bool {
        ast.left.visit(self) || ast.right.visit(self)
    }
}

/// Rebuilds the tree, turning negative literals into `Negate` of their
/// magnitude.
///
/// A literal whose magnitude has no `i64` representation (`i64::MIN`) is
/// kept as it is.
pub struct NegativeConstantNormalizer;

impl ExprVisitor for NegativeConstantNormalizer {
    type Result = Expr;

    fn visit_literal(&mut self, ast: &Literal) -> Expr {
        if ast.value.is_negative() {
            if let Ok(magnitude) = ast.value.negate() {
                return Expr::negate(Expr::literal(magnitude));
            }
        }
        Expr::Literal(ast.clone())
    }

    fn visit_negate(&mut self, ast: &Negate) -> Expr {
        Expr::negate(ast.operand.visit(self))
    }

    fn visit_add(&mut self, ast: &Add) -> Expr {
        Expr::add(ast.left.visit(self), ast.right.visit(self))
    }

    fn visit_mult(&mut self, ast: &Mult) -> Expr {
        Expr::mult(ast.left.visit(self), ast.right.visit(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_zero_in_rational_literal() {
        let ast = Expr::negate(Expr::rational(0, 3).unwrap());
        assert!(ast.contains_zero_literal());
    }

    #[test]
    fn test_zero_string_is_not_zero() {
        assert!(!Expr::string("0").contains_zero_literal());
    }

    #[test]
    fn test_normalize_leaves_receiver_untouched() {
        let ast = Expr::add(Expr::int(-1), Expr::int(2));
        let normalized = ast.normalize_negative_constants();
        assert_eq!(ast, Expr::add(Expr::int(-1), Expr::int(2)));
        assert_eq!(normalized.render(), "(-(1) + 2)");
    }

    #[test]
    fn test_normalize_negative_rational() {
        let ast = Expr::rational(-3, 4).unwrap();
        assert_eq!(ast.normalize_negative_constants().render(), "-(3/4)");
    }

    #[test]
    fn test_normalize_keeps_unrepresentable_magnitude() {
        let ast = Expr::int(i64::MIN);
        assert_eq!(
            ast.normalize_negative_constants(),
            Expr::literal(Value::int(i64::MIN))
        );
    }
}
