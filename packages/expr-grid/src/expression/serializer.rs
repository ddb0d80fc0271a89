//! Expression Serializer
//!
//! Renders an expression tree as fully parenthesized infix text

use super::ast::*;
use super::visitor::ExprVisitor;
use crate::chars;
use crate::value::Value;

/// Serialize expression to string
pub fn serialize(ast: &Expr) -> String {
    let mut visitor = SerializeExpressionVisitor;
    ast.visit(&mut visitor)
}

struct SerializeExpressionVisitor;

impl ExprVisitor for SerializeExpressionVisitor {
    type Result = String;

    fn visit_literal(&mut self, ast: &Literal) -> String {
        match &ast.value {
            // Quoted so the text parses back to a string literal
            Value::String(v) => quote(&v.s),
            other => other.to_text(),
        }
    }

    fn visit_negate(&mut self, ast: &Negate) -> String {
        format!("-({})", ast.operand.visit(self))
    }

    fn visit_add(&mut self, ast: &Add) -> String {
        format!("({} + {})", ast.left.visit(self), ast.right.visit(self))
    }

    fn visit_mult(&mut self, ast: &Mult) -> String {
        format!("({} * {})", ast.left.visit(self), ast.right.visit(self))
    }
}

fn quote(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push(chars::DQ);
    for ch in s.chars() {
        match ch {
            chars::DQ | chars::BACKSLASH => {
                result.push(chars::BACKSLASH);
                result.push(ch);
            }
            chars::LF => result.push_str("\\n"),
            chars::TAB => result.push_str("\\t"),
            chars::CR => result.push_str("\\r"),
            _ => result.push(ch),
        }
    }
    result.push(chars::DQ);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_binary() {
        let ast = Expr::add(Expr::int(3), Expr::negate(Expr::int(2)));
        assert_eq!(serialize(&ast), "(3 + -(2))");
    }

    #[test]
    fn test_serialize_mult_and_rational() {
        let ast = Expr::mult(Expr::rational(1, 2).unwrap(), Expr::int(-4));
        assert_eq!(serialize(&ast), "(1/2 * -4)");
    }

    #[test]
    fn test_serialize_string_is_quoted_and_escaped() {
        assert_eq!(serialize(&Expr::string("a\"b\\c")), r#""a\"b\\c""#);
    }
}
