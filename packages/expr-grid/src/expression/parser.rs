//! Expression Parser
//!
//! Recursive descent parser for the infix text produced by `render`.
//!
//! ```text
//! additive       := multiplicative ("+" multiplicative)*
//! multiplicative := prefix ("*" prefix)*
//! prefix         := "-" prefix | primary
//! primary        := INT ["/" INT] | STRING | "(" additive ")"
//! ```

use log::debug;

use super::ast::*;
use super::lexer::{Lexer, Token};
use crate::chars;
use crate::error::ParseError;
use crate::value::{RationalValue, Value};

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Deepest tree the parser will build. Rendering and evaluation recurse
/// once per level, so input nested past this is rejected.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parse expression text with a default parser
pub fn parse(input: &str) -> ParseResult<Expr> {
    Parser::new().parse(input)
}

/// Parser for expression text
#[derive(Debug, Default)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Self {
        Parser {
            lexer: Lexer::new(),
        }
    }

    pub fn parse(&self, input: &str) -> ParseResult<Expr> {
        let tokens = self.lexer.tokenize(input)?;
        let mut parse_ast = ParseExpr::new(tokens);
        let ast = parse_ast.parse_additive()?;

        if let Some(token) = parse_ast.current() {
            return Err(ParseError::UnexpectedToken {
                index: token.index,
                found: token.describe(),
                expected: "end of input",
            });
        }

        debug!("parsed {:?} as {}", input, ast.render());
        Ok(ast)
    }
}

struct ParseExpr {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl ParseExpr {
    fn new(tokens: Vec<Token>) -> Self {
        ParseExpr {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    fn current_index(&self) -> usize {
        self.current().map_or(0, |t| t.index)
    }

    /// Enter one tree level. Errors abort the whole parse, so only the
    /// success paths restore the depth.
    fn descend(&mut self, index: usize) -> ParseResult<()> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep { index });
        }
        Ok(())
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if let Some(token) = self.current() {
            if token.is_character(code) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if let Some(token) = self.current() {
            if token.is_operator(op) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.current() {
            Some(token) => ParseError::UnexpectedToken {
                index: token.index,
                found: token.describe(),
                expected,
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    fn expect_character(&mut self, code: char) -> ParseResult<()> {
        if self.consume_optional_character(code) {
            Ok(())
        } else {
            Err(self.unexpected("')'"))
        }
    }

    /// Parse additive operator (+)
    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut result = self.parse_multiplicative()?;
        loop {
            let index = self.current_index();
            if !self.consume_optional_operator("+") {
                break;
            }
            // Each link nests the chain so far one level deeper
            self.descend(index)?;
            let right = self.parse_multiplicative()?;
            result = Expr::add(result, right);
        }
        self.depth = depth;
        Ok(result)
    }

    /// Parse multiplicative operator (*)
    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let depth = self.depth;
        let mut result = self.parse_prefix()?;
        loop {
            let index = self.current_index();
            if !self.consume_optional_operator("*") {
                break;
            }
            self.descend(index)?;
            let right = self.parse_prefix()?;
            result = Expr::mult(result, right);
        }
        self.depth = depth;
        Ok(result)
    }

    /// Parse prefix minus: a negative literal when a number follows,
    /// otherwise a `Negate` node
    fn parse_prefix(&mut self) -> ParseResult<Expr> {
        let index = self.current_index();
        if self.consume_optional_operator("-") {
            if self.current().is_some_and(Token::is_number) {
                return self.parse_number_literal(true);
            }
            self.descend(index)?;
            let operand = self.parse_prefix()?;
            self.depth -= 1;
            return Ok(Expr::negate(operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = match self.current() {
            Some(token) => token,
            None => return Err(ParseError::UnexpectedEnd { expected: "expression" }),
        };

        if token.is_number() {
            return self.parse_number_literal(false);
        }

        if token.is_string() {
            let value = token.str_value.clone();
            self.advance();
            return Ok(Expr::string(value));
        }

        if token.is_character(chars::LPAREN) {
            let index = token.index;
            self.advance();
            self.descend(index)?;
            let expr = self.parse_additive()?;
            self.expect_character(chars::RPAREN)?;
            self.depth -= 1;
            return Ok(expr);
        }

        Err(self.unexpected("expression"))
    }

    /// Parse `INT` or `INT "/" INT`. The current token is a number.
    fn parse_number_literal(&mut self, negative: bool) -> ParseResult<Expr> {
        let start = self.current().map_or(0, |t| t.index);
        let numerator = self.parse_integer(negative)?;

        if !self.consume_optional_operator("/") {
            return Ok(Expr::int(numerator));
        }

        if !self.current().is_some_and(Token::is_number) {
            return Err(self.unexpected("denominator"));
        }
        let denominator = self.parse_integer(false)?;
        RationalValue::new(numerator, denominator)
            .map(|r| Expr::literal(Value::Rational(r)))
            .map_err(|source| ParseError::InvalidLiteral {
                index: start,
                source,
            })
    }

    fn parse_integer(&mut self, negative: bool) -> ParseResult<i64> {
        let (index, digits) = match self.current() {
            Some(token) => (token.index, token.str_value.clone()),
            None => return Err(ParseError::UnexpectedEnd { expected: "number" }),
        };
        self.advance();

        let text = if negative {
            format!("-{}", digits)
        } else {
            digits
        };
        text.parse::<i64>()
            .map_err(|_| ParseError::NumberOutOfRange { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn test_parse_simple_expression() {
        let ast = parse("1 + 2").unwrap();
        assert_eq!(ast, Expr::add(Expr::int(1), Expr::int(2)));
    }

    #[test]
    fn test_mult_binds_tighter_than_add() {
        let ast = parse("1 + 2 * 3").unwrap();
        assert_eq!(
            ast,
            Expr::add(Expr::int(1), Expr::mult(Expr::int(2), Expr::int(3)))
        );
    }

    #[test]
    fn test_negative_literal_vs_negate() {
        assert_eq!(parse("-4").unwrap(), Expr::int(-4));
        assert_eq!(parse("-(4)").unwrap(), Expr::negate(Expr::int(4)));
        assert_eq!(parse("--4").unwrap(), Expr::negate(Expr::int(-4)));
    }

    #[test]
    fn test_min_integer_literal() {
        assert_eq!(parse("-9223372036854775808").unwrap(), Expr::int(i64::MIN));
        assert_eq!(
            parse("9223372036854775808"),
            Err(ParseError::NumberOutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_rational_literal() {
        assert_eq!(parse("2/4").unwrap(), Expr::rational(1, 2).unwrap());
        assert_eq!(parse("-2/4").unwrap(), Expr::rational(-1, 2).unwrap());
        match parse("1/0") {
            Err(ParseError::InvalidLiteral {
                index: 0,
                source: EvalError::InvalidArgument(_),
            }) => {}
            other => panic!("Expected invalid literal, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_input_is_rejected() {
        match parse("(1 + 2) 3") {
            Err(ParseError::UnexpectedToken { index, expected, .. }) => {
                assert_eq!(index, 8);
                assert_eq!(expected, "end of input");
            }
            other => panic!("Expected trailing token error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let depth = MAX_NESTING_DEPTH / 2;
        let text = format!("{}1{}", "-(".repeat(depth), ")".repeat(depth));
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn test_nesting_past_limit_is_rejected() {
        let text = "(".repeat(MAX_NESTING_DEPTH + 1);
        assert_eq!(
            parse(&text),
            Err(ParseError::TooDeep {
                index: MAX_NESTING_DEPTH
            })
        );
    }

    #[test]
    fn test_missing_close_paren() {
        assert_eq!(
            parse("(1 + 2"),
            Err(ParseError::UnexpectedEnd { expected: "')'" })
        );
    }
}
