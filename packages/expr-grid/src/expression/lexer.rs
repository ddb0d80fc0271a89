//! Expression Lexer
//!
//! Tokenizes expression text into tokens for parsing

use crate::chars;
use crate::error::ParseError;

/// Token types in expression text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Character,
    String,
    Operator,
    Number,
}

/// Token representation
///
/// `str_value` holds the digits of a number, the unescaped body of a string,
/// or the operator/character itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            str_value,
        }
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    /// Short description used in parse errors.
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Number => format!("number {}", self.str_value),
            TokenType::String => format!("string \"{}\"", self.str_value),
            TokenType::Operator | TokenType::Character => format!("'{}'", self.str_value),
        }
    }
}

/// Expression lexer
#[derive(Debug, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, ParseError> {
        Scanner::new(text).scan()
    }
}

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            index: 0,
            peek,
        }
    }

    fn scan(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = self.input[self.index..].chars().next().unwrap_or(chars::EOF);
    }

    fn scan_token(&mut self) -> Result<Option<Token>, ParseError> {
        while !self.at_end() && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.at_end() {
            return Ok(None);
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_digit(ch) {
            return Ok(Some(self.scan_number(start)));
        }

        match ch {
            chars::LPAREN | chars::RPAREN => {
                self.advance();
                Ok(Some(Token::new(
                    start,
                    self.index,
                    TokenType::Character,
                    ch.to_string(),
                )))
            }
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH => {
                self.advance();
                Ok(Some(Token::new(
                    start,
                    self.index,
                    TokenType::Operator,
                    ch.to_string(),
                )))
            }
            chars::SQ | chars::DQ => self.scan_string(start, ch).map(Some),
            _ => Err(ParseError::UnexpectedCharacter { index: start, ch }),
        }
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while chars::is_digit(self.peek) {
            self.advance();
        }
        Token::new(
            start,
            self.index,
            TokenType::Number,
            self.input[start..self.index].to_string(),
        )
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Result<Token, ParseError> {
        self.advance(); // opening quote
        let mut buffer = String::new();

        loop {
            if self.at_end() {
                return Err(ParseError::UnterminatedString { index: start });
            }
            let ch = self.peek;
            self.advance();
            if ch == quote {
                break;
            }
            if ch == chars::BACKSLASH {
                if self.at_end() {
                    return Err(ParseError::UnterminatedString { index: start });
                }
                buffer.push(chars::unescape(self.peek));
                self.advance();
            } else {
                buffer.push(ch);
            }
        }

        Ok(Token::new(start, self.index, TokenType::String, buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<Token> {
        Lexer::new().tokenize(text).unwrap()
    }

    #[test]
    fn test_tokenize_simple_expression() {
        let tokens = lex("(12 + -(3))");
        let values: Vec<&str> = tokens.iter().map(|t| t.str_value.as_str()).collect();
        assert_eq!(values, vec!["(", "12", "+", "-", "(", "3", ")", ")"]);
        assert!(tokens[1].is_number());
        assert!(tokens[2].is_operator("+"));
        assert_eq!((tokens[1].index, tokens[1].end), (1, 3));
    }

    #[test]
    fn test_tokenize_strings_with_escapes() {
        let tokens = lex(r#"'it\'s' + "a\"b\n""#);
        assert!(tokens[0].is_string());
        assert_eq!(tokens[0].str_value, "it's");
        assert_eq!(tokens[2].str_value, "a\"b\n");
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            Lexer::new().tokenize("1 + \"abc"),
            Err(ParseError::UnterminatedString { index: 4 })
        );
    }

    #[test]
    fn test_only_ascii_whitespace_is_skipped() {
        assert_eq!(lex(" \t1\r\n").len(), 1);
        assert_eq!(
            Lexer::new().tokenize("1\u{00A0}2"),
            Err(ParseError::UnexpectedCharacter {
                index: 1,
                ch: '\u{00A0}'
            })
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert_eq!(
            Lexer::new().tokenize("1 % 2"),
            Err(ParseError::UnexpectedCharacter { index: 2, ch: '%' })
        );
    }
}
