/*
 * Character Codes
 *
 * Characters recognised by the expression lexer
 */

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const CR: char = '\r';
pub const SPACE: char = ' ';

pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const LPAREN: char = '(';
pub const RPAREN: char = ')';
pub const STAR: char = '*';
pub const PLUS: char = '+';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const BACKSLASH: char = '\\';

pub const N: char = 'n';
pub const T: char = 't';
pub const R: char = 'r';

pub fn is_whitespace(code: char) -> bool {
    matches!(code, SPACE | TAB | LF | CR)
}

pub fn is_digit(code: char) -> bool {
    code.is_ascii_digit()
}

pub fn is_quote(code: char) -> bool {
    code == SQ || code == DQ
}

/// Resolve the character following a backslash inside a string literal.
pub fn unescape(code: char) -> char {
    match code {
        N => LF,
        T => TAB,
        R => CR,
        other => other,
    }
}
