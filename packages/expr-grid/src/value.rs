//! Value Domain
//!
//! Fully evaluated results and the double-dispatched addition between them

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Tag naming a value variant, used by errors and the add registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Rational,
    String,
}

impl ValueKind {
    pub const ALL: [ValueKind; 3] = [ValueKind::Int, ValueKind::Rational, ValueKind::String];
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Int => write!(f, "Int"),
            ValueKind::Rational => write!(f, "Rational"),
            ValueKind::String => write!(f, "String"),
        }
    }
}

/// Addition resolved by two single dispatches.
///
/// `combine_add` selects on the receiver (left operand), which then calls the
/// method named after its own variant on the argument, selecting on the right
/// operand. Every implementor must answer all three `add_*` methods, so the
/// 3x3 grid is checked by the compiler.
pub trait AddDispatch {
    /// First dispatch: `self` is the left operand.
    fn combine_add(&self, other: &Value) -> Result<Value>;

    /// Second dispatch: `self` is the right operand, `lhs` an int.
    fn add_int(&self, lhs: &IntValue) -> Result<Value>;

    /// Second dispatch: `self` is the right operand, `lhs` a rational.
    fn add_rational(&self, lhs: &RationalValue) -> Result<Value>;

    /// Second dispatch: `self` is the right operand, `lhs` a string.
    fn add_string(&self, lhs: &StringValue) -> Result<Value>;
}

/// A fully evaluated result
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    Int(IntValue),
    Rational(RationalValue),
    String(StringValue),
}

/// Integer value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntValue {
    pub i: i64,
}

/// Rational value, always reduced with a positive denominator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RationalParts", into = "RationalParts")]
pub struct RationalValue {
    numerator: i64,
    denominator: i64,
}

/// String value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StringValue {
    pub s: String,
}

/// Unchecked wire form of a rational
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RationalParts {
    numerator: i64,
    denominator: i64,
}

impl TryFrom<RationalParts> for RationalValue {
    type Error = EvalError;

    fn try_from(parts: RationalParts) -> Result<Self> {
        RationalValue::new(parts.numerator, parts.denominator)
    }
}

impl From<RationalValue> for RationalParts {
    fn from(r: RationalValue) -> Self {
        RationalParts {
            numerator: r.numerator,
            denominator: r.denominator,
        }
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl IntValue {
    pub fn new(i: i64) -> Self {
        IntValue { i }
    }
}

impl RationalValue {
    /// Build a reduced rational, rejecting a zero denominator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(EvalError::zero_denominator(numerator));
        }
        Self::reduce(numerator as i128, denominator as i128, "rational construction")
    }

    /// Reduce a wide fraction and narrow it back to `i64`.
    ///
    /// The caller guarantees `denominator != 0`.
    fn reduce(numerator: i128, denominator: i128, operation: &'static str) -> Result<Self> {
        let g = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()) as i128;
        let (mut n, mut d) = (numerator / g, denominator / g);
        if d < 0 {
            n = -n;
            d = -d;
        }
        let numerator = i64::try_from(n).map_err(|_| EvalError::overflow(operation))?;
        let denominator = i64::try_from(d).map_err(|_| EvalError::overflow(operation))?;
        Ok(RationalValue {
            numerator,
            denominator,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    fn add_parts(&self, n: i128, d: i128) -> Result<Value> {
        let lhs_n = self.numerator as i128;
        let lhs_d = self.denominator as i128;
        RationalValue::reduce(lhs_n * d + n * lhs_d, lhs_d * d, "rational addition")
            .map(Value::Rational)
    }
}

impl StringValue {
    pub fn new(s: impl Into<String>) -> Self {
        StringValue { s: s.into() }
    }

    fn concat(left: &str, right: &str) -> Value {
        let mut s = String::with_capacity(left.len() + right.len());
        s.push_str(left);
        s.push_str(right);
        Value::String(StringValue { s })
    }
}

impl fmt::Display for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.i)
    }
}

impl fmt::Display for RationalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => v.fmt(f),
            Value::Rational(v) => v.fmt(f),
            Value::String(v) => v.fmt(f),
        }
    }
}

// Int row of the addition grid
impl AddDispatch for IntValue {
    fn combine_add(&self, other: &Value) -> Result<Value> {
        other.add_int(self)
    }

    fn add_int(&self, lhs: &IntValue) -> Result<Value> {
        lhs.i
            .checked_add(self.i)
            .map(|i| Value::Int(IntValue { i }))
            .ok_or_else(|| EvalError::overflow("integer addition"))
    }

    fn add_rational(&self, lhs: &RationalValue) -> Result<Value> {
        lhs.add_parts(self.i as i128, 1)
    }

    fn add_string(&self, lhs: &StringValue) -> Result<Value> {
        Ok(StringValue::concat(&lhs.s, &self.to_string()))
    }
}

// Rational row of the addition grid
impl AddDispatch for RationalValue {
    fn combine_add(&self, other: &Value) -> Result<Value> {
        other.add_rational(self)
    }

    fn add_int(&self, lhs: &IntValue) -> Result<Value> {
        RationalValue::reduce(
            lhs.i as i128 * self.denominator as i128 + self.numerator as i128,
            self.denominator as i128,
            "rational addition",
        )
        .map(Value::Rational)
    }

    fn add_rational(&self, lhs: &RationalValue) -> Result<Value> {
        lhs.add_parts(self.numerator as i128, self.denominator as i128)
    }

    fn add_string(&self, lhs: &StringValue) -> Result<Value> {
        Ok(StringValue::concat(&lhs.s, &self.to_string()))
    }
}

// String row of the addition grid
impl AddDispatch for StringValue {
    fn combine_add(&self, other: &Value) -> Result<Value> {
        other.add_string(self)
    }

    fn add_int(&self, lhs: &IntValue) -> Result<Value> {
        Ok(StringValue::concat(&lhs.to_string(), &self.s))
    }

    fn add_rational(&self, lhs: &RationalValue) -> Result<Value> {
        Ok(StringValue::concat(&lhs.to_string(), &self.s))
    }

    fn add_string(&self, lhs: &StringValue) -> Result<Value> {
        Ok(StringValue::concat(&lhs.s, &self.s))
    }
}

impl AddDispatch for Value {
    fn combine_add(&self, other: &Value) -> Result<Value> {
        trace!("add dispatch: {} + {}", self.kind(), other.kind());
        match self {
            Value::Int(v) => v.combine_add(other),
            Value::Rational(v) => v.combine_add(other),
            Value::String(v) => v.combine_add(other),
        }
    }

    fn add_int(&self, lhs: &IntValue) -> Result<Value> {
        match self {
            Value::Int(v) => v.add_int(lhs),
            Value::Rational(v) => v.add_int(lhs),
            Value::String(v) => v.add_int(lhs),
        }
    }

    fn add_rational(&self, lhs: &RationalValue) -> Result<Value> {
        match self {
            Value::Int(v) => v.add_rational(lhs),
            Value::Rational(v) => v.add_rational(lhs),
            Value::String(v) => v.add_rational(lhs),
        }
    }

    fn add_string(&self, lhs: &StringValue) -> Result<Value> {
        match self {
            Value::Int(v) => v.add_string(lhs),
            Value::Rational(v) => v.add_string(lhs),
            Value::String(v) => v.add_string(lhs),
        }
    }
}

impl Value {
    pub fn int(i: i64) -> Self {
        Value::Int(IntValue::new(i))
    }

    pub fn rational(numerator: i64, denominator: i64) -> Result<Self> {
        RationalValue::new(numerator, denominator).map(Value::Rational)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(StringValue::new(s))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Rational(_) => ValueKind::Rational,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Textual rendering: decimal ints, `n/d` rationals, raw strings.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(v) => v.i == 0,
            Value::Rational(v) => v.numerator == 0,
            Value::String(_) => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Value::String(_))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Value::Int(v) => v.i < 0,
            Value::Rational(v) => v.numerator < 0,
            Value::String(_) => false,
        }
    }

    /// Numeric value as a wide fraction.
    fn parts(&self) -> Option<(i128, i128)> {
        match self {
            Value::Int(v) => Some((v.i as i128, 1)),
            Value::Rational(v) => Some((v.numerator as i128, v.denominator as i128)),
            Value::String(_) => None,
        }
    }

    /// Arithmetic negation; strings have none.
    pub fn negate(&self) -> Result<Value> {
        match self {
            Value::Int(v) => v
                .i
                .checked_neg()
                .map(Value::int)
                .ok_or_else(|| EvalError::overflow("negation")),
            Value::Rational(v) => RationalValue::reduce(
                -(v.numerator as i128),
                v.denominator as i128,
                "negation",
            )
            .map(Value::Rational),
            Value::String(_) => Err(EvalError::TypeMismatch {
                operation: "negate",
                found: ValueKind::String,
            }),
        }
    }

    /// Multiplication over numeric operands only.
    pub fn combine_mult(&self, other: &Value) -> Result<Value> {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => l
                .i
                .checked_mul(r.i)
                .map(Value::int)
                .ok_or_else(|| EvalError::overflow("integer multiplication")),
            _ => match (self.parts(), other.parts()) {
                (Some((ln, ld)), Some((rn, rd))) => {
                    RationalValue::reduce(ln * rn, ld * rd, "rational multiplication")
                        .map(Value::Rational)
                }
                (None, _) => Err(EvalError::TypeMismatch {
                    operation: "multiply",
                    found: self.kind(),
                }),
                (_, None) => Err(EvalError::TypeMismatch {
                    operation: "multiply",
                    found: other.kind(),
                }),
            },
        }
    }
}

impl From<IntValue> for Value {
    fn from(v: IntValue) -> Self {
        Value::Int(v)
    }
}

impl From<RationalValue> for Value {
    fn from(v: RationalValue) -> Self {
        Value::Rational(v)
    }
}

impl From<StringValue> for Value {
    fn from(v: StringValue) -> Self {
        Value::String(v)
    }
}
