//! Sample expression trees shown by the driver when no input is given

use crate::error::Result;
use crate::expression::Expr;

/// A named sample tree
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: &'static str,
    pub expr: Expr,
}

impl Sample {
    fn new(name: &'static str, expr: Expr) -> Self {
        Sample { name, expr }
    }
}

pub fn samples() -> Result<Vec<Sample>> {
    Ok(vec![
        Sample::new(
            "int-plus-negation",
            Expr::add(Expr::int(3), Expr::negate(Expr::int(2))),
        ),
        Sample::new(
            "int-plus-string",
            Expr::add(Expr::int(2), Expr::string("x")),
        ),
        Sample::new(
            "rational-product",
            Expr::mult(Expr::rational(1, 2)?, Expr::rational(2, 3)?),
        ),
        Sample::new(
            "rational-plus-int",
            Expr::add(Expr::rational(1, 2)?, Expr::int(1)),
        ),
        Sample::new(
            "zero-literal",
            Expr::add(Expr::int(0), Expr::int(5)),
        ),
        Sample::new("negative-constant", Expr::int(-4)),
        Sample::new(
            "negate-string",
            Expr::negate(Expr::string("a")),
        ),
    ])
}
