/**
 * Add Registry Tests
 *
 * Registry-driven addition against the compiled double dispatch
 */

#[cfg(test)]
mod tests {
    use expr_grid::registry::AddHandler;
    use expr_grid::{
        AddDispatch, AddRegistry, EvalError, Expr, ExprNode, Result, Value, ValueKind,
    };
    use rayon::prelude::*;

    fn sample_of(kind: ValueKind) -> Value {
        match kind {
            ValueKind::Int => Value::int(-2),
            ValueKind::Rational => Value::rational(3, 4).unwrap(),
            ValueKind::String => Value::string("z"),
        }
    }

    fn plain_add(left: &Value, right: &Value) -> Result<Value> {
        left.combine_add(right)
    }

    fn right_first(left: &Value, right: &Value) -> Result<Value> {
        Ok(Value::string(format!("{}{}", right, left)))
    }

    #[test]
    fn should_agree_with_compiled_dispatch() {
        let registry = AddRegistry::standard();
        for left in ValueKind::ALL {
            for right in ValueKind::ALL {
                let (l, r) = (sample_of(left), sample_of(right));
                assert_eq!(registry.combine(&l, &r), l.combine_add(&r), "{} + {}", left, right);
            }
        }
    }

    #[test]
    fn should_report_every_missing_pair() {
        let registry = AddRegistry::empty();
        assert_eq!(registry.missing_pairs().len(), 9);
        assert!(!registry.is_complete());

        for left in ValueKind::ALL {
            for right in ValueKind::ALL {
                assert_eq!(
                    registry.combine(&sample_of(left), &sample_of(right)),
                    Err(EvalError::UnhandledCombination { left, right })
                );
            }
        }
    }

    #[test]
    fn should_fail_tree_with_unregistered_pair() {
        let registry = AddRegistry::empty()
            .with(ValueKind::Int, ValueKind::Int, plain_add);
        let ok = Expr::add(Expr::int(1), Expr::negate(Expr::int(3)));
        assert_eq!(registry.evaluate(&ok), Ok(Value::int(-2)));

        let bad = Expr::add(Expr::int(1), Expr::string("a"));
        assert_eq!(
            registry.evaluate(&bad),
            Err(EvalError::UnhandledCombination {
                left: ValueKind::Int,
                right: ValueKind::String,
            })
        );
    }

    #[test]
    fn should_use_replaced_handler() {
        let handler: AddHandler = right_first;
        let registry = AddRegistry::standard().with(ValueKind::Int, ValueKind::String, handler);
        let ast = Expr::add(Expr::int(2), Expr::string("x"));
        assert_eq!(registry.evaluate(&ast), Ok(Value::string("x2")));
        assert_eq!(ast.evaluate(), Ok(Value::string("2x")));
    }

    #[test]
    fn should_evaluate_trees_in_parallel() {
        let registry = AddRegistry::standard();
        let trees: Vec<Expr> = (0..64)
            .map(|i| Expr::add(Expr::int(i), Expr::negate(Expr::int(i))))
            .collect();

        let results: Vec<Result<Value>> = trees.par_iter().map(|t| registry.evaluate(t)).collect();
        assert!(results.iter().all(|r| r == &Ok(Value::int(0))));
    }
}
