use crate::ast::{Bindings, Expr};
use crate::compress::compress;
use crate::error::EvalError;

/// Fully folds the tree under `bindings` and extracts the scalar result.
///
/// Fails when anything other than a single number remains, typically because
/// an identifier was left unbound.
pub fn evaluate(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    let reduced = compress(expr, bindings, false);
    match reduced.number_value() {
        Some(value) => Ok(value),
        None => Err(EvalError::NotScalar {
            rendered: reduced.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn evaluates_formulas() {
        for (input, expected) in [
            ("1+2*3", 7.0),
            ("2^3^2", 512.0),
            ("(1+2)*3", 9.0),
            ("-2", -2.0),
            ("10/4", 2.5),
            ("abs(3-5)", 2.0),
            ("cos(0)", 1.0),
            ("log(1)", 0.0),
            ("2*pi", 2.0 * std::f64::consts::PI),
            ("e", std::f64::consts::E),
        ] {
            let tree = parse(input).unwrap();
            assert_eq!(
                evaluate(&tree, &Bindings::new()).unwrap(),
                expected,
                "when evaluating '{input}'"
            );
        }
    }

    #[test]
    fn substitutes_variables() {
        let tree = parse("x+1").unwrap();
        let bindings = Bindings::from([("x".to_string(), 4.0)]);
        assert_eq!(evaluate(&tree, &bindings).unwrap(), 5.0);
    }

    #[test]
    fn unbound_variable_is_not_scalar() {
        let tree = parse("x+1").unwrap();
        let err = evaluate(&tree, &Bindings::new()).unwrap_err();
        assert!(matches!(err, EvalError::NotScalar { .. }));
        assert_eq!(
            err.to_string(),
            "evaluated to (+ x 1) rather than a number"
        );
    }

    #[test]
    fn same_tree_evaluates_under_different_bindings() {
        let tree = parse("x^2").unwrap();
        for x in 0..10 {
            let bindings = Bindings::from([("x".to_string(), x as f64)]);
            assert_eq!(evaluate(&tree, &bindings).unwrap(), (x * x) as f64);
        }
    }
}
