use crate::ast::{BinaryOp, Bindings, Expr};
use crate::compress::compress;

/// Rewrites `(x ± y) * z` into `(x * z) ± (y * z)`, likewise for `/`.
///
/// The factor `z` is cloned onto both sides and the result is compressed
/// with folding enabled, so the two sides share no nodes. A node the law
/// does not apply to comes back unchanged.
pub fn distribute_right(expr: &Expr) -> Expr {
    let Expr::Binary {
        op: outer,
        lhs,
        rhs,
    } = expr
    else {
        return expr.clone();
    };
    if !matches!(outer, BinaryOp::Mul | BinaryOp::Div) {
        return expr.clone();
    }

    let Expr::Binary {
        op: inner,
        lhs: x,
        rhs: y,
    } = lhs.as_ref()
    else {
        return expr.clone();
    };
    if !matches!(inner, BinaryOp::Add | BinaryOp::Sub) {
        return expr.clone();
    }

    let distributed = Expr::binary(
        *inner,
        Expr::binary(*outer, x.as_ref().clone(), rhs.as_ref().clone()),
        Expr::binary(*outer, y.as_ref().clone(), rhs.as_ref().clone()),
    );

    compress(&distributed, &Bindings::new(), false)
}

/// Mirror of [`distribute_right`] for a product with the sum on the right:
/// compresses the product, swaps its operands, and right-distributes. Only
/// `*` commutes, so `/` is left alone.
pub fn distribute_left(expr: &Expr) -> Expr {
    if !matches!(
        expr,
        Expr::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ) {
        return expr.clone();
    }

    match compress(expr, &Bindings::new(), false) {
        Expr::Binary { op, lhs, rhs } => distribute_right(&Expr::Binary {
            op,
            lhs: rhs,
            rhs: lhs,
        }),
        folded => folded,
    }
}

/// Applies a distribution rule at the root and then to every child of the
/// result, compressing first so foldable operands distribute as single
/// factors.
pub fn distribute(expr: &Expr, rule: fn(&Expr) -> Expr) -> Expr {
    let expr = compress(expr, &Bindings::new(), false);
    match rule(&expr) {
        Expr::Binary { op, lhs, rhs } => {
            Expr::binary(op, distribute(&lhs, rule), distribute(&rhs, rule))
        }
        Expr::Unary { op, operand } => Expr::unary(op, distribute(&operand, rule)),
        Expr::Call { function, argument } => Expr::call(function, distribute(&argument, rule)),
        leaf => leaf,
    }
}
