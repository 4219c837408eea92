use crate::ast::{Bindings, Expr, UnaryOp};

/// Returns a reduced copy of the tree.
///
/// Children are compressed first: identifiers with a binding become number
/// leaves, constants become number leaves unless `skip_fold`, identity
/// wrappers collapse to their child, and a node whose children all reduced
/// to numbers folds to a single number leaf (again unless `skip_fold`), so
/// foldable subtrees disappear bottom-up.
///
/// The input tree is never touched; the output shares no nodes with it, so
/// subtrees of either may be reused freely alongside the other.
pub fn compress(expr: &Expr, bindings: &Bindings, skip_fold: bool) -> Expr {
    match expr {
        Expr::Number { .. } => expr.clone(),
        Expr::Variable(name) => match bindings.get(name) {
            Some(value) => Expr::number(*value),
            None => expr.clone(),
        },
        Expr::Constant(constant) => {
            if skip_fold {
                expr.clone()
            } else {
                Expr::number(constant.value())
            }
        }
        Expr::Unary { op, operand } => {
            let operand = compress(operand, bindings, skip_fold);
            if !skip_fold {
                if let Some(value) = operand.number_value() {
                    return Expr::number(op.apply(value));
                }
            }
            if *op == UnaryOp::Identity {
                return operand;
            }

            Expr::unary(*op, operand)
        }
        Expr::Call { function, argument } => {
            let argument = compress(argument, bindings, skip_fold);
            if !skip_fold {
                if let Some(value) = argument.number_value() {
                    return Expr::number(function.apply(value));
                }
            }

            Expr::call(*function, argument)
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = compress(lhs, bindings, skip_fold);
            let rhs = compress(rhs, bindings, skip_fold);
            if !skip_fold {
                if let (Some(a), Some(b)) = (lhs.number_value(), rhs.number_value()) {
                    return Expr::number(op.apply(a, b));
                }
            }

            Expr::binary(*op, lhs, rhs)
        }
    }
}
