use std::fmt;

use crate::ast::{BinaryOp, Expr};

impl Expr {
    /// Renders the tree as a minimally parenthesized infix formula.
    ///
    /// A binary child is parenthesized only when its operator requires it on
    /// that side of the parent operator; unary operators and functions apply
    /// with square brackets, so their operand never needs parentheses.
    pub fn to_infix(&self) -> String {
        match self {
            Expr::Number { text, .. } => text.clone(),
            Expr::Variable(name) => name.clone(),
            Expr::Constant(constant) => constant.text().to_string(),
            Expr::Unary { op, operand } => format!("{}[{}]", op.text(), operand.to_infix()),
            Expr::Call { function, argument } => {
                format!("{}[{}]", function.text(), argument.to_infix())
            }
            Expr::Binary { op, lhs, rhs } => {
                let lhs = parenthesized(lhs, |child| parenthesize_left(*op, child));
                let rhs = parenthesized(rhs, |child| parenthesize_right(*op, child));
                format!("{lhs} {} {rhs}", op.text())
            }
        }
    }
}

fn parenthesized(child: &Expr, needs_parens: impl Fn(BinaryOp) -> bool) -> String {
    let rendered = child.to_infix();
    match child {
        Expr::Binary { op, .. } if needs_parens(*op) => format!("({rendered})"),
        _ => rendered,
    }
}

// Which child operators force parentheses, per side of each parent operator.
fn parenthesize_left(parent: BinaryOp, child: BinaryOp) -> bool {
    use BinaryOp::*;

    match parent {
        Add | Sub => false,
        Mul | Div => matches!(child, Add | Sub),
        Pow => true,
    }
}

fn parenthesize_right(parent: BinaryOp, child: BinaryOp) -> bool {
    use BinaryOp::*;

    match parent {
        Add => false,
        Sub | Mul => matches!(child, Add | Sub),
        Div | Pow => matches!(child, Add | Sub | Mul | Div),
    }
}

/// Prefix-notation dump, mainly for diagnostics.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { text, .. } => f.write_str(text),
            Expr::Variable(name) => f.write_str(name),
            Expr::Constant(constant) => f.write_str(constant.text()),
            Expr::Unary { op, operand } => write!(f, "({} {operand})", op.text()),
            Expr::Call { function, argument } => write!(f, "({} {argument})", function.text()),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {lhs} {rhs})", op.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;

    #[test]
    fn minimal_parenthesization() {
        for (input, expected) in [
            ("1*2+3", "1 * 2 + 3"),
            ("(1+2)*3", "(1 + 2) * 3"),
            ("1+2*3", "1 + 2 * 3"),
            ("1-(2+3)", "1 - (2 + 3)"),
            ("(1-2)+3", "1 - 2 + 3"),
            ("1/(2*3)", "1 / (2 * 3)"),
            ("(1/2)/3", "1 / 2 / 3"),
            ("2^3^2", "2 ^ 3 ^ 2"),
            ("(2^3)^2", "(2 ^ 3) ^ 2"),
            ("(1+2)^3", "(1 + 2) ^ 3"),
            ("2^(1+2)", "2 ^ (1 + 2)"),
        ] {
            assert_eq!(
                parse(input).unwrap().to_infix(),
                expected,
                "when rendering '{input}'"
            );
        }
    }

    #[test]
    fn unary_and_function_brackets() {
        assert_eq!(parse("-2").unwrap().to_infix(), "neg[2]");
        assert_eq!(parse("cos(x)").unwrap().to_infix(), "cos[x]");
        assert_eq!(parse("exp(1+x)").unwrap().to_infix(), "exp[1 + x]");
        assert_eq!(parse("3*-2").unwrap().to_infix(), "3 * neg[2]");
    }

    #[test]
    fn prefix_dump() {
        assert_eq!(parse("1+2*x").unwrap().to_string(), "(+ 1 (* 2 x))");
        assert_eq!(parse("cos(0)").unwrap().to_string(), "(cos 0)");
    }

    #[test]
    fn leaves_keep_their_lexed_text() {
        assert_eq!(parse("2.50").unwrap().to_infix(), "2.50");
        assert_eq!(parse("pi").unwrap().to_infix(), "pi");
    }
}
