use std::collections::HashMap;

/// Values to substitute for free variables during compression or evaluation.
pub type Bindings = HashMap<String, f64>;

/// A node of the expression tree.
///
/// Leaves hold a literal, a free variable, or a named constant directly;
/// internal nodes hold an operator and its operands. The grammar levels the
/// parser distinguishes (expression, term, exponential, factor) all produce
/// plain `Expr` values.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number { text: String, value: f64 },
    Variable(String),
    Constant(Constant),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Call { function: MathFunction, argument: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

impl Expr {
    /// A number leaf whose display text is derived from the value.
    pub fn number(value: f64) -> Self {
        Expr::Number {
            text: value.to_string(),
            value,
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(function: MathFunction, argument: Expr) -> Self {
        Expr::Call {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// The scalar value, if this is a number leaf.
    pub fn number_value(&self) -> Option<f64> {
        match self {
            Expr::Number { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Unary operators. Neither is produced from surface text directly: `Neg`
/// comes from the lexer's look-back rule, `Identity` is a structural wrapper
/// the productions leave behind and compression strips out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Identity,
    Neg,
}

impl UnaryOp {
    pub fn text(self) -> &'static str {
        match self {
            UnaryOp::Identity => "id",
            UnaryOp::Neg => "neg",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn text(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn text(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MathFunction {
    Exp,
    Log,
    Cos,
    Sin,
    Abs,
}

impl MathFunction {
    pub fn text(self) -> &'static str {
        match self {
            MathFunction::Exp => "exp",
            MathFunction::Log => "log",
            MathFunction::Cos => "cos",
            MathFunction::Sin => "sin",
            MathFunction::Abs => "abs",
        }
    }
}
