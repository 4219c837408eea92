use crate::ast::{BinaryOp, Bindings, Expr, UnaryOp};
use crate::compress::compress;
use crate::error::ParseError;
use crate::lexer;
use crate::token::{Span, Token, TokenKind};

/// Parses a formula into its reduced syntax tree.
///
/// Lexes the whole input, builds the raw tree from the token list, and
/// strips the identity wrappers the productions leave behind. Constants are
/// not folded here; that is a separate compression or evaluation call.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    Parser::new(source).parse()
}

/// Recursive-descent parser over the token list.
///
/// The grammar, precedence low to high:
///
///   Expression  -> Expression '+' Term |
///                  Expression '-' Term |
///                  Term
///   Term        -> Term '*' Exponential |
///                  Term '/' Exponential |
///                  Exponential
///   Exponential -> Factor '^' Exponential |
///                  'neg' Factor |
///                  Factor
///   Factor      -> Number | Identifier | Constant |
///                  Function '(' Expression ')' |
///                  '(' Expression ')'
///
/// (The Exponential level deals in unary negation, not subtraction; the
/// lexer produces distinct tokens for the two.) The productions consume the
/// token list destructively from the right end, so each binary node's right
/// child is built first and the remainder nests into the left child. That
/// yields left-associative trees for `+ - * /`; `^` chains are collected and
/// rebuilt right-leaning.
pub struct Parser<'source> {
    source: &'source str,
    tokens: Vec<Token>,
    /// Span of the most recently consumed token, for labeling errors about
    /// missing input.
    last_span: Span,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            last_span: Span { start: 0, end: 0 },
        }
    }

    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        self.tokens = lexer::lex(self.source)?;

        let expr = self.expression()?;
        self.expect_fully_consumed()?;

        Ok(compress(&expr, &Bindings::new(), true))
    }

    /// The backward scan in `factor` consumes every `(` it can match, so a
    /// leftover `(` with no `)` after it never had a counterpart.
    fn expect_fully_consumed(&self) -> Result<(), ParseError> {
        let mut unclosed = Vec::new();
        for token in &self.tokens {
            match token.kind {
                TokenKind::OpenParen => unclosed.push(token),
                TokenKind::CloseParen => {
                    unclosed.pop();
                }
                _ => {}
            }
        }
        if let Some(open) = unclosed.first() {
            return Err(ParseError::UnmatchedParen {
                span: open.span.into(),
            });
        }

        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Err(ParseError::TrailingInput {
                span: Span {
                    start: first.span.start,
                    end: last.span.end,
                }
                .into(),
            }),
            _ => Ok(()),
        }
    }

    fn pop(&mut self) -> Option<Token> {
        let token = self.tokens.pop();
        if let Some(token) = &token {
            self.last_span = token.span;
        }

        token
    }

    fn unexpected_end(&self) -> ParseError {
        ParseError::UnexpectedEnd {
            span: self.last_span.into(),
        }
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(self.unexpected_end());
        }

        let term = self.term()?;
        let op = match self.tokens.last().map(|t| &t.kind) {
            Some(TokenKind::Plus) => Some(BinaryOp::Add),
            Some(TokenKind::Minus) => Some(BinaryOp::Sub),
            _ => None,
        };
        if let Some(op) = op {
            self.pop();
            let lhs = self.expression()?;
            return Ok(Expr::binary(op, lhs, term));
        }

        Ok(Expr::unary(UnaryOp::Identity, term))
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(self.unexpected_end());
        }

        let exponential = self.exponential()?;
        let op = match self.tokens.last().map(|t| &t.kind) {
            Some(TokenKind::Star) => Some(BinaryOp::Mul),
            Some(TokenKind::Slash) => Some(BinaryOp::Div),
            _ => None,
        };
        if let Some(op) = op {
            self.pop();
            let lhs = self.term()?;
            return Ok(Expr::binary(op, lhs, exponential));
        }

        Ok(Expr::unary(UnaryOp::Identity, exponential))
    }

    fn exponential(&mut self) -> Result<Expr, ParseError> {
        if self.tokens.is_empty() {
            return Err(self.unexpected_end());
        }

        let factor = self.factor()?;
        match self.tokens.last().map(|t| &t.kind) {
            // Negation binds a bare factor; it never consumes a '^' chain.
            Some(TokenKind::Neg) => {
                self.pop();
                Ok(Expr::unary(UnaryOp::Neg, factor))
            }
            Some(TokenKind::Caret) => {
                // Collect the whole chain of operands; they arrive
                // rightmost-first.
                let mut factors = vec![factor];
                loop {
                    self.pop(); // the '^'
                    factors.push(self.factor()?);

                    if self.tokens.last().map(|t| &t.kind) != Some(&TokenKind::Caret) {
                        break;
                    }
                }

                // Rebuild right-leaning, so a^b^c is a^(b^c)
                Ok(factors
                    .into_iter()
                    .reduce(|rhs, lhs| Expr::binary(BinaryOp::Pow, lhs, rhs))
                    .expect("the chain has at least two operands"))
            }
            _ => Ok(Expr::unary(UnaryOp::Identity, factor)),
        }
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let Some(last) = self.pop() else {
            return Err(self.unexpected_end());
        };

        match last.kind {
            TokenKind::Number { text, value } => Ok(Expr::unary(
                UnaryOp::Identity,
                Expr::Number { text, value },
            )),
            TokenKind::Identifier(name) => {
                Ok(Expr::unary(UnaryOp::Identity, Expr::Variable(name)))
            }
            TokenKind::Constant(constant) => {
                Ok(Expr::unary(UnaryOp::Identity, Expr::Constant(constant)))
            }
            TokenKind::CloseParen => {
                let inner = self.parenthesized(last.span)?;

                // A function directly before the '(' makes this a call
                let function = match self.tokens.last().map(|t| &t.kind) {
                    Some(&TokenKind::Function(function)) => Some(function),
                    _ => None,
                };
                match function {
                    Some(function) => {
                        self.pop();
                        Ok(Expr::call(function, inner))
                    }
                    None => Ok(Expr::unary(UnaryOp::Identity, inner)),
                }
            }
            _ => Err(ParseError::UnexpectedToken {
                span: last.span.into(),
            }),
        }
    }

    /// Marches backward until parentheses match, then parses the enclosed
    /// tokens as a fresh expression.
    fn parenthesized(&mut self, close: Span) -> Result<Expr, ParseError> {
        let mut depth = 1usize;
        let mut open = None;
        for (i, token) in self.tokens.iter().enumerate().rev() {
            match token.kind {
                TokenKind::CloseParen => depth += 1,
                TokenKind::OpenParen => {
                    depth -= 1;
                    if depth == 0 {
                        open = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }

        let Some(open) = open else {
            return Err(ParseError::UnmatchedParen { span: close.into() });
        };

        let inner = self.tokens.split_off(open + 1);
        self.pop().expect("the matched '(' is still on the list");

        let outer = std::mem::replace(&mut self.tokens, inner);
        let expr = self.expression()?;
        self.expect_fully_consumed()?;
        self.tokens = outer;

        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_and_associativity() {
        for (input, expected) in [
            ("1+2*3", "(+ 1 (* 2 3))"),
            ("1*2+3", "(+ (* 1 2) 3)"),
            ("1-2-3", "(- (- 1 2) 3)"),
            ("1/2/3", "(/ (/ 1 2) 3)"),
            ("2^3^2", "(^ 2 (^ 3 2))"),
            ("(1+2)*3", "(* (+ 1 2) 3)"),
            ("-2", "(neg 2)"),
            ("3-2", "(- 3 2)"),
            ("3*-2", "(* 3 (neg 2))"),
            ("cos(0)", "(cos 0)"),
            ("exp(x+1)", "(exp (+ x 1))"),
            ("2*pi", "(* 2 pi)"),
        ] {
            let expr = parse(input).unwrap();
            assert_eq!(expr.to_string(), expected, "when parsing '{input}'");
        }
    }

    #[test]
    fn identity_wrappers_are_stripped() {
        let expr = parse("((x))").unwrap();
        assert_eq!(expr, Expr::Variable("x".to_string()));
    }

    #[test]
    fn negation_binds_a_bare_factor() {
        assert_eq!(parse("-(2^2)").unwrap().to_string(), "(neg (^ 2 2))");
        assert_eq!(parse("(-2)^2").unwrap().to_string(), "(^ (neg 2) 2)");

        // The grammar derives no string where negation directly precedes an
        // exponent chain; the leftover 'neg' fails the parse.
        assert!(matches!(
            parse("-2^2"),
            Err(ParseError::TrailingInput { .. })
        ));
        assert!(matches!(
            parse("-a^b^c"),
            Err(ParseError::TrailingInput { .. })
        ));
    }

    #[test]
    fn errors() {
        assert!(matches!(parse(""), Err(ParseError::UnexpectedEnd { .. })));
        assert!(matches!(parse("()"), Err(ParseError::UnexpectedEnd { .. })));
        assert!(matches!(
            parse("(1+2"),
            Err(ParseError::UnmatchedParen { .. })
        ));
        assert!(matches!(
            parse("1+2)"),
            Err(ParseError::UnmatchedParen { .. })
        ));
        assert!(matches!(
            parse("1+*2"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse("1 2"),
            Err(ParseError::TrailingInput { .. })
        ));
        // '%' lexes as an operator but no production accepts it
        assert!(matches!(
            parse("1%2"),
            Err(ParseError::TrailingInput { .. })
        ));
        assert!(matches!(parse("1+@"), Err(ParseError::Lex(_))));
    }

    #[test]
    fn nested_function_calls() {
        assert_eq!(
            parse("exp(cos(0)+1)").unwrap().to_string(),
            "(exp (+ (cos 0) 1))"
        );
        assert_eq!(parse("abs(x)*2").unwrap().to_string(), "(* (abs x) 2)");
    }
}
