use miette::SourceSpan;

use crate::ast::{Constant, MathFunction};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start..span.end).into()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number { text: String, value: f64 },

    // Free variables
    Identifier(String),

    // Registry entries
    Constant(Constant),
    Function(MathFunction),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Percent,
    Neg, // unary negation, from the lexer's look-back rule

    // Delimiters
    OpenParen,
    CloseParen,
}

impl TokenKind {
    /// Looks a word up in the fixed registry of named constants and
    /// functions.
    pub fn lookup_word(word: &str) -> Option<TokenKind> {
        Some(match word {
            "pi" => TokenKind::Constant(Constant::Pi),
            "e" => TokenKind::Constant(Constant::E),
            "exp" => TokenKind::Function(MathFunction::Exp),
            "log" => TokenKind::Function(MathFunction::Log),
            "cos" => TokenKind::Function(MathFunction::Cos),
            "sin" => TokenKind::Function(MathFunction::Sin),
            "abs" => TokenKind::Function(MathFunction::Abs),
            _ => return None,
        })
    }
}
