use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum LexError {
    #[error("cannot understand character {character:?}")]
    #[diagnostic(code = "unrecognized_character")]
    UnrecognizedCharacter {
        character: char,
        #[label("this character")]
        span: SourceSpan,
    },
}

#[derive(Debug, Diagnostic, Error)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("unexpected end of input")]
    #[diagnostic(code = "unexpected_end")]
    UnexpectedEnd {
        #[label("expected an expression")]
        span: SourceSpan,
    },

    #[error("unmatched parentheses")]
    #[diagnostic(code = "unmatched_paren")]
    UnmatchedParen {
        #[label("no matching counterpart")]
        span: SourceSpan,
    },

    #[error("unexpected token")]
    #[diagnostic(code = "unexpected_token")]
    UnexpectedToken {
        #[label("cannot appear here")]
        span: SourceSpan,
    },

    #[error("trailing input")]
    #[diagnostic(code = "trailing_input")]
    TrailingInput {
        #[label("left over after the expression")]
        span: SourceSpan,
    },
}

#[derive(Debug, Diagnostic, Error)]
pub enum EvalError {
    #[error("evaluated to {rendered} rather than a number")]
    #[diagnostic(code = "not_scalar")]
    NotScalar { rendered: String },
}
