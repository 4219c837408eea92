use crate::error::LexError;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    position: usize,
    /// Whether a `-` at the current position is unary negation: true at the
    /// start of the input and after a binary operator or a delimiter.
    minus_is_negation: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            minus_is_negation: true,
        }
    }
}

/// Lexes a whole formula up front, preserving input order.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).collect()
}

macro_rules! token {
    ($kind:ident, $start:ident, $self:ident) => {
        return Some(Ok($self.emit(TokenKind::$kind, $start)))
    };
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let c_start = self.position;

            self.rest = chars.as_str();
            self.position += c.len_utf8();

            match c {
                '+' => token!(Plus, c_start, self),
                '-' => {
                    if self.minus_is_negation {
                        token!(Neg, c_start, self)
                    }

                    token!(Minus, c_start, self)
                }
                '*' => token!(Star, c_start, self),
                '/' => token!(Slash, c_start, self),
                '^' => token!(Caret, c_start, self),
                '%' => token!(Percent, c_start, self),
                '(' => token!(OpenParen, c_start, self),
                ')' => token!(CloseParen, c_start, self),

                '0'..='9' | '.' => return Some(Ok(self.lex_number(c_start))),
                'a'..='z' | 'A'..='Z' => return Some(Ok(self.lex_word(c_start))),

                c if c.is_whitespace() => continue,

                _ => {
                    return Some(Err(LexError::UnrecognizedCharacter {
                        character: c,
                        span: Span {
                            start: c_start,
                            end: self.position,
                        }
                        .into(),
                    }))
                }
            }
        }
    }
}

impl<'source> Lexer<'source> {
    fn emit(&mut self, kind: TokenKind, start: usize) -> Token {
        self.minus_is_negation = kind.is_binary_operator() || kind.is_delimiter();

        Token {
            kind,
            span: Span {
                start,
                end: self.position,
            },
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        // Maximal run of digits, '.', and the exponent marker. Signs are
        // never part of a number token.
        let len = self
            .rest
            .chars()
            .take_while(|c| matches!(c, '0'..='9' | '.' | 'e' | 'E'))
            .map(|c| c.len_utf8())
            .sum::<usize>();
        self.position += len;
        self.rest = &self.rest[len..];

        let text = &self.source[start..self.position];
        self.emit(
            TokenKind::Number {
                text: text.to_string(),
                value: parse_float_prefix(text),
            },
            start,
        )
    }

    fn lex_word(&mut self, start: usize) -> Token {
        let len = self
            .rest
            .chars()
            .take_while(|c| matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '_'))
            .map(|c| c.len_utf8())
            .sum::<usize>();
        self.position += len;
        self.rest = &self.rest[len..];

        let word = &self.source[start..self.position];
        let kind = TokenKind::lookup_word(word)
            .unwrap_or_else(|| TokenKind::Identifier(word.to_string()));
        self.emit(kind, start)
    }
}

/// Best-effort float parsing: the longest prefix of the literal that is a
/// valid float, NaN when no prefix is. A malformed literal is never a lex
/// error.
fn parse_float_prefix(literal: &str) -> f64 {
    for end in (1..=literal.len()).rev() {
        if let Ok(value) = literal[..end].parse::<f64>() {
            return value;
        }
    }

    f64::NAN
}
