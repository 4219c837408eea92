use crate::token::TokenKind;

impl TokenKind {
    // For the lexer's negation look-back
    pub(crate) fn is_binary_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Caret
                | TokenKind::Percent
        )
    }

    pub(crate) fn is_delimiter(&self) -> bool {
        matches!(self, TokenKind::OpenParen | TokenKind::CloseParen)
    }
}
