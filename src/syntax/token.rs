#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'src> {
    Number(f64),
    Id(&'src str),
    /// An operator-table symbol, as matched by the lexer. Whether it acts as
    /// a prefix or an infix operator is decided by the parser from the kind
    /// of the preceding token.
    Op(&'static str),

    LParen,
    RParen,

    End,
}

/// The shape of a token without its payload. The parser keeps the kind of
/// the previously consumed token around to disambiguate unary from binary
/// operators; `None` stands for the start of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Number,
    Id,
    Op,
    LParen,
    RParen,
    End,
}

impl Token<'_> {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_) => TokenKind::Number,
            Token::Id(_) => TokenKind::Id,
            Token::Op(_) => TokenKind::Op,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::End => TokenKind::End,
        }
    }
}
