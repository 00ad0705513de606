use super::{op, token::Token};

/// Scans the source string one token at a time. Whitespace is skipped at
/// construction and after every token, so the scan position always sits on
/// the first character of the next token (or at the end of input).
pub(crate) struct Lexer<'src> {
    src: &'src str,
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str) -> Self {
        let mut lexer = Self { src, pos: 0 };
        lexer.skip_whitespace();
        lexer
    }

    pub fn next_token(&mut self) -> Token<'src> {
        let token = self.scan();
        self.skip_whitespace();
        token
    }

    fn scan(&mut self) -> Token<'src> {
        let rest = &self.src[self.pos..];
        let c = match rest.chars().next() {
            None => return Token::End,
            Some(c) => c,
        };

        if c == '(' {
            self.pos += 1;
            return Token::LParen;
        }
        if c == ')' {
            self.pos += 1;
            return Token::RParen;
        }
        if c.is_ascii_digit() {
            return self.read_number();
        }
        if let Some(symbol) = op::match_symbol(rest) {
            self.pos += symbol.len();
            return Token::Op(symbol);
        }
        self.read_id()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn slice_while<P>(&mut self, predicate: P) -> &'src str
    where
        P: Fn(char) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// A maximal run of digits. Integer lexeme only; signs and decimal
    /// points are not part of number literals.
    fn read_number(&mut self) -> Token<'src> {
        let s = self.slice_while(|c| c.is_ascii_digit());
        Token::Number(
            s.parse::<f64>()
                .expect("Failed to parse number. (This should never happen)"),
        )
    }

    /// A maximal run of characters that could not start any other token.
    fn read_id(&mut self) -> Token<'src> {
        let s = self.slice_while(|c| {
            !c.is_whitespace()
                && !c.is_ascii_digit()
                && c != '('
                && c != ')'
                && !op::starts_symbol(c)
        });
        Token::Id(s)
    }
}

#[cfg(test)]
mod test {
    use super::{Lexer, Token};

    fn tokenize_str(s: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(s);
        let mut tokens = vec![];
        loop {
            let token = lexer.next_token();
            if token == Token::End {
                return tokens;
            }
            tokens.push(token);
        }
    }

    #[test]
    fn raw_stream() {
        let tokens = tokenize_str("(32+4)*1");
        let expected = &[
            Token::LParen,
            Token::Number(32.0),
            Token::Op("+"),
            Token::Number(4.0),
            Token::RParen,
            Token::Op("*"),
            Token::Number(1.0),
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn whitespace_is_insignificant() {
        assert_eq!(tokenize_str("  ( 32 + 4 ) * 1 "), tokenize_str("(32+4)*1"));
    }

    #[test]
    fn digits_terminate_identifiers() {
        let tokens = tokenize_str("ab1");
        assert_eq!(tokens, &[Token::Id("ab"), Token::Number(1.0)]);
    }

    #[test]
    fn call_stream() {
        let tokens = tokenize_str("sin(1, cos(43))");
        let expected = &[
            Token::Id("sin"),
            Token::LParen,
            Token::Number(1.0),
            Token::Op(","),
            Token::Id("cos"),
            Token::LParen,
            Token::Number(43.0),
            Token::RParen,
            Token::RParen,
        ];

        assert_eq!(tokens, expected);
    }

    #[test]
    fn end_is_sticky() {
        let mut lexer = Lexer::new("   ");
        assert_eq!(lexer.next_token(), Token::End);
        assert_eq!(lexer.next_token(), Token::End);
    }
}
