use crate::error::{ParseError, PResult};

use super::{
    expr::Expr,
    lexer::Lexer,
    op::{self, Assoc, OpDesc, OpKind},
    token::{Token, TokenKind},
};

/// Parse a complete expression. The whole input must be consumed by a
/// single tree; leftover operands or a stray argument separator at the root
/// are rejected.
pub fn parse(src: &str) -> Result<Expr<'_>, ParseError> {
    let mut parser = Parser::new(src);
    let operand = parser.parse_until(TokenKind::End)?;

    if !parser.operands.is_empty() {
        return Err(ParseError::UnexpectedToken(
            "expression after expression".into(),
        ));
    }
    match operand {
        Operand::Expr(expr) => Ok(expr),
        Operand::Pair(..) => Err(ParseError::UnexpectedToken(
            "`,` outside a call argument list".into(),
        )),
    }
}

/// An operand-stack slot. Reducing a comma builds a transient `Pair`; pairs
/// only ever flow into a call's argument list, where they are flattened, so
/// a finished parse never exposes one.
enum Operand<'src> {
    Expr(Expr<'src>),
    Pair(Box<Operand<'src>>, Box<Operand<'src>>),
}

struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    /// Kind of the token consumed before `current`; `None` at start of
    /// input. Drives unary/binary disambiguation.
    prev: Option<TokenKind>,
    operands: Vec<Operand<'src>>,
    ops: Vec<&'static OpDesc>,
}

impl<'src> Parser<'src> {
    fn new(src: &'src str) -> Self {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            prev: None,
            operands: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn advance(&mut self) {
        self.prev = Some(self.current.kind());
        self.current = self.lexer.next_token();
    }

    /// The shunting-yard loop. Consumes tokens until `terminator` is
    /// reached, then drains the operator stack back down to the depth it
    /// had at entry (the watermark) and returns the single operand built by
    /// this invocation.
    ///
    /// Recursive calls for function arguments share both stacks; the
    /// watermark keeps their reductions from reaching into the enclosing
    /// invocation's pending operators.
    fn parse_until(&mut self, terminator: TokenKind) -> PResult<Operand<'src>> {
        let watermark = self.ops.len();

        loop {
            match self.current {
                Token::Number(value) => {
                    self.operands.push(Operand::Expr(Expr::Number(value)));
                    self.advance();
                }
                Token::Id(name) => {
                    self.advance();
                    if self.current == Token::LParen {
                        self.advance();
                        let args = self.parse_args()?;
                        self.operands.push(Operand::Expr(Expr::Call { name, args }));
                    } else {
                        self.operands.push(Operand::Expr(Expr::Var(name)));
                    }
                }
                Token::LParen => {
                    self.ops.push(op::group());
                    self.advance();
                }
                Token::RParen => {
                    if self.close_group(watermark)? {
                        self.advance();
                        continue;
                    }
                    // No open group above the watermark: this `)` belongs
                    // to the caller's argument list.
                    if terminator == TokenKind::RParen {
                        break;
                    }
                    return Err(ParseError::MismatchedParens);
                }
                Token::Op(symbol) => {
                    let desc = self.resolve(symbol)?;
                    match desc.kind {
                        // A comma closes off a finished argument: reduce
                        // everything down to the nearest sentinel first.
                        OpKind::ArgSep => {
                            while self.ops.len() > watermark {
                                let top = self.ops[self.ops.len() - 1];
                                if top.is_sentinel() {
                                    break;
                                }
                                self.ops.pop();
                                self.reduce(top)?;
                            }
                        }
                        _ => {
                            while self.ops.len() > watermark {
                                let top = self.ops[self.ops.len() - 1];
                                let binds_tighter = top.prec > desc.prec
                                    || (top.prec == desc.prec && desc.assoc == Assoc::Left);
                                if top.is_sentinel() || !binds_tighter {
                                    break;
                                }
                                self.ops.pop();
                                self.reduce(top)?;
                            }
                        }
                    }
                    self.ops.push(desc);
                    self.advance();
                }
                Token::End => {
                    if terminator == TokenKind::End {
                        break;
                    }
                    // EOF inside a call argument list.
                    return Err(ParseError::MismatchedParens);
                }
            }
        }

        while self.ops.len() > watermark {
            let top = self.ops[self.ops.len() - 1];
            self.ops.pop();
            self.reduce(top)?;
        }
        self.pop_operand()
    }

    /// A call's parenthesized argument list, already past the `(`. The
    /// argument expression is parsed with the current operator-stack depth
    /// as its watermark, then its transient comma pairs are flattened into
    /// the ordered argument list.
    fn parse_args(&mut self) -> PResult<Vec<Expr<'src>>> {
        if self.current == Token::RParen {
            self.advance();
            return Ok(Vec::new());
        }

        let operand = self.parse_until(TokenKind::RParen)?;
        self.advance();

        let mut args = Vec::new();
        flatten(operand, &mut args);
        Ok(args)
    }

    /// Reduce down to the matching group sentinel above `watermark`.
    /// Returns false if there is none, leaving entries below the watermark
    /// untouched.
    fn close_group(&mut self, watermark: usize) -> PResult<bool> {
        while self.ops.len() > watermark {
            let top = self.ops[self.ops.len() - 1];
            if top.kind == OpKind::Group {
                self.ops.pop();
                return Ok(true);
            }
            self.ops.pop();
            self.reduce(top)?;
        }
        Ok(false)
    }

    /// Resolve an operator symbol against the table: prefix position iff
    /// the previous token was an operator, a `(`, or the start of input.
    fn resolve(&self, symbol: &str) -> PResult<&'static OpDesc> {
        let prefix_position = matches!(self.prev, None | Some(TokenKind::Op | TokenKind::LParen));
        let desc = if prefix_position {
            op::prefix(symbol)
        } else {
            op::infix(symbol)
        };
        desc.ok_or_else(|| {
            ParseError::UnexpectedToken(format!(
                "`{symbol}` cannot be used as {} operator",
                if prefix_position { "a prefix" } else { "an infix" }
            ))
        })
    }

    /// Build a node from a popped descriptor. Binary pops the right operand
    /// first; the group sentinel is only ever passed here by the
    /// end-of-invocation drain, where it means an unclosed `(`.
    fn reduce(&mut self, desc: &'static OpDesc) -> PResult<()> {
        log::trace!("reduce `{}`", desc.symbol);

        match desc.kind {
            OpKind::Unary(op) => {
                let operand = self.pop_expr()?;
                self.operands.push(Operand::Expr(Expr::Unary {
                    op,
                    operand: Box::new(operand),
                }));
            }
            OpKind::Binary(op) => {
                let rhs = self.pop_expr()?;
                let lhs = self.pop_expr()?;
                self.operands.push(Operand::Expr(Expr::Binary {
                    op,
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                }));
            }
            OpKind::ArgSep => {
                let rhs = self.pop_operand()?;
                let lhs = self.pop_operand()?;
                self.operands
                    .push(Operand::Pair(Box::new(lhs), Box::new(rhs)));
            }
            OpKind::Group => return Err(ParseError::MismatchedParens),
        }
        Ok(())
    }

    fn pop_operand(&mut self) -> PResult<Operand<'src>> {
        self.operands
            .pop()
            .ok_or_else(|| ParseError::UnexpectedToken("expected an expression".into()))
    }

    fn pop_expr(&mut self) -> PResult<Expr<'src>> {
        match self.pop_operand()? {
            Operand::Expr(expr) => Ok(expr),
            Operand::Pair(..) => Err(ParseError::UnexpectedToken(
                "`,` outside a call argument list".into(),
            )),
        }
    }
}

/// Depth-first flattening of transient comma pairs into an ordered argument
/// list. Only pairs are unwrapped; every other operand is a leaf.
fn flatten<'src>(operand: Operand<'src>, args: &mut Vec<Expr<'src>>) {
    match operand {
        Operand::Pair(lhs, rhs) => {
            flatten(*lhs, args);
            flatten(*rhs, args);
        }
        Operand::Expr(expr) => args.push(expr),
    }
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::{
        error::ParseError,
        syntax::{BinOp, Expr},
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn formatted(src: &str) -> String {
        init_logging();
        parse(src).unwrap().to_string()
    }

    #[test]
    fn equal_precedence_chains_are_left_associative() {
        assert_eq!(formatted("1+2+3"), "((1 + 2) + 3)");
        assert_eq!(formatted("8-4-2"), "((8 - 4) - 2)");
        assert_eq!(formatted("a+b+c"), "(($a + $b) + $c)");
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(formatted("12+34*45"), "(12 + (34 * 45))");
        assert_eq!(formatted("12*34+45"), "((12 * 34) + 45)");
        assert_eq!(formatted("1+6/2"), "(1 + (6 / 2))");
    }

    #[test]
    fn groups_override_precedence() {
        assert_eq!(formatted("(32+4)*1"), "((32 + 4) * 1)");
        assert_eq!(formatted("((7))"), "7");
    }

    #[test]
    fn unary_binds_tighter_and_chains_right() {
        assert_eq!(formatted("-3+4"), "(-3 + 4)");
        assert_eq!(formatted("--1"), "--1");
        assert_eq!(formatted("+5"), "+5");
        assert_eq!(formatted("2*-3"), "(2 * -3)");
        assert_eq!(formatted("-(1+2)"), "-(1 + 2)");
    }

    #[test]
    fn call_arguments_keep_source_order() {
        init_logging();

        let expr = parse("sin(1, cos(43))").unwrap();
        assert_eq!(expr.to_string(), "sin(1, cos(43))");

        let Expr::Call { name, args } = expr else {
            panic!("expected a call, got {expr:?}");
        };
        assert_eq!(name, "sin");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], Expr::Number(1.0));
        assert_eq!(
            args[1],
            Expr::Call {
                name: "cos",
                args: vec![Expr::Number(43.0)],
            }
        );
    }

    #[test]
    fn nested_calls_scope_their_own_reductions() {
        assert_eq!(formatted("f(g(1,2), 3)"), "f(g(1, 2), 3)");
        assert_eq!(formatted("f((1+2)*3)"), "f(((1 + 2) * 3))");
    }

    #[test]
    fn binary_operators_inside_argument_lists() {
        init_logging();

        let expr = parse("max(1+2, 3)").unwrap();
        let Expr::Call { args, .. } = &expr else {
            panic!("expected a call, got {expr:?}");
        };
        assert_eq!(args.len(), 2);
        assert_eq!(
            args[0],
            Expr::Binary {
                op: BinOp::Add,
                lhs: Box::new(Expr::Number(1.0)),
                rhs: Box::new(Expr::Number(2.0)),
            }
        );
    }

    #[test]
    fn empty_argument_list() {
        init_logging();

        let expr = parse("f()").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                name: "f",
                args: vec![],
            }
        );
    }

    #[test]
    fn missing_closing_paren() {
        init_logging();
        assert_eq!(parse("(1+2"), Err(ParseError::MismatchedParens));
        assert_eq!(parse("f(1, 2"), Err(ParseError::MismatchedParens));
    }

    #[test]
    fn missing_opening_paren() {
        init_logging();
        assert_eq!(parse("1+2)"), Err(ParseError::MismatchedParens));
    }

    #[test]
    fn stray_comma_is_rejected() {
        init_logging();
        assert!(matches!(parse("1, 2"), Err(ParseError::UnexpectedToken(_))));
        assert!(matches!(
            parse("1+(2, 3)"),
            Err(ParseError::UnexpectedToken(_))
        ));
    }

    #[test]
    fn malformed_operands() {
        init_logging();
        assert!(matches!(parse(""), Err(ParseError::UnexpectedToken(_))));
        assert!(matches!(parse("1 2"), Err(ParseError::UnexpectedToken(_))));
        assert!(matches!(parse("1+"), Err(ParseError::UnexpectedToken(_))));
        assert!(matches!(parse("*3"), Err(ParseError::UnexpectedToken(_))));
    }
}
