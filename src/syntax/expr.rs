use std::fmt;

use super::op::{BinOp, UnOp};

/// An expression tree. Nodes own their children exclusively and are never
/// mutated after construction; `Call` arguments keep their left-to-right
/// source order.
#[derive(Debug, PartialEq, Clone)]
pub enum Expr<'src> {
    Number(f64),
    Var(&'src str),
    Unary {
        op: UnOp,
        operand: Box<Expr<'src>>,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr<'src>>,
        rhs: Box<Expr<'src>>,
    },
    Call {
        name: &'src str,
        args: Vec<Expr<'src>>,
    },
}

/// Canonical rendering: every binary node fully parenthesized, unary
/// operators glued to their operand, variables prefixed with `$`.
impl fmt::Display for Expr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "${name}"),
            Expr::Unary { op, operand } => write!(f, "{}{operand}", op.symbol()),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}
