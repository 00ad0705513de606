//! Infix arithmetic expressions: parse into an AST, format the AST back to a
//! canonical fully parenthesized string, or evaluate it against a table of
//! variable bindings.
//!
//! ```
//! use infix::Interpreter;
//!
//! let expr = infix::parse("1 * a+3").unwrap();
//! assert_eq!(expr.to_string(), "((1 * $a) + 3)");
//!
//! let mut interp = Interpreter::new();
//! interp.bind("a", 7.0);
//! assert_eq!(interp.eval(&expr).unwrap(), 10.0);
//! ```

mod error;
mod runtime;
mod syntax;

pub use error::{Error, EvalError, ParseError};
pub use runtime::eval::Interpreter;
pub use syntax::{parse, BinOp, Expr, UnOp};
