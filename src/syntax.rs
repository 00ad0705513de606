mod expr;
mod lexer;
mod op;
mod parser;
mod token;

pub use expr::Expr;
pub use op::{BinOp, UnOp};
pub use parser::parse;
