use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A closing paren drained past a missing opening one, or the input
    /// ended with unresolved opening parens.
    MismatchedParens,
    /// A token appeared in a position the grammar has no transition for.
    UnexpectedToken(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MismatchedParens => write!(f, "Mismatched parentheses"),
            Self::UnexpectedToken(what) => write!(f, "Unexpected token: {what}"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    UnboundVariable(String),
    UnknownFunction(String),
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundVariable(name) => write!(f, "Unbound variable `{name}`"),
            Self::UnknownFunction(name) => write!(f, "Unknown function `{name}`"),
            Self::ArityMismatch {
                name,
                expected,
                found,
            } => write!(f, "`{name}` expects {expected} argument(s), found {found}"),
        }
    }
}

impl std::error::Error for EvalError {}

/// Either phase of a parse-then-evaluate call can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse(ParseError),
    Eval(EvalError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        Self::Eval(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => err.fmt(f),
            Self::Eval(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Eval(err) => Some(err),
        }
    }
}

pub(crate) type PResult<T> = Result<T, ParseError>;
