//! The fixed operator table: every recognized symbol with its precedence,
//! associativity, and role. Higher precedence binds tighter. The paren and
//! comma entries are stack sentinels; the precedence-popping rule never
//! reduces them, so their precedence values only document their slot.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Neg,
}

impl UnOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assoc {
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpKind {
    Unary(UnOp),
    Binary(BinOp),
    /// The left-paren sentinel. Discarded when its group closes, never
    /// reduced into a node.
    Group,
    /// The comma sentinel. Reduces into a transient argument pair that the
    /// parser flattens into a call's argument list.
    ArgSep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OpDesc {
    pub symbol: &'static str,
    pub prec: u32,
    pub assoc: Assoc,
    pub kind: OpKind,
}

impl OpDesc {
    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, OpKind::Group | OpKind::ArgSep)
    }
}

static TABLE: [OpDesc; 8] = [
    OpDesc {
        symbol: "+",
        prec: 2,
        assoc: Assoc::Left,
        kind: OpKind::Binary(BinOp::Add),
    },
    OpDesc {
        symbol: "-",
        prec: 2,
        assoc: Assoc::Left,
        kind: OpKind::Binary(BinOp::Sub),
    },
    OpDesc {
        symbol: "*",
        prec: 3,
        assoc: Assoc::Left,
        kind: OpKind::Binary(BinOp::Mul),
    },
    OpDesc {
        symbol: "/",
        prec: 3,
        assoc: Assoc::Left,
        kind: OpKind::Binary(BinOp::Div),
    },
    OpDesc {
        symbol: "(",
        prec: 5,
        assoc: Assoc::None,
        kind: OpKind::Group,
    },
    OpDesc {
        symbol: ",",
        prec: 1000,
        assoc: Assoc::None,
        kind: OpKind::ArgSep,
    },
    OpDesc {
        symbol: "+",
        prec: 2000,
        assoc: Assoc::Right,
        kind: OpKind::Unary(UnOp::Plus),
    },
    OpDesc {
        symbol: "-",
        prec: 2000,
        assoc: Assoc::Right,
        kind: OpKind::Unary(UnOp::Neg),
    },
];

/// The descriptor a symbol resolves to in infix position (binary operators
/// and the comma sentinel).
pub(crate) fn infix(symbol: &str) -> Option<&'static OpDesc> {
    TABLE
        .iter()
        .find(|desc| desc.symbol == symbol && matches!(desc.kind, OpKind::Binary(_) | OpKind::ArgSep))
}

/// The descriptor a symbol resolves to in prefix position.
pub(crate) fn prefix(symbol: &str) -> Option<&'static OpDesc> {
    TABLE
        .iter()
        .find(|desc| desc.symbol == symbol && matches!(desc.kind, OpKind::Unary(_)))
}

pub(crate) fn group() -> &'static OpDesc {
    &TABLE[4]
}

/// Longest table symbol matching at the start of `rest`. Explicit
/// longest-match-first scanning keeps tokenization deterministic even if a
/// symbol becomes a prefix of another.
pub(crate) fn match_symbol(rest: &str) -> Option<&'static str> {
    TABLE
        .iter()
        .filter(|desc| rest.starts_with(desc.symbol))
        .map(|desc| desc.symbol)
        .max_by_key(|symbol| symbol.len())
}

/// Whether `c` begins any table symbol. Such characters terminate an
/// identifier run.
pub(crate) fn starts_symbol(c: char) -> bool {
    TABLE.iter().any(|desc| desc.symbol.starts_with(c))
}
