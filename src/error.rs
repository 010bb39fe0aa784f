use thiserror::Error;

/// The rule a statement broke when it was rejected before any tree work.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub(crate) enum SyntaxError {
    #[error("empty statement")]
    Empty,
    #[error("unknown token `{0}`")]
    UnknownToken(String),
    #[error("statement starts with `{0}`")]
    LeadingOperator(String),
    #[error("`:=` may only follow the first token")]
    MisplacedAssign,
    #[error("cannot assign to `{0}`")]
    AssignTarget(String),
    #[error("`{0}` follows a token of the same kind")]
    AdjacentSameKind(String),
    #[error("missing operator before `{0}`")]
    MissingOperator(String),
    #[error("missing operand before `{0}`")]
    MissingOperand(String),
    #[error("exponent must be a number literal, found `{0}`")]
    NonLiteralExponent(String),
    #[error("division by literal zero")]
    LiteralZeroDivisor,
    #[error("`)` without a matching `(`")]
    UnmatchedRParen,
    #[error("`(` without a matching `)`")]
    UnmatchedLParen,
    #[error("empty parentheses")]
    EmptyParens,
    #[error("statement ends with `{0}`")]
    TrailingOperator(String),
    #[error("statement has {0} tokens, more than {1}")]
    TooLong(usize, usize),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub(crate) enum ErrorKind {
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
    #[error("expression nests deeper than {0} levels")]
    TooDeep(usize),
    #[error("internal error: {0}")]
    Internal(String),
}

pub(crate) type PResult<T> = Result<T, ErrorKind>;
