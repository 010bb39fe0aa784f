use crate::{
    error::{ErrorKind, PResult},
    syntax::{Token, TokenKind},
};

use super::tree::{Expression, Node};

/// What bounded `i64` arithmetic does when a result does not fit.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Overflow {
    /// Report an arithmetic error.
    #[default]
    Fail,
    /// Two's complement wrap-around.
    Wrap,
    /// Clamp to `i64::MIN` / `i64::MAX`.
    Saturate,
}

impl Overflow {
    fn add(self, a: i64, b: i64) -> PResult<i64> {
        match self {
            Self::Fail => a.checked_add(b).ok_or(ErrorKind::Overflow),
            Self::Wrap => Ok(a.wrapping_add(b)),
            Self::Saturate => Ok(a.saturating_add(b)),
        }
    }

    fn sub(self, a: i64, b: i64) -> PResult<i64> {
        match self {
            Self::Fail => a.checked_sub(b).ok_or(ErrorKind::Overflow),
            Self::Wrap => Ok(a.wrapping_sub(b)),
            Self::Saturate => Ok(a.saturating_sub(b)),
        }
    }

    fn mul(self, a: i64, b: i64) -> PResult<i64> {
        match self {
            Self::Fail => a.checked_mul(b).ok_or(ErrorKind::Overflow),
            Self::Wrap => Ok(a.wrapping_mul(b)),
            Self::Saturate => Ok(a.saturating_mul(b)),
        }
    }

    /// Truncating division.
    fn div(self, a: i64, b: i64) -> PResult<i64> {
        if b == 0 {
            return Err(ErrorKind::DivisionByZero);
        }
        match self {
            Self::Fail => a.checked_div(b).ok_or(ErrorKind::Overflow),
            Self::Wrap => Ok(a.wrapping_div(b)),
            Self::Saturate => Ok(a.saturating_div(b)),
        }
    }

    /// Integer power, truncated toward zero for negative exponents.
    fn pow(self, base: i64, exp: i64) -> PResult<i64> {
        if exp < 0 {
            return match base {
                0 => Err(ErrorKind::DivisionByZero),
                1 => Ok(1),
                -1 if exp % 2 == 0 => Ok(1),
                -1 => Ok(-1),
                _ => Ok(0),
            };
        }

        let mut result = 1;
        let mut base = base;
        let mut exp = exp as u64;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(result, base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = self.mul(base, base)?;
            }
        }
        Ok(result)
    }

    fn apply(self, op: &Token, lhs: i64, rhs: i64) -> PResult<i64> {
        match (op.kind, op.text.as_str()) {
            (TokenKind::AddSub, "+") => self.add(lhs, rhs),
            (TokenKind::AddSub, "-") => self.sub(lhs, rhs),
            (TokenKind::MulDiv, "*") => self.mul(lhs, rhs),
            (TokenKind::MulDiv, "/") => self.div(lhs, rhs),
            (TokenKind::Pow, _) => self.pow(lhs, rhs),
            (kind, text) => Err(ErrorKind::Internal(format!(
                "`{text}` ({kind:?}) is not an arithmetic operator"
            ))),
        }
    }
}

fn operand_value(token: &Token) -> PResult<i64> {
    match token.kind {
        TokenKind::Number => token.text.parse().map_err(|_| {
            if !token.text.is_empty() && token.text.bytes().all(|b| b.is_ascii_digit()) {
                ErrorKind::Overflow
            } else {
                ErrorKind::Internal(format!("`{}` is not a number", token.text))
            }
        }),
        TokenKind::Variable => Err(ErrorKind::Internal(format!(
            "cannot evaluate unresolved variable `{}`",
            token.text
        ))),
        kind => Err(ErrorKind::Internal(format!(
            "{kind:?} token `{}` in operand position",
            token.text
        ))),
    }
}

/// Postorder walk: operands push their value, operators pop the right
/// result and then the left one and push what they compute.
fn eval_postorder(node: &Node, overflow: Overflow, stack: &mut Vec<i64>) -> PResult<()> {
    match node {
        Node::Leaf(token) => stack.push(operand_value(token)?),
        Node::Binary { lhs, op, rhs } => {
            eval_postorder(lhs, overflow, stack)?;
            eval_postorder(rhs, overflow, stack)?;

            let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                return Err(ErrorKind::Internal(format!(
                    "operator `{op}` has too few results to combine"
                )));
            };
            stack.push(overflow.apply(op, lhs, rhs)?);
        }
    }
    Ok(())
}

impl Expression {
    pub fn evaluate(&self, overflow: Overflow) -> PResult<i64> {
        let Some(root) = self.root() else {
            return Err(ErrorKind::Internal("cannot evaluate an empty expression".into()));
        };

        let mut stack = vec![];
        eval_postorder(root, overflow, &mut stack)?;

        match stack.as_slice() {
            [value] => Ok(*value),
            rest => Err(ErrorKind::Internal(format!(
                "evaluation left {} values",
                rest.len()
            ))),
        }
    }
}
