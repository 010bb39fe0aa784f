use crate::{error::SyntaxError, runtime::MAX_DEPTH};

use super::token::{Token, TokenKind};

/// Longest accepted statement. A tree built from `n` tokens is at most
/// `(n + 1) / 2` levels deep, so this keeps statements within `MAX_DEPTH`.
pub(crate) const MAX_TOKENS: usize = 2 * MAX_DEPTH - 1;

/// Checks a whole statement before any tree is built.
///
/// Two views of the statement are kept while scanning. `stack` is the
/// structural prefix: every token except `)`, with a closed group collapsed
/// away, so its top is what the next token structurally follows. `prev` is
/// simply the token read before the current one.
pub(crate) fn validate(tokens: &[Token]) -> Result<(), SyntaxError> {
    let Some(last) = tokens.last() else {
        return Err(SyntaxError::Empty);
    };
    if tokens.len() > MAX_TOKENS {
        return Err(SyntaxError::TooLong(tokens.len(), MAX_TOKENS));
    }

    let mut stack: Vec<&Token> = Vec::with_capacity(tokens.len());
    let mut prev: Option<&Token> = None;

    for (i, token) in tokens.iter().enumerate() {
        let kind = token.kind;

        if kind == TokenKind::Unknown {
            return Err(SyntaxError::UnknownToken(token.text.clone()));
        }
        if i == 0 && (kind.is_operator() || kind == TokenKind::Assign) {
            return Err(SyntaxError::LeadingOperator(token.text.clone()));
        }

        if kind == TokenKind::Assign {
            if i != 1 {
                return Err(SyntaxError::MisplacedAssign);
            }
            if tokens[0].kind != TokenKind::Variable {
                return Err(SyntaxError::AssignTarget(tokens[0].text.clone()));
            }
        } else if let Some(lhs) = stack.last() {
            if lhs.kind == kind && !kind.is_paren() {
                return Err(SyntaxError::AdjacentSameKind(token.text.clone()));
            }
            if lhs.kind == TokenKind::Pow && kind != TokenKind::Number {
                return Err(SyntaxError::NonLiteralExponent(token.text.clone()));
            }
            if lhs.kind == TokenKind::MulDiv && lhs.text == "/" && is_literal_zero(token) {
                return Err(SyntaxError::LiteralZeroDivisor);
            }
        }

        if let Some(prev) = prev {
            check_adjacent(prev, token)?;
        }

        if kind == TokenKind::RParen {
            let Some(open) = stack.iter().rposition(|t| t.kind == TokenKind::LParen) else {
                return Err(SyntaxError::UnmatchedRParen);
            };
            stack.truncate(open);
        } else {
            stack.push(token);
        }
        prev = Some(token);
    }

    if last.kind.is_operator() || matches!(last.kind, TokenKind::Assign | TokenKind::LParen) {
        return Err(SyntaxError::TrailingOperator(last.text.clone()));
    }
    if stack.iter().any(|t| t.kind == TokenKind::LParen) {
        return Err(SyntaxError::UnmatchedLParen);
    }

    Ok(())
}

pub(crate) fn is_valid(tokens: &[Token]) -> bool {
    match validate(tokens) {
        Ok(()) => true,
        Err(why) => {
            log::debug!("rejected `{}`: {why}", super::token::join(tokens));
            false
        }
    }
}

/// Rules on raw neighbours: operands and operators must alternate.
fn check_adjacent(prev: &Token, token: &Token) -> Result<(), SyntaxError> {
    use TokenKind::*;

    match (prev.kind, token.kind) {
        (LParen, RParen) => Err(SyntaxError::EmptyParens),
        (Number | Variable | RParen, Number | Variable | LParen) => {
            Err(SyntaxError::MissingOperator(token.text.clone()))
        }
        (AddSub | MulDiv | Pow | LParen | Assign, AddSub | MulDiv | Pow | RParen) => {
            Err(SyntaxError::MissingOperand(token.text.clone()))
        }
        _ => Ok(()),
    }
}

fn is_literal_zero(token: &Token) -> bool {
    token.kind == TokenKind::Number && token.text.bytes().all(|b| b == b'0')
}
