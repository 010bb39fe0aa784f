use super::token::{Token, TokenKind};

/// Reorders a validated infix statement into postfix.
///
/// Operators are left associative: a stacked operator of equal or higher
/// precedence is emitted before the incoming one is pushed.
pub(crate) fn to_postfix(tokens: &[Token]) -> Vec<Token> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<&Token> = vec![];

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::Variable | TokenKind::Assign => {
                output.push(token.clone())
            }
            TokenKind::LParen => ops.push(token),
            TokenKind::AddSub | TokenKind::MulDiv | TokenKind::Pow => {
                while let Some(top) = ops.last() {
                    if top.kind == TokenKind::LParen || top.precedence() < token.precedence() {
                        break;
                    }
                    output.push((*top).clone());
                    ops.pop();
                }
                ops.push(token);
            }
            TokenKind::RParen => {
                while let Some(top) = ops.pop() {
                    if top.kind == TokenKind::LParen {
                        break;
                    }
                    output.push(top.clone());
                }
            }
            TokenKind::Newline | TokenKind::End | TokenKind::Unknown => {
                log::warn!("ignoring {:?} token during postfix conversion", token.kind)
            }
        }
    }

    while let Some(top) = ops.pop() {
        output.push(top.clone());
    }

    log::debug!("postfix: {}", super::token::join(&output));
    output
}
