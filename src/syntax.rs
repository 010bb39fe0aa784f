mod lexer;
mod postfix;
mod token;
mod validate;

pub(crate) use lexer::Lexer;
pub(crate) use postfix::to_postfix;
pub(crate) use token::{join, Token, TokenKind};
pub(crate) use validate::is_valid;
