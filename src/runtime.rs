mod env;
mod eval;
mod session;
mod simplify;
mod tree;

pub(crate) use eval::Overflow;
pub(crate) use session::Session;
pub(crate) use tree::{InfixStyle, MAX_DEPTH};
