use crate::runtime::{InfixStyle, Overflow};

/// Settings a session runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Config {
    pub infix: InfixStyle,
    pub overflow: Overflow,
}
