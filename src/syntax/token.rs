use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TokenKind {
    Number,
    Variable,
    AddSub,
    MulDiv,
    Pow,
    LParen,
    RParen,
    Assign,
    Newline,
    End,
    Unknown,
}

pub(crate) type Precedence = u8;

impl TokenKind {
    pub fn is_operator(self) -> bool {
        matches!(self, Self::AddSub | Self::MulDiv | Self::Pow)
    }

    pub fn is_operand(self) -> bool {
        matches!(self, Self::Number | Self::Variable)
    }

    pub fn is_paren(self) -> bool {
        matches!(self, Self::LParen | Self::RParen)
    }

    /// Binding strength of an operator kind; zero for everything else.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Pow => 3,
            Self::MulDiv => 2,
            Self::AddSub => 1,
            _ => 0,
        }
    }
}

/// A classified piece of input together with the text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::End)
    }

    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Joins token text with single spaces, the way statements are echoed back.
pub(crate) fn join(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
