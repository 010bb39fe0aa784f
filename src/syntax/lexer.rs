use std::iter::Peekable;

use super::token::{Token, TokenKind};

/// Reads tokens one at a time from a character stream.
///
/// Exhausting the stream produces an `End` token, the same as a `.`.
pub(crate) struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    done: bool,
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::End {
            self.done = true;
        }
        Some(token)
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars: chars.peekable(),
            done: false,
        }
    }

    #[inline]
    fn bump(&mut self) {
        let _ = self.chars.next();
    }

    pub fn next_token(&mut self) -> Token {
        while self.chars.next_if_eq(&' ').is_some() {}

        let token = match self.chars.next() {
            None => Token::new(TokenKind::End, ""),
            Some('\n') => Token::new(TokenKind::Newline, "\n"),
            Some('\r') if self.chars.peek() == Some(&'\n') => {
                self.bump();
                Token::new(TokenKind::Newline, "\n")
            }
            Some(c @ ('+' | '-')) => Token::new(TokenKind::AddSub, c),
            Some(c @ ('*' | '/')) => Token::new(TokenKind::MulDiv, c),
            Some('^') => Token::new(TokenKind::Pow, "^"),
            Some('(') => Token::new(TokenKind::LParen, "("),
            Some(')') => Token::new(TokenKind::RParen, ")"),
            Some('.') => Token::new(TokenKind::End, "."),
            Some(':') => self.read_assign(),
            Some(c) if c.is_ascii_digit() => self.read_number(c),
            Some(c) if c.is_ascii_alphabetic() => {
                Token::new(TokenKind::Variable, c.to_ascii_lowercase())
            }
            Some(c) => Token::new(TokenKind::Unknown, c),
        };
        log::trace!("lexed {:?} {:?}", token.kind, token.text);
        token
    }

    fn read_number(&mut self, first: char) -> Token {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
        Token::new(TokenKind::Number, text)
    }

    fn read_assign(&mut self) -> Token {
        if self.chars.peek() == Some(&'=') {
            self.bump();
            return Token::new(TokenKind::Assign, ":=");
        }
        Token::new(TokenKind::Unknown, ":")
    }
}
