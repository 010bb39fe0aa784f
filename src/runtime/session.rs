use crate::{
    config::Config,
    error::{ErrorKind, PResult},
    syntax::{self, Lexer, Token, TokenKind},
};

use super::{env::VariableStore, tree::Expression};

pub(crate) const SYNTAX_ERROR: &str = "Syntax Error, Expression Skipped";

/// Drives statements through validation, conversion, tree building and
/// evaluation, keeping variable bindings between them.
pub(crate) struct Session {
    config: Config,
    store: VariableStore,
    count: usize,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: VariableStore::new(),
            count: 0,
        }
    }

    pub fn store(&self) -> &VariableStore {
        &self.store
    }

    /// Reads statements until `.` or the end of `chars`, handing every
    /// output line to `display`.
    pub fn run<I, F>(&mut self, chars: I, mut display: F)
    where
        I: Iterator<Item = char>,
        F: FnMut(&str),
    {
        let mut lexer = Lexer::new(chars);

        loop {
            let mut tokens = vec![];
            let mut terminator = TokenKind::End;
            for token in lexer.by_ref() {
                if token.is_terminator() {
                    terminator = token.kind;
                    break;
                }
                tokens.push(token);
            }

            if !tokens.is_empty() {
                self.process(&tokens, &mut display);
            }
            if terminator == TokenKind::End {
                break;
            }
        }
    }

    /// Handles one statement.
    ///
    /// Rejected statements do not use up a statement number.
    pub fn process<F: FnMut(&str)>(&mut self, tokens: &[Token], display: &mut F) {
        if !syntax::is_valid(tokens) {
            display(SYNTAX_ERROR);
            return;
        }

        self.count += 1;
        let n = self.count;
        display(&format!("in  [{n}]: {}", syntax::join(tokens)));

        let result = match self.evaluate_statement(tokens) {
            Ok(result) => result,
            Err(why @ (ErrorKind::DivisionByZero | ErrorKind::Overflow)) => {
                log::warn!("statement {n}: {why}");
                format!("Arithmetic Error, {why}")
            }
            Err(why @ ErrorKind::TooDeep(_)) => {
                log::warn!("statement {n}: {why}");
                format!("Error, {why}")
            }
            Err(why) => {
                log::error!("statement {n}: {why}");
                format!("Error, {why}")
            }
        };
        display(&format!("out [{n}]: {result}"));
    }

    fn evaluate_statement(&mut self, tokens: &[Token]) -> PResult<String> {
        let postfix = syntax::to_postfix(tokens);
        let (target, body) = split_assignment(&postfix);
        let expr = Expression::build(body)?;
        if expr.is_empty() {
            return Err(ErrorKind::Internal("statement has no expression".into()));
        }
        log::debug!("built tree {} of height {}", expr.to_postfix(), expr.height());

        if let Some(name) = target {
            self.store.assign(name, expr.clone());
        }

        let overflow = self.config.overflow;
        if !expr.contains_variable() {
            return Ok(expr.evaluate(overflow)?.to_string());
        }

        let simplified = expr.simplify(&self.store)?;
        if simplified.contains_variable() {
            Ok(simplified.to_infix_with(self.config.infix))
        } else {
            Ok(simplified.evaluate(overflow)?.to_string())
        }
    }
}

/// Splits a leading `<variable> :=` off a postfix statement.
fn split_assignment(postfix: &[Token]) -> (Option<&str>, &[Token]) {
    match postfix {
        [target, assign, body @ ..]
            if target.kind == TokenKind::Variable && assign.kind == TokenKind::Assign =>
        {
            (Some(target.text.as_str()), body)
        }
        _ => (None, postfix),
    }
}
