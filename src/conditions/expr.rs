//! token-list expressions and the per-chain condition state
//!
//! an expression is a flat list `v (op v)*` resolved left to right,
//! with `&&` binding tighter than `||`

use std::fmt;

use super::types::{Action, Token};
use crate::error::{Error, Result};

/// ordered list of values and connectives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// resolve the expression as a sum of products
    ///
    /// fails on an empty list, a leading or trailing connective, two adjacent
    /// connectives or two adjacent values
    pub fn resolve(&self) -> Result<bool> {
        if self.tokens.is_empty() {
            return Err(Error::evaluation("empty expression"));
        }

        // OR of completed AND-terms, and the term being built
        let mut any = false;
        let mut term: Option<bool> = None;
        let mut pending: Option<Token> = None;

        for (i, token) in self.tokens.iter().enumerate() {
            match token {
                Token::Value(v) => match (term, pending.take()) {
                    (None, None) => term = Some(*v),
                    (Some(t), Some(Token::And)) => term = Some(t && *v),
                    (Some(t), Some(Token::Or)) => {
                        any = any || t;
                        term = Some(*v);
                    }
                    _ => {
                        return Err(Error::evaluation(format!(
                            "unexpected value at position {} in '{}'",
                            i, self
                        )))
                    }
                },
                Token::And | Token::Or => {
                    if term.is_none() || pending.is_some() {
                        return Err(Error::evaluation(format!(
                            "unexpected '{}' at position {} in '{}'",
                            token, i, self
                        )));
                    }
                    pending = Some(*token);
                }
            }
        }

        if pending.is_some() {
            return Err(Error::evaluation(format!(
                "expression '{}' ends with a connective",
                self
            )));
        }

        Ok(any || term.unwrap_or(false))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

/// running result and accumulated tokens for one condition chain
///
/// owned by exactly one builder; created fresh by every `when()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionState {
    /// most recent predicate outcome
    pub result: bool,
    expr: Expression,
}

impl Default for ConditionState {
    fn default() -> Self {
        Self {
            result: true,
            expr: Expression::new(),
        }
    }
}

impl ConditionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[Token] {
        self.expr.tokens()
    }

    /// push the current result followed by a connective
    pub fn connect(&mut self, connective: Token) {
        self.expr.push(Token::Value(self.result));
        self.expr.push(connective);
    }

    pub fn push(&mut self, token: Token) {
        self.expr.push(token);
    }

    /// resolve the chain and map it through `action`
    ///
    /// on success the tokens are cleared and `result` holds the resolved
    /// expression; on failure the state is left as it was
    pub fn finish(&mut self, action: Action) -> Result<bool> {
        if self.expr.is_empty() {
            return Ok(action.apply(self.result));
        }

        let mut expr = self.expr.clone();
        expr.push(Token::Value(self.result));
        let resolved = expr.resolve()?;
        tracing::debug!("resolved '{}' -> {} ({})", expr, resolved, action);

        self.expr.clear();
        self.result = resolved;
        Ok(action.apply(resolved))
    }
}
