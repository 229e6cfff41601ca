//! core types for the condition system

use std::fmt;

/// one fragment of an accumulated condition expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// snapshot of a predicate result
    Value(bool),
    /// logical AND (binds tighter than OR)
    And,
    /// logical OR
    Or,
}

impl Token {
    /// parse a connective from string (supports symbolic and word forms)
    pub fn parse_connective(s: &str) -> Option<Self> {
        match s {
            "&&" | "and" => Some(Token::And),
            "||" | "or" => Some(Token::Or),
            _ => None,
        }
    }

    pub fn is_connective(&self) -> bool {
        matches!(self, Token::And | Token::Or)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Value(b) => write!(f, "{}", b),
            Token::And => write!(f, "&&"),
            Token::Or => write!(f, "||"),
        }
    }
}

/// what `then`/`otherwise` does with the resolved expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// enable the target when the expression is true
    #[default]
    Then,
    /// enable the target when the expression is false
    Else,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "then" => Some(Action::Then),
            "else" | "otherwise" => Some(Action::Else),
            _ => None,
        }
    }

    /// map a resolved expression value onto the enablement flag
    pub fn apply(&self, resolved: bool) -> bool {
        match self {
            Action::Then => resolved,
            Action::Else => !resolved,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Then => write!(f, "then"),
            Action::Else => write!(f, "else"),
        }
    }
}
