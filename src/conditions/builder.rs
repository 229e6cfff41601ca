//! single-target condition builder

use super::check::Check;
use super::expr::ConditionState;
use super::predicates;
use super::time::Clock;
use super::types::{Action, Token};
use crate::error::Result;
use crate::target::{Gate, HasChecked, HasFiles, HasOptions, HasValue};

/// a condition chain over one target
///
/// every predicate overwrites the running result; only `and`/`or` followed
/// by `then`/`otherwise` combine results. the chain holds the target's only
/// mutable borrow until it is resolved.
#[derive(Debug)]
pub struct Condition<'a, T: Gate> {
    target: &'a mut T,
    state: ConditionState,
    clock: Clock,
}

impl<'a, T: Gate> Condition<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        Self {
            target,
            state: ConditionState::new(),
            clock: Clock::default(),
        }
    }

    /// pin "today" and "now" for date/time predicates
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// most recent predicate outcome
    pub fn result(&self) -> bool {
        self.state.result
    }

    pub fn tokens(&self) -> &[Token] {
        self.state.tokens()
    }

    pub fn target(&self) -> &T {
        self.target
    }

    pub fn and(mut self) -> Self {
        self.state.connect(Token::And);
        self
    }

    pub fn or(mut self) -> Self {
        self.state.connect(Token::Or);
        self
    }

    /// append a raw token to the expression
    pub fn token(mut self, token: Token) -> Self {
        self.state.push(token);
        self
    }

    /// run an arbitrary predicate over the target
    pub fn test(mut self, f: impl FnOnce(&T) -> bool) -> Self {
        self.state.result = f(self.target);
        self
    }

    /// enable the target iff the expression holds
    pub fn then(self) -> Result<&'a mut T> {
        self.resolve(Action::Then)
    }

    /// enable the target iff the expression does not hold
    pub fn otherwise(self) -> Result<&'a mut T> {
        self.resolve(Action::Else)
    }

    /// resolve the chain and write the outcome to the enablement flag
    ///
    /// a malformed expression returns an error and leaves the flag as it was
    pub fn resolve(mut self, action: Action) -> Result<&'a mut T> {
        let enabled = self.state.finish(action)?;
        self.target.set_enabled(enabled);
        Ok(self.target)
    }
}

impl<'a, T: HasValue> Condition<'a, T> {
    fn test_value(mut self, f: impl Fn(Option<&str>, bool, &Clock) -> bool) -> Self {
        self.state.result = f(
            self.target.value(),
            self.target.is_numeric(),
            &self.clock,
        );
        self
    }

    impl_value_checks!();
}

impl<'a, T: Gate + HasFiles> Condition<'a, T> {
    fn test_files(mut self, f: impl FnOnce(usize) -> bool) -> Self {
        self.state.result = f(self.target.file_count());
        self
    }

    pub fn is_greater_files_count(self, n: usize) -> Self {
        self.test_files(|count| predicates::is_greater_count(count, n))
    }

    pub fn is_not_greater_files_count(self, n: usize) -> Self {
        self.test_files(|count| !predicates::is_greater_count(count, n))
    }

    pub fn is_less_files_count(self, n: usize) -> Self {
        self.test_files(|count| predicates::is_less_count(count, n))
    }

    pub fn is_not_less_files_count(self, n: usize) -> Self {
        self.test_files(|count| !predicates::is_less_count(count, n))
    }

    pub fn is_files_count_between(self, start: usize, end: usize) -> Self {
        self.test_files(|count| predicates::is_count_between(count, start, end))
    }

    pub fn is_not_files_count_between(self, start: usize, end: usize) -> Self {
        self.test_files(|count| !predicates::is_count_between(count, start, end))
    }
}

impl<'a, T: Gate + HasOptions> Condition<'a, T> {
    /// any option is selected
    pub fn is_selected(mut self) -> Self {
        self.state.result = !self.target.selected_values().is_empty();
        self
    }

    pub fn is_not_selected(self) -> Self {
        let mut this = self.is_selected();
        this.state.result = !this.state.result;
        this
    }

    /// the option with `value` is selected
    pub fn is_selected_by_value(mut self, value: &str) -> Self {
        self.state.result = self.target.selected_values().contains(&value);
        self
    }

    pub fn is_not_selected_by_value(self, value: &str) -> Self {
        let mut this = self.is_selected_by_value(value);
        this.state.result = !this.state.result;
        this
    }
}

impl<'a, T: Gate + HasChecked> Condition<'a, T> {
    pub fn is_checked(mut self) -> Self {
        self.state.result = self.target.is_checked();
        self
    }

    pub fn is_not_checked(mut self) -> Self {
        self.state.result = !self.target.is_checked();
        self
    }
}

impl<'a, T> Condition<'a, T>
where
    T: HasValue + HasFiles + HasChecked + HasOptions,
{
    /// run a dynamically described predicate
    ///
    /// fails with `TypeMismatch` for group-only checks
    pub fn check(mut self, check: &Check) -> Result<Self> {
        self.state.result = check.evaluate(&*self.target, &self.clock)?;
        Ok(self)
    }
}
