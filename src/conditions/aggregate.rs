//! aggregate condition builder for field groups

use super::check::Check;
use super::expr::ConditionState;
use super::time::Clock;
use super::types::{Action, Token};
use crate::error::Result;
use crate::target::{Collection, HasChecked, HasFiles, HasOptions, HasValue};

/// a condition chain over a collection of targets
///
/// every predicate runs against each member and folds the outcomes into a
/// single result through the collection's quorum. the quorum applies to the
/// next aggregate predicate only and is reset to unanimity afterwards.
#[derive(Debug)]
pub struct GroupCondition<'a, G: Collection> {
    target: &'a mut G,
    state: ConditionState,
    clock: Clock,
}

impl<'a, G: Collection> GroupCondition<'a, G> {
    pub fn new(target: &'a mut G) -> Self {
        Self {
            target,
            state: ConditionState::new(),
            clock: Clock::default(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn result(&self) -> bool {
        self.state.result
    }

    pub fn tokens(&self) -> &[Token] {
        self.state.tokens()
    }

    pub fn target(&self) -> &G {
        self.target
    }

    /// quorum for the next aggregate predicate; 0 requires every member
    pub fn set_pass_option(mut self, quorum: usize) -> Self {
        self.target.set_pass_option(quorum);
        self
    }

    pub fn pass_option(&self) -> usize {
        self.target.pass_option()
    }

    /// run `f` on every member and compare the passing count to the quorum
    pub fn foreach(mut self, mut f: impl FnMut(&G::Item) -> bool) -> Self {
        let quorum = self.target.pass_option();
        let items = self.target.items();
        let total = items.len();

        let mut true_count = total;
        for item in items {
            if !f(item) {
                true_count -= 1;
            }
        }

        self.state.result = if quorum == 0 {
            true_count == total
        } else {
            true_count >= quorum
        };
        tracing::debug!(
            "aggregate: {}/{} passed, quorum {} -> {}",
            true_count,
            total,
            quorum,
            self.state.result
        );

        self.target.set_pass_option(0);
        self
    }

    pub fn and(mut self) -> Self {
        self.state.connect(Token::And);
        self
    }

    pub fn or(mut self) -> Self {
        self.state.connect(Token::Or);
        self
    }

    pub fn token(mut self, token: Token) -> Self {
        self.state.push(token);
        self
    }

    pub fn then(self) -> Result<&'a mut G> {
        self.resolve(Action::Then)
    }

    pub fn otherwise(self) -> Result<&'a mut G> {
        self.resolve(Action::Else)
    }

    pub fn resolve(mut self, action: Action) -> Result<&'a mut G> {
        let enabled = self.state.finish(action)?;
        self.target.set_enabled(enabled);
        Ok(self.target)
    }
}

impl<'a, G> GroupCondition<'a, G>
where
    G: Collection,
    G::Item: HasValue,
{
    fn test_value(self, f: impl Fn(Option<&str>, bool, &Clock) -> bool) -> Self {
        let clock = self.clock;
        self.foreach(|item| f(item.value(), item.is_numeric(), &clock))
    }

    impl_value_checks!();

    /// any member with `value` is checked
    pub fn is_checked_by_value(self, value: &str) -> Self
    where
        G::Item: HasChecked,
    {
        self.set_pass_option(1)
            .foreach(|item| item.is_checked() && item.value() == Some(value))
    }

    pub fn is_not_checked_by_value(self, value: &str) -> Self
    where
        G::Item: HasChecked,
    {
        let mut this = self.is_checked_by_value(value);
        this.state.result = !this.state.result;
        this
    }
}

impl<'a, G> GroupCondition<'a, G>
where
    G: Collection,
    G::Item: HasChecked,
{
    /// members are checked, subject to the quorum
    pub fn is_checked(self) -> Self {
        self.foreach(|item| item.is_checked())
    }

    /// members are unchecked, subject to the quorum
    pub fn is_not_checked(self) -> Self {
        self.foreach(|item| !item.is_checked())
    }

    pub fn is_any_checked(self) -> Self {
        self.set_pass_option(1).foreach(|item| item.is_checked())
    }

    pub fn is_none_checked(self) -> Self {
        let mut this = self.is_any_checked();
        this.state.result = !this.state.result;
        this
    }

    /// at least `n` members are checked
    pub fn is_checked_at_least(self, n: usize) -> Self {
        if n == 0 {
            // nothing to count; still consume the quorum
            let mut this = self.set_pass_option(0);
            this.state.result = true;
            return this;
        }
        self.set_pass_option(n).foreach(|item| item.is_checked())
    }
}

impl<'a, G> GroupCondition<'a, G>
where
    G: Collection,
    G::Item: HasValue + HasFiles + HasChecked + HasOptions,
{
    /// run a dynamically described predicate
    ///
    /// member-level checks are folded through the quorum; group-level
    /// checks (any checked, checked value) run against the whole group
    pub fn each(self, check: &Check) -> Result<Self> {
        if check.is_group_level() {
            return Ok(match check {
                Check::Not(inner) => {
                    let mut this = self.each(inner)?;
                    this.state.result = !this.state.result;
                    this
                }
                Check::CheckedValue(value) => self.is_checked_by_value(value),
                _ => self.is_any_checked(),
            });
        }

        let clock = self.clock;
        let mut failure = None;
        let this = self.foreach(|item| match check.evaluate(item, &clock) {
            Ok(passed) => passed,
            Err(e) => {
                failure.get_or_insert(e);
                false
            }
        });
        match failure {
            Some(e) => Err(e),
            None => Ok(this),
        }
    }
}
