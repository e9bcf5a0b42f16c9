use std::{fmt::Debug, marker::PhantomData};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{matcher, Pattern};
use crate::{
    nodes::{PlanNodeOrGroup, TypedPlan},
    rules::PatternRule,
};

/// Scheduling tag attached to every pattern of a rule. Only the rule scheduler reads it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum RulePromise {
    Explore,
    Implement,
    Rewrite,
    Normalize,
}

/// Supplies the promise stamped on patterns built through [`super::factory`].
pub trait PromiseSource {
    fn default_promise(&self) -> RulePromise;
}

impl PromiseSource for RulePromise {
    fn default_promise(&self) -> RulePromise {
        *self
    }
}

/// A pattern paired with its rule promise. `B` is the typed view a successful match yields;
/// it has no influence on matching itself.
pub struct PatternDescriptor<B> {
    pattern: Pattern,
    promise: RulePromise,
    _marker: PhantomData<fn() -> B>,
}

impl<B> PatternDescriptor<B> {
    pub fn new(pattern: Pattern, promise: RulePromise) -> Self {
        Self {
            pattern,
            promise,
            _marker: PhantomData,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn promise(&self) -> RulePromise {
        self.promise
    }

    pub fn matches(&self, candidate: &PlanNodeOrGroup) -> bool {
        matcher::matches(&self.pattern, candidate)
    }
}

impl<B: TypedPlan> PatternDescriptor<B> {
    /// Match `candidate` and view it as `B`.
    pub fn bind(&self, candidate: &PlanNodeOrGroup) -> Option<B> {
        B::from_bound(matcher::bind(&self.pattern, candidate)?)
    }

    /// Turn this descriptor into a transformation rule.
    pub fn then<F>(self, name: &'static str, transform: F) -> PatternRule<B, F>
    where
        F: Fn(B) -> Vec<PlanNodeOrGroup> + Send + Sync + 'static,
    {
        PatternRule::new(self, name, false, transform)
    }

    /// Turn this descriptor into an implementation rule.
    pub fn then_implement<F>(self, name: &'static str, transform: F) -> PatternRule<B, F>
    where
        F: Fn(B) -> Vec<PlanNodeOrGroup> + Send + Sync + 'static,
    {
        PatternRule::new(self, name, true, transform)
    }
}

impl<B> Clone for PatternDescriptor<B> {
    fn clone(&self) -> Self {
        Self::new(self.pattern.clone(), self.promise)
    }
}

impl<B> Debug for PatternDescriptor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternDescriptor")
            .field("pattern", &format_args!("{}", self.pattern))
            .field("promise", &self.promise)
            .finish()
    }
}
