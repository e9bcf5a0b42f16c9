use std::sync::Arc;

use tracing::trace;

use crate::{
    nodes::{PlanNodeOrGroup, TypedPlan},
    pattern::{Pattern, PatternDescriptor, PromiseSource, RulePromise},
};

/// A rewrite fired on bindings of its pattern. Transformation rules produce equivalent
/// expressions; implementation rules (`is_impl_rule`) produce physical alternatives.
pub trait Rule: 'static + Send + Sync {
    fn pattern(&self) -> &Pattern;
    fn promise(&self) -> RulePromise;
    /// Fire the rule on one binding. A binding the pattern does not accept produces nothing.
    fn apply(&self, binding: &PlanNodeOrGroup) -> Vec<PlanNodeOrGroup>;
    fn name(&self) -> &'static str;
    fn is_impl_rule(&self) -> bool {
        false
    }
}

/// A rule made of a pattern descriptor and a body over the descriptor's typed view. Built with
/// [`PatternDescriptor::then`] and [`PatternDescriptor::then_implement`].
pub struct PatternRule<B, F> {
    descriptor: PatternDescriptor<B>,
    name: &'static str,
    is_impl_rule: bool,
    transform: F,
}

impl<B, F> PatternRule<B, F> {
    pub(crate) fn new(
        descriptor: PatternDescriptor<B>,
        name: &'static str,
        is_impl_rule: bool,
        transform: F,
    ) -> Self {
        Self {
            descriptor,
            name,
            is_impl_rule,
            transform,
        }
    }

    pub fn descriptor(&self) -> &PatternDescriptor<B> {
        &self.descriptor
    }
}

impl<B, F> Rule for PatternRule<B, F>
where
    B: TypedPlan,
    F: Fn(B) -> Vec<PlanNodeOrGroup> + Send + Sync + 'static,
{
    fn pattern(&self) -> &Pattern {
        self.descriptor.pattern()
    }

    fn promise(&self) -> RulePromise {
        self.descriptor.promise()
    }

    fn apply(&self, binding: &PlanNodeOrGroup) -> Vec<PlanNodeOrGroup> {
        let Some(bound) = self.descriptor.bind(binding) else {
            trace!(event = "rule_no_match", rule = self.name, binding = %binding);
            return vec![];
        };
        let produced = (self.transform)(bound);
        trace!(
            event = "rule_applied",
            rule = self.name,
            binding = %binding,
            produced = produced.len()
        );
        produced
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_impl_rule(&self) -> bool {
        self.is_impl_rule
    }
}

/// A family of rules sharing one default promise. The factory itself is the promise source for
/// the patterns its rules are built from.
pub trait RuleFactory: PromiseSource {
    fn build_rules(&self) -> Vec<Arc<dyn Rule>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        nodes::{GroupPlan, LogicalUnary, PlanType},
        pattern::factory,
        testing::{group, logical_scan, node},
    };

    fn drop_unary() -> impl Rule {
        factory::logical_unary(&RulePromise::Rewrite).then(
            "drop_unary",
            |unary: LogicalUnary<GroupPlan>| vec![unary.child().clone().into()],
        )
    }

    #[test]
    fn test_rule_exposes_descriptor_parts() {
        let rule = drop_unary();
        assert_eq!(rule.name(), "drop_unary");
        assert_eq!(rule.promise(), RulePromise::Rewrite);
        assert!(!rule.is_impl_rule());
        assert_eq!(rule.pattern().to_string(), "(LogicalUnary GROUP)");
    }

    #[test]
    fn test_apply_only_on_match() {
        let rule = drop_unary();
        let sort = node(PlanType::LogicalSort, vec![group(5)]);
        assert_eq!(rule.apply(&sort), vec![group(5)]);
        assert!(rule.apply(&logical_scan(&["t"])).is_empty());
        assert!(rule.apply(&group(5)).is_empty());
    }

    #[test]
    fn test_implementation_rule_flag() {
        let rule = factory::plan_of(&RulePromise::Implement, PlanType::LogicalLimit)
            .then_implement("limit_impl", |_| vec![]);
        assert!(rule.is_impl_rule());
        let rule: Arc<dyn Rule> = Arc::new(rule);
        assert_eq!(rule.name(), "limit_impl");
    }
}
