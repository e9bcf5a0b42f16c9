use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, trace};

use super::Memo;
use crate::{
    nodes::{ArcPlanNode, GroupPlan, PlanNodeOrGroup, PlanRole},
    pattern::{Pattern, PatternNode},
};

#[derive(Clone, Debug)]
pub struct MatcherProperties {
    /// Stop after this many bindings of one memo expression.
    pub max_bindings: Option<usize>,
    /// Consider physical expressions when a child group is expanded.
    pub expand_physical: bool,
}

impl Default for MatcherProperties {
    fn default() -> Self {
        Self {
            max_bindings: None,
            expand_physical: true,
        }
    }
}

/// Enumerates the plan trees a pattern can bind to, starting from one memo expression.
///
/// Positions the pattern marks as GROUP or MULTI_GROUP stay placeholders. Any other position
/// backed by a group is expanded into each expression recorded in that group, and the bindings
/// of all children are combined as a cartesian product.
pub struct GroupExpressionMatching<'a, M: Memo + ?Sized> {
    pattern: &'a Pattern,
    memo: &'a M,
    properties: MatcherProperties,
}

impl<'a, M: Memo + ?Sized> GroupExpressionMatching<'a, M> {
    pub fn new(pattern: &'a Pattern, memo: &'a M, properties: MatcherProperties) -> Self {
        Self {
            pattern,
            memo,
            properties,
        }
    }

    /// All bindings of the pattern rooted at `expr`. A GROUP root binds the group owning `expr`.
    pub fn bindings(&self, expr: &ArcPlanNode) -> Vec<PlanNodeOrGroup> {
        trace!(event = "bind_group_expr", pattern = %self.pattern, expr = %expr);
        let mut bindings = match self.pattern.node() {
            PatternNode::Group | PatternNode::MultiGroup => match expr.group_id() {
                Some(group_id) => vec![PlanNodeOrGroup::Group(GroupPlan::new(
                    group_id,
                    expr.logical_properties().clone(),
                ))],
                None => vec![],
            },
            _ => self.bind_expr(self.pattern, expr),
        };
        // enumeration stops one past the limit, so truncation is still observed
        if let Some(limit) = self.properties.max_bindings {
            if bindings.len() > limit {
                debug!(event = "bind_group_expr_truncated", expr = %expr, limit);
                bindings.truncate(limit);
            }
        }
        trace!(event = "bind_group_expr_finish", expr = %expr, bindings = bindings.len());
        bindings
    }

    /// Cap on every intermediate binding list. The first `n` bindings of a node only use the
    /// first `n` bindings of each child, so capping children keeps the leading results intact.
    fn enumeration_limit(&self) -> usize {
        self.properties
            .max_bindings
            .map_or(usize::MAX, |limit| limit.saturating_add(1))
    }

    /// Bindings of a concrete node under a non-placeholder pattern.
    fn bind_expr(&self, pattern: &Pattern, node: &ArcPlanNode) -> Vec<PlanNodeOrGroup> {
        let child_patterns = match pattern.node() {
            // children are not looked at
            PatternNode::Any | PatternNode::Multi => return vec![node.clone().into()],
            PatternNode::Group | PatternNode::MultiGroup => return vec![],
            PatternNode::Type(type_pattern) => {
                if !type_pattern.class().is_assignable_from(node.typ()) {
                    return vec![];
                }
                type_pattern.children()
            }
        };
        let Some(slots) = child_slots(child_patterns, node.children().len()) else {
            return vec![];
        };
        if slots.is_empty() {
            return vec![node.clone().into()];
        }

        let mut candidates = Vec::with_capacity(slots.len());
        for (slot, child) in slots.iter().zip(node.children()) {
            let bound = self.bind_child(slot, child);
            if bound.is_empty() {
                return vec![];
            }
            candidates.push(bound);
        }
        candidates
            .into_iter()
            .multi_cartesian_product()
            .take(self.enumeration_limit())
            .map(|children| Arc::new(node.with_children(children)).into())
            .collect_vec()
    }

    fn bind_child(&self, pattern: &Pattern, child: &PlanNodeOrGroup) -> Vec<PlanNodeOrGroup> {
        match (pattern.node(), child) {
            (PatternNode::Group | PatternNode::MultiGroup, PlanNodeOrGroup::Group(_)) => {
                vec![child.clone()]
            }
            (PatternNode::Group | PatternNode::MultiGroup, PlanNodeOrGroup::PlanNode(_)) => vec![],
            (_, PlanNodeOrGroup::PlanNode(node)) => self.bind_expr(pattern, node),
            (_, PlanNodeOrGroup::Group(group)) => self
                .memo
                .get_all_exprs_in_group(group.group_id())
                .iter()
                .filter(|expr| self.properties.expand_physical || expr.role() != PlanRole::Physical)
                .flat_map(|expr| self.bind_expr(pattern, expr))
                .take(self.enumeration_limit())
                .collect_vec(),
        }
    }
}

/// The pattern for every child position, with a trailing MULTI/MULTI_GROUP repeated over the
/// remaining positions. `None` if the pattern cannot cover `num_children` positions.
fn child_slots(patterns: &[Pattern], num_children: usize) -> Option<Vec<Pattern>> {
    match patterns.split_last() {
        Some((multi, fixed)) if multi.is_multi() => {
            if fixed.len() > num_children {
                return None;
            }
            let mut slots = fixed.to_vec();
            slots.resize(num_children, multi.clone());
            Some(slots)
        }
        _ => (patterns.len() == num_children).then(|| patterns.to_vec()),
    }
}
