//! Structural matching of a pattern against a plan position. Matching is a pure predicate: it
//! never touches the memo, never caches, and a mismatch is a plain `false`.

use super::{Pattern, PatternNode};
use crate::nodes::PlanNodeOrGroup;

/// Check whether `candidate` has the shape described by `pattern`.
///
/// MULTI and MULTI_GROUP at the root of a pattern stand for a single position and behave like
/// ANY and GROUP respectively.
pub fn matches(pattern: &Pattern, candidate: &PlanNodeOrGroup) -> bool {
    match pattern.node() {
        PatternNode::Any | PatternNode::Multi => candidate.is_plan_node(),
        PatternNode::Group | PatternNode::MultiGroup => candidate.is_group(),
        PatternNode::Type(type_pattern) => match candidate {
            PlanNodeOrGroup::PlanNode(node) => {
                type_pattern.class().is_assignable_from(node.typ())
                    && match_children(type_pattern.children(), node.children())
            }
            PlanNodeOrGroup::Group(_) => false,
        },
    }
}

/// Match `candidate` and hand it back as the bound value.
pub fn bind<'a>(pattern: &Pattern, candidate: &'a PlanNodeOrGroup) -> Option<&'a PlanNodeOrGroup> {
    matches(pattern, candidate).then_some(candidate)
}

fn match_children(patterns: &[Pattern], children: &[PlanNodeOrGroup]) -> bool {
    let mut children = children.iter();
    for pattern in patterns {
        match pattern.node() {
            // a trailing run takes every remaining child, possibly none
            PatternNode::Multi => return children.all(PlanNodeOrGroup::is_plan_node),
            PatternNode::MultiGroup => return children.all(PlanNodeOrGroup::is_group),
            _ => match children.next() {
                Some(child) if matches(pattern, child) => {}
                _ => return false,
            },
        }
    }
    // leftover children mean the node is wider than the pattern
    children.next().is_none()
}
