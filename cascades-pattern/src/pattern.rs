//! Plan-shape patterns. A pattern is an immutable, reference-counted tree; composing patterns
//! shares the child trees instead of copying them.

mod descriptor;
pub mod factory;
mod matcher;

use std::{
    fmt::Display,
    sync::{Arc, LazyLock},
};

use anyhow::{ensure, Result};
use itertools::Itertools;

pub use descriptor::{PatternDescriptor, PromiseSource, RulePromise};
pub use matcher::{bind, matches};

use crate::nodes::PlanClass;

static ANY: LazyLock<Pattern> = LazyLock::new(|| Pattern(Arc::new(PatternNode::Any)));
static MULTI: LazyLock<Pattern> = LazyLock::new(|| Pattern(Arc::new(PatternNode::Multi)));
static GROUP: LazyLock<Pattern> = LazyLock::new(|| Pattern(Arc::new(PatternNode::Group)));
static MULTI_GROUP: LazyLock<Pattern> =
    LazyLock::new(|| Pattern(Arc::new(PatternNode::MultiGroup)));

#[derive(Clone, Debug)]
pub struct Pattern(Arc<PatternNode>);

#[derive(Debug)]
pub enum PatternNode {
    /// Exactly one concrete node of any kind, children unchecked.
    Any,
    /// A run of concrete children; only valid as the last child pattern.
    Multi,
    /// A group placeholder, not descended into.
    Group,
    /// A run of group placeholders; only valid as the last child pattern.
    MultiGroup,
    Type(TypePattern),
}

#[derive(Debug)]
pub struct TypePattern {
    class: PlanClass,
    children: Vec<Pattern>,
}

impl TypePattern {
    pub fn class(&self) -> PlanClass {
        self.class
    }

    pub fn children(&self) -> &[Pattern] {
        &self.children
    }
}

impl Pattern {
    pub fn any() -> Self {
        ANY.clone()
    }

    pub fn multi() -> Self {
        MULTI.clone()
    }

    pub fn group() -> Self {
        GROUP.clone()
    }

    pub fn multi_group() -> Self {
        MULTI_GROUP.clone()
    }

    /// Build a type pattern by hand. Without a trailing MULTI/MULTI_GROUP the number of child
    /// patterns must equal the arity of `class`; with one, the patterns before it may not exceed
    /// that arity.
    pub fn try_new_type(class: PlanClass, children: Vec<Pattern>) -> Result<Self> {
        check_type_children(class, &children)?;
        Ok(Self::new_type(class, children))
    }

    /// Factory path: arity is correct by construction.
    pub(crate) fn new_type(class: PlanClass, children: Vec<Pattern>) -> Self {
        debug_assert!(check_type_children(class, &children).is_ok());
        Self(Arc::new(PatternNode::Type(TypePattern { class, children })))
    }

    pub fn node(&self) -> &PatternNode {
        &self.0
    }

    pub fn as_type(&self) -> Option<&TypePattern> {
        match self.node() {
            PatternNode::Type(type_pattern) => Some(type_pattern),
            _ => None,
        }
    }

    /// Child patterns of a type pattern; special patterns have none.
    pub fn children(&self) -> &[Pattern] {
        match self.as_type() {
            Some(type_pattern) => type_pattern.children(),
            None => &[],
        }
    }

    /// MULTI or MULTI_GROUP.
    pub fn is_multi(&self) -> bool {
        matches!(self.node(), PatternNode::Multi | PatternNode::MultiGroup)
    }

    /// GROUP or MULTI_GROUP.
    pub fn is_group(&self) -> bool {
        matches!(self.node(), PatternNode::Group | PatternNode::MultiGroup)
    }

    /// Whether both handles point at the same pattern tree.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

fn check_type_children(class: PlanClass, children: &[Pattern]) -> Result<()> {
    let expected = class.arity().num_children();
    match children.iter().find_position(|child| child.is_multi()) {
        Some((idx, multi)) => {
            ensure!(
                idx + 1 == children.len(),
                "{multi} must be the last child pattern of {class}"
            );
            ensure!(
                idx <= expected,
                "too many child patterns before {multi} for {class}: \
                 expected at most {expected}, got {idx}"
            );
        }
        None => ensure!(
            children.len() == expected,
            "wrong number of child patterns for {class}: expected {expected}, got {}",
            children.len()
        ),
    }
    Ok(())
}

impl Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node() {
            PatternNode::Any => write!(f, "ANY"),
            PatternNode::Multi => write!(f, "MULTI"),
            PatternNode::Group => write!(f, "GROUP"),
            PatternNode::MultiGroup => write!(f, "MULTI_GROUP"),
            PatternNode::Type(TypePattern { class, children }) if children.is_empty() => {
                write!(f, "{class}")
            }
            PatternNode::Type(TypePattern { class, children }) => {
                write!(f, "({class} {})", children.iter().join(" "))
            }
        }
    }
}
