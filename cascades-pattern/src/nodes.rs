//! The plan tree model: one tagged node type for logical and physical plans, and the
//! placeholder standing in for an unexpanded memo group.

mod plan_type;
mod relation;
mod typed;
mod visitor;

use std::{fmt::Display, sync::Arc};

use anyhow::{ensure, Result};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub use plan_type::{Arity, PlanClass, PlanRole, PlanType};
pub use relation::{LogicalRelation, PhysicalRelation, Qualifier};
pub use typed::{
    AnyPlan, BinaryPlan, LeafPlan, LogicalBinary, LogicalLeaf, LogicalUnary, MultiGroup, MultiPlan,
    PhysicalBinary, PhysicalLeaf, PhysicalUnary, PlanShape, TypedPlan, UnaryPlan,
};
pub use visitor::PlanVisitor;

use crate::{cascades::GroupId, property::LogicalProperties};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Serialize, Deserialize)]
pub enum Value {
    Int64(i64),
    UInt64(u64),
    Float(OrderedFloat<f64>),
    String(Arc<str>),
    Bool(bool),
    Null,
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int64(x) => write!(f, "{x}"),
            Self::UInt64(x) => write!(f, "{x}(u64)"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(x) => write!(f, "\"{x}\""),
            Self::Bool(x) => write!(f, "{x}"),
            Self::Null => write!(f, "NULL"),
        }
    }
}

pub type ArcExpr = Arc<Expr>;

/// Scalar expressions owned by a plan node (filter predicates, projections, sort keys, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    ColumnRef(String),
    Constant(Value),
    Function { name: String, args: Vec<ArcExpr> },
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnRef(name) => write!(f, "#{name}"),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Function { name, args } => write!(f, "{name}({})", args.iter().join(", ")),
        }
    }
}

/// Placeholder for a memo group at some position of a plan tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupPlan {
    group_id: GroupId,
    logical_properties: Arc<LogicalProperties>,
}

impl GroupPlan {
    pub fn new(group_id: GroupId, logical_properties: Arc<LogicalProperties>) -> Self {
        Self {
            group_id,
            logical_properties,
        }
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }

    pub fn logical_properties(&self) -> &Arc<LogicalProperties> {
        &self.logical_properties
    }
}

pub type ArcPlanNode = Arc<PlanNode>;

/// A position in a plan tree: either a concrete node or a group placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanNodeOrGroup {
    PlanNode(ArcPlanNode),
    Group(GroupPlan),
}

impl PlanNodeOrGroup {
    pub fn is_plan_node(&self) -> bool {
        matches!(self, Self::PlanNode(_))
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn as_plan_node(&self) -> Option<&ArcPlanNode> {
        match self {
            Self::PlanNode(node) => Some(node),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&GroupPlan> {
        match self {
            Self::PlanNode(_) => None,
            Self::Group(group) => Some(group),
        }
    }

    pub fn logical_properties(&self) -> &Arc<LogicalProperties> {
        match self {
            Self::PlanNode(node) => node.logical_properties(),
            Self::Group(group) => group.logical_properties(),
        }
    }
}

impl From<ArcPlanNode> for PlanNodeOrGroup {
    fn from(node: ArcPlanNode) -> Self {
        Self::PlanNode(node)
    }
}

impl From<PlanNode> for PlanNodeOrGroup {
    fn from(node: PlanNode) -> Self {
        Self::PlanNode(Arc::new(node))
    }
}

impl From<GroupPlan> for PlanNodeOrGroup {
    fn from(group: GroupPlan) -> Self {
        Self::Group(group)
    }
}

/// A plan node. The tag is `(role, arity, kind)`, all derived from [`PlanType`]. Nodes are
/// immutable once built; rewrites build new nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanNode {
    typ: PlanType,
    children: Vec<PlanNodeOrGroup>,
    expressions: Vec<ArcExpr>,
    qualifier: Option<Qualifier>,
    logical_properties: Arc<LogicalProperties>,
    group_id: Option<GroupId>,
}

impl PlanNode {
    /// Build a non-relation node. The number of children must agree with the arity of `typ`.
    pub fn new(
        typ: PlanType,
        children: Vec<PlanNodeOrGroup>,
        expressions: Vec<ArcExpr>,
        logical_properties: Arc<LogicalProperties>,
    ) -> Result<Self> {
        ensure!(
            !typ.is_relation(),
            "{typ} reads a base table, build it through its relation constructor"
        );
        ensure!(
            children.len() == typ.arity().num_children(),
            "wrong number of children for {typ}: expected {}, got {}",
            typ.arity().num_children(),
            children.len()
        );
        Ok(Self {
            typ,
            children,
            expressions,
            qualifier: None,
            logical_properties,
            group_id: None,
        })
    }

    pub(crate) fn new_relation(
        typ: PlanType,
        qualifier: Qualifier,
        logical_properties: Arc<LogicalProperties>,
    ) -> Result<Self> {
        ensure!(typ.is_relation(), "{typ} is not a relation");
        Ok(Self {
            typ,
            children: vec![],
            expressions: vec![],
            qualifier: Some(qualifier),
            logical_properties,
            group_id: None,
        })
    }

    /// Record the memo group owning this node, once it has been inserted.
    pub fn with_group_id(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Same node over another list of children. Callers keep the child count unchanged.
    pub(crate) fn with_children(&self, children: Vec<PlanNodeOrGroup>) -> Self {
        debug_assert_eq!(children.len(), self.children.len());
        Self {
            children,
            ..self.clone()
        }
    }

    pub fn typ(&self) -> PlanType {
        self.typ
    }

    pub fn role(&self) -> PlanRole {
        self.typ.role()
    }

    pub fn arity(&self) -> Arity {
        self.typ.arity()
    }

    pub fn children(&self) -> &[PlanNodeOrGroup] {
        &self.children
    }

    pub fn child(&self, idx: usize) -> Option<&PlanNodeOrGroup> {
        self.children.get(idx)
    }

    pub fn expressions(&self) -> &[ArcExpr] {
        &self.expressions
    }

    /// The base table path, set only on relations.
    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    pub fn logical_properties(&self) -> &Arc<LogicalProperties> {
        &self.logical_properties
    }

    pub fn group_id(&self) -> Option<GroupId> {
        self.group_id
    }
}
