//! Plan builders shared by unit tests.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

use crate::{
    cascades::GroupId,
    nodes::{GroupPlan, LogicalRelation, PhysicalRelation, PlanNode, PlanNodeOrGroup, PlanType},
    property::LogicalProperties,
};

pub fn props(columns: &[&str]) -> Arc<LogicalProperties> {
    let fields = columns
        .iter()
        .map(|name| Field::new(*name, DataType::Int64, true))
        .collect::<Vec<_>>();
    Arc::new(Schema::new(fields).into())
}

pub fn group(id: usize) -> PlanNodeOrGroup {
    GroupPlan::new(GroupId(id), props(&["a"])).into()
}

pub fn logical_scan(qualifier: &[&str]) -> PlanNodeOrGroup {
    LogicalRelation::new(
        PlanType::LogicalOlapScan,
        qualifier.iter().copied(),
        None,
        props(&["a"]),
    )
    .unwrap()
    .into()
}

pub fn physical_scan(qualifier: &[&str]) -> PlanNodeOrGroup {
    PhysicalRelation::new(
        PlanType::PhysicalOlapScan,
        qualifier.iter().copied(),
        None,
        props(&["a"]),
    )
    .unwrap()
    .into()
}

/// A non-relation node without expressions.
pub fn node(typ: PlanType, children: Vec<PlanNodeOrGroup>) -> PlanNodeOrGroup {
    PlanNode::new(typ, children, vec![], props(&["a"]))
        .unwrap()
        .into()
}
