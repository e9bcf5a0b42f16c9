#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use arrow_schema::{DataType, Field, Schema};
use cascades_pattern::{
    cascades::{GroupId, Memo},
    nodes::{
        ArcPlanNode, GroupPlan, LogicalRelation, PhysicalRelation, PlanNode, PlanNodeOrGroup,
        PlanType,
    },
    property::LogicalProperties,
};

pub fn props(columns: &[&str]) -> Arc<LogicalProperties> {
    let fields = columns
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect::<Vec<_>>();
    Arc::new(Schema::new(fields).into())
}

pub fn group(id: usize) -> PlanNodeOrGroup {
    GroupPlan::new(GroupId(id), props(&["v"])).into()
}

pub fn logical_scan(table: &str) -> ArcPlanNode {
    LogicalRelation::new(PlanType::LogicalOlapScan, ["db", table], None, props(&["v"]))
        .unwrap()
        .into_plan_node()
}

pub fn physical_scan(table: &str) -> ArcPlanNode {
    PhysicalRelation::new(PlanType::PhysicalOlapScan, ["db", table], None, props(&["v"]))
        .unwrap()
        .into_plan_node()
}

pub fn plan(typ: PlanType, children: Vec<PlanNodeOrGroup>) -> ArcPlanNode {
    Arc::new(PlanNode::new(typ, children, vec![], props(&["v"])).unwrap())
}

/// A memo table held in a map, filled by tests. Every recorded expression points back at its
/// group, and its children are expected to be group placeholders.
#[derive(Default)]
pub struct NaiveMemo {
    groups: HashMap<GroupId, Vec<ArcPlanNode>>,
}

impl NaiveMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `expr` in `group_id` and return the recorded expression.
    pub fn add_expr_to_group(&mut self, expr: ArcPlanNode, group_id: GroupId) -> ArcPlanNode {
        let expr = Arc::new(expr.as_ref().clone().with_group_id(group_id));
        self.groups.entry(group_id).or_default().push(expr.clone());
        expr
    }
}

impl Memo for NaiveMemo {
    fn get_all_exprs_in_group(&self, group_id: GroupId) -> Vec<ArcPlanNode> {
        self.groups.get(&group_id).cloned().unwrap_or_default()
    }
}
