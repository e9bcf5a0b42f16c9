use super::{
    plan_type::{Arity, PlanRole},
    GroupPlan, PlanNode, PlanNodeOrGroup,
};

/// Double dispatch over plan nodes. Only [`PlanVisitor::visit`] and
/// [`PlanVisitor::visit_group_plan`] are required; every role and arity specific method falls
/// back to `visit`. Relations dispatch to the scan methods instead of the leaf methods, so
/// consumers can tell a read from storage apart from a read from subplans.
pub trait PlanVisitor<C> {
    type Output;

    fn visit(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output;

    fn visit_group_plan(&mut self, group: &GroupPlan, context: &mut C) -> Self::Output;

    fn visit_logical_leaf(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_logical_scan(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_logical_unary(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_logical_binary(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_physical_leaf(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_physical_scan(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_physical_unary(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }

    fn visit_physical_binary(&mut self, plan: &PlanNode, context: &mut C) -> Self::Output {
        self.visit(plan, context)
    }
}

impl PlanNode {
    pub fn accept<C, V>(&self, visitor: &mut V, context: &mut C) -> V::Output
    where
        V: PlanVisitor<C> + ?Sized,
    {
        match (self.role(), self.arity()) {
            (PlanRole::Logical, Arity::Leaf) if self.typ().is_relation() => {
                visitor.visit_logical_scan(self, context)
            }
            (PlanRole::Logical, Arity::Leaf) => visitor.visit_logical_leaf(self, context),
            (PlanRole::Logical, Arity::Unary) => visitor.visit_logical_unary(self, context),
            (PlanRole::Logical, Arity::Binary) => visitor.visit_logical_binary(self, context),
            (PlanRole::Physical, Arity::Leaf) if self.typ().is_relation() => {
                visitor.visit_physical_scan(self, context)
            }
            (PlanRole::Physical, Arity::Leaf) => visitor.visit_physical_leaf(self, context),
            (PlanRole::Physical, Arity::Unary) => visitor.visit_physical_unary(self, context),
            (PlanRole::Physical, Arity::Binary) => visitor.visit_physical_binary(self, context),
        }
    }
}

impl PlanNodeOrGroup {
    pub fn accept<C, V>(&self, visitor: &mut V, context: &mut C) -> V::Output
    where
        V: PlanVisitor<C> + ?Sized,
    {
        match self {
            Self::PlanNode(node) => node.accept(visitor, context),
            Self::Group(group) => visitor.visit_group_plan(group, context),
        }
    }
}
