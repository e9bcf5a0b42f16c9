//! Compact s-expression rendering of plans, e.g. `(LogicalJoin (LogicalOlapScan db.t) !3)`.

use std::fmt::{self, Display, Formatter, Write};

use crate::nodes::{GroupPlan, PlanNode, PlanNodeOrGroup, PlanVisitor};

struct Explain;

impl<'a> PlanVisitor<Formatter<'a>> for Explain {
    type Output = fmt::Result;

    fn visit(&mut self, plan: &PlanNode, f: &mut Formatter<'a>) -> fmt::Result {
        write!(f, "({}", plan.typ())?;
        if !plan.expressions().is_empty() {
            f.write_str(" [")?;
            for (idx, expr) in plan.expressions().iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{expr}")?;
            }
            f.write_char(']')?;
        }
        for child in plan.children() {
            f.write_char(' ')?;
            child.accept(self, f)?;
        }
        f.write_char(')')
    }

    fn visit_group_plan(&mut self, group: &GroupPlan, f: &mut Formatter<'a>) -> fmt::Result {
        write!(f, "{}", group.group_id())
    }

    fn visit_logical_scan(&mut self, plan: &PlanNode, f: &mut Formatter<'a>) -> fmt::Result {
        explain_scan(plan, f)
    }

    fn visit_physical_scan(&mut self, plan: &PlanNode, f: &mut Formatter<'a>) -> fmt::Result {
        explain_scan(plan, f)
    }
}

fn explain_scan(plan: &PlanNode, f: &mut Formatter<'_>) -> fmt::Result {
    match plan.qualifier() {
        Some(qualifier) => write!(f, "({} {})", plan.typ(), qualifier),
        None => write!(f, "({})", plan.typ()),
    }
}

impl Display for PlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.accept(&mut Explain, f)
    }
}

impl Display for PlanNodeOrGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.accept(&mut Explain, f)
    }
}
