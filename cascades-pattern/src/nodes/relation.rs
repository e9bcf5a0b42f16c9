use std::{fmt::Display, sync::Arc};

use anyhow::{bail, ensure, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{
    plan_type::{PlanClass, PlanRole, PlanType},
    typed::{PlanShape, TypedPlan},
    ArcExpr, ArcPlanNode, PlanNode, PlanNodeOrGroup,
};
use crate::{cascades::GroupId, property::LogicalProperties};

/// Name path of a base table, e.g. `catalog.db.table`. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct Qualifier(Arc<[String]>);

impl Qualifier {
    pub fn new<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts = parts.into_iter().map(Into::into).collect_vec();
        ensure!(!parts.is_empty(), "qualifier can not be empty");
        if let Some(idx) = parts.iter().position(String::is_empty) {
            bail!("qualifier segment {idx} can not be empty");
        }
        Ok(Self(parts.into()))
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn table_name(&self) -> &str {
        // non-empty by construction
        &self.0[self.0.len() - 1]
    }
}

impl TryFrom<Vec<String>> for Qualifier {
    type Error = anyhow::Error;

    fn try_from(parts: Vec<String>) -> Result<Self> {
        Self::new(parts)
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

macro_rules! define_relation {
    ($(#[$meta:meta])* $name:ident, $role:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name {
            node: ArcPlanNode,
            qualifier: Qualifier,
        }

        impl $name {
            pub fn new<I, S>(
                typ: PlanType,
                qualifier: I,
                group_id: Option<GroupId>,
                logical_properties: Arc<LogicalProperties>,
            ) -> Result<Self>
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                ensure!(
                    Self::CLASS.is_assignable_from(typ),
                    "{typ} is not a {}",
                    Self::CLASS
                );
                let qualifier = Qualifier::new(qualifier)?;
                let mut node = PlanNode::new_relation(typ, qualifier.clone(), logical_properties)?;
                if let Some(group_id) = group_id {
                    node = node.with_group_id(group_id);
                }
                Ok(Self {
                    node: Arc::new(node),
                    qualifier,
                })
            }

            pub fn qualifier(&self) -> &Qualifier {
                &self.qualifier
            }

            /// Relations own no scalar expressions; this is always empty.
            pub fn expressions(&self) -> &[ArcExpr] {
                self.node.expressions()
            }

            pub fn into_plan_node(self) -> ArcPlanNode {
                self.node
            }
        }

        impl TypedPlan for $name {
            fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
                let node = bound.as_plan_node()?;
                if !Self::CLASS.is_assignable_from(node.typ()) {
                    return None;
                }
                Some(Self {
                    qualifier: node.qualifier()?.clone(),
                    node: node.clone(),
                })
            }
        }

        impl PlanShape for $name {
            const CLASS: PlanClass = PlanClass::Relation($role);

            fn plan(&self) -> &ArcPlanNode {
                &self.node
            }
        }

        impl From<$name> for PlanNodeOrGroup {
            fn from(relation: $name) -> Self {
                PlanNodeOrGroup::PlanNode(relation.node)
            }
        }
    };
}

define_relation!(
    /// A logical plan reading a base table.
    LogicalRelation,
    PlanRole::Logical
);

define_relation!(
    /// A physical scan of a base table.
    PhysicalRelation,
    PlanRole::Physical
);
