use std::fmt::Display;

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanRole {
    Logical,
    Physical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arity {
    Leaf,
    Unary,
    Binary,
}

impl Arity {
    pub fn num_children(self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

/// Plan kinds known to the optimizer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay, EnumIter,
)]
pub enum PlanType {
    // Developers: update `role`, `arity` and `is_relation` after adding new plan nodes
    LogicalOlapScan,
    LogicalOneRowRelation,
    LogicalEmptyRelation,
    LogicalProject,
    LogicalFilter,
    LogicalSort,
    LogicalLimit,
    LogicalAggregate,
    LogicalJoin,
    PhysicalOlapScan,
    PhysicalEmptyRelation,
    PhysicalProject,
    PhysicalFilter,
    PhysicalQuickSort,
    PhysicalLimit,
    PhysicalHashAggregate,
    PhysicalHashJoin,
    PhysicalNestedLoopJoin,
}

impl PlanType {
    pub fn is_logical(&self) -> bool {
        matches!(
            self,
            Self::LogicalOlapScan
                | Self::LogicalOneRowRelation
                | Self::LogicalEmptyRelation
                | Self::LogicalProject
                | Self::LogicalFilter
                | Self::LogicalSort
                | Self::LogicalLimit
                | Self::LogicalAggregate
                | Self::LogicalJoin
        )
    }

    pub fn role(&self) -> PlanRole {
        if self.is_logical() {
            PlanRole::Logical
        } else {
            PlanRole::Physical
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Self::LogicalOlapScan
            | Self::LogicalOneRowRelation
            | Self::LogicalEmptyRelation
            | Self::PhysicalOlapScan
            | Self::PhysicalEmptyRelation => Arity::Leaf,
            Self::LogicalJoin | Self::PhysicalHashJoin | Self::PhysicalNestedLoopJoin => {
                Arity::Binary
            }
            _ => Arity::Unary,
        }
    }

    /// Relations read a base table rather than their (nonexistent) children.
    pub fn is_relation(&self) -> bool {
        matches!(
            self,
            Self::LogicalOlapScan | Self::LogicalOneRowRelation | Self::PhysicalOlapScan
        )
    }
}

/// The class of plans a type pattern targets. Abstract classes cover every kind of an arity,
/// optionally restricted to one role; `Kind` targets exactly one plan type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanClass {
    Abstract {
        role: Option<PlanRole>,
        arity: Arity,
    },
    Relation(PlanRole),
    Kind(PlanType),
}

impl PlanClass {
    pub fn arity(&self) -> Arity {
        match self {
            Self::Abstract { arity, .. } => *arity,
            Self::Relation(_) => Arity::Leaf,
            Self::Kind(typ) => typ.arity(),
        }
    }

    /// Whether a node of kind `typ` is an instance of this class.
    pub fn is_assignable_from(&self, typ: PlanType) -> bool {
        match self {
            Self::Abstract { role, arity } => {
                typ.arity() == *arity && role.map_or(true, |role| role == typ.role())
            }
            Self::Relation(role) => typ.is_relation() && typ.role() == *role,
            Self::Kind(kind) => *kind == typ,
        }
    }
}

impl Display for PlanClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = |role: &PlanRole| match role {
            PlanRole::Logical => "Logical",
            PlanRole::Physical => "Physical",
        };
        match self {
            Self::Abstract { role: None, arity } => write!(f, "{arity:?}Plan"),
            Self::Abstract {
                role: Some(r),
                arity,
            } => write!(f, "{}{arity:?}", role(r)),
            Self::Relation(r) => write!(f, "{}Relation", role(r)),
            Self::Kind(typ) => write!(f, "{typ}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_relations_are_leaves() {
        for typ in PlanType::iter().filter(PlanType::is_relation) {
            assert_eq!(typ.arity(), Arity::Leaf, "{typ}");
        }
    }

    #[test]
    fn test_role_follows_name() {
        for typ in PlanType::iter() {
            let logical = typ.to_string().starts_with("Logical");
            assert_eq!(typ.is_logical(), logical, "{typ}");
        }
    }

    #[test]
    fn test_class_assignability() {
        let logical_leaf = PlanClass::Abstract {
            role: Some(PlanRole::Logical),
            arity: Arity::Leaf,
        };
        assert!(logical_leaf.is_assignable_from(PlanType::LogicalOlapScan));
        assert!(logical_leaf.is_assignable_from(PlanType::LogicalEmptyRelation));
        assert!(!logical_leaf.is_assignable_from(PlanType::PhysicalOlapScan));
        assert!(!logical_leaf.is_assignable_from(PlanType::LogicalFilter));

        let relation = PlanClass::Relation(PlanRole::Physical);
        assert!(relation.is_assignable_from(PlanType::PhysicalOlapScan));
        assert!(!relation.is_assignable_from(PlanType::PhysicalEmptyRelation));
        assert!(!relation.is_assignable_from(PlanType::LogicalOlapScan));

        let binary = PlanClass::Abstract {
            role: None,
            arity: Arity::Binary,
        };
        for typ in PlanType::iter() {
            assert_eq!(
                binary.is_assignable_from(typ),
                typ.arity() == Arity::Binary,
                "{typ}"
            );
        }

        let kind = PlanClass::Kind(PlanType::PhysicalHashJoin);
        assert!(kind.is_assignable_from(PlanType::PhysicalHashJoin));
        assert!(!kind.is_assignable_from(PlanType::PhysicalNestedLoopJoin));
    }

    #[test]
    fn test_class_display() {
        let unary = PlanClass::Abstract {
            role: None,
            arity: Arity::Unary,
        };
        assert_eq!(unary.to_string(), "UnaryPlan");
        let physical_binary = PlanClass::Abstract {
            role: Some(PlanRole::Physical),
            arity: Arity::Binary,
        };
        assert_eq!(physical_binary.to_string(), "PhysicalBinary");
        assert_eq!(
            PlanClass::Relation(PlanRole::Logical).to_string(),
            "LogicalRelation"
        );
        assert_eq!(
            PlanClass::Kind(PlanType::LogicalJoin).to_string(),
            "LogicalJoin"
        );
    }
}
