//! Statically typed views of a matched plan. A pattern descriptor names one of these as the type
//! its rule body receives; the view is rebuilt from the bound candidate after a successful match.

use super::{
    plan_type::{Arity, PlanClass, PlanRole},
    ArcPlanNode, GroupPlan, PlanNodeOrGroup,
};

pub trait TypedPlan: Sized + Clone + Send + Sync + 'static {
    /// View the bound position as `Self`, or `None` if its shape does not fit.
    fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self>;
}

/// Typed plans rooted at a concrete node of a known class.
pub trait PlanShape: TypedPlan {
    const CLASS: PlanClass;

    fn plan(&self) -> &ArcPlanNode;
}

/// Any concrete node.
#[derive(Clone, Debug)]
pub struct AnyPlan(ArcPlanNode);

impl AnyPlan {
    pub fn plan(&self) -> &ArcPlanNode {
        &self.0
    }
}

impl TypedPlan for AnyPlan {
    fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
        bound.as_plan_node().cloned().map(Self)
    }
}

impl TypedPlan for GroupPlan {
    fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
        bound.as_group().cloned()
    }
}

/// Marker for a run of concrete children. Only usable as the tail of a hand-built type pattern.
#[derive(Clone, Copy, Debug)]
pub enum MultiPlan {}

/// Marker for a run of group placeholders. Only usable as the tail of a hand-built type pattern.
#[derive(Clone, Copy, Debug)]
pub enum MultiGroup {}

macro_rules! define_typed_plan {
    ($(#[$meta:meta])* $name:ident : leaf, $class:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name(ArcPlanNode);

        impl TypedPlan for $name {
            fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
                let node = bound.as_plan_node()?;
                <Self as PlanShape>::CLASS
                    .is_assignable_from(node.typ())
                    .then(|| Self(node.clone()))
            }
        }

        impl PlanShape for $name {
            const CLASS: PlanClass = $class;

            fn plan(&self) -> &ArcPlanNode {
                &self.0
            }
        }
    };

    ($(#[$meta:meta])* $name:ident : unary, $class:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name<C> {
            node: ArcPlanNode,
            child: C,
        }

        impl<C> $name<C> {
            pub fn child(&self) -> &C {
                &self.child
            }
        }

        impl<C: TypedPlan> TypedPlan for $name<C> {
            fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
                let node = bound.as_plan_node()?;
                if !<Self as PlanShape>::CLASS.is_assignable_from(node.typ()) {
                    return None;
                }
                let [child] = node.children() else {
                    return None;
                };
                Some(Self {
                    child: C::from_bound(child)?,
                    node: node.clone(),
                })
            }
        }

        impl<C: TypedPlan> PlanShape for $name<C> {
            const CLASS: PlanClass = $class;

            fn plan(&self) -> &ArcPlanNode {
                &self.node
            }
        }
    };

    ($(#[$meta:meta])* $name:ident : binary, $class:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug)]
        pub struct $name<L, R> {
            node: ArcPlanNode,
            left: L,
            right: R,
        }

        impl<L, R> $name<L, R> {
            pub fn left(&self) -> &L {
                &self.left
            }

            pub fn right(&self) -> &R {
                &self.right
            }
        }

        impl<L: TypedPlan, R: TypedPlan> TypedPlan for $name<L, R> {
            fn from_bound(bound: &PlanNodeOrGroup) -> Option<Self> {
                let node = bound.as_plan_node()?;
                if !<Self as PlanShape>::CLASS.is_assignable_from(node.typ()) {
                    return None;
                }
                let [left, right] = node.children() else {
                    return None;
                };
                Some(Self {
                    left: L::from_bound(left)?,
                    right: R::from_bound(right)?,
                    node: node.clone(),
                })
            }
        }

        impl<L: TypedPlan, R: TypedPlan> PlanShape for $name<L, R> {
            const CLASS: PlanClass = $class;

            fn plan(&self) -> &ArcPlanNode {
                &self.node
            }
        }
    };
}

define_typed_plan!(
    /// Any leaf node.
    LeafPlan: leaf,
    PlanClass::Abstract { role: None, arity: Arity::Leaf }
);
define_typed_plan!(
    /// Any node with one child.
    UnaryPlan: unary,
    PlanClass::Abstract { role: None, arity: Arity::Unary }
);
define_typed_plan!(
    /// Any node with two children.
    BinaryPlan: binary,
    PlanClass::Abstract { role: None, arity: Arity::Binary }
);
define_typed_plan!(
    LogicalLeaf: leaf,
    PlanClass::Abstract { role: Some(PlanRole::Logical), arity: Arity::Leaf }
);
define_typed_plan!(
    LogicalUnary: unary,
    PlanClass::Abstract { role: Some(PlanRole::Logical), arity: Arity::Unary }
);
define_typed_plan!(
    LogicalBinary: binary,
    PlanClass::Abstract { role: Some(PlanRole::Logical), arity: Arity::Binary }
);
define_typed_plan!(
    PhysicalLeaf: leaf,
    PlanClass::Abstract { role: Some(PlanRole::Physical), arity: Arity::Leaf }
);
define_typed_plan!(
    PhysicalUnary: unary,
    PlanClass::Abstract { role: Some(PlanRole::Physical), arity: Arity::Unary }
);
define_typed_plan!(
    PhysicalBinary: binary,
    PlanClass::Abstract { role: Some(PlanRole::Physical), arity: Arity::Binary }
);
