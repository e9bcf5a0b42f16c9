//! Constructors for pattern descriptors. This is how rules declare their shapes: every type
//! pattern built here has exactly as many child patterns as its class has children.
//!
//! Each function takes the [`PromiseSource`] that stamps the descriptor. Zero-argument unary and
//! binary constructors leave their children as GROUP, i.e. "match this node without requiring
//! its inputs to be explored yet"; the `_with` variants splice in the caller's child patterns,
//! sharing them rather than copying.

use anyhow::Result;

use super::{Pattern, PatternDescriptor, PromiseSource};
use crate::nodes::{
    AnyPlan, BinaryPlan, GroupPlan, LeafPlan, LogicalBinary, LogicalLeaf, LogicalRelation,
    LogicalUnary, MultiGroup, MultiPlan, PhysicalBinary, PhysicalLeaf, PhysicalRelation,
    PhysicalUnary, PlanClass, PlanShape, PlanType, TypedPlan, UnaryPlan,
};

fn leaf<B, S>(source: &S) -> PatternDescriptor<B>
where
    B: PlanShape,
    S: PromiseSource + ?Sized,
{
    PatternDescriptor::new(Pattern::new_type(B::CLASS, vec![]), source.default_promise())
}

fn unary<B, S>(source: &S, child: &Pattern) -> PatternDescriptor<B>
where
    B: PlanShape,
    S: PromiseSource + ?Sized,
{
    PatternDescriptor::new(
        Pattern::new_type(B::CLASS, vec![child.clone()]),
        source.default_promise(),
    )
}

fn binary<B, S>(source: &S, left: &Pattern, right: &Pattern) -> PatternDescriptor<B>
where
    B: PlanShape,
    S: PromiseSource + ?Sized,
{
    PatternDescriptor::new(
        Pattern::new_type(B::CLASS, vec![left.clone(), right.clone()]),
        source.default_promise(),
    )
}

/* special patterns */

pub fn any<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<AnyPlan> {
    PatternDescriptor::new(Pattern::any(), source.default_promise())
}

pub fn multi<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<MultiPlan> {
    PatternDescriptor::new(Pattern::multi(), source.default_promise())
}

pub fn group<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<GroupPlan> {
    PatternDescriptor::new(Pattern::group(), source.default_promise())
}

pub fn multi_group<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<MultiGroup> {
    PatternDescriptor::new(Pattern::multi_group(), source.default_promise())
}

/* abstract plan patterns */

pub fn leaf_plan<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<LeafPlan> {
    leaf(source)
}

pub fn unary_plan<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<UnaryPlan<GroupPlan>> {
    unary(source, &Pattern::group())
}

pub fn unary_plan_with<C, S>(
    source: &S,
    child: &PatternDescriptor<C>,
) -> PatternDescriptor<UnaryPlan<C>>
where
    C: TypedPlan,
    S: PromiseSource + ?Sized,
{
    unary(source, child.pattern())
}

pub fn binary_plan<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<BinaryPlan<GroupPlan, GroupPlan>> {
    binary(source, &Pattern::group(), &Pattern::group())
}

pub fn binary_plan_with<L, R, S>(
    source: &S,
    left: &PatternDescriptor<L>,
    right: &PatternDescriptor<R>,
) -> PatternDescriptor<BinaryPlan<L, R>>
where
    L: TypedPlan,
    R: TypedPlan,
    S: PromiseSource + ?Sized,
{
    binary(source, left.pattern(), right.pattern())
}

/* logical plan patterns */

pub fn logical_leaf<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<LogicalLeaf> {
    leaf(source)
}

pub fn logical_unary<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<LogicalUnary<GroupPlan>> {
    unary(source, &Pattern::group())
}

pub fn logical_unary_with<C, S>(
    source: &S,
    child: &PatternDescriptor<C>,
) -> PatternDescriptor<LogicalUnary<C>>
where
    C: TypedPlan,
    S: PromiseSource + ?Sized,
{
    unary(source, child.pattern())
}

pub fn logical_binary<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<LogicalBinary<GroupPlan, GroupPlan>> {
    binary(source, &Pattern::group(), &Pattern::group())
}

pub fn logical_binary_with<L, R, S>(
    source: &S,
    left: &PatternDescriptor<L>,
    right: &PatternDescriptor<R>,
) -> PatternDescriptor<LogicalBinary<L, R>>
where
    L: TypedPlan,
    R: TypedPlan,
    S: PromiseSource + ?Sized,
{
    binary(source, left.pattern(), right.pattern())
}

pub fn logical_relation<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<LogicalRelation> {
    leaf(source)
}

/* physical plan patterns */

pub fn physical_leaf<S: PromiseSource + ?Sized>(source: &S) -> PatternDescriptor<PhysicalLeaf> {
    leaf(source)
}

pub fn physical_unary<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<PhysicalUnary<GroupPlan>> {
    unary(source, &Pattern::group())
}

pub fn physical_unary_with<C, S>(
    source: &S,
    child: &PatternDescriptor<C>,
) -> PatternDescriptor<PhysicalUnary<C>>
where
    C: TypedPlan,
    S: PromiseSource + ?Sized,
{
    unary(source, child.pattern())
}

pub fn physical_binary<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<PhysicalBinary<GroupPlan, GroupPlan>> {
    binary(source, &Pattern::group(), &Pattern::group())
}

pub fn physical_binary_with<L, R, S>(
    source: &S,
    left: &PatternDescriptor<L>,
    right: &PatternDescriptor<R>,
) -> PatternDescriptor<PhysicalBinary<L, R>>
where
    L: TypedPlan,
    R: TypedPlan,
    S: PromiseSource + ?Sized,
{
    binary(source, left.pattern(), right.pattern())
}

pub fn physical_relation<S: PromiseSource + ?Sized>(
    source: &S,
) -> PatternDescriptor<PhysicalRelation> {
    leaf(source)
}

/* concrete kinds */

/// Pattern for exactly one plan kind, its children left as GROUP.
pub fn plan_of<S: PromiseSource + ?Sized>(
    source: &S,
    kind: PlanType,
) -> PatternDescriptor<AnyPlan> {
    let children = vec![Pattern::group(); kind.arity().num_children()];
    PatternDescriptor::new(
        Pattern::new_type(PlanClass::Kind(kind), children),
        source.default_promise(),
    )
}

/// Pattern for exactly one plan kind over the given child patterns. The children are checked
/// against the arity of `kind`, so a trailing MULTI/MULTI_GROUP is accepted here.
pub fn plan_of_with<S: PromiseSource + ?Sized>(
    source: &S,
    kind: PlanType,
    children: &[Pattern],
) -> Result<PatternDescriptor<AnyPlan>> {
    let pattern = Pattern::try_new_type(PlanClass::Kind(kind), children.to_vec())?;
    Ok(PatternDescriptor::new(pattern, source.default_promise()))
}
