mod common;

use cascades_pattern::{
    nodes::{LogicalRelation, PhysicalRelation, PlanClass, PlanNodeOrGroup, PlanShape, PlanType},
    pattern::{factory, Pattern, RulePromise},
};
use common::{group, logical_scan, physical_scan, plan, props};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

const PROMISE: RulePromise = RulePromise::Explore;

fn physical_join(left: PlanNodeOrGroup, right: PlanNodeOrGroup) -> PlanNodeOrGroup {
    plan(PlanType::PhysicalHashJoin, vec![left, right]).into()
}

#[test]
fn join_of_physical_scans() {
    let descriptor = factory::physical_binary_with(
        &PROMISE,
        &factory::physical_relation(&PROMISE),
        &factory::physical_relation(&PROMISE),
    );
    assert_eq!(
        descriptor.pattern().to_string(),
        "(PhysicalBinary PhysicalRelation PhysicalRelation)"
    );

    let expanded = physical_join(physical_scan("t1").into(), physical_scan("t2").into());
    assert!(descriptor.matches(&expanded));
    let bound = descriptor.bind(&expanded).unwrap();
    assert_eq!(bound.left().qualifier().to_string(), "db.t1");
    assert_eq!(bound.right().qualifier().to_string(), "db.t2");

    // children not yet expanded out of their groups
    let unexpanded = physical_join(group(1), group(2));
    assert!(!descriptor.matches(&unexpanded));
    assert!(descriptor.bind(&unexpanded).is_none());

    // logical scans are not physical relations
    let logical_children = physical_join(logical_scan("t1").into(), logical_scan("t2").into());
    assert!(!descriptor.matches(&logical_children));
}

#[test]
fn leaf_plan_rejects_inner_nodes() {
    let descriptor = factory::leaf_plan(&PROMISE);
    for typ in PlanType::iter() {
        if typ.is_relation() {
            continue;
        }
        let candidate: PlanNodeOrGroup = match typ.arity().num_children() {
            0 => plan(typ, vec![]).into(),
            1 => plan(typ, vec![group(1)]).into(),
            _ => plan(typ, vec![group(1), group(2)]).into(),
        };
        assert_eq!(
            descriptor.matches(&candidate),
            typ.arity().num_children() == 0,
            "{typ}"
        );
    }
    assert!(descriptor.matches(&logical_scan("t").into()));
    assert!(descriptor.matches(&physical_scan("t").into()));
    assert!(!descriptor.matches(&group(1)));
}

#[test]
fn any_and_group_never_overlap() {
    let any = factory::any(&PROMISE);
    let group_descriptor = factory::group(&PROMISE);
    let candidates: Vec<PlanNodeOrGroup> = vec![
        logical_scan("t").into(),
        physical_scan("t").into(),
        plan(PlanType::LogicalFilter, vec![group(1)]).into(),
        plan(PlanType::PhysicalNestedLoopJoin, vec![group(1), group(2)]).into(),
        plan(PlanType::PhysicalEmptyRelation, vec![]).into(),
    ];
    for candidate in &candidates {
        assert!(any.matches(candidate), "{candidate}");
        assert!(!group_descriptor.matches(candidate), "{candidate}");
    }
    assert!(!any.matches(&group(3)));
    assert!(group_descriptor.matches(&group(3)));
}

#[test]
fn binary_match_needs_both_children() {
    let descriptor = factory::binary_plan_with(
        &PROMISE,
        &factory::logical_relation(&PROMISE),
        &factory::logical_unary(&PROMISE),
    );
    let sort = plan(PlanType::LogicalSort, vec![group(4)]);
    let both: PlanNodeOrGroup =
        plan(PlanType::LogicalJoin, vec![logical_scan("t").into(), sort.clone().into()]).into();
    let left_only: PlanNodeOrGroup =
        plan(PlanType::LogicalJoin, vec![logical_scan("t").into(), group(4)]).into();
    let right_only: PlanNodeOrGroup =
        plan(PlanType::LogicalJoin, vec![group(3), sort.into()]).into();

    assert!(descriptor.matches(&both));
    assert!(!descriptor.matches(&left_only));
    assert!(!descriptor.matches(&right_only));
    assert!(descriptor.bind(&left_only).is_none());
    assert!(descriptor.bind(&right_only).is_none());

    let bound = descriptor.bind(&both).unwrap();
    assert_eq!(bound.left().qualifier().table_name(), "t");
    assert_eq!(bound.right().plan().typ(), PlanType::LogicalSort);
}

#[test]
fn composed_patterns_share_children() {
    let child = factory::logical_unary(&PROMISE);
    let unary = factory::unary_plan_with(&PROMISE, &child);
    assert!(Pattern::ptr_eq(&unary.pattern().children()[0], child.pattern()));

    let binary = factory::binary_plan_with(&PROMISE, &unary, &child);
    assert!(Pattern::ptr_eq(&binary.pattern().children()[0], unary.pattern()));
    assert!(Pattern::ptr_eq(&binary.pattern().children()[1], child.pattern()));
}

#[test]
fn hand_built_patterns_are_checked() {
    let err = Pattern::try_new_type(
        PlanClass::Kind(PlanType::PhysicalLimit),
        vec![Pattern::group(), Pattern::group()],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "wrong number of child patterns for PhysicalLimit: expected 1, got 2"
    );
    assert!(factory::plan_of_with(&PROMISE, PlanType::LogicalOneRowRelation, &[Pattern::any()])
        .is_err());
}

#[test]
fn relations_keep_their_qualifier() {
    let logical =
        LogicalRelation::new(PlanType::LogicalOlapScan, ["db", "t"], None, props(&["a"])).unwrap();
    assert_eq!(logical.qualifier().parts(), ["db", "t"]);
    assert!(logical.expressions().is_empty());

    let physical =
        PhysicalRelation::new(PlanType::PhysicalOlapScan, ["db", "t"], None, props(&["a"]))
            .unwrap();
    assert_eq!(physical.qualifier().parts(), ["db", "t"]);
    assert!(physical.expressions().is_empty());

    let empty: [&str; 0] = [];
    assert!(LogicalRelation::new(PlanType::LogicalOlapScan, empty, None, props(&["a"])).is_err());
    assert!(
        PhysicalRelation::new(PlanType::LogicalOlapScan, ["db", "t"], None, props(&["a"]))
            .is_err()
    );
}
