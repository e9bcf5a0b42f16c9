use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::nodes::ArcPlanNode;

/// Identifier of an equivalence class in the memo table.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash, Serialize, Deserialize,
)]
pub struct GroupId(pub usize);

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!{}", self.0)
    }
}

/// Read-only view of a memo table. The memo itself, including its locking discipline, lives
/// outside this crate.
pub trait Memo: Send + Sync {
    /// Get all expressions recorded in the group. Every child of a returned expression is a
    /// group placeholder, and the expression carries `group_id` as its owning group.
    fn get_all_exprs_in_group(&self, group_id: GroupId) -> Vec<ArcPlanNode>;
}
