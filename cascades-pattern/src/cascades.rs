//! The interface this crate needs from a cascades memo, and the binding enumeration that walks it.

mod binding;
mod memo;

pub use binding::{GroupExpressionMatching, MatcherProperties};
pub use memo::{GroupId, Memo};
