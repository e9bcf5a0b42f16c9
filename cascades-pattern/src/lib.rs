#![allow(clippy::new_without_default)]

pub mod cascades;
mod explain;
pub mod nodes;
pub mod pattern;
pub mod property;
pub mod rules;
#[cfg(test)]
mod testing;
