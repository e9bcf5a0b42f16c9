use std::sync::Arc;

use arrow_schema::{Schema, SchemaRef};

/// Logical properties derived for a plan node or a memo group. They are computed outside this
/// crate (by whoever builds the plan) and only carried around here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalProperties {
    schema: SchemaRef,
}

impl LogicalProperties {
    pub fn new(schema: SchemaRef) -> Self {
        Self { schema }
    }

    /// Properties of a plan that produces no columns.
    pub fn empty() -> Self {
        Self::new(Arc::new(Schema::empty()))
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect()
    }
}

impl From<Schema> for LogicalProperties {
    fn from(schema: Schema) -> Self {
        Self::new(Arc::new(schema))
    }
}
