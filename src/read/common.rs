use crate::{
    common::{self, filter, reserved},
    error::Result,
};

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use serde::Serialize;
use serde_dynamo::to_attribute_value;
use std::collections;

fn get_projection_operation(projection: &str) -> common::ExpressionInput {
    let expression = reserved::alias_projection(projection);
    let expression_attribute_names = reserved::derive_names(&expression);
    common::ExpressionInput {
        expression,
        expression_attribute_names,
        ..Default::default()
    }
}

/// Single-item read settings, ready to hand to a GetItem request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SingleReadInput {
    /// Whether the read is strongly consistent.
    pub consistent_read: Option<bool>,
    /// Name placeholders, `None` when there are none.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Aliased projection expression.
    pub projection_expression: Option<String>,
    /// The table to read from.
    pub table_name: String,
}

/// Arguments for single-item read operations (GetItem).
///
/// These arguments apply to operations that retrieve a single item, such as GetItem.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SingleReadArgs {
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// Extra name placeholders, merged last and winning on collision.
    pub expression_attribute_names: Option<common::NameMap>,
    /// Comma separated attributes to retrieve.
    ///
    /// Items that are reserved words are aliased automatically. If `None`, all attributes
    /// are retrieved.
    pub projection: Option<String>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl From<SingleReadArgs> for SingleReadInput {
    fn from(single_read_args: SingleReadArgs) -> Self {
        let mut expression_attribute_names = common::NameMap::new();
        let projection_expression = single_read_args.projection.map(|projection| {
            let operation = get_projection_operation(&projection);
            expression_attribute_names.extend(operation.expression_attribute_names);
            operation.expression
        });
        if let Some(extra_names) = single_read_args.expression_attribute_names {
            expression_attribute_names.extend(extra_names);
        }
        Self {
            consistent_read: single_read_args.consistent_read,
            expression_attribute_names: common::into_hash_map(expression_attribute_names),
            projection_expression,
            table_name: single_read_args.table_name,
        }
    }
}

/// Multiple-item read settings, ready to hand to a Query or Scan request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadInput {
    /// Whether the read is strongly consistent.
    pub consistent_read: Option<bool>,
    /// Pagination cursor.
    pub exclusive_start_key: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Name placeholders, `None` when there are none.
    pub expression_attribute_names: Option<collections::HashMap<String, String>>,
    /// Value placeholders, `None` when there are none.
    pub expression_attribute_values: Option<collections::HashMap<String, types::AttributeValue>>,
    /// Compiled filter expression.
    pub filter_expression: Option<String>,
    /// Secondary index to read.
    pub index_name: Option<String>,
    /// Maximum number of items to evaluate.
    pub limit: Option<i32>,
    /// Aliased projection expression.
    pub projection_expression: Option<String>,
    /// Which attributes to return.
    pub select: Option<types::Select>,
    /// The table to read from.
    pub table_name: String,
}

/// Arguments for multiple-item read operations (Query, Scan).
///
/// These arguments apply to operations that can return multiple items, such as Query and Scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipleReadArgs<T> {
    /// Whether to use a consistent read.
    ///
    /// `true` for strongly consistent reads, `false` or `None` for eventually consistent reads.
    pub consistent_read: Option<bool>,
    /// The exclusive start key for pagination.
    ///
    /// Used to continue a previous Query or Scan operation from where it left off.
    /// Typically obtained from the `last_evaluated_key` in the previous response.
    pub exclusive_start_key: Option<collections::HashMap<String, T>>,
    /// Extra name placeholders, merged last and winning on collision.
    pub expression_attribute_names: Option<common::NameMap>,
    /// Extra value placeholders, merged last and winning on collision.
    pub expression_attribute_values: Option<IndexMap<String, T>>,
    /// Filters combined with `AND`, in order.
    pub filters: Vec<filter::FilterSpec>,
    /// The name of a global secondary index or local secondary index to read.
    pub index_name: Option<String>,
    /// The maximum number of items to evaluate (not necessarily the number of matching items).
    pub limit: Option<i32>,
    /// Comma separated attributes to retrieve, reserved words are aliased automatically.
    pub projection: Option<String>,
    /// Which attributes to return.
    pub select: Option<types::Select>,
    /// The name of the table to read from.
    pub table_name: String,
}

impl<T: Serialize> MultipleReadArgs<T> {
    /// Build the read input, merging the key condition first and the caller extras last.
    pub(crate) fn into_input(
        self,
        key_condition: Option<common::ExpressionInput>,
    ) -> Result<(Option<String>, MultipleReadInput)> {
        let mut expression_attribute_names = common::NameMap::new();
        let mut expression_attribute_values = common::ValueMap::new();
        let key_condition_expression = key_condition.map(|operation| {
            operation.merge_into(
                &mut expression_attribute_names,
                &mut expression_attribute_values,
            )
        });
        let filter_expression = filter::compile(&self.filters)?.map(|operation| {
            operation.merge_into(
                &mut expression_attribute_names,
                &mut expression_attribute_values,
            )
        });
        let projection_expression = self.projection.map(|projection| {
            get_projection_operation(&projection).merge_into(
                &mut expression_attribute_names,
                &mut expression_attribute_values,
            )
        });
        if let Some(extra_names) = self.expression_attribute_names {
            expression_attribute_names.extend(extra_names);
        }
        if let Some(extra_values) = self.expression_attribute_values {
            for (key, value) in extra_values {
                expression_attribute_values.insert(key, to_attribute_value(value)?);
            }
        }
        let exclusive_start_key = match self.exclusive_start_key {
            Some(exclusive_start_key) => {
                let mut serialized_exclusive_start_key =
                    collections::HashMap::with_capacity(exclusive_start_key.len());
                for (key, value) in exclusive_start_key {
                    let value = to_attribute_value(value)?;
                    serialized_exclusive_start_key.insert(key, value);
                }
                Some(serialized_exclusive_start_key)
            }
            None => None,
        };
        let input = MultipleReadInput {
            consistent_read: self.consistent_read,
            exclusive_start_key,
            expression_attribute_names: common::into_hash_map(expression_attribute_names),
            expression_attribute_values: common::into_hash_map(expression_attribute_values),
            filter_expression,
            index_name: self.index_name,
            limit: self.limit,
            projection_expression,
            select: self.select,
            table_name: self.table_name,
        };
        Ok((key_condition_expression, input))
    }
}

/// apply common single read settings to a request builder
#[macro_export]
macro_rules! apply_single_read_input {
    ($builder:expr, $single_read_input:expr) => {
        $builder
            .set_consistent_read($single_read_input.consistent_read)
            .set_expression_attribute_names($single_read_input.expression_attribute_names)
            .set_projection_expression($single_read_input.projection_expression)
            .table_name($single_read_input.table_name)
    };
}

/// apply common multiple read settings to a request builder
#[macro_export]
macro_rules! apply_multiple_read_input {
    ($builder:expr, $multiple_read_input:expr) => {
        $builder
            .set_consistent_read($multiple_read_input.consistent_read)
            .set_exclusive_start_key($multiple_read_input.exclusive_start_key)
            .set_expression_attribute_names($multiple_read_input.expression_attribute_names)
            .set_expression_attribute_values($multiple_read_input.expression_attribute_values)
            .set_filter_expression($multiple_read_input.filter_expression)
            .set_index_name($multiple_read_input.index_name)
            .set_limit($multiple_read_input.limit)
            .set_projection_expression($multiple_read_input.projection_expression)
            .set_select($multiple_read_input.select)
            .table_name($multiple_read_input.table_name)
    };
}
