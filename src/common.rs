//! Common utilities for DynamoDB command construction.
//!
//! This module provides shared types and utilities used across read and write operations,
//! including value coercion, key handling, filter compilation and reserved-word aliasing.

/// Coercion of typed string inputs into DynamoDB attribute values.
pub mod attribute;

/// Filter expression compilation for query and scan operations.
pub mod filter;

/// Key types for identifying items in DynamoDB tables.
pub mod key;

/// Reserved-word aliasing for projection and update expressions.
pub mod reserved;

use aws_sdk_dynamodb::types;
use indexmap::IndexMap;
use std::{collections, hash};

/// Name placeholder map: `#token` to real attribute name, in generation order.
pub type NameMap = IndexMap<String, String>;

/// Value placeholder map: `:token` to coerced attribute value, in generation order.
pub type ValueMap = IndexMap<String, types::AttributeValue>;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

/// An expression string together with the placeholder maps backing it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpressionInput {
    /// The rendered expression.
    pub expression: String,
    /// Name placeholders used by the expression.
    pub expression_attribute_names: NameMap,
    /// Value placeholders used by the expression.
    pub expression_attribute_values: ValueMap,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    pub(crate) fn merge_into(self, names: &mut NameMap, values: &mut ValueMap) -> String {
        names.extend(self.expression_attribute_names);
        values.extend(self.expression_attribute_values);
        self.expression
    }
}

/// Drop an empty placeholder map so it is never sent downstream.
pub(crate) fn into_hash_map<K: Eq + hash::Hash, V>(
    map: IndexMap<K, V>,
) -> Option<collections::HashMap<K, V>> {
    if map.is_empty() {
        None
    } else {
        Some(map.into_iter().collect())
    }
}
